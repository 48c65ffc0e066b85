//! Stored document shapes.
//!
//! These mirror the JSON the registration flows write: camelCase keys and an
//! `_id` string key. Every display field is optional because the two profile
//! collections were populated by different generations of the product and
//! neither guarantees completeness. Normalisation into a display-ready shape
//! happens in [`crate::view`]; nothing here substitutes placeholders.
//!
//! Unknown keys are ignored on read. In particular a `password` key on a user
//! account is never loaded into [`LegacyUserAccount`].

use crate::id::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Postal address as stored on either profile type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Medical history captured at the front desk. Any subset may be present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Option<String>,
    #[serde(default)]
    pub current_medications: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
}

/// Self-registered patient account (`users` collection).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyUserAccount {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Front-desk registered patient (`patients` collection).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredPatient {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Older registrations stored the birth date under this key.
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    /// Unique hospital identifier.
    #[serde(default)]
    pub uhid: Option<String>,
    #[serde(default)]
    pub medical_info: Option<MedicalInfo>,
}

/// An appointment booking.
///
/// Appointments were written under two schemas: the patient is referenced by
/// `userId` in one and by `patient` in the other. Use
/// [`PatientReference`](crate::store::PatientReference) to match either.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub slot_date: Option<String>,
    #[serde(default)]
    pub slot_time: Option<String>,
    /// Booking time, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub payment: bool,
    #[serde(default)]
    pub is_completed: bool,
}

/// A clinical encounter note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecord {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub patient: String,
    #[serde(default)]
    pub consulted_doctor: Option<String>,
    #[serde(default)]
    pub encounter_type: Option<String>,
    #[serde(default)]
    pub encounter_date: Option<String>,
    #[serde(default)]
    pub reason_for_visit: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Doctor profile (`doctors` collection).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    /// Free text such as `"4 Years"`.
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub fees: Option<f64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// The doctor fields embedded wherever a doctor reference is expanded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: Option<String>,
    pub speciality: Option<String>,
    pub image: Option<String>,
}

impl From<&Doctor> for DoctorSummary {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            speciality: doctor.speciality.clone(),
            image: doctor.image.clone(),
        }
    }
}
