//! Display-ready patient view.
//!
//! [`normalize`] turns a [`PatientProfile`] plus its populated appointments and
//! clinical records into a [`NormalizedPatientView`] in which every display
//! field holds either a stored value or a documented placeholder. Defaults are
//! applied per field: a partially filled `medicalInfo` keeps what it has.

use crate::constants::{
    NONE_REPORTED, NOT_SPECIFIED, NO_EMAIL, NO_PHONE, UHID_NOT_ASSIGNED, UNNAMED_PATIENT,
};
use crate::documents::{Address, Appointment, ClinicalRecord, DoctorSummary, EmergencyContact};
use crate::id::DocumentId;
use crate::profile::{non_blank, PatientProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An appointment with its doctor reference expanded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    /// `null` when `docId` is absent or names no stored doctor.
    pub doctor: Option<DoctorSummary>,
}

/// A clinical record with `consultedDoctor` expanded in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecordView {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub patient: String,
    pub consulted_doctor: Option<DoctorSummary>,
    pub encounter_type: Option<String>,
    pub encounter_date: Option<String>,
    pub reason_for_visit: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClinicalRecordView {
    pub fn new(record: ClinicalRecord, consulted_doctor: Option<DoctorSummary>) -> Self {
        Self {
            id: record.id,
            patient: record.patient,
            consulted_doctor,
            encounter_type: record.encounter_type,
            encounter_date: record.encounter_date,
            reason_for_visit: record.reason_for_visit,
            diagnosis: record.diagnosis,
            treatment: record.treatment,
            created_at: record.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfoView {
    pub allergies: String,
    pub chronic_conditions: String,
    pub current_medications: String,
    pub emergency_contact: EmergencyContact,
}

/// The unified patient shape returned to every caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPatientView {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Mirrors `name`; older clients read this key.
    pub patient_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: Option<String>,
    pub blood_group: String,
    pub address: Address,
    pub uhid: String,
    pub medical_info: MedicalInfoView,
    pub appointments: Vec<AppointmentView>,
    pub clinical_records: Vec<ClinicalRecordView>,
}

pub(crate) fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    non_blank(value).unwrap_or(placeholder).to_owned()
}

pub(crate) fn display_name(profile: &PatientProfile) -> String {
    or_placeholder(profile.raw_name(), UNNAMED_PATIENT)
}

pub(crate) fn display_uhid(profile: &PatientProfile) -> String {
    or_placeholder(profile.uhid(), UHID_NOT_ASSIGNED)
}

fn medical_info_view(profile: &PatientProfile) -> MedicalInfoView {
    let info = profile.medical_info();
    MedicalInfoView {
        allergies: or_placeholder(info.and_then(|i| i.allergies.as_deref()), NONE_REPORTED),
        chronic_conditions: or_placeholder(
            info.and_then(|i| i.chronic_conditions.as_deref()),
            NONE_REPORTED,
        ),
        current_medications: or_placeholder(
            info.and_then(|i| i.current_medications.as_deref()),
            NONE_REPORTED,
        ),
        emergency_contact: info
            .and_then(|i| i.emergency_contact.clone())
            .unwrap_or_default(),
    }
}

/// Builds the normalised view. Ordering of the two sequences is preserved.
pub fn normalize(
    profile: &PatientProfile,
    appointments: Vec<AppointmentView>,
    clinical_records: Vec<ClinicalRecordView>,
) -> NormalizedPatientView {
    let name = display_name(profile);
    NormalizedPatientView {
        id: profile.id().clone(),
        patient_name: name.clone(),
        name,
        email: or_placeholder(profile.email(), NO_EMAIL),
        phone: or_placeholder(profile.phone(), NO_PHONE),
        gender: or_placeholder(profile.gender(), NOT_SPECIFIED),
        date_of_birth: profile.date_of_birth().map(str::to_owned),
        blood_group: or_placeholder(profile.blood_group(), NOT_SPECIFIED),
        address: profile.address().cloned().unwrap_or_default(),
        uhid: display_uhid(profile),
        medical_info: medical_info_view(profile),
        appointments,
        clinical_records,
    }
}
