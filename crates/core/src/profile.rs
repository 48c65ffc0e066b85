//! The dual patient identity model.
//!
//! A patient profile lives in exactly one of two collections. [`PatientProfile`]
//! carries whichever record was found together with its [`PatientSource`] tag so
//! callers handle both variants exhaustively instead of probing optional fields.

use crate::documents::{Address, LegacyUserAccount, MedicalInfo, RegisteredPatient};
use crate::id::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identity system owns a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientSource {
    /// Self-registered account in the `users` collection.
    User,
    /// Front-desk registration in the `patients` collection.
    Patient,
}

impl PatientSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientSource::User => "user",
            PatientSource::Patient => "patient",
        }
    }
}

impl fmt::Display for PatientSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical profile record and the store it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatientProfile {
    User(LegacyUserAccount),
    Patient(RegisteredPatient),
}

impl PatientProfile {
    pub fn source(&self) -> PatientSource {
        match self {
            PatientProfile::User(_) => PatientSource::User,
            PatientProfile::Patient(_) => PatientSource::Patient,
        }
    }

    pub fn id(&self) -> &DocumentId {
        match self {
            PatientProfile::User(user) => &user.id,
            PatientProfile::Patient(patient) => &patient.id,
        }
    }

    /// `name` for user accounts, `patientName` for registered patients.
    pub fn raw_name(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => user.name.as_deref(),
            PatientProfile::Patient(patient) => patient.patient_name.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => user.email.as_deref(),
            PatientProfile::Patient(patient) => patient.email.as_deref(),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => user.phone.as_deref(),
            PatientProfile::Patient(patient) => patient.phone.as_deref(),
        }
    }

    pub fn gender(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => user.gender.as_deref(),
            PatientProfile::Patient(patient) => patient.gender.as_deref(),
        }
    }

    pub fn blood_group(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => user.blood_group.as_deref(),
            PatientProfile::Patient(patient) => patient.blood_group.as_deref(),
        }
    }

    /// Only registered patients carry a hospital identifier.
    pub fn uhid(&self) -> Option<&str> {
        match self {
            PatientProfile::User(_) => None,
            PatientProfile::Patient(patient) => patient.uhid.as_deref(),
        }
    }

    /// `dateOfBirth`, falling back to the older `dob` key. Blank values are skipped.
    pub fn date_of_birth(&self) -> Option<&str> {
        match self {
            PatientProfile::User(user) => non_blank(user.date_of_birth.as_deref()),
            PatientProfile::Patient(patient) => non_blank(patient.date_of_birth.as_deref())
                .or_else(|| non_blank(patient.dob.as_deref())),
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            PatientProfile::User(user) => user.address.as_ref(),
            PatientProfile::Patient(patient) => patient.address.as_ref(),
        }
    }

    pub fn medical_info(&self) -> Option<&MedicalInfo> {
        match self {
            PatientProfile::User(_) => None,
            PatientProfile::Patient(patient) => patient.medical_info.as_ref(),
        }
    }
}

/// Treats absent and whitespace-only values alike.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(dob_field: Option<&str>, dob_legacy: Option<&str>) -> RegisteredPatient {
        RegisteredPatient {
            id: DocumentId::parse("p1").unwrap(),
            patient_name: Some("Meera Iyer".into()),
            email: None,
            phone: None,
            date_of_birth: dob_field.map(str::to_owned),
            dob: dob_legacy.map(str::to_owned),
            gender: None,
            blood_group: None,
            address: None,
            uhid: Some("UH-1".into()),
            medical_info: None,
        }
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PatientSource::User).unwrap(),
            "\"user\""
        );
        assert_eq!(PatientSource::Patient.to_string(), "patient");
    }

    #[test]
    fn test_date_of_birth_prefers_primary_key() {
        let both = PatientProfile::Patient(registered(Some("1990-01-01"), Some("1980-01-01")));
        assert_eq!(both.date_of_birth(), Some("1990-01-01"));

        let legacy = PatientProfile::Patient(registered(None, Some("1980-01-01")));
        assert_eq!(legacy.date_of_birth(), Some("1980-01-01"));

        let blank = PatientProfile::Patient(registered(Some("  "), Some("1980-01-01")));
        assert_eq!(blank.date_of_birth(), Some("1980-01-01"));

        let none = PatientProfile::Patient(registered(None, None));
        assert_eq!(none.date_of_birth(), None);
    }

    #[test]
    fn test_user_profiles_have_no_uhid() {
        let user = PatientProfile::User(LegacyUserAccount {
            id: DocumentId::parse("u1").unwrap(),
            name: Some("Kabir".into()),
            email: None,
            phone: None,
            date_of_birth: None,
            gender: None,
            blood_group: None,
            address: None,
        });
        assert_eq!(user.uhid(), None);
        assert_eq!(user.raw_name(), Some("Kabir"));
        assert_eq!(user.source(), PatientSource::User);
    }
}
