//! Constants used throughout the clinic core crate.
//!
//! Collection directory names and the display placeholders substituted for
//! missing profile fields live here so every caller renders the same text.

/// Default directory for document storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "clinic_data";

/// Collection holding self-registered patient accounts.
pub const USERS_COLLECTION: &str = "users";

/// Collection holding front-desk registered patients.
pub const PATIENTS_COLLECTION: &str = "patients";

/// Collection holding appointments.
pub const APPOINTMENTS_COLLECTION: &str = "appointments";

/// Collection holding clinical encounter records.
pub const CLINICAL_RECORDS_COLLECTION: &str = "clinical_records";

/// Collection holding doctor profiles.
pub const DOCTORS_COLLECTION: &str = "doctors";

/// File extension for stored documents.
pub const DOCUMENT_EXTENSION: &str = "json";

pub const UNNAMED_PATIENT: &str = "Unnamed Patient";
pub const NO_EMAIL: &str = "No email provided";
pub const NO_PHONE: &str = "No phone provided";
pub const UHID_NOT_ASSIGNED: &str = "Not assigned";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_REPORTED: &str = "None reported";

/// Number of most recent appointments shown on the admin dashboard.
pub const DASHBOARD_LATEST_APPOINTMENTS: usize = 5;
