//! # Clinic Core
//!
//! Core patient lookup logic for the clinic records system.
//!
//! Patients exist in two collections: self-registered accounts (`users`) and
//! front-desk registrations (`patients`). This crate resolves an identifier
//! against both and assembles one normalised view with appointments (under
//! either appointment schema) and clinical records, doctors expanded.
//!
//! - [`resolver`]: single resolution path shared by every caller
//! - [`store`]: the datastore seam plus JSON-file and in-memory stores
//! - [`listing`], [`appointments`], [`doctors`], [`dashboard`]: admin and directory queries
//!
//! **No API concerns**: HTTP routing, authentication and CLI parsing belong in
//! `api-rest` and `cli`.

pub mod age;
pub mod appointments;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod doctors;
pub mod documents;
pub mod error;
pub mod id;
pub mod listing;
pub mod profile;
pub mod resolver;
pub mod store;
pub mod view;

pub use config::{data_dir_from_env_value, CoreConfig};
pub use constants::DEFAULT_DATA_DIR;
pub use error::{
    ConfigError, ConfigResult, ResolveError, ResolveResult, StoreError, StoreResult,
};
pub use id::DocumentId;
pub use profile::{PatientProfile, PatientSource};
pub use resolver::{PatientResolver, ResolvedPatient};
pub use store::{InMemoryStore, JsonFileStore, PatientStore};
pub use view::NormalizedPatientView;
