//! Datastore access.
//!
//! [`PatientStore`] is the query surface the resolver and the listing
//! operations consume: find-by-identifier and find-by-filter over five
//! document collections. Two implementations ship with the crate:
//!
//! - [`JsonFileStore`]: JSON documents in a sharded directory tree
//! - [`InMemoryStore`]: a map-backed store for tests and tooling
//!
//! Stores return documents unsorted; ordering is the caller's concern.

pub mod files;
pub mod memory;

pub use files::JsonFileStore;
pub use memory::InMemoryStore;

use crate::documents::{Appointment, ClinicalRecord, Doctor, LegacyUserAccount, RegisteredPatient};
use crate::error::StoreResult;
use crate::id::DocumentId;
use std::collections::BTreeSet;
use std::future::Future;

/// A logical reference to a patient from an appointment.
///
/// Appointments name their patient through `userId` or `patient` depending on
/// which schema wrote them. This is the only place that knows both keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientReference<'a>(&'a DocumentId);

impl<'a> PatientReference<'a> {
    pub fn new(patient_id: &'a DocumentId) -> Self {
        Self(patient_id)
    }

    pub fn patient_id(&self) -> &DocumentId {
        self.0
    }

    /// True when either legacy reference key names this patient.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let id = self.0.as_str();
        appointment.user_id.as_deref() == Some(id) || appointment.patient.as_deref() == Some(id)
    }
}

/// Read access to the clinic's document collections.
///
/// All futures are `Send` so stores can sit behind an `Arc` in server state.
pub trait PatientStore: Send + Sync {
    /// Looks up a self-registered account. Credentials are never loaded.
    fn find_user(
        &self,
        id: &DocumentId,
    ) -> impl Future<Output = StoreResult<Option<LegacyUserAccount>>> + Send;

    fn find_registered_patient(
        &self,
        id: &DocumentId,
    ) -> impl Future<Output = StoreResult<Option<RegisteredPatient>>> + Send;

    /// Every appointment matching `reference` under either schema.
    fn find_appointments(
        &self,
        reference: &PatientReference<'_>,
    ) -> impl Future<Output = StoreResult<Vec<Appointment>>> + Send;

    /// Clinical records whose `patient` key equals `patient_id`.
    fn find_clinical_records(
        &self,
        patient_id: &DocumentId,
    ) -> impl Future<Output = StoreResult<Vec<ClinicalRecord>>> + Send;

    /// Doctors with any of the given identifiers. Unknown identifiers are skipped.
    fn find_doctors(
        &self,
        ids: &BTreeSet<DocumentId>,
    ) -> impl Future<Output = StoreResult<Vec<Doctor>>> + Send;

    fn list_users(&self) -> impl Future<Output = StoreResult<Vec<LegacyUserAccount>>> + Send;

    fn list_registered_patients(
        &self,
    ) -> impl Future<Output = StoreResult<Vec<RegisteredPatient>>> + Send;

    fn list_doctors(&self) -> impl Future<Output = StoreResult<Vec<Doctor>>> + Send;

    fn list_appointments(&self) -> impl Future<Output = StoreResult<Vec<Appointment>>> + Send;
}
