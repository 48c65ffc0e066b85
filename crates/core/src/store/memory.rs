//! Map-backed store.
//!
//! Holds every collection in memory behind a `tokio::sync::RwLock`. Guards are
//! never held across another await point.

use super::{PatientReference, PatientStore};
use crate::documents::{Appointment, ClinicalRecord, Doctor, LegacyUserAccount, RegisteredPatient};
use crate::error::StoreResult;
use crate::id::DocumentId;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    users: BTreeMap<DocumentId, LegacyUserAccount>,
    patients: BTreeMap<DocumentId, RegisteredPatient>,
    appointments: BTreeMap<DocumentId, Appointment>,
    clinical_records: BTreeMap<DocumentId, ClinicalRecord>,
    doctors: BTreeMap<DocumentId, Doctor>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: LegacyUserAccount) {
        self.inner.write().await.users.insert(user.id.clone(), user);
    }

    pub async fn insert_registered_patient(&self, patient: RegisteredPatient) {
        self.inner
            .write()
            .await
            .patients
            .insert(patient.id.clone(), patient);
    }

    pub async fn insert_appointment(&self, appointment: Appointment) {
        self.inner
            .write()
            .await
            .appointments
            .insert(appointment.id.clone(), appointment);
    }

    pub async fn insert_clinical_record(&self, record: ClinicalRecord) {
        self.inner
            .write()
            .await
            .clinical_records
            .insert(record.id.clone(), record);
    }

    pub async fn insert_doctor(&self, doctor: Doctor) {
        self.inner
            .write()
            .await
            .doctors
            .insert(doctor.id.clone(), doctor);
    }
}

impl PatientStore for InMemoryStore {
    async fn find_user(&self, id: &DocumentId) -> StoreResult<Option<LegacyUserAccount>> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn find_registered_patient(
        &self,
        id: &DocumentId,
    ) -> StoreResult<Option<RegisteredPatient>> {
        Ok(self.inner.read().await.patients.get(id).cloned())
    }

    async fn find_appointments(
        &self,
        reference: &PatientReference<'_>,
    ) -> StoreResult<Vec<Appointment>> {
        let inner = self.inner.read().await;
        Ok(inner
            .appointments
            .values()
            .filter(|appointment| reference.matches(appointment))
            .cloned()
            .collect())
    }

    async fn find_clinical_records(
        &self,
        patient_id: &DocumentId,
    ) -> StoreResult<Vec<ClinicalRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .clinical_records
            .values()
            .filter(|record| record.patient == patient_id.as_str())
            .cloned()
            .collect())
    }

    async fn find_doctors(&self, ids: &BTreeSet<DocumentId>) -> StoreResult<Vec<Doctor>> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.doctors.get(id).cloned())
            .collect())
    }

    async fn list_users(&self) -> StoreResult<Vec<LegacyUserAccount>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn list_registered_patients(&self) -> StoreResult<Vec<RegisteredPatient>> {
        Ok(self.inner.read().await.patients.values().cloned().collect())
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.inner.read().await.doctors.values().cloned().collect())
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        Ok(self
            .inner
            .read()
            .await
            .appointments
            .values()
            .cloned()
            .collect())
    }
}
