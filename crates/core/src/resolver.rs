//! Patient identity resolution.
//!
//! [`PatientResolver::resolve`] is the single read path behind every "view
//! patient" screen:
//!
//! 1. Look the identifier up in the `users` collection, then in `patients`;
//!    the first match wins and fixes the [`PatientSource`].
//! 2. Fetch the patient's appointments (under either reference key) and
//!    clinical records concurrently, each sorted newest first as soon as it
//!    arrives.
//! 3. Expand every referenced doctor with one batched lookup.
//! 4. Normalise into a [`NormalizedPatientView`].
//!
//! Any datastore failure aborts the whole resolution. The resolver never
//! writes.

use crate::appointments::{doctor_summaries, lookup_doctor};
use crate::documents::{Appointment, ClinicalRecord};
use crate::error::{ResolveError, ResolveResult, StoreResult};
use crate::id::DocumentId;
use crate::profile::{PatientProfile, PatientSource};
use crate::store::{PatientReference, PatientStore};
use crate::view::{normalize, AppointmentView, ClinicalRecordView, NormalizedPatientView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Successful resolution, serialised directly as the response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPatient {
    pub success: bool,
    pub patient: NormalizedPatientView,
    pub source: PatientSource,
}

#[derive(Debug)]
pub struct PatientResolver<S> {
    store: Arc<S>,
}

impl<S> Clone for PatientResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: PatientStore> PatientResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finds the canonical profile for `id`: user accounts first, then registered patients.
    pub async fn find_profile(&self, id: &DocumentId) -> StoreResult<Option<PatientProfile>> {
        if let Some(user) = self.store.find_user(id).await? {
            return Ok(Some(PatientProfile::User(user)));
        }
        Ok(self
            .store
            .find_registered_patient(id)
            .await?
            .map(PatientProfile::Patient))
    }

    /// Resolves `patient_id` into the unified patient view.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if the identifier names no profile in
    ///   either store (including identifiers that are not valid document ids).
    /// - [`ResolveError::ResolutionFailed`] if any datastore query fails.
    pub async fn resolve(&self, patient_id: &str) -> ResolveResult<ResolvedPatient> {
        let id = parse_patient_id(patient_id)?;

        let profile = self
            .find_profile(&id)
            .await?
            .ok_or_else(|| ResolveError::NotFound(patient_id.to_owned()))?;
        let source = profile.source();
        tracing::debug!("resolved patient {} from {} store", id, source);

        let reference = PatientReference::new(&id);
        let (appointments, clinical_records) = tokio::try_join!(
            self.sorted_appointments(&reference),
            self.sorted_clinical_records(&id),
        )?;

        let doctor_refs = appointments
            .iter()
            .map(|a| a.doc_id.as_deref())
            .chain(clinical_records.iter().map(|r| r.consulted_doctor.as_deref()));
        let doctors = doctor_summaries(self.store.as_ref(), doctor_refs).await?;

        let appointments = appointments
            .into_iter()
            .map(|appointment| AppointmentView {
                doctor: lookup_doctor(&doctors, appointment.doc_id.as_deref()),
                appointment,
            })
            .collect();
        let clinical_records = clinical_records
            .into_iter()
            .map(|record| {
                let doctor = lookup_doctor(&doctors, record.consulted_doctor.as_deref());
                ClinicalRecordView::new(record, doctor)
            })
            .collect();

        Ok(ResolvedPatient {
            success: true,
            patient: normalize(&profile, appointments, clinical_records),
            source,
        })
    }

    /// Clinical records for `patient_id`, doctor-expanded and newest first.
    ///
    /// Does not require a profile to exist; an unknown patient has no records.
    pub async fn clinical_records(&self, patient_id: &str) -> ResolveResult<Vec<ClinicalRecordView>> {
        let id = parse_patient_id(patient_id)?;
        let records = self.sorted_clinical_records(&id).await?;
        let doctors = doctor_summaries(
            self.store.as_ref(),
            records.iter().map(|r| r.consulted_doctor.as_deref()),
        )
        .await?;
        Ok(records
            .into_iter()
            .map(|record| {
                let doctor = lookup_doctor(&doctors, record.consulted_doctor.as_deref());
                ClinicalRecordView::new(record, doctor)
            })
            .collect())
    }

    async fn sorted_appointments(
        &self,
        reference: &PatientReference<'_>,
    ) -> StoreResult<Vec<Appointment>> {
        let mut appointments = self.store.find_appointments(reference).await?;
        appointments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(appointments)
    }

    async fn sorted_clinical_records(&self, id: &DocumentId) -> StoreResult<Vec<ClinicalRecord>> {
        let mut records = self.store.find_clinical_records(id).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

fn parse_patient_id(patient_id: &str) -> ResolveResult<DocumentId> {
    DocumentId::parse(patient_id).map_err(|e| {
        tracing::warn!("rejecting patient identifier: {}", e);
        ResolveError::NotFound(patient_id.to_owned())
    })
}
