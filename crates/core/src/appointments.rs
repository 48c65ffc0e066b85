//! Doctor expansion shared by every appointment and clinical-record read.

use crate::documents::{Appointment, DoctorSummary};
use crate::error::StoreResult;
use crate::id::DocumentId;
use crate::store::PatientStore;
use crate::view::AppointmentView;
use std::collections::{BTreeMap, BTreeSet};

/// Resolves every parseable doctor reference with one batched lookup.
pub(crate) async fn doctor_summaries<'a, S: PatientStore>(
    store: &S,
    references: impl Iterator<Item = Option<&'a str>>,
) -> StoreResult<BTreeMap<DocumentId, DoctorSummary>> {
    let ids: BTreeSet<DocumentId> = references
        .flatten()
        .filter_map(|raw| DocumentId::parse(raw).ok())
        .collect();
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let doctors = store.find_doctors(&ids).await?;
    Ok(doctors
        .iter()
        .map(|doctor| (doctor.id.clone(), DoctorSummary::from(doctor)))
        .collect())
}

pub(crate) fn lookup_doctor(
    doctors: &BTreeMap<DocumentId, DoctorSummary>,
    reference: Option<&str>,
) -> Option<DoctorSummary> {
    let id = DocumentId::parse(reference?).ok()?;
    doctors.get(&id).cloned()
}

/// Attaches doctors to `appointments`, keeping their order.
pub async fn expand_appointments<S: PatientStore>(
    store: &S,
    appointments: Vec<Appointment>,
) -> StoreResult<Vec<AppointmentView>> {
    let doctors = doctor_summaries(store, appointments.iter().map(|a| a.doc_id.as_deref())).await?;
    Ok(appointments
        .into_iter()
        .map(|appointment| AppointmentView {
            doctor: lookup_doctor(&doctors, appointment.doc_id.as_deref()),
            appointment,
        })
        .collect())
}

/// Every appointment, newest first, doctors expanded.
pub async fn list_appointments<S: PatientStore>(store: &S) -> StoreResult<Vec<AppointmentView>> {
    let mut appointments = store.list_appointments().await?;
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    expand_appointments(store, appointments).await
}
