//! File-backed document store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   users/<s1>/<s2>/<id>.json
//!   patients/<s1>/<s2>/<id>.json
//!   appointments/<s1>/<s2>/<id>.json
//!   clinical_records/<s1>/<s2>/<id>.json
//!   doctors/<s1>/<s2>/<id>.json
//! ```
//!
//! where `s1` and `s2` are derived from the identifier (see [`crate::id`]).
//!
//! Lookups by identifier read a single file. Filter queries scan the whole
//! collection. A missing collection directory is an empty collection, but a
//! document that cannot be read or parsed fails the query: callers never see a
//! silently truncated result set.

use super::{PatientReference, PatientStore};
use crate::config::CoreConfig;
use crate::constants::{
    APPOINTMENTS_COLLECTION, CLINICAL_RECORDS_COLLECTION, DOCTORS_COLLECTION, DOCUMENT_EXTENSION,
    PATIENTS_COLLECTION, USERS_COLLECTION,
};
use crate::documents::{Appointment, ClinicalRecord, Doctor, LegacyUserAccount, RegisteredPatient};
use crate::error::{StoreError, StoreResult};
use crate::id::DocumentId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    cfg: Arc<CoreConfig>,
}

impl JsonFileStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.cfg.data_dir().join(collection)
    }

    /// Writes `document` as `id` into `collection`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the shard directories cannot be created, the
    /// document cannot be serialised, or the file cannot be written.
    pub async fn put<T: Serialize>(
        &self,
        collection: &str,
        id: &DocumentId,
        document: &T,
    ) -> StoreResult<PathBuf> {
        let path = id.sharded_file(&self.collection_dir(collection), DOCUMENT_EXTENSION);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(StoreError::CollectionDirCreation)?;
        }
        let json = serde_json::to_vec_pretty(document).map_err(StoreError::Serialization)?;
        fs::write(&path, json).await.map_err(StoreError::FileWrite)?;
        Ok(path)
    }

    pub async fn put_user(&self, user: &LegacyUserAccount) -> StoreResult<PathBuf> {
        self.put(USERS_COLLECTION, &user.id, user).await
    }

    pub async fn put_registered_patient(&self, patient: &RegisteredPatient) -> StoreResult<PathBuf> {
        self.put(PATIENTS_COLLECTION, &patient.id, patient).await
    }

    pub async fn put_appointment(&self, appointment: &Appointment) -> StoreResult<PathBuf> {
        self.put(APPOINTMENTS_COLLECTION, &appointment.id, appointment)
            .await
    }

    pub async fn put_clinical_record(&self, record: &ClinicalRecord) -> StoreResult<PathBuf> {
        self.put(CLINICAL_RECORDS_COLLECTION, &record.id, record)
            .await
    }

    pub async fn put_doctor(&self, doctor: &Doctor) -> StoreResult<PathBuf> {
        self.put(DOCTORS_COLLECTION, &doctor.id, doctor).await
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> StoreResult<Option<T>> {
        let path = id.sharded_file(&self.collection_dir(collection), DOCUMENT_EXTENSION);
        match fs::read(&path).await {
            Ok(bytes) => parse_document(&path, &bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::FileRead(e)),
        }
    }

    async fn scan<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let paths = document_paths(&self.collection_dir(collection)).await?;
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path).await.map_err(StoreError::FileRead)?;
            documents.push(parse_document(&path, &bytes)?);
        }
        tracing::debug!("scanned {} documents from {}", documents.len(), collection);
        Ok(documents)
    }
}

fn parse_document<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

async fn is_dir(entry: &fs::DirEntry) -> StoreResult<bool> {
    let file_type = entry.file_type().await.map_err(StoreError::FileRead)?;
    Ok(file_type.is_dir())
}

/// Lists `<collection_dir>/<s1>/<s2>/*.json` in a stable order.
async fn document_paths(collection_dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let mut s1_iter = match fs::read_dir(collection_dir).await {
        Ok(it) => it,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(paths),
        Err(e) => return Err(StoreError::FileRead(e)),
    };
    while let Some(s1) = s1_iter.next_entry().await.map_err(StoreError::FileRead)? {
        if !is_dir(&s1).await? {
            continue;
        }
        let s1_path = s1.path();

        let mut s2_iter = fs::read_dir(&s1_path).await.map_err(StoreError::FileRead)?;
        while let Some(s2) = s2_iter.next_entry().await.map_err(StoreError::FileRead)? {
            if !is_dir(&s2).await? {
                continue;
            }
            let s2_path = s2.path();

            let mut doc_iter = fs::read_dir(&s2_path).await.map_err(StoreError::FileRead)?;
            while let Some(doc) = doc_iter.next_entry().await.map_err(StoreError::FileRead)? {
                let doc_path = doc.path();
                if !doc_path
                    .extension()
                    .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
                {
                    continue;
                }
                let file_type = doc.file_type().await.map_err(StoreError::FileRead)?;
                if file_type.is_file() {
                    paths.push(doc_path);
                }
            }
        }
    }

    paths.sort();
    Ok(paths)
}

impl PatientStore for JsonFileStore {
    async fn find_user(&self, id: &DocumentId) -> StoreResult<Option<LegacyUserAccount>> {
        self.read_document(USERS_COLLECTION, id).await
    }

    async fn find_registered_patient(
        &self,
        id: &DocumentId,
    ) -> StoreResult<Option<RegisteredPatient>> {
        self.read_document(PATIENTS_COLLECTION, id).await
    }

    async fn find_appointments(
        &self,
        reference: &PatientReference<'_>,
    ) -> StoreResult<Vec<Appointment>> {
        let appointments: Vec<Appointment> = self.scan(APPOINTMENTS_COLLECTION).await?;
        Ok(appointments
            .into_iter()
            .filter(|appointment| reference.matches(appointment))
            .collect())
    }

    async fn find_clinical_records(
        &self,
        patient_id: &DocumentId,
    ) -> StoreResult<Vec<ClinicalRecord>> {
        let records: Vec<ClinicalRecord> = self.scan(CLINICAL_RECORDS_COLLECTION).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.patient == patient_id.as_str())
            .collect())
    }

    async fn find_doctors(&self, ids: &BTreeSet<DocumentId>) -> StoreResult<Vec<Doctor>> {
        let mut doctors = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(doctor) = self.read_document(DOCTORS_COLLECTION, id).await? {
                doctors.push(doctor);
            }
        }
        Ok(doctors)
    }

    async fn list_users(&self) -> StoreResult<Vec<LegacyUserAccount>> {
        self.scan(USERS_COLLECTION).await
    }

    async fn list_registered_patients(&self) -> StoreResult<Vec<RegisteredPatient>> {
        self.scan(PATIENTS_COLLECTION).await
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        self.scan(DOCTORS_COLLECTION).await
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        self.scan(APPOINTMENTS_COLLECTION).await
    }
}
