//! Bulk patient listing and search across both profile stores.
//!
//! Summaries use the same field defaults as the resolver's view, plus an age
//! computed from the stored birth date.

use crate::age::age_from_stored;
use crate::constants::{NOT_SPECIFIED, NO_EMAIL, NO_PHONE};
use crate::error::StoreResult;
use crate::id::DocumentId;
use crate::profile::{PatientProfile, PatientSource};
use crate::store::PatientStore;
use crate::view::{display_name, display_uhid, or_placeholder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the admin patient list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub uhid: String,
    pub gender: String,
    pub blood_group: String,
    pub date_of_birth: Option<String>,
    /// `null` when the birth date is absent or unparseable.
    pub age: Option<u32>,
    pub source: PatientSource,
}

impl PatientSummary {
    pub fn from_profile(profile: &PatientProfile, today: NaiveDate) -> Self {
        Self {
            id: profile.id().clone(),
            name: display_name(profile),
            email: or_placeholder(profile.email(), NO_EMAIL),
            phone: or_placeholder(profile.phone(), NO_PHONE),
            uhid: display_uhid(profile),
            gender: or_placeholder(profile.gender(), NOT_SPECIFIED),
            blood_group: or_placeholder(profile.blood_group(), NOT_SPECIFIED),
            date_of_birth: profile.date_of_birth().map(str::to_owned),
            age: age_from_stored(profile.date_of_birth(), today),
            source: profile.source(),
        }
    }
}

/// Every profile from both stores. An identifier present in both appears once,
/// as its user account.
pub async fn load_profiles<S: PatientStore>(store: &S) -> StoreResult<Vec<PatientProfile>> {
    let (users, patients) = tokio::try_join!(store.list_users(), store.list_registered_patients())?;

    let user_ids: BTreeSet<DocumentId> = users.iter().map(|u| u.id.clone()).collect();
    let shadowed = patients.iter().filter(|p| user_ids.contains(&p.id)).count();
    if shadowed > 0 {
        tracing::warn!(
            "{} registered patient(s) share an identifier with a user account",
            shadowed
        );
    }

    let mut profiles: Vec<PatientProfile> = users.into_iter().map(PatientProfile::User).collect();
    profiles.extend(
        patients
            .into_iter()
            .filter(|p| !user_ids.contains(&p.id))
            .map(PatientProfile::Patient),
    );
    Ok(profiles)
}

fn summarise(profiles: &[PatientProfile], today: NaiveDate) -> Vec<PatientSummary> {
    let mut summaries: Vec<PatientSummary> = profiles
        .iter()
        .map(|profile| PatientSummary::from_profile(profile, today))
        .collect();
    summaries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    summaries
}

/// Lists all patients sorted by name, then identifier.
pub async fn list_patients<S: PatientStore>(
    store: &S,
    today: NaiveDate,
) -> StoreResult<Vec<PatientSummary>> {
    let profiles = load_profiles(store).await?;
    Ok(summarise(&profiles, today))
}

/// Case-insensitive substring search over name, email, phone and uhid.
///
/// A blank term returns no results without touching the store.
pub async fn search_patients<S: PatientStore>(
    store: &S,
    term: &str,
    today: NaiveDate,
) -> StoreResult<Vec<PatientSummary>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let matches = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase().contains(&needle));
    let profiles: Vec<PatientProfile> = load_profiles(store)
        .await?
        .into_iter()
        .filter(|p| {
            matches(p.raw_name()) || matches(p.email()) || matches(p.phone()) || matches(p.uhid())
        })
        .collect();
    Ok(summarise(&profiles, today))
}
