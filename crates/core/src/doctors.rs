//! Public doctor directory: filtering, sorting and the speciality list.

use crate::documents::Doctor;
use crate::profile::non_blank;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorSortKey {
    #[default]
    Name,
    Experience,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Directory query as sent by the doctor list page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorQuery {
    /// Substring of the doctor's name or speciality.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact speciality.
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub sort_by: DoctorSortKey,
    #[serde(default)]
    pub order: SortOrder,
}

/// Leading integer of free-text experience such as `"4 Years"`; 0 otherwise.
fn years_of_experience(doctor: &Doctor) -> u32 {
    let text = doctor.experience.as_deref().unwrap_or_default().trim_start();
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn sort_name(doctor: &Doctor) -> String {
    doctor.name.as_deref().unwrap_or_default().to_lowercase()
}

impl DoctorQuery {
    fn matches(&self, doctor: &Doctor) -> bool {
        if let Some(speciality) = non_blank(self.speciality.as_deref()) {
            if doctor.speciality.as_deref() != Some(speciality) {
                return false;
            }
        }
        let Some(term) = non_blank(self.search.as_deref()) else {
            return true;
        };
        let term = term.trim().to_lowercase();
        [doctor.name.as_deref(), doctor.speciality.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn compare(&self, a: &Doctor, b: &Doctor) -> Ordering {
        let ordering = match self.sort_by {
            DoctorSortKey::Name => sort_name(a).cmp(&sort_name(b)),
            DoctorSortKey::Experience => years_of_experience(a).cmp(&years_of_experience(b)),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Applies the filters, then a stable sort.
    pub fn filter_and_sort(&self, doctors: Vec<Doctor>) -> Vec<Doctor> {
        let mut selected: Vec<Doctor> = doctors.into_iter().filter(|d| self.matches(d)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}

/// Distinct non-blank specialities in first-seen order.
pub fn specialities(doctors: &[Doctor]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for speciality in doctors.iter().filter_map(|d| non_blank(d.speciality.as_deref())) {
        if !seen.iter().any(|s| s == speciality) {
            seen.push(speciality.to_owned());
        }
    }
    seen
}
