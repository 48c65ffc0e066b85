//! Admin dashboard figures.

use crate::appointments::expand_appointments;
use crate::constants::DASHBOARD_LATEST_APPOINTMENTS;
use crate::error::StoreResult;
use crate::listing::load_profiles;
use crate::store::PatientStore;
use crate::view::AppointmentView;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub doctors: usize,
    /// Distinct across both profile stores.
    pub patients: usize,
    pub appointments: usize,
    /// Most recent bookings first, doctors expanded.
    pub latest_appointments: Vec<AppointmentView>,
}

pub async fn dashboard<S: PatientStore>(store: &S) -> StoreResult<DashboardData> {
    let (doctors, profiles, mut appointments) = tokio::try_join!(
        store.list_doctors(),
        load_profiles(store),
        store.list_appointments(),
    )?;

    let total_appointments = appointments.len();
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    appointments.truncate(DASHBOARD_LATEST_APPOINTMENTS);

    Ok(DashboardData {
        doctors: doctors.len(),
        patients: profiles.len(),
        appointments: total_appointments,
        latest_appointments: expand_appointments(store, appointments).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{Appointment, Doctor, LegacyUserAccount};
    use crate::id::DocumentId;
    use crate::store::InMemoryStore;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_dashboard_counts_and_latest() {
        let store = InMemoryStore::new();
        store
            .insert_user(LegacyUserAccount {
                id: DocumentId::parse("u1").unwrap(),
                name: Some("Tara".into()),
                email: None,
                phone: None,
                date_of_birth: None,
                gender: None,
                blood_group: None,
                address: None,
            })
            .await;
        store
            .insert_doctor(Doctor {
                id: DocumentId::parse("doc1").unwrap(),
                name: Some("Dr. Sanjay Gupta".into()),
                speciality: Some("Pediatricians".into()),
                image: None,
                degree: None,
                experience: None,
                about: None,
                fees: None,
                available: true,
            })
            .await;
        for i in 0..7 {
            store
                .insert_appointment(Appointment {
                    id: DocumentId::parse(&format!("ap{i}")).unwrap(),
                    user_id: Some("u1".into()),
                    patient: None,
                    doc_id: Some("doc1".into()),
                    slot_date: None,
                    slot_time: None,
                    date: Utc.timestamp_millis_opt(i * 1_000).unwrap(),
                    amount: 0.0,
                    cancelled: false,
                    payment: false,
                    is_completed: false,
                })
                .await;
        }

        let data = dashboard(&store).await.unwrap();
        assert_eq!(data.doctors, 1);
        assert_eq!(data.patients, 1);
        assert_eq!(data.appointments, 7);
        let latest: Vec<&str> = data
            .latest_appointments
            .iter()
            .map(|a| a.appointment.id.as_str())
            .collect();
        assert_eq!(latest, vec!["ap6", "ap5", "ap4", "ap3", "ap2"]);
        let doctor = data.latest_appointments[0].doctor.as_ref().unwrap();
        assert_eq!(doctor.name.as_deref(), Some("Dr. Sanjay Gupta"));
    }
}
