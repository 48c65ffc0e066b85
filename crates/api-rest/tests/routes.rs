use api_rest::{app, ApiConfig, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use clinic_core::documents::{
    Appointment, ClinicalRecord, Doctor, LegacyUserAccount, RegisteredPatient,
};
use clinic_core::{CoreConfig, DocumentId, JsonFileStore};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "admin-secret";
const DOCTOR_TOKEN: &str = "doctor-secret";

fn id(raw: &str) -> DocumentId {
    DocumentId::parse(raw).unwrap()
}

fn test_cfg(temp_dir: &TempDir) -> Arc<CoreConfig> {
    Arc::new(CoreConfig::new(temp_dir.path().to_path_buf()).unwrap())
}

fn test_api_cfg() -> ApiConfig {
    ApiConfig::from_env_values(
        None,
        Some(ADMIN_TOKEN.into()),
        Some(DOCTOR_TOKEN.into()),
    )
    .unwrap()
}

fn doctor(raw: &str, name: &str, speciality: &str, experience: &str) -> Doctor {
    Doctor {
        id: id(raw),
        name: Some(name.into()),
        speciality: Some(speciality.into()),
        image: None,
        degree: Some("MBBS".into()),
        experience: Some(experience.into()),
        about: None,
        fees: Some(50.0),
        available: true,
    }
}

fn appointment(raw: &str, user_id: Option<&str>, patient: Option<&str>, millis: i64) -> Appointment {
    Appointment {
        id: id(raw),
        user_id: user_id.map(str::to_owned),
        patient: patient.map(str::to_owned),
        doc_id: Some("doc1".into()),
        slot_date: Some("1_7_2024".into()),
        slot_time: Some("10:00 AM".into()),
        date: Utc.timestamp_millis_opt(millis).unwrap(),
        amount: 50.0,
        cancelled: false,
        payment: true,
        is_completed: false,
    }
}

async fn seed(temp_dir: &TempDir) -> JsonFileStore {
    let store = JsonFileStore::new(test_cfg(temp_dir));

    store
        .put_user(&LegacyUserAccount {
            id: id("user01"),
            name: Some("Asha Rao".into()),
            email: Some("asha@example.com".into()),
            phone: None,
            date_of_birth: Some("2000-06-15".into()),
            gender: Some("Female".into()),
            blood_group: None,
            address: None,
        })
        .await
        .expect("Failed to write user");
    store
        .put_registered_patient(&RegisteredPatient {
            id: id("pat01"),
            patient_name: Some("Ravi Kumar".into()),
            email: None,
            phone: Some("0800 555 010".into()),
            date_of_birth: None,
            dob: Some("1988-03-02".into()),
            gender: None,
            blood_group: Some("O+".into()),
            address: None,
            uhid: Some("UH-0042".into()),
            medical_info: None,
        })
        .await
        .expect("Failed to write patient");

    store
        .put_doctor(&doctor("doc1", "Dr. Meera Shah", "Dermatologist", "4 Years"))
        .await
        .expect("Failed to write doctor");
    store
        .put_doctor(&doctor("doc2", "Dr. Kavya Iyer", "Dermatologist", "9 Years"))
        .await
        .expect("Failed to write doctor");
    store
        .put_doctor(&doctor("doc3", "Dr. Rohan Sen", "Neurologist", "2 Years"))
        .await
        .expect("Failed to write doctor");

    for ap in [
        appointment("ap1", Some("user01"), None, 1_000),
        appointment("ap2", None, Some("user01"), 3_000),
        appointment("ap3", Some("pat01"), None, 2_000),
    ] {
        store
            .put_appointment(&ap)
            .await
            .expect("Failed to write appointment");
    }

    store
        .put_clinical_record(&ClinicalRecord {
            id: id("cr1"),
            patient: "pat01".into(),
            consulted_doctor: Some("doc3".into()),
            encounter_type: Some("Outpatient".into()),
            encounter_date: Some("2024-05-01".into()),
            reason_for_visit: Some("Headache".into()),
            diagnosis: Some("Migraine".into()),
            treatment: None,
            created_at: Utc.timestamp_millis_opt(5_000).unwrap(),
        })
        .await
        .expect("Failed to write clinical record");

    store
}

async fn test_app(temp_dir: &TempDir) -> axum::Router {
    seed(temp_dir).await;
    app(AppState::new(test_cfg(temp_dir), &test_api_cfg()))
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with(uri: &str, header: &str, value: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header, value)
        .body(Body::empty())
        .unwrap()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn test_health_is_public() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (status, body) = send(test_app(&temp_dir).await, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_admin_routes_reject_missing_or_wrong_token() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let (status, body) = send(router.clone(), get("/api/admin/patient-details/user01")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not Authorized Login Again");

    let (status, _) = send(
        router,
        get_with(
            "/api/admin/patient-details/user01",
            "authorization",
            &bearer(DOCTOR_TOKEN),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_patient_details_for_user_account() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (status, body) = send(
        test_app(&temp_dir).await,
        get_with(
            "/api/admin/patient-details/user01",
            "authorization",
            &bearer(ADMIN_TOKEN),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "user");
    let patient = &body["patient"];
    assert_eq!(patient["name"], "Asha Rao");
    assert_eq!(patient["uhid"], "Not assigned");
    assert_eq!(patient["phone"], "No phone provided");

    let appointments: Vec<&str> = patient["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["_id"].as_str().unwrap())
        .collect();
    assert_eq!(appointments, vec!["ap2", "ap1"]);
    assert_eq!(patient["appointments"][0]["doctor"]["name"], "Dr. Meera Shah");
}

#[tokio::test]
async fn test_doctor_patient_details_with_legacy_header() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (status, body) = send(
        test_app(&temp_dir).await,
        get_with("/api/doctor/patient-details/pat01", "dtoken", DOCTOR_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "patient");
    let patient = &body["patient"];
    assert_eq!(patient["patientName"], "Ravi Kumar");
    assert_eq!(patient["uhid"], "UH-0042");
    assert_eq!(patient["dateOfBirth"], "1988-03-02");
    assert_eq!(patient["medicalInfo"]["allergies"], "None reported");
    assert_eq!(
        patient["clinicalRecords"][0]["consultedDoctor"]["name"],
        "Dr. Rohan Sen"
    );
}

#[tokio::test]
async fn test_unknown_patient_is_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (status, body) = send(
        test_app(&temp_dir).await,
        get_with("/api/admin/patient-details/nobody", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Patient not found");
}

#[tokio::test]
async fn test_corrupt_appointment_fails_resolution() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let shard = temp_dir.path().join("appointments").join("ba").join("d_");
    std::fs::create_dir_all(&shard).unwrap();
    std::fs::write(shard.join("bad.json"), "{ not json").unwrap();

    let (status, body) = send(
        router,
        get_with(
            "/api/admin/patient-details/user01",
            "authorization",
            &bearer(ADMIN_TOKEN),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error fetching patient details");
}

#[tokio::test]
async fn test_doctor_list_filters_and_sorts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (status, body) = send(
        test_app(&temp_dir).await,
        get("/api/doctor/list?speciality=Dermatologist&sortBy=experience&order=desc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dr. Kavya Iyer", "Dr. Meera Shah"]);
    assert_eq!(
        body["specialities"],
        serde_json::json!(["Dermatologist", "Neurologist"])
    );
}

#[tokio::test]
async fn test_admin_list_and_search_patients() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let (status, body) = send(
        router.clone(),
        get_with("/api/admin/patients", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"].as_array().unwrap().len(), 2);
    assert_eq!(body["patients"][0]["name"], "Asha Rao");

    let search = Request::builder()
        .method("POST")
        .uri("/api/admin/search-patients")
        .header("atoken", ADMIN_TOKEN)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"term": "uh-0042"}"#))
        .unwrap();
    let (status, body) = send(router, search).await;
    assert_eq!(status, StatusCode::OK);
    let patients = body["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["_id"], "pat01");
    assert_eq!(patients[0]["source"], "patient");
}

#[tokio::test]
async fn test_admin_clinical_records_and_dashboard() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let (status, body) = send(
        router.clone(),
        get_with("/api/admin/clinical-records/pat01", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clinicalRecords"][0]["diagnosis"], "Migraine");

    let (status, body) = send(
        router,
        get_with("/api/admin/dashboard", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dashData"]["doctors"], 3);
    assert_eq!(body["dashData"]["patients"], 2);
    assert_eq!(body["dashData"]["appointments"], 3);
    assert_eq!(body["dashData"]["latestAppointments"][0]["_id"], "ap2");
    assert_eq!(
        body["dashData"]["latestAppointments"][0]["doctor"]["name"],
        "Dr. Meera Shah"
    );
}

#[tokio::test]
async fn test_bad_query_value_uses_error_body() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    for uri in ["/api/doctor/list?order=DESC", "/api/doctor/list?sortBy=rating"] {
        let (status, body) = send(router.clone(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn test_search_without_json_content_type_uses_error_body() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let search = Request::builder()
        .method("POST")
        .uri("/api/admin/search-patients")
        .header("atoken", ADMIN_TOKEN)
        .body(Body::from(r#"{"term": "asha"}"#))
        .unwrap();

    let (status, body) = send(test_app(&temp_dir).await, search).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_clinical_records_failure_message() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let shard = temp_dir.path().join("clinical_records").join("ba").join("d_");
    std::fs::create_dir_all(&shard).unwrap();
    std::fs::write(shard.join("bad.json"), "{ not json").unwrap();

    let (status, body) = send(
        router,
        get_with("/api/admin/clinical-records/pat01", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error fetching clinical records");
}

#[tokio::test]
async fn test_admin_all_doctors_and_appointments() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = test_app(&temp_dir).await;

    let (status, body) = send(
        router.clone(),
        get_with("/api/admin/all-doctors", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctors"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        router.clone(),
        get_with("/api/admin/appointments", "atoken", ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ap2", "ap3", "ap1"]);
    assert_eq!(body["appointments"][0]["doctor"]["name"], "Dr. Meera Shah");

    let (status, _) = send(router, get("/api/admin/appointments")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
