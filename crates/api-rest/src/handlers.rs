use crate::error::{ApiError, ErrorRes};
use crate::extract::{ApiJson, ApiQuery};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use chrono::Utc;
use clinic_core::appointments::list_appointments;
use clinic_core::dashboard::{dashboard as load_dashboard, DashboardData};
use clinic_core::doctors::{specialities, DoctorQuery};
use clinic_core::documents::Doctor;
use clinic_core::listing::{
    list_patients as load_patients, search_patients as find_patients, PatientSummary,
};
use clinic_core::view::{AppointmentView, ClinicalRecordView};
use clinic_core::{PatientStore, ResolvedPatient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorListRes {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub doctors: Vec<Doctor>,
    pub specialities: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AllDoctorsRes {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentsRes {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub appointments: Vec<AppointmentView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientsRes {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub patients: Vec<PatientSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchPatientsReq {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecordsRes {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub clinical_records: Vec<ClinicalRecordView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRes {
    pub success: bool,
    #[schema(value_type = Object)]
    pub dash_data: DashboardData,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Clinic REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/doctor/list",
    params(
        ("search" = Option<String>, Query, description = "Substring of name or speciality"),
        ("speciality" = Option<String>, Query, description = "Exact speciality"),
        ("sortBy" = Option<String>, Query, description = "`name` or `experience`"),
        ("order" = Option<String>, Query, description = "`asc` or `desc`")
    ),
    responses(
        (status = 200, description = "Filtered doctor directory", body = DoctorListRes),
        (status = 400, description = "Unrecognised query value", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Public doctor directory with optional filtering and sorting.
pub async fn doctor_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DoctorQuery>,
) -> Result<Json<DoctorListRes>, ApiError> {
    let doctors = state
        .store()
        .list_doctors()
        .await
        .map_err(|e| ApiError::from_store("Doctor list", e, "Error fetching doctors"))?;

    let specialities = specialities(&doctors);
    Ok(Json(DoctorListRes {
        success: true,
        doctors: query.filter_and_sort(doctors),
        specialities,
    }))
}

async fn patient_details(
    state: &AppState,
    context: &str,
    patient_id: &str,
) -> Result<Json<ResolvedPatient>, ApiError> {
    state
        .resolver
        .resolve(patient_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_resolve(context, e, "Error fetching patient details"))
}

#[utoipa::path(
    get,
    path = "/api/doctor/patient-details/{patientId}",
    params(("patientId" = String, Path, description = "User account or registered patient id")),
    responses(
        (status = 200, description = "Normalised patient with appointments and clinical records"),
        (status = 401, description = "Missing or invalid doctor token", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Error fetching patient details", body = ErrorRes)
    )
)]
/// Patient details for the doctor dashboard.
pub async fn doctor_patient_details(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ResolvedPatient>, ApiError> {
    patient_details(&state, "Doctor patient details", &patient_id).await
}

#[utoipa::path(
    get,
    path = "/api/admin/patient-details/{patientId}",
    params(("patientId" = String, Path, description = "User account or registered patient id")),
    responses(
        (status = 200, description = "Normalised patient with appointments and clinical records"),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Error fetching patient details", body = ErrorRes)
    )
)]
/// Patient details for the admin panel. Same result as the doctor route.
pub async fn admin_patient_details(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ResolvedPatient>, ApiError> {
    patient_details(&state, "Admin patient details", &patient_id).await
}

#[utoipa::path(
    get,
    path = "/api/admin/patients",
    responses(
        (status = 200, description = "All patients from both stores", body = PatientsRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<PatientsRes>, ApiError> {
    let patients = load_patients(state.store(), Utc::now().date_naive())
        .await
        .map_err(|e| ApiError::from_store("List patients", e, "Error fetching patients"))?;
    Ok(Json(PatientsRes {
        success: true,
        patients,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/search-patients",
    request_body = SearchPatientsReq,
    responses(
        (status = 200, description = "Matching patients; empty for a blank term", body = PatientsRes),
        (status = 400, description = "Malformed request body", body = ErrorRes),
        (status = 415, description = "Body is not JSON", body = ErrorRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn search_patients(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SearchPatientsReq>,
) -> Result<Json<PatientsRes>, ApiError> {
    let patients = find_patients(state.store(), &req.term, Utc::now().date_naive())
        .await
        .map_err(|e| ApiError::from_store("Search patients", e, "Error searching patients"))?;
    Ok(Json(PatientsRes {
        success: true,
        patients,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/clinical-records/{patientId}",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Clinical records, newest first", body = ClinicalRecordsRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 404, description = "Invalid patient id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn clinical_records(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ClinicalRecordsRes>, ApiError> {
    let clinical_records = state
        .resolver
        .clinical_records(&patient_id)
        .await
        .map_err(|e| {
            ApiError::from_resolve("Clinical records", e, "Error fetching clinical records")
        })?;
    Ok(Json(ClinicalRecordsRes {
        success: true,
        clinical_records,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Counts and latest appointments", body = DashboardRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardRes>, ApiError> {
    let dash_data = load_dashboard(state.store())
        .await
        .map_err(|e| ApiError::from_store("Dashboard", e, "Error fetching dashboard"))?;
    Ok(Json(DashboardRes {
        success: true,
        dash_data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/all-doctors",
    responses(
        (status = 200, description = "Every doctor, unfiltered", body = AllDoctorsRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn all_doctors(State(state): State<AppState>) -> Result<Json<AllDoctorsRes>, ApiError> {
    let doctors = state
        .store()
        .list_doctors()
        .await
        .map_err(|e| ApiError::from_store("All doctors", e, "Error fetching doctors"))?;
    Ok(Json(AllDoctorsRes {
        success: true,
        doctors,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/appointments",
    responses(
        (status = 200, description = "Every appointment, newest first, doctors expanded", body = AppointmentsRes),
        (status = 401, description = "Missing or invalid admin token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
pub async fn appointments(
    State(state): State<AppState>,
) -> Result<Json<AppointmentsRes>, ApiError> {
    let appointments = list_appointments(state.store())
        .await
        .map_err(|e| ApiError::from_store("Appointments", e, "Error fetching appointments"))?;
    Ok(Json(AppointmentsRes {
        success: true,
        appointments,
    }))
}
