//! # API REST
//!
//! REST API for the clinic records system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Admin and doctor token checks
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Patient lookups go through [`clinic_core::PatientResolver`]; both detail
//! routes return exactly what it produces.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use auth::{require_admin, require_doctor, ApiTokens};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use clinic_core::{CoreConfig, JsonFileStore, PatientResolver};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ApiConfig;

/// Application state for the REST API server
///
/// Shared by all request handlers. Cloning is cheap: the store and tokens sit
/// behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub(crate) resolver: PatientResolver<JsonFileStore>,
    pub(crate) tokens: Arc<ApiTokens>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, api: &ApiConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(cfg));
        Self {
            resolver: PatientResolver::new(store),
            tokens: Arc::new(ApiTokens {
                admin: api.admin_token.clone(),
                doctor: api.doctor_token.clone(),
            }),
        }
    }

    pub(crate) fn store(&self) -> &JsonFileStore {
        self.resolver.store()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::doctor_list,
        handlers::doctor_patient_details,
        handlers::admin_patient_details,
        handlers::list_patients,
        handlers::search_patients,
        handlers::clinical_records,
        handlers::dashboard,
        handlers::all_doctors,
        handlers::appointments,
    ),
    components(schemas(
        handlers::HealthRes,
        handlers::DoctorListRes,
        handlers::PatientsRes,
        handlers::SearchPatientsReq,
        handlers::ClinicalRecordsRes,
        handlers::DashboardRes,
        handlers::AllDoctorsRes,
        handlers::AppointmentsRes,
        error::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router: public, doctor and admin routes plus Swagger UI.
pub fn app(state: AppState) -> Router {
    let doctor_routes = Router::new()
        .route("/list", get(handlers::doctor_list))
        .route(
            "/patient-details/:patientId",
            get(handlers::doctor_patient_details)
                .route_layer(from_fn_with_state(state.clone(), require_doctor)),
        );

    let admin_routes = Router::new()
        .route(
            "/patient-details/:patientId",
            get(handlers::admin_patient_details),
        )
        .route("/patients", get(handlers::list_patients))
        .route("/search-patients", post(handlers::search_patients))
        .route(
            "/clinical-records/:patientId",
            get(handlers::clinical_records),
        )
        .route("/dashboard", get(handlers::dashboard))
        .route("/all-doctors", get(handlers::all_doctors))
        .route("/appointments", get(handlers::appointments))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/doctor", doctor_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `api.addr` and serves [`app`] until the server stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(cfg: Arc<CoreConfig>, api: ApiConfig) -> anyhow::Result<()> {
    tracing::info!("-- Starting clinic REST API on {}", api.addr);
    tracing::info!("-- Serving documents from {}", cfg.data_dir().display());

    let router = app(AppState::new(cfg, &api));
    let listener = tokio::net::TcpListener::bind(&api.addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
