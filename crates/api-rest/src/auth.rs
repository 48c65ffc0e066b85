//! Token checks for the admin and doctor route groups.
//!
//! A request authenticates with `Authorization: Bearer <token>` or with the
//! legacy per-role header (`atoken` for admins, `dtoken` for doctors).

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

pub const ADMIN_TOKEN_HEADER: &str = "atoken";
pub const DOCTOR_TOKEN_HEADER: &str = "dtoken";

/// Configured tokens for both roles.
#[derive(Clone, Debug)]
pub struct ApiTokens {
    pub admin: String,
    pub doctor: String,
}

fn presented_token<'a>(headers: &'a HeaderMap, legacy_header: &str) -> Option<&'a str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    bearer.or_else(|| {
        headers
            .get(legacy_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    })
}

fn check(headers: &HeaderMap, legacy_header: &str, expected: &str) -> Result<(), ApiError> {
    match presented_token(headers, legacy_header) {
        Some(token) if token == expected => Ok(()),
        Some(_) => {
            tracing::warn!("rejected request with invalid {} credentials", legacy_header);
            Err(ApiError::Unauthorized)
        }
        None => Err(ApiError::Unauthorized),
    }
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check(req.headers(), ADMIN_TOKEN_HEADER, &state.tokens.admin)?;
    Ok(next.run(req).await)
}

pub async fn require_doctor(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check(req.headers(), DOCTOR_TOKEN_HEADER, &state.tokens.doctor)?;
    Ok(next.run(req).await)
}
