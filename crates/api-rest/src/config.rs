//! REST server configuration.

use clinic_core::{ConfigError, ConfigResult};

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Server settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub addr: String,
    pub admin_token: String,
    pub doctor_token: String,
}

fn required(name: &str, value: Option<String>) -> ConfigResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::InvalidInput(format!("{name} must be set")))
}

impl ApiConfig {
    /// Build from raw environment values (`CLINIC_REST_ADDR`,
    /// `CLINIC_ADMIN_TOKEN`, `CLINIC_DOCTOR_TOKEN`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if either token is missing or blank.
    pub fn from_env_values(
        addr: Option<String>,
        admin_token: Option<String>,
        doctor_token: Option<String>,
    ) -> ConfigResult<Self> {
        let addr = addr
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());

        Ok(Self {
            addr,
            admin_token: required("CLINIC_ADMIN_TOKEN", admin_token)?,
            doctor_token: required("CLINIC_DOCTOR_TOKEN", doctor_token)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_defaults_and_tokens_are_trimmed() {
        let cfg =
            ApiConfig::from_env_values(None, Some(" admin ".into()), Some("doc".into())).unwrap();
        assert_eq!(cfg.addr, DEFAULT_REST_ADDR);
        assert_eq!(cfg.admin_token, "admin");
        assert_eq!(cfg.doctor_token, "doc");
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let err = ApiConfig::from_env_values(
            Some("127.0.0.1:8080".into()),
            Some("admin".into()),
            Some("  ".into()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CLINIC_DOCTOR_TOKEN"));
    }
}
