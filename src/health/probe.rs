//! Start-up health probe.
//!
//! One GET against the backend's health endpoint. The shell logs the result
//! and carries on either way.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::ApiConfig;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("invalid health check URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("health check timed out after {0} ms")]
    Timeout(u64),

    #[error("health check request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("health check returned status {0}")]
    Status(u16),

    #[error("health check body is not valid JSON: {0}")]
    Body(#[source] reqwest::Error),
}

/// Body of the health endpoint. Only `status` is required.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: reqwest::Client,
    url: Url,
    timeout_ms: u64,
}

impl HealthProbe {
    pub fn new(config: &ApiConfig) -> Result<Self, HealthError> {
        let url = Url::parse(&config.base_url)?.join(&config.health_path)?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn check(&self) -> Result<HealthReport, HealthError> {
        let response = self
            .client
            .get(self.url.clone())
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HealthError::Status(status.as_u16()));
        }

        response.json::<HealthReport>().await.map_err(HealthError::Body)
    }

    fn classify(&self, error: reqwest::Error) -> HealthError {
        if error.is_timeout() {
            HealthError::Timeout(self.timeout_ms)
        } else {
            HealthError::Request(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = ApiConfig {
            base_url: "http://localhost:5001".into(),
            ..Default::default()
        };
        let probe = HealthProbe::new(&config).unwrap();
        assert_eq!(probe.url().as_str(), "http://localhost:5001/api/health");
    }

    #[test]
    fn test_invalid_url() {
        let config = ApiConfig {
            base_url: "::nope".into(),
            ..Default::default()
        };
        assert!(matches!(HealthProbe::new(&config), Err(HealthError::InvalidUrl(_))));
    }

    #[test]
    fn test_report_fields_are_optional() {
        let report: HealthReport = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.version, None);

        let report: HealthReport = serde_json::from_str(
            r#"{"status":"degraded","success":false,"message":"db slow","version":"1.0.0"}"#,
        )
        .unwrap();
        assert!(!report.is_healthy());
        assert_eq!(report.message.as_deref(), Some("db slow"));
    }
}
