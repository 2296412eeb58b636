//! Backend health as last observed by the shell.
//!
//! # States
//! - Unknown: no check has finished yet
//! - Healthy: the endpoint answered with `status: healthy`
//! - Degraded: the endpoint answered with any other status
//! - Unreachable: the request failed (network, timeout, HTTP error, bad body)

use crate::health::probe::{HealthError, HealthReport};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiHealth {
    #[default]
    Unknown,
    Healthy,
    Degraded(String),
    Unreachable(String),
}

impl ApiHealth {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded(_))
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Healthy => "healthy",
            Self::Degraded(_) => "degraded",
            Self::Unreachable(_) => "unreachable",
        }
    }
}

impl From<Result<HealthReport, HealthError>> for ApiHealth {
    fn from(result: Result<HealthReport, HealthError>) -> Self {
        match result {
            Ok(report) if report.is_healthy() => Self::Healthy,
            Ok(report) => Self::Degraded(report.status),
            Err(e) => Self::Unreachable(e.to_string()),
        }
    }
}
