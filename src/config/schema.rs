//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the application shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    /// Application identity and mount point.
    pub app: AppConfig,

    /// Backend API used by the shell (health check).
    pub api: ApiConfig,

    /// Router and lifecycle tuning.
    pub navigation: NavigationConfig,

    /// Page-view analytics.
    pub analytics: AnalyticsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Application identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Display name, exposed as an app-wide global.
    pub name: String,

    /// Front-end version string.
    pub version: String,

    /// Selector of the container the root view is mounted into.
    pub mount_selector: String,

    /// Development mode: start-up banner and verbose lifecycle logs.
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "智护童行".to_string(),
            version: "2.0.0".to_string(),
            mount_selector: "#app".to_string(),
            dev_mode: false,
        }
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "http://localhost:5001").
    pub base_url: String,

    /// Path probed at start-up.
    pub health_path: String,

    /// Health check timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            health_path: "/api/health".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Router and navigation lifecycle settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum redirect hops followed for one navigation.
    pub redirect_hop_limit: usize,

    /// Delay before the transition class is removed, in milliseconds.
    pub transition_clear_ms: u64,

    /// Delay before icons are re-materialized, in milliseconds.
    pub icon_refresh_ms: u64,

    /// Body class present while a page transition plays.
    pub transition_class: String,

    /// Match paths case-sensitively.
    pub case_sensitive: bool,

    /// Treat "/a" and "/a/" as different paths.
    pub strict_trailing_slash: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            redirect_hop_limit: 5,
            transition_clear_ms: 300,
            icon_refresh_ms: 100,
            transition_class: "page-transitioning".to_string(),
            case_sensitive: false,
            strict_trailing_slash: false,
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Attach the default analytics sink.
    pub enabled: bool,

    /// Measurement id attached to every event.
    pub measurement_id: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            measurement_id: "GA_MEASUREMENT_ID".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record navigation counters through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
