//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks values that parse
//! but cannot work (unparseable API URL, zero redirect hops, unknown log level).
//! Every failing rule is reported, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::ShellConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("app.mount_selector must not be empty")]
    EmptyMountSelector,

    #[error("api.base_url {url:?} is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("api.health_path {0:?} must start with '/'")]
    RelativeHealthPath(String),

    #[error("navigation.redirect_hop_limit must be at least 1")]
    ZeroRedirectHops,

    #[error("navigation.transition_class must not be empty")]
    EmptyTransitionClass,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.app.mount_selector.trim().is_empty() {
        errors.push(ValidationError::EmptyMountSelector);
    }

    if let Err(e) = Url::parse(&config.api.base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
            reason: e.to_string(),
        });
    }

    if !config.api.health_path.starts_with('/') {
        errors.push(ValidationError::RelativeHealthPath(config.api.health_path.clone()));
    }

    if config.navigation.redirect_hop_limit == 0 {
        errors.push(ValidationError::ZeroRedirectHops);
    }

    if config.navigation.transition_class.trim().is_empty() {
        errors.push(ValidationError::EmptyTransitionClass);
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
