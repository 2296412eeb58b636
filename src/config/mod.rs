//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShellConfig (validated, immutable)
//!     → handed to the shell, which splits it per subsystem
//! ```
//!
//! # Design Decisions
//! - All fields have defaults, an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks
//! - No hot reload: the shell lives as long as the page

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, load_config, parse_config, ConfigError, ConfigOverrides};
pub use schema::{
    AnalyticsConfig, ApiConfig, AppConfig, NavigationConfig, ObservabilityConfig, ShellConfig,
};
