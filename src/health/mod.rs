//! Backend health subsystem.
//!
//! # Data Flow
//! ```text
//! shell start
//!     → probe.rs (GET <api.base_url><api.health_path>, bounded by api.timeout_ms)
//!     → state.rs (Healthy / Degraded / Unreachable)
//!     → logged, recorded, exposed by the shell
//! ```
//!
//! # Design Decisions
//! - Checked once at start-up, no polling
//! - Never fatal: the root view mounts whatever the outcome

pub mod probe;
pub mod state;

pub use probe::{HealthError, HealthProbe, HealthReport};
pub use state::ApiHealth;
