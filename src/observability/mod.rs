//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, one span per navigation)
//!     → metrics.rs (navigation and health counters)
//!     → analytics.rs (page views and exceptions, when a sink is present)
//! ```
//!
//! # Design Decisions
//! - Every navigation attempt carries a navigation id in its span
//! - Analytics is a collaborator, never required

pub mod analytics;
pub mod logging;
pub mod metrics;

pub use analytics::{Analytics, AnalyticsError, MemoryAnalytics, TracingAnalytics};
