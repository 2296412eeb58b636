//! Navigation lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Pre-navigation (before commit):
//!     guards.rs → each guard in order, may suspend, may veto
//!     transition.rs → mark `page-transitioning`
//!
//! Post-navigation (after commit):
//!     transition.rs → clear the mark after a delay
//!     hooks.rs → title/meta, scroll, icons, analytics
//! ```
//!
//! # Design Decisions
//! - A veto is not an error; the caller sees `Cancelled`
//! - Post hooks never gate correctness; each runs in its own failure boundary
//! - Delayed effects are spawned tasks, never awaited by `navigate`

pub mod controller;
pub mod guards;
pub mod hooks;
pub mod transition;

pub use controller::{LifecycleController, Veto};
pub use guards::{AuthGuard, GuardDecision, NavigationGuard, SessionFlag, SessionProbe};
pub use hooks::{AfterHook, AnalyticsHook, DocumentMetaHook, HookError, IconRefreshHook, ScrollHook};
pub use transition::{TransitionIndicator, TransitionTicket};
