//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → table.rs (lookup in declaration order, follow redirects)
//!     → matcher.rs (exact or catch-all, normalized path)
//!     → lifecycle guards (may veto)
//!     → router.rs commit (atomic swap of NavigationState)
//!     → observers, then lifecycle post hooks
//!
//! Route compilation (at startup):
//!     catalog.rs RouteEntry[]
//!     → compile matchers, check invariants
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always resolves to the same entry
//! - Unmatched paths are not errors: they commit the NotFound entry

pub mod catalog;
pub mod matcher;
pub mod router;
pub mod state;
pub mod table;

use thiserror::Error;

pub use matcher::{MatchOptions, RouteParams};
pub use router::{ListenerId, NavigationFault, NavigationOutcome, ObserverError, Router};
pub use state::{NavigationKind, NavigationState};
pub use table::{Resolution, RouteEntry, RouteMatch, RouteMeta, RouteTable};

/// Errors raised while building or resolving routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("redirect limit exceeded resolving {path:?} after {hops} hops")]
    RedirectLoop { path: String, hops: usize },

    #[error("invalid route pattern {0:?}")]
    InvalidPattern(String),

    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    #[error("route {0:?} has neither a view nor a redirect")]
    MissingView(String),

    #[error("catch-all route {0:?} must be declared last")]
    CatchAllNotLast(String),

    #[error("route table has no catch-all route")]
    MissingCatchAll,
}
