//! Committed navigation state.

use std::sync::Arc;

use crate::routing::matcher::RouteParams;
use crate::routing::table::{Resolution, RouteEntry};

/// How a navigation was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// First navigation, from the location the page was loaded at.
    Initial,
    /// Programmatic `navigate`.
    Push,
    /// Back/forward through the history.
    Pop { delta: isize },
}

/// Snapshot of where the application is.
///
/// Published whole by the router; observers never see a half-built value.
#[derive(Debug, Clone)]
pub struct NavigationState {
    pub path: String,
    pub full_path: String,
    pub route: Arc<RouteEntry>,
    pub params: RouteParams,
    pub redirected_from: Option<String>,
    pub kind: NavigationKind,
}

impl NavigationState {
    pub fn from_resolution(resolution: Resolution, kind: NavigationKind) -> Self {
        Self {
            path: resolution.path,
            full_path: resolution.full_path,
            route: resolution.route,
            params: resolution.params,
            redirected_from: resolution.redirected_from,
            kind,
        }
    }

    pub fn route_name(&self) -> &str {
        &self.route.name
    }

    pub fn is_not_found(&self) -> bool {
        self.route.is_catch_all()
    }

    pub fn title(&self) -> &str {
        &self.route.meta.title
    }
}

/// Equal when they point at the same place; `kind` is ignored.
impl PartialEq for NavigationState {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.full_path == other.full_path
            && self.route.name == other.route.name
            && self.params == other.params
            && self.redirected_from == other.redirected_from
    }
}
