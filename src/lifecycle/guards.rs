//! Pre-navigation guards.
//!
//! Guards run in registration order before a navigation commits. Each one
//! may suspend; the first `Cancel` stops the chain and drops the navigation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::routing::state::NavigationState;

/// Verdict of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    Cancel { reason: String },
}

impl GuardDecision {
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::Cancel {
            reason: reason.into(),
        }
    }
}

/// A pre-navigation hook that may veto.
pub trait NavigationGuard: Send + Sync {
    fn name(&self) -> &str;

    fn check<'a>(
        &'a self,
        to: &'a NavigationState,
        from: &'a NavigationState,
    ) -> BoxFuture<'a, GuardDecision>;
}

/// Answers "is somebody signed in?".
pub trait SessionProbe: Send + Sync {
    fn is_authenticated(&self) -> BoxFuture<'_, bool>;
}

/// Session state held in memory.
#[derive(Debug, Default)]
pub struct SessionFlag {
    signed_in: AtomicBool,
}

impl SessionFlag {
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in: AtomicBool::new(signed_in),
        }
    }

    pub fn set(&self, signed_in: bool) {
        self.signed_in.store(signed_in, Ordering::SeqCst);
    }
}

impl SessionProbe for SessionFlag {
    fn is_authenticated(&self) -> BoxFuture<'_, bool> {
        future::ready(self.signed_in.load(Ordering::SeqCst)).boxed()
    }
}

/// Vetoes routes whose metadata requires auth when no session exists.
pub struct AuthGuard {
    session: Arc<dyn SessionProbe>,
}

impl AuthGuard {
    pub fn new(session: Arc<dyn SessionProbe>) -> Self {
        Self { session }
    }
}

impl NavigationGuard for AuthGuard {
    fn name(&self) -> &str {
        "auth"
    }

    fn check<'a>(
        &'a self,
        to: &'a NavigationState,
        _from: &'a NavigationState,
    ) -> BoxFuture<'a, GuardDecision> {
        async move {
            if !to.route.meta.requires_auth || self.session.is_authenticated().await {
                GuardDecision::Continue
            } else {
                GuardDecision::cancel(format!("{} requires a signed-in session", to.path))
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::MatchOptions;
    use crate::routing::state::NavigationKind;
    use crate::routing::table::{RouteEntry, RouteMeta, RouteTable};
    use crate::views::pages::{AccountPage, NotFoundPage};
    use crate::views::LazyView;

    fn table() -> RouteTable {
        RouteTable::new(
            vec![
                RouteEntry::page(
                    "Account",
                    "/account",
                    LazyView::of::<AccountPage>(),
                    RouteMeta::titled("account").requires_auth(true),
                ),
                RouteEntry::page(
                    "NotFound",
                    "/:pathMatch(.*)*",
                    LazyView::of::<NotFoundPage>(),
                    RouteMeta::titled("missing"),
                ),
            ],
            MatchOptions::default(),
        )
        .unwrap()
    }

    fn state(table: &RouteTable, path: &str) -> NavigationState {
        NavigationState::from_resolution(table.resolve(path, 5).unwrap(), NavigationKind::Push)
    }

    #[tokio::test]
    async fn test_auth_guard() {
        let table = table();
        let session = Arc::new(SessionFlag::new(false));
        let guard = AuthGuard::new(session.clone());
        let from = state(&table, "/elsewhere");
        let to = state(&table, "/account");

        assert!(matches!(guard.check(&to, &from).await, GuardDecision::Cancel { .. }));
        assert_eq!(guard.check(&from, &to).await, GuardDecision::Continue);

        session.set(true);
        assert_eq!(guard.check(&to, &from).await, GuardDecision::Continue);
    }
}
