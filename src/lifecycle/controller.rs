//! Navigation lifecycle controller.
//!
//! # Responsibilities
//! - Run guards, in order, before a commit
//! - Mark the transition indicator right before a commit
//! - Run post hooks after a commit, each in its own failure boundary

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::lifecycle::guards::{GuardDecision, NavigationGuard};
use crate::lifecycle::hooks::AfterHook;
use crate::lifecycle::transition::{TransitionIndicator, TransitionTicket};
use crate::routing::state::NavigationState;

/// A veto, with the guard that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Veto {
    pub guard: String,
    pub reason: String,
}

#[derive(Default)]
pub struct LifecycleController {
    guards: Vec<Arc<dyn NavigationGuard>>,
    hooks: Vec<Arc<dyn AfterHook>>,
    transition: Option<Arc<TransitionIndicator>>,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guard(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn AfterHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn with_transition(mut self, indicator: Arc<TransitionIndicator>) -> Self {
        self.transition = Some(indicator);
        self
    }

    pub fn transition(&self) -> Option<&Arc<TransitionIndicator>> {
        self.transition.as_ref()
    }

    /// Pre-navigation phase. Stops at the first veto.
    pub async fn before(&self, to: &NavigationState, from: &NavigationState) -> Result<(), Veto> {
        for guard in &self.guards {
            match guard.check(to, from).await {
                GuardDecision::Continue => {}
                GuardDecision::Cancel { reason } => {
                    tracing::debug!(guard = guard.name(), %reason, "Navigation vetoed");
                    return Err(Veto {
                        guard: guard.name().to_string(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    /// Mark the transition as in progress. Called right before the commit.
    pub fn begin_transition(&self) -> Option<TransitionTicket> {
        self.transition.as_ref().map(|t| t.begin())
    }

    /// Post-navigation phase.
    pub fn after(
        &self,
        to: &NavigationState,
        from: &NavigationState,
        ticket: Option<TransitionTicket>,
    ) {
        if let (Some(indicator), Some(ticket)) = (&self.transition, ticket) {
            indicator.schedule_clear(ticket);
        }

        for hook in &self.hooks {
            match catch_unwind(AssertUnwindSafe(|| hook.after(to, from))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(hook = hook.name(), error = %e, path = %to.path, "Post-navigation hook failed");
                }
                Err(_) => {
                    tracing::warn!(hook = hook.name(), path = %to.path, "Post-navigation hook panicked");
                }
            }
        }
    }
}
