//! Router engine.
//!
//! # Responsibilities
//! - Resolve navigation requests against the route table
//! - Run the lifecycle around the commit
//! - Publish the committed state and notify observers
//!
//! # Design Decisions
//! - Single writer: only the commit step stores into the state slot
//! - Readers get immutable `Arc` snapshots (`arc-swap`), never blocking
//! - Last request wins: a navigation that started later supersedes any
//!   earlier one still in its guards; the earlier one never commits
//! - Commits are serialized by an async mutex held through observer
//!   notification and post hooks, so effects apply in commit order

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::Instrument;
use uuid::Uuid;

use crate::host::History;
use crate::lifecycle::LifecycleController;
use crate::observability::metrics;
use crate::routing::state::{NavigationKind, NavigationState};
use crate::routing::table::RouteTable;
use crate::routing::RouteError;

/// Error returned by a change observer.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Problems isolated by the router and reported on the fault channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationFault {
    /// An observer returned an error or panicked.
    Observer {
        listener: ListenerId,
        path: String,
        message: String,
    },
    /// Redirects exceeded the hop limit; NotFound was committed instead.
    RedirectLoop { path: String, hops: usize },
}

/// How a `navigate` call ended.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    Committed(Arc<NavigationState>),
    /// A guard vetoed. The published state is unchanged.
    Cancelled { path: String, guard: String, reason: String },
    /// A later navigation started before this one could commit.
    Superseded { path: String },
}

impl NavigationOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn state(&self) -> Option<&Arc<NavigationState>> {
        match self {
            Self::Committed(state) => Some(state),
            _ => None,
        }
    }
}

/// Handle returned by [`Router::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type ChangeFn = dyn Fn(&NavigationState, &NavigationState) -> Result<(), ObserverError> + Send + Sync;

#[derive(Clone)]
struct Listener {
    id: ListenerId,
    callback: Arc<ChangeFn>,
}

const FAULT_CHANNEL_CAPACITY: usize = 64;

pub struct Router {
    table: Arc<RouteTable>,
    history: Arc<dyn History>,
    lifecycle: LifecycleController,
    hop_limit: usize,
    current: ArcSwap<NavigationState>,
    listeners: ArcSwap<Vec<Listener>>,
    next_listener: AtomicUsize,
    latest: AtomicU64,
    commit: Mutex<()>,
    faults: broadcast::Sender<NavigationFault>,
}

impl Router {
    /// Create a router whose state is the history's current location.
    ///
    /// No lifecycle runs here; call [`Router::start`] to run it for the
    /// initial location.
    pub fn new(
        table: Arc<RouteTable>,
        history: Arc<dyn History>,
        lifecycle: LifecycleController,
        hop_limit: usize,
    ) -> Self {
        let location = history.current_path();
        let resolution = table
            .resolve(&location, hop_limit)
            .unwrap_or_else(|_| table.not_found_for(&location));
        let initial = NavigationState::from_resolution(resolution, NavigationKind::Initial);
        let (faults, _) = broadcast::channel(FAULT_CHANNEL_CAPACITY);

        Self {
            table,
            history,
            lifecycle,
            hop_limit,
            current: ArcSwap::from_pointee(initial),
            listeners: ArcSwap::from_pointee(Vec::new()),
            next_listener: AtomicUsize::new(0),
            latest: AtomicU64::new(0),
            commit: Mutex::new(()),
            faults,
        }
    }

    /// Last committed state.
    pub fn current_state(&self) -> Arc<NavigationState> {
        self.current.load_full()
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    /// Register an observer called once per commit with `(to, from)`.
    pub fn on_change<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&NavigationState, &NavigationState) -> Result<(), ObserverError>
            + Send
            + Sync
            + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        let listener = Listener {
            id,
            callback: Arc::new(callback),
        };
        self.listeners.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(listener.clone());
            next
        });
        id
    }

    /// Unregister an observer. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let previous = self.listeners.rcu(|current| {
            current
                .iter()
                .filter(|l| l.id != id)
                .cloned()
                .collect::<Vec<_>>()
        });
        previous.iter().any(|l| l.id == id)
    }

    /// Receive isolated failures (observer errors, redirect loops).
    pub fn subscribe_faults(&self) -> broadcast::Receiver<NavigationFault> {
        self.faults.subscribe()
    }

    /// Run the lifecycle for the location the page was loaded at.
    pub async fn start(&self) -> NavigationOutcome {
        let location = self.history.current_path();
        self.run(location, NavigationKind::Initial).await
    }

    /// Navigate to `path`.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        self.run(path.to_string(), NavigationKind::Push).await
    }

    /// Go back one history entry. `None` when there is nothing to go back to.
    pub async fn back(&self) -> Option<NavigationOutcome> {
        self.traverse(-1).await
    }

    /// Go forward one history entry. `None` at the newest entry.
    pub async fn forward(&self) -> Option<NavigationOutcome> {
        self.traverse(1).await
    }

    async fn traverse(&self, delta: isize) -> Option<NavigationOutcome> {
        let target = self.history.peek(delta)?;
        Some(self.run(target, NavigationKind::Pop { delta }).await)
    }

    async fn run(&self, requested: String, kind: NavigationKind) -> NavigationOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let navigation_id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", %navigation_id, path = %requested);

        async move {
            let to = Arc::new(self.prepare(&requested, kind));
            let from = self.current.load_full();

            tracing::debug!(route = %to.route.name, resolved = %to.path, "Route resolved");

            if let Err(veto) = self.lifecycle.before(&to, &from).await {
                metrics::record_cancelled("veto");
                return NavigationOutcome::Cancelled {
                    path: to.path.clone(),
                    guard: veto.guard,
                    reason: veto.reason,
                };
            }

            let _commit = self.commit.lock().await;
            if self.latest.load(Ordering::SeqCst) != ticket {
                tracing::debug!("Navigation superseded before commit");
                metrics::record_cancelled("superseded");
                return NavigationOutcome::Superseded {
                    path: to.path.clone(),
                };
            }

            let transition = self.lifecycle.begin_transition();
            let previous = self.current.swap(Arc::clone(&to));
            self.sync_history(&to, kind);

            tracing::info!(route = %to.route.name, from = %previous.path, "Navigation committed");
            metrics::record_commit(&to.route.name);

            self.notify(&to, &previous);
            self.lifecycle.after(&to, &previous, transition);

            NavigationOutcome::Committed(to)
        }
        .instrument(span)
        .await
    }

    fn prepare(&self, requested: &str, kind: NavigationKind) -> NavigationState {
        let resolution = match self.table.resolve(requested, self.hop_limit) {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::warn!(error = %e, "Route resolution failed, falling back to NotFound");
                if let RouteError::RedirectLoop { path, hops } = e {
                    metrics::record_redirect_loop();
                    let _ = self.faults.send(NavigationFault::RedirectLoop { path, hops });
                }
                self.table.not_found_for(requested)
            }
        };
        NavigationState::from_resolution(resolution, kind)
    }

    fn sync_history(&self, to: &NavigationState, kind: NavigationKind) {
        match kind {
            NavigationKind::Initial => self.history.replace(&to.full_path),
            NavigationKind::Push => {
                if self.history.current_path() == to.full_path {
                    self.history.replace(&to.full_path);
                } else {
                    self.history.push(&to.full_path);
                }
            }
            NavigationKind::Pop { delta } => {
                if self.history.go(delta) {
                    self.history.replace(&to.full_path);
                } else {
                    self.history.push(&to.full_path);
                }
            }
        }
    }

    fn notify(&self, to: &NavigationState, from: &NavigationState) {
        let listeners = self.listeners.load();
        for listener in listeners.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| (listener.callback)(to, from)));
            let message = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };

            tracing::error!(listener = listener.id.0, error = %message, "Navigation observer failed");
            metrics::record_observer_failure();
            let _ = self.faults.send(NavigationFault::Observer {
                listener: listener.id,
                path: to.path.clone(),
                message,
            });
        }
    }
}

/// Text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}
