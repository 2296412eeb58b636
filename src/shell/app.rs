//! Application composition root.
//!
//! # Responsibilities
//! - Verify the mount point and show the loading placeholder
//! - Build the route table, lifecycle, and router from configuration
//! - Bind the root view to the committed navigation state
//! - Probe backend health, then run the initial navigation
//!
//! # Design Decisions
//! - Fail fast on a missing mount point; everything else is best-effort
//! - `mount` and `start` are split so the loading state is observable

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;

use crate::config::ShellConfig;
use crate::health::{ApiHealth, HealthProbe};
use crate::host::{CountingIcons, Document, HeadlessDocument, History, IconRenderer, MemoryHistory};
use crate::lifecycle::{
    AnalyticsHook, AuthGuard, DocumentMetaHook, IconRefreshHook, LifecycleController,
    NavigationGuard, ScrollHook, SessionProbe, TransitionIndicator,
};
use crate::observability::{metrics, Analytics, TracingAnalytics};
use crate::routing::catalog::platform_table;
use crate::routing::{
    MatchOptions, NavigationOutcome, NavigationState, ObserverError, RouteError, Router,
};
use crate::shell::error_handler::ErrorHandler;
use crate::views::pages::loading_placeholder;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("mount point {selector:?} not found")]
    MountFailure { selector: String },

    #[error("route table rejected: {0}")]
    Routes(#[from] RouteError),

    #[error("application shell already initialized")]
    AlreadyInitialized,
}

/// Host services handed to the shell.
pub struct Collaborators {
    pub document: Arc<dyn Document>,
    pub history: Arc<dyn History>,
    pub icons: Option<Arc<dyn IconRenderer>>,
    pub analytics: Option<Arc<dyn Analytics>>,
    pub session: Option<Arc<dyn SessionProbe>>,
    pub guards: Vec<Arc<dyn NavigationGuard>>,
}

impl Collaborators {
    /// In-memory host: a page with the configured container, history at
    /// `/`, a counting icon pass, and the tracing analytics sink when
    /// analytics is enabled.
    pub fn headless(config: &ShellConfig) -> Self {
        let analytics: Option<Arc<dyn Analytics>> = config
            .analytics
            .enabled
            .then(|| {
                Arc::new(TracingAnalytics::new(&config.analytics.measurement_id)) as Arc<dyn Analytics>
            });

        Self {
            document: Arc::new(HeadlessDocument::with_container(&config.app.mount_selector)),
            history: Arc::new(MemoryHistory::new("/")),
            icons: Some(Arc::new(CountingIcons::new())),
            analytics,
            session: None,
            guards: Vec::new(),
        }
    }

    pub fn with_document(mut self, document: Arc<dyn Document>) -> Self {
        self.document = document;
        self
    }

    pub fn with_history(mut self, history: Arc<dyn History>) -> Self {
        self.history = history;
        self
    }

    pub fn with_icons(mut self, icons: Option<Arc<dyn IconRenderer>>) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_analytics(mut self, analytics: Option<Arc<dyn Analytics>>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_session(mut self, session: Arc<dyn SessionProbe>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_guard(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
        self.guards.push(guard);
        self
    }
}

pub struct Application {
    config: ShellConfig,
    router: Arc<Router>,
    document: Arc<dyn Document>,
    errors: Arc<ErrorHandler>,
    health: Option<HealthProbe>,
    api_health: ArcSwap<ApiHealth>,
}

impl Application {
    /// Mount the shell: check the container, show the loading state, build
    /// the router and bind the root view. No navigation runs yet.
    pub async fn mount(config: ShellConfig, host: Collaborators) -> Result<Self, ShellError> {
        if config.app.dev_mode {
            tracing::info!(app = %config.app.name, version = %config.app.version, "Front end starting (development mode)");
            tracing::info!("Router integrated");
            tracing::info!("Page transitions enabled");
        }

        let selector = config.app.mount_selector.clone();
        if !host.document.has_element(&selector) {
            return Err(ShellError::MountFailure { selector });
        }
        if let Err(e) = host.document.set_inner_html(&selector, &loading_placeholder()) {
            tracing::warn!(error = %e, "Could not show loading state");
        }

        let nav = &config.navigation;
        let table = Arc::new(platform_table(MatchOptions::from(nav))?);
        let lifecycle = build_lifecycle(&config, &host);
        let router = Arc::new(Router::new(
            table,
            Arc::clone(&host.history),
            lifecycle,
            nav.redirect_hop_limit,
        ));

        let errors = Arc::new(ErrorHandler::new(host.analytics.clone()));
        spawn_fault_forwarder(&router, Arc::clone(&errors));
        bind_root_view(&router, Arc::clone(&host.document), selector);

        let health = match HealthProbe::new(&config.api) {
            Ok(probe) => Some(probe),
            Err(e) => {
                tracing::warn!(error = %e, "Health check disabled");
                None
            }
        };

        tracing::info!(routes = router.table().len(), "Shell mounted");

        Ok(Self {
            config,
            router,
            document: host.document,
            errors,
            health,
            api_health: ArcSwap::from_pointee(ApiHealth::Unknown),
        })
    }

    /// Probe backend health, then run the initial navigation, which renders
    /// the root view. Health failures are logged only.
    pub async fn start(&self) -> NavigationOutcome {
        let health = self.check_health().await;
        tracing::info!(api = health.label(), "Backend health checked");

        let outcome = self.router.start().await;
        if !outcome.is_committed() {
            tracing::warn!(?outcome, "Initial navigation did not commit");
        }
        outcome
    }

    /// `mount` followed by `start`.
    pub async fn bootstrap(config: ShellConfig, host: Collaborators) -> Result<Self, ShellError> {
        let app = Self::mount(config, host).await?;
        app.start().await;
        Ok(app)
    }

    async fn check_health(&self) -> ApiHealth {
        let Some(probe) = &self.health else {
            return ApiHealth::Unknown;
        };

        let result = probe.check().await;
        if let Err(e) = &result {
            tracing::warn!(url = %probe.url(), error = %e, "Backend health check failed");
        }
        let health = ApiHealth::from(result);
        metrics::record_health_check(health.label());
        self.api_health.store(Arc::new(health.clone()));
        health
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn current_state(&self) -> Arc<NavigationState> {
        self.router.current_state()
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn errors(&self) -> &Arc<ErrorHandler> {
        &self.errors
    }

    pub fn api_health(&self) -> ApiHealth {
        ApiHealth::clone(&self.api_health.load())
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.app.name
    }

    pub fn version(&self) -> &str {
        &self.config.app.version
    }
}

fn build_lifecycle(config: &ShellConfig, host: &Collaborators) -> LifecycleController {
    let nav = &config.navigation;
    let mut lifecycle = LifecycleController::new();

    if let Some(session) = &host.session {
        lifecycle = lifecycle.with_guard(Arc::new(AuthGuard::new(Arc::clone(session))));
    }
    for guard in &host.guards {
        lifecycle = lifecycle.with_guard(Arc::clone(guard));
    }

    lifecycle = lifecycle
        .with_transition(Arc::new(TransitionIndicator::new(
            Arc::clone(&host.document),
            nav.transition_class.clone(),
            Duration::from_millis(nav.transition_clear_ms),
        )))
        .with_hook(Arc::new(DocumentMetaHook::new(Arc::clone(&host.document))))
        .with_hook(Arc::new(ScrollHook::new(Arc::clone(&host.document))));

    if let Some(icons) = &host.icons {
        lifecycle = lifecycle.with_hook(Arc::new(IconRefreshHook::new(
            Arc::clone(icons),
            Duration::from_millis(nav.icon_refresh_ms),
        )));
    }
    if let Some(analytics) = &host.analytics {
        lifecycle = lifecycle.with_hook(Arc::new(AnalyticsHook::new(Arc::clone(analytics))));
    }
    lifecycle
}

fn spawn_fault_forwarder(router: &Router, errors: Arc<ErrorHandler>) {
    let mut faults = router.subscribe_faults();
    tokio::spawn(async move {
        loop {
            match faults.recv().await {
                Ok(fault) => errors.report_fault(&fault),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Fault channel lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn bind_root_view(router: &Router, document: Arc<dyn Document>, selector: String) {
    router.on_change(move |to, _from| {
        let view = to.route.view().ok_or_else(|| {
            ObserverError::new(format!("route {} has no view to render", to.route.name))
        })?;
        let html = view.resolve().render(to);
        document
            .set_inner_html(&selector, &html)
            .map_err(|e| ObserverError::new(e.to_string()))
    });
}
