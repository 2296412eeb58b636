//! Shared utilities for the integration suites.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use care_journey::config::ShellConfig;
use care_journey::host::{CountingIcons, HeadlessDocument, MemoryHistory};
use care_journey::lifecycle::{GuardDecision, NavigationGuard};
use care_journey::observability::MemoryAnalytics;
use care_journey::routing::NavigationState;
use care_journey::shell::Collaborators;

/// A mock backend answering every request with a fixed JSON body.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets seen so far (e.g. "/api/health").
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock backend on a free port.
pub async fn start_json_backend(status: u16, body: &'static str, delay: Duration) -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        if let Some(target) = head.lines().next().and_then(|l| l.split(' ').nth(1)) {
                            seen.lock().unwrap().push(target.to_string());
                        }

                        tokio::time::sleep(delay).await;

                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Config with short lifecycle delays.
pub fn test_config(api_base: &str) -> ShellConfig {
    let mut config = ShellConfig::default();
    config.api.base_url = api_base.to_string();
    config.api.timeout_ms = 500;
    config.navigation.transition_clear_ms = 40;
    config.navigation.icon_refresh_ms = 10;
    config.observability.metrics_enabled = false;
    config
}

/// Headless host whose parts stay inspectable after being handed over.
pub struct TestHost {
    pub document: Arc<HeadlessDocument>,
    pub history: Arc<MemoryHistory>,
    pub icons: Arc<CountingIcons>,
    pub analytics: Arc<MemoryAnalytics>,
}

impl TestHost {
    pub fn new(config: &ShellConfig) -> Self {
        Self::at(config, "/")
    }

    /// Host whose address bar shows `location` at load time.
    pub fn at(config: &ShellConfig, location: &str) -> Self {
        Self {
            document: Arc::new(HeadlessDocument::with_container(&config.app.mount_selector)),
            history: Arc::new(MemoryHistory::new(location)),
            icons: Arc::new(CountingIcons::new()),
            analytics: Arc::new(MemoryAnalytics::new()),
        }
    }

    pub fn collaborators(&self, config: &ShellConfig) -> Collaborators {
        Collaborators::headless(config)
            .with_document(self.document.clone())
            .with_history(self.history.clone())
            .with_icons(Some(self.icons.clone()))
            .with_analytics(Some(self.analytics.clone()))
    }

    /// Paths reported as page views, in order.
    pub fn page_views(&self) -> Vec<String> {
        self.analytics
            .named("page_view")
            .into_iter()
            .filter_map(|params| params["path"].as_str().map(str::to_string))
            .collect()
    }
}

/// Guard that suspends for a configured time on selected paths and vetoes
/// selected paths.
#[derive(Default)]
pub struct ScriptedGuard {
    delays: HashMap<String, Duration>,
    denied: Vec<String>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn deny(mut self, path: &str) -> Self {
        self.denied.push(path.to_string());
        self
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl NavigationGuard for ScriptedGuard {
    fn name(&self) -> &str {
        "scripted"
    }

    fn check<'a>(
        &'a self,
        to: &'a NavigationState,
        _from: &'a NavigationState,
    ) -> BoxFuture<'a, GuardDecision> {
        async move {
            self.seen.lock().unwrap().push(to.path.clone());
            if let Some(delay) = self.delays.get(&to.path) {
                tokio::time::sleep(*delay).await;
            }
            if self.denied.contains(&to.path) {
                GuardDecision::cancel("scripted denial")
            } else {
                GuardDecision::Continue
            }
        }
        .boxed()
    }
}
