//! Shell mount and start-up against real and missing backends.

use std::sync::Arc;
use std::time::Duration;

use care_journey::health::ApiHealth;
use care_journey::host::{Document, HeadlessDocument, History};
use care_journey::routing::catalog;
use care_journey::shell::ShellError;
use care_journey::Application;

mod common;
use common::TestHost;

const HEALTHY: &str = r#"{"status":"healthy","success":true,"message":"ok","version":"2.0.0","timestamp":"2026-01-01T00:00:00Z"}"#;

#[tokio::test]
async fn test_mount_fails_without_container() {
    let config = common::test_config("http://127.0.0.1:9");
    let host = TestHost::new(&config);
    let collaborators = host
        .collaborators(&config)
        .with_document(Arc::new(HeadlessDocument::new()));

    let err = Application::mount(config, collaborators).await.err().unwrap();

    assert!(matches!(err, ShellError::MountFailure { ref selector } if selector == "#app"));
}

#[tokio::test]
async fn test_loading_placeholder_until_start() {
    let config = common::test_config(&common::unreachable_base_url().await);
    let host = TestHost::new(&config);

    let app = Application::mount(config.clone(), host.collaborators(&config))
        .await
        .unwrap();
    let html = host.document.inner_html("#app").unwrap();
    assert!(html.contains(r#"data-testid="global-loading""#));
    assert_eq!(app.api_health(), ApiHealth::Unknown);

    app.start().await;
    let html = host.document.inner_html("#app").unwrap();
    assert!(!html.contains("global-loading"));
    assert!(html.contains(r#"data-page="home""#));
}

#[tokio::test]
async fn test_starts_without_backend() {
    let config = common::test_config(&common::unreachable_base_url().await);
    let host = TestHost::new(&config);

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert!(matches!(app.api_health(), ApiHealth::Unreachable(_)));
    assert_eq!(app.current_state().route_name(), catalog::HOME);
    assert!(host.document.inner_html("#app").unwrap().contains(r#"data-page="home""#));
}

#[tokio::test]
async fn test_health_check_against_backend() {
    let backend = common::start_json_backend(200, HEALTHY, Duration::ZERO).await;
    let config = common::test_config(&backend.base_url());
    let host = TestHost::new(&config);

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert_eq!(app.api_health(), ApiHealth::Healthy);
    assert_eq!(backend.requests(), vec!["/api/health"]);
}

#[tokio::test]
async fn test_unhealthy_backend_is_degraded() {
    let backend = common::start_json_backend(200, r#"{"status":"maintenance"}"#, Duration::ZERO).await;
    let config = common::test_config(&backend.base_url());
    let host = TestHost::new(&config);

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert_eq!(app.api_health(), ApiHealth::Degraded("maintenance".into()));
    assert_eq!(app.current_state().route_name(), catalog::HOME);
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let backend = common::start_json_backend(503, r#"{"status":"down"}"#, Duration::ZERO).await;
    let config = common::test_config(&backend.base_url());
    let host = TestHost::new(&config);

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert!(matches!(app.api_health(), ApiHealth::Unreachable(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let backend = common::start_json_backend(200, HEALTHY, Duration::from_secs(2)).await;
    let mut config = common::test_config(&backend.base_url());
    config.api.timeout_ms = 100;
    let host = TestHost::new(&config);

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert!(matches!(app.api_health(), ApiHealth::Unreachable(_)));
    assert!(app.current_state().route_name() == catalog::HOME);
}

#[tokio::test]
async fn test_deep_link_start() {
    let config = common::test_config(&common::unreachable_base_url().await);
    let host = TestHost::at(&config, "/knowledge?topic=sleep");

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();
    let state = app.current_state();

    assert_eq!(state.route_name(), catalog::KNOWLEDGE);
    assert_eq!(state.path, "/knowledge");
    assert_eq!(state.full_path, "/knowledge?topic=sleep");
    assert_eq!(host.history.current_path(), "/knowledge?topic=sleep");
    assert_eq!(host.history.len(), 1);
}

#[tokio::test]
async fn test_redirected_start_replaces_entry() {
    let config = common::test_config(&common::unreachable_base_url().await);
    let host = TestHost::at(&config, "/growth-strategy");

    let app = Application::bootstrap(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert_eq!(app.current_state().route_name(), catalog::SUPPORT);
    assert_eq!(host.history.current_path(), "/support");
    assert_eq!(host.history.len(), 1);
    assert_eq!(host.document.title(), "成长对策室 - 智护童行");
}

#[tokio::test]
async fn test_app_identity() {
    let config = common::test_config("http://127.0.0.1:9");
    let host = TestHost::new(&config);

    let app = Application::mount(config.clone(), host.collaborators(&config))
        .await
        .unwrap();

    assert_eq!(app.name(), "智护童行");
    assert_eq!(app.version(), "2.0.0");
}
