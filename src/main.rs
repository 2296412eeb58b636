//! Care Journey (智护童行) front-end shell
//!
//! Boots the application shell against an in-memory host page and walks
//! the given paths through the router.
//!
//! # Architecture Overview
//!
//! ```text
//!   location / navigate(path)
//!          │
//!          ▼
//!   ┌──────────────┐   ┌──────────────┐   ┌─────────────────────────┐
//!   │ route table  │──▶│ router engine│──▶│ lifecycle: guards       │
//!   │ (catalog)    │   │ (commit)     │   │ → commit → post hooks   │
//!   └──────────────┘   └──────┬───────┘   └──────────┬──────────────┘
//!                             │                      │
//!                             ▼                      ▼
//!                      root view render      title/meta, transition,
//!                      (#app container)      scroll, icons, analytics
//!
//!   shell: config → mount → health check → initial navigation
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use care_journey::config::{apply_overrides, load_config, ConfigOverrides, ShellConfig};
use care_journey::host::Document;
use care_journey::observability::{logging, metrics};
use care_journey::routing::NavigationOutcome;
use care_journey::shell::{self, Collaborators};

#[derive(Parser)]
#[command(name = "care-journey")]
#[command(about = "Care Journey front-end shell", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(long)]
    api_base: Option<String>,

    /// Enable the analytics sink.
    #[arg(long)]
    analytics: bool,

    /// Paths to navigate to, in order, after start-up.
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShellConfig::default(),
    };
    let config = apply_overrides(
        config,
        ConfigOverrides {
            api_base: cli.api_base,
            analytics: cli.analytics,
        },
    )?;

    logging::init_logging(&config.observability)?;
    metrics::set_enabled(config.observability.metrics_enabled);

    tracing::info!(
        app = %config.app.name,
        version = %config.app.version,
        api = %config.api.base_url,
        "Configuration loaded"
    );

    let settle = Duration::from_millis(
        config
            .navigation
            .transition_clear_ms
            .max(config.navigation.icon_refresh_ms),
    );
    let host = Collaborators::headless(&config);
    let app = shell::init(config, host).await?;

    report(app, "start", &NavigationOutcome::Committed(app.current_state()));

    for path in &cli.paths {
        let outcome = app.router().navigate(path).await;
        report(app, path, &outcome);
    }

    // Let delayed effects (transition clear, icon refresh) run before exit.
    tokio::time::sleep(settle).await;
    tracing::info!(path = %app.current_state().path, "Shell idle");
    Ok(())
}

fn report(app: &shell::Application, requested: &str, outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Committed(state) => println!(
            "{requested} -> {} [{}] \"{}\"",
            state.path,
            state.route_name(),
            app.document().title()
        ),
        NavigationOutcome::Cancelled { guard, reason, .. } => {
            println!("{requested} cancelled by {guard}: {reason}")
        }
        NavigationOutcome::Superseded { .. } => println!("{requested} superseded"),
    }
}
