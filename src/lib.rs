//! Care Journey (智护童行) front-end shell library

pub mod config;
pub mod health;
pub mod host;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod shell;
pub mod views;

pub use config::ShellConfig;
pub use routing::{NavigationOutcome, NavigationState, Router};
pub use shell::{Application, Collaborators};
