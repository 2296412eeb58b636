//! Host environment collaborators.
//!
//! # Data Flow
//! ```text
//! lifecycle hooks ──▶ document.rs (title, meta, body classes, scroll, markup)
//!                 ──▶ icons.rs    (icon glyph materialization)
//! router engine   ──▶ history.rs  (initial path, push/replace, back/forward)
//! ```
//!
//! # Design Decisions
//! - The shell never reaches for globals; every host API is a trait object
//! - Headless implementations back the binary and the test suites

pub mod document;
pub mod history;
pub mod icons;

use thiserror::Error;

pub use document::{Document, HeadlessDocument, ScrollPosition};
pub use history::{History, MemoryHistory};
pub use icons::{CountingIcons, IconRenderer};

/// Errors raised by host collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no element matches selector {0:?}")]
    ElementNotFound(String),

    #[error("icon library unavailable: {0}")]
    IconsUnavailable(String),
}
