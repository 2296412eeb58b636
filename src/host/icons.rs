//! Icon glyph materialization.
//!
//! The page uses an icon library that replaces `<i data-lucide="…">`
//! placeholders with SVG. Newly mounted markup needs another pass.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::host::HostError;

/// Re-runs icon materialization over the current DOM.
pub trait IconRenderer: Send + Sync {
    fn create_icons(&self) -> Result<(), HostError>;
}

/// Counts passes instead of touching a DOM.
#[derive(Debug, Default)]
pub struct CountingIcons {
    passes: AtomicUsize,
}

impl CountingIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Relaxed)
    }
}

impl IconRenderer for CountingIcons {
    fn create_icons(&self) -> Result<(), HostError> {
        self.passes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
