//! Page-transition indicator.
//!
//! A body class is added just before a commit and removed a fixed delay
//! after it, so CSS transitions have time to play. Only the newest mark may
//! clear the class; an older timer firing during a later transition is a
//! no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::host::Document;

/// Identifies one mark of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket(u64);

pub struct TransitionIndicator {
    document: Arc<dyn Document>,
    class: String,
    clear_after: Duration,
    epoch: AtomicU64,
}

impl TransitionIndicator {
    pub fn new(document: Arc<dyn Document>, class: impl Into<String>, clear_after: Duration) -> Self {
        Self {
            document,
            class: class.into(),
            clear_after,
            epoch: AtomicU64::new(0),
        }
    }

    /// Add the class and return the ticket allowed to clear it.
    pub fn begin(&self) -> TransitionTicket {
        let ticket = TransitionTicket(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
        self.document.add_body_class(&self.class);
        ticket
    }

    /// Remove the class after the configured delay, unless a newer
    /// transition has started by then.
    pub fn schedule_clear(self: &Arc<Self>, ticket: TransitionTicket) {
        let indicator = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(indicator.clear_after).await;
            indicator.clear(ticket);
        });
    }

    /// Remove the class now if `ticket` is the newest mark.
    pub fn clear(&self, ticket: TransitionTicket) -> bool {
        if self.epoch.load(Ordering::SeqCst) != ticket.0 {
            return false;
        }
        self.document.remove_body_class(&self.class);
        true
    }

    pub fn is_active(&self) -> bool {
        self.document.has_body_class(&self.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessDocument;

    #[test]
    fn test_only_newest_ticket_clears() {
        let doc = Arc::new(HeadlessDocument::new());
        let indicator = TransitionIndicator::new(doc, "page-transitioning", Duration::ZERO);

        let first = indicator.begin();
        let second = indicator.begin();
        assert!(indicator.is_active());

        assert!(!indicator.clear(first));
        assert!(indicator.is_active());

        assert!(indicator.clear(second));
        assert!(!indicator.is_active());
    }

    #[tokio::test]
    async fn test_scheduled_clear() {
        let doc = Arc::new(HeadlessDocument::new());
        let indicator = Arc::new(TransitionIndicator::new(
            doc,
            "page-transitioning",
            Duration::from_millis(20),
        ));

        let ticket = indicator.begin();
        indicator.schedule_clear(ticket);
        assert!(indicator.is_active());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!indicator.is_active());
    }
}
