//! Global error handler.
//!
//! Logs every reported error and, when an analytics sink is present,
//! forwards it as a non-fatal `exception` event. Fed by the router's fault
//! channel and, for the process-wide shell, by a panic hook.

use std::panic;
use std::sync::Arc;

use serde_json::json;

use crate::observability::analytics::{Analytics, EXCEPTION};
use crate::routing::router::panic_message;
use crate::routing::NavigationFault;

pub struct ErrorHandler {
    analytics: Option<Arc<dyn Analytics>>,
}

impl ErrorHandler {
    pub fn new(analytics: Option<Arc<dyn Analytics>>) -> Self {
        Self { analytics }
    }

    /// Log `description` with context `info` and forward it to analytics.
    pub fn report(&self, description: &str, info: &str) {
        tracing::error!(error = %description, info, "Application error");

        if let Some(sink) = &self.analytics {
            let params = json!({ "description": description, "fatal": false });
            if let Err(e) = sink.track(EXCEPTION, params) {
                tracing::debug!(error = %e, "Exception event dropped");
            }
        }
    }

    pub fn report_fault(&self, fault: &NavigationFault) {
        match fault {
            NavigationFault::Observer {
                listener,
                path,
                message,
            } => self.report(message, &format!("observer {listener:?} failed on {path}")),
            NavigationFault::RedirectLoop { path, hops } => self.report(
                &format!("redirect loop resolving {path}"),
                &format!("gave up after {hops} hops"),
            ),
        }
    }

    /// Route panics through [`ErrorHandler::report`], then to the previous hook.
    pub fn install_panic_hook(self: Arc<Self>) {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            self.report(&panic_message(info.payload()), &location);
            previous(info);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemoryAnalytics;

    #[test]
    fn test_forwards_exception_events() {
        let sink = Arc::new(MemoryAnalytics::new());
        let handler = ErrorHandler::new(Some(sink.clone()));

        handler.report_fault(&NavigationFault::RedirectLoop {
            path: "/ping".into(),
            hops: 5,
        });

        let events = sink.named(EXCEPTION);
        assert_eq!(
            events,
            vec![json!({ "description": "redirect loop resolving /ping", "fatal": false })]
        );
    }

    #[test]
    fn test_without_analytics() {
        let handler = ErrorHandler::new(None);
        handler.report("boom", "test");
    }
}
