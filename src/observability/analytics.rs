//! Page-view analytics.
//!
//! The analytics tag is optional on the page. The shell detects it once at
//! start-up and hands an [`Analytics`] sink to the lifecycle and the error
//! handler; with no sink, nothing is emitted.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;

/// Event emitted after every committed navigation.
pub const PAGE_VIEW: &str = "page_view";

/// Event emitted by the global error handler.
pub const EXCEPTION: &str = "exception";

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics sink rejected event {event:?}: {reason}")]
    Rejected { event: String, reason: String },
}

/// Receives `(event_name, params)` pairs.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &str, params: Value) -> Result<(), AnalyticsError>;
}

/// Sink that writes events to the `analytics` tracing target.
#[derive(Debug, Clone)]
pub struct TracingAnalytics {
    measurement_id: String,
}

impl TracingAnalytics {
    pub fn new(measurement_id: impl Into<String>) -> Self {
        Self {
            measurement_id: measurement_id.into(),
        }
    }
}

impl Analytics for TracingAnalytics {
    fn track(&self, event: &str, params: Value) -> Result<(), AnalyticsError> {
        tracing::info!(
            target: "analytics",
            measurement_id = %self.measurement_id,
            event,
            params = %params,
            "Analytics event"
        );
        Ok(())
    }
}

/// Sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemoryAnalytics {
    events: Mutex<Vec<(String, Value)>>,
}

impl MemoryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events named `event`, params only.
    pub fn named(&self, event: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|(name, _)| name == event)
            .map(|(_, params)| params)
            .collect()
    }
}

impl Analytics for MemoryAnalytics {
    fn track(&self, event: &str, params: Value) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((event.to_string(), params));
        Ok(())
    }
}
