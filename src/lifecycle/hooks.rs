//! Post-navigation hooks.
//!
//! Each hook is a side effect applied after a commit. A failing hook is
//! logged by the controller and never affects the navigation or the other
//! hooks.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::json;
use thiserror::Error;

use crate::host::{Document, HostError, IconRenderer, ScrollPosition};
use crate::observability::analytics::{Analytics, AnalyticsError, PAGE_VIEW};
use crate::routing::state::{NavigationKind, NavigationState};

#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// Runs after a navigation commits.
pub trait AfterHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn after(&self, to: &NavigationState, from: &NavigationState) -> Result<(), HookError>;
}

/// Copies the route's title and description onto the document.
pub struct DocumentMetaHook {
    document: Arc<dyn Document>,
}

impl DocumentMetaHook {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self { document }
    }
}

impl AfterHook for DocumentMetaHook {
    fn name(&self) -> &'static str {
        "document-meta"
    }

    fn after(&self, to: &NavigationState, _from: &NavigationState) -> Result<(), HookError> {
        let meta = &to.route.meta;
        if !meta.title.is_empty() {
            self.document.set_title(&meta.title);
        }
        if let Some(description) = &meta.description {
            if !self.document.set_meta_content("description", description) {
                tracing::debug!("No description meta tag on the page");
            }
        }
        Ok(())
    }
}

/// Number of distinct paths whose scroll offset is remembered.
pub const SCROLL_MEMORY: usize = 50;

/// Saved offsets, oldest path evicted first once full.
#[derive(Debug, Default)]
struct SavedOffsets {
    positions: HashMap<String, ScrollPosition>,
    order: VecDeque<String>,
}

impl SavedOffsets {
    fn save(&mut self, path: &str, position: ScrollPosition, capacity: usize) {
        if self.positions.insert(path.to_string(), position).is_some() {
            self.order.retain(|p| p != path);
        }
        self.order.push_back(path.to_string());

        while self.order.len() > capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.positions.remove(&oldest);
            }
        }
    }
}

/// Scroll to top on push; restore the saved offset on back/forward.
pub struct ScrollHook {
    document: Arc<dyn Document>,
    capacity: usize,
    saved: Mutex<SavedOffsets>,
}

impl ScrollHook {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self::with_capacity(document, SCROLL_MEMORY)
    }

    pub fn with_capacity(document: Arc<dyn Document>, capacity: usize) -> Self {
        Self {
            document,
            capacity: capacity.max(1),
            saved: Mutex::new(SavedOffsets::default()),
        }
    }

    pub fn remembered(&self) -> usize {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .positions
            .len()
    }
}

impl AfterHook for ScrollHook {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn after(&self, to: &NavigationState, from: &NavigationState) -> Result<(), HookError> {
        let mut saved = self.saved.lock().unwrap_or_else(PoisonError::into_inner);
        saved.save(&from.full_path, self.document.scroll_position(), self.capacity);

        match to.kind {
            NavigationKind::Initial => {}
            NavigationKind::Push => self.document.scroll_to(ScrollPosition::TOP, true),
            NavigationKind::Pop { .. } => {
                match saved.positions.get(&to.full_path) {
                    Some(position) => self.document.scroll_to(*position, false),
                    None => self.document.scroll_to(ScrollPosition::TOP, true),
                }
            }
        }
        Ok(())
    }
}

/// Re-materializes icons shortly after the new view is mounted.
pub struct IconRefreshHook {
    icons: Arc<dyn IconRenderer>,
    delay: Duration,
}

impl IconRefreshHook {
    pub fn new(icons: Arc<dyn IconRenderer>, delay: Duration) -> Self {
        Self { icons, delay }
    }
}

impl AfterHook for IconRefreshHook {
    fn name(&self) -> &'static str {
        "icons"
    }

    fn after(&self, _to: &NavigationState, _from: &NavigationState) -> Result<(), HookError> {
        let icons = Arc::clone(&self.icons);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = icons.create_icons() {
                tracing::debug!(error = %e, "Icon refresh skipped");
            }
        });
        Ok(())
    }
}

/// Reports a page view for the committed path.
pub struct AnalyticsHook {
    sink: Arc<dyn Analytics>,
}

impl AnalyticsHook {
    pub fn new(sink: Arc<dyn Analytics>) -> Self {
        Self { sink }
    }
}

impl AfterHook for AnalyticsHook {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn after(&self, to: &NavigationState, _from: &NavigationState) -> Result<(), HookError> {
        self.sink.track(PAGE_VIEW, json!({ "path": to.path }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessDocument;
    use crate::routing::catalog::platform_table;
    use crate::routing::matcher::MatchOptions;
    use crate::routing::table::RouteTable;

    fn state(table: &RouteTable, path: &str, kind: NavigationKind) -> NavigationState {
        NavigationState::from_resolution(table.resolve(path, 5).unwrap(), kind)
    }

    #[test]
    fn test_document_meta() {
        let table = platform_table(MatchOptions::default()).unwrap();
        let doc = Arc::new(HeadlessDocument::with_container("#app"));
        let hook = DocumentMetaHook::new(doc.clone());

        let from = state(&table, "/", NavigationKind::Initial);
        let to = state(&table, "/knowledge", NavigationKind::Push);
        hook.after(&to, &from).unwrap();

        assert_eq!(doc.title(), "知识学习 - 智护童行");
        assert_eq!(doc.meta_content("description").as_deref(), Some("系统学习专业照护知识"));

        // NotFound has no description; the previous one stays.
        let missing = state(&table, "/nope", NavigationKind::Push);
        hook.after(&missing, &to).unwrap();
        assert_eq!(doc.title(), "页面未找到 - 智护童行");
        assert_eq!(doc.meta_content("description").as_deref(), Some("系统学习专业照护知识"));
    }

    #[test]
    fn test_scroll_restores_on_pop() {
        let table = platform_table(MatchOptions::default()).unwrap();
        let doc = Arc::new(HeadlessDocument::new());
        let hook = ScrollHook::new(doc.clone());

        let home = state(&table, "/", NavigationKind::Initial);
        let knowledge = state(&table, "/knowledge", NavigationKind::Push);

        doc.scroll_to(ScrollPosition { left: 0.0, top: 480.0 }, false);
        hook.after(&knowledge, &home).unwrap();
        assert_eq!(doc.scroll_position(), ScrollPosition::TOP);

        let back = state(&table, "/", NavigationKind::Pop { delta: -1 });
        hook.after(&back, &knowledge).unwrap();
        assert_eq!(doc.scroll_position().top, 480.0);
    }

    #[test]
    fn test_scroll_memory_is_bounded() {
        let table = platform_table(MatchOptions::default()).unwrap();
        let doc = Arc::new(HeadlessDocument::new());
        let hook = ScrollHook::with_capacity(doc.clone(), 3);

        let mut from = state(&table, "/", NavigationKind::Initial);
        for i in 0..10 {
            let to = state(&table, &format!("/missing-{i}"), NavigationKind::Push);
            hook.after(&to, &from).unwrap();
            from = to;
        }
        assert_eq!(hook.remembered(), 3);

        // The oldest offsets are gone: going back to "/" lands at the top.
        doc.scroll_to(ScrollPosition { left: 0.0, top: 90.0 }, false);
        let back = state(&table, "/", NavigationKind::Pop { delta: -10 });
        hook.after(&back, &from).unwrap();
        assert_eq!(doc.scroll_position(), ScrollPosition::TOP);
    }
}
