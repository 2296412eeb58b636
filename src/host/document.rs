//! Document collaborator.
//!
//! The lifecycle mutates a small surface of the host page: the title, the
//! `description` meta tag, body classes, the scroll position, and the markup
//! of the mount container. [`Document`] is that surface; [`HeadlessDocument`]
//! is an in-memory page used by the native binary and the tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::host::HostError;

/// Scroll offset of the page, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { left: 0.0, top: 0.0 };
}

/// The parts of the host page the shell is allowed to touch.
pub trait Document: Send + Sync {
    fn title(&self) -> String;
    fn set_title(&self, title: &str);

    /// Content of `meta[name=<name>]`, if the tag exists.
    fn meta_content(&self, name: &str) -> Option<String>;

    /// Update `meta[name=<name>]`. Returns false when the tag does not exist;
    /// tags are never created.
    fn set_meta_content(&self, name: &str, content: &str) -> bool;

    fn add_body_class(&self, class: &str);
    fn remove_body_class(&self, class: &str);
    fn has_body_class(&self, class: &str) -> bool;

    fn scroll_position(&self) -> ScrollPosition;
    fn scroll_to(&self, position: ScrollPosition, smooth: bool);

    /// Returns true if an element matching `selector` exists.
    fn has_element(&self, selector: &str) -> bool;

    /// Replace the inner markup of the element matching `selector`.
    fn set_inner_html(&self, selector: &str, html: &str) -> Result<(), HostError>;

    /// Inner markup of the element matching `selector`.
    fn inner_html(&self, selector: &str) -> Option<String>;
}

#[derive(Debug, Default)]
struct Page {
    title: String,
    meta: HashMap<String, String>,
    body_classes: BTreeSet<String>,
    scroll: ScrollPosition,
    // selector → inner markup
    elements: HashMap<String, String>,
}

/// In-memory page.
///
/// Elements are addressed by the exact selector string they were created
/// with (`#app`), which is all the shell needs.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    page: Mutex<Page>,
}

impl HeadlessDocument {
    /// An empty page: no title, no meta tags, no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page served by the platform's `index.html`: a `description` meta
    /// tag and an empty container matching `mount_selector`.
    pub fn with_container(mount_selector: &str) -> Self {
        let doc = Self::new();
        doc.insert_meta("description", "");
        doc.insert_element(mount_selector);
        doc
    }

    pub fn insert_meta(&self, name: &str, content: &str) {
        self.lock().meta.insert(name.to_string(), content.to_string());
    }

    pub fn insert_element(&self, selector: &str) {
        self.lock().elements.entry(selector.to_string()).or_default();
    }

    pub fn body_classes(&self) -> Vec<String> {
        self.lock().body_classes.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Document for HeadlessDocument {
    fn title(&self) -> String {
        self.lock().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.lock().meta.get(name).cloned()
    }

    fn set_meta_content(&self, name: &str, content: &str) -> bool {
        match self.lock().meta.get_mut(name) {
            Some(value) => {
                *value = content.to_string();
                true
            }
            None => false,
        }
    }

    fn add_body_class(&self, class: &str) {
        self.lock().body_classes.insert(class.to_string());
    }

    fn remove_body_class(&self, class: &str) {
        self.lock().body_classes.remove(class);
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.lock().body_classes.contains(class)
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.lock().scroll
    }

    fn scroll_to(&self, position: ScrollPosition, _smooth: bool) {
        self.lock().scroll = position;
    }

    fn has_element(&self, selector: &str) -> bool {
        self.lock().elements.contains_key(selector)
    }

    fn set_inner_html(&self, selector: &str, html: &str) -> Result<(), HostError> {
        match self.lock().elements.get_mut(selector) {
            Some(inner) => {
                *inner = html.to_string();
                Ok(())
            }
            None => Err(HostError::ElementNotFound(selector.to_string())),
        }
    }

    fn inner_html(&self, selector: &str) -> Option<String> {
        self.lock().elements.get(selector).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_is_never_created() {
        let doc = HeadlessDocument::new();
        assert!(!doc.set_meta_content("description", "x"));
        assert_eq!(doc.meta_content("description"), None);

        doc.insert_meta("description", "");
        assert!(doc.set_meta_content("description", "x"));
        assert_eq!(doc.meta_content("description").as_deref(), Some("x"));
    }

    #[test]
    fn test_inner_html_requires_element() {
        let doc = HeadlessDocument::with_container("#app");
        assert!(doc.set_inner_html("#app", "<p>hi</p>").is_ok());
        assert_eq!(doc.inner_html("#app").as_deref(), Some("<p>hi</p>"));
        assert!(matches!(
            doc.set_inner_html("#missing", ""),
            Err(HostError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_body_classes() {
        let doc = HeadlessDocument::new();
        doc.add_body_class("page-transitioning");
        assert!(doc.has_body_class("page-transitioning"));
        doc.remove_body_class("page-transitioning");
        assert!(doc.body_classes().is_empty());
    }
}
