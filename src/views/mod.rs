//! Page views and lazy view handles.
//!
//! A route never holds a view directly. It holds a [`LazyView`], a factory
//! that runs the first time the route is activated; the result is cached for
//! the rest of the process.

pub mod pages;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::routing::state::NavigationState;

/// A renderable page.
pub trait View: Send + Sync {
    /// Markup placed into the mount container for `state`.
    fn render(&self, state: &NavigationState) -> String;
}

type ViewFactory = Box<dyn Fn() -> Arc<dyn View> + Send + Sync>;

/// Deferred reference to a view.
pub struct LazyView {
    factory: ViewFactory,
    resolved: OnceLock<Arc<dyn View>>,
    loads: AtomicUsize,
}

impl LazyView {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<dyn View> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            resolved: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Shorthand for views with a `Default` constructor.
    pub fn of<V>() -> Self
    where
        V: View + Default + 'static,
    {
        Self::new(|| Arc::new(V::default()))
    }

    /// Run the factory on first use, then return the cached view.
    pub fn resolve(&self) -> Arc<dyn View> {
        self.resolved
            .get_or_init(|| {
                self.loads.fetch_add(1, Ordering::Relaxed);
                (self.factory)()
            })
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// How many times the factory ran (0 or 1).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::pages::HomePage;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let lazy = LazyView::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(HomePage)
        });

        assert!(!lazy.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = lazy.resolve();
        let second = lazy.resolve();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lazy.load_count(), 1);
    }
}
