//! Location source.
//!
//! The router reads the initial path from the history and writes to it only
//! after a navigation commits. Back/forward are modelled as "peek the
//! adjacent entry, run the lifecycle, then move" so that a vetoed pop leaves
//! the history where it was.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Browser history as seen by the router.
pub trait History: Send + Sync {
    /// Path of the current entry.
    fn current_path(&self) -> String;

    /// Append an entry after the current one, dropping any forward entries.
    fn push(&self, path: &str);

    /// Overwrite the current entry.
    fn replace(&self, path: &str);

    /// Path `delta` entries away from the current one, if it exists.
    fn peek(&self, delta: isize) -> Option<String>;

    /// Move `delta` entries. Returns false (and does not move) when out of range.
    fn go(&self, delta: isize) -> bool;
}

#[derive(Debug)]
struct Entries {
    stack: Vec<String>,
    index: usize,
}

/// History kept in memory, like vue-router's memory history.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Mutex<Entries>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(Entries {
                stack: vec![initial_path.into()],
                index: 0,
            }),
        }
    }

    /// Number of entries, including forward ones.
    pub fn len(&self) -> usize {
        self.lock().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().stack.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn offset(index: usize, delta: isize, len: usize) -> Option<usize> {
        let target = index.checked_add_signed(delta)?;
        (target < len).then_some(target)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        let entries = self.lock();
        entries.stack[entries.index].clone()
    }

    fn push(&self, path: &str) {
        let mut entries = self.lock();
        let keep = entries.index + 1;
        entries.stack.truncate(keep);
        entries.stack.push(path.to_string());
        entries.index = keep;
    }

    fn replace(&self, path: &str) {
        let mut entries = self.lock();
        let index = entries.index;
        entries.stack[index] = path.to_string();
    }

    fn peek(&self, delta: isize) -> Option<String> {
        let entries = self.lock();
        Self::offset(entries.index, delta, entries.stack.len()).map(|i| entries.stack[i].clone())
    }

    fn go(&self, delta: isize) -> bool {
        let mut entries = self.lock();
        match Self::offset(entries.index, delta, entries.stack.len()) {
            Some(target) => {
                entries.index = target;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new("/");
        history.push("/a");
        history.push("/b");
        assert!(history.go(-2));
        assert_eq!(history.current_path(), "/");

        history.push("/c");
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek(1), None);
        assert_eq!(history.peek(-1).as_deref(), Some("/"));
    }

    #[test]
    fn test_go_out_of_range() {
        let history = MemoryHistory::default();
        assert!(!history.go(-1));
        assert!(!history.go(1));
        assert_eq!(history.current_path(), "/");
    }

    #[test]
    fn test_replace() {
        let history = MemoryHistory::new("/growth-strategy");
        history.replace("/support");
        assert_eq!(history.current_path(), "/support");
        assert_eq!(history.len(), 1);
    }
}
