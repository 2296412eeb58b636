//! Route table.
//!
//! # Responsibilities
//! - Store route entries in declaration order
//! - Check table invariants once, at construction
//! - Resolve a path to an entry, following redirects up to a hop limit
//!
//! # Design Decisions
//! - Immutable after construction; shared via `Arc`
//! - First match wins; the catch-all is last, so every path resolves
//! - Views are never resolved here, only carried

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::routing::matcher::{
    self, catch_all_param, normalize_path, strip_suffixes, MatchOptions, Matcher, RouteParams,
};
use crate::routing::RouteError;
use crate::views::LazyView;

/// Per-route metadata applied to the document after a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
    pub description: Option<String>,
    pub requires_auth: bool,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }
}

/// One navigable destination.
pub struct RouteEntry {
    pub name: String,
    pub pattern: String,
    pub meta: RouteMeta,
    view: Option<LazyView>,
    redirect_to: Option<String>,
}

impl RouteEntry {
    /// A route that renders `view`.
    pub fn page(
        name: impl Into<String>,
        pattern: impl Into<String>,
        view: LazyView,
        meta: RouteMeta,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            meta,
            view: Some(view),
            redirect_to: None,
        }
    }

    /// A route that immediately re-resolves against `target`.
    pub fn redirect(
        name: impl Into<String>,
        pattern: impl Into<String>,
        target: impl Into<String>,
        meta: RouteMeta,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            meta,
            view: None,
            redirect_to: Some(target.into()),
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    pub fn is_catch_all(&self) -> bool {
        catch_all_param(&self.pattern).is_some()
    }

    /// The lazy view handle; `None` for redirect entries.
    pub fn view(&self) -> Option<&LazyView> {
        self.view.as_ref()
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("redirect_to", &self.redirect_to)
            .field("view", &self.view)
            .finish()
    }
}

/// Result of a single lookup, redirects not followed.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteEntry>,
    pub path: String,
    pub params: RouteParams,
}

/// Result of a full resolution, redirects followed.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub route: Arc<RouteEntry>,
    /// Normalized path of the final target.
    pub path: String,
    /// Path as it should appear in the address bar (query and fragment kept).
    pub full_path: String,
    pub params: RouteParams,
    /// The first requested path when at least one redirect was followed.
    pub redirected_from: Option<String>,
}

#[derive(Debug)]
struct CompiledRoute {
    entry: Arc<RouteEntry>,
    matcher: Box<dyn Matcher>,
}

/// Ordered, validated set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    options: MatchOptions,
}

impl RouteTable {
    /// Compile and validate `entries`.
    ///
    /// Rejects duplicate names, invalid patterns, a missing or misplaced
    /// catch-all, redirects without a target, and pages without a view.
    pub fn new(entries: Vec<RouteEntry>, options: MatchOptions) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(entries.len());
        let last = entries.len().saturating_sub(1);

        for (index, entry) in entries.into_iter().enumerate() {
            if !names.insert(entry.name.clone()) {
                return Err(RouteError::DuplicateName(entry.name));
            }
            match (&entry.view, &entry.redirect_to) {
                (None, None) => return Err(RouteError::MissingView(entry.name)),
                (_, Some(target)) if !target.starts_with('/') => {
                    return Err(RouteError::InvalidPattern(target.clone()));
                }
                _ => {}
            }

            let matcher = matcher::compile(&entry.pattern, options)?;
            if matcher.is_catch_all() {
                if index != last {
                    return Err(RouteError::CatchAllNotLast(entry.name));
                }
                if entry.redirect_to.is_some() {
                    return Err(RouteError::InvalidPattern(entry.pattern));
                }
            }

            routes.push(CompiledRoute {
                entry: Arc::new(entry),
                matcher,
            });
        }

        if !routes.last().is_some_and(|r| r.matcher.is_catch_all()) {
            return Err(RouteError::MissingCatchAll);
        }

        Ok(Self { routes, options })
    }

    /// Single lookup in declaration order. Always succeeds because the
    /// catch-all is last.
    pub fn lookup(&self, path: &str) -> RouteMatch {
        let normalized = normalize_path(path, self.options);
        for compiled in &self.routes {
            if let Some(params) = compiled.matcher.matches(&normalized) {
                return RouteMatch {
                    route: compiled.entry.clone(),
                    path: normalized,
                    params,
                };
            }
        }
        // Unreachable for a validated table; fall back to the catch-all anyway.
        self.fallback(normalized)
    }

    /// Resolve `path`, following at most `hop_limit` redirects.
    pub fn resolve(&self, path: &str, hop_limit: usize) -> Result<Resolution, RouteError> {
        let requested = path.trim();
        // Query and fragment of the request, carried across plain-path redirects.
        let suffix = &requested[strip_suffixes(requested).len()..];
        let mut full_path = requested.to_string();
        let mut hit = self.lookup(&full_path);
        let mut redirected_from = None;
        let mut hops = 0;

        while let Some(target) = hit.route.redirect_to() {
            if hops == hop_limit {
                return Err(RouteError::RedirectLoop {
                    path: path.to_string(),
                    hops,
                });
            }
            hops += 1;
            redirected_from.get_or_insert_with(|| hit.path.clone());
            tracing::trace!(from = %hit.path, to = %target, hop = hops, "Following redirect");
            full_path = if target.contains(['?', '#']) {
                target.to_string()
            } else {
                format!("{target}{suffix}")
            };
            hit = self.lookup(&full_path);
        }

        if !full_path.starts_with('/') {
            full_path.insert(0, '/');
        }

        Ok(Resolution {
            route: hit.route,
            path: hit.path,
            full_path,
            params: hit.params,
            redirected_from,
        })
    }

    /// Resolution pointing at the catch-all entry for `path`, used when
    /// `resolve` fails.
    pub fn not_found_for(&self, path: &str) -> Resolution {
        let normalized = normalize_path(path, self.options);
        let hit = self.fallback(normalized);
        Resolution {
            route: hit.route,
            full_path: hit.path.clone(),
            path: hit.path,
            params: hit.params,
            redirected_from: None,
        }
    }

    /// The catch-all entry.
    pub fn not_found(&self) -> &Arc<RouteEntry> {
        &self.catch_all().entry
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RouteEntry>> {
        self.routes.iter().map(|r| &r.entry).find(|e| e.name == name)
    }

    /// Entries in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<RouteEntry>> {
        self.routes.iter().map(|r| &r.entry)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    fn catch_all(&self) -> &CompiledRoute {
        // `new` guarantees a catch-all in last position.
        &self.routes[self.routes.len() - 1]
    }

    fn fallback(&self, normalized: String) -> RouteMatch {
        let compiled = self.catch_all();
        let params = compiled.matcher.matches(&normalized).unwrap_or_default();
        RouteMatch {
            route: compiled.entry.clone(),
            path: normalized,
            params,
        }
    }
}
