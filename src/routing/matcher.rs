//! Route matching logic.
//!
//! # Responsibilities
//! - Normalize request paths (query, fragment, trailing slash)
//! - Match exact patterns (case-insensitive unless configured)
//! - Match the catch-all pattern `/:name(.*)*` and capture the rest of the path
//!
//! # Design Decisions
//! - Exact or catch-all only: no prefix matching, no regex
//! - Matching is a pure function of (pattern, path, options)

use std::collections::BTreeMap;
use std::fmt;

use crate::config::NavigationConfig;
use crate::routing::RouteError;

/// Parameters captured by a match, keyed by parameter name.
pub type RouteParams = BTreeMap<String, String>;

/// Knobs that change how paths compare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub strict_trailing_slash: bool,
}

impl From<&NavigationConfig> for MatchOptions {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            strict_trailing_slash: config.strict_trailing_slash,
        }
    }
}

/// Trait for matching paths against a compiled pattern.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Captured params if `path` (already normalized) matches.
    fn matches(&self, path: &str) -> Option<RouteParams>;

    /// True for the fallback pattern that matches everything.
    fn is_catch_all(&self) -> bool {
        false
    }
}

/// Matches one literal path.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    expected: String,
    case_sensitive: bool,
}

impl ExactMatcher {
    pub fn new(path: &str, options: MatchOptions) -> Self {
        let expected = normalize_path(path, options);
        let expected = if options.case_sensitive {
            expected
        } else {
            expected.to_lowercase()
        };
        Self {
            expected,
            case_sensitive: options.case_sensitive,
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> Option<RouteParams> {
        let hit = if self.case_sensitive {
            path == self.expected
        } else {
            path.to_lowercase() == self.expected
        };
        hit.then(RouteParams::new)
    }
}

/// Matches any path, capturing it (minus the leading slash) under `param`.
#[derive(Debug, Clone)]
pub struct CatchAllMatcher {
    param: String,
}

impl CatchAllMatcher {
    pub fn new(param: impl Into<String>) -> Self {
        Self { param: param.into() }
    }
}

impl Matcher for CatchAllMatcher {
    fn matches(&self, path: &str) -> Option<RouteParams> {
        let mut params = RouteParams::new();
        params.insert(self.param.clone(), path.trim_start_matches('/').to_string());
        Some(params)
    }

    fn is_catch_all(&self) -> bool {
        true
    }
}

/// Parameter name of a catch-all pattern (`/:pathMatch(.*)*` → `pathMatch`).
pub fn catch_all_param(pattern: &str) -> Option<&str> {
    let name = pattern.strip_prefix("/:")?.strip_suffix("(.*)*")?;
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

/// Compile a declared pattern.
pub fn compile(pattern: &str, options: MatchOptions) -> Result<Box<dyn Matcher>, RouteError> {
    if let Some(param) = catch_all_param(pattern) {
        return Ok(Box::new(CatchAllMatcher::new(param)));
    }
    if !pattern.starts_with('/') || pattern.contains(':') || pattern.contains('*') {
        return Err(RouteError::InvalidPattern(pattern.to_string()));
    }
    Ok(Box::new(ExactMatcher::new(pattern, options)))
}

/// Strip the query string and fragment.
pub fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Normalize a requested path for matching: no query or fragment, a leading
/// slash, and (unless strict) no trailing slash except for the root.
pub fn normalize_path(path: &str, options: MatchOptions) -> String {
    let bare = strip_suffixes(path.trim());
    let mut normalized = if bare.starts_with('/') {
        bare.to_string()
    } else {
        format!("/{bare}")
    };
    if !options.strict_trailing_slash {
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
    }
    normalized
}
