//! Path canonicalisation and placeholder pattern compilation.
//!
//! Route paths such as `/users/{id}/posts/{post_id}` are compiled once into an
//! anchored regex (`^/users/([^/]+)/posts/([^/]+)$`) plus the ordered list of
//! placeholder names. Everything outside a `{name}` placeholder is escaped, so
//! `/v1.0/users` only ever matches itself.

use regex::Regex;
use std::sync::Arc;

use crate::params::Parameters;

/// Canonicalise a route or request path.
///
/// - an empty or all-slash input becomes `/`
/// - every trailing `/` is stripped
/// - exactly one leading `/` is guaranteed
///
/// Interior slashes are left untouched, so `/a//b` stays `/a//b`. Only
/// [`Route::with_path_prefix`](crate::route::Route::with_path_prefix) collapses
/// slash runs, which means a route placed in a [`Group`](crate::group::Group)
/// (even one with an empty prefix) is matched as `/a/b`. The function is
/// idempotent.
#[must_use]
pub fn canonicalize_path(path: &str) -> String {
    let body = path.trim_matches('/');
    if body.is_empty() {
        return "/".to_string();
    }
    let mut canonical = String::with_capacity(body.len() + 1);
    canonical.push('/');
    canonical.push_str(body);
    canonical
}

/// Collapse every run of consecutive `/` into a single `/`.
pub(crate) fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        let is_slash = c == '/';
        if is_slash && previous_slash {
            continue;
        }
        previous_slash = is_slash;
        collapsed.push(c);
    }
    collapsed
}

/// Length of the placeholder name at the start of `rest` (the bytes right
/// after a `{`), if `rest` continues with `[A-Za-z0-9_]+}`.
fn placeholder_len(rest: &[u8]) -> Option<usize> {
    let len = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    (len > 0 && rest.get(len) == Some(&b'}')).then_some(len)
}

/// Compiled form of a canonical route path.
///
/// Shared between clones of a [`Route`](crate::route::Route) through an `Arc`;
/// a new pattern is only compiled when a route's path changes.
#[derive(Debug)]
pub struct PathPattern {
    regex: Result<Regex, String>,
    param_names: Vec<Arc<str>>,
}

impl PathPattern {
    /// Compile a canonical path into an anchored matcher.
    ///
    /// Compilation never panics. If the regex cannot be built the pattern is
    /// kept in an invalid state where it matches nothing; see
    /// [`PathPattern::error`].
    #[must_use]
    pub fn compile(path: &str) -> Self {
        let bytes = path.as_bytes();
        let mut pattern = String::with_capacity(path.len() + 16);
        let mut param_names = Vec::with_capacity(path.matches('{').count());
        pattern.push('^');

        let mut literal_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'{' {
                if let Some(len) = placeholder_len(&bytes[i + 1..]) {
                    pattern.push_str(&regex::escape(&path[literal_start..i]));
                    pattern.push_str("([^/]+)");
                    param_names.push(Arc::from(&path[i + 1..i + 1 + len]));
                    i += len + 2;
                    literal_start = i;
                    continue;
                }
            }
            i += 1;
        }
        pattern.push_str(&regex::escape(&path[literal_start..]));
        pattern.push('$');

        Self {
            regex: Regex::new(&pattern).map_err(|e| e.to_string()),
            param_names,
        }
    }

    /// Placeholder names in order of appearance, duplicates included.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// The compiler error, if this pattern could not be built.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.regex.as_ref().err().map(String::as_str)
    }

    /// First placeholder name that appears more than once, if any.
    #[must_use]
    pub fn duplicate_param(&self) -> Option<&str> {
        self.param_names
            .iter()
            .enumerate()
            .find(|(i, name)| self.param_names[..*i].contains(*name))
            .map(|(_, name)| name.as_ref())
    }

    /// Match a full request path.
    ///
    /// Returns `None` when the path does not match (or the pattern is invalid)
    /// and `Some` with the captured parameters otherwise. A pattern without
    /// placeholders yields an empty, but present, parameter set.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Parameters> {
        let regex = self.regex.as_ref().ok()?;
        let captures = regex.captures(path)?;
        let mut params = Parameters::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                params.insert(Arc::clone(name), value.as_str().to_string());
            }
        }
        Some(params)
    }
}
