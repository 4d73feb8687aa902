//! Path parameters captured by a successful match.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the matching hot path.
///
/// Param names use `Arc<str>` because they come from the compiled route
/// pattern (known at startup); values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Ordered mapping of placeholder name to captured value.
///
/// Iteration order is the order in which placeholders first appear in the
/// route pattern. If a pattern repeats a placeholder name, the entry keeps the
/// position of its first appearance and the value of its last capture
/// ("last write wins").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: ParamVec,
}

impl Parameters {
    /// An empty parameter set, as produced by a pattern without placeholders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: Arc<str>, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a HashMap for callers that want owned lookups.
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Owned `(name, value)` pairs in pattern order.
    #[must_use]
    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

impl<'a, const N: usize> PartialEq<[(&'a str, &'a str); N]> for Parameters {
    fn eq(&self, other: &[(&'a str, &'a str); N]) -> bool {
        self.len() == N && self.iter().zip(other.iter()).all(|(a, b)| a == *b)
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}
