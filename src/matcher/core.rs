//! Matcher core module - hot path for request matching.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::RouteNotFound;
use crate::params::Parameters;
use crate::route::{Action, MiddlewareId, Route};

/// Result of successfully matching a request to a route.
///
/// Only produced by a successful [`Route::match_path`]; see
/// [`MatchedRoute::try_match`].
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    route: Arc<Route>,
    parameters: Parameters,
}

impl MatchedRoute {
    /// Match `path` against `route`, producing a `MatchedRoute` on success.
    #[must_use]
    pub fn try_match(route: &Arc<Route>, path: &str) -> Option<Self> {
        route.match_path(path).map(|parameters| Self {
            route: Arc::clone(route),
            parameters,
        })
    }

    /// The matched route (same allocation as the registered one)
    #[must_use]
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Path parameters in pattern order, e.g. `{id}` → `("id", "123")`
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        self.route.action()
    }

    #[must_use]
    pub fn middlewares(&self) -> &[MiddlewareId] {
        self.route.middlewares()
    }

    #[must_use]
    pub fn into_parts(self) -> (Arc<Route>, Parameters) {
        (self.route, self.parameters)
    }
}

/// Resolves a method + path against a set of routes.
///
/// Implementations are immutable: [`Matcher::with_routes`] derives a new
/// matcher and leaves the receiver as it was, so a router can keep one base
/// matcher and derive a fresh one for each resolution.
pub trait Matcher: Send + Sync {
    /// Derive a matcher that also knows `routes`, in the given order.
    fn with_routes(&self, routes: &[Arc<Route>]) -> Self
    where
        Self: Sized;

    /// Find the route for `method` + `path`.
    fn find(&self, method: &Method, path: &str) -> Result<MatchedRoute, RouteNotFound>;
}

/// Method-indexed, first-match-wins matcher.
///
/// Routes are bucketed per method in registration order; a route declaring N
/// methods sits in N buckets as the same `Arc`. Matching scans the request
/// method's bucket and returns the first route whose pattern matches, so when
/// several patterns overlap the one registered first wins.
#[derive(Debug, Clone, Default)]
pub struct HttpMatcher {
    buckets: HashMap<Method, Vec<Arc<Route>>>,
    normalize_methods: bool,
}

impl HttpMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uppercase method tokens when indexing and when looking up, so `get`
    /// and `GET` share a bucket. Off by default.
    #[must_use]
    pub fn normalizing_methods(mut self, normalize: bool) -> Self {
        self.normalize_methods = normalize;
        self
    }

    /// Routes accepting `method`, in registration order.
    #[must_use]
    pub fn bucket(&self, method: &Method) -> &[Arc<Route>] {
        self.buckets
            .get(&*self.key(method))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Methods that have at least one route.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.buckets.keys()
    }

    fn key<'a>(&self, method: &'a Method) -> Cow<'a, Method> {
        if !self.normalize_methods {
            return Cow::Borrowed(method);
        }
        let token = method.as_str();
        if !token.bytes().any(|b| b.is_ascii_lowercase()) {
            return Cow::Borrowed(method);
        }
        match Method::from_bytes(token.to_ascii_uppercase().as_bytes()) {
            Ok(upper) => Cow::Owned(upper),
            Err(_) => Cow::Borrowed(method),
        }
    }
}

impl Matcher for HttpMatcher {
    fn with_routes(&self, routes: &[Arc<Route>]) -> Self {
        let mut derived = self.clone();
        for route in routes {
            for method in route.methods() {
                let key = derived.key(method).into_owned();
                derived
                    .buckets
                    .entry(key)
                    .or_default()
                    .push(Arc::clone(route));
            }
        }
        derived
    }

    fn find(&self, method: &Method, path: &str) -> Result<MatchedRoute, RouteNotFound> {
        let bucket = self.bucket(method);
        debug!(
            method = %method,
            path = %path,
            candidates = bucket.len(),
            "Route match attempt"
        );

        bucket
            .iter()
            .find_map(|route| MatchedRoute::try_match(route, path))
            .ok_or_else(|| RouteNotFound::new(method, path))
    }
}
