//! Router core module - route table and resolution.

use arc_swap::ArcSwap;
use http::Method;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{RouteError, RouteNotFound};
use crate::matcher::{HttpMatcher, MatchedRoute, Matcher};
use crate::request::RouteRequest;
use crate::route::{Route, RouteSummary};
use crate::runtime_config::RouterConfig;

/// Ordered registry of concrete routes.
///
/// Registration appends (no dedup, no collision checks; overlaps are settled
/// at match time, first registered wins). The table lives in an `ArcSwap`:
/// each registration publishes a new route list together with the matcher
/// index derived from it, and each [`Router::resolve`] loads one such pair.
/// Concurrent resolutions therefore never see a half-built index; a
/// resolution racing a registration may or may not see the new route.
///
/// # Example
///
/// ```
/// use http::Method;
/// use routekit::{Route, Router};
///
/// let router = Router::new();
/// router
///     .register_routes([Route::get("/users/{id}", "show"), Route::get("/users", "list")])
///     .unwrap();
///
/// let matched = router.resolve(&Method::GET, "/users/42").unwrap();
/// assert_eq!(matched.param("id"), Some("42"));
/// assert!(router.resolve(&Method::DELETE, "/users/42").is_err());
/// ```
pub struct Router<M: Matcher = HttpMatcher> {
    table: ArcSwap<RouteTable<M>>,
    matcher: M,
    config: RouterConfig,
}

/// Route list plus the matcher index built over exactly those routes.
struct RouteTable<M> {
    routes: Arc<Vec<Arc<Route>>>,
    index: M,
}

impl Router<HttpMatcher> {
    /// Create an empty router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an empty router using [`HttpMatcher`] configured from `config`.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        let matcher = HttpMatcher::new().normalizing_methods(config.normalize_methods);
        Self::with_matcher(matcher, config)
    }
}

impl Default for Router<HttpMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Matcher> Router<M> {
    /// Create an empty router resolving through a custom matcher.
    pub fn with_matcher(matcher: M, config: RouterConfig) -> Self {
        let table = RouteTable {
            routes: Arc::new(Vec::new()),
            index: matcher.with_routes(&[]),
        };
        Self {
            table: ArcSwap::from_pointee(table),
            matcher,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Append one route.
    pub fn register_route(&self, route: Route) -> Result<&Self, RouteError> {
        self.register_routes(std::iter::once(route))
    }

    /// Append routes in order.
    ///
    /// With [`RouterConfig::strict_patterns`] every route of the batch is
    /// validated first; on error nothing is appended.
    pub fn register_routes<I>(&self, routes: I) -> Result<&Self, RouteError>
    where
        I: IntoIterator<Item = Route>,
    {
        let batch: Vec<Arc<Route>> = routes.into_iter().map(Arc::new).collect();
        if self.config.strict_patterns {
            for route in &batch {
                if let Err(err) = route.validate() {
                    warn!(path = %route.path(), error = %err, "Route rejected");
                    return Err(err);
                }
            }
        }
        if batch.is_empty() {
            return Ok(self);
        }

        self.table.rcu(|current| {
            let mut routes = Vec::with_capacity(current.routes.len() + batch.len());
            routes.extend(current.routes.iter().map(Arc::clone));
            routes.extend(batch.iter().map(Arc::clone));
            RouteTable {
                index: self.matcher.with_routes(&routes),
                routes: Arc::new(routes),
            }
        });

        info!(
            registered = batch.len(),
            routes_count = self.len(),
            "Routes registered"
        );
        Ok(self)
    }

    /// Resolve a request method + path to the first matching route.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<MatchedRoute, RouteNotFound> {
        let match_start = Instant::now();

        let snapshot = self.table.load();
        let result = snapshot.index.find(method, path);

        let match_duration = match_start.elapsed();

        match &result {
            Ok(matched) => {
                if match_duration > self.config.slow_match_threshold {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %matched.route().path(),
                        path_params = ?matched.parameters(),
                        duration_us = match_duration.as_micros(),
                        routes_count = snapshot.routes.len(),
                        "Slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route_pattern = %matched.route().path(),
                        path_params = ?matched.parameters(),
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            Err(_) => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    routes_count = snapshot.routes.len(),
                    "No route matched"
                );
            }
        }

        result
    }

    /// Resolve using the method and path of a request.
    pub fn resolve_request<R>(&self, request: &R) -> Result<MatchedRoute, RouteNotFound>
    where
        R: RouteRequest + ?Sized,
    {
        self.resolve(request.method(), request.path())
    }

    /// Snapshot of the registered routes, in registration order.
    #[must_use]
    pub fn routes(&self) -> Arc<Vec<Arc<Route>>> {
        Arc::clone(&self.table.load().routes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.load().routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.load().routes.is_empty()
    }

    /// Serializable description of every registered route.
    #[must_use]
    pub fn describe(&self) -> Vec<RouteSummary> {
        self.table
            .load()
            .routes
            .iter()
            .map(|route| route.summary())
            .collect()
    }

    /// Log the routing table at `info`, one event per route.
    pub fn dump_routes(&self) {
        let table = self.table.load();
        let routes = &table.routes;
        info!(routes_count = routes.len(), "Routing table");
        for route in routes.iter() {
            let methods: Vec<&str> = route.methods().iter().map(Method::as_str).collect();
            info!(
                methods = ?methods,
                path = %route.path(),
                action = %route.action(),
                name = route.name().unwrap_or(""),
                middlewares = route.middlewares().len(),
                "Route"
            );
        }
        debug!("Routing table dump complete");
    }
}

impl<M: Matcher> fmt::Debug for Router<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
