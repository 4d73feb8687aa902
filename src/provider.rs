//! Route providers and the registry that bulk-registers them.
//!
//! A provider is any component that contributes routes, typically one per
//! feature module. The registry collects providers and, on
//! [`RouteProviderRegistry::register`], flattens everything they return
//! (groups included) into a single ordered batch for the router.
//!
//! ```
//! use http::Method;
//! use routekit::{Group, Route, RouteEntry, RouteProviderRegistry, Router};
//! use std::sync::Arc;
//!
//! let router = Arc::new(Router::new());
//! let registry = RouteProviderRegistry::new(Arc::clone(&router))
//!     .with_provider(|| vec![RouteEntry::from(Route::get("/health", "health"))])
//!     .with_provider(|| {
//!         vec![RouteEntry::from(
//!             Group::of([Route::get("/users", "list")]).with_prefix("/api"),
//!         )]
//!     });
//!
//! registry.register().unwrap();
//! assert!(router.resolve(&Method::GET, "/api/users").is_ok());
//! ```

use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::error::RouteError;
use crate::group::RouteEntry;
use crate::matcher::{HttpMatcher, Matcher};
use crate::route::Route;
use crate::router::Router;

/// Component that contributes routes and groups.
pub trait RouteProvider: Send + Sync {
    fn routes(&self) -> Vec<RouteEntry>;
}

impl<F> RouteProvider for F
where
    F: Fn() -> Vec<RouteEntry> + Send + Sync,
{
    fn routes(&self) -> Vec<RouteEntry> {
        self()
    }
}

/// Ordered collection of route providers bound to one router.
///
/// `with_provider` returns a new registry and leaves the receiver unchanged;
/// both share the same router.
pub struct RouteProviderRegistry<M: Matcher = HttpMatcher> {
    router: Arc<Router<M>>,
    providers: Vec<Arc<dyn RouteProvider>>,
}

impl<M: Matcher> RouteProviderRegistry<M> {
    pub fn new(router: Arc<Router<M>>) -> Self {
        Self {
            router,
            providers: Vec::new(),
        }
    }

    /// New registry with `provider` appended.
    #[must_use]
    pub fn with_provider<P>(&self, provider: P) -> Self
    where
        P: RouteProvider + 'static,
    {
        self.with_shared_provider(Arc::new(provider))
    }

    /// New registry with an already shared provider appended.
    #[must_use]
    pub fn with_shared_provider(&self, provider: Arc<dyn RouteProvider>) -> Self {
        let mut next = self.clone();
        next.providers.push(provider);
        next
    }

    /// Providers in insertion order.
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn RouteProvider>] {
        &self.providers
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router<M>> {
        &self.router
    }

    /// Flatten every provider's entries, provider by provider, in order.
    #[must_use]
    pub fn collect_routes(&self) -> Vec<Route> {
        self.providers
            .iter()
            .flat_map(|provider| provider.routes())
            .flat_map(|entry| entry.flatten())
            .collect()
    }

    /// Register all collected routes with the router in one batch.
    pub fn register(&self) -> Result<&Self, RouteError> {
        let routes = self.collect_routes();
        let count = routes.len();
        self.router.register_routes(routes)?;
        info!(
            providers = self.providers.len(),
            routes = count,
            "Route providers registered"
        );
        Ok(self)
    }
}

impl<M: Matcher> Clone for RouteProviderRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            providers: self.providers.clone(),
        }
    }
}

impl<M: Matcher> fmt::Debug for RouteProviderRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteProviderRegistry")
            .field("providers", &self.providers.len())
            .field("routes", &self.router.len())
            .finish()
    }
}
