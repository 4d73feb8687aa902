//! # routekit
//!
//! **routekit** is the request-routing core of a web framework: it maps an
//! incoming HTTP method and path to a registered route, extracts the named
//! path parameters and hands back the route's opaque action together with
//! its middleware identifiers. Dispatching, responses and middleware
//! execution belong to the caller.
//!
//! ## Architecture
//!
//! - **[`route`]** - the [`Route`] value type, path canonicalisation and
//!   placeholder pattern compilation
//! - **[`group`]** - [`Group`] trees sharing a path prefix and middlewares,
//!   flattened into concrete routes
//! - **[`matcher`]** - the [`Matcher`] seam and the method-indexed,
//!   first-match-wins [`HttpMatcher`]
//! - **[`router`]** - the [`Router`] facade: ordered registration and
//!   resolution over lock-free snapshots
//! - **[`provider`]** - [`RouteProvider`]s and the
//!   [`RouteProviderRegistry`] that bulk-registers them
//! - **[`runtime_config`]** - [`RouterConfig`] loaded from `ROUTEKIT_*`
//!   environment variables
//! - **[`logging`]** - `tracing-subscriber` initialisation
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use routekit::{Group, MiddlewareId, Route, Router};
//!
//! let router = Router::new();
//! let admin = Group::of([Route::get("/users/{id}", "admin_show_user")])
//!     .with_prefix("/admin")
//!     .with_middlewares([MiddlewareId::new("auth")]);
//!
//! router.register_routes(admin.flatten()).unwrap();
//! router.register_route(Route::get("/health", "health")).unwrap();
//!
//! let matched = router.resolve(&Method::GET, "/admin/users/7").unwrap();
//! assert_eq!(matched.action().to_string(), "admin_show_user");
//! assert_eq!(matched.param("id"), Some("7"));
//! assert_eq!(matched.middlewares(), &[MiddlewareId::new("auth")]);
//!
//! let missing = router.resolve(&Method::POST, "/health").unwrap_err();
//! assert_eq!(missing.to_string(), "Route not found: POST /health");
//! ```
//!
//! ## Matching Rules
//!
//! - Route paths are canonicalised: trailing slashes are stripped and a
//!   single leading slash is ensured. Request paths are matched as given
//! - `{name}` placeholders match one non-empty segment
//! - Within a method, the first registered matching route wins
//! - Method tokens are compared exactly unless
//!   `RouterConfig::normalize_methods` is enabled

pub mod error;
pub mod group;
pub mod logging;
pub mod matcher;
pub mod params;
pub mod provider;
pub mod request;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use error::{RouteError, RouteNotFound};
pub use group::{Group, RouteEntry};
pub use matcher::{HttpMatcher, MatchedRoute, Matcher};
pub use params::Parameters;
pub use provider::{RouteProvider, RouteProviderRegistry};
pub use request::RouteRequest;
pub use route::{Action, Callable, MiddlewareId, Route, RouteSummary};
pub use router::Router;
pub use runtime_config::RouterConfig;
