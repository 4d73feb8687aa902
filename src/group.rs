//! # Group Module
//!
//! A [`Group`] bundles routes and nested groups under a shared path prefix and
//! middleware list. [`Group::flatten`] resolves the whole tree into concrete
//! [`Route`]s:
//!
//! - prefixes concatenate, outer before inner
//! - middleware lists concatenate, outer before inner
//! - output order is depth-first, left-to-right, i.e. declaration order
//!
//! ```
//! use routekit::group::{Group, RouteEntry};
//! use routekit::route::{MiddlewareId, Route};
//!
//! let api = Group::of([
//!     RouteEntry::from(
//!         Group::of([Route::get("/users/{id}", "show_user")])
//!             .with_prefix("/v1")
//!             .with_middlewares([MiddlewareId::new("auth")]),
//!     ),
//!     RouteEntry::from(Route::get("/ping", "ping")),
//! ])
//! .with_prefix("/api")
//! .with_middlewares([MiddlewareId::new("cors")]);
//!
//! let routes = api.flatten();
//! assert_eq!(routes[0].path(), "/api/v1/users/{id}");
//! assert_eq!(routes[0].middlewares(), &[MiddlewareId::new("cors"), MiddlewareId::new("auth")]);
//! assert_eq!(routes[1].path(), "/api/ping");
//! ```

use tracing::trace;

use crate::route::{MiddlewareId, Route};

/// Either a concrete route or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEntry {
    Route(Route),
    Group(Group),
}

impl RouteEntry {
    /// Resolve into concrete routes. A route yields itself unchanged.
    #[must_use]
    pub fn flatten(&self) -> Vec<Route> {
        match self {
            RouteEntry::Route(route) => vec![route.clone()],
            RouteEntry::Group(group) => group.flatten(),
        }
    }
}

impl From<Route> for RouteEntry {
    fn from(route: Route) -> Self {
        RouteEntry::Route(route)
    }
}

impl From<Group> for RouteEntry {
    fn from(group: Group) -> Self {
        RouteEntry::Group(group)
    }
}

/// Immutable collection of routes and groups sharing a prefix and middlewares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    prefix: String,
    middlewares: Vec<MiddlewareId>,
    entries: Vec<RouteEntry>,
}

impl Group {
    /// An empty group with no prefix and no middlewares.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group over a fixed list of routes and/or groups.
    pub fn of<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RouteEntry>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Same group with a new path prefix.
    #[must_use]
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..self.clone()
        }
    }

    /// Same group with its middleware list replaced.
    #[must_use]
    pub fn with_middlewares<I>(&self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = MiddlewareId>,
    {
        Self {
            middlewares: middlewares.into_iter().collect(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn middlewares(&self) -> &[MiddlewareId] {
        &self.middlewares
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Resolve the group into concrete routes with prefix and middlewares
    /// applied at every nesting depth.
    ///
    /// A bare route gets this group's middlewares (replacing whatever it
    /// carried). A route coming out of a nested group already carries the
    /// nested group's composed middlewares and prefix; this group's
    /// middlewares go in front and its prefix is applied on top.
    #[must_use]
    pub fn flatten(&self) -> Vec<Route> {
        let mut routes = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match entry {
                RouteEntry::Route(route) => {
                    routes.push(
                        route
                            .with_middlewares(self.middlewares.iter().cloned())
                            .with_path_prefix(&self.prefix),
                    );
                }
                RouteEntry::Group(nested) => {
                    for route in nested.flatten() {
                        let middlewares = self
                            .middlewares
                            .iter()
                            .chain(route.middlewares())
                            .cloned()
                            .collect::<Vec<_>>();
                        routes.push(
                            route
                                .with_middlewares(middlewares)
                                .with_path_prefix(&self.prefix),
                        );
                    }
                }
            }
        }
        trace!(
            prefix = %self.prefix,
            middlewares = self.middlewares.len(),
            routes = routes.len(),
            "Group flattened"
        );
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn paths(routes: &[Route]) -> Vec<&str> {
        routes.iter().map(Route::path).collect()
    }

    #[test]
    fn test_of_creates_group_with_given_routes() {
        let group = Group::of([Route::get("/a", "a"), Route::get("/b", "b")]);
        assert_eq!(group.flatten().len(), 2);
        assert_eq!(group.entries().len(), 2);
    }

    #[test]
    fn test_with_prefix_returns_new_group() {
        let group = Group::new();
        let admin = group.with_prefix("/admin");
        assert_eq!(admin.prefix(), "/admin");
        assert_eq!(group.prefix(), "");
    }

    #[test]
    fn test_with_middlewares_returns_new_group() {
        let group = Group::new();
        let secured = group.with_middlewares([MiddlewareId::new("auth")]);
        assert_eq!(secured.middlewares(), &[MiddlewareId::new("auth")]);
        assert!(group.middlewares().is_empty());
    }

    #[test]
    fn test_group_prefix_is_applied() {
        let group = Group::of([Route::get("/ping", "ping")]).with_prefix("/api");
        let routes = group.flatten();
        assert_eq!(paths(&routes), vec!["/api/ping"]);
        assert_eq!(routes[0].methods(), &[Method::GET]);
    }

    #[test]
    fn test_bare_route_middlewares_are_replaced() {
        let route = Route::get("/x", "x").with_middlewares([MiddlewareId::new("own")]);
        let group = Group::of([route]).with_middlewares([MiddlewareId::new("group")]);
        assert_eq!(group.flatten()[0].middlewares(), &[MiddlewareId::new("group")]);
    }

    #[test]
    fn test_nested_middlewares_outer_first() {
        let inner = Group::of([Route::get("/r", "r")]).with_middlewares([MiddlewareId::new("B")]);
        let outer = Group::of([inner]).with_middlewares([MiddlewareId::new("A")]);
        assert_eq!(
            outer.flatten()[0].middlewares(),
            &[MiddlewareId::new("A"), MiddlewareId::new("B")]
        );
    }

    #[test]
    fn test_three_levels_compose_prefix_and_middlewares() {
        let leaf = Group::of([Route::get("/{id}", "show"), Route::delete("/{id}", "destroy")])
            .with_prefix("/users")
            .with_middlewares([MiddlewareId::new("C")]);
        let mid = Group::of(vec![
            RouteEntry::from(leaf),
            RouteEntry::from(Route::get("/status", "status")),
        ])
        .with_prefix("/v1")
        .with_middlewares([MiddlewareId::new("B")]);
        let top = Group::of([mid])
            .with_prefix("/api")
            .with_middlewares([MiddlewareId::new("A")]);

        let routes = top.flatten();
        assert_eq!(
            paths(&routes),
            vec!["/api/v1/users/{id}", "/api/v1/users/{id}", "/api/v1/status"]
        );
        let abc = [MiddlewareId::new("A"), MiddlewareId::new("B"), MiddlewareId::new("C")];
        assert_eq!(routes[0].middlewares(), &abc);
        assert_eq!(routes[1].middlewares(), &abc);
        assert_eq!(
            routes[2].middlewares(),
            &[MiddlewareId::new("A"), MiddlewareId::new("B")]
        );
        assert_eq!(routes[1].methods(), &[Method::DELETE]);
    }

    #[test]
    fn test_flatten_keeps_declaration_order() {
        let group = Group::of(vec![
            RouteEntry::from(Route::get("/1", "1")),
            Group::of([Route::get("/2", "2"), Route::get("/3", "3")]).into(),
            Route::get("/4", "4").into(),
            Group::of([Group::of([Route::get("/5", "5")])]).into(),
        ]);
        assert_eq!(paths(&group.flatten()), vec!["/1", "/2", "/3", "/4", "/5"]);
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let group = Group::of([Route::get("/a/{x}", "a"), Route::post("/b", "b")])
            .with_prefix("/p")
            .with_middlewares([MiddlewareId::new("m")]);
        assert_eq!(group.flatten(), group.flatten());
    }

    #[test]
    fn test_empty_wrapper_group_is_transparent() {
        let inner = Group::of(vec![
            RouteEntry::from(Route::get("/a", "a")),
            Group::of([Route::post("/b/{id}", "b")])
                .with_prefix("/nested")
                .with_middlewares([MiddlewareId::new("n")])
                .into(),
        ])
        .with_prefix("/api")
        .with_middlewares([MiddlewareId::new("m")]);
        let wrapped = Group::of([inner.clone()]);
        assert_eq!(wrapped.flatten(), inner.flatten());
    }

    #[test]
    fn test_route_entry_flatten() {
        let route = Route::get("/solo", "solo");
        assert_eq!(RouteEntry::from(route.clone()).flatten(), vec![route]);
    }

    #[test]
    fn test_source_entries_untouched() {
        let route = Route::get("/ping", "ping");
        let group = Group::of([route.clone()])
            .with_prefix("/api")
            .with_middlewares([MiddlewareId::new("m")]);
        assert_eq!(group.flatten().len(), 1);
        assert_eq!(group.entries(), &[RouteEntry::Route(route)]);
    }

    #[test]
    fn test_grouping_collapses_interior_slashes() {
        let bare = Route::get("/a//b", "ab");
        let grouped = Group::of([bare.clone()]).flatten();

        assert_eq!(bare.path(), "/a//b");
        assert_eq!(paths(&grouped), vec!["/a/b"]);
        assert!(grouped[0].match_path("/a/b").is_some());
        assert!(grouped[0].match_path("/a//b").is_none());
    }
}
