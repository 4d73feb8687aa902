use http::Method;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use super::pattern::{canonicalize_path, collapse_slashes, PathPattern};
use crate::error::RouteError;
use crate::params::Parameters;

/// Type-erased function reference held by [`Action::Callable`].
///
/// The router never calls it. Callers recover the concrete value with
/// [`Callable::downcast_ref`].
#[derive(Clone)]
pub struct Callable(Arc<dyn Any + Send + Sync>);

impl Callable {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Handler reference attached to a route. Opaque to the router.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Plain string identifier, e.g. a handler name
    Named(String),
    /// Two-part controller + method reference
    Controller { controller: String, method: String },
    /// Function reference
    Callable(Callable),
}

impl Action {
    /// Wrap any function or value as a [`Action::Callable`].
    pub fn callable<T: Any + Send + Sync>(value: T) -> Self {
        Action::Callable(Callable::new(value))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Named(name) => f.write_str(name),
            Action::Controller { controller, method } => write!(f, "{}@{}", controller, method),
            Action::Callable(_) => f.write_str("<callable>"),
        }
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::Named(name.to_string())
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action::Named(name)
    }
}

impl From<(&str, &str)> for Action {
    fn from((controller, method): (&str, &str)) -> Self {
        Action::Controller {
            controller: controller.to_string(),
            method: method.to_string(),
        }
    }
}

impl From<Callable> for Action {
    fn from(callable: Callable) -> Self {
        Action::Callable(callable)
    }
}

/// Opaque middleware identifier attached to a route.
///
/// Order and duplicates are preserved exactly as declared; the router never
/// resolves or runs them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MiddlewareId(Arc<str>);

impl MiddlewareId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Identify a middleware by its type, e.g. `MiddlewareId::of::<AuthMiddleware>()`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self(Arc::from(std::any::type_name::<T>()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiddlewareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MiddlewareId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MiddlewareId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// Serializable description of a route, for logging and introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub methods: Vec<String>,
    pub path: String,
    pub name: Option<String>,
    pub action: String,
    pub middlewares: Vec<String>,
}

/// A single endpoint: methods, path pattern, handler reference and the
/// middlewares that apply to it.
///
/// Routes are values. [`Route::with_path_prefix`] and
/// [`Route::with_middlewares`] return new routes and leave the receiver
/// untouched; only the name is set in place.
///
/// # Example
///
/// ```
/// use routekit::route::Route;
///
/// let route = Route::get("/users/{id}", "show_user");
/// let params = route.match_path("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(route.match_path("/users").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    methods: Vec<Method>,
    path: String,
    pattern: Arc<PathPattern>,
    action: Action,
    name: Option<String>,
    middlewares: Vec<MiddlewareId>,
}

impl Route {
    /// Create a route for the given methods.
    ///
    /// The path is canonicalised (see
    /// [`canonicalize_path`](crate::route::canonicalize_path)) and compiled
    /// immediately.
    pub fn new<I>(methods: I, path: &str, action: impl Into<Action>) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        let path = canonicalize_path(path);
        let pattern = compile_pattern(&path);
        Self {
            methods: methods.into_iter().collect(),
            path,
            pattern,
            action: action.into(),
            name: None,
            middlewares: Vec::new(),
        }
    }

    pub fn get(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::GET], path, action)
    }

    pub fn post(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::POST], path, action)
    }

    pub fn put(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::PUT], path, action)
    }

    pub fn patch(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::PATCH], path, action)
    }

    pub fn delete(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::DELETE], path, action)
    }

    pub fn head(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::HEAD], path, action)
    }

    pub fn options(path: &str, action: impl Into<Action>) -> Self {
        Self::new([Method::OPTIONS], path, action)
    }

    /// Route accepting every standard method (GET, POST, PUT, PATCH, DELETE,
    /// HEAD, OPTIONS, TRACE, CONNECT).
    pub fn any(path: &str, action: impl Into<Action>) -> Self {
        Self::new(
            [
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::HEAD,
                Method::OPTIONS,
                Method::TRACE,
                Method::CONNECT,
            ],
            path,
            action,
        )
    }

    /// Set the route name in place.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Chaining form of [`Route::set_name`].
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The canonical path pattern, e.g. `/users/{id}`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    #[must_use]
    pub fn middlewares(&self) -> &[MiddlewareId] {
        &self.middlewares
    }

    /// Match a request path against this route's pattern.
    ///
    /// `None` means no match. A successful match on a pattern without
    /// placeholders returns an empty parameter set.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Parameters> {
        self.pattern.captures(path)
    }

    /// Same route with `prefix` prepended to the path.
    ///
    /// Slash runs created by the concatenation are collapsed and the result is
    /// canonicalised, so `"/api/"` + `"/users"` gives `/api/users`.
    #[must_use]
    pub fn with_path_prefix(&self, prefix: &str) -> Self {
        let mut joined = String::with_capacity(prefix.len() + self.path.len());
        joined.push_str(prefix);
        joined.push_str(&self.path);
        let path = canonicalize_path(&collapse_slashes(&joined));

        let pattern = if path == self.path {
            Arc::clone(&self.pattern)
        } else {
            compile_pattern(&path)
        };
        Self {
            path,
            pattern,
            ..self.clone()
        }
    }

    /// Same route with its middleware list replaced (not appended).
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

    /// Check that the pattern compiled and declares each placeholder once.
    pub fn validate(&self) -> Result<(), RouteError> {
        if let Some(reason) = self.pattern.error() {
            return Err(RouteError::InvalidPattern {
                path: self.path.clone(),
                reason: reason.to_string(),
            });
        }
        if let Some(name) = self.pattern.duplicate_param() {
            return Err(RouteError::DuplicateParameter {
                path: self.path.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            methods: self.methods.iter().map(|m| m.as_str().to_string()).collect(),
            path: self.path.clone(),
            name: self.name.clone(),
            action: self.action.to_string(),
            middlewares: self.middlewares.iter().map(|m| m.as_str().to_string()).collect(),
        }
    }
}

/// Routes compare by content; the compiled pattern is derived from the path.
impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.methods == other.methods
            && self.path == other.path
            && self.action == other.action
            && self.name == other.name
            && self.middlewares == other.middlewares
    }
}

fn compile_pattern(path: &str) -> Arc<PathPattern> {
    let pattern = PathPattern::compile(path);
    if let Some(reason) = pattern.error() {
        warn!(path = %path, error = %reason, "Route pattern failed to compile; route will never match");
    }
    Arc::new(pattern)
}
