use http::Method;
use std::fmt;

/// No registered route accepts both the request method and path.
///
/// Returned by [`Router::resolve`](crate::router::Router::resolve) and
/// [`Matcher::find`](crate::matcher::Matcher::find). Upstream code usually maps
/// it to a 404 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNotFound {
    /// The method of the request that failed to match
    pub method: Method,
    /// The path of the request that failed to match
    pub path: String,
}

impl RouteNotFound {
    pub(crate) fn new(method: &Method, path: &str) -> Self {
        Self {
            method: method.clone(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for RouteNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route not found: {} {}", self.method, self.path)
    }
}

impl std::error::Error for RouteNotFound {}

/// Route registration error
///
/// Only raised when the router runs with
/// [`RouterConfig::strict_patterns`](crate::runtime_config::RouterConfig::strict_patterns)
/// enabled. In the default lenient mode such routes are accepted and either
/// never match (invalid pattern) or keep the last captured value (duplicate
/// placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The path pattern could not be compiled into a matcher
    InvalidPattern {
        /// The canonical route path
        path: String,
        /// Compiler message
        reason: String,
    },
    /// The same placeholder name appears more than once in one pattern
    DuplicateParameter {
        /// The canonical route path
        path: String,
        /// The repeated placeholder name
        name: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidPattern { path, reason } => {
                write!(f, "Invalid route pattern '{}': {}", path, reason)
            }
            RouteError::DuplicateParameter { path, name } => {
                write!(
                    f,
                    "Route pattern '{}' declares placeholder '{{{}}}' more than once",
                    path, name
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_not_found_message_names_request() {
        let err = RouteNotFound::new(&Method::DELETE, "/users/42");
        assert_eq!(err.to_string(), "Route not found: DELETE /users/42");
    }

    #[test]
    fn test_duplicate_parameter_message() {
        let err = RouteError::DuplicateParameter {
            path: "/a/{id}/b/{id}".to_string(),
            name: "id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Route pattern '/a/{id}/b/{id}' declares placeholder '{id}' more than once"
        );
    }
}
