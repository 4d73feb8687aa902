//! Request adapter consumed by [`Router::resolve_request`](crate::router::Router::resolve_request).
//!
//! The router only needs a method token and an already URL-decoded path;
//! anything that can provide both can be routed.

use http::Method;

/// Source of the method and path used for routing.
pub trait RouteRequest {
    fn method(&self) -> &Method;
    /// Request path, without query string, starting with `/`.
    fn path(&self) -> &str;
}

impl<B> RouteRequest for http::Request<B> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn path(&self) -> &str {
        self.uri().path()
    }
}

impl RouteRequest for http::request::Parts {
    fn method(&self) -> &Method {
        &self.method
    }

    fn path(&self) -> &str {
        self.uri.path()
    }
}

impl RouteRequest for (Method, String) {
    fn method(&self) -> &Method {
        &self.0
    }

    fn path(&self) -> &str {
        &self.1
    }
}

impl RouteRequest for (Method, &str) {
    fn method(&self) -> &Method {
        &self.0
    }

    fn path(&self) -> &str {
        self.1
    }
}
