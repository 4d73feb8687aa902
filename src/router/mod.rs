//! # Router Module
//!
//! The router holds the ordered table of concrete routes and resolves
//! incoming requests against it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Appending routes in registration order (optionally validating them first)
//! - Resolving a method + path to the first matching route
//! - Logging every resolution with its duration
//! - Describing the registered table for diagnostics
//!
//! ## Architecture
//!
//! Matching itself is delegated to a [`Matcher`](crate::matcher::Matcher).
//! On every registration the router asks its base matcher for a derived
//! matcher knowing exactly the new route list and publishes both together.
//! A resolution loads the current pair and queries that matcher. The base
//! matcher is never mutated, so resolutions running concurrently with
//! registrations always work on a complete snapshot.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routekit::{Group, Route, Router};
//!
//! let router = Router::new();
//! let api = Group::of([Route::get("/status", "status")]).with_prefix("/api");
//! router.register_routes(api.flatten()).unwrap();
//!
//! let matched = router.resolve(&Method::GET, "/api/status").unwrap();
//! assert_eq!(matched.route().path(), "/api/status");
//! ```

mod core;

pub use core::Router;
