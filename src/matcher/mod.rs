//! # Matcher Module
//!
//! Resolves an incoming method + path to the first registered route that
//! accepts both.
//!
//! ## Algorithm
//!
//! 1. **Indexing**: [`HttpMatcher::with_routes`](Matcher::with_routes) puts
//!    every route into one bucket per declared method, keeping registration
//!    order. Buckets share the route `Arc`s, nothing is copied.
//! 2. **Matching**: [`Matcher::find`] scans the bucket for the request method
//!    (an unknown method is an empty bucket) and stops at the first route
//!    whose pattern matches the whole path.
//!
//! There is no specificity ranking. If `/users/{id}` and `/users/me` are both
//! registered for GET, whichever was registered first wins, so register the
//! more specific pattern first.

mod core;
#[cfg(test)]
mod tests;

pub use core::{HttpMatcher, MatchedRoute, Matcher};
