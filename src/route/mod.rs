//! # Route Module
//!
//! A [`Route`] is the immutable description of one endpoint: the HTTP methods
//! it accepts, its path pattern, an opaque handler reference ([`Action`]), an
//! optional name and the ordered list of middlewares ([`MiddlewareId`]) that
//! apply to it.
//!
//! ## Path patterns
//!
//! Paths are canonicalised on construction (one leading `/`, no trailing `/`
//! except for the root) and compiled once into an anchored regex:
//!
//! - `{name}` (with `name` matching `[A-Za-z0-9_]+`) captures one or more
//!   characters other than `/`
//! - every other character, including regex metacharacters, matches itself
//!
//! ## Derived routes
//!
//! Groups compose routes through [`Route::with_path_prefix`] and
//! [`Route::with_middlewares`]; both return a new route. Clones share the
//! compiled pattern, and a pattern is only recompiled when the path changes.

mod core;
mod pattern;

pub use core::{Action, Callable, MiddlewareId, Route, RouteSummary};
pub use pattern::{canonicalize_path, PathPattern};
