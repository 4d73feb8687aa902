//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime
//! behavior.
//!
//! ## Environment Variables
//!
//! ### `ROUTEKIT_STRICT_PATTERNS`
//!
//! Reject routes at registration when their pattern cannot be compiled or
//! declares the same placeholder twice (`/org/{id}/user/{id}`).
//!
//! Default: `false` (such routes are accepted; an invalid pattern never
//! matches and a repeated placeholder keeps its last captured value)
//!
//! ### `ROUTEKIT_NORMALIZE_METHODS`
//!
//! Uppercase method tokens both when routes are indexed and when requests are
//! looked up, so `get` and `GET` are the same method.
//!
//! Default: `false` (method tokens are matched exactly as supplied)
//!
//! ### `ROUTEKIT_SLOW_MATCH_US`
//!
//! Resolutions slower than this many microseconds are logged at `warn`
//! instead of `info`.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use routekit::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Strict patterns: {}", config.strict_patterns);
//! ```
//!
//! ## Example Configuration
//!
//! ```bash
//! export ROUTEKIT_STRICT_PATTERNS=true
//! export ROUTEKIT_SLOW_MATCH_US=250
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Router configuration loaded from environment variables.
///
/// Load this at startup using [`RouterConfig::from_env()`], or build it in
/// code starting from [`RouterConfig::default()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Reject invalid or duplicate-placeholder patterns at registration
    pub strict_patterns: bool,
    /// Uppercase method tokens at indexing and lookup
    pub normalize_methods: bool,
    /// Resolutions slower than this are logged at `warn`
    pub slow_match_threshold: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_patterns: false,
            normalize_methods: false,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|val| parse_bool(&val))
                .unwrap_or(default)
        };
        let slow_match_threshold = lookup("ROUTEKIT_SLOW_MATCH_US")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(Duration::from_micros)
            .unwrap_or(defaults.slow_match_threshold);

        RouterConfig {
            strict_patterns: flag("ROUTEKIT_STRICT_PATTERNS", defaults.strict_patterns),
            normalize_methods: flag("ROUTEKIT_NORMALIZE_METHODS", defaults.normalize_methods),
            slow_match_threshold,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_patterns = strict;
        self
    }

    #[must_use]
    pub fn normalize_methods(mut self, normalize: bool) -> Self {
        self.normalize_methods = normalize;
        self
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
