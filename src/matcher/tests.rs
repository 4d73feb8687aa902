use super::{HttpMatcher, MatchedRoute, Matcher};
use crate::route::Route;
use http::Method;
use std::sync::Arc;

fn routes(list: Vec<Route>) -> Vec<Arc<Route>> {
    list.into_iter().map(Arc::new).collect()
}

#[test]
fn test_match_returns_matched_route() {
    let table = routes(vec![Route::get("/test/{id}", "show")]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let matched = matcher.find(&Method::GET, "/test/123").unwrap();
    assert_eq!(matched.parameters(), &[("id", "123")]);
    assert!(Arc::ptr_eq(matched.route(), &table[0]));
    assert_eq!(matched.param("id"), Some("123"));
}

#[test]
fn test_match_fails_if_no_route_found() {
    let table = routes(vec![Route::post("/not-found", "create")]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let err = matcher.find(&Method::GET, "/not-found").unwrap_err();
    assert_eq!(err.method, Method::GET);
    assert_eq!(err.path, "/not-found");
}

#[test]
fn test_unknown_method_is_empty_bucket() {
    let table = routes(vec![Route::get("/x", "x")]);
    let matcher = HttpMatcher::new().with_routes(&table);
    let purge = Method::from_bytes(b"PURGE").unwrap();

    assert!(matcher.bucket(&purge).is_empty());
    assert!(matcher.find(&purge, "/x").is_err());
}

#[test]
fn test_first_registered_wins() {
    let table = routes(vec![Route::get("/x", "first"), Route::get("/x", "second")]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let matched = matcher.find(&Method::GET, "/x").unwrap();
    assert!(Arc::ptr_eq(matched.route(), &table[0]));
    assert_eq!(matched.action().to_string(), "first");
}

#[test]
fn test_general_pattern_registered_first_shadows_specific() {
    let table = routes(vec![
        Route::get("/users/{id}", "show"),
        Route::get("/users/me", "me"),
    ]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let matched = matcher.find(&Method::GET, "/users/me").unwrap();
    assert_eq!(matched.action().to_string(), "show");
    assert_eq!(matched.param("id"), Some("me"));
}

#[test]
fn test_multi_method_route_shares_identity_across_buckets() {
    let table = routes(vec![
        Route::new([Method::GET, Method::HEAD], "/docs", "docs"),
        Route::head("/other", "other"),
    ]);
    let matcher = HttpMatcher::new().with_routes(&table);

    assert_eq!(matcher.bucket(&Method::GET).len(), 1);
    assert_eq!(matcher.bucket(&Method::HEAD).len(), 2);
    assert!(Arc::ptr_eq(
        &matcher.bucket(&Method::GET)[0],
        &matcher.bucket(&Method::HEAD)[0]
    ));
    assert!(Arc::ptr_eq(&matcher.bucket(&Method::HEAD)[1], &table[1]));
}

#[test]
fn test_buckets_keep_registration_order() {
    let table = routes(vec![
        Route::get("/a", "a"),
        Route::post("/b", "b"),
        Route::get("/c", "c"),
        Route::new([Method::POST, Method::GET], "/d", "d"),
    ]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let get: Vec<&str> = matcher.bucket(&Method::GET).iter().map(|r| r.path()).collect();
    let post: Vec<&str> = matcher.bucket(&Method::POST).iter().map(|r| r.path()).collect();
    assert_eq!(get, vec!["/a", "/c", "/d"]);
    assert_eq!(post, vec!["/b", "/d"]);
}

#[test]
fn test_with_routes_leaves_receiver_untouched() {
    let base = HttpMatcher::new();
    let derived = base.with_routes(&routes(vec![Route::get("/x", "x")]));

    assert!(base.bucket(&Method::GET).is_empty());
    assert_eq!(derived.bucket(&Method::GET).len(), 1);

    let extended = derived.with_routes(&routes(vec![Route::get("/y", "y")]));
    assert_eq!(extended.bucket(&Method::GET).len(), 2);
    assert_eq!(derived.bucket(&Method::GET).len(), 1);
}

#[test]
fn test_method_tokens_are_case_sensitive_by_default() {
    let lower = Method::from_bytes(b"get").unwrap();
    let table = routes(vec![Route::get("/x", "x")]);
    let matcher = HttpMatcher::new().with_routes(&table);

    assert!(matcher.find(&lower, "/x").is_err());
    assert!(matcher.find(&Method::GET, "/x").is_ok());
}

#[test]
fn test_method_normalization_applies_to_index_and_lookup() {
    let lower_get = Method::from_bytes(b"get").unwrap();
    let lower_purge = Method::from_bytes(b"purge").unwrap();
    let table = routes(vec![
        Route::new([lower_purge], "/cache", "purge"),
        Route::get("/x", "x"),
    ]);
    let matcher = HttpMatcher::new().normalizing_methods(true).with_routes(&table);

    assert!(matcher.find(&lower_get, "/x").is_ok());
    assert!(matcher.find(&Method::from_bytes(b"PURGE").unwrap(), "/cache").is_ok());
    assert!(matcher.find(&Method::from_bytes(b"Purge").unwrap(), "/cache").is_ok());
}

#[test]
fn test_users_example() {
    let table = routes(vec![
        Route::get("/users/{id}", "show"),
        Route::get("/users", "list"),
    ]);
    let matcher = HttpMatcher::new().with_routes(&table);

    let list = matcher.find(&Method::GET, "/users").unwrap();
    assert_eq!(list.action().to_string(), "list");
    assert!(list.parameters().is_empty());

    let show = matcher.find(&Method::GET, "/users/42").unwrap();
    assert_eq!(show.action().to_string(), "show");
    assert_eq!(show.parameters(), &[("id", "42")]);

    assert!(matcher.find(&Method::DELETE, "/users/42").is_err());
}

#[test]
fn test_try_match_only_on_success() {
    let route = Arc::new(Route::get("/a/{b}", "ab"));
    assert!(MatchedRoute::try_match(&route, "/a").is_none());

    let matched = MatchedRoute::try_match(&route, "/a/1").unwrap();
    let (matched_route, params) = matched.into_parts();
    assert!(Arc::ptr_eq(&matched_route, &route));
    assert_eq!(params.get("b"), Some("1"));
}
