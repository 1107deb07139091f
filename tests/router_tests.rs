//! End-to-end registration and resolution behavior.

use std::str::FromStr;

use tsuro::{Error, Method, Router};

#[test]
fn literal_routes_round_trip() {
    let router: Router<&str> = Router::new().get("/about", "about");

    let hit = router.resolve(Method::Get, "/about").unwrap();
    assert_eq!(*hit.action(), "about");
    assert!(hit.params().is_empty());

    assert!(router.resolve(Method::Get, "/aboutx").is_none());
    assert!(router.resolve(Method::Get, "/abou").is_none());
}

#[test]
fn methods_do_not_bleed_into_each_other() {
    let router: Router<&str> = Router::new()
        .get("/users/{id}", "get")
        .post("/users/{id}", "post");

    assert_eq!(*router.resolve(Method::Get, "/users/1").unwrap().action(), "get");
    assert_eq!(*router.resolve(Method::Post, "/users/1").unwrap().action(), "post");
    assert!(router.resolve(Method::Delete, "/users/1").is_none());
}

#[test]
fn optional_segments_expand_into_every_prefix() {
    let router: Router<&str> = Router::new().get("/a[/b[/c]]", "a");

    assert!(router.resolve(Method::Get, "/a").is_some());
    assert!(router.resolve(Method::Get, "/a/b").is_some());
    assert!(router.resolve(Method::Get, "/a/b/c").is_some());
    assert!(router.resolve(Method::Get, "/a/c").is_none());
}

#[test]
fn optional_segments_may_carry_placeholders() {
    let router: Router<&str> = Router::new().get("/posts/{id:int}[/rev/{rev:int}]", "posts");

    let hit = router.resolve(Method::Get, "/posts/7").unwrap();
    assert_eq!(hit.param("id"), Some("7"));
    assert_eq!(hit.param("rev"), None);

    let hit = router.resolve(Method::Get, "/posts/7/rev/3").unwrap();
    assert_eq!(hit.param("id"), Some("7"));
    assert_eq!(hit.param("rev"), Some("3"));
}

#[test]
fn unclosed_optional_segments_fail_registration() {
    let mut router: Router<&str> = Router::new();
    assert!(matches!(
        router.register(Method::Get, "/a[/b", "a"),
        Err(Error::UnclosedOptionalSegments)
    ));
}

#[test]
fn mid_pattern_optional_segments_fail_registration() {
    let mut router: Router<&str> = Router::new();
    assert!(matches!(
        router.register(Method::Get, "/a[/b]/c", "a"),
        Err(Error::OptionalSegmentInMiddle)
    ));
}

#[test]
fn empty_optional_segments_fail_registration() {
    let mut router: Router<&str> = Router::new();
    assert!(matches!(
        router.register(Method::Get, "/a[[/b]]", "a"),
        Err(Error::EmptyOptionalSegment)
    ));
}

#[test]
fn malformed_inline_sub_patterns_fail_registration() {
    let mut router: Router<&str> = Router::new();
    assert!(matches!(
        router.register(Method::Get, "/x/{id:[0-9}", "x"),
        Err(Error::InvalidPlaceholder { .. })
    ));
}

#[test]
fn a_failed_registration_leaves_the_router_usable() {
    let mut router: Router<&str> = Router::new();
    router.register(Method::Get, "/ok/{id}", "ok").unwrap();
    router.register(Method::Get, "/bad[/x", "bad").unwrap_err();

    assert_eq!(*router.resolve(Method::Get, "/ok/1").unwrap().action(), "ok");
}

#[test]
fn typed_placeholders_constrain_their_values() {
    let router: Router<&str> = Router::new().get("/user/{id:int}", "user");

    let hit = router.resolve(Method::Get, "/user/42").unwrap();
    assert_eq!(*hit.action(), "user");
    assert_eq!(hit.params(), &[("id".to_owned(), "42".to_owned())]);

    assert!(router.resolve(Method::Get, "/user/abc").is_none());
}

#[test]
fn untyped_placeholders_stop_at_slashes() {
    let router: Router<&str> = Router::new().get("/files/{name}", "files");

    assert!(router.resolve(Method::Get, "/files/readme").is_some());
    assert!(router.resolve(Method::Get, "/files/a/b").is_none());
}

#[test]
fn float_and_bool_aliases_match_their_shapes() {
    let router: Router<&str> = Router::new()
        .get("/price/{p:float}", "price")
        .get("/flag/{f:bool}", "flag");

    assert_eq!(
        router.resolve(Method::Get, "/price/-3.25").unwrap().param("p"),
        Some("-3.25")
    );
    assert!(router.resolve(Method::Get, "/price/x").is_none());

    assert!(router.resolve(Method::Get, "/flag/true").is_some());
    assert!(router.resolve(Method::Get, "/flag/0").is_some());
    assert!(router.resolve(Method::Get, "/flag/maybe").is_none());
}

#[test]
fn length_annotations_bound_the_capture() {
    let router: Router<&str> = Router::new().get("/pin/{code:int{4}}", "pin");

    assert!(router.resolve(Method::Get, "/pin/1234").is_some());
    assert!(router.resolve(Method::Get, "/pin/123").is_none());
    assert!(router.resolve(Method::Get, "/pin/12345").is_none());
}

#[test]
fn custom_wildcards_override_the_builtins() {
    let router: Router<&str> = Router::new()
        .wildcard("slug", "[a-z0-9-]{len}")
        .wildcard("int", "[0-7]{len}")
        .get("/articles/{s:slug}", "articles")
        .get("/octal/{n:int}", "octal");

    assert!(router.resolve(Method::Get, "/articles/hello-world").is_some());
    assert!(router.resolve(Method::Get, "/articles/Hello").is_none());
    assert!(router.resolve(Method::Get, "/octal/17").is_some());
    assert!(router.resolve(Method::Get, "/octal/19").is_none());
}

#[test]
fn registration_order_beats_specificity() {
    let router: Router<&str> = Router::new()
        .get("/user/{name:string}", "by-name")
        .get("/user/{id:int}", "by-id");

    // "42" satisfies both patterns; the first-registered route wins even
    // though the second is more specific.
    let hit = router.resolve(Method::Get, "/user/42").unwrap();
    assert_eq!(*hit.action(), "by-name");
    assert_eq!(hit.param("name"), Some("42"));
}

#[test]
fn static_routes_beat_dynamic_routes_regardless_of_order() {
    let router: Router<&str> = Router::new()
        .get("/user/{id}", "dynamic")
        .get("/user/new", "static");

    assert_eq!(*router.resolve(Method::Get, "/user/new").unwrap().action(), "static");
    assert_eq!(*router.resolve(Method::Get, "/user/7").unwrap().action(), "dynamic");
}

#[test]
fn identical_static_registrations_overwrite_silently() {
    let router: Router<&str> = Router::new()
        .get("/about", "first")
        .get("/about", "second");

    assert_eq!(*router.resolve(Method::Get, "/about").unwrap().action(), "second");
}

#[test]
fn params_come_back_in_declaration_order() {
    let router: Router<&str> = Router::new().get("/{a}/{b}/{c}", "abc");

    let hit = router.resolve(Method::Get, "/x/y/z").unwrap();
    let names: Vec<&str> = hit.params().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(hit.param("b"), Some("y"));
}

#[test]
fn strategies_ride_along_untouched() {
    let mut router: Router<&str> = Router::new();
    router
        .register_with(Method::Get, "/user/{id}", "user", Some("auth"))
        .unwrap();
    router.register(Method::Get, "/open", "open").unwrap();

    assert_eq!(router.resolve(Method::Get, "/user/1").unwrap().strategy(), Some("auth"));
    assert_eq!(router.resolve(Method::Get, "/open").unwrap().strategy(), None);
}

#[test]
fn registrations_after_a_lookup_are_visible() {
    // The first lookup compiles the bucket; a later registration landing
    // in the same bucket must invalidate that cache.
    let mut router: Router<&str> = Router::new();
    router.register(Method::Get, "/a/{x}", "a").unwrap();
    assert!(router.resolve(Method::Get, "/a/1").is_some());

    router.register(Method::Get, "/b/{y}", "b").unwrap();
    assert_eq!(*router.resolve(Method::Get, "/b/2").unwrap().action(), "b");
    assert_eq!(*router.resolve(Method::Get, "/a/1").unwrap().action(), "a");
}

#[test]
fn a_crowded_bucket_still_resolves_every_route() {
    // 30 GET routes with two segments share one bucket, which forces the
    // chunked compilation path and route indices spanning several groups.
    let mut router: Router<usize> = Router::new();
    for i in 0..30 {
        router
            .register(Method::Get, &format!("/r{i}/{{id:int}}"), i)
            .unwrap();
    }

    for i in 0..30 {
        let path = format!("/r{i}/{i}");
        let hit = router.resolve(Method::Get, &path).unwrap();
        assert_eq!(*hit.action(), i);
        assert_eq!(hit.param("id"), Some(format!("{i}").as_str()));
    }
    assert!(router.resolve(Method::Get, "/r99/1").is_none());
}

#[test]
fn a_shared_router_resolves_from_many_threads() {
    use std::sync::Arc;

    let router: Arc<Router<&str>> = Arc::new(
        Router::new()
            .get("/users/{id:int}", "users")
            .get("/about", "about"),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || {
                let path = format!("/users/{i}");
                let hit = router.resolve(Method::Get, &path).unwrap();
                assert_eq!(*hit.action(), "users");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn method_strings_parse_case_sensitively() {
    assert_eq!(Method::from_str("GET"), Ok(Method::Get));
    assert_eq!(Method::from_str("PATCH"), Ok(Method::Patch));
    assert!(Method::from_str("get").is_err());
    assert!(Method::from_str("PURGE").is_err());
}
