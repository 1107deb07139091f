//! Minimal tsuro example — a small API surface resolved by hand.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! The action here is a plain &str; in a real service it would be your
//! handler reference. tsuro never looks at it either way.

use tsuro::{Method, Router};

fn main() {
    tracing_subscriber::fmt::init();

    let router: Router<&str> = Router::new()
        .wildcard("slug", "[a-z0-9-]{len}")
        .get("/", "home")
        .get("/users/{id:int}", "users.show")
        .get("/users/{id:int}/posts[/{page:int}]", "users.posts")
        .post("/users", "users.create")
        .delete("/users/{id:int}", "users.delete")
        .get("/articles/{name:slug}", "articles.show");

    let probes = [
        (Method::Get, "/"),
        (Method::Get, "/users/42"),
        (Method::Get, "/users/42/posts"),
        (Method::Get, "/users/42/posts/2"),
        (Method::Delete, "/users/42"),
        (Method::Get, "/articles/hello-world"),
        (Method::Get, "/users/abc"),
        (Method::Post, "/users/42"),
    ];

    for (method, path) in probes {
        match router.resolve(method, path) {
            Some(hit) => println!("{method:6} {path:22} -> {} {:?}", hit.action(), hit.params()),
            None => println!("{method:6} {path:22} -> (no route)"),
        }
    }
}
