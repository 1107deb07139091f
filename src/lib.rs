//! # tsuro
//!
//! A fast, minimal route-matching core for HTTP services.
//! It maps (method, path) to whatever you registered. That is all.
//!
//! ## The contract
//!
//! Your transport speaks HTTP. Your dispatch layer calls handlers. tsuro
//! is the index between the two — by design it does neither job. The
//! action you register is an opaque value: tsuro stores it, finds it, and
//! hands it back untouched.
//!
//! What the surrounding layers own — tsuro intentionally ignores:
//!
//! - **Handler invocation** — the dispatch layer calls what `resolve` returns
//! - **Body parsing, headers, transport** — whatever speaks HTTP for you
//! - **Parameter coercion** — a captured `"42"` stays a string; the
//!   sub-pattern already constrained its shape
//! - **Route generation** — derive registrations however you like
//!   (declarative tables, CRUD expanders); they all end in [`Router::register`]
//!
//! What's left for tsuro — the matching core those layers sit on:
//!
//! - Pattern grammar — literals, trailing optional segments
//!   (`/a[/b[/c]]`), typed placeholders (`{id:int}`, `{code:int{4}}`)
//! - Static fast path — placeholder-free routes resolve with one hash lookup
//! - Bucketed dynamic matching — routes partitioned by method zone and
//!   segment count, each bucket compiled into a few combined regexes
//! - Deterministic ordering — first registered wins, static beats dynamic
//!
//! ## Quick start
//!
//! ```rust
//! use tsuro::{Method, Router};
//!
//! let router: Router<&str> = Router::new()
//!     .get("/users", "users.index")
//!     .get("/users/{id:int}", "users.show")
//!     .get("/users/{id:int}/posts[/{page:int}]", "users.posts")
//!     .post("/users", "users.create");
//!
//! let hit = router.resolve(Method::Get, "/users/42/posts/2").unwrap();
//! assert_eq!(*hit.action(), "users.posts");
//! assert_eq!(hit.param("id"), Some("42"));
//! assert_eq!(hit.param("page"), Some("2"));
//!
//! assert!(router.resolve(Method::Get, "/users/abc").is_none());
//! ```

mod error;
mod group;
mod method;
mod pattern;
mod router;
mod wildcard;

pub use error::Error;
pub use method::Method;
pub use router::{Match, Router};
