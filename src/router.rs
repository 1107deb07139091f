//! Route registration and resolution.
//!
//! The router is an index from (method, path) to whatever value you
//! registered — it never calls, inspects, or validates that value. Routes
//! with no placeholders live in a static table and resolve with one hash
//! lookup. Dynamic routes are filed into buckets keyed by
//! `method zone + slash count`, so a lookup only ever runs regexes that
//! agree with the path on method and segment count; each bucket compiles,
//! lazily and at most once per change, into a handful of combined
//! matchers (see [`crate::group`]).
//!
//! Build the router once at startup; [`Router::resolve`] takes `&self`,
//! so an `Arc<Router<_>>` can be shared across request tasks.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use regex::Regex;
use tracing::{debug, trace};

use crate::error::Error;
use crate::group::{self, Group};
use crate::method::Method;
use crate::pattern;
use crate::wildcard::Wildcards;

/// The route index.
///
/// Generic over the action type `A` — a handler reference, an enum, a
/// string, whatever the embedding dispatch layer resolves against. Each
/// [`Router::on`] call returns `self` so registrations chain naturally:
///
/// ```rust
/// use tsuro::{Method, Router};
///
/// let router: Router<&str> = Router::new()
///     .get("/users/{id:int}", "users.show")
///     .post("/users", "users.create");
///
/// let hit = router.resolve(Method::Get, "/users/42").unwrap();
/// assert_eq!(*hit.action(), "users.show");
/// assert_eq!(hit.param("id"), Some("42"));
/// ```
pub struct Router<A> {
    statics: HashMap<Method, HashMap<String, Route<A>>>,
    buckets: HashMap<usize, Bucket<A>>,
    wildcards: Wildcards,
}

/// One registered concrete pattern.
struct Route<A> {
    action: Arc<A>,
    strategy: Option<Arc<str>>,
    /// The concrete pattern as registered, optionals already expanded.
    pattern: String,
    /// Regex source of the whole path (dynamic routes only, unanchored).
    source: String,
    /// Parameter names in declaration order (dynamic routes only).
    params: Vec<String>,
}

/// An ordered list of dynamic routes sharing one (method, segment count)
/// index, plus the compile-once cache of their combined matchers.
struct Bucket<A> {
    routes: Vec<Route<A>>,
    compiled: RwLock<Option<Arc<Vec<Group>>>>,
}

impl<A> Default for Bucket<A> {
    fn default() -> Self {
        Self { routes: Vec::new(), compiled: RwLock::new(None) }
    }
}

impl<A> Router<A> {
    pub fn new() -> Self {
        Self {
            statics: HashMap::new(),
            buckets: HashMap::new(),
            wildcards: Wildcards::default(),
        }
    }

    /// Adds or overrides a wildcard alias. Returns `self` for chaining.
    ///
    /// The template is a regex fragment with an optional `{len}` slot
    /// where a placeholder's length annotation lands (`+` when absent):
    ///
    /// ```rust
    /// use tsuro::{Method, Router};
    ///
    /// let router: Router<u8> = Router::new()
    ///     .wildcard("slug", "[a-z0-9-]{len}")
    ///     .get("/articles/{name:slug}", 1);
    ///
    /// assert!(router.resolve(Method::Get, "/articles/hello-world").is_some());
    /// assert!(router.resolve(Method::Get, "/articles/Hello").is_none());
    /// ```
    ///
    /// Aliases are consulted when a route is registered, so configure them
    /// before the routes that use them. Matching never reads the registry.
    pub fn wildcard(mut self, name: &str, template: &str) -> Self {
        self.wildcards.set(name, template);
        self
    }

    /// Registers `pattern` for `method`. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics on a malformed pattern. Use [`Router::register`] to decide
    /// per route whether to abort or skip instead.
    pub fn on(mut self, method: Method, pattern: &str, action: A) -> Self {
        self.register(method, pattern, action)
            .unwrap_or_else(|e| panic!("invalid route `{pattern}`: {e}"));
        self
    }

    pub fn get(self, pattern: &str, action: A) -> Self {
        self.on(Method::Get, pattern, action)
    }

    pub fn post(self, pattern: &str, action: A) -> Self {
        self.on(Method::Post, pattern, action)
    }

    pub fn put(self, pattern: &str, action: A) -> Self {
        self.on(Method::Put, pattern, action)
    }

    pub fn patch(self, pattern: &str, action: A) -> Self {
        self.on(Method::Patch, pattern, action)
    }

    pub fn delete(self, pattern: &str, action: A) -> Self {
        self.on(Method::Delete, pattern, action)
    }

    /// Registers `pattern` for `method`, reporting grammar violations to
    /// the caller.
    pub fn register(&mut self, method: Method, pattern: &str, action: A) -> Result<(), Error> {
        self.register_with(method, pattern, action, None)
    }

    /// Like [`Router::register`], with an opaque strategy tag stored and
    /// returned alongside the action.
    ///
    /// Optional segments expand here: `/a[/b[/c]]` registers three
    /// concrete patterns sharing one action. A static pattern registered
    /// twice for the same method is silently overwritten, last write wins.
    /// Dynamic routes accumulate in registration order — on lookup the
    /// first-registered matching pattern wins, however general.
    pub fn register_with(
        &mut self,
        method: Method,
        pattern: &str,
        action: A,
        strategy: Option<&str>,
    ) -> Result<(), Error> {
        let action = Arc::new(action);
        let strategy: Option<Arc<str>> = strategy.map(Arc::from);

        for concrete in pattern::expand_optionals(pattern)? {
            let compiled = pattern::compile_placeholders(&concrete, &self.wildcards);
            let route = Route {
                action: Arc::clone(&action),
                strategy: strategy.clone(),
                pattern: concrete.clone(),
                source: compiled.source,
                params: compiled.params,
            };

            if route.params.is_empty() {
                debug!(%method, pattern = %concrete, "static route");
                self.statics.entry(method).or_default().insert(concrete, route);
                continue;
            }

            // Validate the anchored pattern now so a malformed inline
            // sub-pattern fails this call, never a later lookup.
            Regex::new(&format!("^{}$", route.source)).map_err(|source| {
                Error::InvalidPlaceholder { pattern: concrete.clone(), source }
            })?;

            let index = bucket_index(method, &concrete);
            debug!(%method, pattern = %concrete, index, "dynamic route");
            let bucket = self.buckets.entry(index).or_default();
            bucket.routes.push(route);
            // The bucket changed; drop its compiled groups so the next
            // lookup rebuilds them.
            *bucket.compiled.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
        }
        Ok(())
    }

    /// Resolves `(method, path)` to a registered route.
    ///
    /// `None` is the not-found outcome, not an error. Static routes win
    /// over any dynamic route with identical literal text, whatever the
    /// registration order; among dynamic candidates, the first-registered
    /// matching pattern wins.
    pub fn resolve(&self, method: Method, path: &str) -> Option<Match<'_, A>> {
        if let Some(route) = self.statics.get(&method).and_then(|t| t.get(path)) {
            trace!(%method, path, "static hit");
            return Some(Match {
                action: route.action.as_ref(),
                strategy: route.strategy.as_deref(),
                params: Vec::new(),
            });
        }

        let bucket = self.buckets.get(&bucket_index(method, path))?;
        for group in bucket.groups().iter() {
            if let Some((index, values)) = group.find(path) {
                let route = &bucket.routes[index];
                trace!(%method, path, pattern = %route.pattern, "dynamic hit");
                let params = route
                    .params
                    .iter()
                    .cloned()
                    .zip(values.into_iter().map(str::to_owned))
                    .collect();
                return Some(Match {
                    action: route.action.as_ref(),
                    strategy: route.strategy.as_deref(),
                    params,
                });
            }
        }
        trace!(%method, path, "no route");
        None
    }
}

impl<A> Default for Router<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Bucket<A> {
    /// Returns the bucket's compiled groups, building them on first use.
    ///
    /// Compile-once/read-many: the read lock is the fast path; racing
    /// writers under the write lock produce identical groups, so the
    /// double-check only saves redundant work.
    fn groups(&self) -> Arc<Vec<Group>> {
        {
            let cached = self.compiled.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(groups) = cached.as_ref() {
                return Arc::clone(groups);
            }
        }

        let mut slot = self.compiled.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(groups) = slot.as_ref() {
            return Arc::clone(groups);
        }

        let specs: Vec<(&str, usize)> = self
            .routes
            .iter()
            .map(|r| (r.source.as_str(), r.params.len()))
            .collect();
        let groups = Arc::new(group::compile(&specs));
        debug!(routes = self.routes.len(), groups = groups.len(), "compiled bucket");
        *slot = Some(Arc::clone(&groups));
        groups
    }
}

/// The shared partition key: a registered pattern and a looked-up path
/// land in the same bucket exactly when method and slash count agree.
fn bucket_index(method: Method, text: &str) -> usize {
    method.zone() + text.bytes().filter(|&b| b == b'/').count() - 1
}

// ── Match ─────────────────────────────────────────────────────────────────────

/// A successful resolution: the registered action and strategy, plus the
/// captured parameter values.
pub struct Match<'r, A> {
    action: &'r A,
    strategy: Option<&'r str>,
    params: Vec<(String, String)>,
}

impl<'r, A> Match<'r, A> {
    /// The registered action, exactly as it was stored.
    pub fn action(&self) -> &'r A {
        self.action
    }

    /// The strategy tag passed to [`Router::register_with`], if any.
    pub fn strategy(&self) -> Option<&'r str> {
        self.strategy
    }

    /// Captured parameters as `(name, value)` pairs, in the order the
    /// placeholders appear in the pattern.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `hit.param("id")` on `/users/42`
    /// returns `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
