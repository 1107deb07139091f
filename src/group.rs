//! Combining many dynamic routes into few compiled matchers.
//!
//! One regex per route means a linear scan of compilations for large
//! buckets; one regex over all routes means an alternation wide enough to
//! hit practical capture-group limits. The middle ground: split a bucket
//! into chunks whose size grows logarithmically with the bucket
//! ([`chunk_size`]), and compile each chunk as a single anchored
//! alternation.
//!
//! # Slot numbering
//!
//! Knowing *that* a combined alternation matched is not enough — we need
//! to know *which* alternative did. Each alternative is assigned a slot
//! width, strictly increasing along the chunk and at least one more than
//! its parameter count, and is padded with trailing inert `()` groups up
//! to that width. When an alternative matches, all of its groups
//! participate (the inert ones capture empty) and every other
//! alternative's groups report as non-participating. The index of the
//! last participating group is therefore unique to the alternative, and
//! the groups right after its base hold the real parameter values.
//!
//! Engines with branch-reset numbering get this property from the engine;
//! the regex crate's participation reporting gives the same observable
//! behavior with plain global numbering.

use regex::Regex;
use tracing::trace;

/// Chunk size for a bucket of `n` routes — Sturges' rule, never below 1.
///
/// Grows with log10(n), so the chunk count (and with it the worst-case
/// number of regex executions per lookup) grows sub-linearly: 20 routes
/// compile into 4 groups of 5, 1000 routes into 91 groups of 11.
pub(crate) fn chunk_size(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let approx = 1.0 + 3.3 * (n as f64).log10();
    (approx.round() as usize).max(1)
}

/// One compiled alternation over a chunk of routes, plus the slot map
/// that turns a match back into the owning route.
pub(crate) struct Group {
    regex: Regex,
    slots: Vec<Slot>,
}

struct Slot {
    /// Absolute index of the alternative's last capture group.
    last: usize,
    /// Group offset of the alternative; real captures sit at
    /// `base + 1 ..= base + params`.
    base: usize,
    /// Parameter count of the owning route.
    params: usize,
    /// Index of the owning route within its bucket.
    route: usize,
}

impl Group {
    /// Attempts a full, anchored match of `path` against this group.
    ///
    /// On success returns the owning route's bucket index and its captured
    /// values in declaration order, inert padding discarded.
    pub(crate) fn find<'p>(&self, path: &'p str) -> Option<(usize, Vec<&'p str>)> {
        let caps = self.regex.captures(path)?;
        let last = (1..caps.len()).rev().find(|&i| caps.get(i).is_some())?;
        let slot = self.slots.iter().find(|s| s.last == last)?;
        let values = (1..=slot.params)
            .map(|i| caps.get(slot.base + i).map_or("", |m| m.as_str()))
            .collect();
        Some((slot.route, values))
    }
}

/// Compiles a bucket's routes — `(regex source, parameter count)` pairs in
/// registration order — into chunked groups.
///
/// Deterministic and idempotent: the same ordered input always produces
/// behaviorally identical groups, and group order preserves registration
/// order across chunk boundaries.
pub(crate) fn compile(routes: &[(&str, usize)]) -> Vec<Group> {
    let size = chunk_size(routes.len());
    let mut groups = Vec::with_capacity(routes.len().div_ceil(size));
    let mut offset = 0;
    for chunk in routes.chunks(size) {
        groups.push(compile_chunk(chunk, offset));
        offset += chunk.len();
    }
    groups
}

fn compile_chunk(chunk: &[(&str, usize)], first_route: usize) -> Group {
    let mut source = String::from("^(?:");
    let mut slots = Vec::with_capacity(chunk.len());
    let mut groups_emitted = 0;
    let mut width = 0;
    for (i, &(route_source, params)) in chunk.iter().enumerate() {
        if i > 0 {
            source.push('|');
        }
        width = (width + 1).max(params + 1);
        source.push_str(route_source);
        for _ in 0..width - params {
            source.push_str("()");
        }
        slots.push(Slot {
            last: groups_emitted + width,
            base: groups_emitted,
            params,
            route: first_route + i,
        });
        groups_emitted += width;
    }
    source.push_str(")$");
    trace!(alternatives = chunk.len(), groups = groups_emitted, "compiled group");

    // Every alternative was validated in isolation when its route was
    // registered, and the padding only adds empty groups.
    let regex = Regex::new(&source).expect("route patterns validated at registration");
    Group { regex, slots }
}
