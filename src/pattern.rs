//! Pattern parsing: optional-segment expansion and placeholder compilation.
//!
//! A raw pattern is literal text, at most one trailing nest of optional
//! segments, and zero or more placeholders:
//!
//! ```text
//! /users/{id:int}/posts[/{page}[/comments]]
//! ```
//!
//! Parsing is a two-step pipeline, run once per registration:
//!
//! 1. [`expand_optionals`] turns the bracket nest into concrete patterns —
//!    one per optional boundary, shortest first. The example yields
//!    `/users/{id:int}/posts`, `…/posts/{page}`, `…/posts/{page}/comments`.
//! 2. [`compile_placeholders`] turns one concrete pattern into a regex
//!    source: literal text is escaped, each placeholder becomes a single
//!    capture group, and parameter names are recorded left to right. That
//!    encounter order is the order captured values come back in at match
//!    time.
//!
//! All grammar violations surface here, at registration. Nothing in this
//! module runs on the lookup path.

use crate::error::Error;
use crate::wildcard::Wildcards;

/// A concrete pattern compiled to a regex source plus its parameter names.
///
/// The source is unanchored; the group compiler anchors whole alternations.
/// Routes with no parameters never get this far — they go to the static
/// table as plain literals.
pub(crate) struct Compiled {
    pub(crate) source: String,
    pub(crate) params: Vec<String>,
}

/// Expands the trailing optional-segment nest into concrete patterns.
///
/// A pattern with k optional groups produces exactly k+1 concrete patterns
/// by cumulative concatenation, shortest first. Brackets inside a
/// placeholder body (`{id:[0-9]+}`) are sub-pattern text, not segment
/// markers, and are skipped.
pub(crate) fn expand_optionals(pattern: &str) -> Result<Vec<String>, Error> {
    // Every `]` in the trailing run closes an optional segment: a
    // placeholder can only end in `}`, so none of them belong to one.
    let trimmed = pattern.trim_end_matches(']');
    let tail_closes = pattern.len() - trimmed.len();

    // Split on `[` outside placeholder bodies. A `]` seen here is one that
    // closed early — remembered for the error report below.
    let mut segments = Vec::with_capacity(tail_closes + 1);
    let mut depth = 0usize;
    let mut closed_early = false;
    let mut start = 0;
    for (i, c) in trimmed.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '[' if depth == 0 => {
                segments.push(&trimmed[start..i]);
                start = i + 1;
            }
            ']' if depth == 0 => closed_early = true,
            _ => {}
        }
    }
    segments.push(&trimmed[start..]);

    if segments.len() - 1 != tail_closes {
        return Err(if closed_early {
            Error::OptionalSegmentInMiddle
        } else {
            Error::UnclosedOptionalSegments
        });
    }

    let mut concrete = Vec::with_capacity(segments.len());
    let mut current = String::new();
    for (n, segment) in segments.iter().enumerate() {
        if segment.is_empty() && n != 0 {
            return Err(Error::EmptyOptionalSegment);
        }
        current.push_str(segment);
        concrete.push(current.clone());
    }
    Ok(concrete)
}

/// Compiles one concrete pattern into a regex source and its parameter
/// names, in encounter order.
///
/// Each placeholder becomes exactly one capture group holding:
/// - the inline sub-pattern after `:`, verbatim;
/// - a wildcard alias resolved by name, with any `{n}`/`{n,m}` length
///   annotation substituted into the alias template (`+` when absent);
/// - `[^/]+` when no type is given.
///
/// Inline sub-patterns must not introduce capture groups of their own —
/// use `(?:…)` — or the group compiler's slot numbering goes off by one
/// for every extra group.
pub(crate) fn compile_placeholders(pattern: &str, wildcards: &Wildcards) -> Compiled {
    let mut source = String::with_capacity(pattern.len() + 8);
    let mut params = Vec::new();
    let mut rest = pattern;
    while let Some((start, end)) = next_placeholder(rest) {
        source.push_str(&regex::escape(&rest[..start]));
        let inner = &rest[start + 1..end - 1];
        let (name, spec) = match inner.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (inner, None),
        };
        let sub = match spec {
            Some(spec) => wildcards
                .resolve(spec)
                .unwrap_or_else(|| spec.to_owned()),
            None => "[^/]+".to_owned(),
        };
        source.push('(');
        source.push_str(&sub);
        source.push(')');
        params.push(name.to_owned());
        rest = &rest[end..];
    }
    source.push_str(&regex::escape(rest));
    Compiled { source, params }
}

/// Finds the next well-formed placeholder and returns its byte span,
/// closing brace included.
///
/// Well-formed means `{ident}` or `{ident:spec}` where the spec may carry
/// one balanced nested `{…}` (bounded-repetition annotations). A stray `{`
/// that opens nothing valid is literal text and the scan moves past it.
fn next_placeholder(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(rel) = text[from..].find('{') {
        let open = from + rel;
        if let Some(len) = balanced_braces(&text[open..]) {
            let inner = &text[open + 1..open + len - 1];
            let name = inner.split(':').next().unwrap_or(inner);
            if is_ident(name) {
                return Some((open, open + len));
            }
        }
        from = open + 1;
    }
    None
}

/// Length of the brace-balanced prefix of `text` (which starts at a `{`),
/// or `None` when the braces never close.
fn balanced_braces(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
