//! Named wildcard aliases for placeholder sub-patterns.
//!
//! `{id:int}` reads better than `{id:[0-9]+}` and keeps route tables free
//! of copy-pasted character classes. An alias maps a name to a regex
//! template; the template may carry one `{len}` slot where a caller's
//! length annotation lands — `{id:int{3}}` substitutes `{3}`, a bare
//! `{id:int}` substitutes `+`.
//!
//! The registry is per-router state. It is consulted when a route is
//! registered, never while a path is matched, so aliases must be in place
//! before the routes that use them.

use std::collections::HashMap;

/// Marks where a length annotation is spliced into an alias template.
const LEN_SLOT: &str = "{len}";

/// Per-router registry of placeholder aliases.
#[derive(Debug)]
pub(crate) struct Wildcards {
    aliases: HashMap<String, String>,
}

impl Wildcards {
    /// Adds an alias, replacing any previous template under the same name.
    pub(crate) fn set(&mut self, name: &str, template: &str) {
        self.aliases.insert(name.to_owned(), template.to_owned());
    }

    /// Resolves a placeholder sub-pattern spec (`int`, `int{3}`, `int{1,3}`)
    /// against the registry.
    ///
    /// Returns `None` when the spec is not alias-shaped or the name is not
    /// registered — the caller then treats the spec as an inline regex.
    pub(crate) fn resolve(&self, spec: &str) -> Option<String> {
        let (name, quantifier) = match spec.find('{') {
            Some(i) => {
                let tail = &spec[i..];
                if !is_quantifier(tail) {
                    return None;
                }
                (&spec[..i], tail)
            }
            None => (spec, "+"),
        };
        let template = self.aliases.get(name)?;
        Some(template.replace(LEN_SLOT, quantifier))
    }
}

impl Default for Wildcards {
    /// The built-in aliases. Overridable per router instance.
    fn default() -> Self {
        let mut w = Self { aliases: HashMap::new() };
        w.set("int",     "[0-9]{len}");
        w.set("integer", "[0-9]{len}");
        w.set("string",  r"\w{len}");
        w.set("float",   r"[-+]?[0-9]*\.?[0-9]{len}");
        // No length slot: a bool is one of the fixed tokens, whatever its width.
        w.set("bool",    "(?:true|false|1|0)");
        w.set("boolean", "(?:true|false|1|0)");
        w
    }
}

/// `{n}`, `{n,}` or `{n,m}` — the regex bounded-repetition shapes.
fn is_quantifier(s: &str) -> bool {
    let Some(body) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
        return false;
    };
    let (min, max) = match body.split_once(',') {
        Some((min, max)) => (min, Some(max)),
        None => (body, None),
    };
    if min.is_empty() || !min.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    max.is_none_or(|m| m.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aliases_resolve_unbounded() {
        let w = Wildcards::default();
        assert_eq!(w.resolve("int").as_deref(), Some("[0-9]+"));
        assert_eq!(w.resolve("string").as_deref(), Some(r"\w+"));
    }

    #[test]
    fn length_annotation_substitutes_into_the_slot() {
        let w = Wildcards::default();
        assert_eq!(w.resolve("int{3}").as_deref(), Some("[0-9]{3}"));
        assert_eq!(w.resolve("integer{1,5}").as_deref(), Some("[0-9]{1,5}"));
        assert_eq!(w.resolve("int{2,}").as_deref(), Some("[0-9]{2,}"));
    }

    #[test]
    fn bool_ignores_length_annotations() {
        let w = Wildcards::default();
        assert_eq!(w.resolve("bool{4}").as_deref(), Some("(?:true|false|1|0)"));
    }

    #[test]
    fn unknown_names_and_raw_regexes_fall_through() {
        let w = Wildcards::default();
        assert_eq!(w.resolve("slug"), None);
        assert_eq!(w.resolve(r"\d+"), None);
        // `{` present but not a quantifier — not alias-shaped.
        assert_eq!(w.resolve("int{a}"), None);
    }

    #[test]
    fn overriding_an_alias_wins() {
        let mut w = Wildcards::default();
        w.set("int", "[0-7]{len}");
        assert_eq!(w.resolve("int").as_deref(), Some("[0-7]+"));
    }
}
