//! Unified error type.

use std::fmt;

/// The error type returned by tsuro's fallible registrations.
///
/// Every variant is a pattern-grammar violation, detected synchronously
/// while the route is registered. Lookups never fail — a path that matches
/// nothing is a plain `None`, not an error. The embedding application
/// decides whether a bad pattern aborts startup or skips the route.
#[derive(Debug)]
pub enum Error {
    /// The counts of `[` and `]` in the pattern do not balance.
    UnclosedOptionalSegments,
    /// An optional segment closed before the tail of the pattern. Optional
    /// content may only ever sit at the end, possibly nested.
    OptionalSegmentInMiddle,
    /// An optional segment other than the first is zero-length.
    EmptyOptionalSegment,
    /// A placeholder sub-pattern did not compile as a regex.
    InvalidPlaceholder {
        /// The concrete pattern the sub-pattern came from.
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedOptionalSegments => {
                f.write_str("opening and closing optional segments do not match")
            }
            Self::OptionalSegmentInMiddle => {
                f.write_str("optional segments may only sit at the end of a pattern")
            }
            Self::EmptyOptionalSegment => f.write_str("empty optional segment"),
            Self::InvalidPlaceholder { pattern, .. } => {
                write!(f, "placeholder sub-pattern in `{pattern}` does not compile")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPlaceholder { source, .. } => Some(source),
            _ => None,
        }
    }
}
