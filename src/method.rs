//! HTTP method as a typed enum.
//!
//! Only the five verbs the router indexes. Each verb owns a disjoint
//! bucket zone used to partition dynamic routes; see [`Method::zone`].
//!
//! Unknown method strings are a boundary-layer concern: reject them with
//! [`Method::from_str`] before they ever reach the router.

use std::fmt;
use std::str::FromStr;

/// A routable HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get    => "GET",
            Self::Post   => "POST",
            Self::Put    => "PUT",
            Self::Patch  => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Base offset of this method's dynamic-route zone.
    ///
    /// A dynamic route is filed under `zone + slash count − 1`. The zones
    /// are spaced 100 apart, and no realistic path carries anywhere near
    /// 100 segments, so an index never collides across methods. These
    /// values are stable; the bucket layout depends on them.
    pub fn zone(self) -> usize {
        match self {
            Self::Get    => 100,
            Self::Post   => 200,
            Self::Put    => 300,
            Self::Patch  => 400,
            Self::Delete => 500,
        }
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"    => Ok(Self::Get),
            "POST"   => Ok(Self::Post),
            "PUT"    => Ok(Self::Put),
            "PATCH"  => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _        => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
