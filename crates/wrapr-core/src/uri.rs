//! Wrap URI value type.
//!
//! A wrap URI names a wrapper package independently of where it lives:
//!
//! ```text
//! wrap://<authority>/<path>
//! ```
//!
//! The `wrap://` scheme may be omitted when parsing (`ens/foo.eth` is
//! accepted and normalized to `wrap://ens/foo.eth`). Equality, ordering and
//! hashing all operate on the normalized form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WrapError, WrapResult};

/// The only scheme a wrap URI may carry.
pub const WRAP_SCHEME: &str = "wrap";

const SCHEME_PREFIX: &str = "wrap://";

/// An immutable, normalized wrap URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri {
    authority: String,
    path: String,
}

impl Uri {
    /// Parse a wrap URI.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::UriParse`] if the input is empty, carries a
    /// scheme other than `wrap`, or lacks a non-empty authority and path.
    pub fn parse(input: &str) -> WrapResult<Self> {
        let fail = |reason: &str| WrapError::UriParse {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut rest = input.trim().trim_start_matches('/');
        if rest.is_empty() {
            return Err(fail("uri must not be empty"));
        }

        if let Some(stripped) = rest.strip_prefix(SCHEME_PREFIX) {
            rest = stripped;
        } else if let Some((scheme, _)) = rest.split_once("://") {
            return Err(fail(&format!(
                "unsupported scheme '{scheme}', expected '{WRAP_SCHEME}'"
            )));
        }

        if rest.contains("://") {
            return Err(fail("uri contains more than one scheme"));
        }

        let (authority, path) = rest
            .split_once('/')
            .ok_or_else(|| fail("expected '<authority>/<path>'"))?;

        if authority.is_empty() {
            return Err(fail("authority must not be empty"));
        }
        if path.is_empty() {
            return Err(fail("path must not be empty"));
        }

        Ok(Self {
            authority: authority.to_string(),
            path: path.to_string(),
        })
    }

    /// Build a URI from an authority and path, validating both.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::UriParse`] under the same rules as [`Uri::parse`].
    pub fn from_parts(authority: &str, path: &str) -> WrapResult<Self> {
        Self::parse(&format!("{SCHEME_PREFIX}{authority}/{path}"))
    }

    /// Create a `Uri` from known-good parts without validation (for
    /// constants and tests).
    #[must_use]
    pub fn from_static(authority: &'static str, path: &'static str) -> Self {
        debug_assert!(!authority.is_empty() && !path.is_empty());
        Self {
            authority: authority.to_string(),
            path: path.to_string(),
        }
    }

    /// The authority segment (e.g. `ens`, `fs`, `ipfs`).
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Everything after the authority.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The scheme, always `wrap`.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        WRAP_SCHEME
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME_PREFIX}{}/{}", self.authority, self.path)
    }
}

impl FromStr for Uri {
    type Err = WrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = WrapError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
