//! Content URI - the identifier every gateway operation is addressed with
//!
//! Format: `content://<authority>/<segment>[/<segment>...]`
//!
//! Examples:
//! - `content://com.example.android.pets/pets` - the whole collection
//! - `content://com.example.android.pets/pets/3` - the pet with `_id` 3
//!
//! Only the authority and the path segments take part in routing; query
//! strings and fragments are dropped when parsing.

use crate::contract::{CONTENT_AUTHORITY, CONTENT_SCHEME, PATH_PETS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed content URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    /// Provider authority
    pub authority: String,
    /// Non-empty path segments
    pub segments: Vec<String>,
}

/// What a content URI addresses inside the pets provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The whole table
    Collection,
    /// One row, by `_id`
    Item(i64),
}

impl ContentUri {
    pub fn new<I, S>(authority: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authority: authority.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a URI string. The `content://` prefix may be omitted.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = match uri.split_once("://") {
            Some((scheme, rest)) if scheme == CONTENT_SCHEME => rest,
            Some((scheme, _)) => {
                return Err(Error::UnsupportedResource(format!(
                    "{} (scheme must be {}, got {})",
                    uri, CONTENT_SCHEME, scheme
                )));
            }
            None => uri,
        };

        // Routing ignores the query string and fragment
        let rest = rest.split(['?', '#']).next().unwrap_or_default();

        let mut parts = rest.split('/');
        let authority = parts.next().unwrap_or_default();
        if authority.is_empty() {
            return Err(Error::UnsupportedResource(format!("{} (missing authority)", uri)));
        }

        let segments = parts.filter(|s| !s.is_empty()).map(str::to_string).collect();

        Ok(Self {
            authority: authority.to_string(),
            segments,
        })
    }

    /// A new URI with `id` appended as the last path segment
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self {
            authority: self.authority.clone(),
            segments,
        }
    }

    /// The trailing numeric segment, if the last segment is one
    pub fn parse_id(&self) -> Option<i64> {
        self.segments.last().and_then(|s| parse_row_id(s))
    }

    /// True if `other` lies strictly below this URI in the path tree
    pub fn is_ancestor_of(&self, other: &ContentUri) -> bool {
        self.authority == other.authority
            && self.segments.len() < other.segments.len()
            && other.segments.starts_with(&self.segments)
    }

    /// Convert to URI string
    pub fn to_uri_string(&self) -> String {
        let mut out = format!("{}://{}", CONTENT_SCHEME, self.authority);
        for segment in &self.segments {
            out.push('/');
            out.push_str(segment);
        }
        out
    }
}

/// Match a URI against the two patterns the pets provider serves:
/// `<authority>/pets` and `<authority>/pets/#`.
pub fn resolve(uri: &ContentUri) -> Result<Resource> {
    if uri.authority != CONTENT_AUTHORITY {
        return Err(Error::UnsupportedResource(uri.to_uri_string()));
    }

    match uri.segments.as_slice() {
        [path] if path == PATH_PETS => Ok(Resource::Collection),
        [path, id] if path == PATH_PETS => parse_row_id(id)
            .map(Resource::Item)
            .ok_or_else(|| Error::UnsupportedResource(uri.to_uri_string())),
        _ => Err(Error::UnsupportedResource(uri.to_uri_string())),
    }
}

/// A row id segment is ASCII digits only, no sign, and must fit in `i64`.
fn parse_row_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri_string())
    }
}

impl FromStr for ContentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ContentUri {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_uri_string())
    }
}

impl<'de> Deserialize<'de> for ContentUri {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContentUri::parse(&s).map_err(serde::de::Error::custom)
    }
}
