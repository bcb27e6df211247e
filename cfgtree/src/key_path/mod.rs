//! Dotted key paths and path-addressed access to the configuration tree.
//!
//! A [`KeyPath`] is an ordered, non-empty list of segments. The textual form
//! joins segments with `.`; parsing performs no escaping, so `"a..b"` yields
//! an empty middle segment which simply never matches a stored key.

mod resolver;

use std::fmt;

use crate::{CfgError, CfgResult};

pub use resolver::{append_to_list, get, remove, set};

/// Separator between segments in the textual form of a key.
pub const SEPARATOR: char = '.';

/// Ordered list of segments addressing a value in the configuration tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split a dotted key into segments.
    ///
    /// Every substring between separators becomes a segment, including empty
    /// ones, so the result always holds at least one segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::KeyPath;
    /// let path = KeyPath::parse("configuration.json");
    /// assert_eq!(path.segments(), ["configuration", "json"]);
    /// assert_eq!(KeyPath::parse("a..b").segments(), ["a", "", "b"]);
    /// ```
    #[must_use]
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Build a path from already separated segments.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::EmptyKeyPath`] when `segments` yields nothing.
    pub fn from_segments<I, S>(segments: I) -> CfgResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collected: Vec<String> = segments.into_iter().map(Into::into).collect();
        if collected.is_empty() {
            return Err(std::sync::Arc::new(CfgError::EmptyKeyPath));
        }
        Ok(Self {
            segments: collected,
        })
    }

    /// Borrow the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the intermediate segments and the terminal one.
    pub(crate) fn split_last(&self) -> (&str, &[String]) {
        match self.segments.split_last() {
            Some((last, parents)) => (last.as_str(), parents),
            None => ("", &[]),
        }
    }

    /// Path of the parent mapping, or `None` for a single-segment path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parents) = self.split_last();
        Self::from_segments(parents.iter().cloned()).ok()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

impl From<&String> for KeyPath {
    fn from(key: &String) -> Self {
        Self::parse(key)
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        Self::parse(&key)
    }
}

/// Conversion into a [`KeyPath`] accepted by every store accessor.
///
/// Strings are parsed as dotted keys; segment lists are taken verbatim and
/// rejected when empty.
pub trait IntoKeyPath {
    /// Produce the key path.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::EmptyKeyPath`] for an empty segment list.
    fn into_key_path(self) -> CfgResult<KeyPath>;
}

impl IntoKeyPath for KeyPath {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        Ok(self)
    }
}

impl IntoKeyPath for &KeyPath {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        Ok(self.clone())
    }
}

impl IntoKeyPath for &str {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        Ok(KeyPath::parse(self))
    }
}

impl IntoKeyPath for String {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        Ok(KeyPath::parse(&self))
    }
}

impl IntoKeyPath for &String {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        Ok(KeyPath::parse(self))
    }
}

impl IntoKeyPath for &[&str] {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        KeyPath::from_segments(self.iter().copied())
    }
}

impl<const N: usize> IntoKeyPath for [&str; N] {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        KeyPath::from_segments(self)
    }
}

impl IntoKeyPath for Vec<String> {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        KeyPath::from_segments(self)
    }
}

impl IntoKeyPath for &[String] {
    fn into_key_path(self) -> CfgResult<KeyPath> {
        KeyPath::from_segments(self.iter().cloned())
    }
}
