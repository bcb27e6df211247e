//! Constructors and classification helpers for `CfgError`.

use std::path::Path;
use std::sync::Arc;

use super::CfgError;
use crate::KeyPath;

impl CfgError {
    /// Returns `true` when the error means "nothing is stored at this path".
    ///
    /// Both a missing segment and an intermediate non-mapping count as
    /// absence; the store uses this to substitute defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::CfgError;
    /// let err = CfgError::KeyNotFound { key: "a.b".into(), segment: "a".into() };
    /// assert!(err.is_missing());
    /// ```
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::NotAMapping { .. })
    }

    pub(crate) fn key_not_found(key: &KeyPath, segment: &str) -> Arc<Self> {
        Arc::new(Self::KeyNotFound {
            key: key.to_string(),
            segment: segment.to_owned(),
        })
    }

    pub(crate) fn not_a_mapping(key: &KeyPath, segment: &str) -> Arc<Self> {
        Arc::new(Self::NotAMapping {
            key: key.to_string(),
            segment: segment.to_owned(),
        })
    }

    pub(crate) fn not_a_sequence(key: &KeyPath) -> Arc<Self> {
        Arc::new(Self::NotASequence {
            key: key.to_string(),
        })
    }

    pub(crate) fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::MalformedSource {
            origin: origin.into(),
            reason: reason.into(),
        })
    }

    pub(crate) fn invalid_json(origin: impl Into<String>, source: serde_json::Error) -> Arc<Self> {
        Arc::new(Self::InvalidJson {
            origin: origin.into(),
            source,
        })
    }

    pub(crate) fn unavailable(path: &Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<clap::Error> for CfgError {
    fn from(e: clap::Error) -> Self {
        Self::CommandLine(Box::new(e))
    }
}
