//! Primary error enum for configuration store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or reading a configuration tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CfgError {
    /// A segment of the key path does not exist in the tree.
    #[error("(sub-)key '{segment}' of '{key}' not found")]
    KeyNotFound {
        /// Full dotted key that was requested.
        key: String,
        /// Segment at which the walk stopped.
        segment: String,
    },

    /// An intermediate segment holds a value that is not a mapping.
    #[error("(sub-)key '{segment}' of '{key}' is not a mapping")]
    NotAMapping {
        /// Full dotted key that was requested.
        key: String,
        /// Segment whose value is not a mapping.
        segment: String,
    },

    /// The terminal value of an append is not a sequence.
    #[error("value at '{key}' is not a sequence")]
    NotASequence {
        /// Full dotted key that was requested.
        key: String,
    },

    /// A resolver-level assignment hit an existing value.
    #[error("(sub-)key '{key}' already exists")]
    KeyAlreadySet {
        /// Full dotted key that was requested.
        key: String,
    },

    /// A store-level write-once assignment hit an existing value.
    #[error("configuration key '{key}' is already set")]
    DuplicateKey {
        /// Full dotted key that was requested.
        key: String,
    },

    /// A value the caller cannot proceed without is absent.
    #[error("mandatory configuration parameter '{key}' not found")]
    MandatoryValueMissing {
        /// Full dotted key that was requested.
        key: String,
    },

    /// A source parsed correctly but does not have the expected shape.
    #[error("malformed configuration source '{origin}': {reason}")]
    MalformedSource {
        /// Human-readable description of where the source came from.
        origin: String,
        /// Explanation of what is wrong with the source.
        reason: String,
    },

    /// A JSON source is not valid JSON.
    #[error("invalid JSON in '{origin}': {source}")]
    InvalidJson {
        /// Human-readable description of where the source came from.
        origin: String,
        /// Underlying parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// A JSON file source could not be opened or read.
    #[error("configuration file '{}' unavailable: {source}", .path.display())]
    SourceUnavailable {
        /// Path of the file that failed.
        path: PathBuf,
        /// Original I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Cascading JSON sources did not reach a fixed point in time.
    #[error("cascading configuration did not settle after {limit} rounds")]
    ResolutionLimitExceeded {
        /// Number of rounds permitted.
        limit: usize,
    },

    /// A legacy configuration file was referenced but no converter is able to
    /// handle it.
    #[error("legacy configuration file '{}' cannot be converted", .path.display())]
    LegacyUnsupported {
        /// Path taken from the legacy redirect key.
        path: PathBuf,
    },

    /// A key path without any segments was supplied.
    #[error("a key path needs at least one segment")]
    EmptyKeyPath,

    /// A stored value could not be deserialized into the requested type.
    #[error("value at '{key}' has the wrong type: {source}")]
    TypeMismatch {
        /// Full dotted key that was requested.
        key: String,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// Error parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    CommandLine(#[from] Box<clap::Error>),
}
