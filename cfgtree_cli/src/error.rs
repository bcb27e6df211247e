//! Error types for the `cfgtree` binary.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while building or printing the configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wraps failures reported by the configuration store.
    #[error("failed to build configuration: {0}")]
    Configuration(#[from] Arc<cfgtree::CfgError>),
    /// The selected value could not be rendered as JSON.
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for the binary.
pub type Result<T> = std::result::Result<T, CliError>;
