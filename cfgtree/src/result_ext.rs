//! Extensions for mapping errors to `CfgResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(CfgError::…(e)))`
//! patterns when converting external error types into the crate's
//! `CfgResult<T>` alias (`Result<T, Arc<CfgError>>`).
//!
//! - Use [`CfgResultExt::into_cfg`] for error types that implement
//!   `Into<CfgError>` (e.g., `clap::Error`).
//! - Use [`MissingExt::optional`] to turn "nothing stored here" into `None`
//!   while still propagating every other failure.
//!
//! # Examples
//!
//! ```
//! use cfgtree::{ConfigStore, MissingExt};
//!
//! let store = ConfigStore::new();
//! let value = store.get_raw("not.there").optional()?;
//! assert!(value.is_none());
//! # Ok::<_, std::sync::Arc<cfgtree::CfgError>>(())
//! ```

use std::sync::Arc;

use crate::{CfgError, CfgResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<CfgError>`
/// into a `CfgResult<T>`.
pub trait CfgResultExt<T, E> {
    /// Convert `Result<T, E>` into `CfgResult<T>` using `Into<CfgError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<CfgError>`.
    fn into_cfg(self) -> CfgResult<T>;
}

impl<T, E> CfgResultExt<T, E> for Result<T, E>
where
    E: Into<CfgError>,
{
    fn into_cfg(self) -> CfgResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension that absorbs resolver "absent" failures.
pub trait MissingExt<T> {
    /// Map [`CfgError::KeyNotFound`] and [`CfgError::NotAMapping`] to
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any other error is returned unchanged.
    fn optional(self) -> CfgResult<Option<T>>;
}

impl<T> MissingExt<T> for CfgResult<T> {
    fn optional(self) -> CfgResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
