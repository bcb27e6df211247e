//! Hook for converting legacy single-file configuration.

use std::path::Path;
use std::sync::Arc;

use super::ConfigStore;
use crate::{CfgError, CfgResult};

/// Converts a legacy configuration file and merges the result into `store`.
///
/// Implementations are handed the store being evaluated and should merge
/// their translated content through its public merge methods.
pub trait LegacyConverter {
    /// Convert the file at `path` into `store`.
    ///
    /// # Errors
    ///
    /// Returns whatever failure the conversion or the merge produced.
    fn convert(&self, store: &mut ConfigStore, path: &Path) -> CfgResult<()>;
}

impl<F> LegacyConverter for F
where
    F: Fn(&mut ConfigStore, &Path) -> CfgResult<()>,
{
    fn convert(&self, store: &mut ConfigStore, path: &Path) -> CfgResult<()> {
        self(store, path)
    }
}

/// Converter used by [`ConfigStore::evaluate`]; it understands no legacy
/// format and fails whenever a legacy file is actually referenced.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedLegacy;

impl LegacyConverter for UnsupportedLegacy {
    fn convert(&self, _store: &mut ConfigStore, path: &Path) -> CfgResult<()> {
        Err(Arc::new(CfgError::LegacyUnsupported {
            path: path.to_path_buf(),
        }))
    }
}
