//! Evaluation: legacy redirection followed by cascading JSON sources.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::{ConfigStore, LegacyConverter, UnsupportedLegacy};
use crate::key_path::{self, KeyPath};
use crate::{CfgError, CfgResult, MissingExt};

/// Key naming a legacy configuration file to convert.
pub const DEPRECATED_CONFIG_FILE_KEY: &str = "configuration.deprecated.config_file";

/// Key holding a list of further `json:`/`file:` sources.
pub const JSON_SOURCES_KEY: &str = "configuration.json";

impl ConfigStore {
    /// Resolve the well-known redirect keys, rejecting legacy redirects.
    ///
    /// Equivalent to [`ConfigStore::evaluate_with`] using
    /// [`UnsupportedLegacy`].
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::evaluate_with`].
    pub fn evaluate(&mut self) -> CfgResult<()> {
        self.evaluate_with(&UnsupportedLegacy)
    }

    /// Resolve the well-known redirect keys.
    ///
    /// First, if [`DEPRECATED_CONFIG_FILE_KEY`] is set it is removed (along
    /// with parents it leaves empty) and its path is handed to `legacy`.
    /// Then, while [`JSON_SOURCES_KEY`] is set, it is removed and every
    /// source it lists is merged in order; a merged source may set the key
    /// again to request a further round.
    ///
    /// # Errors
    ///
    /// Returns the converter's or a source's failure,
    /// [`CfgError::MalformedSource`] when a redirect key holds the wrong
    /// type, and [`CfgError::ResolutionLimitExceeded`] when cascading does
    /// not settle within [`StoreOptions::resolution_limit`](super::StoreOptions)
    /// rounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::ConfigStore;
    /// use serde_json::json;
    ///
    /// let mut store = ConfigStore::from_json_str(
    ///     r#"{"configuration": {"json": ["json:{\"x\": 1}"]}}"#,
    /// )?;
    /// store.evaluate()?;
    /// assert_eq!(store.get_required("x")?, &json!(1));
    /// assert!(!store.contains("configuration.json"));
    /// # Ok::<_, std::sync::Arc<cfgtree::CfgError>>(())
    /// ```
    pub fn evaluate_with(&mut self, legacy: &dyn LegacyConverter) -> CfgResult<()> {
        self.evaluate_legacy(legacy)?;
        self.evaluate_json_sources()
    }

    fn evaluate_legacy(&mut self, legacy: &dyn LegacyConverter) -> CfgResult<()> {
        let key = KeyPath::parse(DEPRECATED_CONFIG_FILE_KEY);
        let Some(value) = key_path::remove(&mut self.tree, &key).optional()? else {
            return Ok(());
        };
        self.prune_empty_parents(&key);
        let Value::String(file) = value else {
            return Err(CfgError::malformed(
                DEPRECATED_CONFIG_FILE_KEY,
                "legacy configuration file must be a string",
            ));
        };
        info!(path = %file, "converting legacy configuration file");
        legacy.convert(self, Path::new(&file))
    }

    fn evaluate_json_sources(&mut self) -> CfgResult<()> {
        let key = KeyPath::parse(JSON_SOURCES_KEY);
        let limit = self.options.resolution_limit;
        let mut rounds = 0_usize;
        // The key is removed before its sources are merged so that a source
        // can set it again.
        while let Some(value) = key_path::remove(&mut self.tree, &key).optional()? {
            if rounds == limit {
                return Err(Arc::new(CfgError::ResolutionLimitExceeded { limit }));
            }
            rounds += 1;
            let tokens = source_tokens(value)?;
            debug!(round = rounds, sources = tokens.len(), "resolving cascaded sources");
            for token in &tokens {
                self.merge_source(token)?;
            }
        }
        Ok(())
    }

    /// Remove each ancestor of `key` that is now an empty mapping, innermost
    /// first, stopping at the first one that still holds entries.
    fn prune_empty_parents(&mut self, key: &KeyPath) {
        let mut current = key.parent();
        while let Some(parent) = current {
            let is_empty = key_path::get(&self.tree, &parent)
                .is_ok_and(|value| value.as_object().is_some_and(serde_json::Map::is_empty));
            if !is_empty {
                break;
            }
            if key_path::remove(&mut self.tree, &parent).is_err() {
                break;
            }
            current = parent.parent();
        }
    }
}

/// Interpret the value of [`JSON_SOURCES_KEY`] as a list of source tokens.
fn source_tokens(value: Value) -> CfgResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(CfgError::malformed(
            JSON_SOURCES_KEY,
            "expected a list of source strings",
        ));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(token) => Ok(token),
            _ => Err(CfgError::malformed(
                JSON_SOURCES_KEY,
                "expected a list of source strings",
            )),
        })
        .collect()
}
