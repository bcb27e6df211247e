//! The configuration store: one owned tree fed by many sources.

mod evaluate;
mod legacy;
mod options;

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::key_path::{self, IntoKeyPath};
use crate::merge::merge_mapping;
use crate::source::{self, CmdLineParams, CommandLineAdapter, SourceToken};
use crate::{CfgError, CfgResult, MissingExt};

pub use evaluate::{DEPRECATED_CONFIG_FILE_KEY, JSON_SOURCES_KEY};
pub use legacy::{LegacyConverter, UnsupportedLegacy};
pub use options::{DEFAULT_RESOLUTION_LIMIT, StoreOptions};

/// Holds configuration values merged from every source into one tree.
///
/// Values are addressed with dotted keys such as `"global.modules"` or with
/// pre-split segment lists.
///
/// # Examples
///
/// ```
/// use cfgtree::ConfigStore;
/// use serde_json::json;
///
/// let mut store = ConfigStore::new();
/// store.merge_json_str(r#"{"output": {"format": "html", "dir": "out"}}"#)?;
/// store.merge_json_str(r#"json:{"output": {"dir": "build"}}"#)?;
/// assert_eq!(store.get_required("output.dir")?, &json!("build"));
/// assert_eq!(store.get_optional("output.style", "plain"), json!("plain"));
/// # Ok::<_, std::sync::Arc<cfgtree::CfgError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    tree: Map<String, Value>,
    options: StoreOptions,
}

impl ConfigStore {
    /// Create an empty store with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given options.
    #[must_use]
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            tree: Map::new(),
            options,
        }
    }

    /// Create a store holding the contents of a JSON object string.
    ///
    /// # Errors
    ///
    /// Fails like [`ConfigStore::merge_json_str`].
    pub fn from_json_str(text: &str) -> CfgResult<Self> {
        let mut store = Self::new();
        store.merge_json_str(text)?;
        Ok(store)
    }

    /// Options in effect for this store.
    #[must_use]
    pub const fn options(&self) -> StoreOptions {
        self.options
    }

    /// Borrow the whole tree.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.tree
    }

    /// Consume the store, returning the tree as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.tree)
    }

    /// Merge a mapping into the tree; later values win at the leaves.
    pub fn merge_mapping(&mut self, mapping: Map<String, Value>) {
        debug!(keys = mapping.len(), "merging mapping");
        merge_mapping(&mut self.tree, mapping);
    }

    /// Merge JSON text, with or without a leading `json:`.
    ///
    /// The tree is untouched when the text fails to parse or is not an
    /// object.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::InvalidJson`] or [`CfgError::MalformedSource`].
    pub fn merge_json_str(&mut self, text: &str) -> CfgResult<()> {
        let mapping = source::parse_json_text(text)?;
        self.merge_mapping(mapping);
        Ok(())
    }

    /// Merge a JSON file, optionally named with a `file:`/`file://` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::SourceUnavailable`] for I/O failures, otherwise
    /// fails like [`ConfigStore::merge_json_str`].
    pub fn merge_json_file(&mut self, path: impl AsRef<Path>) -> CfgResult<()> {
        let mapping = source::load_json_file(path.as_ref())?;
        self.merge_mapping(mapping);
        Ok(())
    }

    /// Merge command-line arguments using [`CmdLineParams`].
    ///
    /// `args` must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::CommandLine`] when the arguments do not parse.
    pub fn merge_cmd_line<I, S>(&mut self, args: I) -> CfgResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        self.merge_cmd_line_with(&CmdLineParams::default(), &tokens)
    }

    /// Merge command-line arguments translated by `adapter`, in the order the
    /// adapter returns its mappings.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's failure; nothing is merged in that case.
    pub fn merge_cmd_line_with(
        &mut self,
        adapter: &dyn CommandLineAdapter,
        args: &[String],
    ) -> CfgResult<()> {
        for mapping in adapter.create_dicts(args)? {
            self.merge_mapping(mapping);
        }
        Ok(())
    }

    /// Merge the source named by a `json:` or `file:` token.
    ///
    /// Tokens with any other prefix are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Fails like [`ConfigStore::merge_json_str`] or
    /// [`ConfigStore::merge_json_file`].
    pub fn merge_source(&mut self, token: &str) -> CfgResult<()> {
        match SourceToken::parse(token) {
            SourceToken::Json(text) => self.merge_json_str(text),
            SourceToken::File(path) => {
                let mapping = source::read_json_file(path)?;
                self.merge_mapping(mapping);
                Ok(())
            }
            SourceToken::Unrecognised(other) => {
                warn!(token = other, "ignoring configuration source with unknown prefix");
                Ok(())
            }
        }
    }

    /// Look up `key`, exposing the resolver's own failures.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::KeyNotFound`], [`CfgError::NotAMapping`] or
    /// [`CfgError::EmptyKeyPath`].
    pub fn get_raw(&self, key: impl IntoKeyPath) -> CfgResult<&Value> {
        let path = key.into_key_path()?;
        key_path::get(&self.tree, &path)
    }

    /// Look up a value the caller cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::MandatoryValueMissing`] naming the key when it does
    /// not resolve. An empty segment list never resolves and is reported the
    /// same way, with an empty key.
    pub fn get_required(&self, key: impl IntoKeyPath) -> CfgResult<&Value> {
        let path = mandatory_path(key)?;
        key_path::get(&self.tree, &path)
            .optional()?
            .ok_or_else(|| {
                Arc::new(CfgError::MandatoryValueMissing {
                    key: path.to_string(),
                })
            })
    }

    /// Look up `key`, returning `default` when it does not resolve.
    ///
    /// An empty segment list never resolves.
    #[must_use]
    pub fn get_optional(&self, key: impl IntoKeyPath, default: impl Into<Value>) -> Value {
        key.into_key_path()
            .ok()
            .and_then(|path| key_path::get(&self.tree, &path).ok())
            .map_or_else(|| default.into(), Clone::clone)
    }

    /// Look up a mandatory value and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::MandatoryValueMissing`] when absent and
    /// [`CfgError::TypeMismatch`] when the value has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: impl IntoKeyPath) -> CfgResult<T> {
        let path = mandatory_path(key)?;
        let value = self.get_required(&path)?;
        deserialize_at(&path, value)
    }

    /// Look up an optional value and deserialize it into `T`, falling back to
    /// `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::TypeMismatch`] when a value is present but has the
    /// wrong shape.
    pub fn get_optional_as<T: DeserializeOwned>(
        &self,
        key: impl IntoKeyPath,
        default: T,
    ) -> CfgResult<T> {
        let path = key.into_key_path()?;
        match key_path::get(&self.tree, &path).optional()? {
            Some(value) => deserialize_at(&path, value),
            None => Ok(default),
        }
    }

    /// Whether `key` resolves to a value.
    #[must_use]
    pub fn contains(&self, key: impl IntoKeyPath) -> bool {
        key.into_key_path()
            .is_ok_and(|path| key_path::get(&self.tree, &path).is_ok())
    }

    /// Assign `value` to `key` unless a value is already stored there.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::DuplicateKey`] when `key` is already set and
    /// [`CfgError::NotAMapping`] when an intermediate value is not a mapping.
    pub fn set_once(&mut self, key: impl IntoKeyPath, value: impl Into<Value>) -> CfgResult<()> {
        let path = key.into_key_path()?;
        key_path::set(&mut self.tree, &path, value.into()).map_err(|err| {
            if let CfgError::KeyAlreadySet { key } = err.as_ref() {
                return Arc::new(CfgError::DuplicateKey { key: key.clone() });
            }
            err
        })
    }

    /// Append `value` to the list at `key`, creating the list if absent.
    ///
    /// # Errors
    ///
    /// Returns [`CfgError::NotASequence`] when `key` holds something other
    /// than a list.
    pub fn append_list(&mut self, key: impl IntoKeyPath, value: impl Into<Value>) -> CfgResult<()> {
        let path = key.into_key_path()?;
        key_path::append_to_list(&mut self.tree, &path, value.into())
    }
}

fn mandatory_path(key: impl IntoKeyPath) -> CfgResult<key_path::KeyPath> {
    key.into_key_path().map_err(|_| {
        Arc::new(CfgError::MandatoryValueMissing {
            key: String::new(),
        })
    })
}

fn deserialize_at<T: DeserializeOwned>(path: &key_path::KeyPath, value: &Value) -> CfgResult<T> {
    T::deserialize(value).map_err(|source| {
        Arc::new(CfgError::TypeMismatch {
            key: path.to_string(),
            source,
        })
    })
}
