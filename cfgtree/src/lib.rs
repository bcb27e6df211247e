//! Hierarchical configuration store with cascading JSON sources.
//!
//! A [`ConfigStore`] owns one nested JSON object. Literal mappings, JSON
//! text, JSON files and command-line arguments are merged into it with
//! "last write wins" semantics at the leaves, and values are addressed with
//! dotted keys such as `"output.format"`.
//!
//! After the initial sources are merged, [`ConfigStore::evaluate`] resolves
//! two well-known keys:
//!
//! - [`DEPRECATED_CONFIG_FILE_KEY`] hands a legacy file to a
//!   [`LegacyConverter`];
//! - [`JSON_SOURCES_KEY`] lists further `json:`/`file:` sources, which may in
//!   turn list more.
//!
//! ```
//! use cfgtree::ConfigStore;
//! use serde_json::json;
//!
//! let mut store = ConfigStore::new();
//! store.merge_json_str(r#"{"a": {"b": 1, "c": 2}}"#)?;
//! store.merge_cmd_line(["--json", r#"json:{"a": {"c": 3}}"#])?;
//! store.evaluate()?;
//! assert_eq!(store.get_required("a")?, &json!({"b": 1, "c": 3}));
//! # Ok::<_, std::sync::Arc<cfgtree::CfgError>>(())
//! ```

mod error;
pub mod key_path;
pub mod merge;
mod result_ext;
pub mod source;
mod store;

use std::sync::Arc;

pub use error::CfgError;
pub use key_path::{IntoKeyPath, KeyPath};
pub use result_ext::{CfgResultExt, MissingExt};
pub use store::{
    ConfigStore, DEFAULT_RESOLUTION_LIMIT, DEPRECATED_CONFIG_FILE_KEY, JSON_SOURCES_KEY,
    LegacyConverter, StoreOptions, UnsupportedLegacy,
};

/// Result type used throughout the crate.
pub type CfgResult<T> = Result<T, Arc<CfgError>>;
