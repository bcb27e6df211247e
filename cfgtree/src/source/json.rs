//! JSON text and JSON file adapters.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::{JSON_PREFIX, strip_file_prefix};
use crate::{CfgError, CfgResult};

/// Name of a JSON value's type for diagnostics.
const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `value` to be an object, returning its mapping.
fn into_mapping(value: Value, origin: &str) -> CfgResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CfgError::malformed(
            origin,
            format!(
                "top level must be an object, but found type: {}",
                kind_of(&other)
            ),
        )),
    }
}

/// Parse JSON text, with or without a leading `json:`, into a mapping.
///
/// # Errors
///
/// Returns [`CfgError::InvalidJson`] when the text does not parse and
/// [`CfgError::MalformedSource`] when its top level is not an object.
///
/// # Examples
///
/// ```
/// use cfgtree::source::parse_json_text;
///
/// let map = parse_json_text("json:{\"port\": 8080}")?;
/// assert_eq!(map["port"], 8080);
/// assert!(parse_json_text("[1, 2]").is_err());
/// # Ok::<_, std::sync::Arc<cfgtree::CfgError>>(())
/// ```
pub fn parse_json_text(text: &str) -> CfgResult<Map<String, Value>> {
    let body = text.strip_prefix(JSON_PREFIX).unwrap_or(text);
    let value: Value =
        serde_json::from_str(body).map_err(|e| CfgError::invalid_json("inline JSON", e))?;
    let map = into_mapping(value, "inline JSON")?;
    debug!(keys = map.len(), "parsed inline JSON source");
    Ok(map)
}

/// Read a JSON file, optionally named with a `file:` or `file://` prefix, into
/// a mapping.
///
/// The file is read in one go; no handle outlives the call.
///
/// # Errors
///
/// Returns [`CfgError::SourceUnavailable`] carrying the original I/O error
/// when the file cannot be read, [`CfgError::InvalidJson`] when it does not
/// parse and [`CfgError::MalformedSource`] when its top level is not an
/// object.
pub fn load_json_file(path: &Path) -> CfgResult<Map<String, Value>> {
    let file = path
        .to_str()
        .and_then(strip_file_prefix)
        .map_or(path, Path::new);
    read_json_file(file)
}

/// Read the JSON file at exactly `file`; no prefix is removed.
pub(crate) fn read_json_file(file: &Path) -> CfgResult<Map<String, Value>> {
    let origin = file.display().to_string();
    let data = std::fs::read_to_string(file).map_err(|e| CfgError::unavailable(file, e))?;
    let value: Value =
        serde_json::from_str(&data).map_err(|e| CfgError::invalid_json(origin.as_str(), e))?;
    let map = into_mapping(value, &origin)?;
    debug!(path = %origin, keys = map.len(), "loaded JSON file source");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use std::io::ErrorKind;

    #[rstest]
    #[case("{\"a\": 1}")]
    #[case("json:{\"a\": 1}")]
    fn parses_with_or_without_prefix(#[case] text: &str) -> Result<()> {
        let map = parse_json_text(text)?;
        ensure!(map.get("a") == Some(&Value::from(1)));
        Ok(())
    }

    #[rstest]
    #[case("[1, 2]", "array")]
    #[case("\"text\"", "string")]
    #[case("42", "number")]
    #[case("null", "null")]
    fn non_object_top_level_is_malformed(#[case] text: &str, #[case] kind: &str) -> Result<()> {
        let err = parse_json_text(text)
            .err()
            .ok_or_else(|| anyhow!("{text} parsed as a mapping"))?;
        match err.as_ref() {
            CfgError::MalformedSource { reason, .. } => {
                ensure!(reason.contains(kind), "reason was {reason}");
            }
            other => return Err(anyhow!("unexpected error {other}")),
        }
        Ok(())
    }

    #[test]
    fn syntax_errors_are_invalid_json() {
        let err = parse_json_text("json:{not json").err();
        assert!(matches!(err.as_deref(), Some(CfgError::InvalidJson { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("file:")]
    #[case("file://")]
    fn reads_file_with_any_prefix(#[case] prefix: &str) -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("cfg.json");
        std::fs::write(&file, r#"{"nested": {"k": "v"}}"#)?;
        let token = format!("{prefix}{}", file.display());
        let map = load_json_file(Path::new(&token))?;
        ensure!(map.get("nested").and_then(|n| n.get("k")) == Some(&Value::from("v")));
        Ok(())
    }

    fn prefixed_temp_dir() -> Result<(tempfile::TempDir, String)> {
        let dir = tempfile::Builder::new().prefix("file:").tempdir_in(".")?;
        let name = dir
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("temporary directory has no UTF-8 name"))?;
        std::fs::write(dir.path().join("cfg.json"), r#"{"which": "literal"}"#)?;
        Ok((dir, name))
    }

    #[rstest]
    #[case("file:")]
    #[case("file://")]
    fn only_one_prefix_is_removed(#[case] prefix: &str) -> Result<()> {
        let (_dir, name) = prefixed_temp_dir()?;
        let token = format!("{prefix}{name}/cfg.json");
        let map = load_json_file(Path::new(&token))?;
        ensure!(map.get("which") == Some(&Value::from("literal")));
        Ok(())
    }

    #[test]
    fn read_keeps_a_leading_file_prefix() -> Result<()> {
        let (_dir, name) = prefixed_temp_dir()?;
        let map = read_json_file(Path::new(&format!("{name}/cfg.json")))?;
        ensure!(map.get("which") == Some(&Value::from("literal")));
        Ok(())
    }

    #[test]
    fn missing_file_keeps_io_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let err = load_json_file(&dir.path().join("absent.json"))
            .err()
            .ok_or_else(|| anyhow!("missing file loaded"))?;
        match err.as_ref() {
            CfgError::SourceUnavailable { source, .. } => {
                ensure!(source.kind() == ErrorKind::NotFound);
            }
            other => return Err(anyhow!("unexpected error {other}")),
        }
        Ok(())
    }

    #[test]
    fn file_with_list_is_malformed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("list.json");
        std::fs::write(&file, "[1]")?;
        let err = load_json_file(&file).err();
        ensure!(matches!(err.as_deref(), Some(CfgError::MalformedSource { .. })));
        Ok(())
    }
}
