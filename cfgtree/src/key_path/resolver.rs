//! Path-addressed read, write and append over a nested JSON object.
//!
//! All writers share [`change`], which walks the intermediate segments and
//! creates empty mappings where they are missing; only the terminal action
//! differs between them.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::KeyPath;
use crate::{CfgError, CfgResult};

/// Return the value stored at `path`.
///
/// # Errors
///
/// Returns [`CfgError::KeyNotFound`] when a segment is absent and
/// [`CfgError::NotAMapping`] when an intermediate value is not an object.
///
/// # Examples
///
/// ```
/// use cfgtree::{KeyPath, key_path};
/// use serde_json::json;
///
/// let tree = json!({"a": {"b": 1}});
/// let tree = tree.as_object().ok_or("not an object")?;
/// assert_eq!(key_path::get(tree, &KeyPath::parse("a.b"))?, &json!(1));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn get<'t>(tree: &'t Map<String, Value>, path: &KeyPath) -> CfgResult<&'t Value> {
    let (last, parents) = path.split_last();
    let mut node = tree;
    for segment in parents {
        let value = node
            .get(segment)
            .ok_or_else(|| CfgError::key_not_found(path, segment))?;
        node = value
            .as_object()
            .ok_or_else(|| CfgError::not_a_mapping(path, segment))?;
    }
    node.get(last)
        .ok_or_else(|| CfgError::key_not_found(path, last))
}

/// Walk to the parent mapping of `path`, creating empty mappings on the way,
/// then hand it and the terminal segment to `action`.
fn change<F>(tree: &mut Map<String, Value>, path: &KeyPath, action: F) -> CfgResult<()>
where
    F: FnOnce(&mut Map<String, Value>, &str) -> CfgResult<()>,
{
    let (last, parents) = path.split_last();
    let mut node = tree;
    for segment in parents {
        let child = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        node = child
            .as_object_mut()
            .ok_or_else(|| CfgError::not_a_mapping(path, segment))?;
    }
    action(node, last)
}

/// Store `value` at `path` unless something is already there.
///
/// # Errors
///
/// Returns [`CfgError::KeyAlreadySet`] when the terminal key exists and
/// [`CfgError::NotAMapping`] when an intermediate value is not an object.
pub fn set(tree: &mut Map<String, Value>, path: &KeyPath, value: Value) -> CfgResult<()> {
    change(tree, path, |node, last| match node.entry(last) {
        Entry::Occupied(_) => Err(std::sync::Arc::new(CfgError::KeyAlreadySet {
            key: path.to_string(),
        })),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    })
}

/// Append `value` to the sequence at `path`, creating the sequence if absent.
///
/// # Errors
///
/// Returns [`CfgError::NotASequence`] when the terminal value exists but is
/// not an array and [`CfgError::NotAMapping`] for a non-object intermediate.
pub fn append_to_list(tree: &mut Map<String, Value>, path: &KeyPath, value: Value) -> CfgResult<()> {
    change(tree, path, |node, last| {
        let slot = node
            .entry(last)
            .or_insert_with(|| Value::Array(Vec::new()));
        let Value::Array(items) = slot else {
            return Err(CfgError::not_a_sequence(path));
        };
        items.push(value);
        Ok(())
    })
}

/// Remove and return the value at `path`. Intermediate mappings are left in
/// place even when they become empty.
///
/// # Errors
///
/// Fails like [`get`] when the path does not resolve.
pub fn remove(tree: &mut Map<String, Value>, path: &KeyPath) -> CfgResult<Value> {
    let (last, parents) = path.split_last();
    let mut node = tree;
    for segment in parents {
        let value = node
            .get_mut(segment)
            .ok_or_else(|| CfgError::key_not_found(path, segment))?;
        node = value
            .as_object_mut()
            .ok_or_else(|| CfgError::not_a_mapping(path, segment))?;
    }
    node.remove(last)
        .ok_or_else(|| CfgError::key_not_found(path, last))
}
