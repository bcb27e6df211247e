//! Recursive "last write wins" merging of configuration mappings.

use serde_json::{Map, Value};

/// Apply one source's `layer` over the value already stored at a key.
///
/// A mapping layer is merged key by key into `target`, discarding whatever
/// non-mapping value `target` held before. Any other layer (scalar, list or
/// null) becomes the new value outright.
///
/// # Examples
///
/// ```rust
/// use cfgtree::merge::merge_value;
/// use serde_json::json;
///
/// // Defaults, then a later source overriding only `output.dir`.
/// let mut output = json!({"dir": "out", "format": "html"});
/// merge_value(&mut output, json!({"dir": "build"}));
/// assert_eq!(output, json!({"dir": "build", "format": "html"}));
///
/// // `global.modules.directories` is replaced, never concatenated.
/// let mut directories = json!(["modules"]);
/// merge_value(&mut directories, json!(["plugins"]));
/// assert_eq!(directories, json!(["plugins"]));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(entries) => match target {
            Value::Object(existing) => merge_mapping(existing, entries),
            other => *other = Value::Object(entries),
        },
        leaf => *target = leaf,
    }
}

/// Merge every entry of `source` into `destination`.
///
/// Keys missing from `destination` are inserted, mapping/mapping collisions
/// recurse, and every other collision is won by `source`. A sparse later
/// source can therefore override a single leaf deep inside an earlier one.
///
/// # Examples
///
/// ```rust
/// use cfgtree::merge::merge_mapping;
/// use serde_json::{json, Value};
///
/// let Value::Object(mut dst) = json!({"a": {"b": 1, "c": 2}}) else { unreachable!() };
/// let Value::Object(src) = json!({"a": {"c": 3, "d": 4}}) else { unreachable!() };
/// merge_mapping(&mut dst, src);
/// assert_eq!(Value::Object(dst), json!({"a": {"b": 1, "c": 3, "d": 4}}));
/// ```
pub fn merge_mapping(destination: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match destination.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                destination.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn merged(base: Value, layer: Value) -> Value {
        let mut acc = base;
        merge_value(&mut acc, layer);
        acc
    }

    #[rstest]
    #[case::disjoint(json!({"a": 1}), json!({"b": 2}), json!({"a": 1, "b": 2}))]
    #[case::nested_override(
        json!({"a": {"b": 1, "c": 2}}),
        json!({"a": {"c": 3, "d": 4}}),
        json!({"a": {"b": 1, "c": 3, "d": 4}})
    )]
    #[case::scalar_over_mapping(json!({"a": {"b": 1}}), json!({"a": 5}), json!({"a": 5}))]
    #[case::mapping_over_scalar(json!({"a": 5}), json!({"a": {"b": 1}}), json!({"a": {"b": 1}}))]
    #[case::list_replaces_list(json!({"a": [1, 2]}), json!({"a": [3]}), json!({"a": [3]}))]
    #[case::null_wins(json!({"a": 1}), json!({"a": null}), json!({"a": null}))]
    #[case::deep(
        json!({"x": {"y": {"z": 1, "keep": true}}}),
        json!({"x": {"y": {"z": 2}}}),
        json!({"x": {"y": {"z": 2, "keep": true}}})
    )]
    fn later_layer_wins_at_leaves(#[case] base: Value, #[case] layer: Value, #[case] expected: Value) {
        assert_eq!(merged(base, layer), expected);
    }

    #[test]
    fn empty_layer_is_identity() {
        let base = json!({"a": {"b": [1, 2]}});
        assert_eq!(merged(base.clone(), json!({})), base);
    }
}
