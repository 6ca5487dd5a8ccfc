//! Merging of config layers.

use serde_json::Value;

/// Merge an overlay layer into the accumulated config, consuming it.
///
/// Objects merge key by key; any other overlay value replaces the base.
pub(super) fn merge_layer(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_layer(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::merge_layer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_scalars_override() {
        let mut base = json!({ "logging": { "level": "error", "dir": "logs" } });
        merge_layer(
            &mut base,
            json!({ "logging": { "level": "debug" }, "review": { "count": 5 } }),
        );
        assert_eq!(
            base,
            json!({
                "logging": { "level": "debug", "dir": "logs" },
                "review": { "count": 5 }
            })
        );
    }
}
