//! Field-level locale fallback merge.
//!
//! Merges a localized story content tree with its English baseline so that
//! untranslated or empty fields fall back field-by-field, not document-by-
//! document. The merge operates on the raw JSON tree; blocks are only
//! typed at render time.

use std::collections::HashMap;

use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Whether a value counts as "untranslated" for fallback purposes:
/// unset, or a string containing only whitespace.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Deep-merge `baseline` into `localized`.
///
/// Localized values win whenever they are semantically non-empty:
/// - objects merge as the union of keys, recursively per key
/// - arrays merge element-by-element via [`merge_arrays_by_uid`]
/// - primitive leaves take the localized value unless it is empty
///
/// No field appears in the output that is absent from both inputs, and the
/// merge is deterministic: the same two inputs always produce the same
/// output.
pub fn merge_values(localized: &Value, baseline: &Value) -> Value {
    if is_empty_value(localized) {
        return baseline.clone();
    }

    if localized.is_array() || baseline.is_array() {
        let localized_items = localized.as_array().map(Vec::as_slice).unwrap_or(&[]);
        let baseline_items = baseline.as_array().map(Vec::as_slice).unwrap_or(&[]);
        return Value::Array(merge_arrays_by_uid(localized_items, baseline_items));
    }

    match (localized, baseline) {
        (Value::Object(localized_map), Value::Object(baseline_map)) => {
            let mut merged = Map::new();
            for (key, baseline_value) in baseline_map {
                let value = match localized_map.get(key) {
                    Some(localized_value) => merge_values(localized_value, baseline_value),
                    None => baseline_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            for (key, localized_value) in localized_map {
                if !baseline_map.contains_key(key) {
                    merged.insert(key.clone(), localized_value.clone());
                }
            }
            Value::Object(merged)
        }
        _ => localized.clone(),
    }
}

/// Merge two block arrays, pairing elements by stable identity.
///
/// Elements pair by their `_uid` when present (position-independent), else
/// by positional index. Paired elements merge recursively; localized
/// elements without a counterpart are kept as-is. When the localized array
/// is empty the baseline array is taken whole.
///
/// Deliberate asymmetry: the result always iterates the localized array's
/// elements, so baseline-only elements beyond the localized array's own
/// membership are never appended. The localized structure bounds the
/// merged result.
pub fn merge_arrays_by_uid(localized: &[Value], baseline: &[Value]) -> Vec<Value> {
    if localized.is_empty() {
        return baseline.to_vec();
    }

    let mut baseline_by_key: HashMap<String, &Value> = HashMap::new();
    for (index, item) in baseline.iter().enumerate() {
        baseline_by_key.insert(array_item_key(item, index), item);
    }

    localized
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let counterpart = baseline_by_key
                .get(&array_item_key(item, index))
                .copied()
                .or_else(|| baseline.get(index))
                .unwrap_or(&NULL);
            merge_values(item, counterpart)
        })
        .collect()
}

fn array_item_key(item: &Value, index: usize) -> String {
    match item.get("_uid").and_then(Value::as_str) {
        Some(uid) => uid.to_owned(),
        None => format!("__idx_{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values_are_null_and_blank_strings() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   \t")));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!({})));
    }

    #[test]
    fn localized_leaf_wins_when_non_empty() {
        assert_eq!(
            merge_values(&json!("Willkommen"), &json!("Welcome")),
            json!("Willkommen")
        );
        assert_eq!(merge_values(&json!(7), &json!(3)), json!(7));
    }

    #[test]
    fn empty_leaf_falls_back_to_baseline() {
        assert_eq!(merge_values(&json!(""), &json!("Welcome")), json!("Welcome"));
        assert_eq!(merge_values(&json!("  "), &json!("Welcome")), json!("Welcome"));
        assert_eq!(merge_values(&Value::Null, &json!("Welcome")), json!("Welcome"));
    }

    #[test]
    fn objects_merge_as_union_of_keys() {
        let localized = json!({"title": "Willkommen", "subtitle": ""});
        let baseline = json!({"title": "Welcome", "subtitle": "Hi", "footer": "Imprint"});
        let merged = merge_values(&localized, &baseline);
        assert_eq!(
            merged,
            json!({"title": "Willkommen", "subtitle": "Hi", "footer": "Imprint"})
        );
    }

    #[test]
    fn merge_never_invents_fields() {
        let localized = json!({"a": "x"});
        let baseline = json!({"b": "y"});
        let merged = merge_values(&localized, &baseline);
        let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn localized_only_keys_survive() {
        let merged = merge_values(&json!({"extra": "de-only"}), &json!({}));
        assert_eq!(merged, json!({"extra": "de-only"}));
    }

    #[test]
    fn empty_title_in_body_falls_back() {
        let localized = json!({"body": [{"_uid": "b1", "component": "hero_banner", "title": ""}]});
        let baseline =
            json!({"body": [{"_uid": "b1", "component": "hero_banner", "title": "Welcome"}]});
        let merged = merge_values(&localized, &baseline);
        assert_eq!(merged["body"][0]["title"], "Welcome");
    }

    #[test]
    fn translated_title_wins() {
        let localized =
            json!({"body": [{"_uid": "b1", "component": "hero_banner", "title": "Willkommen"}]});
        let baseline =
            json!({"body": [{"_uid": "b1", "component": "hero_banner", "title": "Welcome"}]});
        let merged = merge_values(&localized, &baseline);
        assert_eq!(merged["body"][0]["title"], "Willkommen");
    }

    #[test]
    fn array_elements_pair_by_uid_regardless_of_position() {
        let localized = json!([
            {"_uid": "b", "text": ""},
            {"_uid": "a", "text": "A auf Deutsch"}
        ]);
        let baseline = json!([
            {"_uid": "a", "text": "A in English"},
            {"_uid": "b", "text": "B in English"}
        ]);
        let merged = merge_arrays_by_uid(
            localized.as_array().unwrap(),
            baseline.as_array().unwrap(),
        );
        // Localized order is preserved; counterparts found by uid.
        assert_eq!(merged[0]["text"], "B in English");
        assert_eq!(merged[1]["text"], "A auf Deutsch");
    }

    #[test]
    fn array_elements_without_uid_pair_by_position() {
        let localized = json!([{"text": ""}, {"text": "zwei"}]);
        let baseline = json!([{"text": "one"}, {"text": "two"}]);
        let merged = merge_arrays_by_uid(
            localized.as_array().unwrap(),
            baseline.as_array().unwrap(),
        );
        assert_eq!(merged[0]["text"], "one");
        assert_eq!(merged[1]["text"], "zwei");
    }

    #[test]
    fn localized_elements_without_counterpart_are_kept() {
        let localized = json!([{"_uid": "x", "text": "nur Deutsch"}]);
        let baseline = json!([{"_uid": "y", "text": "english"}]);
        let merged = merge_arrays_by_uid(
            localized.as_array().unwrap(),
            baseline.as_array().unwrap(),
        );
        assert_eq!(merged.len(), 1);
        // No uid match; the positional counterpart still backfills empties.
        assert_eq!(merged[0]["text"], "nur Deutsch");
    }

    #[test]
    fn baseline_only_elements_are_never_appended() {
        let localized = json!([{"_uid": "a", "text": "eins"}]);
        let baseline = json!([
            {"_uid": "a", "text": "one"},
            {"_uid": "b", "text": "two"}
        ]);
        let merged = merge_arrays_by_uid(
            localized.as_array().unwrap(),
            baseline.as_array().unwrap(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0]["text"], "eins");
    }

    #[test]
    fn empty_localized_array_takes_baseline_whole() {
        let baseline = json!([{"_uid": "a", "text": "one"}]);
        let merged = merge_arrays_by_uid(&[], baseline.as_array().unwrap());
        assert_eq!(Value::Array(merged), baseline);
    }

    #[test]
    fn empty_baseline_array_reproduces_localized() {
        let localized = json!([{"_uid": "a", "text": "eins"}]);
        let merged = merge_arrays_by_uid(localized.as_array().unwrap(), &[]);
        assert_eq!(Value::Array(merged), localized);
    }

    #[test]
    fn merge_is_deterministic() {
        let localized = json!({
            "title": "",
            "body": [
                {"_uid": "b", "text": "zwei", "nested": {"k": ""}},
                {"_uid": "a", "text": ""}
            ]
        });
        let baseline = json!({
            "title": "Welcome",
            "body": [
                {"_uid": "a", "text": "one"},
                {"_uid": "b", "text": "two", "nested": {"k": "v"}}
            ]
        });
        let first = serde_json::to_string(&merge_values(&localized, &baseline)).unwrap();
        let second = serde_json::to_string(&merge_values(&localized, &baseline)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nested_blocks_merge_recursively() {
        let localized = json!({
            "body": [{
                "_uid": "grid",
                "component": "grid",
                "columns": [
                    {"_uid": "f1", "component": "feature", "name": "Medizin", "text": ""},
                    {"_uid": "f2", "component": "feature", "name": "", "text": "Bauteile"}
                ]
            }]
        });
        let baseline = json!({
            "body": [{
                "_uid": "grid",
                "component": "grid",
                "columns": [
                    {"_uid": "f1", "component": "feature", "name": "Medical", "text": "Components"},
                    {"_uid": "f2", "component": "feature", "name": "Parts", "text": "Sheet parts"}
                ]
            }]
        });
        let merged = merge_values(&localized, &baseline);
        let columns = &merged["body"][0]["columns"];
        assert_eq!(columns[0]["name"], "Medizin");
        assert_eq!(columns[0]["text"], "Components");
        assert_eq!(columns[1]["name"], "Parts");
        assert_eq!(columns[1]["text"], "Bauteile");
    }
}
