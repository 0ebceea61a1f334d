//! 字段合并
//!
//! 将多层字段按顺序合并为一条记录，后面的层覆盖前面的层

use serde_json::{Map, Value};

/// 按顺序合并多层字段
///
/// - 同名键由后面的层覆盖
/// - 双方都是对象时递归合并，数组整体替换
/// - 后面层中值为 `null` 的键视为缺失，不覆盖也不新增；
///   目标中不存在的对象整体插入，其中的 `null` 原样保留
/// - 键顺序为首次插入的顺序
pub fn merge_layers<I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut merged = Map::new();
    for layer in layers {
        merge_into(&mut merged, layer);
    }
    merged
}

/// 将一层字段合并进目标
pub fn merge_into(target: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        match value {
            Value::Null => {}
            Value::Object(source) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => merge_into(existing, source),
                _ => {
                    target.insert(key, Value::Object(source));
                }
            },
            other => {
                target.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_later_layer_wins() {
        let merged = merge_layers([
            object(json!({ "_time": "t", "requestId": "a" })),
            object(json!({ "requestId": "b", "path": "/" })),
        ]);
        assert_eq!(Value::Object(merged), json!({ "_time": "t", "requestId": "b", "path": "/" }));
    }

    #[test]
    fn test_key_order_is_first_insertion() {
        let merged = merge_layers([
            object(json!({ "_time": "t", "_tags": [] })),
            object(json!({ "b": 1, "a": 2 })),
            object(json!({ "_time": "override" })),
        ]);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_time", "_tags", "b", "a"]);
        assert_eq!(merged["_time"], "override");
    }

    #[test]
    fn test_nested_objects_merge() {
        let merged = merge_layers([
            object(json!({ "query": { "a": 1, "b": 2 } })),
            object(json!({ "query": { "b": 3, "c": 4 } })),
        ]);
        assert_eq!(merged["query"], json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn test_arrays_are_replaced() {
        let merged = merge_layers([
            object(json!({ "_tags": ["a", "b"] })),
            object(json!({ "_tags": ["c"] })),
        ]);
        assert_eq!(merged["_tags"], json!(["c"]));
    }

    #[test]
    fn test_null_does_not_override() {
        let merged = merge_layers([
            object(json!({ "referer": "http://foo.com" })),
            object(json!({ "referer": null, "extra": null })),
        ]);
        assert_eq!(merged["referer"], "http://foo.com");
        assert!(!merged.contains_key("extra"));
    }

    #[test]
    fn test_nested_nulls_kept_in_new_object() {
        let merged = merge_layers([
            object(json!({ "_time": "t" })),
            object(json!({ "user": { "email": null, "id": 1 }, "top": null })),
        ]);
        assert_eq!(merged["user"], json!({ "email": null, "id": 1 }));
        assert!(!merged.contains_key("top"));
    }

    #[test]
    fn test_nested_null_does_not_override_existing() {
        let merged = merge_layers([
            object(json!({ "user": { "email": "a@b.c", "id": 1 } })),
            object(json!({ "user": { "email": null, "name": null, "id": 2 } })),
        ]);
        assert_eq!(merged["user"], json!({ "email": "a@b.c", "id": 2 }));
    }

    #[test]
    fn test_object_replaces_scalar() {
        let merged = merge_layers([
            object(json!({ "user": "alice" })),
            object(json!({ "user": { "id": 1 } })),
        ]);
        assert_eq!(merged["user"], json!({ "id": 1 }));
    }

    #[test]
    fn test_empty_layers() {
        let merged = merge_layers(Vec::<Map<String, Value>>::new());
        assert!(merged.is_empty());
    }
}
