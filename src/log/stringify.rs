//! 安全序列化
//!
//! 任意可序列化的值都能转换为 JSON，转换失败时以标记字符串代替，不向外抛出错误

use serde::Serialize;
use serde_json::Value;

/// 转换失败时的替代标记
pub const UNSERIALIZABLE: &str = "[Unserializable]";

/// 将任意可序列化的值转换为 `Value`，失败时返回标记字符串
pub fn to_safe_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| Value::String(UNSERIALIZABLE.to_string()))
}

/// 将任意可序列化的值序列化为紧凑的 JSON 字符串，失败时返回带引号的标记字符串
pub fn safe_stringify<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", UNSERIALIZABLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;
    use std::collections::HashMap;

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("broken"))
        }
    }

    #[test]
    fn test_to_safe_value() {
        let mut map = HashMap::new();
        map.insert("requestId", "abc");
        assert_eq!(to_safe_value(&map), serde_json::json!({ "requestId": "abc" }));
    }

    #[test]
    fn test_to_safe_value_failure_is_absorbed() {
        assert_eq!(to_safe_value(&Broken), Value::String(UNSERIALIZABLE.to_string()));
    }

    #[test]
    fn test_safe_stringify() {
        assert_eq!(safe_stringify(&serde_json::json!({ "a": [1, "b"] })), r#"{"a":[1,"b"]}"#);
        assert_eq!(safe_stringify(&Broken), "\"[Unserializable]\"");
    }

    #[test]
    fn test_non_string_map_keys_are_absorbed() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "value");
        assert_eq!(to_safe_value(&map), Value::String(UNSERIALIZABLE.to_string()));
    }
}
