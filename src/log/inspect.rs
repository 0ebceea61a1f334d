//! 调试形式渲染
//!
//! 以单行、类似 Node.js `util.inspect` 的风格渲染 JSON 值，例如 `{ foo: 'bar' }`。
//!
//! 与 Node.js 不同，输出总是单行：超过约 72 列时 Node.js 会折行，这里不折行，
//! 保证每条日志只占一行

use serde_json::{Map, Number, Value};

/// 超过该嵌套深度的对象和数组以 `[Object]` / `[Array]` 代替
pub const MAX_DEPTH: usize = 2;

/// 数组最多展示的元素个数
pub const MAX_ARRAY_ITEMS: usize = 100;

/// 渲染值的调试形式
pub fn inspect(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_json_number(n)),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => write_array(out, items, depth),
        Value::Object(map) => write_object(out, map, depth),
    }
}

fn write_array(out: &mut String, items: &[Value], depth: usize) {
    if depth > MAX_DEPTH {
        out.push_str("[Array]");
        return;
    }
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[ ");
    for (i, item) in items.iter().take(MAX_ARRAY_ITEMS).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(out, item, depth + 1);
    }
    if items.len() > MAX_ARRAY_ITEMS {
        let remaining = items.len() - MAX_ARRAY_ITEMS;
        out.push_str(&format!(
            ", ... {} more item{}",
            remaining,
            if remaining > 1 { "s" } else { "" }
        ));
    }
    out.push_str(" ]");
}

fn write_object(out: &mut String, map: &Map<String, Value>, depth: usize) {
    if depth > MAX_DEPTH {
        out.push_str("[Object]");
        return;
    }
    if map.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{ ");
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if is_identifier(key) {
            out.push_str(key);
        } else {
            write_quoted(out, key);
        }
        out.push_str(": ");
        write_value(out, value, depth + 1);
    }
    out.push_str(" }");
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_quoted(out: &mut String, s: &str) {
    // 含单引号且不含双引号时改用双引号，避免转义
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// 以 JavaScript 数字的风格渲染 JSON 数字（整数值的浮点数不带小数部分）
pub fn format_json_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
}

/// 以 JavaScript 数字的风格渲染浮点数
pub fn format_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}
