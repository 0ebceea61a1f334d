//! printf 风格插值
//!
//! 第一个参数为字符串时作为模板，按位置替换 `%s %d %i %f %j %o %O %c`，`%%` 输出 `%`；
//! 多余的参数以空格分隔追加在末尾。第一个参数不是字符串或模板中没有任何指令时，
//! 效果等同于所有参数以空格拼接

use crate::log::inspect::{format_json_number, format_number, inspect};
use crate::log::stringify::safe_stringify;
use serde_json::Value;

/// 按 printf 规则将参数渲染为一个字符串
pub fn printf(args: &[Value]) -> String {
    let mut out = String::new();
    let mut next = 0;

    if let Some(Value::String(template)) = args.first() {
        if args.len() == 1 {
            return template.clone();
        }

        next = 1;
        let mut substituted = false;
        let mut chars = template.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }

            let Some(&directive) = chars.peek() else {
                out.push('%');
                break;
            };

            if directive == '%' {
                chars.next();
                out.push('%');
                substituted = true;
                continue;
            }

            if next < args.len() {
                if let Some(rendered) = render_directive(directive, &args[next]) {
                    chars.next();
                    next += 1;
                    out.push_str(&rendered);
                    substituted = true;
                    continue;
                }
            }

            // 未知指令或参数不足时原样保留
            out.push('%');
        }

        if !substituted {
            out.clear();
            next = 0;
        }
    }

    for (i, arg) in args[next..].iter().enumerate() {
        if i > 0 || next > 0 {
            out.push(' ');
        }
        match arg {
            Value::String(s) => out.push_str(s),
            other => out.push_str(&inspect(other)),
        }
    }

    out
}

fn render_directive(directive: char, arg: &Value) -> Option<String> {
    let rendered = match directive {
        's' => to_plain_string(arg),
        'd' => format_number(to_number(arg)),
        'i' => format_number(parse_int(arg)),
        'f' => format_number(parse_float(arg)),
        'j' => safe_stringify(arg),
        'o' | 'O' => inspect(arg),
        'c' => String::new(),
        _ => return None,
    };
    Some(rendered)
}

fn to_plain_string(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_json_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => inspect(other),
    }
}

fn to_number(arg: &Value) -> f64 {
    match arg {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

fn parse_int(arg: &Value) -> f64 {
    match arg {
        Value::Number(n) => n.as_f64().map(f64::trunc).unwrap_or(f64::NAN),
        Value::String(s) => leading_int(s).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn parse_float(arg: &Value) -> f64 {
    match arg {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => leading_float(s).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// 解析字符串开头的整数部分，例如 `"42px"` → 42
fn leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let digits_start = if s.starts_with('-') || s.starts_with('+') { 1 } else { 0 };
    let digits_len = s[digits_start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse::<f64>().ok()
}

/// 解析字符串开头最长的浮点数部分，例如 `"3.5e2abc"` → 350
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let unsigned = s.trim_start_matches(['-', '+']);
    if unsigned.starts_with("Infinity") && s.len() - unsigned.len() <= 1 {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let candidate_len = s
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
        .count();
    (1..=candidate_len)
        .rev()
        .find_map(|len| s[..len].parse::<f64>().ok())
}
