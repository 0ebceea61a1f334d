//! 时间格式化
//!
//! 使用与 moment.js 兼容的格式串将毫秒时间戳渲染为字符串，
//! 例如默认格式 `YYYY-MM-DD HH:mm:ss.SSS`

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt::Write;

/// 默认时间格式
pub const DEFAULT_TIME_FORMAT: &str = "YYYY-MM-DD HH:mm:ss.SSS";

/// 时间戳超出可表示范围时的输出
pub const INVALID_DATE: &str = "Invalid date";

// 按长度降序排列，保证最长匹配
const TOKENS: [&str; 35] = [
    "YYYY", "MMMM", "DDDD", "dddd", "MMM", "DDD", "ddd", "SSS", "YY", "MM", "DD", "Do", "dd",
    "HH", "hh", "kk", "mm", "ss", "SS", "ZZ", "M", "D", "d", "H", "h", "k", "m", "s", "S", "A",
    "a", "Z", "X", "x", "E",
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// 时间格式配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct TimeFormat {
    /// 格式串
    #[default(DEFAULT_TIME_FORMAT.to_string())]
    pub pattern: String,

    /// 是否使用 UTC，否则使用进程本地时区
    #[default = false]
    pub utc: bool,
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>, utc: bool) -> Self {
        Self {
            pattern: pattern.into(),
            utc,
        }
    }

    /// 格式化毫秒时间戳
    pub fn format(&self, timestamp_ms: i64) -> String {
        format_timestamp(timestamp_ms, &self.pattern, self.utc)
    }
}

/// 将毫秒时间戳按格式串渲染
///
/// 无法识别的字符原样输出，`[...]` 内的内容作为字面量输出
pub fn format_timestamp(timestamp_ms: i64, pattern: &str, utc: bool) -> String {
    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return INVALID_DATE.to_string();
    };

    if utc {
        render(&instant, pattern)
    } else {
        render(&instant.with_timezone(&Local), pattern)
    }
}

/// 按格式串渲染任意时区的时间
pub fn render<Tz: TimeZone>(time: &DateTime<Tz>, pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('[') {
            if let Some(end) = stripped.find(']') {
                result.push_str(&stripped[..end]);
                rest = &stripped[end + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            render_token(&mut result, time, token);
            rest = &rest[token.len()..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            result.push(ch);
        }
        rest = chars.as_str();
    }

    result
}

fn render_token<Tz: TimeZone>(out: &mut String, time: &DateTime<Tz>, token: &str) {
    // 写入 String 不会失败
    let _ = match token {
        "YYYY" => write!(out, "{:04}", time.year()),
        "YY" => write!(out, "{:02}", time.year().rem_euclid(100)),
        "MMMM" => write!(out, "{}", MONTHS[time.month0() as usize]),
        "MMM" => write!(out, "{}", &MONTHS[time.month0() as usize][..3]),
        "MM" => write!(out, "{:02}", time.month()),
        "M" => write!(out, "{}", time.month()),
        "DDDD" => write!(out, "{:03}", time.ordinal()),
        "DDD" => write!(out, "{}", time.ordinal()),
        "DD" => write!(out, "{:02}", time.day()),
        "Do" => write!(out, "{}{}", time.day(), ordinal_suffix(time.day())),
        "D" => write!(out, "{}", time.day()),
        "dddd" => write!(out, "{}", WEEKDAYS[weekday_index(time)]),
        "ddd" => write!(out, "{}", &WEEKDAYS[weekday_index(time)][..3]),
        "dd" => write!(out, "{}", &WEEKDAYS[weekday_index(time)][..2]),
        "d" => write!(out, "{}", weekday_index(time)),
        "E" => write!(out, "{}", time.weekday().number_from_monday()),
        "HH" => write!(out, "{:02}", time.hour()),
        "H" => write!(out, "{}", time.hour()),
        "hh" => write!(out, "{:02}", time.hour12().1),
        "h" => write!(out, "{}", time.hour12().1),
        "kk" => write!(out, "{:02}", hour_from_one(time)),
        "k" => write!(out, "{}", hour_from_one(time)),
        "mm" => write!(out, "{:02}", time.minute()),
        "m" => write!(out, "{}", time.minute()),
        "ss" => write!(out, "{:02}", time.second()),
        "s" => write!(out, "{}", time.second()),
        "SSS" => write!(out, "{:03}", millis(time)),
        "SS" => write!(out, "{:02}", millis(time) / 10),
        "S" => write!(out, "{}", millis(time) / 100),
        "A" => write!(out, "{}", if time.hour12().0 { "PM" } else { "AM" }),
        "a" => write!(out, "{}", if time.hour12().0 { "pm" } else { "am" }),
        "Z" => write_offset(out, time, true),
        "ZZ" => write_offset(out, time, false),
        "X" => write!(out, "{}", time.timestamp()),
        "x" => write!(out, "{}", time.timestamp_millis()),
        other => write!(out, "{}", other),
    };
}

fn weekday_index<Tz: TimeZone>(time: &DateTime<Tz>) -> usize {
    time.weekday().num_days_from_sunday() as usize
}

fn hour_from_one<Tz: TimeZone>(time: &DateTime<Tz>) -> u32 {
    match time.hour() {
        0 => 24,
        h => h,
    }
}

fn millis<Tz: TimeZone>(time: &DateTime<Tz>) -> u32 {
    // 闰秒时 nanosecond 可能超过 1e9
    (time.nanosecond() / 1_000_000).min(999)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn write_offset<Tz: TimeZone>(out: &mut String, time: &DateTime<Tz>, colon: bool) -> std::fmt::Result {
    let seconds = time.offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    if colon {
        write!(out, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    } else {
        write!(out, "{}{:02}{:02}", sign, minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    // 2020-05-12T12:56:33.486Z, Tuesday
    const TS: i64 = 1_589_288_193_486;

    #[test]
    fn test_default_pattern_utc() {
        assert_eq!(format_timestamp(TS, DEFAULT_TIME_FORMAT, true), "2020-05-12 12:56:33.486");
    }

    #[test]
    fn test_utc_is_deterministic() {
        let first = format_timestamp(TS, "YYYY-MM-DDTHH:mm:ss.SSSZ", true);
        let second = format_timestamp(TS, "YYYY-MM-DDTHH:mm:ss.SSSZ", true);
        assert_eq!(first, second);
        assert_eq!(first, "2020-05-12T12:56:33.486+00:00");
    }

    #[test]
    fn test_local_matches_chrono_local() {
        let expected = DateTime::<Utc>::from_timestamp_millis(TS)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string();
        assert_eq!(format_timestamp(TS, DEFAULT_TIME_FORMAT, false), expected);
    }

    #[test]
    fn test_names_and_ordinals() {
        assert_eq!(
            format_timestamp(TS, "dddd, MMMM Do YYYY", true),
            "Tuesday, May 12th 2020"
        );
        assert_eq!(format_timestamp(TS, "ddd MMM D YY", true), "Tue May 12 20");
        assert_eq!(format_timestamp(TS, "d E dd", true), "2 2 Tu");
        assert_eq!(format_timestamp(TS, "DDD DDDD", true), "133 133");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(format_timestamp(TS, "h:mm A", true), "12:56 PM");
        assert_eq!(format_timestamp(0, "hh:mm a k", true), "12:00 am 24");
    }

    #[test]
    fn test_fraction_tokens() {
        assert_eq!(format_timestamp(TS, "S SS SSS", true), "4 48 486");
        assert_eq!(format_timestamp(TS + 14, "SSS", true), "500");
    }

    #[test]
    fn test_unix_tokens() {
        assert_eq!(format_timestamp(TS, "X", true), "1589288193");
        assert_eq!(format_timestamp(TS, "x", true), "1589288193486");
    }

    #[test]
    fn test_escape_and_literals() {
        assert_eq!(format_timestamp(TS, "[Today is] YYYY", true), "Today is 2020");
        assert_eq!(format_timestamp(TS, "YYYY/MM/DD @ HH", true), "2020/05/12 @ 12");
        assert_eq!(format_timestamp(TS, "[ YYYY", true), "[ 2020");
        assert_eq!(format_timestamp(TS, "ÄÖ YYYY", true), "ÄÖ 2020");
    }

    #[test]
    fn test_offset_tokens() {
        let offset = FixedOffset::east_opt(8 * 3600 + 30 * 60).unwrap();
        let time = DateTime::<Utc>::from_timestamp_millis(TS).unwrap().with_timezone(&offset);
        assert_eq!(render(&time, "HH:mm Z ZZ"), "21:26 +08:30 +0830");

        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let time = DateTime::<Utc>::from_timestamp_millis(TS).unwrap().with_timezone(&offset);
        assert_eq!(render(&time, "Z"), "-05:00");
    }

    #[test]
    fn test_invalid_timestamp() {
        assert_eq!(format_timestamp(i64::MAX, DEFAULT_TIME_FORMAT, true), INVALID_DATE);
    }

    #[test]
    fn test_time_format_default() {
        let time_format = TimeFormat::default();
        assert_eq!(time_format.pattern, DEFAULT_TIME_FORMAT);
        assert!(!time_format.utc);
        assert_eq!(TimeFormat::new("YYYY", true).format(TS), "2020");
    }
}
