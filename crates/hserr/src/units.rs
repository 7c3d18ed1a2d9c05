//! Size, number, and date extraction helpers shared by the parsers.
//!
//! Fatal error logs mix unit notations freely: bare byte counts, `76288K`,
//! `1024 MB`, hex addresses, and several timestamp layouts depending on the
//! JVM vendor and platform. Everything here is a pure function.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Supported size units. `Bytes` covers both a bare number and an explicit
/// `B` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    /// Multiplier to bytes.
    pub fn multiplier(&self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kilobytes => 1024,
            SizeUnit::Megabytes => 1024 * 1024,
            SizeUnit::Gigabytes => 1024 * 1024 * 1024,
        }
    }

    /// Parse a unit suffix, case-insensitive. `B` (and a missing suffix,
    /// handled by callers) means bytes.
    pub fn from_suffix(suffix: &str) -> Option<SizeUnit> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "b" => Some(SizeUnit::Bytes),
            "k" | "kb" => Some(SizeUnit::Kilobytes),
            "m" | "mb" => Some(SizeUnit::Megabytes),
            "g" | "gb" => Some(SizeUnit::Gigabytes),
            _ => None,
        }
    }
}

/// The single shared size conversion. Widening (e.g. M → K) is exact and
/// saturates at `u64::MAX`; narrowing rounds to the nearest whole unit.
pub fn convert(value: u64, from: SizeUnit, to: SizeUnit) -> u64 {
    let from_mul = from.multiplier();
    let to_mul = to.multiplier();
    if from_mul >= to_mul {
        value.saturating_mul(from_mul / to_mul)
    } else {
        let divisor = to_mul / from_mul;
        value / divisor + u64::from(value % divisor >= divisor / 2)
    }
}

static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*([A-Za-z]{0,2})\s*$").unwrap());

/// Parse an integer with an optional `B`/`K`/`M`/`G` (or `KB`/`MB`/`GB`)
/// suffix into a byte count. Returns `None` when the text is not a size or
/// the byte count does not fit in `u64`.
pub fn parse_size(text: &str) -> Option<u64> {
    let caps = SIZE_RE.captures(text)?;
    let value: u64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = SizeUnit::from_suffix(caps.get(2).map_or("", |m| m.as_str()))?;
    value.checked_mul(unit.multiplier())
}

/// Parse a hexadecimal address, with or without the `0x` prefix.
pub fn parse_hex(text: &str) -> Option<u64> {
    let digits = text
        .trim()
        .strip_prefix("0x")
        .or_else(|| text.trim().strip_prefix("0X"))
        .unwrap_or_else(|| text.trim());
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

/// First decimal integer embedded in mixed text.
pub fn first_number(text: &str) -> Option<u64> {
    NUMBER_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Timestamp layouts observed across vendors. Day-of-month may be space
/// padded (`Aug  6`); zone names are stripped before the final attempt.
const DATETIME_FORMATS: &[&str] = &[
    // "Tue Aug 6 09:14:05 2024"
    "%a %b %d %H:%M:%S %Y",
    // build stamps: "Aug 4 2022 06:13:18"
    "%b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    // build stamps without a time: "Apr 19 2022"
    "%b %d %Y",
];

/// Parse one of the fixed textual date formats a fatal error log uses.
/// A trailing zone token (`UTC`, `CEST`, ...) is ignored.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    for candidate in [collapsed.as_str(), strip_zone(&collapsed)] {
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(candidate, fmt) {
                return Some(dt);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(candidate, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
    }
    None
}

/// Drop a trailing all-alphabetic token (a timezone name) if present.
fn strip_zone(text: &str) -> &str {
    match text.rsplit_once(' ') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) => {
            head
        }
        _ => text,
    }
}
