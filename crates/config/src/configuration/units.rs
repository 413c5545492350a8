//! String parsers for the typed accessors.
//!
//! Responsibilities:
//! - Parse durations (`300ms`, `1.5h`, `2h45m`).
//! - Parse byte sizes with decimal or binary suffixes (`10k`, `1.5 Gi`).
//! - Parse numbers with metric prefixes (`2.2 k`, `15m`, `3 da`).
//!
//! Every parser returns a human-readable reason on failure; the caller adds the
//! key and value.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// `<number><optional single whitespace><optional unit>`
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9.]+)\s?([a-zA-Z]*)$").expect("size pattern is a valid regex")
});

/// Parses a duration made of decimal numbers, each followed by a unit.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A lone `0` needs no
/// unit. Negative durations are rejected.
pub(crate) fn parse_duration(text: &str) -> Result<Duration, String> {
    let mut rest = text.strip_prefix('+').unwrap_or(text);
    if let Some(unsigned) = rest.strip_prefix('-') {
        if unsigned == "0" {
            return Ok(Duration::ZERO);
        }
        return Err("negative durations are not supported".to_string());
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(format!("invalid number in duration at {:?}", rest));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = duration_unit_nanos(unit)
            .ok_or_else(|| match unit {
                "" => "missing unit in duration".to_string(),
                other => format!("unknown unit {:?} in duration", other),
            })?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| "duration out of range".to_string())?
        };
        let mut part = whole
            .checked_mul(scale)
            .ok_or_else(|| "duration out of range".to_string())?;
        if !fraction.is_empty() {
            let fraction: f64 = format!("0.{}", fraction)
                .parse()
                .map_err(|_| format!("invalid fraction in duration at {:?}", rest))?;
            part += (fraction * scale as f64) as u128;
        }

        total = total
            .checked_add(part)
            .ok_or_else(|| "duration out of range".to_string())?;
        rest = tail;
    }

    let nanos = u64::try_from(total).map_err(|_| "duration out of range".to_string())?;
    Ok(Duration::from_nanos(nanos))
}

fn duration_unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Splits a size value into its number and unit parts.
fn split_size(text: &str) -> Result<(&str, &str), String> {
    let caps = SIZE_PATTERN
        .captures(text)
        .ok_or_else(|| "expected <number> [unit]".to_string())?;
    match (caps.get(1), caps.get(2)) {
        (Some(number), Some(unit)) => Ok((number.as_str(), unit.as_str())),
        _ => Err("expected <number> [unit]".to_string()),
    }
}

/// Parses a byte size such as `512`, `10k`, `1.5 Gi` or `2Ei`.
pub(crate) fn parse_byte_size(text: &str) -> Result<u64, String> {
    let (number, unit) = split_size(text)?;
    let mult = byte_size_multiplier(unit).ok_or_else(|| "unknown suffix".to_string())?;

    if number.contains('.') {
        let num: f64 = number.parse().map_err(|e| format!("{}", e))?;
        let bytes = (num * mult as f64).round();
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return Err("size out of range".to_string());
        }
        Ok(bytes as u64)
    } else {
        let num: u64 = number.parse().map_err(|e| format!("{}", e))?;
        num.checked_mul(mult)
            .ok_or_else(|| "size out of range".to_string())
    }
}

fn byte_size_multiplier(unit: &str) -> Option<u64> {
    match unit {
        "" => Some(1),
        "k" => Some(1_000),
        "Ki" => Some(1 << 10),
        "M" => Some(1_000_000),
        "Mi" => Some(1 << 20),
        "G" => Some(1_000_000_000),
        "Gi" => Some(1 << 30),
        "T" => Some(1_000_000_000_000),
        "Ti" => Some(1 << 40),
        "P" => Some(1_000_000_000_000_000),
        "Pi" => Some(1 << 50),
        "E" => Some(1_000_000_000_000_000_000),
        "Ei" => Some(1 << 60),
        _ => None,
    }
}

/// Parses a number with an optional metric prefix, such as `2.2k` or `15 m`.
pub(crate) fn parse_metric_size(text: &str) -> Result<f64, String> {
    let (number, unit) = split_size(text)?;
    let mult = metric_multiplier(unit).ok_or_else(|| "unknown suffix".to_string())?;
    let num: f64 = number.parse().map_err(|e| format!("{}", e))?;
    Ok(num * mult)
}

fn metric_multiplier(unit: &str) -> Option<f64> {
    match unit {
        "Y" => Some(1e24),
        "Z" => Some(1e21),
        "E" => Some(1e18),
        "P" => Some(1e15),
        "T" => Some(1e12),
        "G" => Some(1e9),
        "M" => Some(1e6),
        "k" => Some(1e3),
        "h" => Some(1e2),
        "da" => Some(1e1),
        "" => Some(1.0),
        "d" => Some(1e-1),
        "c" => Some(1e-2),
        "m" => Some(1e-3),
        "u" => Some(1e-6),
        "n" => Some(1e-9),
        "p" => Some(1e-12),
        "f" => Some(1e-15),
        "a" => Some(1e-18),
        "z" => Some(1e-21),
        "y" => Some(1e-24),
        _ => None,
    }
}
