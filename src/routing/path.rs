//! Path normalization and parameter coercion.
//!
//! # Responsibilities
//! - Strip surrounding whitespace and separators from a path
//! - Split a normalized path into its first segment and remainder
//! - Coerce captured segments to their declared parameter type
//!
//! # Design Decisions
//! - Normalization borrows from the input; no allocation on the match path
//! - Coercion never fails: malformed numbers become NaN, unknown booleans false

use crate::routing::key::ParamKind;
use crate::routing::matched::ParamValue;

/// Trim whitespace, then leading and trailing runs of `separator`.
///
/// `""` and `"/"` both normalize to the empty path, which denotes the root.
pub fn normalize(path: &str, separator: char) -> &str {
    path.trim()
        .trim_start_matches(separator)
        .trim_end_matches(separator)
}

/// Split a normalized path into its first segment and the unconsumed rest.
pub fn split_first(path: &str, separator: char) -> (&str, &str) {
    path.split_once(separator).unwrap_or((path, ""))
}

/// All segments of a path, normalizing before each split as the trie does.
pub fn segments(path: &str, separator: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = normalize(path, separator);
    while !rest.is_empty() {
        let (segment, tail) = split_first(rest, separator);
        out.push(segment);
        rest = normalize(tail, separator);
    }
    out
}

/// Coerce a raw segment according to the declared parameter kind.
pub fn coerce(segment: &str, kind: ParamKind) -> ParamValue {
    match kind {
        ParamKind::String => ParamValue::String(segment.to_string()),
        ParamKind::Number => ParamValue::Number(parse_number(segment)),
        ParamKind::Boolean => ParamValue::Boolean(segment == "true" || segment == "1"),
    }
}

/// Numeric conversion following JavaScript `Number()` string semantics.
pub fn parse_number(segment: &str) -> f64 {
    let text = segment.trim();
    if text.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if unsigned.starts_with(['+', '-']) {
        return f64::NAN;
    }

    // Rust also accepts `inf` and `nan` spellings, which Number() rejects.
    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }

    unsigned.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}
