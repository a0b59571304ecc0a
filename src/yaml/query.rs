//! Read-only query operations over a finished tree.
//!
//! Lookup misses and type mismatches are not errors here: `get`/`at` resolve
//! to `None` and the typed accessors fall back to the caller-supplied
//! default, so missing or malformed optional configuration never aborts a
//! caller.

use super::tree::Node;

impl Node {
    /// First mapping child whose key equals `key` exactly.
    ///
    /// Returns `None` if this node is not a mapping or no child matches.
    /// With duplicate keys the first match in insertion order wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, child)| child),
            _ => None,
        }
    }

    /// Sequence child at a 0-based index.
    ///
    /// Returns `None` if this node is not a sequence, the index is negative,
    /// or the index is out of range.
    pub fn at(&self, index: i64) -> Option<&Node> {
        match self {
            Node::Sequence(items) => {
                if index < 0 {
                    return None;
                }
                items.get(index as usize)
            }
            _ => None,
        }
    }

    /// Resolve a lookup target: the child at `key` when given, else the
    /// node itself.
    fn target(&self, key: Option<&str>) -> Option<&Node> {
        match key {
            Some(k) => self.get(k),
            None => Some(self),
        }
    }

    /// Scalar text of the target, or `default` if the target is missing,
    /// not a scalar, or empty.
    pub fn get_str<'a>(&'a self, key: Option<&str>, default: &'a str) -> &'a str {
        match self.target(key).and_then(Node::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => default,
        }
    }

    /// Integer value of the target, or `default`.
    ///
    /// Conversion takes the longest leading numeric prefix ("8080/tcp"
    /// yields 8080); text with no leading digits yields `default`.
    pub fn get_int(&self, key: Option<&str>, default: i64) -> i64 {
        match self.target(key).and_then(Node::as_str) {
            Some(s) => parse_int_prefix(s).unwrap_or(default),
            None => default,
        }
    }

    /// Boolean value of the target, or `default`.
    ///
    /// Recognizes case-insensitive `true`/`yes`/`on`/`1` and
    /// `false`/`no`/`off`/`0`; anything else yields `default`.
    pub fn get_bool(&self, key: Option<&str>, default: bool) -> bool {
        match self.target(key).and_then(Node::as_str) {
            Some(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => true,
                "false" | "no" | "off" | "0" => false,
                _ => default,
            },
            None => default,
        }
    }

    /// Floating-point value of the target, or `default`.
    ///
    /// Conversion takes the longest leading numeric prefix ("1.5x" yields
    /// 1.5); text with no leading digits yields `default`.
    pub fn get_double(&self, key: Option<&str>, default: f64) -> f64 {
        match self.target(key).and_then(Node::as_str) {
            Some(s) => parse_float_prefix(s).unwrap_or(default),
            None => default,
        }
    }
}

/// Longest leading integer prefix: optional sign, then digits.
/// `None` when no digit follows the optional sign.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    let mut seen_digit = false;
    while let Some(b) = bytes.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = (b - b'0') as i64;
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
        pos += 1;
    }
    if seen_digit {
        Some(value)
    } else {
        None
    }
}

/// Longest leading float prefix: optional sign, digits, optional fraction,
/// optional exponent. `None` when the mantissa has no digits.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        pos += 1;
    }
    let digits_start = pos;
    while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit()) {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        let mut frac = pos + 1;
        while matches!(bytes.get(frac), Some(b) if b.is_ascii_digit()) {
            frac += 1;
        }
        if frac > pos + 1 {
            pos = frac;
        } else if pos > digits_start {
            // trailing dot with integer part, e.g. "1."
            pos += 1;
        }
    }
    if pos == digits_start || !bytes[digits_start..pos].iter().any(u8::is_ascii_digit) {
        return None;
    }
    // exponent is only included if digits follow it
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = exp;
        while matches!(bytes.get(exp), Some(b) if b.is_ascii_digit()) {
            exp += 1;
        }
        if exp > exp_digits {
            pos = exp;
        }
    }
    s[..pos].parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
