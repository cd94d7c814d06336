//! Fix computation shared by the naming and literal rules.
//!
//! Every function here is total and side-effect free: it maps a name or a
//! literal's content to the corrected text, and the rules decide whether the
//! correction differs from the original.

use crate::tree::LiteralQuoting;
use std::fmt::Write;

/// Horizontal tab.
pub const TAB: u8 = 9;

/// Returns true for bytes that must not appear in source text:
/// C0 controls other than LF and CR, and DEL.
#[must_use]
pub fn is_forbidden_control(b: u8) -> bool {
    (b < 32 && b != b'\n' && b != b'\r') || b == 127
}

/// `type_name` → `TypeName`.
///
/// Upper-cases the first character and every character following an
/// underscore, then drops all underscores.
#[must_use]
pub fn to_upper_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

/// Uniform ASCII lower-case fold. No word segmentation.
#[must_use]
pub fn to_lower_snake_case(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Uniform ASCII upper-case fold. No word segmentation.
#[must_use]
pub fn to_screaming_snake_case(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Returns true if `candidate` can be offered as a replacement identifier.
#[must_use]
pub fn is_valid_identifier_start(candidate: &str) -> bool {
    candidate
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_digit())
}

/// Copy of `bytes` without any forbidden control byte.
#[must_use]
pub fn strip_control_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|b| !is_forbidden_control(*b))
        .collect()
}

/// Re-wraps decoded literal content in its original quoting.
///
/// Ordinary literals are re-escaped so the result is a valid token that
/// decodes back to `content`. Raw literals are emitted verbatim.
#[must_use]
pub fn requote(quoting: &LiteralQuoting, content: &[u8]) -> String {
    match &quoting.raw_delimiter {
        Some(delim) => format!(
            "{}R\"{delim}({}){delim}\"",
            quoting.prefix,
            String::from_utf8_lossy(content)
        ),
        None => format!("{}\"{}\"", quoting.prefix, escape(content)),
    }
}

fn escape(content: &[u8]) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    let mut rest = content;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                escape_str(valid, &mut out);
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    escape_str(valid, &mut out);
                }
                let bad = err.error_len().unwrap_or(invalid.len());
                for b in &invalid[..bad] {
                    let _ = write!(out, "\\{b:03o}");
                }
                rest = &invalid[bad..];
            }
        }
    }
    out
}

fn escape_str(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
}
