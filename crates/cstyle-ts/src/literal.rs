//! Decoding of string literal tokens.

use cstyle_core::LiteralQuoting;

/// Splits a string literal token into its decoded content and quoting.
///
/// `token` is the full token text, prefix and quotes included. Escape
/// sequences of ordinary literals are resolved; raw literal content is
/// taken verbatim.
#[must_use]
pub fn decode(token: &[u8]) -> (Vec<u8>, LiteralQuoting) {
    let Some(quote) = token.iter().position(|b| *b == b'"') else {
        return (token.to_vec(), LiteralQuoting::plain());
    };
    let prefix = String::from_utf8_lossy(&token[..quote]).into_owned();
    let rest = &token[quote + 1..];

    if let Some(prefix) = prefix.strip_suffix('R') {
        let open = rest.iter().position(|b| *b == b'(').unwrap_or(rest.len());
        let delimiter = String::from_utf8_lossy(&rest[..open]).into_owned();
        let closing = format!("){delimiter}\"");
        let body = rest.get(open + 1..).unwrap_or_default();
        let content = body
            .strip_suffix(closing.as_bytes())
            .unwrap_or(body)
            .to_vec();
        return (content, LiteralQuoting::raw(prefix, delimiter));
    }

    let body = rest.strip_suffix(b"\"").unwrap_or(rest);
    let quoting = LiteralQuoting {
        prefix,
        raw_delimiter: None,
    };
    (unescape(body), quoting)
}

fn unescape(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        if b != b'\\' || i + 1 == body.len() {
            out.push(b);
            i += 1;
            continue;
        }
        let esc = body[i + 1];
        i += 2;
        match esc {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'a' => out.push(7),
            b'b' => out.push(8),
            b'f' => out.push(12),
            b'v' => out.push(11),
            b'e' | b'E' => out.push(27),
            b'\n' => {}
            b'\r' => {
                if body.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'0'..=b'7' => {
                let start = i - 1;
                let end = (start + 3).min(body.len());
                let digits = body[start..end]
                    .iter()
                    .take_while(|d| (b'0'..=b'7').contains(*d))
                    .count();
                let value = parse_radix(&body[start..start + digits], 8);
                push_code_point(&mut out, value);
                i = start + digits;
            }
            b'x' => {
                let digits = body[i..].iter().take_while(|d| d.is_ascii_hexdigit()).count();
                let value = parse_radix(&body[i..i + digits], 16);
                push_code_point(&mut out, value);
                i += digits;
            }
            b'u' | b'U' => {
                let want = if esc == b'u' { 4 } else { 8 };
                let digits = body[i..]
                    .iter()
                    .take(want)
                    .take_while(|d| d.is_ascii_hexdigit())
                    .count();
                let value = parse_radix(&body[i..i + digits], 16);
                push_char(&mut out, value);
                i += digits;
            }
            other => out.push(other),
        }
    }
    out
}

fn parse_radix(digits: &[u8], radix: u32) -> u32 {
    digits.iter().fold(0u32, |acc, d| {
        let v = char::from(*d).to_digit(radix).unwrap_or(0);
        acc.saturating_mul(radix).saturating_add(v)
    })
}

/// Numeric escapes up to 0xFF are single code units; larger values only fit
/// wide literals and are stored as UTF-8.
fn push_code_point(out: &mut Vec<u8>, value: u32) {
    match u8::try_from(value) {
        Ok(byte) => out.push(byte),
        Err(_) => push_char(out, value),
    }
}

fn push_char(out: &mut Vec<u8>, value: u32) {
    if let Some(c) = char::from_u32(value) {
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}
