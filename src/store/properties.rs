//! Property-file codec
//!
//! Predicate units are stored as newline-delimited `key=value` text using the
//! conventional property-file escaping, so units written by older deployments
//! load unchanged:
//! - `#` and `!` start comment lines
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t \n \r \f \\ \uXXXX` escapes; any other escaped character stands for itself

use std::collections::BTreeMap;

/// Serialize predicates, sorted by key, under a timestamp comment.
pub fn encode(predicates: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    out.push('#');
    out.push_str(&chrono::Utc::now().to_rfc2822());
    out.push('\n');
    for (key, value) in predicates {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Parse property-file text. Later duplicates of a key win.
pub fn decode(text: &str) -> BTreeMap<String, String> {
    let mut predicates = BTreeMap::new();
    for line in logical_lines(text) {
        let (key, value) = split_entry(&line);
        predicates.insert(unescape(key), unescape(value));
    }
    predicates
}

fn escape_into(out: &mut String, raw: &str, is_key: bool) {
    for (index, c) in raw.chars().enumerate() {
        match c {
            ' ' if is_key || index == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// True when `line` ends with an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Join continuation lines and drop blanks and comments.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for physical in text.split('\n') {
        let physical = physical.strip_suffix('\r').unwrap_or(physical);
        let trimmed = physical.trim_start_matches(is_blank);

        let mut current = match pending.take() {
            Some(mut joined) => {
                joined.push_str(trimmed);
                joined
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if continues(&current) {
            current.pop();
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }
    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                break;
            }
            c if is_blank(c) => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let decoded = if c == '\\' {
            match chars.next() {
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\u{c}',
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let well_formed =
                        hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit());
                    match u16::from_str_radix(&hex, 16) {
                        Ok(unit) if well_formed => {
                            units.push(unit);
                            continue;
                        }
                        // Malformed escape: keep it literally
                        _ => {
                            units.extend("\\u".encode_utf16());
                            units.extend(hex.encode_utf16());
                            continue;
                        }
                    }
                }
                Some(other) => other,
                None => continue,
            }
        } else {
            c
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }
    String::from_utf16_lossy(&units)
}
