//! Parser for `.env`-syntax text.
//!
//! Responsibilities:
//! - Tokenize shell-like `KEY=VALUE` assignment syntax into a flat
//!   [`EnvMap`]: comments, `export ` prefixes, unquoted values with trailing
//!   inline comments, single- and double-quoted values, multi-line quoted
//!   values.
//! - Interpolate `${NAME}` / `$NAME` references inside double-quoted values
//!   against keys parsed earlier in the same source, then against the
//!   caller-supplied `known` mapping.
//!
//! Does NOT handle:
//! - File I/O or source ordering (see `resolver`).
//! - Type coercion of values (see `access`).
//!
//! Invariants:
//! - Parsing is a pure function of its inputs; no environment access.
//! - Lines that cannot be parsed as an assignment are skipped, not fatal.
//! - The only fatal failure is an unterminated quote, reported with the line
//!   where the quoted value opened and never with the value text itself.

use core::iter::Peekable;
use core::str::Chars;

use crate::error::{ParseError, ParseErrorKind};
use crate::map::EnvMap;

/// Parse one textual source into a flat mapping.
///
/// `known` supplies values for interpolation; it is typically the accumulator
/// of all strictly earlier sources. Within this source, a reference first
/// sees keys assigned on earlier lines of the same text. Unresolved
/// references interpolate to the empty string.
///
/// If the same key appears twice, the later occurrence wins.
pub fn parse_str(text: &str, known: &EnvMap) -> Result<EnvMap, ParseError> {
    let mut out = EnvMap::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut index = 0;

    while index < lines.len() {
        let lineno = index + 1;
        let line = lines[index].trim_start();

        if line.is_empty() || line.starts_with('#') {
            index += 1;
            continue;
        }

        let stmt = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let Some((key, rest)) = split_assignment(stmt) else {
            tracing::trace!(line = lineno, "skipping line that is not an assignment");
            index += 1;
            continue;
        };

        let (value, continuation_lines) =
            parse_value(rest, &lines[index + 1..], lineno, &out, known)?;
        out.insert(key, value);
        index += 1 + continuation_lines;
    }

    Ok(out)
}

/// Split `KEY=rest`, validating the key. Returns `None` for malformed lines.
fn split_assignment(stmt: &str) -> Option<(&str, &str)> {
    let eq = stmt.find('=')?;
    let key = stmt[..eq].trim_end();
    if !is_valid_key(key) {
        return None;
    }
    Some((key, &stmt[eq + 1..]))
}

/// Keys match `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse the text after `=`, consuming continuation lines for multi-line
/// quoted values. Returns the value and how many extra lines were consumed.
fn parse_value(
    rest: &str,
    continuation: &[&str],
    lineno: usize,
    current: &EnvMap,
    known: &EnvMap,
) -> Result<(String, usize), ParseError> {
    let rest = rest.trim_start();
    if let Some(body) = rest.strip_prefix('\'') {
        scan_single_quoted(body, continuation, lineno)
    } else if let Some(body) = rest.strip_prefix('"') {
        scan_double_quoted(body, continuation, lineno, current, known)
    } else {
        Ok((strip_inline_comment(rest).trim_end().to_string(), 0))
    }
}

/// Strip a trailing `#comment` from an unquoted value.
///
/// A `#` begins a comment only at the start of the value or when preceded by
/// whitespace, so `ab#cd` stays intact.
fn strip_inline_comment(value: &str) -> &str {
    let mut at_boundary = true;
    for (i, c) in value.char_indices() {
        if c == '#' && at_boundary {
            return &value[..i];
        }
        at_boundary = c.is_whitespace();
    }
    value
}

/// Consume a single-quoted value: literal characters until the closing `'`,
/// continuing across lines. No escapes, no interpolation.
fn scan_single_quoted<'a>(
    first: &'a str,
    continuation: &[&'a str],
    lineno: usize,
) -> Result<(String, usize), ParseError> {
    let mut value = String::new();
    let mut consumed = 0;
    let mut chars = first.chars();

    loop {
        match chars.next() {
            Some('\'') => return Ok((value, consumed)),
            Some(c) => value.push(c),
            None => {
                if consumed == continuation.len() {
                    return Err(ParseError {
                        line: lineno,
                        kind: ParseErrorKind::UnterminatedQuote('\''),
                    });
                }
                value.push('\n');
                chars = continuation[consumed].chars();
                consumed += 1;
            }
        }
    }
}

/// Consume a double-quoted value: `\n`, `\t`, `\"`, `\\`, `\$` escapes and
/// `${NAME}` / `$NAME` interpolation, continuing across lines.
///
/// Unknown escape sequences keep the backslash and character verbatim.
/// Anything left on the line after the closing quote is ignored, which also
/// covers trailing inline comments.
fn scan_double_quoted<'a>(
    first: &'a str,
    continuation: &[&'a str],
    lineno: usize,
    current: &EnvMap,
    known: &EnvMap,
) -> Result<(String, usize), ParseError> {
    let mut value = String::new();
    let mut consumed = 0;
    let mut chars = first.chars().peekable();

    loop {
        match chars.next() {
            Some('"') => return Ok((value, consumed)),
            Some('\\') => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('"') => value.push('"'),
                Some('\\') => value.push('\\'),
                Some('$') => value.push('$'),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                // Backslash at end of line: kept literal, newline follows.
                None => value.push('\\'),
            },
            Some('$') => interpolate(&mut chars, &mut value, current, known),
            Some(c) => value.push(c),
            None => {
                if consumed == continuation.len() {
                    return Err(ParseError {
                        line: lineno,
                        kind: ParseErrorKind::UnterminatedQuote('"'),
                    });
                }
                value.push('\n');
                chars = continuation[consumed].chars().peekable();
                consumed += 1;
            }
        }
    }
}

/// Substitute one `$`-reference. The leading `$` has already been consumed.
///
/// A malformed reference (`${` without a closing brace on the same line, or
/// an invalid name) is emitted verbatim rather than failing.
fn interpolate(
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
    current: &EnvMap,
    known: &EnvMap,
) {
    match chars.peek() {
        Some('{') => {
            chars.next();
            let name = take_name(chars);
            if chars.peek() == Some(&'}') && is_valid_key(&name) {
                chars.next();
                out.push_str(lookup(&name, current, known));
            } else {
                out.push_str("${");
                out.push_str(&name);
            }
        }
        Some(&c) if c.is_ascii_alphabetic() || c == '_' => {
            let name = take_name(chars);
            out.push_str(lookup(&name, current, known));
        }
        _ => out.push('$'),
    }
}

fn take_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

/// Same-source keys shadow strictly-earlier-source keys; unresolved names
/// interpolate to the empty string.
fn lookup<'a>(name: &str, current: &'a EnvMap, known: &'a EnvMap) -> &'a str {
    current.get(name).or_else(|| known.get(name)).unwrap_or("")
}
