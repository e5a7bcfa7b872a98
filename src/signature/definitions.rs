// Tue Jan 20 2026 - Alex

//! Signature definitions file format.
//!
//! One signature per line:
//!
//! ```text
//! # identifier  offset  pattern
//! regf          0       regf
//! esedb         4       \xef\xcd\xab\x89
//! vhdi_footer   -512    conectix
//! ```
//!
//! A negative offset anchors the pattern to the end of the data.
//! Patterns accept the escapes `\\ \a \b \f \n \r \t \v \xHH`.

use crate::error::{Result, ScanError};
use crate::signature::{Anchor, SignatureTable};
use std::fs;
use std::path::Path;

const MAX_OFFSET_DIGITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDefinition {
    pub identifier: String,
    pub anchor: Anchor,
    pub pattern: Vec<u8>,
}

pub fn parse_definitions(input: &[u8]) -> Result<Vec<SignatureDefinition>> {
    let mut definitions = Vec::new();

    for (line_index, raw_line) in input.split(|&b| b == b'\n').enumerate() {
        let line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);

        if line.first() == Some(&b'#') || line.iter().all(|b| is_blank(*b)) {
            continue;
        }

        let definition = parse_line(line).map_err(|reason| ScanError::Definitions {
            line: line_index + 1,
            reason,
        })?;
        definitions.push(definition);
    }

    Ok(definitions)
}

pub fn read_definitions_file<P: AsRef<Path>>(path: P) -> Result<Vec<SignatureDefinition>> {
    let data = fs::read(path.as_ref())?;
    let definitions = parse_definitions(&data)?;
    log::debug!(
        "Read {} signature definition(s) from {}",
        definitions.len(),
        path.as_ref().display()
    );
    Ok(definitions)
}

impl SignatureTable {
    pub fn load_definitions(&mut self, definitions: &[SignatureDefinition]) -> Result<usize> {
        for definition in definitions {
            self.register(&definition.identifier, definition.anchor, &definition.pattern)?;
        }
        Ok(definitions.len())
    }

    pub fn from_definitions_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut table = Self::new();
        table.load_definitions(&read_definitions_file(path)?)?;
        Ok(table)
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_separator<'a>(rest: &'a [u8], after: &str) -> std::result::Result<&'a [u8], String> {
    let count = rest.iter().take_while(|b| is_blank(**b)).count();
    if count == 0 {
        return Err(format!("expected whitespace after {}", after));
    }
    Ok(&rest[count..])
}

fn parse_line(line: &[u8]) -> std::result::Result<SignatureDefinition, String> {
    let identifier_len = line.iter().take_while(|b| is_identifier_byte(**b)).count();
    if identifier_len == 0 {
        return Err("invalid identifier".to_string());
    }
    // identifier bytes are ASCII by construction
    let identifier = String::from_utf8_lossy(&line[..identifier_len]).into_owned();
    let rest = skip_separator(&line[identifier_len..], "identifier")?;

    let (negative, digits) = match rest.first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digit_count = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if digit_count == 0 {
        return Err("invalid offset".to_string());
    }
    if digit_count > MAX_OFFSET_DIGITS {
        return Err("offset too large".to_string());
    }
    let offset = digits[..digit_count]
        .iter()
        .try_fold(0u64, |acc, b| acc.checked_mul(10)?.checked_add(u64::from(b - b'0')))
        .ok_or_else(|| "offset too large".to_string())?;

    let rest = skip_separator(&digits[digit_count..], "offset")?;
    if rest.last().copied().is_some_and(is_blank) {
        log::warn!(
            "Pattern of {} ends in unescaped whitespace, which is matched literally",
            identifier
        );
    }
    let pattern = unescape_pattern(rest)?;
    if pattern.is_empty() {
        return Err("empty pattern".to_string());
    }

    let anchor = if negative && offset > 0 {
        Anchor::FromEnd(offset)
    } else {
        Anchor::FromStart(offset)
    };

    Ok(SignatureDefinition {
        identifier,
        anchor,
        pattern,
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

pub fn unescape_pattern(raw: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let mut pattern = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();

    while let Some(b) = bytes.next() {
        if b != b'\\' {
            pattern.push(b);
            continue;
        }
        let escaped = match bytes.next() {
            Some(b'\\') => b'\\',
            Some(b'a') => 0x07,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'v') => 0x0b,
            Some(b'x') => {
                let high = bytes.next().and_then(hex_value);
                let low = bytes.next().and_then(hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => (high << 4) | low,
                    _ => return Err("invalid \\x escape".to_string()),
                }
            }
            Some(other) => return Err(format!("unsupported escape \\{}", other as char)),
            None => return Err("trailing backslash".to_string()),
        };
        pattern.push(escaped);
    }

    Ok(pattern)
}
