// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use memchr::memchr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    UnknownName { name: String },
    InvalidNumber { digits: String },
    InvalidCodePoint { value: u32 },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName { name } => write!(f, "unknown entity name: &{name};"),
            Self::InvalidNumber { digits } => {
                write!(f, "invalid numeric character reference: &#{digits};")
            }
            Self::InvalidCodePoint { value } => {
                write!(f, "numeric character reference is not a valid code point: {value:#x}")
            }
        }
    }
}

impl std::error::Error for EntityError {}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

// Longest recognized reference body; anything longer is treated as literal
// text rather than scanned to the end of input.
const MAX_REFERENCE_LEN: usize = 12;

/// Decodes character references in a text or attribute-value run.
///
/// `&name;` and `&#NN;`/`&#xHH;` forms are decoded; a `&` that does not
/// begin a well-formed reference stays literal. A well-formed-looking
/// reference with an unknown name or out-of-range number is an error.
pub(super) fn decode_entities(raw: &str) -> Result<String, EntityError> {
    let bytes = raw.as_bytes();
    let Some(first_amp) = memchr(b'&', bytes) else {
        return Ok(raw.to_owned());
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first_amp]);
    let mut rest = &raw[first_amp..];

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match split_reference(after) {
            Some((body, consumed)) => {
                out.push(decode_reference(body)?);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Returns the reference body (without `&` and `;`) and the consumed length
/// including the terminating `;`, or `None` when `after` does not look like
/// a reference at all.
fn split_reference(after: &str) -> Option<(&str, usize)> {
    let mut end = None;
    for (idx, ch) in after.char_indices().take(MAX_REFERENCE_LEN + 1) {
        match ch {
            ';' => {
                end = Some(idx);
                break;
            }
            '#' if idx == 0 => {}
            _ if ch.is_ascii_alphanumeric() => {}
            _ => return None,
        }
    }

    let end = end?;
    if end == 0 {
        // "&;" is literal text.
        return None;
    }
    Some((&after[..end], end + 1))
}

fn decode_reference(body: &str) -> Result<char, EntityError> {
    if let Some(digits) = body.strip_prefix('#') {
        let hex = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X'));
        let (radix, digits) = match hex {
            Some(hex) => (16, hex),
            None => (10, digits),
        };
        let value = u32::from_str_radix(digits, radix)
            .map_err(|_| EntityError::InvalidNumber { digits: body[1..].to_owned() })?;
        return char::from_u32(value).ok_or(EntityError::InvalidCodePoint { value });
    }

    named_entity(body).ok_or_else(|| EntityError::UnknownName { name: body.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::{decode_entities, EntityError};

    #[test]
    fn passes_through_text_without_references() {
        assert_eq!(decode_entities("plain text").expect("decode"), "plain text");
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;").expect("decode"), "a & b <c>");
        assert_eq!(decode_entities("&quot;x&apos;").expect("decode"), "\"x'");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#65;&#x42;").expect("decode"), "AB");
        assert_eq!(decode_entities("&#x1F600;").expect("decode"), "😀");
    }

    #[test]
    fn bare_ampersand_stays_literal() {
        assert_eq!(decode_entities("fish & chips").expect("decode"), "fish & chips");
        assert_eq!(decode_entities("a && b").expect("decode"), "a && b");
        assert_eq!(decode_entities("trailing &").expect("decode"), "trailing &");
        assert_eq!(decode_entities("&;").expect("decode"), "&;");
    }

    #[test]
    fn overlong_candidate_stays_literal() {
        let raw = "&notareferencebecauseitistoolong;";
        assert_eq!(decode_entities(raw).expect("decode"), raw);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = decode_entities("&bogus;").unwrap_err();
        assert_eq!(err, EntityError::UnknownName { name: "bogus".to_owned() });
    }

    #[test]
    fn surrogate_code_point_is_an_error() {
        let err = decode_entities("&#xD800;").unwrap_err();
        assert_eq!(err, EntityError::InvalidCodePoint { value: 0xD800 });
    }
}
