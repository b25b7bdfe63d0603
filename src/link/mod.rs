// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The shareable-link codec.
//!
//! The saved source is carried as one `content` query parameter: URL-safe,
//! unpadded base64 over the UTF-8 bytes of the text. That alphabet needs no
//! percent-escaping and round-trips every Unicode string exactly, which the
//! byte-oriented codec this replaces could not. Decoding is deliberately
//! forgiving: a malformed or foreign value yields `None`, and the playground
//! falls back to its default document instead of failing to load.

use std::sync::OnceLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use regex::Regex;

/// Query parameter carrying the encoded saved source.
pub const SHARE_PARAM: &str = "content";

/// The origin + path a share link is built on. There is no ambient page
/// location in a terminal session, so the address is explicit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    origin: String,
    path: String,
}

impl PageAddress {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self { origin: origin.into(), path: path.into() }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for PageAddress {
    fn default() -> Self {
        Self::new("https://proteus.invalid", "/")
    }
}

/// Builds a share link reproducing `text` as the initial document.
pub fn encode_share_link(page: &PageAddress, text: &str) -> String {
    let token = URL_SAFE_NO_PAD.encode(text.as_bytes());
    format!("{}{}?{SHARE_PARAM}={token}", page.origin(), page.path())
}

fn share_param_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Anything between `content=` and the next parameter or fragment; the
    // base64 decode decides whether it is actually well-formed.
    RE.get_or_init(|| Regex::new(r"[?&]content=([^&#]*)").expect("share param regex"))
}

/// Extracts and decodes the share parameter from an arbitrary URL string.
///
/// Returns `None` when the parameter is absent or its value is not a token
/// this codec produced. Never errors; opening a bad link is not a failure
/// mode, it is the default-document path.
pub fn decode_share_link(url: &str) -> Option<String> {
    let captures = share_param_regex().captures(url)?;
    let token = captures.get(1).map(|m| m.as_str())?;
    let bytes = URL_SAFE_NO_PAD.decode(token.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_share_link, encode_share_link, PageAddress};

    fn page() -> PageAddress {
        PageAddress::new("https://play.example.net", "/markup")
    }

    #[test]
    fn encode_produces_origin_path_and_content_param() {
        let link = encode_share_link(&page(), "<h1>X</h1>");
        assert!(link.starts_with("https://play.example.net/markup?content="));
    }

    #[test]
    fn round_trips_ascii_source() {
        let text = "<div>\n  <h1>Sample code</h1>\n</div>";
        assert_eq!(decode_share_link(&encode_share_link(&page(), text)).as_deref(), Some(text));
    }

    #[test]
    fn round_trips_multibyte_unicode() {
        for text in ["<p>héllo wörld</p>", "<p>日本語のテキスト</p>", "<p>🦀 + 😀</p>", "Ω≈ç√∫"] {
            let link = encode_share_link(&page(), text);
            assert_eq!(decode_share_link(&link).as_deref(), Some(text), "failed for {text:?}");
        }
    }

    #[test]
    fn round_trips_empty_source() {
        assert_eq!(decode_share_link(&encode_share_link(&page(), "")).as_deref(), Some(""));
    }

    #[test]
    fn token_is_line_safe_and_needs_no_escaping() {
        let link = encode_share_link(&page(), "<div data-x=\"a&b\">100% + more</div>");
        let token = link.split('=').nth(1).expect("token");
        assert!(token
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'));
    }

    #[test]
    fn absent_parameter_decodes_to_none() {
        assert_eq!(decode_share_link("https://play.example.net/markup"), None);
        assert_eq!(decode_share_link("https://play.example.net/markup?other=1"), None);
        assert_eq!(decode_share_link(""), None);
    }

    #[test]
    fn garbage_values_decode_to_none_without_panicking() {
        for url in [
            "https://x.invalid/?content=%%%%",
            "https://x.invalid/?content=not!base64?",
            "https://x.invalid/?content=aGk=extra",
            "?content=////",
            "https://x.invalid/?content=_w", // valid base64, invalid UTF-8 (0xFF)
        ] {
            assert_eq!(decode_share_link(url), None, "expected None for {url}");
        }
    }

    #[test]
    fn parameter_is_found_after_other_parameters_and_before_fragments() {
        let text = "<p>ok</p>";
        let token = encode_share_link(&page(), text);
        let token = token.split('=').nth(1).expect("token");

        let url = format!("https://x.invalid/play?theme=vs&content={token}#anchor");
        assert_eq!(decode_share_link(&url).as_deref(), Some(text));
    }

    #[test]
    fn content_must_be_a_parameter_name_not_a_substring() {
        // `discontent=` must not match.
        assert_eq!(decode_share_link("https://x.invalid/?discontent=aGk"), None);
    }
}
