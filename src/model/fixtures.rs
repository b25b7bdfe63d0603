// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// The snippet a fresh playground opens with when no share link is present.
pub const DEFAULT_CONTENT: &str = "<div>\n  <h1>Sample code</h1>\n</div>";

/// A denser snippet exercising most of the supported vocabulary; used by
/// tests and benches.
pub fn demo_content() -> String {
    [
        "<div>",
        "  <h1>Proteus</h1>",
        "  <p>Edit on the left, preview on the right. Press <code>Ctrl-S</code> to save.</p>",
        "  <hr/>",
        "  <h2>Lists &amp; links</h2>",
        "  <ul>",
        "    <li>Markup in, <em>rendered tree</em> out</li>",
        "    <li>Errors stay inline, the session stays alive</li>",
        "  </ul>",
        "  <ol>",
        "    <li>Save</li>",
        "    <li>Copy the link from the header</li>",
        "  </ol>",
        "  <blockquote>Share the saved snippet, not the draft.</blockquote>",
        "  <p><a href=\"https://example.net/docs\">Read more</a></p>",
        "  <ion-button>Try it</ion-button>",
        "</div>",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{demo_content, DEFAULT_CONTENT};

    #[test]
    fn default_content_matches_the_sample_snippet() {
        assert!(DEFAULT_CONTENT.contains("<h1>Sample code</h1>"));
    }

    #[test]
    fn demo_content_is_multiline() {
        assert!(demo_content().lines().count() > 10);
    }
}
