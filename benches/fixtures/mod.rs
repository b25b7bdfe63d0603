// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumSections,
    LargeDeepLists,
}

impl Case {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumSections => "medium_sections",
            Self::LargeDeepLists => "large_deep_lists",
        }
    }
}

pub fn source(case: Case) -> String {
    match case {
        Case::Small => "<div>\n  <h1>Sample code</h1>\n</div>".to_owned(),
        Case::MediumSections => sections(24),
        Case::LargeDeepLists => deep_lists(160),
    }
}

fn sections(count: usize) -> String {
    let mut out = String::from("<div>\n");
    for idx in 0..count {
        let _ = write!(
            out,
            "  <section>\n    <h2>Section {idx}</h2>\n    <p>Body text for section {idx}, \
             with <em>emphasis</em>, <code>code</code> and a\n    <a href=\"https://example.net/{idx}\">link</a>.</p>\n    <hr/>\n  </section>\n"
        );
    }
    out.push_str("</div>\n");
    out
}

fn deep_lists(items: usize) -> String {
    let mut out = String::from("<div>\n  <h1>Inventory</h1>\n  <ul>\n");
    for idx in 0..items {
        let _ = write!(
            out,
            "    <li>Item {idx} <strong>qty {q}</strong>, a reasonably long label so \
             wrapping has work to do</li>\n",
            q = idx % 7
        );
    }
    out.push_str("  </ul>\n  <ion-button>Order</ion-button>\n</div>\n");
    out
}
