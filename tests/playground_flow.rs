// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end flow: share link -> document -> evaluation -> rendered text.

use proteus::config::PlaygroundConfig;
use proteus::eval::Evaluator;
use proteus::link::{decode_share_link, encode_share_link, PageAddress};
use proteus::model::{Document, SaveOutcome};
use proteus::render::{render_tree_unicode, RenderOptions};

fn page() -> PageAddress {
    PageAddress::new("https://play.example.net", "/")
}

fn evaluator() -> Evaluator {
    Evaluator::new(PlaygroundConfig::builtin().component_registry())
}

#[test]
fn shared_snippet_reproduces_document_and_preview() {
    let snippet = "<div>\n  <h1>Shared</h1>\n  <p>From a link, with ünïcode 🦀</p>\n</div>";

    let link = encode_share_link(&page(), snippet);
    let decoded = decode_share_link(&link).expect("decode own link");
    assert_eq!(decoded, snippet);

    let document = Document::from_source(decoded);
    assert_eq!(document.working(), snippet);
    assert_eq!(document.saved(), snippet);
    assert!(!document.is_dirty());

    let result = evaluator().evaluate(document.saved());
    let tree = result.tree().expect("shared snippet renders");

    let text = render_tree_unicode(tree, &RenderOptions::with_width(60));
    assert!(text.contains("Shared"));
    assert!(text.contains("ünïcode 🦀"));
}

#[test]
fn garbage_link_degrades_to_the_default_document() {
    let decoded = decode_share_link("https://play.example.net/?content=!!!not-base64!!!");
    assert_eq!(decoded, None);

    // The shell substitutes the default snippet; the session still renders.
    let document = Document::from_source("<div>\n  <h1>Sample code</h1>\n</div>");
    let result = evaluator().evaluate(document.saved());
    assert!(result.is_rendered());
}

#[test]
fn demo_snippet_exercises_the_whole_vocabulary() {
    let source = proteus::model::fixtures::demo_content();
    let result = evaluator().evaluate(&source);
    let tree = result.tree().expect("demo content renders");

    let text = render_tree_unicode(tree, &RenderOptions::with_width(48));
    assert!(text.contains("Proteus"));
    assert!(text.contains("• "));
    assert!(text.contains("1. "));
    assert!(text.contains("ion-button"));
}

#[test]
fn edit_save_share_cycle() {
    let mut document = Document::from_source("<p>v1</p>");
    let evaluator = evaluator();

    // Bad edit: saving surfaces an inline error but keeps the session.
    document.set_working("<p>v2");
    assert_eq!(document.save(), SaveOutcome::Saved);
    let failed = evaluator.evaluate(document.saved());
    assert!(!failed.is_rendered());
    assert!(!failed.error().expect("error").to_string().is_empty());

    // Fix and save again: evaluation restarts from scratch.
    document.set_working("<p>v2</p>");
    assert_eq!(document.save(), SaveOutcome::Saved);
    let result = evaluator.evaluate(document.saved());
    assert!(result.is_rendered());

    // The link now carries exactly the fixed snippet.
    let link = encode_share_link(&page(), document.saved());
    assert_eq!(decode_share_link(&link).as_deref(), Some("<p>v2</p>"));
}
