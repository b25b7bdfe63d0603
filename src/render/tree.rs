// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::text::{collapse_whitespace, text_len, truncate_with_ellipsis, wrap_text};
use super::{
    RenderOptions, UNICODE_BOX_BOTTOM_LEFT, UNICODE_BOX_BOTTOM_RIGHT, UNICODE_BOX_HORIZONTAL,
    UNICODE_BOX_TOP_LEFT, UNICODE_BOX_TOP_RIGHT, UNICODE_BOX_VERTICAL,
};
use crate::preview::{ElementCategory, LiveElement, LiveNode, LiveTree};

/// Deterministic plain-text renderer for the preview pane.
///
/// Block elements stack with one blank line between siblings; inline content
/// is flattened, whitespace-collapsed, and word-wrapped; custom components
/// render as framed widgets carrying their name in the top border.
pub fn render_tree_unicode(tree: &LiveTree, options: &RenderOptions) -> String {
    let width = options.effective_width();
    let mut lines = render_block_sequence(tree.roots(), width);
    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn render_block_sequence(nodes: &[LiveNode], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut index = 0;

    while index < nodes.len() {
        let item_lines = match &nodes[index] {
            LiveNode::Element(element) if !is_inline_node(&nodes[index]) => {
                index += 1;
                render_block_element(element, width)
            }
            _ => {
                // Consecutive inline nodes form one flowed run.
                let run_start = index;
                while index < nodes.len() && is_inline_node(&nodes[index]) {
                    index += 1;
                }
                render_inline_run(&nodes[run_start..index], width)
            }
        };

        if item_lines.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(item_lines);
    }

    lines
}

fn is_inline_node(node: &LiveNode) -> bool {
    match node {
        LiveNode::Text(_) => true,
        LiveNode::Element(element) => match element.category() {
            ElementCategory::Inline => true,
            // Inline-flowing voids; `hr` is the one line-level void.
            ElementCategory::Void => element.name() != "hr",
            ElementCategory::Block | ElementCategory::Custom => false,
        },
    }
}

fn render_block_element(element: &LiveElement, width: usize) -> Vec<String> {
    match element.name() {
        "h1" => render_heading(element, width, Some('═')),
        "h2" => render_heading(element, width, Some(UNICODE_BOX_HORIZONTAL)),
        "h3" | "h4" | "h5" | "h6" => render_heading(element, width, None),
        "p" => {
            let flat = flatten_inline(element.children());
            wrap_text(&flat, width)
        }
        "ul" => render_list(element, width, None),
        "ol" => render_list(element, width, Some(1)),
        "blockquote" => {
            let inner = render_block_sequence(element.children(), width.saturating_sub(2));
            inner.into_iter().map(|line| format!("▏ {line}").trim_end().to_owned()).collect()
        }
        "pre" => element
            .text_content()
            .lines()
            .map(|line| {
                let clipped = truncate_with_ellipsis(line, width.saturating_sub(2));
                format!("{UNICODE_BOX_VERTICAL} {clipped}").trim_end().to_owned()
            })
            .collect(),
        "hr" => vec![UNICODE_BOX_HORIZONTAL.to_string().repeat(width)],
        _ => match element.category() {
            ElementCategory::Custom => render_custom_component(element, width),
            _ => render_block_sequence(element.children(), width),
        },
    }
}

fn render_heading(element: &LiveElement, width: usize, underline: Option<char>) -> Vec<String> {
    let flat = flatten_inline(element.children());
    let mut lines = wrap_text(&flat, width);
    if let Some(underline) = underline {
        let rule_len = lines.iter().map(|line| text_len(line)).max().unwrap_or(0);
        if rule_len > 0 {
            lines.push(underline.to_string().repeat(rule_len));
        }
    }
    lines
}

fn render_list(element: &LiveElement, width: usize, start: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut number = start;
    let mut itoa_buf = itoa::Buffer::new();

    for child in element.children() {
        let LiveNode::Element(item) = child else {
            continue;
        };
        if item.name() != "li" {
            continue;
        }

        let marker = match number.as_mut() {
            Some(n) => {
                let marker = format!("{}. ", itoa_buf.format(*n));
                *n += 1;
                marker
            }
            None => "• ".to_owned(),
        };
        let indent = " ".repeat(text_len(&marker));

        let item_lines =
            render_block_sequence(item.children(), width.saturating_sub(text_len(&marker)));
        for (idx, line) in item_lines.into_iter().enumerate() {
            if idx == 0 {
                lines.push(format!("{marker}{line}"));
            } else if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
    }
    lines
}

fn render_custom_component(element: &LiveElement, width: usize) -> Vec<String> {
    let inner_width = width.saturating_sub(4).max(RenderOptions::MIN_WIDTH / 2);
    let mut inner = render_block_sequence(element.children(), inner_width);
    if inner.is_empty() {
        inner.push(String::new());
    }

    let title = truncate_with_ellipsis(element.name(), inner_width);
    let content_width =
        inner.iter().map(|line| text_len(line)).max().unwrap_or(0).max(text_len(&title) + 2);

    let mut lines = Vec::with_capacity(inner.len() + 2);
    let mut top = String::new();
    top.push(UNICODE_BOX_TOP_LEFT);
    top.push(UNICODE_BOX_HORIZONTAL);
    top.push(' ');
    top.push_str(&title);
    top.push(' ');
    // Inner border width is content_width + 2 (one pad cell each side).
    let mut filled = text_len(&title) + 3;
    while filled < content_width + 2 {
        top.push(UNICODE_BOX_HORIZONTAL);
        filled += 1;
    }
    top.push(UNICODE_BOX_TOP_RIGHT);
    lines.push(top);

    for line in inner {
        let pad = content_width.saturating_sub(text_len(&line));
        lines.push(format!(
            "{UNICODE_BOX_VERTICAL} {line}{} {UNICODE_BOX_VERTICAL}",
            " ".repeat(pad)
        ));
    }

    let mut bottom = String::new();
    bottom.push(UNICODE_BOX_BOTTOM_LEFT);
    for _ in 0..content_width + 2 {
        bottom.push(UNICODE_BOX_HORIZONTAL);
    }
    bottom.push(UNICODE_BOX_BOTTOM_RIGHT);
    lines.push(bottom);
    lines
}

fn render_inline_run(nodes: &[LiveNode], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    // `br` splits the run into separately wrapped segments.
    let mut segment = String::new();

    let mut flush = |segment: &mut String, lines: &mut Vec<String>| {
        let flat = collapse_whitespace(segment);
        lines.extend(wrap_text(&flat, width));
        segment.clear();
    };

    for node in nodes {
        match node {
            LiveNode::Element(element) if element.name() == "br" => flush(&mut segment, &mut lines),
            other => append_inline_node(other, &mut segment),
        }
    }
    flush(&mut segment, &mut lines);
    lines
}

fn flatten_inline(nodes: &[LiveNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        append_inline_node(node, &mut out);
    }
    collapse_whitespace(&out)
}

fn append_inline_node(node: &LiveNode, out: &mut String) {
    match node {
        LiveNode::Text(text) => out.push_str(text),
        LiveNode::Element(element) => append_inline_element(element, out),
    }
}

fn append_inline_element(element: &LiveElement, out: &mut String) {
    match element.name() {
        "strong" | "b" => {
            out.push_str("**");
            append_inline_children(element, out);
            out.push_str("**");
        }
        "em" | "i" => {
            out.push('_');
            append_inline_children(element, out);
            out.push('_');
        }
        "code" => {
            out.push('`');
            append_inline_children(element, out);
            out.push('`');
        }
        "a" => {
            append_inline_children(element, out);
            if let Some(href) = element.attribute("href") {
                out.push_str(" (");
                out.push_str(href);
                out.push(')');
            }
        }
        "button" => {
            out.push_str("[ ");
            append_inline_children(element, out);
            out.push_str(" ]");
        }
        "img" => {
            out.push_str("[image");
            if let Some(alt) = element.attribute("alt") {
                out.push_str(": ");
                out.push_str(alt);
            }
            out.push(']');
        }
        "input" => {
            out.push_str("[input");
            if let Some(placeholder) = element.attribute("placeholder") {
                out.push_str(": ");
                out.push_str(placeholder);
            }
            out.push(']');
        }
        _ => append_inline_children(element, out),
    }
}

fn append_inline_children(element: &LiveElement, out: &mut String) {
    for child in element.children() {
        append_inline_node(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::render_tree_unicode;
    use crate::eval::Evaluator;
    use crate::preview::{ComponentRegistry, ComponentSpec, ElementCategory, LiveTree};
    use crate::render::RenderOptions;

    fn rendered(source: &str) -> String {
        let evaluator = Evaluator::new(registry());
        let result = evaluator.evaluate(source);
        let tree = result.tree().unwrap_or_else(|| panic!("expected {source:?} to render"));
        render_tree_unicode(tree, &RenderOptions::with_width(40))
    }

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::with_builtins();
        registry.register(ComponentSpec::new("ion-button", ElementCategory::Custom));
        registry
    }

    #[test]
    fn empty_tree_renders_to_empty_string() {
        assert_eq!(render_tree_unicode(&LiveTree::default(), &RenderOptions::default()), "");
    }

    #[test]
    fn heading_gets_an_underline() {
        let out = rendered("<h1>Sample code</h1>");
        assert_eq!(out, format!("Sample code\n{}", "═".repeat(11)));
    }

    #[test]
    fn default_content_renders_heading_inside_div() {
        let out = rendered("<div>\n  <h1>Sample code</h1>\n</div>");
        assert!(out.starts_with("Sample code"));
    }

    #[test]
    fn paragraphs_wrap_and_separate() {
        let out = rendered("<p>one two</p><p>three</p>");
        assert_eq!(out, "one two\n\nthree");
    }

    #[test]
    fn inline_markers_for_emphasis_and_code() {
        let out = rendered("<p>use <code>Ctrl-S</code> to <em>save</em></p>");
        assert_eq!(out, "use `Ctrl-S` to _save_");
    }

    #[test]
    fn links_show_their_target() {
        let out = rendered(r#"<p><a href="https://example.net">docs</a></p>"#);
        assert_eq!(out, "docs (https://example.net)");
    }

    #[test]
    fn unordered_list_uses_bullets() {
        let out = rendered("<ul><li>alpha</li><li>beta</li></ul>");
        assert_eq!(out, "• alpha\n• beta");
    }

    #[test]
    fn ordered_list_numbers_items() {
        let out = rendered("<ol><li>first</li><li>second</li></ol>");
        assert_eq!(out, "1. first\n2. second");
    }

    #[test]
    fn br_breaks_a_line_and_hr_draws_a_rule() {
        let out = rendered("<p>a</p>b<br/>c<hr/>");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(&lines[..4], &["a", "", "b", "c"]);
        let rule = lines.last().expect("rule line");
        assert!(!rule.is_empty() && rule.chars().all(|c| c == '─'));
    }

    #[test]
    fn blockquote_is_prefixed() {
        let out = rendered("<blockquote>quoted words</blockquote>");
        assert_eq!(out, "▏ quoted words");
    }

    #[test]
    fn custom_component_renders_as_a_framed_widget() {
        let out = rendered("<ion-button>Try it</ion-button>");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("┌─ ion-button "));
        assert!(lines[1].contains("Try it"));
        assert!(lines[2].starts_with("└"));
    }

    #[test]
    fn narrow_widths_still_render() {
        let out = rendered("<p>some reasonably long paragraph text</p>");
        assert!(out.lines().all(|line| line.chars().count() <= 40));
    }
}
