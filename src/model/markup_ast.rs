// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;
use smol_str::SmolStr;

/// A parsed markup fragment: the render description the evaluator hands to
/// the preview runtime. Zero or more root nodes; no single-root requirement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupAst {
    roots: Vec<MarkupNode>,
}

impl MarkupAst {
    pub fn new(roots: Vec<MarkupNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[MarkupNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count, elements and text runs included.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[MarkupNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    MarkupNode::Element(element) => 1 + count(element.children()),
                    MarkupNode::Text(_) => 1,
                })
                .sum()
        }
        count(&self.roots)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

/// One element with its attributes and children.
///
/// `line` is the 1-based source line of the opening tag; it travels with the
/// element so construction errors can point back into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    name: SmolStr,
    attributes: SmallVec<[Attribute; 4]>,
    children: Vec<MarkupNode>,
    line: usize,
}

impl MarkupElement {
    pub fn new(
        name: impl Into<SmolStr>,
        attributes: SmallVec<[Attribute; 4]>,
        children: Vec<MarkupNode>,
        line: usize,
    ) -> Self {
        Self { name: name.into(), attributes, children, line }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// One attribute. `value` is `None` for bare boolean attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: SmolStr,
    value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>, value: Option<String>) -> Self {
        Self { name: name.into(), value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
