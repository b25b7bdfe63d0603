// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::registry::{ComponentRegistry, ElementCategory};
use crate::model::markup_ast::{Attribute, MarkupAst, MarkupElement, MarkupNode};

/// The constructed preview tree: every element resolved against the
/// registry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiveTree {
    roots: Vec<LiveNode>,
}

impl LiveTree {
    pub fn roots(&self) -> &[LiveNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveNode {
    Element(LiveElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveElement {
    name: SmolStr,
    category: ElementCategory,
    attributes: SmallVec<[Attribute; 4]>,
    children: Vec<LiveNode>,
}

impl LiveElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ElementCategory {
        self.category
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|attr| attr.name() == name).and_then(Attribute::value)
    }

    pub fn children(&self) -> &[LiveNode] {
        &self.children
    }

    /// Concatenated descendant text, the way inline content reads.
    pub fn text_content(&self) -> String {
        fn collect(nodes: &[LiveNode], out: &mut String) {
            for node in nodes {
                match node {
                    LiveNode::Text(text) => out.push_str(text),
                    LiveNode::Element(element) => collect(&element.children, out),
                }
            }
        }
        let mut out = String::new();
        collect(&self.children, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    UnknownElement {
        line: usize,
        name: String,
        suggestion: Option<String>,
    },
    VoidElementWithChildren {
        line: usize,
        name: String,
    },
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { line, name, suggestion } => {
                write!(f, "unknown element <{name}> on line {line}")?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean <{suggestion}>?)")?;
                }
                Ok(())
            }
            Self::VoidElementWithChildren { line, name } => {
                write!(f, "void element <{name}> on line {line} must not have children")
            }
        }
    }
}

impl std::error::Error for ConstructError {}

/// Builds a live tree from a render description, resolving every element
/// name against the registry. The first unresolvable node fails the whole
/// construction; partial trees are never produced.
pub fn construct_tree(
    ast: &MarkupAst,
    registry: &ComponentRegistry,
) -> Result<LiveTree, ConstructError> {
    let mut roots = Vec::with_capacity(ast.roots().len());
    for node in ast.roots() {
        roots.push(construct_node(node, registry)?);
    }
    Ok(LiveTree { roots })
}

fn construct_node(
    node: &MarkupNode,
    registry: &ComponentRegistry,
) -> Result<LiveNode, ConstructError> {
    match node {
        MarkupNode::Text(text) => Ok(LiveNode::Text(text.clone())),
        MarkupNode::Element(element) => construct_element(element, registry).map(LiveNode::Element),
    }
}

fn construct_element(
    element: &MarkupElement,
    registry: &ComponentRegistry,
) -> Result<LiveElement, ConstructError> {
    let Some(spec) = registry.get(element.name()) else {
        return Err(ConstructError::UnknownElement {
            line: element.line(),
            name: element.name().to_owned(),
            suggestion: registry.suggest(element.name()).map(str::to_owned),
        });
    };

    let category = spec.category();
    if category == ElementCategory::Void && !element.children().is_empty() {
        return Err(ConstructError::VoidElementWithChildren {
            line: element.line(),
            name: element.name().to_owned(),
        });
    }

    let mut children = Vec::with_capacity(element.children().len());
    for child in element.children() {
        children.push(construct_node(child, registry)?);
    }

    Ok(LiveElement {
        name: SmolStr::new(element.name()),
        category,
        attributes: element.attributes().iter().cloned().collect(),
        children,
    })
}
