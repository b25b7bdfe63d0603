// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smol_str::SmolStr;

/// How an element participates in preview layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    /// Starts on its own line; children flow inside it.
    Block,
    /// Flows within the surrounding text.
    Inline,
    /// Never has children (`br`, `hr`, `img`, ...).
    Void,
    /// Registered at configuration time; rendered as a framed widget.
    Custom,
}

/// One registered name the preview runtime will accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    name: SmolStr,
    category: ElementCategory,
    description: Option<String>,
}

impl ComponentSpec {
    pub fn new(name: impl Into<SmolStr>, category: ElementCategory) -> Self {
        Self { name: name.into(), category, description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ElementCategory {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The vocabulary of names visible to evaluated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: BTreeMap<SmolStr, ComponentSpec>,
}

const BLOCK_ELEMENTS: &[&str] = &[
    "article", "blockquote", "div", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li",
    "main", "ol", "p", "pre", "section", "ul",
];

const INLINE_ELEMENTS: &[&str] =
    &["a", "b", "button", "code", "em", "i", "label", "small", "span", "strong", "u"];

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

// Below this similarity (rapidfuzz ratio, 0-100) a suggestion is worse than
// no suggestion.
const SUGGESTION_MIN_RATIO: f64 = 60.0;

impl ComponentRegistry {
    pub fn empty() -> Self {
        Self { components: BTreeMap::new() }
    }

    /// The fixed HTML-ish vocabulary every playground starts from.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for name in BLOCK_ELEMENTS {
            registry.register(ComponentSpec::new(*name, ElementCategory::Block));
        }
        for name in INLINE_ELEMENTS {
            registry.register(ComponentSpec::new(*name, ElementCategory::Inline));
        }
        for name in VOID_ELEMENTS {
            registry.register(ComponentSpec::new(*name, ElementCategory::Void));
        }
        registry
    }

    /// Registers (or replaces) a component. Idempotent by name.
    pub fn register(&mut self, spec: ComponentSpec) {
        self.components.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.components.values()
    }

    /// The closest registered name to `unknown`, if any is close enough to
    /// be worth offering.
    pub fn suggest(&self, unknown: &str) -> Option<&str> {
        let mut best: Option<(f64, &str)> = None;
        for name in self.components.keys() {
            let name = name.as_str();
            let ratio = rapidfuzz::fuzz::ratio(unknown.chars(), name.chars());
            if ratio < SUGGESTION_MIN_RATIO {
                continue;
            }
            if best.map_or(true, |(best_ratio, _)| ratio > best_ratio) {
                best = Some((ratio, name));
            }
        }
        best.map(|(_, name)| name)
    }
}
