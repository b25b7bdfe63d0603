// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The live evaluator: saved source text in, render result out.
//!
//! Evaluation is a pure function of the saved text and the registered
//! vocabulary. Failures are values, not control flow: every call site
//! pattern-matches both outcomes, and a failed evaluation never disturbs
//! the session.

use std::fmt;

use crate::format::markup::{parse_markup, MarkupParseError};
use crate::preview::{construct_tree, ComponentRegistry, ConstructError, LiveTree};

/// Outcome of evaluating one saved snapshot. Produced fresh per evaluation
/// and replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Rendered(LiveTree),
    Failed(EvaluationError),
}

impl RenderResult {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    pub fn tree(&self) -> Option<&LiveTree> {
        match self {
            Self::Rendered(tree) => Some(tree),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            Self::Rendered(_) => None,
            Self::Failed(error) => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    Parse(MarkupParseError),
    Construct(ConstructError),
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Construct(err) => write!(f, "cannot construct preview: {err}"),
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Construct(err) => Some(err),
        }
    }
}

impl From<MarkupParseError> for EvaluationError {
    fn from(value: MarkupParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<ConstructError> for EvaluationError {
    fn from(value: ConstructError) -> Self {
        Self::Construct(value)
    }
}

/// Evaluates saved source against a fixed, pre-registered vocabulary.
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: ComponentRegistry,
}

impl Evaluator {
    /// The vocabulary must be complete before the first evaluation; there is
    /// no late registration.
    pub fn new(registry: ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Parses and constructs in one step. Reads the source, touches nothing
    /// else; re-running after a failure starts from scratch.
    pub fn evaluate(&self, source: &str) -> RenderResult {
        let ast = match parse_markup(source) {
            Ok(ast) => ast,
            Err(err) => return RenderResult::Failed(err.into()),
        };
        match construct_tree(&ast, &self.registry) {
            Ok(tree) => RenderResult::Rendered(tree),
            Err(err) => RenderResult::Failed(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EvaluationError, Evaluator, RenderResult};
    use crate::preview::{ComponentRegistry, LiveNode};

    fn evaluator() -> Evaluator {
        Evaluator::new(ComponentRegistry::with_builtins())
    }

    #[test]
    fn valid_source_renders_a_tree() {
        let result = evaluator().evaluate("<div>hi</div>");
        let tree = result.tree().expect("rendered");
        assert_eq!(tree.roots().len(), 1);
        let LiveNode::Element(element) = &tree.roots()[0] else {
            panic!("expected element root");
        };
        assert_eq!(element.name(), "div");
        assert_eq!(element.text_content(), "hi");
    }

    #[test]
    fn unterminated_tag_fails_with_readable_message() {
        let result = evaluator().evaluate("<div>");
        let error = result.error().expect("failed");
        assert!(matches!(error, EvaluationError::Parse(_)));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn unknown_name_fails_as_construction_error() {
        let result = evaluator().evaluate("<widget>x</widget>");
        assert!(matches!(result, RenderResult::Failed(EvaluationError::Construct(_))));
    }

    #[test]
    fn failure_then_success_from_scratch() {
        let evaluator = evaluator();
        assert!(!evaluator.evaluate("<div>").is_rendered());
        assert!(evaluator.evaluate("<div>ok</div>").is_rendered());
    }

    #[test]
    fn empty_source_renders_an_empty_tree() {
        let result = evaluator().evaluate("");
        assert!(result.tree().expect("rendered").is_empty());
    }
}
