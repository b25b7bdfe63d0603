// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the document (working/saved text) and the markup AST.

pub mod document;
pub mod fixtures;
pub mod markup_ast;

pub use document::{Document, SaveOutcome};
pub use markup_ast::{Attribute, MarkupAst, MarkupElement, MarkupNode};
