// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// The single source-of-truth state of a playground session.
///
/// `working` always reflects the most recent edit; `saved` only changes via
/// [`Document::save`]. Dirtiness is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    working: String,
    saved: String,
}

/// Result of a save action, so callers can distinguish a real transition from
/// an idempotent repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadyClean,
}

impl Document {
    /// Seeds both `working` and `saved` with the same text, so a freshly
    /// opened document is clean before the first keystroke.
    pub fn from_source(source: impl Into<String>) -> Self {
        let source = source.into();
        Self { working: source.clone(), saved: source }
    }

    pub fn working(&self) -> &str {
        &self.working
    }

    pub fn saved(&self) -> &str {
        &self.saved
    }

    /// Replaces the working text. No validation, no evaluation side effects;
    /// evaluation is driven by `saved`, not `working`.
    pub fn set_working(&mut self, text: impl Into<String>) {
        self.working = text.into();
    }

    /// Promotes `working` to `saved`. The sole way `saved` changes after
    /// initialization.
    pub fn save(&mut self) -> SaveOutcome {
        if self.working == self.saved {
            return SaveOutcome::AlreadyClean;
        }
        self.saved = self.working.clone();
        SaveOutcome::Saved
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, SaveOutcome};

    #[test]
    fn from_source_starts_clean() {
        let doc = Document::from_source("<h1>X</h1>");
        assert_eq!(doc.working(), "<h1>X</h1>");
        assert_eq!(doc.saved(), "<h1>X</h1>");
        assert!(!doc.is_dirty());
    }

    #[test]
    fn set_working_marks_dirty_until_save() {
        let mut doc = Document::from_source("a");
        doc.set_working("b");
        assert!(doc.is_dirty());
        assert_eq!(doc.saved(), "a");

        assert_eq!(doc.save(), SaveOutcome::Saved);
        assert!(!doc.is_dirty());
        assert_eq!(doc.saved(), "b");
    }

    #[test]
    fn dirtiness_tracks_the_latest_edit_only() {
        let mut doc = Document::from_source("a");
        doc.set_working("b");
        doc.set_working("a");
        assert!(!doc.is_dirty());

        doc.set_working("c");
        assert!(doc.is_dirty());
    }

    #[test]
    fn save_is_idempotent_when_clean() {
        let mut doc = Document::from_source("a");
        doc.set_working("b");
        assert_eq!(doc.save(), SaveOutcome::Saved);

        let before = doc.clone();
        assert_eq!(doc.save(), SaveOutcome::AlreadyClean);
        assert_eq!(doc, before);
    }
}
