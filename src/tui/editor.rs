// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editing widget: a plain textarea with a cursor, a viewport, and a
//! registered typing-aid vocabulary.
//!
//! The widget knows nothing about documents, saving, or evaluation; it only
//! reports whether a key changed its text. The adapter around it decides
//! what that means.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const TAB_SPACES: &str = "  ";
const DEFAULT_PAGE_ROWS: usize = 20;

/// One entry of the auxiliary definition vocabulary registered at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    name: String,
    detail: Option<String>,
}

impl VocabularyEntry {
    pub fn new(name: impl Into<String>, detail: Option<String>) -> Self {
        Self { name: name.into(), detail }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// What a key press did to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKeyOutcome {
    /// Text changed; the adapter should propagate it.
    Changed,
    /// Consumed (cursor movement etc.) without changing text.
    Handled,
    /// Not an editor key, or the widget is read-only.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct EditorArea {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    scroll_row: usize,
    scroll_col: usize,
    viewport_rows: usize,
    read_only: bool,
    vocabulary: Vec<VocabularyEntry>,
}

impl EditorArea {
    pub fn new(text: &str) -> Self {
        let mut editor = Self {
            lines: Vec::new(),
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            viewport_rows: DEFAULT_PAGE_ROWS,
            read_only: false,
            vocabulary: Vec::new(),
        };
        editor.set_text(text);
        editor
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Registers the static typing-aid vocabulary. Idempotent: repeating the
    /// registration (e.g. after the widget is recreated) replaces, never
    /// duplicates.
    pub fn register_vocabulary(&mut self, entries: &[VocabularyEntry]) {
        self.vocabulary = entries.to_vec();
    }

    pub fn vocabulary(&self) -> &[VocabularyEntry] {
        &self.vocabulary
    }

    /// Vocabulary names starting with the word under the cursor; empty when
    /// the prefix is empty or nothing matches.
    pub fn vocabulary_matches(&self) -> Vec<&str> {
        let prefix = self.current_word();
        if prefix.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&str> = self
            .vocabulary
            .iter()
            .map(VocabularyEntry::name)
            .filter(|name| name.starts_with(prefix) && *name != prefix)
            .collect();
        matches.sort_unstable();
        matches
    }

    /// The identifier-ish run immediately before the cursor.
    fn current_word(&self) -> &str {
        let Some(line) = self.lines.get(self.cursor_row) else {
            return "";
        };
        let end = byte_index_of_char(line, self.cursor_col);
        let start = line[..end]
            .char_indices()
            .rev()
            .take_while(|(_, ch)| ch.is_ascii_alphanumeric() || *ch == '-')
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(end);
        &line[start..end]
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn scroll(&self) -> (usize, usize) {
        (self.scroll_row, self.scroll_col)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Clamps the viewport so the cursor stays visible inside a pane of the
    /// given size; returns the cursor position relative to that pane.
    pub fn ensure_cursor_visible(&mut self, rows: usize, cols: usize) -> (u16, u16) {
        let rows = rows.max(1);
        let cols = cols.max(1);
        self.viewport_rows = rows;

        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + rows {
            self.scroll_row = self.cursor_row + 1 - rows;
        }

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + cols {
            self.scroll_col = self.cursor_col + 1 - cols;
        }

        (
            (self.cursor_col - self.scroll_col) as u16,
            (self.cursor_row - self.scroll_row) as u16,
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorKeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return EditorKeyOutcome::Ignored;
        }

        match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::PageUp
            | KeyCode::PageDown => {
                self.move_cursor(key.code);
                EditorKeyOutcome::Handled
            }
            _ if self.read_only => EditorKeyOutcome::Ignored,
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                EditorKeyOutcome::Changed
            }
            KeyCode::Tab => {
                for ch in TAB_SPACES.chars() {
                    self.insert_char(ch);
                }
                EditorKeyOutcome::Changed
            }
            KeyCode::Enter => {
                self.insert_newline();
                EditorKeyOutcome::Changed
            }
            KeyCode::Backspace => {
                if self.delete_backward() {
                    EditorKeyOutcome::Changed
                } else {
                    EditorKeyOutcome::Handled
                }
            }
            KeyCode::Delete => {
                if self.delete_forward() {
                    EditorKeyOutcome::Changed
                } else {
                    EditorKeyOutcome::Handled
                }
            }
            _ => EditorKeyOutcome::Ignored,
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = self.line_len(self.cursor_row);
                }
            }
            KeyCode::Right => {
                if self.cursor_col < self.line_len(self.cursor_row) {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
                self.clamp_col();
            }
            KeyCode::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                }
                self.clamp_col();
            }
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = self.line_len(self.cursor_row),
            KeyCode::PageUp => {
                self.cursor_row = self.cursor_row.saturating_sub(self.viewport_rows);
                self.clamp_col();
            }
            KeyCode::PageDown => {
                self.cursor_row =
                    (self.cursor_row + self.viewport_rows).min(self.lines.len() - 1);
                self.clamp_col();
            }
            _ => {}
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|line| line.chars().count()).unwrap_or(0)
    }

    fn clamp_col(&mut self) {
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
    }

    fn insert_char(&mut self, ch: char) {
        let row = self.cursor_row;
        let at = byte_index_of_char(&self.lines[row], self.cursor_col);
        self.lines[row].insert(at, ch);
        self.cursor_col += 1;
    }

    fn insert_newline(&mut self) {
        let row = self.cursor_row;
        let at = byte_index_of_char(&self.lines[row], self.cursor_col);
        let tail = self.lines[row].split_off(at);
        self.lines.insert(row + 1, tail);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    fn delete_backward(&mut self) -> bool {
        if self.cursor_col > 0 {
            let row = self.cursor_row;
            let at = byte_index_of_char(&self.lines[row], self.cursor_col - 1);
            self.lines[row].remove(at);
            self.cursor_col -= 1;
            true
        } else if self.cursor_row > 0 {
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&removed);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        let row = self.cursor_row;
        if self.cursor_col < self.line_len(row) {
            let at = byte_index_of_char(&self.lines[row], self.cursor_col);
            self.lines[row].remove(at);
            true
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            true
        } else {
            false
        }
    }
}

fn byte_index_of_char(line: &str, char_idx: usize) -> usize {
    line.char_indices().nth(char_idx).map(|(idx, _)| idx).unwrap_or(line.len())
}
