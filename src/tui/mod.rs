// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI: the editor pane, the live preview pane, and the adapter
//! wiring between the editing widget and the document.
//!
//! All state mutation flows through [`App`]: the editing widget reports text
//! changes which land in `Document::working`, and the save command promotes
//! `working` to `saved`, re-evaluates, and refreshes the share link. Nothing
//! evaluates on keystrokes.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::config::PlaygroundConfig;
use crate::eval::{Evaluator, RenderResult};
use crate::link::{encode_share_link, PageAddress};
use crate::model::Document;
use crate::render::{render_tree_unicode, RenderOptions};
use crate::resource::ResourceDescriptor;

pub mod editor;
mod theme;


use editor::{EditorArea, EditorKeyOutcome, VocabularyEntry};
use theme::TuiTheme;

const TOAST_TTL: Duration = Duration::from_millis(2500);
const HEADER_ROWS: u16 = 2;
const FOOTER_ROWS: u16 = 1;

/// Runs the playground TUI until the user quits.
///
/// Startup resources are attached by the caller before this runs; they are
/// fire-and-forget and not synchronized with evaluation.
pub fn run_with_document(
    document: Document,
    config: &PlaygroundConfig,
    page: PageAddress,
    read_only: bool,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(document, config, page, read_only);

    while !app.should_quit {
        app.expire_toast();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    document: Document,
    evaluator: Evaluator,
    editor: EditorArea,
    preview: RenderResult,
    page: PageAddress,
    theme: TuiTheme,
    toast: Option<Toast>,
    show_help: bool,
    show_vocabulary: bool,
    preview_scroll: u16,
    read_only: bool,
    resources: Vec<ResourceDescriptor>,
    definitions: Vec<String>,
    should_quit: bool,
}

impl App {
    fn new(document: Document, config: &PlaygroundConfig, page: PageAddress, read_only: bool) -> Self {
        let evaluator = Evaluator::new(config.component_registry());

        // The widget gets its vocabulary before it can see a keystroke;
        // repeating this on a recreated widget is safe.
        let mut editor = EditorArea::new(document.working());
        editor.register_vocabulary(&vocabulary_entries(&evaluator));
        editor.set_read_only(read_only);

        // Startup evaluation of the (just-seeded) saved text.
        let preview = evaluator.evaluate(document.saved());

        Self {
            document,
            evaluator,
            editor,
            preview,
            page,
            theme: TuiTheme,
            toast: None,
            show_help: false,
            show_vocabulary: false,
            preview_scroll: 0,
            read_only,
            resources: config.resources.clone(),
            definitions: config.definitions.clone(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.run_save();
                    return;
                }
                KeyCode::Up => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(1);
                    return;
                }
                KeyCode::Down => {
                    self.preview_scroll = self.preview_scroll.saturating_add(1);
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                self.show_vocabulary = false;
                return;
            }
            KeyCode::F(2) => {
                self.show_vocabulary = !self.show_vocabulary;
                self.show_help = false;
                return;
            }
            KeyCode::Esc if self.show_help || self.show_vocabulary => {
                self.show_help = false;
                self.show_vocabulary = false;
                return;
            }
            _ => {}
        }

        if self.show_help || self.show_vocabulary {
            return;
        }

        match self.editor.handle_key(key) {
            EditorKeyOutcome::Changed => {
                // Keystrokes touch only the working text; evaluation waits
                // for an explicit save.
                self.document.set_working(self.editor.text());
            }
            EditorKeyOutcome::Handled | EditorKeyOutcome::Ignored => {}
        }
    }

    /// The save command: the only trigger for re-evaluation after startup.
    fn run_save(&mut self) {
        if self.read_only {
            self.set_toast("Save is disabled (read-only)");
            return;
        }

        let outcome = self.document.save();
        self.preview = self.evaluator.evaluate(self.document.saved());
        self.preview_scroll = 0;

        match outcome {
            crate::model::SaveOutcome::Saved => self.set_toast("Saved"),
            crate::model::SaveOutcome::AlreadyClean => self.set_toast("Already saved"),
        }
    }

    /// Derived on demand: a link exists exactly while the document is clean.
    fn share_link(&self) -> Option<String> {
        if self.document.is_dirty() {
            return None;
        }
        Some(encode_share_link(&self.page, self.document.saved()))
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn expire_toast(&mut self) {
        if matches!(&self.toast, Some(toast) if toast.expires_at <= Instant::now()) {
            self.toast = None;
        }
    }
}

fn vocabulary_entries(evaluator: &Evaluator) -> Vec<VocabularyEntry> {
    evaluator
        .registry()
        .iter()
        .map(|spec| {
            VocabularyEntry::new(spec.name(), spec.description().map(str::to_owned))
        })
        .collect()
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(3),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_editor(frame, app, panes[0]);
    draw_preview(frame, app, panes[1]);
    draw_footer(frame, app, chunks[2]);

    if app.show_help {
        draw_help_overlay(frame, app, chunks[1]);
    }
    if app.show_vocabulary {
        draw_vocabulary_overlay(frame, app, chunks[1]);
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut title_spans = vec![Span::styled(" Proteus", app.theme.title_style())];
    title_spans.push(Span::styled(" · live markup playground", app.theme.footer_label_style()));
    if app.read_only {
        title_spans.push(Span::styled("  [read-only]", app.theme.dirty_style()));
    }

    let status_line = match app.share_link() {
        Some(link) => Line::from(vec![
            Span::styled(" link: ", app.theme.footer_label_style()),
            Span::styled(link, app.theme.link_style()),
        ]),
        None => Line::from(Span::styled(
            " unsaved changes (Ctrl-S to save)",
            app.theme.dirty_style(),
        )),
    };

    let header = Paragraph::new(vec![Line::from(title_spans), status_line]);
    frame.render_widget(header, area);
}

fn draw_editor(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut title = String::from(" Editor ");
    if app.read_only {
        title = String::from(" Editor (read-only) ");
    } else if app.document.is_dirty() {
        title = String::from(" Editor ● ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(true))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let (cursor_x, cursor_y) =
        app.editor.ensure_cursor_visible(inner.height as usize, inner.width as usize);
    let (scroll_row, scroll_col) = app.editor.scroll();

    let visible: Vec<Line> = app
        .editor
        .lines()
        .iter()
        .skip(scroll_row)
        .take(inner.height as usize)
        .map(|line| {
            Line::from(
                line.chars().skip(scroll_col).take(inner.width as usize).collect::<String>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(visible), inner);
    frame.set_cursor(inner.x + cursor_x, inner.y + cursor_y);
}

fn draw_preview(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(false))
        .title(" Preview ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match &app.preview {
        RenderResult::Rendered(tree) => {
            let text =
                render_tree_unicode(tree, &RenderOptions::with_width(inner.width as usize));
            let line_count = text.lines().count() as u16;
            let max_scroll = line_count.saturating_sub(inner.height);
            app.preview_scroll = app.preview_scroll.min(max_scroll);

            let paragraph = Paragraph::new(text).scroll((app.preview_scroll, 0));
            frame.render_widget(paragraph, inner);
        }
        RenderResult::Failed(error) => {
            let paragraph = Paragraph::new(error.to_string())
                .style(app.theme.error_style())
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, inner);
        }
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(toast) = &app.toast {
        let paragraph =
            Paragraph::new(format!(" {} ", toast.message)).style(app.theme.toast_style());
        frame.render_widget(paragraph, area);
        return;
    }

    let mut spans = Vec::new();
    for (key, label) in [
        ("Ctrl-S", "save"),
        ("Ctrl-Q", "quit"),
        ("F1", "help"),
        ("F2", "vocabulary"),
        ("Ctrl-↑/↓", "scroll preview"),
    ] {
        if !spans.is_empty() {
            spans.push(Span::styled(" · ", app.theme.footer_label_style()));
        }
        spans.push(Span::styled(format!(" {key}"), app.theme.footer_key_style()));
        spans.push(Span::styled(format!(" {label}"), app.theme.footer_label_style()));
    }

    let matches = app.editor.vocabulary_matches();
    if !matches.is_empty() {
        spans.push(Span::styled("  ", app.theme.footer_label_style()));
        spans.push(Span::styled(matches.join(" "), app.theme.footer_key_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let (row, col) = app.editor.cursor();
    let mut row_buf = itoa::Buffer::new();
    let mut col_buf = itoa::Buffer::new();
    let position = format!("Ln {}, Col {} ", row_buf.format(row + 1), col_buf.format(col + 1));
    let position =
        Paragraph::new(Span::styled(position, app.theme.footer_label_style()))
            .alignment(Alignment::Right);
    frame.render_widget(position, area);
}

fn overlay_area(area: Rect) -> Rect {
    let width = (area.width * 4 / 5).max(20).min(area.width);
    let height = (area.height * 4 / 5).max(8).min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn draw_help_overlay(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let area = overlay_area(area);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from("Keys"),
        Line::from("  Ctrl-S     save working text and refresh the preview"),
        Line::from("  Ctrl-Q     quit"),
        Line::from("  Ctrl-↑/↓   scroll the preview pane"),
        Line::from("  F2         show the component vocabulary"),
        Line::from("  Esc        close this overlay"),
        Line::from(""),
        Line::from("The share link in the header reproduces the saved"),
        Line::from("snippet exactly; it disappears while edits are unsaved."),
    ];

    if !app.resources.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Preview assets (attached at startup):"));
        for resource in &app.resources {
            lines.push(Line::from(format!("  {:?} {}", resource.kind, resource.url)));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.overlay_border_style())
        .title(" Help ");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_vocabulary_overlay(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let area = overlay_area(area);
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for entry in app.editor.vocabulary() {
        let line = match entry.detail() {
            Some(detail) => format!("  {:<14} {detail}", entry.name()),
            None => format!("  {}", entry.name()),
        };
        lines.push(Line::from(line));
    }

    if !app.definitions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Snippets:"));
        for definition in &app.definitions {
            lines.push(Line::from(format!("  {definition}")));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.overlay_border_style())
        .title(" Vocabulary ");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
