// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

/// Style table for the playground chrome. One place to keep the pane and
/// status colors consistent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub(crate) fn title_style(&self) -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub(crate) fn dirty_style(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn link_style(&self) -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub(crate) fn toast_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    }

    pub(crate) fn overlay_border_style(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
