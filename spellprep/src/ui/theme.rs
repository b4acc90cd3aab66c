//! Color theme and styling for the spell preparation TUI

use ratatui::style::{Color, Modifier, Style};
use spellprep_core::PrepState;

/// UI color theme
#[derive(Debug, Clone)]
pub struct SpellTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Preparation state colors
    pub prepared: Color,
    pub always_prepared: Color,
    pub not_prepared: Color,

    // Text colors
    pub heading_text: Color,
    pub tag_text: Color,
    pub system_text: Color,
    pub notice_text: Color,

    // Cursor row
    pub cursor_bg: Color,
}

impl Default for SpellTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            prepared: Color::Green,
            always_prepared: Color::Yellow,
            not_prepared: Color::Gray,

            heading_text: Color::LightRed,
            tag_text: Color::Magenta,
            system_text: Color::DarkGray,
            notice_text: Color::LightRed,

            cursor_bg: Color::Rgb(40, 40, 60),
        }
    }
}

impl SpellTheme {
    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for a spell row by its preparation state
    pub fn state_style(&self, state: PrepState) -> Style {
        match state {
            PrepState::NotPrepared => Style::default().fg(self.not_prepared),
            PrepState::Prepared => Style::default()
                .fg(self.prepared)
                .add_modifier(Modifier::BOLD),
            PrepState::AlwaysPrepared => Style::default()
                .fg(self.always_prepared)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for level section headings
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_text)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Get style for concentration and ritual tags
    pub fn tag_style(&self) -> Style {
        Style::default().fg(self.tag_text)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for blocking notices
    pub fn notice_style(&self) -> Style {
        Style::default()
            .fg(self.notice_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlight for the row under the cursor
    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.cursor_bg)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Style for an active/inactive filter chip
    pub fn chip_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.foreground)
        }
    }
}
