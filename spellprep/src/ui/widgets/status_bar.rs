//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::SpellTheme;

/// Status bar with the input mode, the prepared count and the last message
pub struct StatusBarWidget<'a> {
    prepared_header: &'a str,
    input_mode: InputMode,
    theme: &'a SpellTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(prepared_header: &'a str, input_mode: InputMode, theme: &'a SpellTheme) -> Self {
        Self {
            prepared_header,
            input_mode,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (input_mode_text, input_mode_style) = match self.input_mode {
            InputMode::Normal => (
                "NORMAL",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            InputMode::Search => (
                "SEARCH",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };

        let mut spans = vec![
            Span::styled(format!("-- {input_mode_text} --"), input_mode_style),
            Span::raw(" | "),
            Span::styled(
                self.prepared_header,
                self.theme.text_style().add_modifier(Modifier::BOLD),
            ),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, self.theme.system_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    input_mode: InputMode,
}

impl HotkeyBarWidget {
    pub fn new(input_mode: InputMode) -> Self {
        Self { input_mode }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.input_mode {
            InputMode::Normal => vec![
                ("j/k:move", true),
                ("space:toggle", true),
                ("/:search", true),
                ("c:class", true),
                ("+/-:max level", true),
                ("0-9:level", true),
                ("v:catalog", false),
                ("l:layout", false),
                ("e:export", true),
                ("?:help", false),
                ("q:quit", false),
            ],
            InputMode::Search => vec![
                ("Esc:clear", true),
                ("Enter:keep", true),
                ("↑↓:move", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
