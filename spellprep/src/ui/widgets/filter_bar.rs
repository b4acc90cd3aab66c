//! Filter bar: class, level ceiling, exact level buttons, catalog and layout

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use spellprep_core::text::{level_button, max_level_option, ALL_CLASSES, ALL_LEVELS};
use spellprep_core::PrepSession;

use crate::ui::theme::SpellTheme;

/// Two-line summary of the active filters
pub struct FilterBarWidget<'a> {
    session: &'a PrepSession,
    theme: &'a SpellTheme,
}

impl<'a> FilterBarWidget<'a> {
    pub fn new(session: &'a PrepSession, theme: &'a SpellTheme) -> Self {
        Self { session, theme }
    }

    fn label_style(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    fn settings_line(&self) -> Line<'a> {
        let criteria = self.session.criteria();
        let class = criteria
            .selected_class
            .clone()
            .unwrap_or_else(|| ALL_CLASSES.to_string());

        Line::from(vec![
            Span::styled(" Класс [c/C]: ", self.label_style()),
            Span::styled(class, self.theme.chip_style(criteria.selected_class.is_some())),
            Span::styled("   Макс. уровень [+/-]: ", self.label_style()),
            Span::styled(max_level_option(criteria.max_level), self.theme.text_style()),
            Span::styled("   Каталог [v]: ", self.label_style()),
            Span::styled(self.session.version().to_string(), self.theme.text_style()),
            Span::styled("   Формат [l]: ", self.label_style()),
            Span::styled(self.session.layout().label(), self.theme.text_style()),
        ])
    }

    /// Buttons for every catalog level within the ceiling
    fn level_line(&self) -> Line<'a> {
        let criteria = self.session.criteria();
        let mut spans = vec![
            Span::styled(" Уровень [0-9/a]: ", self.label_style()),
            Span::styled(
                format!(" {ALL_LEVELS} "),
                self.theme.chip_style(criteria.level_filter.is_none()),
            ),
        ];

        for level in self
            .session
            .catalog()
            .levels()
            .into_iter()
            .filter(|level| *level <= criteria.max_level)
        {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", level_button(level)),
                self.theme.chip_style(criteria.level_filter == Some(level)),
            ));
        }

        Line::from(spans)
    }
}

impl Widget for FilterBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![self.settings_line(), self.level_line()];
        Paragraph::new(lines).render(area, buf);
    }
}
