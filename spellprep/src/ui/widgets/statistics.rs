//! Sidebar: preparation statistics and details of the highlighted spell

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use spellprep_core::text::{level_title, NO_STATISTICS};
use spellprep_core::{PrepState, SpellRecord, Statistics};

use crate::ui::theme::SpellTheme;

/// Per-level counts of prepared and always-prepared spells
pub struct StatisticsWidget<'a> {
    statistics: &'a Statistics,
    selected: Option<&'a SpellRecord>,
    theme: &'a SpellTheme,
}

impl<'a> StatisticsWidget<'a> {
    pub fn new(statistics: &'a Statistics, theme: &'a SpellTheme) -> Self {
        Self {
            statistics,
            selected: None,
            theme,
        }
    }

    /// Spell whose details fill the lower half
    pub fn selected(mut self, spell: Option<&'a SpellRecord>) -> Self {
        self.selected = spell;
        self
    }

    fn statistics_lines(&self) -> Vec<Line<'a>> {
        if self.statistics.is_empty() {
            return vec![Line::from(Span::styled(NO_STATISTICS, self.theme.system_style()))];
        }

        let mut lines = Vec::new();
        for (level, counts) in &self.statistics.per_level {
            if counts.is_zero() {
                continue;
            }
            let mut spans = vec![Span::styled(
                format!("{}: ", level_title(*level)),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if counts.prepared > 0 {
                spans.push(Span::styled(
                    counts.prepared.to_string(),
                    self.theme.state_style(PrepState::Prepared),
                ));
            }
            if counts.always_prepared > 0 {
                if counts.prepared > 0 {
                    spans.push(Span::raw(" + "));
                }
                spans.push(Span::styled(
                    format!("{} (всегда)", counts.always_prepared),
                    self.theme.state_style(PrepState::AlwaysPrepared),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Подготовлено: {}",
            self.statistics.total_prepared
        )));
        lines.push(Line::from(format!(
            "Всегда подготовлено: {}",
            self.statistics.total_always_prepared
        )));
        lines.push(Line::from(Span::styled(
            format!("Всего: {}", self.statistics.grand_total()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines
    }

    fn detail_lines(&self, spell: &'a SpellRecord) -> Vec<Line<'a>> {
        let dim = Style::default().add_modifier(Modifier::DIM);
        let mut lines = vec![
            Line::from(Span::styled(
                spell.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![Span::styled("Школа: ", dim), Span::raw(spell.school.as_str())]),
            Line::from(vec![
                Span::styled("Время: ", dim),
                Span::raw(spell.casting_time.as_str()),
            ]),
            Line::from(vec![Span::styled("Дистанция: ", dim), Span::raw(spell.range.as_str())]),
            Line::from(vec![Span::styled("Компоненты: ", dim), Span::raw(spell.components_text())]),
            Line::from(vec![Span::styled("Длительность: ", dim), Span::raw(spell.duration_text())]),
            Line::from(vec![
                Span::styled("Классы: ", dim),
                Span::raw(spell.classes.join(", ")),
            ]),
            Line::from(""),
            Line::from(spell.description.as_str()),
        ];
        if let Some(ref higher) = spell.at_higher_levels {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                higher.as_str(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl Widget for StatisticsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(0)])
            .split(area);

        let stats_block = Block::default()
            .title(" Статистика ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        Paragraph::new(self.statistics_lines())
            .block(stats_block)
            .render(chunks[0], buf);

        let details_block = Block::default()
            .title(" Описание ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let details = match self.selected {
            Some(spell) => self.detail_lines(spell),
            None => Vec::new(),
        };
        Paragraph::new(details)
            .block(details_block)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);
    }
}
