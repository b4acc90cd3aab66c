//! Grouped spell list with per-spell preparation markers

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use spellprep_core::text::{level_title, NO_SPELLS_FOUND};
use spellprep_core::PrepSession;

use crate::ui::theme::SpellTheme;

/// Widget listing visible spells under level headings
pub struct SpellListWidget<'a> {
    session: &'a PrepSession,
    cursor: usize,
    theme: &'a SpellTheme,
    focused: bool,
}

impl<'a> SpellListWidget<'a> {
    pub fn new(session: &'a PrepSession, theme: &'a SpellTheme) -> Self {
        Self {
            session,
            cursor: 0,
            theme,
            focused: true,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build the display lines and the line index of the cursor row
    fn build_lines(&self) -> (Vec<Line<'a>>, Option<usize>) {
        let mut lines: Vec<Line> = Vec::new();
        let mut cursor_line = None;
        let mut index = 0;

        for (level, spells) in self.session.visible_groups() {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("{} ({})", level_title(level), spells.len()),
                self.theme.heading_style(),
            )));

            for spell in spells {
                let state = self.session.state(spell.id);
                let mut spans = vec![
                    Span::styled(format!(" {} ", state.marker()), self.theme.state_style(state)),
                    Span::styled(spell.name.clone(), self.theme.state_style(state)),
                    Span::styled(
                        format!("  {} · {}", spell.school, spell.casting_time),
                        self.theme.system_style(),
                    ),
                ];
                let tags = spell.tags();
                if !tags.is_empty() {
                    spans.push(Span::styled(format!("  {}", tags.join(" ")), self.theme.tag_style()));
                }

                let mut line = Line::from(spans);
                if index == self.cursor {
                    line = line.style(self.theme.cursor_style());
                    cursor_line = Some(lines.len());
                }
                lines.push(line);
                index += 1;
            }
        }

        (lines, cursor_line)
    }
}

impl Widget for SpellListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Заклинания · {} ", self.session.version().label());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let (lines, cursor_line) = self.build_lines();

        if lines.is_empty() {
            Paragraph::new(Line::from(Span::styled(NO_SPELLS_FOUND, self.theme.system_style())))
                .render(inner, buf);
            return;
        }

        // Keep the cursor row roughly centered once the list overflows
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = cursor_line
            .map(|line| line.saturating_sub(visible_height / 2))
            .unwrap_or(0)
            .min(max_scroll);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(inner, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black).add_modifier(Modifier::DIM))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellprep_core::testing::three_spell_catalog;
    use spellprep_core::SpellId;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_groups_and_markers() {
        let mut session = PrepSession::with_catalog(three_spell_catalog());
        session.toggle(SpellId(2)).unwrap();
        let theme = SpellTheme::default();

        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buffer::empty(area);
        SpellListWidget::new(&session, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Заговоры (1)"));
        assert!(text.contains("1 уровень (2)"));
        assert!(text.contains("[x] Волшебная стрела"));
        assert!(text.contains("[ ] Лечение ран"));
    }

    #[test]
    fn test_renders_empty_notice() {
        let mut session = PrepSession::with_catalog(three_spell_catalog());
        session.set_search("несуществующее");
        let theme = SpellTheme::default();

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        SpellListWidget::new(&session, &theme).render(area, &mut buf);

        assert!(buffer_text(&buf).contains(NO_SPELLS_FOUND));
    }
}
