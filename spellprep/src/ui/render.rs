//! Render orchestration for the spell preparation TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    FilterBarWidget, HotkeyBarWidget, InputWidget, SpellListWidget, StatisticsWidget,
    StatusBarWidget,
};

/// Overlay types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    /// Blocking message, dismissed with Enter or Esc
    Notice(String),
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    frame.render_widget(
        FilterBarWidget::new(&app.session, &app.theme),
        layout.filter_area,
    );

    let searching = matches!(app.input_mode, InputMode::Search);
    let input_widget = InputWidget::new(app.search_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(searching);
    frame.render_widget(input_widget, layout.search_area);

    let list_widget = SpellListWidget::new(&app.session, &app.theme)
        .cursor(app.cursor())
        .focused(!searching);
    frame.render_widget(list_widget, layout.list_area);

    let statistics = app.session.statistics();
    let sidebar = StatisticsWidget::new(&statistics, &app.theme).selected(app.selected_spell());
    frame.render_widget(sidebar, layout.sidebar_area);

    let header = app.session.prepared_header();
    let status_widget = StatusBarWidget::new(&header, app.input_mode, &app.theme)
        .message(app.status_message());
    frame.render_widget(status_widget, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.input_mode), layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " Подготовка заклинаний | {} | {} ",
        app.session.version().label(),
        app.session.export_dir().display()
    );

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Notice(message) => render_notice_overlay(frame, app, message, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(56, 26, area);

    frame.render_widget(Clear, popup_area);

    let section = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " Подготовка заклинаний - Справка ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Список:", section)),
        Line::from("  j/k or ↑/↓     Move cursor"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  Ctrl+u/d       Move by ten rows"),
        Line::from("  Space/Enter    Cycle: [ ] -> [x] -> [*] -> [ ]"),
        Line::from(""),
        Line::from(Span::styled("Фильтры:", section)),
        Line::from("  c/C            Next/previous class"),
        Line::from("  +/-            Raise/lower max level"),
        Line::from("  0-9            Show one level only"),
        Line::from("  a              Show all levels"),
        Line::from("  /              Search by name (Esc clears)"),
        Line::from(""),
        Line::from(Span::styled("Каталог и экспорт:", section)),
        Line::from("  v              Switch 2014/2024 (clears selection)"),
        Line::from("  l              Toggle list/cards layout"),
        Line::from("  e              Export prepared spells"),
        Line::from(""),
        Line::from("  [x] prepared   [*] always prepared"),
        Line::from("  q              Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render a blocking notice
fn render_notice_overlay(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let popup_area = centered_rect_fixed(48, 7, area);

    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), app.theme.notice_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Enter / Esc",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Внимание ")
        .borders(Borders::ALL)
        .border_style(app.theme.notice_style());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use spellprep_core::testing::three_spell_catalog;
    use spellprep_core::text::NOTHING_SELECTED;
    use spellprep_core::PrepSession;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_full_frame_renders() {
        let mut app = App::new(PrepSession::with_catalog(three_spell_catalog()));
        app.toggle_selected();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Подготовлено: 1 заклинание"));
        assert!(text.contains("Все классы"));
        assert!(text.contains("[x] Огненный снаряд"));
        // The cantrip does not count toward statistics
        assert!(text.contains("Нет выбранных заклинаний"));
    }

    #[test]
    fn test_notice_overlay_renders() {
        let mut app = App::new(PrepSession::with_catalog(three_spell_catalog()));
        app.request_export();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(screen_text(&terminal).contains(NOTHING_SELECTED));
    }
}
