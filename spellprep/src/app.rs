//! Main application state and logic

use std::path::PathBuf;

use spellprep_core::filter::MAX_SPELL_LEVEL;
use spellprep_core::{
    Document, ExportError, FormatConfig, PrepSession, PrepState, SpellId, SpellRecord,
};

use crate::ui::theme::SpellTheme;
use crate::ui::Overlay;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Search mode - typing filters the list by name
    Search,
}

/// An export that has been built and is waiting to be written by the main loop
pub struct PendingExport {
    pub document: Document,
    pub config: FormatConfig,
}

/// Main application state
pub struct App {
    pub session: PrepSession,

    // UI state
    pub theme: SpellTheme,
    overlay: Option<Overlay>,
    cursor: usize,

    // Search input
    pub input_mode: InputMode,
    search_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    // Export waiting for the async writer
    pub pending_export: Option<PendingExport>,
}

impl App {
    /// Create a new application over a session
    pub fn new(session: PrepSession) -> Self {
        let search_buffer = session.criteria().search_query.clone();
        let cursor_position = search_buffer.chars().count();
        Self {
            session,
            theme: SpellTheme::default(),
            overlay: None,
            cursor: 0,
            input_mode: InputMode::Normal,
            search_buffer,
            cursor_position,
            status_message: None,
            should_quit: false,
            pending_export: None,
        }
    }

    // =========================================================================
    // Spell list navigation
    // =========================================================================

    /// Visible spell ids in display order (grouped by level, cantrips first)
    pub fn visible_ids(&self) -> Vec<SpellId> {
        self.session
            .visible_groups()
            .into_values()
            .flatten()
            .map(|spell| spell.id)
            .collect()
    }

    /// Index of the highlighted spell among the visible ones
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The spell under the cursor, if the list is not empty
    pub fn selected_spell(&self) -> Option<&SpellRecord> {
        let id = *self.visible_ids().get(self.cursor)?;
        self.session.catalog().get(id)
    }

    pub fn move_down(&mut self, rows: usize) {
        self.cursor = self.cursor.saturating_add(rows);
        self.clamp_cursor();
    }

    pub fn move_up(&mut self, rows: usize) {
        self.cursor = self.cursor.saturating_sub(rows);
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.visible_ids().len().saturating_sub(1);
    }

    /// Keep the cursor inside the visible list after the filters change
    fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Advance the preparation state of the spell under the cursor
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.visible_ids().get(self.cursor).copied() else {
            return;
        };
        match self.session.toggle(id) {
            Ok(state) => {
                let name = self
                    .session
                    .catalog()
                    .get(id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                self.set_status(format!("{}: {}", name, state_label(state)));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Switch to the next catalog version. The selection is cleared.
    pub fn switch_version(&mut self) {
        let next = self.session.version().next();
        match self.session.switch_version(next) {
            Ok(()) => {
                self.cursor = 0;
                self.set_status(format!("Каталог: {}", next.label()));
            }
            Err(e) => self.show_notice(e.to_string()),
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn cycle_class(&mut self, forward: bool) {
        self.session.cycle_class(forward);
        self.clamp_cursor();
    }

    pub fn raise_max_level(&mut self) {
        let level = self.session.criteria().max_level;
        self.session.set_max_level(level.saturating_add(1).min(MAX_SPELL_LEVEL));
        self.clamp_cursor();
    }

    pub fn lower_max_level(&mut self) {
        let level = self.session.criteria().max_level;
        self.session.set_max_level(level.saturating_sub(1));
        self.clamp_cursor();
    }

    pub fn set_level_filter(&mut self, level: Option<u8>) {
        self.session.set_level_filter(level);
        self.clamp_cursor();
    }

    pub fn toggle_layout(&mut self) {
        let layout = self.session.toggle_layout();
        self.set_status(format!("Формат экспорта: {}", layout.label()));
    }

    // =========================================================================
    // Search input
    // =========================================================================

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.cursor_position = self.search_buffer.chars().count();
    }

    /// Leave search mode. Cancelling clears the query.
    pub fn exit_search_mode(&mut self, keep_query: bool) {
        self.input_mode = InputMode::Normal;
        if !keep_query {
            self.search_buffer.clear();
            self.cursor_position = 0;
            self.apply_search();
        }
    }

    fn apply_search(&mut self) {
        self.session.set_search(self.search_buffer.clone());
        self.clamp_cursor();
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .search_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.search_buffer.len());
        self.search_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
        self.apply_search();
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.search_buffer.char_indices().nth(self.cursor_position)
            {
                self.search_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
            self.apply_search();
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.search_buffer.char_indices().nth(self.cursor_position) {
            self.search_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            self.apply_search();
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.search_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.search_buffer.chars().count();
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Build the export document. The main loop writes it on its next pass.
    ///
    /// With nothing selected a blocking notice is shown and no export is queued.
    pub fn request_export(&mut self) {
        match self.session.prepare_export() {
            Ok((document, config)) => {
                self.set_status("Экспорт...");
                self.pending_export = Some(PendingExport { document, config });
            }
            Err(e) => self.show_notice(e.to_string()),
        }
    }

    /// Report the outcome of a written export
    pub fn finish_export(&mut self, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => self.set_status(format!("Сохранено: {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.show_notice(format!("Ошибка экспорта: {e}"));
            }
        }
    }

    // =========================================================================
    // Overlays and status
    // =========================================================================

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    /// Show a notice that blocks input until dismissed
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.overlay = Some(Overlay::Notice(message.into()));
    }

    /// Close any open overlay
    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // =========================================================================
    // Getters for private fields
    // =========================================================================

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}

/// Russian label for a preparation state
pub fn state_label(state: PrepState) -> &'static str {
    match state {
        PrepState::NotPrepared => "не подготовлено",
        PrepState::Prepared => "подготовлено",
        PrepState::AlwaysPrepared => "всегда подготовлено",
    }
}
