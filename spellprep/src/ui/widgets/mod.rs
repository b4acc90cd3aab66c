//! TUI widgets for spell preparation

pub mod filter_bar;
pub mod input;
pub mod spell_list;
pub mod statistics;
pub mod status_bar;

pub use filter_bar::FilterBarWidget;
pub use input::InputWidget;
pub use spell_list::SpellListWidget;
pub use statistics::StatisticsWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
