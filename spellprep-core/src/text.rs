//! User-facing Russian text.

/// Title of the exported document.
pub const DOCUMENT_TITLE: &str = "Подготовленные заклинания";

/// Notice shown when export is attempted with nothing selected.
pub const NOTHING_SELECTED: &str = "Выберите хотя бы одно заклинание";

/// Shown when the filters leave no spells.
pub const NO_SPELLS_FOUND: &str = "Заклинания не найдены";

/// Shown in the statistics panel when nothing counts toward totals.
pub const NO_STATISTICS: &str = "Нет выбранных заклинаний";

/// Label for the "all classes" option.
pub const ALL_CLASSES: &str = "Все классы";

/// Label for the "all levels" button.
pub const ALL_LEVELS: &str = "Все";

/// The word "spell" declined for `count`.
///
/// Endings 11-19 take the genitive plural, a final 1 the nominative singular,
/// a final 2-4 the genitive singular, everything else the genitive plural.
pub fn pluralize_spells(count: usize) -> &'static str {
    let last_two = count % 100;
    let last_one = count % 10;

    if (11..=19).contains(&last_two) {
        return "заклинаний";
    }
    match last_one {
        1 => "заклинание",
        2..=4 => "заклинания",
        _ => "заклинаний",
    }
}

/// Section heading for a spell level.
pub fn level_title(level: u8) -> String {
    if level == 0 {
        "Заговоры".to_string()
    } else {
        format!("{level} уровень")
    }
}

/// Option text for the max-level selector.
pub fn max_level_option(level: u8) -> String {
    if level == 0 {
        "Только заговоры".to_string()
    } else {
        format!("{level} уровень")
    }
}

/// Caption of a level filter button.
pub fn level_button(level: u8) -> String {
    if level == 0 {
        "Заговор".to_string()
    } else {
        level.to_string()
    }
}

/// Header line with the number of selected spells.
pub fn prepared_header(count: usize) -> String {
    format!("Подготовлено: {} {}", count, pluralize_spells(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_reference_values() {
        assert_eq!(pluralize_spells(1), "заклинание");
        assert_eq!(pluralize_spells(2), "заклинания");
        assert_eq!(pluralize_spells(5), "заклинаний");
        assert_eq!(pluralize_spells(11), "заклинаний");
        assert_eq!(pluralize_spells(21), "заклинание");
        assert_eq!(pluralize_spells(111), "заклинаний");
    }

    #[test]
    fn test_pluralize_edges() {
        assert_eq!(pluralize_spells(0), "заклинаний");
        assert_eq!(pluralize_spells(4), "заклинания");
        assert_eq!(pluralize_spells(12), "заклинаний");
        assert_eq!(pluralize_spells(14), "заклинаний");
        assert_eq!(pluralize_spells(19), "заклинаний");
        assert_eq!(pluralize_spells(22), "заклинания");
        assert_eq!(pluralize_spells(101), "заклинание");
        assert_eq!(pluralize_spells(112), "заклинаний");
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(level_title(0), "Заговоры");
        assert_eq!(level_title(3), "3 уровень");
        assert_eq!(max_level_option(0), "Только заговоры");
        assert_eq!(max_level_option(9), "9 уровень");
        assert_eq!(level_button(0), "Заговор");
        assert_eq!(level_button(4), "4");
    }

    #[test]
    fn test_prepared_header() {
        assert_eq!(prepared_header(0), "Подготовлено: 0 заклинаний");
        assert_eq!(prepared_header(3), "Подготовлено: 3 заклинания");
    }
}
