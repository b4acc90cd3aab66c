//! Structured description of an exported document.
//!
//! This is the hand-off format to a rendering backend: grouped, ordered and
//! attribute-complete, with no styling attached.

use crate::spells::SpellRecord;
use crate::text::level_title;
use serde::Serialize;

/// Document layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ExportLayout {
    /// Spells grouped under level headings, one block each.
    #[default]
    List,
    /// Two summary cards per row, in input order.
    Cards,
}

impl ExportLayout {
    pub fn label(&self) -> &'static str {
        match self {
            ExportLayout::List => "Список",
            ExportLayout::Cards => "Карточки",
        }
    }

    /// Default output file name for this layout.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportLayout::List => "podgotovlennye-zaklinaniya.pdf",
            ExportLayout::Cards => "podgotovlennye-zaklinaniya-kartochki.pdf",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ExportLayout::List => ExportLayout::Cards,
            ExportLayout::Cards => ExportLayout::List,
        }
    }
}

impl std::str::FromStr for ExportLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" | "список" => Ok(ExportLayout::List),
            "cards" | "карточки" => Ok(ExportLayout::Cards),
            other => Err(format!("unknown layout: {other}")),
        }
    }
}

/// A labelled attribute line (`Школа: Воплощение`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub label: &'static str,
    pub value: String,
}

/// One spell in list mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellBlock {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub description: String,
    pub at_higher_levels: Option<String>,
    /// Never split across a page boundary.
    pub keep_together: bool,
}

impl SpellBlock {
    pub fn from_spell(spell: &SpellRecord) -> Self {
        let mut attributes = vec![
            Attribute {
                label: "Школа",
                value: spell.school.clone(),
            },
            Attribute {
                label: "Время накладывания",
                value: spell.casting_time.clone(),
            },
            Attribute {
                label: "Дистанция",
                value: spell.range.clone(),
            },
            Attribute {
                label: "Компоненты",
                value: spell.components_text(),
            },
            Attribute {
                label: "Длительность",
                value: spell.duration_text(),
            },
        ];
        if spell.ritual {
            attributes.push(Attribute {
                label: "Ритуал",
                value: "Да".to_string(),
            });
        }

        Self {
            name: spell.name.clone(),
            attributes,
            description: spell.description.clone(),
            at_higher_levels: spell.at_higher_levels.clone(),
            keep_together: true,
        }
    }
}

/// One spell in cards mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: String,
    pub tags: Vec<&'static str>,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub description: String,
    pub components: String,
    pub duration: String,
    pub at_higher_levels: Option<String>,
    pub keep_together: bool,
}

impl Card {
    pub fn from_spell(spell: &SpellRecord) -> Self {
        Self {
            name: spell.name.clone(),
            tags: spell.tags(),
            school: spell.school.clone(),
            casting_time: spell.casting_time.clone(),
            range: spell.range.clone(),
            description: spell.description.clone(),
            components: spell.components_text(),
            duration: spell.duration.clone(),
            at_higher_levels: spell.at_higher_levels.clone(),
            keep_together: true,
        }
    }
}

/// A row of two cards; an odd final card is paired with an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRow {
    pub left: Card,
    /// `None` renders as a placeholder cell.
    pub right: Option<Card>,
    pub keep_together: bool,
}

/// Top-level document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    LevelHeading { level: u8, title: String },
    Spell(SpellBlock),
    CardRow(CardRow),
}

impl Block {
    pub fn heading(level: u8) -> Self {
        Block::LevelHeading {
            level,
            title: level_title(level),
        }
    }
}

/// A complete document ready for a rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub layout: ExportLayout,
    pub body: Vec<Block>,
}

impl Document {
    /// Number of spells in the document, placeholders excluded.
    pub fn spell_count(&self) -> usize {
        self.body
            .iter()
            .map(|block| match block {
                Block::LevelHeading { .. } => 0,
                Block::Spell(_) => 1,
                Block::CardRow(row) => 1 + usize::from(row.right.is_some()),
            })
            .sum()
    }

    /// Card rows in cards mode.
    pub fn card_rows(&self) -> impl Iterator<Item = &CardRow> {
        self.body.iter().filter_map(|block| match block {
            Block::CardRow(row) => Some(row),
            _ => None,
        })
    }

    /// Level headings in list mode, in order.
    pub fn headings(&self) -> impl Iterator<Item = u8> + '_ {
        self.body.iter().filter_map(|block| match block {
            Block::LevelHeading { level, .. } => Some(*level),
            _ => None,
        })
    }
}
