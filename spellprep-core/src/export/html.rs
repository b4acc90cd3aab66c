//! Print-ready HTML rendering of an export document.
//!
//! Page geometry and break rules from the [`FormatConfig`] become `@page`
//! and `break-inside` rules, so a browser's print dialog produces the final
//! PDF.

use std::fmt::Write;

use super::{Block, Card, CardRow, Document, ExportError, FormatConfig, Orientation, RenderBackend, SpellBlock};

const BASE_CSS: &str = "\
body { font-family: 'Georgia', serif; font-size: 10px; line-height: 1.25; color: #333; margin: 0; }
h1 { font-size: 20px; margin: 0 0 12px; color: #1a1a2e; border-bottom: 2px solid #8b0000; padding-bottom: 4px; }
h2 { font-size: 14px; margin: 10px 0 6px; color: #2d2d44; border-bottom: 1px solid #ccc; padding-bottom: 2px; }
h3 { font-size: 11px; margin: 0 0 3px; color: #8b0000; }
.spell-block { margin-bottom: 8px; padding: 6px 8px; background: #fafafa; border-left: 2px solid #8b0000; }
ul { margin: 2px 0; padding-left: 14px; list-style: none; }
li { margin: 1px 0; font-size: 9px; }
li strong { color: #444; }
.description { margin: 4px 0; font-size: 9px; text-align: justify; }
.higher-levels { margin-top: 3px; font-size: 9px; font-style: italic; color: #555; }
.card-row { display: flex; gap: 8px; margin-bottom: 8px; }
.card { flex: 1 1 50%; padding: 6px 8px; border: 1px solid #8b0000; border-radius: 4px; background: #fafafa; }
.card-empty { border: none; background: none; }
.card-tags { float: right; font-size: 9px; color: #8b0000; }
.card-meta, .card-footer { font-size: 8px; color: #555; }
.card-footer { border-top: 1px solid #ddd; margin-top: 4px; padding-top: 2px; }
";

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Renders documents as standalone HTML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

impl HtmlBackend {
    pub fn new() -> Self {
        Self
    }

    /// Render to a string.
    pub fn render_string(&self, document: &Document, config: &FormatConfig) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"ru\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"utf-8\">")?;
        writeln!(out, "  <title>{}</title>", escape_xml(&document.title))?;
        writeln!(out, "  <style>")?;
        write_page_rules(&mut out, config)?;
        out.push_str(BASE_CSS);
        writeln!(out, "  </style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<h1>{}</h1>", escape_xml(&document.title))?;

        for block in &document.body {
            match block {
                Block::LevelHeading { title, .. } => {
                    writeln!(out, "<h2>{}</h2>", escape_xml(title))?;
                }
                Block::Spell(spell) => write_spell_block(&mut out, spell)?,
                Block::CardRow(row) => write_card_row(&mut out, row)?,
            }
        }

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

impl RenderBackend for HtmlBackend {
    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, document: &Document, config: &FormatConfig) -> Result<Vec<u8>, ExportError> {
        Ok(self.render_string(document, config)?.into_bytes())
    }
}

fn write_page_rules(out: &mut String, config: &FormatConfig) -> std::fmt::Result {
    let orientation = match config.orientation {
        Orientation::Portrait => "portrait",
        Orientation::Landscape => "landscape",
    };
    let m = &config.margins;
    writeln!(
        out,
        "@page {{ size: {} {}; margin: {}mm {}mm {}mm {}mm; }}",
        config.page_size.css_name(),
        orientation,
        m.top,
        m.right,
        m.bottom,
        m.left
    )?;
    writeln!(
        out,
        ".{0}, .card {{ page-break-inside: avoid; break-inside: avoid; }}",
        config.page_break.avoid.class_name()
    )
}

fn write_spell_block(out: &mut String, spell: &SpellBlock) -> std::fmt::Result {
    writeln!(out, "<div class=\"spell-block\">")?;
    writeln!(out, "  <h3>{}</h3>", escape_xml(&spell.name))?;
    writeln!(out, "  <ul>")?;
    for attr in &spell.attributes {
        writeln!(
            out,
            "    <li><strong>{}:</strong> {}</li>",
            attr.label,
            escape_xml(&attr.value)
        )?;
    }
    writeln!(out, "  </ul>")?;
    writeln!(out, "  <p class=\"description\">{}</p>", escape_xml(&spell.description))?;
    if let Some(ref higher) = spell.at_higher_levels {
        writeln!(
            out,
            "  <p class=\"higher-levels\"><strong>На более высоких уровнях:</strong> {}</p>",
            escape_xml(higher)
        )?;
    }
    writeln!(out, "</div>")
}

fn write_card_row(out: &mut String, row: &CardRow) -> std::fmt::Result {
    writeln!(out, "<div class=\"card-row\">")?;
    write_card(out, &row.left)?;
    match row.right {
        Some(ref card) => write_card(out, card)?,
        None => writeln!(out, "  <div class=\"card card-empty\"></div>")?,
    }
    writeln!(out, "</div>")
}

fn write_card(out: &mut String, card: &Card) -> std::fmt::Result {
    writeln!(out, "  <div class=\"card\">")?;
    if !card.tags.is_empty() {
        writeln!(out, "    <span class=\"card-tags\">{}</span>", card.tags.join(" "))?;
    }
    writeln!(out, "    <h3>{}</h3>", escape_xml(&card.name))?;
    writeln!(
        out,
        "    <div class=\"card-meta\">{} · {} · {}</div>",
        escape_xml(&card.school),
        escape_xml(&card.casting_time),
        escape_xml(&card.range)
    )?;
    writeln!(out, "    <p class=\"description\">{}</p>", escape_xml(&card.description))?;
    if let Some(ref higher) = card.at_higher_levels {
        writeln!(out, "    <p class=\"higher-levels\">{}</p>", escape_xml(higher))?;
    }
    writeln!(
        out,
        "    <div class=\"card-footer\">{} | {}</div>",
        escape_xml(&card.components),
        escape_xml(&card.duration)
    )?;
    writeln!(out, "  </div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::export::{build_document, ExportLayout};
    use crate::testing::SpellBuilder;

    fn render(catalog: &Catalog, layout: ExportLayout) -> String {
        let spells: Vec<_> = catalog.iter().collect();
        let document = build_document(&spells, layout).unwrap();
        HtmlBackend::new()
            .render_string(&document, &FormatConfig::for_layout(layout))
            .unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_list_html() {
        let catalog = Catalog::new(vec![
            SpellBuilder::new(1, "Огненный <снаряд>", 0).build(),
            SpellBuilder::new(2, "Щит", 1).ritual().build(),
        ]);
        let html = render(&catalog, ExportLayout::List);

        assert!(html.contains("@page { size: A4 portrait; margin: 8mm 10mm 8mm 10mm; }"));
        assert!(html.contains(".spell-block, .card { page-break-inside: avoid;"));
        assert!(html.contains("<h2>Заговоры</h2>"));
        assert!(html.contains("<h2>1 уровень</h2>"));
        assert!(html.contains("Огненный &lt;снаряд&gt;"));
        assert!(html.contains("<strong>Ритуал:</strong> Да"));
        assert_eq!(html.matches("class=\"spell-block\"").count(), 2);
    }

    #[test]
    fn test_cards_html_placeholder() {
        let catalog = Catalog::new(vec![
            SpellBuilder::new(1, "a", 1).concentration().build(),
            SpellBuilder::new(2, "b", 1).build(),
            SpellBuilder::new(3, "c", 2).build(),
        ]);
        let html = render(&catalog, ExportLayout::Cards);

        assert_eq!(html.matches("class=\"card-row\"").count(), 2);
        assert_eq!(html.matches("card card-empty").count(), 1);
        assert!(html.contains("<span class=\"card-tags\">К</span>"));
        assert!(html.contains(".card-row, .card { page-break-inside: avoid;"));
    }
}
