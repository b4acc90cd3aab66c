//! Headless mode for spell preparation.
//!
//! This module provides a simple text-based interface for driving a session
//! without a TUI. It's designed for scripting and automated testing.

use std::io::{self, BufRead, Write};

use spellprep_core::export::{save_export, HtmlBackend};
use spellprep_core::filter::MAX_SPELL_LEVEL;
use spellprep_core::text::{level_title, NO_SPELLS_FOUND, NO_STATISTICS};
use spellprep_core::{CatalogVersion, ExportLayout, PrepSession, SpellId};

use crate::app::state_label;

/// A parsed `#command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    Toggle(SpellId),
    Class(Option<String>),
    MaxLevel(u8),
    Level(Option<u8>),
    Search(String),
    Version(CatalogVersion),
    Layout(ExportLayout),
    List,
    Stats,
    Export,
    Help,
    Quit,
}

impl HeadlessCommand {
    /// Parse one input line. The leading `#` is required.
    pub fn parse(line: &str) -> Result<Self, String> {
        let body = line
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| "Commands start with '#'. Type #help for help.".to_string())?;
        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (body, ""),
        };

        match name {
            "toggle" | "t" => arg
                .parse::<u32>()
                .map(|id| HeadlessCommand::Toggle(SpellId(id)))
                .map_err(|_| "Usage: #toggle <id>".to_string()),
            "class" => Ok(HeadlessCommand::Class(match arg {
                "" | "all" => None,
                class => Some(class.to_string()),
            })),
            "max" => arg
                .parse::<u8>()
                .ok()
                .filter(|level| *level <= MAX_SPELL_LEVEL)
                .map(HeadlessCommand::MaxLevel)
                .ok_or_else(|| format!("Usage: #max <0-{MAX_SPELL_LEVEL}>")),
            "level" => match arg {
                "" | "all" => Ok(HeadlessCommand::Level(None)),
                n => n
                    .parse::<u8>()
                    .ok()
                    .filter(|level| *level <= MAX_SPELL_LEVEL)
                    .map(|level| HeadlessCommand::Level(Some(level)))
                    .ok_or_else(|| format!("Usage: #level <0-{MAX_SPELL_LEVEL}|all>")),
            },
            "search" => Ok(HeadlessCommand::Search(arg.to_string())),
            "version" => arg
                .parse::<CatalogVersion>()
                .map(HeadlessCommand::Version)
                .map_err(|e| e.to_string()),
            "layout" => arg.parse::<ExportLayout>().map(HeadlessCommand::Layout),
            "list" | "ls" => Ok(HeadlessCommand::List),
            "stats" | "status" => Ok(HeadlessCommand::Stats),
            "export" => Ok(HeadlessCommand::Export),
            "help" => Ok(HeadlessCommand::Help),
            "quit" | "exit" => Ok(HeadlessCommand::Quit),
            other => Err(format!("Unknown command: {other}. Type #help for help.")),
        }
    }
}

/// Run a session over a line-oriented protocol.
///
/// - Lines starting with `#` are commands
/// - Output lines are tagged with `[OK]`, `[ERROR]`, `[LIST]`, `[STATS]`, `[EXPORTED]`
pub async fn run_headless<R: BufRead, W: Write>(
    mut session: PrepSession,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "=== Spell Preparation Headless Mode ===")?;
    writeln!(out, "Catalog: {} ({} spells)", session.version().label(), session.catalog().len())?;
    writeln!(out, "Export directory: {}", session.export_dir().display())?;
    writeln!(out)?;
    print_help(out)?;
    writeln!(out)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match HeadlessCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "[ERROR] {message}")?;
                out.flush()?;
                continue;
            }
        };

        match command {
            HeadlessCommand::Quit => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            HeadlessCommand::Toggle(id) => match session.toggle(id) {
                Ok(state) => writeln!(
                    out,
                    "[OK] {} -> {} | {}",
                    id,
                    state_label(state),
                    session.prepared_header()
                )?,
                Err(e) => writeln!(out, "[ERROR] {e}")?,
            },
            HeadlessCommand::Class(class) => {
                session.set_class(class);
                writeln!(out, "[OK] {} visible", session.visible_spells().len())?;
            }
            HeadlessCommand::MaxLevel(level) => {
                session.set_max_level(level);
                writeln!(out, "[OK] {} visible", session.visible_spells().len())?;
            }
            HeadlessCommand::Level(level) => {
                session.set_level_filter(level);
                writeln!(out, "[OK] {} visible", session.visible_spells().len())?;
            }
            HeadlessCommand::Search(query) => {
                session.set_search(query);
                writeln!(out, "[OK] {} visible", session.visible_spells().len())?;
            }
            HeadlessCommand::Version(version) => match session.switch_version(version) {
                Ok(()) => writeln!(
                    out,
                    "[OK] Catalog {} | {}",
                    version.label(),
                    session.prepared_header()
                )?,
                Err(e) => writeln!(out, "[ERROR] {e}")?,
            },
            HeadlessCommand::Layout(layout) => {
                session.set_layout(layout);
                writeln!(out, "[OK] Layout {}", layout.label())?;
            }
            HeadlessCommand::List => print_list(&session, out)?,
            HeadlessCommand::Stats => print_stats(&session, out)?,
            HeadlessCommand::Export => match session.prepare_export() {
                Ok((document, config)) => {
                    match save_export(&HtmlBackend::new(), &document, &config, session.export_dir()).await {
                        Ok(path) => writeln!(out, "[EXPORTED] {}", path.display())?,
                        Err(e) => writeln!(out, "[ERROR] Export failed: {e}")?,
                    }
                }
                Err(e) => writeln!(out, "[ERROR] {e}")?,
            },
            HeadlessCommand::Help => {
                writeln!(out, "[HELP]")?;
                print_help(out)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  #toggle <id>           - Cycle preparation state of a spell")?;
    writeln!(out, "  #class <name|all>      - Filter by class")?;
    writeln!(out, "  #max <0-9>             - Highest spell level shown")?;
    writeln!(out, "  #level <0-9|all>       - Show one level only")?;
    writeln!(out, "  #search <text>         - Filter by name")?;
    writeln!(out, "  #version <2014|2024>   - Switch catalog (clears selection)")?;
    writeln!(out, "  #layout <list|cards>   - Export layout")?;
    writeln!(out, "  #list                  - Show visible spells")?;
    writeln!(out, "  #stats                 - Show preparation statistics")?;
    writeln!(out, "  #export                - Write the export file")?;
    writeln!(out, "  #help                  - Show this help")?;
    writeln!(out, "  #quit                  - Exit")
}

fn print_list<W: Write>(session: &PrepSession, out: &mut W) -> io::Result<()> {
    writeln!(out, "[LIST]")?;
    let groups = session.visible_groups();
    if groups.is_empty() {
        return writeln!(out, "  {NO_SPELLS_FOUND}");
    }
    for (level, spells) in groups {
        writeln!(out, "  == {} ==", level_title(level))?;
        for spell in spells {
            let tags = spell.tags();
            let suffix = if tags.is_empty() {
                String::new()
            } else {
                format!(" ({})", tags.join(", "))
            };
            writeln!(
                out,
                "  {} {:>3} {}{}",
                session.state(spell.id).marker(),
                spell.id.0,
                spell.name,
                suffix
            )?;
        }
    }
    Ok(())
}

fn print_stats<W: Write>(session: &PrepSession, out: &mut W) -> io::Result<()> {
    writeln!(out, "[STATS] {}", session.prepared_header())?;
    let stats = session.statistics();
    if stats.is_empty() {
        return writeln!(out, "  {NO_STATISTICS}");
    }
    for (level, counts) in &stats.per_level {
        if counts.is_zero() {
            continue;
        }
        writeln!(
            out,
            "  {}: {} prepared, {} always",
            level_title(*level),
            counts.prepared,
            counts.always_prepared
        )?;
    }
    writeln!(
        out,
        "  Total: {} prepared, {} always, {} overall",
        stats.total_prepared,
        stats.total_always_prepared,
        stats.grand_total()
    )
}
