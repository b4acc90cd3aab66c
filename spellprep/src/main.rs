//! Spell preparation TUI application.
//!
//! A vim-style terminal interface for choosing which spells a character has
//! prepared and exporting them as a printable sheet.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripting:
//!
//! ```bash
//! printf '#toggle 4\n#export\n' | cargo run -p spellprep -- --headless --catalog 2024
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use spellprep_core::export::{save_export, HtmlBackend};
use spellprep_core::{CatalogVersion, ExportLayout, PrepSession, SessionConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

const DEFAULT_LOG_FILTER: &str = "spellprep=info,spellprep_core=info";

#[derive(Parser, Debug)]
#[command(name = "spellprep")]
#[command(about = "Choose prepared spells and export them for printing")]
struct Args {
    /// Catalog version to start with (2014 or 2024)
    #[arg(long, default_value = "2024")]
    catalog: CatalogVersion,

    /// Export layout (list or cards)
    #[arg(long, default_value = "list")]
    layout: ExportLayout,

    /// Directory export files are written to
    #[arg(long, env = "SPELLPREP_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,

    /// Replace the embedded 2014 catalog with a JSON file
    #[arg(long, value_name = "FILE")]
    catalog_2014: Option<PathBuf>,

    /// Replace the embedded 2024 catalog with a JSON file
    #[arg(long, value_name = "FILE")]
    catalog_2024: Option<PathBuf>,

    /// Run in headless mode (line protocol on stdin, no TUI)
    #[arg(long)]
    headless: bool,

    /// Write logs to this file (TUI mode logs nowhere otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new()
            .with_version(self.catalog)
            .with_layout(self.layout)
            .with_export_dir(&self.export_dir);
        if let Some(ref path) = self.catalog_2014 {
            config = config.with_catalog_file(CatalogVersion::Phb2014, path);
        }
        if let Some(ref path) = self.catalog_2024 {
            config = config.with_catalog_file(CatalogVersion::Phb2024, path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let session = PrepSession::new(args.session_config()).await?;
    tracing::info!(
        version = %session.version(),
        spells = session.catalog().len(),
        "session ready"
    );

    if args.headless {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        headless::run_headless(session, stdin.lock(), &mut stdout).await?;
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Headless logs go to stderr. The TUI owns the terminal, so it only logs
/// when a file is given.
fn init_tracing(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    if let Some(ref path) = args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if args.headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Write any queued export before reading more input
        if let Some(pending) = app.pending_export.take() {
            let result = save_export(
                &HtmlBackend::new(),
                &pending.document,
                &pending.config,
                app.session.export_dir(),
            )
            .await;
            app.finish_export(result);
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
