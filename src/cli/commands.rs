use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use super::output::{QueryReport, format_history, format_panel};
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_DELAY_MS};
use crate::display::PanelView;
use crate::logging;
use crate::suggest::{DEFAULT_SUGGESTION_LIMIT, MatchMode, suggest_with_mode};
use crate::system::QuerySystem;
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, get_state_dir, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "scan-move")]
#[command(version)]
#[command(about = "Look up who to call to move a parked vehicle", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Record data file (defaults to the bundled data set)
    #[arg(long, global = true, env = "SCAN_MOVE_DATA", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory holding the session file and UI log
    #[arg(long, global = true, env = "SCAN_MOVE_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Address shareable links are built on
    #[arg(long, global = true, env = "SCAN_MOVE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Simulated lookup delay in the interactive UI
    #[arg(long, global = true, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Query the identifier found at start-up instead of only pre-filling it
    #[arg(long, global = true)]
    pub auto_query: bool,
}

impl GlobalArgs {
    pub fn to_config(&self) -> Result<Config> {
        let state_dir = match &self.state_dir {
            Some(dir) => dir.clone(),
            None => get_state_dir()?,
        };
        Ok(Config {
            data_file: self.data.clone(),
            state_dir,
            base_url: self.base_url.clone(),
            delay: Duration::from_millis(self.delay_ms),
            auto_query: self.auto_query,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the contacts for a vehicle ID
    Query {
        id: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List vehicle IDs matching partially typed text
    Suggest {
        text: String,
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
        /// Only IDs containing the text (not text containing the ID)
        #[arg(long)]
        strict: bool,
    },
    /// Show data set and session statistics
    Stats,
    /// Show recent queries, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Open the interactive lookup screen
    Interactive {
        /// Scanned page address to start from (reads ?id=, ?plate= or a segment past the base URL path)
        #[arg(long, value_name = "ADDRESS")]
        url: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = cli.global.to_config()?;
    match command {
        Commands::Interactive { .. } => logging::init_file(&config.log_file())?,
        _ => logging::init_stderr()?,
    }
    tracing::debug!(state_dir = %config.state_dir.display(), "configuration loaded");

    match command {
        Commands::Query { id, json } => query(&config, id, *json)?,
        Commands::Suggest { text, limit, strict } => {
            let mode = if *strict { MatchMode::Contains } else { MatchMode::Symmetric };
            show_suggestions(&config, text, *limit, mode)?;
        }
        Commands::Stats => show_stats(&config)?,
        Commands::History { limit } => show_history(&config, *limit)?,
        Commands::Interactive { url } => {
            run_interactive(&config, url.as_deref())?;
        }
    }

    Ok(())
}

fn query(config: &Config, id: &str, json: bool) -> Result<()> {
    let store = config.load_store()?;
    let session = config.open_session()?;
    let options = config.system_options(None, MatchMode::default())?;
    let mut system = QuerySystem::new(store, session, PanelView::new(), options);

    let outcome = system.query_now(id)?;

    if json {
        let report = QueryReport::new(&outcome, system.view());
        let text = serde_json::to_string_pretty(&report).context("Failed to encode result")?;
        println!("{}", text);
    } else {
        print!("{}", format_panel(system.view()));
        if !outcome.registered {
            println!();
            println!("{} is not registered; showing the default contact", outcome.identifier);
        }
    }

    Ok(())
}

fn show_suggestions(config: &Config, text: &str, limit: usize, mode: MatchMode) -> Result<()> {
    let store = config.load_store()?;
    let matches = suggest_with_mode(text, store.ids(), limit, mode);

    if matches.is_empty() {
        println!("No matching vehicle IDs");
    } else {
        println!("{}", matches.join(" | "));
    }

    Ok(())
}

fn show_stats(config: &Config) -> Result<()> {
    let store = config.load_store()?;
    let session = config.open_session()?;
    let meta = store.meta();

    println!("Scan-to-move Statistics");
    println!("=======================");
    println!("Data version: {}", sanitize_for_terminal(&meta.version));
    if !meta.updated.is_empty() {
        println!("Updated: {}", sanitize_for_terminal(&meta.updated));
    }
    println!("Vehicles: {}", meta.total);
    println!("Queries today: {}", session.count_queries_today());
    if let Some(last) = session.load_last_identifier() {
        println!("Last vehicle: {}", sanitize_for_terminal(&last));
    }
    println!();
    match &config.data_file {
        Some(path) => println!("Data file: {}", format_path_with_tilde(path)),
        None => println!("Data file: (built-in)"),
    }
    println!("State directory: {}", format_path_with_tilde(&config.state_dir));

    Ok(())
}

fn show_history(config: &Config, limit: usize) -> Result<()> {
    let session = config.open_session()?;
    print!("{}", format_history(&session.load_history(), limit));
    Ok(())
}
