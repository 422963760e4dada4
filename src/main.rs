//! qsearch - Entry Point

use clap::Parser;
use qsearch::host::{self, Host, OutputFormat};
use qsearch::model::AppError;
use qsearch::{Corpus, SearchFilterEngine};
use std::io;
use std::path::PathBuf;
use tracing::info;

/// qsearch - filter Shakespeare quotations by keywords
#[derive(Parser, Debug)]
#[command(name = "qsearch")]
#[command(version)]
#[command(about = "Filter Shakespeare quotations by space-separated keywords")]
pub struct Args {
    /// Keywords; every keyword must appear in a quotation (case-insensitive)
    pub query: Vec<String>,

    /// Also submit the search and wait for the deferred match count
    #[arg(short, long)]
    pub count: bool,

    /// Read one query per line from stdin; each line is submitted
    #[arg(short, long, conflicts_with = "query")]
    pub interactive: bool,

    /// Delay before the deferred count completes, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = qsearch::config::load_config_with_precedence(args.config.clone())?;
        let merged = qsearch::config::merge_config(config_file);
        let with_env = qsearch::config::apply_env_overrides(merged)?;

        // Only override json if the flag was explicitly set
        let json_override = if args.json { Some(true) } else { None };
        qsearch::config::apply_cli_overrides(with_env, args.delay_ms, json_override)
    };

    qsearch::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let engine = SearchFilterEngine::new(Corpus::shakespeare()).with_delay(config.count_delay());
    let mut host = Host::new(engine);

    run(&args, &mut host, format, &config.placeholder)?;
    Ok(())
}

fn run(args: &Args, host: &mut Host, format: OutputFormat, prompt: &str) -> Result<(), AppError> {
    if args.interactive {
        let stdin = io::stdin();
        host::run_interactive(host, stdin.lock(), io::stdout().lock(), format, prompt)?;
        return Ok(());
    }

    let query = args.query.join(" ");
    let report = host.search(&query, args.count);
    host::write_report(&mut io::stdout().lock(), &report, format)
}
