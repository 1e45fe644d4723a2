mod config;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use catalog_core::Scope;
use catalog_engine::{ReqwestCatalogClient, SearchEngine};
use catalog_logging::{catalog_info, LogDestination, DEFAULT_LOG_FILE};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

use config::AppConfig;
use terminal::{parse_command, Command, TerminalSink, HELP};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl LogTarget {
    fn destination(self) -> LogDestination {
        match self {
            LogTarget::File => LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE)),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// Search a media catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
struct Cli {
    /// RON config file. Defaults to ./catalog.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial scope: all, movies, music, apps or books.
    #[arg(long, default_value = "all")]
    scope: Scope,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    catalog_logging::initialize(cli.log.destination(), cli.log_level);

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(run(cli.scope, config))
}

async fn run(initial_scope: Scope, config: AppConfig) -> anyhow::Result<()> {
    let settings = config.engine_settings();
    let client = Arc::new(
        ReqwestCatalogClient::new(settings.fetch.clone()).context("failed to build http client")?,
    );
    let sink = Arc::new(TerminalSink::new());
    let engine = SearchEngine::spawn(&settings, client.clone(), client, sink.clone());

    let mut term = String::new();
    let mut scope = initial_scope;
    println!("{HELP}");
    println!("scope: {scope}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Search(next) => {
                term = next;
                engine.input_changed(term.clone(), scope);
            }
            Command::SetScope(next) => {
                scope = next;
                println!("scope: {scope}");
                engine.input_changed(term.clone(), scope);
            }
            Command::Artwork(slot) => match sink.item_at(slot) {
                Some(item) => engine.row_displayed(slot, &item),
                None => eprintln!("no row at [{}:{}]", slot.section, slot.row),
            },
            Command::Clear => {
                term.clear();
                engine.input_changed(String::new(), scope);
            }
            Command::Cancel => engine.teardown(),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(message) => eprintln!("{message}"),
        }
    }

    engine.shutdown().await;
    catalog_info!("catalog client exited");
    Ok(())
}
