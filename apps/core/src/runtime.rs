use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{self, ConfigError, SearchMode};
use crate::contract::{CoreResponse, ResultEntryDto, SearchResponse};
use crate::core_service::{CoreService, ServiceError};
use crate::model::ResultEntry;
use crate::transport::handle_json;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "placesfind",
    about = "Search Firefox bookmarks and history across every local profile"
)]
pub struct CliOptions {
    /// Which sources to search: both, bookmarks or history.
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<SearchMode>,
    /// Result cap applied to each profile.
    #[arg(long = "max", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results_per_profile: Option<u32>,
    /// Directory whose subdirectories are browser profiles.
    #[arg(long)]
    pub root: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the search response as JSON.
    #[arg(long)]
    pub json: bool,
    /// Serve JSON requests line by line on stdin/stdout.
    #[arg(long, conflicts_with = "query")]
    pub stdio: bool,
    pub query: Vec<String>,
}

impl CliOptions {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

fn parse_mode(value: &str) -> Result<SearchMode, String> {
    SearchMode::parse(value)
        .ok_or_else(|| format!("unknown mode '{value}' (expected both, bookmarks or history)"))
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, clap::Error> {
    CliOptions::try_parse_from(std::iter::once("placesfind".to_string()).chain(args.iter().cloned()))
}

pub fn resolve_config(options: &CliOptions) -> Result<config::Config, RuntimeError> {
    let mut cfg = config::load(options.config.as_deref())?;
    if let Some(mode) = options.mode {
        cfg.search_mode = mode;
    }
    if let Some(max) = options.max_results_per_profile {
        cfg.max_results_per_profile = max;
    }
    if let Some(root) = &options.root {
        cfg.profiles_root = root.clone();
    }
    config::validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    if let Err(error) = crate::logging::init() {
        eprintln!("[placesfind] logging disabled: {error}");
    }

    let cfg = resolve_config(&options)?;
    tracing::info!(
        mode = cfg.search_mode.as_str(),
        max_results_per_profile = cfg.max_results_per_profile,
        profiles_root = %cfg.profiles_root.display(),
        "startup"
    );
    let mut service = CoreService::new(cfg)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if options.stdio {
        let stdin = std::io::stdin();
        let served = serve_lines(&mut service, stdin.lock(), &mut out)?;
        tracing::info!(requests = served, "stdio session closed");
        return Ok(());
    }

    let entries = service.search(&options.query_text())?;
    if options.json {
        let response = CoreResponse::Search(SearchResponse {
            results: entries.into_iter().map(ResultEntryDto::from).collect(),
        });
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
    } else {
        out.write_all(render_entries(&entries).as_bytes())?;
    }
    Ok(())
}

/// One JSON request per input line, one transport envelope per output line.
pub fn serve_lines<R: BufRead, W: Write>(
    service: &mut CoreService,
    reader: R,
    writer: &mut W,
) -> Result<usize, std::io::Error> {
    let mut served = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(writer, "{}", handle_json(service, &line))?;
        writer.flush()?;
        served += 1;
    }
    Ok(served)
}

pub fn render_entries(entries: &[ResultEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.title());
        out.push('\n');
        out.push_str("    ");
        out.push_str(&entry.subtitle());
        out.push('\n');
    }
    out
}
