//! `cfgtree` entry-point: merge sources, evaluate, print the tree or one key.

mod error;

use std::io::{self, Write};

use cfgtree::source::CmdLineParams;
use cfgtree::{ConfigStore, StoreOptions};
use clap::Parser;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Build a configuration from files, inline JSON and options, then print it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Print only the value stored under this dotted key.
    #[arg(short = 'g', long = "get", value_name = "KEY")]
    get: Option<String>,

    /// JSON file merged before any other source.
    #[arg(long = "defaults", value_name = "PATH")]
    defaults: Option<String>,

    /// Skip resolution of `configuration.json` and legacy redirects.
    #[arg(long = "no-evaluate")]
    no_evaluate: bool,

    /// Maximum number of cascading `configuration.json` rounds.
    #[arg(long = "max-rounds", value_name = "N", default_value_t = cfgtree::DEFAULT_RESOLUTION_LIMIT)]
    max_rounds: usize,

    /// Emit compact rather than pretty-printed JSON.
    #[arg(long = "compact")]
    compact: bool,

    #[command(flatten)]
    params: CmdLineParams,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
    run(Cli::parse()).map_err(color_eyre::eyre::Report::from)
}

fn run(cli: Cli) -> Result<()> {
    let options = StoreOptions::default().with_resolution_limit(cli.max_rounds);
    let mut store = ConfigStore::with_options(options);
    if let Some(path) = cli.defaults.as_deref() {
        store.merge_json_file(path)?;
    }
    for mapping in cli.params.into_dicts() {
        store.merge_mapping(mapping);
    }
    if !cli.no_evaluate {
        store.evaluate()?;
    }
    let selected = match cli.get.as_deref() {
        Some(key) => {
            debug!(key, "selecting single key");
            store.get_required(key)?.clone()
        }
        None => store.into_value(),
    };
    print_value(&selected, cli.compact)
}

fn print_value(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
