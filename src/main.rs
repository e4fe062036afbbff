//! mcrand - inspect `java.util.Random`-compatible sequences and roll loot tables

mod commands;
mod config;
mod loot;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use commands::SeedChoice;
use config::McrandConfig;
use mcrand_core::{DrawStep, DrawValue};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic randomness inspector for Minecraft server tooling", long_about = None)]
struct Cli {
    /// Config file (TOML); missing files fall back to defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Numeric seed, as passed to `new Random(seed)`
    #[arg(long, global = true, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Text hashed into a seed
    #[arg(long, global = true, conflicts_with = "seed")]
    seed_text: Option<String>,

    /// Use the non-reproducible entropy-backed source
    #[arg(long, global = true, conflicts_with_all = ["seed", "seed_text"])]
    ambient: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print raw draws from the generator
    Draw {
        /// Kind of draw
        #[arg(value_enum, default_value_t = DrawKind::Int)]
        kind: DrawKind,
        /// Exclusive upper bound for `bounded`
        #[arg(long)]
        bound: Option<i32>,
        /// Number of draws (defaults to the config's draw_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Buffer length for `bytes`
        #[arg(long, default_value_t = 4)]
        bytes: usize,
    },
    /// Shuffle the given items
    Shuffle {
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Pick items without replacement
    Pick {
        /// How many items to pick
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Pick one `name=weight` entry by weight
    Weighted {
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Roll a loot table, or list tables when none is named
    Loot {
        /// Table name, e.g. `chests/simple_dungeon`
        table: Option<String>,
        /// Loot table file (overrides the config)
        #[arg(long)]
        tables: Option<PathBuf>,
        /// Number of consecutive rolls
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DrawKind {
    Int,
    Bounded,
    Long,
    Float,
    Double,
    Boolean,
    Gaussian,
    Bytes,
}

impl DrawKind {
    fn step(self, bound: Option<i32>, bytes: usize) -> Result<DrawStep> {
        Ok(match self {
            Self::Int => DrawStep::Int,
            Self::Bounded => DrawStep::Bounded(bound.context("`bounded` draws need --bound")?),
            Self::Long => DrawStep::Long,
            Self::Float => DrawStep::Float,
            Self::Double => DrawStep::Double,
            Self::Boolean => DrawStep::Boolean,
            Self::Gaussian => DrawStep::Gaussian,
            Self::Bytes => DrawStep::Bytes(bytes),
        })
    }
}

#[derive(Debug, Serialize)]
struct DrawReport {
    source: String,
    step: DrawStep,
    values: Vec<DrawValue>,
}

fn main() -> Result<()> {
    // WARN by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let config = if cli.config.is_some() {
        McrandConfig::load_from_path(&config_path)
    } else {
        McrandConfig::load()
    };
    let json = cli.json || config.json;
    let choice = SeedChoice::resolve(cli.seed, cli.seed_text.as_deref(), cli.ambient, &config);
    info!(%choice, "resolved random source");

    match cli.command {
        Command::Draw {
            kind,
            bound,
            count,
            bytes,
        } => {
            let step = kind.step(bound, bytes)?;
            let mut source = choice.source();
            let values = commands::draw_many(source.as_mut(), step, count.unwrap_or(config.draw_count))?;
            let report = DrawReport {
                source: choice.to_string(),
                step,
                values,
            };
            emit(json, &report, |report| {
                report
                    .values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Shuffle { items } => {
            let shuffled = commands::shuffled(choice.source().as_mut(), items);
            emit(json, &shuffled, |items| items.join(" "))
        }
        Command::Pick { count, items } => {
            let picked = commands::pick(choice.source().as_mut(), &items, count);
            emit(json, &picked, |items| items.join(" "))
        }
        Command::Weighted { entries } => {
            let entries = commands::parse_weighted(&entries)?;
            let picked = commands::pick_weighted(choice.source().as_mut(), &entries);
            emit(json, &picked, |picked| picked.clone().unwrap_or_default())
        }
        Command::Loot {
            table,
            tables,
            times,
        } => {
            let path = tables.unwrap_or_else(|| config.loot_tables.clone());
            let Some(name) = table else {
                // Listing tolerates broken tables so the good ones still show up.
                let tables = loot::load_loot_tables_lenient(&path);
                info!(count = tables.len(), path = %path.display(), "loaded loot tables");
                let names: Vec<String> = tables.names().map(ToString::to_string).collect();
                return emit(json, &names, |names| names.join("\n"));
            };
            let tables = loot::load_loot_tables_strict(&path)?;
            let table = tables
                .get(&name)
                .with_context(|| format!("No loot table '{name}' in {}", path.display()))?;
            let report = commands::roll_loot(&choice, table, times)?;
            emit(json, &report, |report| {
                report
                    .rolls
                    .iter()
                    .map(|drops| {
                        drops
                            .iter()
                            .map(|drop| format!("{} x{}", drop.item, drop.count))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::InitConfig { force } => init_config(&config_path, force),
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    McrandConfig::default()
        .save_to_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, plain: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", plain(value));
    }
    Ok(())
}
