use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use triage_core::time::{parse_calendar_date, today_in};
use triage_core::{PriorityEngine, Strategy, StrategyWeights};
use triage_ingest::{lint_records, load_task_file, TaskFile};

mod config;
mod render;
mod state;

use config::{Config, OutputFormat};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRIAGE_GIT_DESCRIBE"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    version,
    long_version = LONG_VERSION,
    about = "Rank tasks by urgency, importance, effort and dependencies"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank every task in a JSON or CSV file
    Analyze {
        /// Task file (.json or .csv)
        file: PathBuf,

        #[command(flatten)]
        opts: ScoringOpts,

        /// Print only the top N tasks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the top tasks to work on next (uses sample tasks without a file)
    Suggest {
        /// Task file (.json or .csv)
        file: Option<PathBuf>,

        #[command(flatten)]
        opts: ScoringOpts,

        /// Number of suggestions (default: from config, 3)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Report records that would be dropped or scored with defaults
    Check {
        /// Task file (.json or .csv)
        file: PathBuf,
    },

    /// List the built-in strategies and their weights
    Strategies,

    /// Manage ~/.triage/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct ScoringOpts {
    /// smart_balance | fastest_wins | high_impact | deadline_driven
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Custom weights "urgency,importance,effort,dependencies" (overrides strategy)
    #[arg(long, value_parser = parse_weights)]
    weights: Option<StrategyWeights>,

    /// Reference date YYYY-MM-DD (default: today in the configured timezone)
    #[arg(long, value_parser = parse_calendar_date)]
    today: Option<NaiveDate>,

    /// Emit JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, opts, limit } => {
            let cfg = config::load_config()?;
            let tf = read_tasks(&file)?;
            let run = Run::resolve(&cfg, &opts, &tf)?;

            let result = run.engine.analyze(&tf.tasks, &run.strategy, run.weights.as_ref());
            if run.json {
                print_json(&result)?;
            } else {
                render::print_analysis(&result, limit);
            }
        }

        Command::Suggest { file, opts, limit } => {
            let cfg = config::load_config()?;
            let tf = match file {
                Some(p) => read_tasks(&p)?,
                None => TaskFile::default(),
            };
            let run = Run::resolve(&cfg, &opts, &tf)?;
            let limit = limit.unwrap_or(cfg.analysis.suggest_limit);

            let report = run
                .engine
                .suggest(&tf.tasks, &run.strategy, run.weights.as_ref(), limit);
            if run.json {
                print_json(&report)?;
            } else {
                render::print_suggestions(&report);
            }
        }

        Command::Check { file } => {
            let tf = read_tasks(&file)?;
            let issues = lint_records(&tf.tasks);
            if issues.is_empty() {
                println!("{}: {} tasks, no issues", file.display(), tf.tasks.len());
            } else {
                render::print_issues(&issues);
                bail!("{} issue(s) found in {}", issues.len(), file.display());
            }
        }

        Command::Strategies => render::print_strategies(),

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}\n", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=info,triage_core=info,triage_ingest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Effective settings for one scoring command: flags > task file > config.
struct Run {
    engine: PriorityEngine,
    strategy: String,
    weights: Option<StrategyWeights>,
    json: bool,
}

impl Run {
    fn resolve(cfg: &Config, opts: &ScoringOpts, tf: &TaskFile) -> Result<Self> {
        let today = match opts.today {
            Some(d) => d,
            None => today_in(&cfg.analysis.timezone)
                .with_context(|| format!("config timezone '{}'", cfg.analysis.timezone))?,
        };

        // Strategy and weights come from the first layer that names either.
        let (strategy, weights) = if opts.strategy.is_some() || opts.weights.is_some() {
            let name = opts.strategy.unwrap_or_default().name().to_string();
            (name, opts.weights)
        } else if tf.strategy.is_some() || tf.weights.is_some() {
            let name = tf
                .strategy
                .clone()
                .unwrap_or_else(|| cfg.analysis.strategy.clone());
            (name, tf.weights)
        } else {
            (cfg.analysis.strategy.clone(), cfg.analysis.weights)
        };

        debug!(%today, strategy = %strategy, custom_weights = weights.is_some(), "resolved run settings");
        Ok(Self {
            engine: PriorityEngine::new(today),
            strategy,
            weights,
            json: opts.json || cfg.output.format == OutputFormat::Json,
        })
    }
}

fn read_tasks(path: &Path) -> Result<TaskFile> {
    if !path.exists() {
        bail!("task file not found: {}", path.display());
    }
    load_task_file(path)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// "0.5,0.2,0.2,0.1" -> weights in urgency,importance,effort,dependencies order.
fn parse_weights(s: &str) -> Result<StrategyWeights> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid weight '{}'", p.trim()))
        })
        .collect::<Result<_>>()?;

    let [urgency, importance, effort, dependencies] = parts[..] else {
        bail!("expected 4 comma-separated weights, got {}", parts.len());
    };
    if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
        bail!("weights must be non-negative numbers");
    }

    Ok(StrategyWeights::new(urgency, importance, effort, dependencies))
}
