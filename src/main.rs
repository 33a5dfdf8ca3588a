//! autoplanter - plants flowers around a walking player
//!
//! Headless driver: runs the toggle and planter against an in-memory flat
//! world, fed by a scripted input file.

mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::PlanterConfig;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

const USAGE: &str = "\
Usage: autoplanter [options]

  --config <path>        planter config (default: config/autoplanter.toml)
  --script <path>        JSON input script (default: toggle on, walk +X)
  --max-ticks <n>        stop after n ticks
  --seed <n>             seed for candidate shuffling
  --event-log <path>     write ToggleFlipped/FlowerPlanted events as JSONL
  --write-config <path>  write the effective config as TOML and exit
  --help                 show this message";

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    info!("Starting autoplanter v{}", env!("CARGO_PKG_VERSION"));

    let config = match cli.config.as_deref() {
        Some(path) => PlanterConfig::load_from_path(path),
        None => PlanterConfig::load(),
    };

    if let Some(path) = cli.write_config {
        config.save_to_path(&path)?;
        info!(path = %path.display(), "Wrote config");
        return Ok(());
    }

    headless::run(HeadlessConfig {
        config,
        scripted_input: cli.script,
        max_ticks: cli.max_ticks,
        seed: cli.seed,
        event_log: cli.event_log,
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    max_ticks: Option<u64>,
    seed: Option<u64>,
    event_log: Option<PathBuf>,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--write-config" => {
                    if let Some(path) = args.next() {
                        opts.write_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-config requires a file path");
                    }
                }
                other => tracing::warn!(arg = other, "Ignoring unknown argument"),
            }
        }

        opts
    }
}
