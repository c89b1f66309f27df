//! Slidepass CLI
//!
//! Offline front end for the solver: feed it two captured puzzle images and it
//! reports the gap offset or the full drag plan as JSON.

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigAction};
use slidepass_core::AppConfig;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose {
        "debug"
    } else {
        "info,slidepass=debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config;
    let load_config = || AppConfig::load_with_env_from(config_path.as_deref());

    match cli.command {
        Commands::Locate {
            reference,
            gapped,
            tolerance,
        } => {
            let report = commands::run_locate(&reference, &gapped, tolerance, &load_config()?)?;
            print_json(&report)?;
        }
        Commands::Track { distance, seed } => {
            let report = commands::run_track(distance, seed, &load_config()?)?;
            print_json(&report)?;
        }
        Commands::Plan {
            reference,
            gapped,
            bias,
            seed,
            debug_dir,
        } => {
            let config = load_config()?;
            let debug_dir = commands::resolve_debug_dir(debug_dir)?;
            let plan = commands::run_plan(
                &reference,
                &gapped,
                bias,
                seed,
                debug_dir.as_deref(),
                &config,
            )?;
            print_json(&plan)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", commands::run_config_show(&load_config()?)?),
            // Must not read the existing file: it may be the invalid one being reset.
            ConfigAction::Init { force } => {
                let path = match config_path.clone() {
                    Some(path) => path,
                    None => AppConfig::config_path()?,
                };
                commands::run_config_init(&path, force)?;
            }
        },
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    info!("Starting slidepass v{}", env!("CARGO_PKG_VERSION"));
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse args")
    }

    #[test]
    fn test_init_force_repairs_invalid_config() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[drag]\njitter_max = -1\n").expect("write config");
        let path_arg = path.to_str().expect("utf-8 temp path");

        assert!(run(parse(&["slidepass", "--config", path_arg, "config", "show"])).is_err());

        run(parse(&["slidepass", "--config", path_arg, "config", "init", "--force"]))
            .expect("init --force overwrites an invalid file");

        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
        run(parse(&["slidepass", "--config", path_arg, "config", "show"])).unwrap();
    }

    #[test]
    fn test_init_without_force_keeps_invalid_config() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[drag]\njitter_max = -1\n").expect("write config");
        let path_arg = path.to_str().expect("utf-8 temp path");

        assert!(run(parse(&["slidepass", "--config", path_arg, "config", "init"])).is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("jitter_max = -1"));
    }
}
