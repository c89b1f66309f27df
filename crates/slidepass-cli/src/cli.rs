//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Slidepass - locate slider puzzle gaps and plan human-like drags
#[derive(Parser, Debug)]
#[command(name = "slidepass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the column where the gapped image departs from the reference
    Locate {
        /// Complete background image (PNG)
        #[arg(long)]
        reference: PathBuf,

        /// Background with the piece cut out (PNG)
        #[arg(long)]
        gapped: PathBuf,

        /// Per-channel tolerance (overrides config)
        #[arg(short, long)]
        tolerance: Option<u8>,
    },

    /// Synthesize a trajectory for a distance
    Track {
        /// Distance to drag, in pixels
        #[arg(short, long, allow_negative_numbers = true)]
        distance: i32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Locate the gap and emit the full drag plan
    Plan {
        /// Complete background image (PNG)
        #[arg(long)]
        reference: PathBuf,

        /// Background with the piece cut out (PNG)
        #[arg(long)]
        gapped: PathBuf,

        /// Calibration bias subtracted from the gap (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        bias: Option<i32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Copy both inputs here for inspection (bare flag: the cache directory)
        #[arg(long, num_args = 0..=1, value_name = "DIR")]
        debug_dir: Option<Option<PathBuf>>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locate() {
        let cli = Cli::try_parse_from([
            "slidepass",
            "locate",
            "--reference",
            "full.png",
            "--gapped",
            "gap.png",
            "-t",
            "40",
        ])
        .unwrap();

        match cli.command {
            Commands::Locate {
                reference,
                gapped,
                tolerance,
            } => {
                assert_eq!(reference, PathBuf::from("full.png"));
                assert_eq!(gapped, PathBuf::from("gap.png"));
                assert_eq!(tolerance, Some(40));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_track_with_global_flags() {
        let cli = Cli::try_parse_from([
            "slidepass",
            "track",
            "--distance",
            "-5",
            "--seed",
            "9",
            "--verbose",
            "--config",
            "site.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert!(matches!(
            cli.command,
            Commands::Track {
                distance: -5,
                seed: Some(9)
            }
        ));
    }

    #[test]
    fn test_parse_plan_debug_dir_forms() {
        let debug_dir_of = |extra: &[&str]| {
            let mut args = vec!["slidepass", "plan", "--reference", "a.png", "--gapped", "b.png"];
            args.extend_from_slice(extra);
            match Cli::try_parse_from(args).unwrap().command {
                Commands::Plan { debug_dir, .. } => debug_dir,
                other => panic!("unexpected command: {other:?}"),
            }
        };

        assert_eq!(debug_dir_of(&[]), None);
        assert_eq!(debug_dir_of(&["--debug-dir"]), Some(None));
        assert_eq!(
            debug_dir_of(&["--debug-dir", "dump"]),
            Some(Some(PathBuf::from("dump")))
        );
    }

    #[test]
    fn test_plan_requires_images() {
        assert!(Cli::try_parse_from(["slidepass", "plan", "--reference", "a.png"]).is_err());
    }
}
