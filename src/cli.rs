//! Command-line interface for DuelSim
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Two-player 2D fighting game
#[derive(Parser, Debug)]
#[command(name = "duelsim")]
#[command(about = "Two-player 2D fighting game")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for match log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum match length in ticks (headless mode only)
    #[arg(long, value_name = "TICKS")]
    pub max_ticks: Option<u64>,

    /// Fighter and world config (RON)
    #[arg(long, value_name = "DUEL_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_graphical() {
        let args = Args::parse_from(["duelsim"]);
        assert!(args.headless.is_none());
        assert!(args.max_ticks.is_none());
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::parse_from([
            "duelsim",
            "--headless",
            "match.json",
            "--max-ticks",
            "900",
            "--output",
            "out.json",
        ]);
        assert_eq!(args.headless, Some(PathBuf::from("match.json")));
        assert_eq!(args.max_ticks, Some(900));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }
}
