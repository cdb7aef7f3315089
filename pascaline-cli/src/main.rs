//! Pascaline CLI - interactive calculator with operator precedence
//!
//! This is a thin wrapper around pascaline-core: it parses arguments, sets up
//! logging and runs one calculation session against a JSON history file.

mod repl;

use std::path::PathBuf;

use clap::Parser;
use pascaline_core::Config;
use pascaline_core::config::{DEFAULT_HISTORY_FILE, DEFAULT_HISTORY_LIMIT};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pascaline",
    version,
    about = "Calculator with operator precedence and persistent history"
)]
struct Args {
    /// JSON file holding the calculation history
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,

    /// Number of records shown by the `h` command
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            history_path: args.history_file,
            history_limit: args.history_limit,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with prompts; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Args::parse());
    repl::run(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_match_config() {
        let args = Args::parse_from(["pascaline"]);
        assert_eq!(Config::from(args), Config::default());
    }

    #[test]
    fn test_history_overrides() {
        let args = Args::parse_from([
            "pascaline",
            "--history-file",
            "/tmp/calc.json",
            "--history-limit",
            "3",
        ]);
        let config = Config::from(args);
        assert_eq!(config.history_path, PathBuf::from("/tmp/calc.json"));
        assert_eq!(config.history_limit, 3);
    }
}
