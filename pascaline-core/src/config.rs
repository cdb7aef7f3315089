// Runtime configuration for a calculator run

use std::path::PathBuf;

pub const DEFAULT_HISTORY_FILE: &str = "historique.json";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub history_path: PathBuf,
    pub history_limit: usize, // Records shown by the `h` command
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
