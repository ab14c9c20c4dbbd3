//! Runtime configuration.
//!
//! Each setting resolves from a command-line flag, then an environment
//! variable, then the built-in default.
//!
//! | Setting | Flag | Environment | Default |
//! |---------|------|-------------|---------|
//! | data directory | `--data-dir` | `AMIS_DATA_DIR` | `data` |
//! | stock threshold | `--stock-threshold` | `AMIS_STOCK_THRESHOLD` | `10` |

use std::path::PathBuf;

use clap::Args;

use crate::inventory::DEFAULT_STOCK_THRESHOLD;
use crate::store::FlatFileStore;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Config {
    /// Directory holding the inventory files
    #[arg(long, global = true, env = "AMIS_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Stock level at or below which a drug is flagged
    #[arg(long, global = true, env = "AMIS_STOCK_THRESHOLD", default_value_t = DEFAULT_STOCK_THRESHOLD)]
    pub stock_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            stock_threshold: DEFAULT_STOCK_THRESHOLD,
        }
    }
}

impl Config {
    /// Store rooted at the configured data directory
    pub fn store(&self) -> FlatFileStore {
        FlatFileStore::new(&self.data_dir)
    }
}
