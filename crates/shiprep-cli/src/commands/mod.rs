//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;
use std::process::ExitCode;

use shiprep_core::ShipConfig;
use tracing::debug;

/// Exit status when a report reads fine but holds no shipments.
pub const EXIT_NO_RECORDS: u8 = 2;

/// How a command finished, short of a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoRecords,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::NoRecords => ExitCode::from(EXIT_NO_RECORDS),
        }
    }
}

/// Load configuration from `--config`, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ShipConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(ShipConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ShipConfig::from_file(&default_path)?)
    } else {
        Ok(ShipConfig::default())
    }
}
