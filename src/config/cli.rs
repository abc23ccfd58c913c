use crate::config::{TomlConfig, DEFAULT_LOG_PATH};
use crate::core::CalculateProbabilityRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "probability-calc")]
#[command(about = "Combine two probabilities and keep a log of every calculation")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Calculation log file, overrides the configuration file
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate a probability and record it
    Calculate {
        #[arg(long, short = 'a', allow_hyphen_values = true)]
        probability_of_a: Decimal,

        #[arg(long, short = 'b', allow_hyphen_values = true)]
        probability_of_b: Decimal,

        /// CombinedWith or Either
        #[arg(long, short = 't')]
        calculation_type: String,
    },
    /// List every recorded calculation
    History,
}

impl CliConfig {
    /// Log path precedence: `--log-file`, then `storage.path` from the
    /// configuration file, then the default.
    pub fn resolve_log_path(&self, file_config: Option<&TomlConfig>) -> String {
        self.log_file
            .clone()
            .or_else(|| file_config.map(|c| c.storage_path().to_string()))
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
    }
}

impl Command {
    pub fn to_request(&self) -> Option<CalculateProbabilityRequest> {
        match self {
            Command::Calculate {
                probability_of_a,
                probability_of_b,
                calculation_type,
            } => Some(CalculateProbabilityRequest::new(
                *probability_of_a,
                *probability_of_b,
                calculation_type.clone(),
            )),
            Command::History => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(log_file) = &self.log_file {
            validate_path("log_file", log_file)?;
        }
        Ok(())
    }
}
