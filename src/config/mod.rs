#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

pub const DEFAULT_LOG_PATH: &str = "./calculations.jsonl";
pub const DEFAULT_LOG_LEVEL: &str = "info";
