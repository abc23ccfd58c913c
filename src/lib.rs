pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::storage::{InMemoryCalculationStorer, JsonLinesCalculationStorer};
pub use crate::core::{
    factory::CalculatorRegistry, supervisor::ProbabilityCalculatorSupervisor,
    CalculateProbabilityRequest, CalculationType, ExecutedCalculation,
};
pub use crate::utils::error::{ProbabilityError, Result};
