pub mod calculators;
pub mod factory;
pub mod supervisor;

pub use crate::domain::model::{
    CalculateProbabilityInput, CalculateProbabilityRequest, CalculationType, ExecutedCalculation,
};
pub use crate::domain::ports::{CalculationStorer, Calculator, CalculatorFactory};
pub use crate::utils::error::Result;
