use crate::domain::model::{CalculateProbabilityInput, ExecutedCalculation};
use crate::utils::error::Result;
use rust_decimal::Decimal;

/// One probability-combination formula.
pub trait Calculator: Send + Sync {
    fn calculate(&self, input: &CalculateProbabilityInput) -> Result<Decimal>;
}

/// Resolves a calculation type identifier to its calculator.
///
/// Fails with `ProbabilityError::UnknownCalculationType` when nothing is
/// registered for the identifier.
pub trait CalculatorFactory: Send + Sync {
    fn get_calculator(&self, calculation_type: &str) -> Result<&dyn Calculator>;
}

pub trait CalculationStorer: Send + Sync {
    fn store_calculation(
        &self,
        calculation: ExecutedCalculation,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
