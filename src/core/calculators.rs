use crate::core::{CalculateProbabilityInput, Calculator, Result};
use rust_decimal::Decimal;

/// P(A and B) for independent events.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedWithCalculator;

impl Calculator for CombinedWithCalculator {
    fn calculate(&self, input: &CalculateProbabilityInput) -> Result<Decimal> {
        Ok(input.probability_of_a * input.probability_of_b)
    }
}

/// P(A or B) for independent events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EitherCalculator;

impl Calculator for EitherCalculator {
    fn calculate(&self, input: &CalculateProbabilityInput) -> Result<Decimal> {
        let a = input.probability_of_a;
        let b = input.probability_of_b;
        Ok(a + b - a * b)
    }
}
