use crate::core::calculators::{CombinedWithCalculator, EitherCalculator};
use crate::core::{CalculationType, Calculator, CalculatorFactory, Result};
use crate::utils::error::ProbabilityError;
use std::collections::HashMap;

/// Lookup table from calculation type to calculator.
pub struct CalculatorRegistry {
    calculators: HashMap<CalculationType, Box<dyn Calculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self {
            calculators: HashMap::new(),
        }
    }

    /// Registry with a calculator for every built-in calculation type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(CalculationType::CombinedWith, CombinedWithCalculator)
            .register(CalculationType::Either, EitherCalculator);
        registry
    }

    /// Adds or replaces the calculator for `calculation_type`.
    pub fn register<C>(&mut self, calculation_type: CalculationType, calculator: C) -> &mut Self
    where
        C: Calculator + 'static,
    {
        self.calculators.insert(calculation_type, Box::new(calculator));
        self
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CalculatorFactory for CalculatorRegistry {
    fn get_calculator(&self, calculation_type: &str) -> Result<&dyn Calculator> {
        let key: CalculationType = calculation_type.parse()?;
        self.calculators
            .get(&key)
            .map(|calculator| calculator.as_ref())
            .ok_or_else(|| ProbabilityError::UnknownCalculationType {
                calculation_type: calculation_type.to_string(),
            })
    }
}
