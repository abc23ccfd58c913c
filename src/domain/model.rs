use crate::utils::error::{ProbabilityError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateProbabilityRequest {
    pub probability_of_a: Decimal,
    pub probability_of_b: Decimal,
    pub calculation_type: String,
}

impl CalculateProbabilityRequest {
    pub fn new(
        probability_of_a: Decimal,
        probability_of_b: Decimal,
        calculation_type: impl Into<String>,
    ) -> Self {
        Self {
            probability_of_a,
            probability_of_b,
            calculation_type: calculation_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationType {
    /// Both events occur.
    CombinedWith,
    /// At least one of the events occurs.
    Either,
}

impl CalculationType {
    pub const ALL: [CalculationType; 2] = [CalculationType::CombinedWith, CalculationType::Either];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::CombinedWith => "CombinedWith",
            CalculationType::Either => "Either",
        }
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = ProbabilityError;

    // Exact, case-sensitive match on the identifier.
    fn from_str(s: &str) -> Result<Self> {
        CalculationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProbabilityError::UnknownCalculationType {
                calculation_type: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateProbabilityInput {
    pub probability_of_a: Decimal,
    pub probability_of_b: Decimal,
}

impl CalculateProbabilityInput {
    pub fn new(probability_of_a: Decimal, probability_of_b: Decimal) -> Self {
        Self {
            probability_of_a,
            probability_of_b,
        }
    }

    pub fn from_request(request: &CalculateProbabilityRequest) -> Self {
        Self::new(request.probability_of_a, request.probability_of_b)
    }
}

/// Audit record of one successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedCalculation {
    pub when: DateTime<Utc>,
    pub input: CalculateProbabilityInput,
    pub calculation_type: String,
    pub result: Decimal,
}
