use crate::core::{
    CalculateProbabilityInput, CalculateProbabilityRequest, CalculationStorer, CalculationType,
    CalculatorFactory, ExecutedCalculation, Result,
};
use crate::utils::validation::{is_probability, ValidationErrorsBuilder};
use chrono::Utc;
use rust_decimal::Decimal;

/// Validates requests, runs the matching calculator and records every
/// successful calculation before handing the result back.
pub struct ProbabilityCalculatorSupervisor<F: CalculatorFactory, S: CalculationStorer> {
    calculator_factory: F,
    calculation_storer: S,
}

impl<F: CalculatorFactory, S: CalculationStorer> ProbabilityCalculatorSupervisor<F, S> {
    pub fn new(calculator_factory: F, calculation_storer: S) -> Self {
        Self {
            calculator_factory,
            calculation_storer,
        }
    }

    pub fn calculation_storer(&self) -> &S {
        &self.calculation_storer
    }

    pub async fn calculate_probability(
        &self,
        request: CalculateProbabilityRequest,
    ) -> Result<Decimal> {
        tracing::debug!(
            "Calculating {} for A={}, B={}",
            request.calculation_type,
            request.probability_of_a,
            request.probability_of_b
        );

        if let Err(e) = validate_request(&request) {
            tracing::warn!("Rejected calculate probability request: {}", e);
            return Err(e);
        }

        let input = CalculateProbabilityInput::from_request(&request);
        let calculated_probability = self
            .calculator_factory
            .get_calculator(&request.calculation_type)?
            .calculate(&input)?;

        let executed_calculation =
            create_executed_calculation(input, request.calculation_type, calculated_probability);
        self.calculation_storer
            .store_calculation(executed_calculation)
            .await?;

        tracing::info!("Calculated probability {}", calculated_probability);
        Ok(calculated_probability)
    }
}

fn validate_request(request: &CalculateProbabilityRequest) -> Result<()> {
    let mut errors = ValidationErrorsBuilder::with_capacity(3);

    errors
        .add_if(!is_probability(request.probability_of_a), || {
            "Probability of A must be in the range 0-1".to_string()
        })
        .add_if(!is_probability(request.probability_of_b), || {
            "Probability of B must be in the range 0-1".to_string()
        })
        .add_if(
            request.calculation_type.parse::<CalculationType>().is_err(),
            || format!("Calculation type \"{}\" is not valid", request.calculation_type),
        );

    errors.finish()
}

fn create_executed_calculation(
    input: CalculateProbabilityInput,
    calculation_type: String,
    calculated_probability: Decimal,
) -> ExecutedCalculation {
    ExecutedCalculation {
        when: Utc::now(),
        input,
        calculation_type,
        result: calculated_probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Calculator;
    use crate::utils::error::ProbabilityError;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    struct StubCalculator {
        outcome: std::result::Result<Decimal, String>,
        calls: Arc<AtomicUsize>,
    }

    impl Calculator for StubCalculator {
        fn calculate(&self, _input: &CalculateProbabilityInput) -> Result<Decimal> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
                .clone()
                .map_err(|message| ProbabilityError::CalculationError { message })
        }
    }

    struct StubFactory {
        calculator: StubCalculator,
    }

    impl StubFactory {
        fn returning(value: Decimal) -> Self {
            Self {
                calculator: StubCalculator {
                    outcome: Ok(value),
                    calls: Arc::new(AtomicUsize::new(0)),
                },
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calculator: StubCalculator {
                    outcome: Err(message.to_string()),
                    calls: Arc::new(AtomicUsize::new(0)),
                },
            }
        }

        fn calls(&self) -> Arc<AtomicUsize> {
            self.calculator.calls.clone()
        }
    }

    impl CalculatorFactory for StubFactory {
        fn get_calculator(&self, _calculation_type: &str) -> Result<&dyn Calculator> {
            Ok(&self.calculator)
        }
    }

    #[derive(Clone, Default)]
    struct MockStorer {
        stored: Arc<Mutex<Vec<ExecutedCalculation>>>,
        fail_with: Option<String>,
    }

    impl MockStorer {
        fn failing(message: &str) -> Self {
            Self {
                stored: Arc::new(Mutex::new(Vec::new())),
                fail_with: Some(message.to_string()),
            }
        }

        async fn stored(&self) -> Vec<ExecutedCalculation> {
            self.stored.lock().await.clone()
        }
    }

    impl CalculationStorer for MockStorer {
        async fn store_calculation(&self, calculation: ExecutedCalculation) -> Result<()> {
            if let Some(message) = &self.fail_with {
                return Err(ProbabilityError::StorageError {
                    message: message.clone(),
                });
            }
            self.stored.lock().await.push(calculation);
            Ok(())
        }
    }

    fn invalid_request_messages(result: Result<Decimal>) -> Vec<String> {
        match result {
            Err(ProbabilityError::InvalidRequest(errors)) => errors.messages().to_vec(),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_successful_calculation_is_stored_once() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.25")),
            storer.clone(),
        );

        let before = Utc::now();
        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("0.5"),
                dec("0.5"),
                "CombinedWith",
            ))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(result, dec("0.25"));

        let stored = storer.stored().await;
        assert_eq!(stored.len(), 1);
        let record = &stored[0];
        assert_eq!(record.result, dec("0.25"));
        assert_eq!(record.calculation_type, "CombinedWith");
        assert_eq!(record.input, CalculateProbabilityInput::new(dec("0.5"), dec("0.5")));
        assert!(record.when >= before && record.when <= after);
    }

    #[tokio::test]
    async fn test_probability_of_a_out_of_range() {
        let storer = MockStorer::default();
        let factory = StubFactory::returning(dec("0.1"));
        let calls = factory.calls();
        let supervisor = ProbabilityCalculatorSupervisor::new(factory, storer.clone());

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("1.5"),
                dec("0.5"),
                "Either",
            ))
            .await;

        assert_eq!(
            invalid_request_messages(result),
            vec!["Probability of A must be in the range 0-1".to_string()]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(storer.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_probability_of_b_out_of_range() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.1")),
            storer.clone(),
        );

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("0.5"),
                dec("-0.01"),
                "Either",
            ))
            .await;

        assert_eq!(
            invalid_request_messages(result),
            vec!["Probability of B must be in the range 0-1".to_string()]
        );
        assert!(storer.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_calculation_type_quotes_value() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.1")),
            storer.clone(),
        );

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("0.5"),
                dec("0.5"),
                "combinedWith",
            ))
            .await;

        assert_eq!(
            invalid_request_messages(result),
            vec!["Calculation type \"combinedWith\" is not valid".to_string()]
        );
        assert!(storer.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_all_violations_are_reported_in_order() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.1")),
            storer.clone(),
        );

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("-1"),
                dec("2"),
                "Neither",
            ))
            .await;

        assert_eq!(
            invalid_request_messages(result),
            vec![
                "Probability of A must be in the range 0-1".to_string(),
                "Probability of B must be in the range 0-1".to_string(),
                "Calculation type \"Neither\" is not valid".to_string(),
            ]
        );
        assert!(storer.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_boundaries_are_accepted() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0")),
            storer.clone(),
        );

        for (a, b) in [("0", "1"), ("1", "0"), ("0", "0"), ("1", "1")] {
            let result = supervisor
                .calculate_probability(CalculateProbabilityRequest::new(dec(a), dec(b), "Either"))
                .await;
            assert!(result.is_ok(), "({}, {}) should be valid", a, b);
        }
        assert_eq!(storer.stored().await.len(), 4);
    }

    #[tokio::test]
    async fn test_calculator_error_propagates_without_storing() {
        let storer = MockStorer::default();
        let supervisor =
            ProbabilityCalculatorSupervisor::new(StubFactory::failing("overflow"), storer.clone());

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("0.5"),
                dec("0.5"),
                "Either",
            ))
            .await;

        match result {
            Err(ProbabilityError::CalculationError { message }) => assert_eq!(message, "overflow"),
            other => panic!("expected CalculationError, got {:?}", other),
        }
        assert!(storer.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_error_propagates_and_drops_result() {
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.25")),
            MockStorer::failing("disk full"),
        );

        let result = supervisor
            .calculate_probability(CalculateProbabilityRequest::new(
                dec("0.5"),
                dec("0.5"),
                "CombinedWith",
            ))
            .await;

        match result {
            Err(ProbabilityError::StorageError { message }) => assert_eq!(message, "disk full"),
            other => panic!("expected StorageError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_requests_are_each_stored() {
        let storer = MockStorer::default();
        let supervisor = ProbabilityCalculatorSupervisor::new(
            StubFactory::returning(dec("0.75")),
            storer.clone(),
        );

        for _ in 0..2 {
            supervisor
                .calculate_probability(CalculateProbabilityRequest::new(
                    dec("0.5"),
                    dec("0.5"),
                    "Either",
                ))
                .await
                .unwrap();
        }

        let stored = storer.stored().await;
        assert_eq!(stored.len(), 2);
        assert!(stored[0].when <= stored[1].when);
    }
}
