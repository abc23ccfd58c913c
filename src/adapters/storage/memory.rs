use crate::core::{CalculationStorer, ExecutedCalculation, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps executed calculations in process memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalculationStorer {
    calculations: Arc<Mutex<Vec<ExecutedCalculation>>>,
}

impl InMemoryCalculationStorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, oldest first.
    pub async fn calculations(&self) -> Vec<ExecutedCalculation> {
        self.calculations.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.calculations.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.calculations.lock().await.is_empty()
    }
}

impl CalculationStorer for InMemoryCalculationStorer {
    async fn store_calculation(&self, calculation: ExecutedCalculation) -> Result<()> {
        self.calculations.lock().await.push(calculation);
        Ok(())
    }
}
