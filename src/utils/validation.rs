use crate::utils::error::{ProbabilityError, Result, ValidationErrors};
use rust_decimal::Decimal;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Collects violation messages in the order they are found instead of
/// stopping at the first one.
#[derive(Debug, Default)]
pub struct ValidationErrorsBuilder {
    messages: Vec<String>,
}

impl ValidationErrorsBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::with_capacity(capacity),
        }
    }

    pub fn add_if(&mut self, violated: bool, message: impl FnOnce() -> String) -> &mut Self {
        if violated {
            self.messages.push(message());
        }
        self
    }

    /// `Ok(())` when nothing was recorded, otherwise a single
    /// `InvalidRequest` carrying all messages.
    pub fn finish(self) -> Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ProbabilityError::InvalidRequest(ValidationErrors::new(
                self.messages,
            )))
        }
    }
}

pub fn is_probability(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProbabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProbabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ProbabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
