use std::fmt;
use thiserror::Error;

/// Ordered list of every rule a request broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum ProbabilityError {
    #[error("Invalid calculate probability request: {0}")]
    InvalidRequest(ValidationErrors),

    #[error("Unknown calculation type \"{calculation_type}\"")]
    UnknownCalculationType { calculation_type: String },

    #[error("Calculation failed: {message}")]
    CalculationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Calculation,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProbabilityError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbabilityError::InvalidRequest(_) => ErrorCategory::Validation,
            ProbabilityError::UnknownCalculationType { .. }
            | ProbabilityError::CalculationError { .. } => ErrorCategory::Calculation,
            ProbabilityError::StorageError { .. }
            | ProbabilityError::IoError(_)
            | ProbabilityError::SerializationError(_) => ErrorCategory::Storage,
            ProbabilityError::ConfigError { .. }
            | ProbabilityError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Calculation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// The caller can fix the input and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Configuration
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProbabilityError::InvalidRequest(_) => {
                "Use probabilities between 0 and 1 and a calculation type of CombinedWith or Either"
                    .to_string()
            }
            ProbabilityError::UnknownCalculationType { .. } => {
                "Register a calculator for this calculation type".to_string()
            }
            ProbabilityError::CalculationError { .. } => {
                "Check the calculator implementation for this calculation type".to_string()
            }
            ProbabilityError::StorageError { .. } | ProbabilityError::IoError(_) => {
                "Check that the calculation log path exists and is writable".to_string()
            }
            ProbabilityError::SerializationError(_) => {
                "The calculation log contains a corrupt entry; inspect or move the file".to_string()
            }
            ProbabilityError::ConfigError { .. }
            | ProbabilityError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProbabilityError::InvalidRequest(errors) => {
                let mut message = String::from("The request is not valid:");
                for error in errors.messages() {
                    message.push_str("\n  - ");
                    message.push_str(error);
                }
                message
            }
            ProbabilityError::UnknownCalculationType { calculation_type } => {
                format!("Unknown calculation type \"{}\"", calculation_type)
            }
            ProbabilityError::CalculationError { message } => {
                format!("The calculation could not be completed: {}", message)
            }
            ProbabilityError::StorageError { .. }
            | ProbabilityError::IoError(_)
            | ProbabilityError::SerializationError(_) => {
                format!("The calculation could not be recorded: {}", self)
            }
            ProbabilityError::ConfigError { .. }
            | ProbabilityError::InvalidConfigValueError { .. } => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbabilityError>;
