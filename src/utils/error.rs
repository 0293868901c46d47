use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgeAlignError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Mortality score {mortality_score} is outside the domain of the biological age transform")]
    DomainComputation { mortality_score: f64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Computation,
    Configuration,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgeAlignError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::DomainComputation { .. } => ErrorCategory::Computation,
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Serialization,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Input and computation failures are resubmittable, so they rank below
    /// configuration and system failures.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Computation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { reason, .. } => reason.clone(),
            Self::DomainComputation { .. } => {
                "Unable to calculate. Check inputs.".to_string()
            }
            Self::IoError(e) => format!("File system operation failed: {}", e),
            Self::CsvError(e) => format!("Could not write history as CSV: {}", e),
            Self::SerializationError(e) => format!("Could not write history as JSON: {}", e),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Re-enter the lab values as plain numbers; CRP must be above 0",
            ErrorCategory::Computation => {
                "The values produce an implausible mortality score; double-check units and resubmit"
            }
            ErrorCategory::Configuration => "Fix the session file and run again",
            ErrorCategory::Io => "Check that the export directory exists and is writable",
            ErrorCategory::Serialization => "Check the export format settings",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgeAlignError>;
