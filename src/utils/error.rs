use crate::domain::model::Step;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Cannot {operation} at step {step:?}: {reason}")]
    InvalidTransition {
        operation: &'static str,
        step: Step,
        reason: String,
    },

    #[error("Booking submission rejected: {message}")]
    SubmissionRejected { message: String },

    #[error("A booking submission is already in progress")]
    SubmissionInFlight,

    #[error("Calendar export failed: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Workflow,
    Submission,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn invalid_transition(
        operation: &'static str,
        step: Step,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            operation,
            step,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidFieldValue { .. } | Self::MissingFieldError { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidTransition { .. } | Self::ExportError { .. } => ErrorCategory::Workflow,
            Self::SubmissionRejected { .. } | Self::SubmissionInFlight => {
                ErrorCategory::Submission
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SubmissionInFlight => ErrorSeverity::Low,
            // 使用者可以重新送出
            Self::ApiError(_) | Self::SubmissionRejected { .. } => ErrorSeverity::Medium,
            Self::InvalidFieldValue { .. }
            | Self::MissingFieldError { .. }
            | Self::InvalidTransition { .. }
            | Self::ExportError { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Self::SubmissionRejected { .. } => {
                "Failed to submit booking. Please try again.".to_string()
            }
            Self::SubmissionInFlight => "Your booking is already being submitted.".to_string(),
            Self::MissingFieldError { field } => format!("Please fill in your {}.", field),
            Self::InvalidFieldValue { field, reason, .. } => {
                format!("The {} you entered is not valid: {}", field, reason)
            }
            Self::InvalidTransition { reason, .. } => {
                format!("That option is not available right now: {}", reason)
            }
            Self::ExportError { .. } => {
                "The appointment could not be added to your calendar.".to_string()
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                format!("Configuration problem: {}", self)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your internet connection and submit the booking again",
            ErrorCategory::Submission => "Wait a moment and submit the booking again",
            ErrorCategory::Configuration => {
                "Review the configuration file and fix the reported field"
            }
            ErrorCategory::Validation => "Correct the highlighted information and try again",
            ErrorCategory::Workflow => "Go back to the previous step and choose a listed option",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_messages_match_user_facing_copy() {
        let rejected = BookingError::SubmissionRejected {
            message: "success=false".to_string(),
        };
        assert_eq!(
            rejected.user_friendly_message(),
            "Failed to submit booking. Please try again."
        );
        assert_eq!(rejected.category(), ErrorCategory::Submission);
        assert_eq!(rejected.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_invalid_transition_is_workflow_error() {
        let err = BookingError::invalid_transition("select make", Step::Service, "no year");
        assert_eq!(err.category(), ErrorCategory::Workflow);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("select make"));
    }
}
