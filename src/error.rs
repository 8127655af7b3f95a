//! Error types for roster optimization.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias for roster optimization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before an optimization run starts.
///
/// Once a run has started it never fails: cancellation and time limits
/// surface as a [`TerminationReason`](crate::TerminationReason) on the result.
#[derive(Debug, Error)]
pub enum Error {
    /// The problem description failed validation.
    #[error("Invalid problem: {}", summarize(.0))]
    InvalidProblem(Vec<ValidationError>),

    /// A single tuning parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::InvalidProblem(errors) => errors,
            Error::InvalidParameter(_) => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_problem_message() {
        let err = Error::InvalidProblem(vec![
            ValidationError::new(ValidationErrorKind::EmptyEmployees, "no employees"),
            ValidationError::new(ValidationErrorKind::EmptyShifts, "no shifts"),
        ]);
        assert_eq!(err.to_string(), "Invalid problem: no employees; no shifts");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_invalid_parameter_has_no_validation_errors() {
        let err = Error::InvalidParameter("cooling_rate".into());
        assert!(err.validation_errors().is_empty());
        assert_eq!(err.to_string(), "Invalid parameter: cooling_rate");
    }
}
