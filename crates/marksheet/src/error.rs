//! Marksheet errors

use crate::grade::ValidationIssue;
use thiserror::Error;

/// Errors that can occur while building or rendering a marksheet
#[derive(Debug, Error)]
pub enum MarksheetError {
    #[error("Expected 24 arguments, got {got}")]
    Usage { got: usize },

    #[error("Invalid value for {field}: {value:?}")]
    ArgumentParse { field: String, value: String },

    #[error("Marksheet failed validation: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Render(#[from] layout::LayoutError),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Expected {expected} subjects, got {got}")]
    SubjectCount { expected: usize, got: usize },

    #[error("Failed to parse request: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for marksheet operations
pub type Result<T> = std::result::Result<T, MarksheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MarksheetError::Usage { got: 3 }.to_string(),
            "Expected 24 arguments, got 3"
        );
        assert_eq!(
            MarksheetError::ArgumentParse {
                field: "mark1".to_string(),
                value: "ninety".to_string()
            }
            .to_string(),
            "Invalid value for mark1: \"ninety\""
        );

        let issues = vec![
            ValidationIssue::GpaOutOfRange { gpa: 11.0 },
            ValidationIssue::MarkOutOfRange {
                subject: 2,
                mark: -1,
            },
        ];
        let message = MarksheetError::Validation(issues).to_string();
        assert!(message.contains("GPA 11 is outside 0-10"));
        assert!(message.contains("; "));
    }
}
