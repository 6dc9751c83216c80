//! Field-level validation errors shared by all entity payloads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Payload validation failure carrying every rejected field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error with exactly one issue.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut error = Self::new();
        error.push(field, message);
        error
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub(crate) fn require_non_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be blank");
        }
    }

    pub(crate) fn check_email(&mut self, field: &str, value: Option<&str>) {
        if let Some(email) = value {
            if !EMAIL_RE.is_match(email.trim()) {
                self.push(field, "is not a valid email address");
            }
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for (index, issue) in self.issues.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{} {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn empty_error_converts_to_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn display_lists_every_issue() {
        let mut error = ValidationError::new();
        error.require_non_blank("first_name", "  ");
        error.check_email("email", Some("nobody"));
        assert_eq!(
            error.to_string(),
            "validation failed: first_name must not be blank; email is not a valid email address"
        );
    }

    #[test]
    fn well_formed_email_passes() {
        let mut error = ValidationError::new();
        error.check_email("email", Some("ada@example.org"));
        error.check_email("email", None);
        assert!(error.is_empty());
    }
}
