//! Patient payload.
//!
//! # Invariants
//! - `first_name` and `last_name` are present and non-blank.
//! - `email`, when present, is a syntactically valid address.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Patient demographics and contact preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Medical record number.
    pub mrn: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD` by convention.
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Free-form address object `{line1, line2, city, state, zip}`.
    pub address: Option<Map<String, Value>>,
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub consent_sms: bool,
    #[serde(default)]
    pub consent_email: bool,
}

impl Patient {
    /// Creates a patient with only the required fields set.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            mrn: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob: None,
            phone: None,
            email: None,
            address: None,
            preferred_language: None,
            consent_sms: false,
            consent_email: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        error.require_non_blank("first_name", &self.first_name);
        error.require_non_blank("last_name", &self.last_name);
        error.check_email("email", self.email.as_deref());
        error.into_result()
    }
}
