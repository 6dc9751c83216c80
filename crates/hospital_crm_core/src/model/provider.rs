//! Provider payload.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// A clinician or service that appointments are booked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub specialty: Option<String>,
    pub location: Option<String>,
    /// National provider identifier.
    pub npi: Option<String>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: None,
            location: None,
            npi: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        error.require_non_blank("name", &self.name);
        error.into_result()
    }
}
