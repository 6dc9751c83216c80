//! Request handlers, one module per resource.

use hospital_crm_core::RecordId;
use serde::Serialize;

pub mod appointments;
pub mod patients;
pub mod providers;
pub mod system;

/// Body returned by every create endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

impl From<RecordId> for CreatedResponse {
    fn from(value: RecordId) -> Self {
        Self {
            id: value.to_string(),
        }
    }
}
