//! Core domain logic for the hospital CRM service.
//! This crate is the single source of truth for record invariants: payload
//! validation, list filtering and the provider double-booking rule.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod schema;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, truncate_message,
    LogDestination,
};
pub use model::appointment::{Appointment, TimeWindow, APPOINTMENT_STATUSES};
pub use model::patient::Patient;
pub use model::provider::Provider;
pub use model::record::{Document, RecordId};
pub use model::time::{parse_datetime, Timestamp};
pub use model::validation::{FieldIssue, ValidationError};
pub use query::filter::{Column, Comparison, Filter, Term};
pub use query::list::{AppointmentListQuery, PatientListQuery, ProviderListQuery};
pub use repo::appointment_repo::{
    exists_overlap, AppointmentRepository, SqliteAppointmentRepository,
};
pub use repo::patient_repo::{PatientRepository, SqlitePatientRepository};
pub use repo::provider_repo::{ProviderRepository, SqliteProviderRepository};
pub use repo::{RepoError, RepoResult};
pub use schema::all_schemas;
pub use service::appointment_service::AppointmentService;
pub use service::patient_service::PatientService;
pub use service::provider_service::ProviderService;

/// Liveness message served at `/`.
pub fn liveness_message() -> &'static str {
    "Hospital CRM Backend Running"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
