//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the create/list/get use-cases.
//! - Keep the HTTP layer decoupled from storage details.
//! - Emit metadata-only log events (ids and counts, never contact data).

pub mod appointment_service;
pub mod patient_service;
pub mod provider_service;
