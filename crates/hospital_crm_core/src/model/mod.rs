//! Domain model for the three record collections.
//!
//! # Responsibility
//! - Define the payload shapes accepted on create and returned on read.
//! - Own payload validation rules.
//!
//! # Invariants
//! - Every stored record is identified by a store-generated `RecordId`.
//! - Records are independent; no record owns another.

pub mod appointment;
pub mod patient;
pub mod provider;
pub mod record;
pub mod time;
pub mod validation;
