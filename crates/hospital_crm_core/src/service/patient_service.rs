//! Patient use-case service.
//!
//! # Invariants
//! - Lookups by an id that does not parse are reported as `NotFound`, the
//!   same as lookups by an unknown id.

use crate::model::patient::Patient;
use crate::model::record::{Document, RecordId};
use crate::query::list::PatientListQuery;
use crate::repo::patient_repo::PatientRepository;
use crate::repo::{RepoError, RepoResult};
use log::{debug, info};

const COLLECTION: &str = "patient";

/// Use-case service wrapper for patient records.
pub struct PatientService<R: PatientRepository> {
    repo: R,
}

impl<R: PatientRepository> PatientService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores one patient, returning its new id.
    pub fn create_patient(&self, patient: &Patient) -> RepoResult<RecordId> {
        let id = self.repo.insert_patient(patient)?;
        info!("event=patient_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Lists patients matching the optional search text, capped by limit.
    pub fn list_patients(&self, query: &PatientListQuery) -> RepoResult<Vec<Document<Patient>>> {
        let limit = query.applied_limit();
        let patients = self.repo.find_patients(&query.filter(), limit)?;
        debug!(
            "event=patient_list module=service status=ok searched={} limit={} count={}",
            query.q.is_some(),
            limit,
            patients.len()
        );
        Ok(patients)
    }

    /// Fetches one patient by its string id.
    pub fn get_patient(&self, id: &str) -> RepoResult<Document<Patient>> {
        let not_found = || RepoError::NotFound {
            collection: COLLECTION,
            id: id.to_string(),
        };
        let record_id = RecordId::parse(id).ok_or_else(not_found)?;
        self.repo.get_patient(record_id)?.ok_or_else(not_found)
    }
}
