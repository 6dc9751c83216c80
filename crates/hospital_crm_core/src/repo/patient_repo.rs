//! Patient repository contract and SQLite implementation.
//!
//! # Invariants
//! - `address` is persisted as JSON text and must decode to an object.
//! - List order is insertion order.

use crate::model::patient::Patient;
use crate::model::record::{Document, RecordId};
use crate::query::filter::Filter;
use crate::repo::{
    bool_to_int, int_to_bool, limit_to_sql, parse_record_id, RepoError, RepoResult,
};
use rusqlite::{params, params_from_iter, Connection, Row};
use serde_json::{Map, Value};

const PATIENT_SELECT_SQL: &str = "SELECT
    id,
    mrn,
    first_name,
    last_name,
    dob,
    phone,
    email,
    address,
    preferred_language,
    consent_sms,
    consent_email
FROM patients";

/// Repository interface for the patients collection.
pub trait PatientRepository {
    fn insert_patient(&self, patient: &Patient) -> RepoResult<RecordId>;
    fn find_patients(&self, filter: &Filter, limit: u32) -> RepoResult<Vec<Document<Patient>>>;
    fn get_patient(&self, id: RecordId) -> RepoResult<Option<Document<Patient>>>;
}

/// SQLite-backed patient repository.
pub struct SqlitePatientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePatientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PatientRepository for SqlitePatientRepository<'_> {
    fn insert_patient(&self, patient: &Patient) -> RepoResult<RecordId> {
        patient.validate()?;

        let id = RecordId::generate();
        let address = patient
            .address
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RepoError::InvalidData(format!("unencodable address: {err}")))?;

        self.conn.execute(
            "INSERT INTO patients (
                id,
                mrn,
                first_name,
                last_name,
                dob,
                phone,
                email,
                address,
                preferred_language,
                consent_sms,
                consent_email
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                id.to_string(),
                patient.mrn.as_deref(),
                patient.first_name.as_str(),
                patient.last_name.as_str(),
                patient.dob.as_deref(),
                patient.phone.as_deref(),
                patient.email.as_deref().map(str::trim),
                address,
                patient.preferred_language.as_deref(),
                bool_to_int(patient.consent_sms),
                bool_to_int(patient.consent_email),
            ],
        )?;

        Ok(id)
    }

    fn find_patients(&self, filter: &Filter, limit: u32) -> RepoResult<Vec<Document<Patient>>> {
        let predicate = filter.to_sql();
        let sql = format!(
            "{PATIENT_SELECT_SQL} {} ORDER BY rowid ASC LIMIT ?",
            predicate.where_clause
        );
        let mut bind_values = predicate.params;
        bind_values.push(limit_to_sql(limit));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut patients = Vec::new();
        while let Some(row) = rows.next()? {
            patients.push(parse_patient_row(row)?);
        }

        Ok(patients)
    }

    fn get_patient(&self, id: RecordId) -> RepoResult<Option<Document<Patient>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PATIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_patient_row(row)?));
        }

        Ok(None)
    }
}

fn parse_patient_row(row: &Row<'_>) -> RepoResult<Document<Patient>> {
    let id_text: String = row.get("id")?;
    let id = parse_record_id(&id_text, "patients.id")?;

    let address = match row.get::<_, Option<String>>("address")? {
        Some(text) => Some(parse_address(&text)?),
        None => None,
    };

    let patient = Patient {
        mrn: row.get("mrn")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        dob: row.get("dob")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address,
        preferred_language: row.get("preferred_language")?,
        consent_sms: int_to_bool(row.get("consent_sms")?, "patients.consent_sms")?,
        consent_email: int_to_bool(row.get("consent_email")?, "patients.consent_email")?,
    };

    Ok(Document::new(id, patient))
}

fn parse_address(text: &str) -> RepoResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RepoError::InvalidData(
            "patients.address is not a JSON object".to_string(),
        )),
        Err(err) => Err(RepoError::InvalidData(format!(
            "invalid JSON in patients.address: {err}"
        ))),
    }
}
