//! Appointment repository contract, SQLite implementation and overlap check.
//!
//! # Responsibility
//! - Persist appointments and list them by filter.
//! - Answer whether a provider already has a booking intersecting a window.
//!
//! # Invariants
//! - Windows are half-open; touching windows never conflict.
//! - `insert_appointment` runs the overlap check and the insert inside one
//!   `BEGIN IMMEDIATE` transaction, so the write lock is held before the
//!   check and two overlapping inserts cannot both commit.
//! - An empty candidate window overlaps nothing.

use crate::model::appointment::{Appointment, TimeWindow};
use crate::model::record::{Document, RecordId};
use crate::model::time::{from_epoch_ms, to_epoch_ms, Timestamp};
use crate::query::filter::{Column, Comparison, Filter, Term};
use crate::repo::{limit_to_sql, parse_record_id, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const APPOINTMENT_SELECT_SQL: &str = "SELECT
    id,
    patient_id,
    provider_id,
    start_time,
    end_time,
    type,
    status,
    reason
FROM appointments";

/// Repository interface for the appointments collection.
pub trait AppointmentRepository {
    /// Read-only overlap probe; see [`exists_overlap`].
    fn exists_overlap(&self, provider_id: &str, window: &TimeWindow) -> RepoResult<bool>;
    /// Inserts the appointment unless it overlaps an existing one for the
    /// same provider, in which case [`RepoError::Overlap`] is returned.
    fn insert_appointment(&mut self, appointment: &Appointment) -> RepoResult<RecordId>;
    fn find_appointments(
        &self,
        filter: &Filter,
        limit: u32,
    ) -> RepoResult<Vec<Document<Appointment>>>;
}

/// SQLite-backed appointment repository.
pub struct SqliteAppointmentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAppointmentRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl AppointmentRepository for SqliteAppointmentRepository<'_> {
    fn exists_overlap(&self, provider_id: &str, window: &TimeWindow) -> RepoResult<bool> {
        exists_overlap(&*self.conn, provider_id, window)
    }

    fn insert_appointment(&mut self, appointment: &Appointment) -> RepoResult<RecordId> {
        appointment.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if exists_overlap(&tx, &appointment.provider_id, &appointment.window())? {
            return Err(RepoError::Overlap {
                provider_id: appointment.provider_id.clone(),
            });
        }

        let id = RecordId::generate();
        tx.execute(
            "INSERT INTO appointments (
                id,
                patient_id,
                provider_id,
                start_time,
                end_time,
                type,
                status,
                reason
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                id.to_string(),
                appointment.patient_id.as_str(),
                appointment.provider_id.as_str(),
                to_epoch_ms(&appointment.start_time),
                to_epoch_ms(&appointment.end_time),
                appointment.kind.as_deref(),
                appointment.status.as_str(),
                appointment.reason.as_deref(),
            ],
        )?;
        tx.commit()?;

        Ok(id)
    }

    fn find_appointments(
        &self,
        filter: &Filter,
        limit: u32,
    ) -> RepoResult<Vec<Document<Appointment>>> {
        let predicate = filter.to_sql();
        let sql = format!(
            "{APPOINTMENT_SELECT_SQL} {} ORDER BY rowid ASC LIMIT ?",
            predicate.where_clause
        );
        let mut bind_values = predicate.params;
        bind_values.push(limit_to_sql(limit));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut appointments = Vec::new();
        while let Some(row) = rows.next()? {
            appointments.push(parse_appointment_row(row)?);
        }

        Ok(appointments)
    }
}

/// Filter matching stored appointments of `provider_id` that intersect
/// `window`: `start_time < window.end AND end_time > window.start`.
pub fn overlap_filter(provider_id: &str, window: &TimeWindow) -> Filter {
    Filter::all()
        .and(Term::equals(Column::ProviderId, provider_id))
        .and(Term::compare(Column::StartTime, Comparison::Before, window.end))
        .and(Term::compare(Column::EndTime, Comparison::After, window.start))
}

/// Returns whether any stored appointment for `provider_id` intersects
/// `window`.
///
/// Read-only. Store failures propagate unchanged; there is no retry.
pub fn exists_overlap(
    conn: &Connection,
    provider_id: &str,
    window: &TimeWindow,
) -> RepoResult<bool> {
    if window.is_empty() {
        return Ok(false);
    }

    let predicate = overlap_filter(provider_id, window).to_sql();
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM appointments {});",
        predicate.where_clause
    );
    let exists: i64 = conn.query_row(&sql, params_from_iter(predicate.params), |row| {
        row.get(0)
    })?;
    Ok(exists == 1)
}

fn parse_appointment_row(row: &Row<'_>) -> RepoResult<Document<Appointment>> {
    let id_text: String = row.get("id")?;
    let id = parse_record_id(&id_text, "appointments.id")?;

    let appointment = Appointment {
        patient_id: row.get("patient_id")?,
        provider_id: row.get("provider_id")?,
        start_time: parse_timestamp(row.get("start_time")?, "appointments.start_time")?,
        end_time: parse_timestamp(row.get("end_time")?, "appointments.end_time")?,
        kind: row.get("type")?,
        status: row.get("status")?,
        reason: row.get("reason")?,
    };

    Ok(Document::new(id, appointment))
}

fn parse_timestamp(value: i64, column: &str) -> RepoResult<Timestamp> {
    from_epoch_ms(value).ok_or_else(|| {
        RepoError::InvalidData(format!("out-of-range timestamp `{value}` in {column}"))
    })
}
