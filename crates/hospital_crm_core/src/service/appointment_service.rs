//! Appointment use-case service.
//!
//! # Responsibility
//! - Book appointments, rejecting any that overlap the provider's existing
//!   bookings.
//! - List appointments by patient, provider and date range.
//!
//! # Invariants
//! - Booking never bypasses the repository's atomic check-and-insert.

use crate::model::appointment::{Appointment, TimeWindow};
use crate::model::record::{Document, RecordId};
use crate::model::time::Timestamp;
use crate::query::list::AppointmentListQuery;
use crate::repo::appointment_repo::AppointmentRepository;
use crate::repo::{RepoError, RepoResult};
use log::{debug, info, warn};

pub struct AppointmentService<R: AppointmentRepository> {
    repo: R,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Books one appointment.
    ///
    /// # Errors
    /// - [`RepoError::Validation`] for blank references or an empty window.
    /// - [`RepoError::Overlap`] when the provider is already booked in any
    ///   part of `[start_time, end_time)`.
    pub fn create_appointment(&mut self, appointment: &Appointment) -> RepoResult<RecordId> {
        match self.repo.insert_appointment(appointment) {
            Ok(id) => {
                info!(
                    "event=appointment_create module=service status=ok id={id} provider_id={}",
                    appointment.provider_id
                );
                Ok(id)
            }
            Err(RepoError::Overlap { provider_id }) => {
                warn!(
                    "event=appointment_create module=service status=conflict provider_id={provider_id}"
                );
                Err(RepoError::Overlap { provider_id })
            }
            Err(err) => Err(err),
        }
    }

    /// Returns whether `provider_id` has any booking intersecting
    /// `[start, end)`. An empty window never overlaps.
    pub fn exists_overlap(
        &self,
        provider_id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> RepoResult<bool> {
        self.repo
            .exists_overlap(provider_id, &TimeWindow { start, end })
    }

    pub fn list_appointments(
        &self,
        query: &AppointmentListQuery,
    ) -> RepoResult<Vec<Document<Appointment>>> {
        let limit = query.applied_limit();
        let filter = query.filter();
        let appointments = self.repo.find_appointments(&filter, limit)?;
        debug!(
            "event=appointment_list module=service status=ok terms={} limit={} count={}",
            filter.terms().len(),
            limit,
            appointments.len()
        );
        Ok(appointments)
    }
}
