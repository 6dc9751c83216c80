//! List query parameters per collection and the filters they build.
//!
//! # Invariants
//! - Each optional parameter contributes at most one term; absent or blank
//!   parameters contribute none.
//! - The appointment date range applies only when both bounds parse;
//!   otherwise it is dropped without error.

use crate::model::time::{parse_datetime, Timestamp};
use crate::query::filter::{Column, Comparison, Filter, Term};
use log::debug;
use serde::Deserialize;

pub const PATIENT_DEFAULT_LIMIT: u32 = 50;
pub const PROVIDER_DEFAULT_LIMIT: u32 = 100;
pub const APPOINTMENT_DEFAULT_LIMIT: u32 = 100;

const PATIENT_SEARCH_COLUMNS: &[Column] = &[
    Column::FirstName,
    Column::LastName,
    Column::Phone,
    Column::Email,
];

/// `GET /api/v1/patients` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatientListQuery {
    /// Substring searched in first/last name, phone and email.
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl PatientListQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            limit: None,
        }
    }

    pub fn filter(&self) -> Filter {
        Filter::all().and_maybe(
            non_blank(self.q.as_deref()).map(|q| Term::contains_any(PATIENT_SEARCH_COLUMNS, q)),
        )
    }

    pub fn applied_limit(&self) -> u32 {
        self.limit.unwrap_or(PATIENT_DEFAULT_LIMIT)
    }
}

/// `GET /api/v1/providers` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderListQuery {
    /// Substring searched in the provider name.
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl ProviderListQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            limit: None,
        }
    }

    pub fn filter(&self) -> Filter {
        Filter::all()
            .and_maybe(non_blank(self.q.as_deref()).map(|q| Term::contains_any(&[Column::Name], q)))
    }

    pub fn applied_limit(&self) -> u32 {
        self.limit.unwrap_or(PROVIDER_DEFAULT_LIMIT)
    }
}

/// `GET /api/v1/appointments` parameters.
///
/// `start`/`end` stay raw strings so that unparseable bounds can be dropped
/// instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppointmentListQuery {
    pub patient_id: Option<String>,
    pub provider_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<u32>,
}

impl AppointmentListQuery {
    pub fn filter(&self) -> Filter {
        let patient = non_blank(self.patient_id.as_deref())
            .map(|value| Term::equals(Column::PatientId, value));
        let provider = non_blank(self.provider_id.as_deref())
            .map(|value| Term::equals(Column::ProviderId, value));

        let filter = Filter::all().and_maybe(patient).and_maybe(provider);
        match self.date_range() {
            Some((from, to)) => filter
                .and(Term::compare(Column::StartTime, Comparison::AtOrAfter, from))
                .and(Term::compare(Column::EndTime, Comparison::AtOrBefore, to)),
            None => filter,
        }
    }

    pub fn applied_limit(&self) -> u32 {
        self.limit.unwrap_or(APPOINTMENT_DEFAULT_LIMIT)
    }

    fn date_range(&self) -> Option<(Timestamp, Timestamp)> {
        let (Some(start), Some(end)) = (
            non_blank(self.start.as_deref()),
            non_blank(self.end.as_deref()),
        ) else {
            if self.start.is_some() || self.end.is_some() {
                debug!("event=appointment_range module=query status=skipped reason=missing_bound");
            }
            return None;
        };

        match (parse_datetime(start), parse_datetime(end)) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => {
                debug!("event=appointment_range module=query status=skipped reason=unparseable_bound");
                None
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{AppointmentListQuery, PatientListQuery, ProviderListQuery};
    use crate::query::filter::{Column, Comparison, Term};
    use chrono::{TimeZone, Utc};

    #[test]
    fn blank_search_is_unconstrained() {
        assert!(PatientListQuery::search("   ").filter().is_unconstrained());
        assert!(ProviderListQuery::default().filter().is_unconstrained());
    }

    #[test]
    fn patient_search_spans_four_columns() {
        let filter = PatientListQuery::search("smi").filter();
        assert_eq!(
            filter.terms(),
            &[Term::contains_any(
                &[Column::FirstName, Column::LastName, Column::Phone, Column::Email],
                "smi"
            )]
        );
    }

    #[test]
    fn default_limits_differ_per_collection() {
        assert_eq!(PatientListQuery::default().applied_limit(), 50);
        assert_eq!(ProviderListQuery::default().applied_limit(), 100);
        assert_eq!(AppointmentListQuery::default().applied_limit(), 100);
    }

    #[test]
    fn full_date_range_adds_containment_terms() {
        let query = AppointmentListQuery {
            provider_id: Some("d-1".into()),
            start: Some("2025-03-10T08:00:00".into()),
            end: Some("2025-03-10T12:00:00".into()),
            ..AppointmentListQuery::default()
        };
        let from = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            query.filter().terms(),
            &[
                Term::equals(Column::ProviderId, "d-1"),
                Term::compare(Column::StartTime, Comparison::AtOrAfter, from),
                Term::compare(Column::EndTime, Comparison::AtOrBefore, to),
            ]
        );
    }

    #[test]
    fn half_or_broken_range_is_dropped() {
        let start_only = AppointmentListQuery {
            start: Some("2025-03-10T08:00:00".into()),
            ..AppointmentListQuery::default()
        };
        assert!(start_only.filter().is_unconstrained());

        let unparseable = AppointmentListQuery {
            start: Some("2025-03-10T08:00:00".into()),
            end: Some("noon".into()),
            ..AppointmentListQuery::default()
        };
        assert!(unparseable.filter().is_unconstrained());
    }
}
