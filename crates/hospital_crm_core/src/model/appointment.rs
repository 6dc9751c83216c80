//! Appointment payload and its booking window.
//!
//! # Invariants
//! - The booking window is half-open: `[start_time, end_time)`.
//! - A window with `start_time >= end_time` is rejected at validation; it
//!   never reaches the store.
//! - Window comparisons use stored (millisecond) precision.
//! - `status` is a free string. Known values are listed in
//!   [`APPOINTMENT_STATUSES`] but not enforced.
//! - `patient_id` / `provider_id` are not checked against stored records.

use crate::model::time::{serde_timestamp, to_epoch_ms, Timestamp};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_APPOINTMENT_TYPE: &str = "Consult";
pub const DEFAULT_APPOINTMENT_STATUS: &str = "scheduled";
pub const APPOINTMENT_STATUSES: &[&str] = &["scheduled", "checked_in", "completed", "cancelled"];

/// Booked visit between one patient and one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: String,
    pub provider_id: String,
    #[serde(with = "serde_timestamp")]
    pub start_time: Timestamp,
    #[serde(with = "serde_timestamp")]
    pub end_time: Timestamp,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

fn default_kind() -> Option<String> {
    Some(DEFAULT_APPOINTMENT_TYPE.to_string())
}

fn default_status() -> String {
    DEFAULT_APPOINTMENT_STATUS.to_string()
}

impl Appointment {
    /// Creates a scheduled consult for the given window.
    pub fn new(
        patient_id: impl Into<String>,
        provider_id: impl Into<String>,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            provider_id: provider_id.into(),
            start_time,
            end_time,
            kind: default_kind(),
            status: default_status(),
            reason: None,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        error.require_non_blank("patient_id", &self.patient_id);
        error.require_non_blank("provider_id", &self.provider_id);
        if self.window().is_empty() {
            error.push("end_time", "must be after start_time");
        }
        error.into_result()
    }
}

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    /// An empty window contains no instant at stored precision.
    pub fn is_empty(&self) -> bool {
        to_epoch_ms(&self.start) >= to_epoch_ms(&self.end)
    }

    /// `true` when both windows share at least one instant.
    ///
    /// Back-to-back windows (`a.end == b.start`) do not overlap, and an empty
    /// window overlaps nothing.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && to_epoch_ms(&self.start) < to_epoch_ms(&other.end)
            && to_epoch_ms(&other.start) < to_epoch_ms(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::{Appointment, TimeWindow};
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow {
            start: at(start.0, start.1),
            end: at(end.0, end.1),
        }
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let first = window((9, 0), (9, 30));
        let second = window((9, 30), (10, 0));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn nested_and_partial_windows_overlap() {
        let outer = window((9, 0), (10, 0));
        assert!(outer.overlaps(&window((9, 15), (9, 45))));
        assert!(outer.overlaps(&window((8, 30), (9, 1))));
        assert!(window((9, 15), (9, 45)).overlaps(&outer));
    }

    #[test]
    fn empty_window_overlaps_nothing() {
        let empty = window((9, 15), (9, 15));
        assert!(!empty.overlaps(&window((9, 0), (10, 0))));
        assert!(!window((9, 0), (10, 0)).overlaps(&empty));
    }

    #[test]
    fn defaults_fill_type_and_status() {
        let appointment: Appointment = serde_json::from_str(
            r#"{
                "patient_id": "p-1",
                "provider_id": "d-1",
                "start_time": "2025-03-10T09:00:00",
                "end_time": "2025-03-10T09:30:00"
            }"#,
        )
        .unwrap();
        assert_eq!(appointment.kind.as_deref(), Some("Consult"));
        assert_eq!(appointment.status, "scheduled");
        assert_eq!(appointment.start_time, at(9, 0));
    }

    #[test]
    fn unparseable_time_fails_deserialization() {
        let result = serde_json::from_str::<Appointment>(
            r#"{"patient_id":"p","provider_id":"d","start_time":"soon","end_time":"later"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let appointment = Appointment::new("p-1", "d-1", at(10, 0), at(9, 0));
        let error = appointment.validate().unwrap_err();
        assert_eq!(error.issues()[0].field, "end_time");
    }

    #[test]
    fn validate_rejects_zero_length_window() {
        let appointment = Appointment::new("p-1", "d-1", at(9, 0), at(9, 0));
        assert!(appointment.validate().is_err());
    }

    #[test]
    fn sub_millisecond_window_is_empty() {
        let appointment: Appointment = serde_json::from_str(
            r#"{
                "patient_id": "p-1",
                "provider_id": "d-1",
                "start_time": "2025-03-10T09:00:00.0001Z",
                "end_time": "2025-03-10T09:00:00.0009Z"
            }"#,
        )
        .unwrap();
        assert!(appointment.window().is_empty());
        let error = appointment.validate().unwrap_err();
        assert_eq!(error.issues()[0].field, "end_time");
    }
}
