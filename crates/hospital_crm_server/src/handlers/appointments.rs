//! Appointment endpoints.
//!
//! Booking conflicts surface as `409 Conflict`; the check and the insert
//! are one store transaction, so two racing requests cannot both win.

use super::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use hospital_crm_core::{
    Appointment, AppointmentListQuery, AppointmentService, Document, SqliteAppointmentRepository,
};

/// POST /api/v1/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(appointment) = payload?;
    let id = state
        .with_conn(move |conn| {
            let mut service = AppointmentService::new(SqliteAppointmentRepository::new(conn));
            Ok(service.create_appointment(&appointment)?)
        })
        .await?;
    Ok(Json(id.into()))
}

/// GET /api/v1/appointments?patient_id=&provider_id=&start=&end=&limit=
pub async fn list_appointments(
    State(state): State<AppState>,
    query: Result<Query<AppointmentListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document<Appointment>>>, ApiError> {
    let Query(query) = query?;
    let appointments = state
        .with_conn(move |conn| {
            let service = AppointmentService::new(SqliteAppointmentRepository::new(conn));
            Ok(service.list_appointments(&query)?)
        })
        .await?;
    Ok(Json(appointments))
}
