use super::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use hospital_crm_core::{
    Document, Patient, PatientListQuery, PatientService, SqlitePatientRepository,
};

/// POST /api/v1/patients
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(patient) = payload?;
    let id = state
        .with_conn(move |conn| {
            let service = PatientService::new(SqlitePatientRepository::new(conn));
            Ok(service.create_patient(&patient)?)
        })
        .await?;
    Ok(Json(id.into()))
}

/// GET /api/v1/patients?q=&limit=
pub async fn list_patients(
    State(state): State<AppState>,
    query: Result<Query<PatientListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document<Patient>>>, ApiError> {
    let Query(query) = query?;
    let patients = state
        .with_conn(move |conn| {
            let service = PatientService::new(SqlitePatientRepository::new(conn));
            Ok(service.list_patients(&query)?)
        })
        .await?;
    Ok(Json(patients))
}

/// GET /api/v1/patients/:patient_id
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Document<Patient>>, ApiError> {
    let patient = state
        .with_conn(move |conn| {
            let service = PatientService::new(SqlitePatientRepository::new(conn));
            Ok(service.get_patient(&patient_id)?)
        })
        .await?;
    Ok(Json(patient))
}
