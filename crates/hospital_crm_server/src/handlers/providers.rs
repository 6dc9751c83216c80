use super::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use hospital_crm_core::{
    Document, Provider, ProviderListQuery, ProviderService, SqliteProviderRepository,
};

/// POST /api/v1/providers
pub async fn create_provider(
    State(state): State<AppState>,
    payload: Result<Json<Provider>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(provider) = payload?;
    let id = state
        .with_conn(move |conn| {
            let service = ProviderService::new(SqliteProviderRepository::new(conn));
            Ok(service.create_provider(&provider)?)
        })
        .await?;
    Ok(Json(id.into()))
}

/// GET /api/v1/providers?q=&limit=
pub async fn list_providers(
    State(state): State<AppState>,
    query: Result<Query<ProviderListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document<Provider>>>, ApiError> {
    let Query(query) = query?;
    let providers = state
        .with_conn(move |conn| {
            let service = ProviderService::new(SqliteProviderRepository::new(conn));
            Ok(service.list_providers(&query)?)
        })
        .await?;
    Ok(Json(providers))
}
