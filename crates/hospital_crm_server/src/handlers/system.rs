//! Liveness, schema and connectivity endpoints.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use hospital_crm_core::db::probe_store;
use hospital_crm_core::{all_schemas, liveness_message, truncate_message};
use log::warn;
use serde::Serialize;
use serde_json::{json, Value};

const COLLECTION_LIMIT: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": liveness_message() }))
}

/// GET /schema
pub async fn schema() -> Json<Value> {
    Json(all_schemas())
}

/// Connectivity report. Always served with 200; failures are described in
/// the body.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /test
pub async fn connectivity(State(state): State<AppState>) -> Json<ConnectivityReport> {
    let info = state.store_info().clone();
    let mut report = ConnectivityReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Connected".to_string(),
        database_url: if info.database_url_set {
            "✅ Set".to_string()
        } else {
            "❌ Not Set".to_string()
        },
        database_name: info
            .database_name
            .unwrap_or_else(|| "❌ Not Set".to_string()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let probe = state
        .with_conn(|conn| Ok(probe_store(conn, COLLECTION_LIMIT)))
        .await;
    match probe {
        Ok(Ok(status)) => {
            report.database = "✅ Connected & Working".to_string();
            report.connection_status = "Connected".to_string();
            report.collections = status.collections;
        }
        Ok(Err(err)) => {
            warn!("event=store_probe module=server status=error error={err}");
            report.database = format!(
                "⚠️ Connected but Error: {}",
                truncate_message(&err.to_string(), MAX_ERROR_CHARS)
            );
        }
        Err(err) => {
            warn!("event=store_probe module=server status=error error={err:?}");
            report.database = format!(
                "❌ Error: {}",
                truncate_message(&format!("{err:?}"), MAX_ERROR_CHARS)
            );
        }
    }
    Json(report)
}
