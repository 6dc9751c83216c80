//! Router assembly.

use crate::handlers::{appointments, patients, providers, system};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub const API_PREFIX: &str = "/api/v1";

/// Builds the full router.
///
/// Endpoints:
/// - GET  /                              - Liveness message
/// - GET  /schema                        - JSON schemas of the record types
/// - GET  /test                          - Store connectivity report
/// - POST /api/v1/patients               - Create a patient
/// - GET  /api/v1/patients?q=&limit=     - Search patients
/// - GET  /api/v1/patients/:patient_id   - Fetch one patient
/// - POST /api/v1/providers              - Create a provider
/// - GET  /api/v1/providers?q=&limit=    - Search providers
/// - POST /api/v1/appointments           - Book an appointment
/// - GET  /api/v1/appointments?...       - List appointments
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/patients/:patient_id", get(patients::get_patient))
        .route(
            "/providers",
            get(providers::list_providers).post(providers::create_provider),
        )
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(system::root))
        .route("/schema", get(system::schema))
        .route("/test", get(system::connectivity))
        .nest(API_PREFIX, api_routes)
        .with_state(state)
        .layer(cors)
}
