//! HTTP surface for the hospital CRM core.
//!
//! # Responsibility
//! - Translate HTTP requests into core service calls and core errors into
//!   status codes.
//! - Own process startup: logging, store bootstrap and the listener.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, StoreInfo};

use hospital_crm_core::db::{open_db, DbError};
use hospital_crm_core::{default_log_level, init_logging, init_stderr_logging};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure that stops the process before it can serve requests.
#[derive(Debug)]
pub enum StartupError {
    Logging(String),
    Store(DbError),
    Io(std::io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Store(err) => write!(f, "store bootstrap failed: {err}"),
            Self::Io(err) => write!(f, "listener failed: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for StartupError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Initializes logging from config, writing to files when a log directory
/// is configured and to stderr otherwise.
pub fn init_process_logging(config: &ServerConfig) -> Result<(), StartupError> {
    let level = config
        .log_level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    let initialized = match config.log_dir.as_deref() {
        Some(dir) => init_logging(level, dir),
        None => init_stderr_logging(level),
    };
    initialized.map_err(StartupError::Logging)
}

/// Opens the store, binds the listener and serves until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let path = config.database_path();
    let conn = open_db(&path)?;
    let state = AppState::new(
        conn,
        StoreInfo {
            database_url_set: config.database_url.is_some(),
            database_name: config.database_name.clone(),
        },
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "event=server_start module=server status=ok addr={addr} db_path={}",
        path.display()
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("event=server_stop module=server status=error error={err}");
    }
}
