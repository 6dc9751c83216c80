//! Shared handler state.
//!
//! # Invariants
//! - All store access is serialized through one connection mutex.
//! - Store work runs on the blocking pool, never on the async executor.
//! - A panic inside store work does not disable the store; the next caller
//!   takes over the connection.

use crate::error::ApiError;
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// How the store was configured, as reported by `GET /test`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreInfo {
    pub database_url_set: bool,
    pub database_name: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    conn: Mutex<Connection>,
    info: StoreInfo,
}

impl AppState {
    pub fn new(conn: Connection, info: StoreInfo) -> Self {
        Self {
            inner: Arc::new(Inner {
                conn: Mutex::new(conn),
                info,
            }),
        }
    }

    pub fn store_info(&self) -> &StoreInfo {
        &self.inner.info
    }

    /// Runs `work` against the connection on the blocking pool.
    pub async fn with_conn<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut conn = inner.conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=store_lock module=server status=recovered reason=poisoned");
                PoisonError::into_inner(poisoned)
            });
            work(&mut conn)
        })
        .await
        .map_err(|err| ApiError::internal(format!("task join error: {err}")))?
    }
}
