//! Read-only store probes used by the connectivity report.

use super::migrations::schema_version;
use super::DbResult;
use rusqlite::Connection;

/// Snapshot of what a live connection can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub schema_version: u32,
    /// Collection (table) names, sorted, capped by the probe limit.
    pub collections: Vec<String>,
}

/// Lists user collections, excluding SQLite internal tables.
pub fn list_collections(conn: &Connection, limit: usize) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM sqlite_master
         WHERE type = 'table'
           AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        if names.len() == limit {
            break;
        }
        names.push(row.get(0)?);
    }
    Ok(names)
}

/// Runs the probes backing `GET /test`.
pub fn probe_store(conn: &Connection, collection_limit: usize) -> DbResult<StoreStatus> {
    Ok(StoreStatus {
        schema_version: schema_version(conn)?,
        collections: list_collections(conn, collection_limit)?,
    })
}
