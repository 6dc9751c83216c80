//! Application-defined SQL functions registered on every connection.

use super::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// `fold_case(text)`: Unicode lowercase. SQLite's built-in `lower()` only
/// folds ASCII.
pub const FOLD_CASE_FN: &str = "fold_case";

pub(super) fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}
