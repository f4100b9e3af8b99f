//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use coherence_core::errors::CoherenceResult;

use crate::to_storage_err;

/// WAL journal, NORMAL sync, busy timeout, foreign keys.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> CoherenceResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Read connections skip the write-side settings.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> CoherenceResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> CoherenceResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
