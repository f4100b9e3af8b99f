//! Upsert, get, delete, list, count for context records.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use coherence_core::errors::CoherenceResult;
use coherence_core::models::{ContextRecord, Phase, RecordMetadata};

use super::vector_codec::{bytes_to_f32_vec, f32_vec_to_bytes};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT hypothesis_id, artifact_id, phase, name, content, vector,
                                     metadata, created_at, updated_at
                              FROM context_records";

/// Fixed-width RFC 3339 so `ORDER BY updated_at` sorts chronologically.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(s: &str) -> CoherenceResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {s:?}: {e}")))
}

/// Insert or replace by `(hypothesis_id, artifact_id)`. `created_at` of an
/// existing row is kept.
pub fn upsert_record(conn: &Connection, record: &ContextRecord) -> CoherenceResult<()> {
    let metadata = serde_json::to_string(&record.metadata)?;
    conn.execute(
        "INSERT INTO context_records (
            hypothesis_id, artifact_id, phase, name, content, vector, dimensions,
            metadata, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(hypothesis_id, artifact_id) DO UPDATE SET
            phase = excluded.phase,
            name = excluded.name,
            content = excluded.content,
            vector = excluded.vector,
            dimensions = excluded.dimensions,
            metadata = excluded.metadata,
            updated_at = excluded.updated_at",
        params![
            record.hypothesis_id,
            record.artifact_id,
            record.phase.as_str(),
            record.name,
            record.content,
            f32_vec_to_bytes(&record.vector),
            record.vector.len() as i64,
            metadata,
            format_ts(&record.created_at),
            format_ts(&record.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert_record: {e}")))?;
    Ok(())
}

pub fn get_record(
    conn: &Connection,
    hypothesis_id: &str,
    artifact_id: &str,
) -> CoherenceResult<Option<ContextRecord>> {
    let sql = format!("{SELECT_COLUMNS} WHERE hypothesis_id = ?1 AND artifact_id = ?2");
    let raw = conn
        .query_row(&sql, params![hypothesis_id, artifact_id], RawRecord::from_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawRecord::into_record).transpose()
}

pub fn delete_record(conn: &Connection, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<bool> {
    let n = conn
        .execute(
            "DELETE FROM context_records WHERE hypothesis_id = ?1 AND artifact_id = ?2",
            params![hypothesis_id, artifact_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n > 0)
}

/// All records of a hypothesis, optionally restricted to one phase, in
/// listing order.
pub fn list_records(
    conn: &Connection,
    hypothesis_id: &str,
    phase: Option<Phase>,
) -> CoherenceResult<Vec<ContextRecord>> {
    let sql = format!(
        "{SELECT_COLUMNS}
         WHERE hypothesis_id = ?1 AND (?2 IS NULL OR phase = ?2)
         ORDER BY updated_at DESC, artifact_id ASC"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![hypothesis_id, phase.map(Phase::as_str)], RawRecord::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        records.push(raw.into_record()?);
    }
    Ok(records)
}

pub fn count_records(conn: &Connection, hypothesis_id: &str) -> CoherenceResult<usize> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM context_records WHERE hypothesis_id = ?1",
            params![hypothesis_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}

/// Column values as read; decoded outside the rusqlite row callback.
struct RawRecord {
    hypothesis_id: String,
    artifact_id: String,
    phase: String,
    name: String,
    content: String,
    vector: Vec<u8>,
    metadata: String,
    created_at: String,
    updated_at: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            hypothesis_id: row.get(0)?,
            artifact_id: row.get(1)?,
            phase: row.get(2)?,
            name: row.get(3)?,
            content: row.get(4)?,
            vector: row.get(5)?,
            metadata: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_record(self) -> CoherenceResult<ContextRecord> {
        let metadata: RecordMetadata = serde_json::from_str(&self.metadata)?;
        Ok(ContextRecord {
            phase: self.phase.parse()?,
            vector: bytes_to_f32_vec(&self.vector),
            metadata,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
            hypothesis_id: self.hypothesis_id,
            artifact_id: self.artifact_id,
            name: self.name,
            content: self.content,
        })
    }
}
