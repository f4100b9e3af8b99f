//! v001: context_records keyed by (hypothesis_id, artifact_id).

use rusqlite::Connection;

use coherence_core::errors::CoherenceResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CoherenceResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS context_records (
            hypothesis_id  TEXT NOT NULL,
            artifact_id    TEXT NOT NULL,
            phase          TEXT NOT NULL
                CHECK (phase IN ('construir', 'medir', 'aprender', 'pivotar', 'iterar')),
            name           TEXT NOT NULL,
            content        TEXT NOT NULL,
            vector         BLOB NOT NULL,
            dimensions     INTEGER NOT NULL,
            metadata       TEXT NOT NULL DEFAULT '{}',
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            PRIMARY KEY (hypothesis_id, artifact_id)
        );

        CREATE INDEX IF NOT EXISTS idx_context_records_phase
            ON context_records(hypothesis_id, phase);
        CREATE INDEX IF NOT EXISTS idx_context_records_updated
            ON context_records(hypothesis_id, updated_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
