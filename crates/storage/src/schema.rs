use rusqlite::Connection;

use crate::error::StorageError;

pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
    ",
    )?;
    conn.execute_batch(SCHEMA_SQL)?;
    tracing::debug!("schema initialized at version {SCHEMA_VERSION}");
    Ok(())
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);
INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, unixepoch());

CREATE TABLE IF NOT EXISTS matches (
    match_id TEXT PRIMARY KEY,
    timestamp_ms INTEGER NOT NULL,
    team_one BLOB NOT NULL,
    team_two BLOB NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_matches_timestamp ON matches (timestamp_ms);

CREATE TABLE IF NOT EXISTS player_matches (
    player_id TEXT NOT NULL,
    match_id TEXT NOT NULL,
    timestamp_ms INTEGER NOT NULL,
    outcome TEXT NOT NULL,
    teammates BLOB NOT NULL,
    opponents BLOB NOT NULL,
    PRIMARY KEY (player_id, match_id)
);
CREATE INDEX IF NOT EXISTS idx_player_matches_history ON player_matches (player_id, timestamp_ms);
CREATE INDEX IF NOT EXISTS idx_player_matches_match ON player_matches (match_id);
";
