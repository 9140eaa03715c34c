use rusqlite::Connection;

use matchbook_core::{Match, MatchId, Outcome, PlayerId, PlayerMatchRecord, Team};

use crate::error::StorageError;
use crate::traits::MatchStore;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    rmp_serde::to_vec(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StorageError> {
    rmp_serde::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Raw player_matches columns as read by query_map closures; decoded into
/// a PlayerMatchRecord outside the closure.
type RecordRow = (String, String, i64, String, Vec<u8>, Vec<u8>);

fn read_record_row(row: &rusqlite::Row) -> rusqlite::Result<RecordRow> {
    Ok((
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, i64>(2)?,
        row.get::<_, String>(3)?,
        row.get::<_, Vec<u8>>(4)?,
        row.get::<_, Vec<u8>>(5)?,
    ))
}

fn decode_record(row: RecordRow) -> Result<PlayerMatchRecord, StorageError> {
    let (player_id, match_id, timestamp_ms, outcome, teammates, opponents) = row;
    Ok(PlayerMatchRecord {
        player_id: PlayerId::new(player_id),
        match_id: MatchId::new(match_id),
        timestamp_ms,
        outcome: Outcome::parse(&outcome)?,
        teammates: decode(&teammates)?,
        opponents: decode(&opponents)?,
    })
}

fn decode_match(
    match_id: String,
    timestamp_ms: i64,
    team_one: Vec<u8>,
    team_two: Vec<u8>,
) -> Result<Match, StorageError> {
    let team_one: Team = decode(&team_one)?;
    let team_two: Team = decode(&team_two)?;
    // Stored matches passed validation at ingestion time.
    Ok(Match::new(
        MatchId::new(match_id),
        timestamp_ms,
        team_one,
        team_two,
    )?)
}

impl MatchStore for SqliteStore {
    fn append_match(
        &mut self,
        record: &Match,
        projections: &[PlayerMatchRecord],
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;

        let result = tx.execute(
            "INSERT INTO matches (match_id, timestamp_ms, team_one, team_two) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                record.match_id().as_str(),
                record.timestamp_ms(),
                encode(record.team_one())?,
                encode(record.team_two())?,
            ],
        );
        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StorageError::DuplicateMatch {
                    match_id: record.match_id().to_string(),
                });
            }
            Err(e) => return Err(StorageError::Sqlite(e)),
        }

        for projection in projections {
            let result = tx.execute(
                "INSERT INTO player_matches (player_id, match_id, timestamp_ms, outcome, teammates, opponents) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    projection.player_id.as_str(),
                    projection.match_id.as_str(),
                    projection.timestamp_ms,
                    projection.outcome.as_str(),
                    encode(&projection.teammates)?,
                    encode(&projection.opponents)?,
                ],
            );
            match result {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    return Err(StorageError::DuplicateMatch {
                        match_id: projection.match_id.to_string(),
                    });
                }
                Err(e) => return Err(StorageError::Sqlite(e)),
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn get_match(&self, match_id: &MatchId) -> Result<Option<Match>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT match_id, timestamp_ms, team_one, team_two FROM matches WHERE match_id = ?1",
        )?;
        let mut rows = stmt.query_map(rusqlite::params![match_id.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Vec<u8>>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        match rows.next() {
            Some(Ok((id, timestamp_ms, team_one, team_two))) => {
                Ok(Some(decode_match(id, timestamp_ms, team_one, team_two)?))
            }
            Some(Err(e)) => Err(StorageError::Sqlite(e)),
            None => Ok(None),
        }
    }

    fn get_matches(&self) -> Result<Vec<Match>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT match_id, timestamp_ms, team_one, team_two FROM matches ORDER BY timestamp_ms, match_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Vec<u8>>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (id, timestamp_ms, team_one, team_two) = row?;
            result.push(decode_match(id, timestamp_ms, team_one, team_two)?);
        }
        Ok(result)
    }

    fn match_count(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn records_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerMatchRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, match_id, timestamp_ms, outcome, teammates, opponents
             FROM player_matches WHERE player_id = ?1 ORDER BY timestamp_ms, match_id",
        )?;
        let rows = stmt.query_map(rusqlite::params![player_id.as_str()], read_record_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(decode_record(row?)?);
        }
        Ok(result)
    }

    fn records_for_match(
        &self,
        match_id: &MatchId,
    ) -> Result<Vec<PlayerMatchRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, match_id, timestamp_ms, outcome, teammates, opponents
             FROM player_matches WHERE match_id = ?1 ORDER BY player_id",
        )?;
        let rows = stmt.query_map(rusqlite::params![match_id.as_str()], read_record_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(decode_record(row?)?);
        }
        Ok(result)
    }

    fn record_count(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM player_matches", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchbook_core::project_match;

    fn sample_match(id: &str, timestamp_ms: i64) -> Match {
        let players = |ids: &[&str]| ids.iter().map(|p| PlayerId::new(*p)).collect();
        Match::new(
            MatchId::new(id),
            timestamp_ms,
            Team::new(players(&["a", "b"]), 25),
            Team::new(players(&["c", "d"]), 20),
        )
        .unwrap()
    }

    #[test]
    fn roundtrip_through_file_backed_store() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("matchbook.db");
        let path = path.to_str().unwrap();

        let record = sample_match("m1", 1_700_000_000_000);
        {
            let mut store = SqliteStore::open(path)?;
            store.append_match(&record, &project_match(&record))?;
        }

        // Reopen and verify both collections survived.
        let store = SqliteStore::open(path)?;
        assert_eq!(store.match_count()?, 1);
        assert_eq!(store.record_count()?, 4);
        assert_eq!(store.get_match(record.match_id())?, Some(record.clone()));

        let history = store.records_for_player(&PlayerId::new("a"))?;
        assert_eq!(history.len(), 1);
        assert_eq!(&history[0].match_id, record.match_id());

        Ok(())
    }

    #[test]
    fn duplicate_append_rolls_back_entirely() -> Result<(), Box<dyn std::error::Error>> {
        let mut store = SqliteStore::open_in_memory()?;

        let record = sample_match("m1", 1_700_000_000_000);
        store.append_match(&record, &project_match(&record))?;

        // Same id, different rosters: the matches insert collides.
        let replay = sample_match("m1", 1_700_000_001_000);
        let result = store.append_match(&replay, &project_match(&replay));
        assert!(matches!(result, Err(StorageError::DuplicateMatch { .. })));

        assert_eq!(store.match_count()?, 1);
        assert_eq!(store.record_count()?, 4);
        Ok(())
    }
}
