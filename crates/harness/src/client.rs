use matchbook_core::{Match, MatchId, PlayerId, Team};
use matchbook_engine::MatchLog;
use matchbook_storage::{SqliteStore, StorageError};
use uuid::Uuid;

/// A `MatchLog` over a throwaway in-memory store, plus helpers for building
/// valid matches with fresh ids and monotonically increasing timestamps.
pub struct TestClient {
    pub log: MatchLog<SqliteStore>,
    next_timestamp_ms: i64,
}

impl TestClient {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            log: MatchLog::new(SqliteStore::open_in_memory()?),
            next_timestamp_ms: 1_700_000_000_000,
        })
    }

    pub fn fresh_match_id() -> MatchId {
        MatchId::new(Uuid::now_v7().to_string())
    }

    pub fn players(ids: &[&str]) -> Vec<PlayerId> {
        ids.iter().map(|id| PlayerId::new(*id)).collect()
    }

    /// Build a valid match with the next fixture timestamp, without ingesting it.
    pub fn build_match(
        &mut self,
        match_id: MatchId,
        team_one: &[&str],
        score_one: i64,
        team_two: &[&str],
        score_two: i64,
    ) -> Result<Match, Box<dyn std::error::Error>> {
        self.next_timestamp_ms += 1;
        Ok(Match::new(
            match_id,
            self.next_timestamp_ms,
            Team::new(Self::players(team_one), score_one),
            Team::new(Self::players(team_two), score_two),
        )?)
    }

    /// Build and ingest a match between two rosters, returning its id.
    pub fn play(
        &mut self,
        team_one: &[&str],
        score_one: i64,
        team_two: &[&str],
        score_two: i64,
    ) -> Result<MatchId, Box<dyn std::error::Error>> {
        let match_id = Self::fresh_match_id();
        let record =
            self.build_match(match_id.clone(), team_one, score_one, team_two, score_two)?;
        self.log.ingest(record)?;
        Ok(match_id)
    }
}
