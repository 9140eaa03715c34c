pub mod error;
pub mod head_to_head;

pub use error::EngineError;
pub use head_to_head::Tally;

use std::collections::BTreeMap;

use matchbook_core::{Match, PlayerId, PlayerMatchRecord, project_match};
use matchbook_storage::MatchStore;

/// Write and query front for the match history store.
///
/// Owns the injected store handle; all writes go through `ingest`, which
/// persists the raw match and its per-player projections as one unit.
pub struct MatchLog<S: MatchStore> {
    store: S,
}

impl<S: MatchStore> MatchLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Record a completed match.
    ///
    /// The raw match and one derived record per participant are committed
    /// in a single transaction; on any failure nothing becomes visible.
    /// A match id already present fails with `DuplicateMatch` and leaves
    /// stored rows untouched.
    pub fn ingest(&mut self, record: Match) -> Result<(), EngineError> {
        let projections = project_match(&record);
        tracing::debug!(
            "ingesting match {} with {} participants",
            record.match_id(),
            projections.len()
        );
        self.store.append_match(&record, &projections)?;
        Ok(())
    }

    /// One player's full participation history, oldest first.
    pub fn matches_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerMatchRecord>, EngineError> {
        Ok(self.store.records_for_player(player_id)?)
    }

    /// Tally `self_id`'s history with and against every lobby candidate.
    ///
    /// Reads the player's history once, regardless of lobby size. Candidates
    /// never encountered come back with an all-zero tally; `self_id` itself
    /// is skipped. Fails as a whole if the underlying read fails.
    pub fn head_to_head(
        &self,
        self_id: &PlayerId,
        lobby: &[PlayerId],
    ) -> Result<BTreeMap<PlayerId, Tally>, EngineError> {
        let records = self.store.records_for_player(self_id)?;
        tracing::debug!(
            "head-to-head for {} over {} matches and {} candidates",
            self_id,
            records.len(),
            lobby.len()
        );
        Ok(head_to_head::tally_records(self_id, lobby, &records))
    }
}
