use matchbook_core::{Match, MatchId, PlayerId, PlayerMatchRecord};

use crate::error::StorageError;

/// Abstract transactional store behind the ingestion and query paths.
///
/// Two logical collections: raw matches (source of truth) and the derived
/// per-player index. `append_match` must be atomic across both: either the
/// raw match and every derived record become visible together, or none do.
pub trait MatchStore {
    /// Append a match and its derived records as one transaction.
    ///
    /// Add-semantics on every row: an existing match id fails the whole
    /// transaction with `DuplicateMatch`, leaving stored rows untouched.
    fn append_match(
        &mut self,
        record: &Match,
        projections: &[PlayerMatchRecord],
    ) -> Result<(), StorageError>;

    fn get_match(&self, match_id: &MatchId) -> Result<Option<Match>, StorageError>;

    /// All stored matches, oldest first.
    fn get_matches(&self) -> Result<Vec<Match>, StorageError>;

    fn match_count(&self) -> Result<u64, StorageError>;

    /// Every participation of one player, ordered by (timestamp, match id).
    fn records_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerMatchRecord>, StorageError>;

    /// Every derived record of one match.
    fn records_for_match(
        &self,
        match_id: &MatchId,
    ) -> Result<Vec<PlayerMatchRecord>, StorageError>;

    fn record_count(&self) -> Result<u64, StorageError>;
}
