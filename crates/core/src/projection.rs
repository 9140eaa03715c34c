use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{MatchId, PlayerId};
use crate::match_record::{Match, Team};
use crate::outcome::Outcome;

/// Denormalized view of one player's participation in one match, shaped for
/// per-player history lookups. Identified by the (player_id, match_id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchRecord {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub timestamp_ms: i64,
    pub outcome: Outcome,
    /// Own side of the match, excluding the player itself.
    pub teammates: BTreeSet<PlayerId>,
    /// The entire opposing roster.
    pub opponents: BTreeSet<PlayerId>,
}

/// Derive one record per participant of a match.
pub fn project_match(record: &Match) -> Vec<PlayerMatchRecord> {
    let (one, two) = record.outcomes();
    let mut projections = Vec::with_capacity(record.participant_count());
    project_side(record, record.team_one(), record.team_two(), one, &mut projections);
    project_side(record, record.team_two(), record.team_one(), two, &mut projections);
    projections
}

fn project_side(
    record: &Match,
    own: &Team,
    other: &Team,
    outcome: Outcome,
    out: &mut Vec<PlayerMatchRecord>,
) {
    let opponents: BTreeSet<PlayerId> = other.players().iter().cloned().collect();
    for player in own.players() {
        let teammates = own
            .players()
            .iter()
            .filter(|teammate| *teammate != player)
            .cloned()
            .collect();
        out.push(PlayerMatchRecord {
            player_id: player.clone(),
            match_id: record.match_id().clone(),
            timestamp_ms: record.timestamp_ms(),
            outcome,
            teammates,
            opponents: opponents.clone(),
        });
    }
}
