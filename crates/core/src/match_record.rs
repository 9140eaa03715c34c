use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::{MatchId, PlayerId};
use crate::outcome::Outcome;

/// One side of a match: the roster in submission order plus the final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    players: Vec<PlayerId>,
    score: i64,
}

impl Team {
    pub fn new(players: Vec<PlayerId>, score: i64) -> Self {
        Self { players, score }
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}

/// A completed match, immutable once stored.
///
/// Validated on construction: both rosters non-empty, no player listed
/// twice, no player on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    match_id: MatchId,
    timestamp_ms: i64,
    team_one: Team,
    team_two: Team,
}

impl Match {
    pub fn new(
        match_id: MatchId,
        timestamp_ms: i64,
        team_one: Team,
        team_two: Team,
    ) -> Result<Self, CoreError> {
        if team_one.players.is_empty() || team_two.players.is_empty() {
            return Err(CoreError::InvalidMatch(
                "both teams need at least one player".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        for player in team_one.players.iter().chain(&team_two.players) {
            if !seen.insert(player) {
                return Err(CoreError::InvalidMatch(format!(
                    "player {player} listed more than once"
                )));
            }
        }
        Ok(Self {
            match_id,
            timestamp_ms,
            team_one,
            team_two,
        })
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn team_one(&self) -> &Team {
        &self.team_one
    }

    pub fn team_two(&self) -> &Team {
        &self.team_two
    }

    /// Outcomes for (team_one, team_two) per the score comparison rule.
    pub fn outcomes(&self) -> (Outcome, Outcome) {
        let one = Outcome::from_scores(self.team_one.score, self.team_two.score);
        (one, one.reversed())
    }

    pub fn participant_count(&self) -> usize {
        self.team_one.players.len() + self.team_two.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(ids: &[&str]) -> Vec<PlayerId> {
        ids.iter().map(|id| PlayerId::new(*id)).collect()
    }

    #[test]
    fn valid_match_constructs() {
        let m = Match::new(
            MatchId::new("m1"),
            1_700_000_000_000,
            Team::new(players(&["a", "b"]), 25),
            Team::new(players(&["c", "d"]), 20),
        )
        .unwrap();
        assert_eq!(m.participant_count(), 4);
        assert_eq!(m.outcomes(), (Outcome::Win, Outcome::Loss));
    }

    #[test]
    fn empty_roster_rejected() {
        let result = Match::new(
            MatchId::new("m1"),
            0,
            Team::new(vec![], 10),
            Team::new(players(&["c"]), 5),
        );
        assert!(matches!(result, Err(CoreError::InvalidMatch(_))));
    }

    #[test]
    fn duplicate_player_within_team_rejected() {
        let result = Match::new(
            MatchId::new("m1"),
            0,
            Team::new(players(&["a", "a"]), 10),
            Team::new(players(&["c"]), 5),
        );
        assert!(matches!(result, Err(CoreError::InvalidMatch(_))));
    }

    #[test]
    fn player_on_both_sides_rejected() {
        let result = Match::new(
            MatchId::new("m1"),
            0,
            Team::new(players(&["a", "b"]), 10),
            Team::new(players(&["b", "c"]), 5),
        );
        assert!(matches!(result, Err(CoreError::InvalidMatch(_))));
    }

    #[test]
    fn tied_scores_tie_both_sides() {
        let m = Match::new(
            MatchId::new("m1"),
            0,
            Team::new(players(&["a"]), 20),
            Team::new(players(&["b"]), 20),
        )
        .unwrap();
        assert_eq!(m.outcomes(), (Outcome::Tie, Outcome::Tie));
    }
}
