use std::collections::BTreeMap;

use matchbook_core::{Outcome, PlayerId, PlayerMatchRecord};

/// Accumulated shared history with one candidate, split by relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins_with: u32,
    pub losses_with: u32,
    pub ties_with: u32,
    pub wins_against: u32,
    pub losses_against: u32,
    pub ties_against: u32,
    pub total_matches: u32,
}

impl Tally {
    fn record_with(&mut self, outcome: Outcome) {
        self.total_matches += 1;
        match outcome {
            Outcome::Win => self.wins_with += 1,
            Outcome::Loss => self.losses_with += 1,
            Outcome::Tie => self.ties_with += 1,
        }
    }

    fn record_against(&mut self, outcome: Outcome) {
        self.total_matches += 1;
        match outcome {
            Outcome::Win => self.wins_against += 1,
            Outcome::Loss => self.losses_against += 1,
            Outcome::Tie => self.ties_against += 1,
        }
    }
}

/// Tally one player's shared history with each lobby candidate over the
/// given records (all of which must belong to `self_id`).
///
/// Every non-self candidate gets an entry, all-zero if never encountered.
/// Each record classifies each candidate as teammate, opponent, or absent
/// via set containment; the teammate and opponent sets are disjoint by
/// construction, so the classification is unambiguous.
pub fn tally_records(
    self_id: &PlayerId,
    lobby: &[PlayerId],
    records: &[PlayerMatchRecord],
) -> BTreeMap<PlayerId, Tally> {
    let mut tallies: BTreeMap<PlayerId, Tally> = lobby
        .iter()
        .filter(|candidate| *candidate != self_id)
        .map(|candidate| (candidate.clone(), Tally::default()))
        .collect();

    for record in records {
        for (candidate, tally) in tallies.iter_mut() {
            if record.teammates.contains(candidate) {
                tally.record_with(record.outcome);
            } else if record.opponents.contains(candidate) {
                tally.record_against(record.outcome);
            }
        }
    }

    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchbook_core::{Match, MatchId, Team, project_match};

    fn players(ids: &[&str]) -> Vec<PlayerId> {
        ids.iter().map(|id| PlayerId::new(*id)).collect()
    }

    fn records_for(
        player: &str,
        matches: &[(&str, &[&str], i64, &[&str], i64)],
    ) -> Vec<PlayerMatchRecord> {
        let player = PlayerId::new(player);
        let mut records = Vec::new();
        for (i, (id, one, score_one, two, score_two)) in matches.iter().enumerate() {
            let record = Match::new(
                MatchId::new(*id),
                1_700_000_000_000 + i as i64,
                Team::new(players(one), *score_one),
                Team::new(players(two), *score_two),
            )
            .unwrap();
            records.extend(
                project_match(&record)
                    .into_iter()
                    .filter(|r| r.player_id == player),
            );
        }
        records
    }

    #[test]
    fn teammates_and_opponents_split_by_outcome() {
        let a = PlayerId::new("a");
        let records = records_for("a", &[("m1", &["a", "b"], 25, &["c", "d"], 20)]);
        let tallies = tally_records(&a, &players(&["b", "c", "d"]), &records);

        let b = &tallies[&PlayerId::new("b")];
        assert_eq!(b.wins_with, 1);
        assert_eq!(b.total_matches, 1);
        assert_eq!(b.wins_against + b.losses_against + b.ties_against, 0);

        for opponent in ["c", "d"] {
            let tally = &tallies[&PlayerId::new(opponent)];
            assert_eq!(tally.wins_against, 1, "{opponent}");
            assert_eq!(tally.total_matches, 1);
            assert_eq!(tally.wins_with + tally.losses_with + tally.ties_with, 0);
        }
    }

    #[test]
    fn absent_candidate_keeps_zero_tally() {
        let a = PlayerId::new("a");
        let records = records_for("a", &[("m1", &["a", "b"], 25, &["c", "d"], 20)]);
        let tallies = tally_records(&a, &players(&["stranger"]), &records);

        assert_eq!(tallies[&PlayerId::new("stranger")], Tally::default());
    }

    #[test]
    fn self_never_appears_in_result() {
        let a = PlayerId::new("a");
        let records = records_for("a", &[("m1", &["a", "b"], 25, &["c", "d"], 20)]);
        let tallies = tally_records(&a, &players(&["a", "b"]), &records);

        assert!(!tallies.contains_key(&a));
        assert_eq!(tallies.len(), 1);
    }

    #[test]
    fn accumulates_across_matches_and_relations() {
        let a = PlayerId::new("a");
        // b is a teammate in a win, an opponent in a loss, a teammate in a tie.
        let records = records_for(
            "a",
            &[
                ("m1", &["a", "b"], 25, &["c", "d"], 20),
                ("m2", &["a", "c"], 10, &["b", "d"], 30),
                ("m3", &["a", "b"], 15, &["c", "d"], 15),
            ],
        );
        let tallies = tally_records(&a, &players(&["b"]), &records);

        let b = &tallies[&PlayerId::new("b")];
        assert_eq!(b.wins_with, 1);
        assert_eq!(b.ties_with, 1);
        assert_eq!(b.losses_against, 1);
        assert_eq!(b.total_matches, 3);
        assert_eq!(b.losses_with, 0);
        assert_eq!(b.wins_against, 0);
        assert_eq!(b.ties_against, 0);
    }

    #[test]
    fn empty_history_yields_all_zero_tallies() {
        let a = PlayerId::new("a");
        let tallies = tally_records(&a, &players(&["b", "c"]), &[]);
        assert_eq!(tallies.len(), 2);
        assert!(tallies.values().all(|t| *t == Tally::default()));
    }
}
