//! Per-journée player statistics.

use std::collections::BTreeMap;

use tracing::debug;

use super::{calculate_performance_delta, DoublesWeight};
use crate::classify::{classify, ClubMatcher};
use crate::models::{EncounterKind, Match, PlayerId, PlayerStat};

/// Player statistics keyed by normalized name.
pub type StatsMap = BTreeMap<PlayerId, PlayerStat>;

/// Fold every club encounter of one journée into per-player statistics.
///
/// Abandoned and undecided encounters are left out, as are participants that
/// do not resolve to a roster player.
pub fn compute_journee_stats(
    matches: &[Match],
    club: &ClubMatcher,
    weight: DoublesWeight,
) -> StatsMap {
    let mut stats = StatsMap::new();

    for fixture in matches {
        for encounter in &fixture.encounters {
            if encounter.is_abandoned() {
                debug!(
                    "Skipping abandoned encounter {} of {:?}",
                    encounter.number, fixture.team_code
                );
                continue;
            }

            for classified in classify(club, fixture, encounter) {
                let Some(won) = classified.won() else {
                    debug!(
                        "Skipping undecided encounter {} of {:?}",
                        encounter.number, fixture.team_code
                    );
                    continue;
                };
                let (sets_won, sets_lost) = classified.set_tally();
                let match_weight = match classified.kind {
                    EncounterKind::Singles => 1.0,
                    EncounterKind::Doubles => weight.factor(),
                };

                for (slot, player) in classified.own.players() {
                    let id = player.id();
                    if id.is_empty() {
                        continue;
                    }

                    let stat = stats
                        .entry(id.clone())
                        .or_insert_with(|| PlayerStat::new(id, player.points));
                    if player.points != 0 {
                        stat.official_points = player.points;
                    }
                    stat.record_encounter(match_weight, won, sets_won, sets_lost);

                    // Unranked players (0 points) have no meaningful gap.
                    if let Some(opponent) = classified.opponents.facing(slot) {
                        if player.points > 0 && opponent.points > 0 {
                            stat.performance_score +=
                                calculate_performance_delta(won, player.points, opponent.points);
                        }
                    }
                }
            }
        }
    }

    stats
}
