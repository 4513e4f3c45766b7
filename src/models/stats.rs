//! Derived statistics models.

use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::calculate::{calculate_set_ratio, calculate_win_rate};

/// Individual match record of a player.
///
/// Counts are real numbers: a half-weighted doubles appearance adds `0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTally {
    pub total: f64,
    pub wins: f64,
    pub losses: f64,

    /// Rounded percentage, 0 to 100
    pub win_rate: u32,
}

/// Sets won and lost by a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetTally {
    pub won: u32,
    pub lost: u32,
    pub total: u32,

    /// won / total (0.0 to 1.0)
    pub ratio: f64,
}

/// Aggregate statistics of one player under one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: PlayerId,
    pub official_points: i64,
    pub matches: MatchTally,
    pub sets: SetTally,
    pub performance_score: i64,
}

impl PlayerStat {
    /// Empty statistics for a player.
    pub fn new(name: PlayerId, official_points: i64) -> Self {
        Self {
            name,
            official_points,
            matches: MatchTally::default(),
            sets: SetTally::default(),
            performance_score: 0,
        }
    }

    /// Build from raw counts, deriving every dependent field.
    pub fn from_totals(
        name: PlayerId,
        official_points: i64,
        wins: f64,
        losses: f64,
        sets_won: u32,
        sets_lost: u32,
        performance_score: i64,
    ) -> Self {
        let mut stat = Self::new(name, official_points);
        stat.matches.wins = wins;
        stat.matches.losses = losses;
        stat.sets.won = sets_won;
        stat.sets.lost = sets_lost;
        stat.performance_score = performance_score;
        stat.refresh();
        stat
    }

    /// Record one decided encounter with the given match weight.
    pub fn record_encounter(&mut self, weight: f64, won: bool, sets_won: u32, sets_lost: u32) {
        if won {
            self.matches.wins += weight;
        } else {
            self.matches.losses += weight;
        }
        self.sets.won += sets_won;
        self.sets.lost += sets_lost;
        self.refresh();
    }

    /// Add the statistics of the same player from another scope.
    pub fn absorb(&mut self, other: &PlayerStat) {
        self.matches.wins += other.matches.wins;
        self.matches.losses += other.matches.losses;
        self.sets.won += other.sets.won;
        self.sets.lost += other.sets.lost;
        self.performance_score += other.performance_score;
        if other.official_points != 0 {
            self.official_points = other.official_points;
        }
        self.refresh();
    }

    /// Re-derive totals and ratios from the counts.
    pub fn refresh(&mut self) {
        self.matches.total = self.matches.wins + self.matches.losses;
        self.matches.win_rate = calculate_win_rate(self.matches.wins, self.matches.total);
        self.sets.total = self.sets.won + self.sets.lost;
        self.sets.ratio = calculate_set_ratio(self.sets.won, self.sets.lost);
    }
}

/// A player's position within a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,

    #[serde(flatten)]
    pub stat: PlayerStat,
}
