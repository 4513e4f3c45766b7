//! Ranking engine.
//!
//! Filters players by a minimum number of matches and orders them with one of
//! two tie-break chains. Re-sorting by an arbitrary column lives in [`sort`].

mod sort;

pub use sort::*;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PlayerStat, RankingEntry};

/// Ranking errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    UnknownDirection(String),
}

/// Total order applied to ranked players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingOrder {
    /// Win rate, then wins.
    Leaderboard,
    /// Wins, then performance score.
    Mvp,
}

impl RankingOrder {
    /// Compare two players, best first.
    pub fn compare(self, a: &PlayerStat, b: &PlayerStat) -> Ordering {
        match self {
            RankingOrder::Leaderboard => b
                .matches
                .win_rate
                .cmp(&a.matches.win_rate)
                .then_with(|| b.matches.wins.total_cmp(&a.matches.wins)),
            RankingOrder::Mvp => b
                .matches
                .wins
                .total_cmp(&a.matches.wins)
                .then_with(|| b.performance_score.cmp(&a.performance_score)),
        }
    }
}

/// Rank players with at least `min_matches` matches.
///
/// The sort is stable, so players tied on the whole chain keep their input
/// order.
pub fn rank<I>(stats: I, min_matches: f64, order: RankingOrder) -> Vec<RankingEntry>
where
    I: IntoIterator<Item = PlayerStat>,
{
    let mut eligible: Vec<PlayerStat> = stats
        .into_iter()
        .filter(|s| s.matches.total >= min_matches)
        .collect();

    eligible.sort_by(|a, b| order.compare(a, b));

    eligible
        .into_iter()
        .enumerate()
        .map(|(index, stat)| RankingEntry {
            rank: index + 1,
            stat,
        })
        .collect()
}
