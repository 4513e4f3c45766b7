//! Statistics calculation engine.
//!
//! Computes derived metrics from loaded match data:
//! - Per-journée player statistics
//! - Cross-journée merging
//! - Club record, evolution and set distribution

mod club;
mod journee;
mod merge;

pub use club::*;
pub use journee::*;
pub use merge::*;

use serde::{Deserialize, Serialize};

/// How much a doubles appearance counts towards a player's match totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoublesWeight {
    /// A doubles counts as a full match (top performer computations).
    Full,
    /// A doubles counts as half a match (single-day leaderboards).
    Half,
}

impl DoublesWeight {
    pub fn factor(self) -> f64 {
        match self {
            DoublesWeight::Full => 1.0,
            DoublesWeight::Half => 0.5,
        }
    }
}

/// Calculate the rounded win percentage.
pub fn calculate_win_rate(wins: f64, total: f64) -> u32 {
    if total <= 0.0 {
        0
    } else {
        (100.0 * wins / total).round() as u32
    }
}

/// Calculate the share of sets won.
pub fn calculate_set_ratio(won: u32, lost: u32) -> f64 {
    let total = won + lost;
    if total == 0 {
        0.0
    } else {
        won as f64 / total as f64
    }
}

/// Score change of one encounter.
///
/// A win against a stronger opponent earns the points gap, a loss against a
/// weaker one costs it. Expected results are worth nothing.
pub fn calculate_performance_delta(won: bool, player_points: i64, opponent_points: i64) -> i64 {
    if won && opponent_points > player_points {
        opponent_points - player_points
    } else if !won && opponent_points < player_points {
        -(player_points - opponent_points)
    } else {
        0
    }
}

/// Rounded percentage of `part` over `whole`, 0 when empty.
pub fn calculate_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (100.0 * part as f64 / whole as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_win_rate() {
        assert_eq!(calculate_win_rate(2.0, 3.0), 67);
        assert_eq!(calculate_win_rate(1.0, 8.0), 13);
        assert_eq!(calculate_win_rate(0.0, 0.0), 0);
        assert_eq!(calculate_win_rate(3.0, 3.0), 100);
    }

    #[test]
    fn test_calculate_set_ratio() {
        assert_eq!(calculate_set_ratio(3, 1), 0.75);
        assert_eq!(calculate_set_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_doubles_weight_factor() {
        assert_eq!(DoublesWeight::Full.factor(), 1.0);
        assert_eq!(DoublesWeight::Half.factor(), 0.5);
    }

    #[test]
    fn test_performance_delta_upsets() {
        assert_eq!(calculate_performance_delta(true, 800, 850), 50);
        assert_eq!(calculate_performance_delta(false, 800, 760), -40);
    }

    #[test]
    fn test_performance_delta_expected_results_are_neutral() {
        // Win against a weaker opponent
        assert_eq!(calculate_performance_delta(true, 800, 700), 0);
        // Loss against a stronger opponent
        assert_eq!(calculate_performance_delta(false, 800, 900), 0);
        // Equal points either way
        assert_eq!(calculate_performance_delta(true, 800, 800), 0);
        assert_eq!(calculate_performance_delta(false, 800, 800), 0);
    }

    #[test]
    fn test_performance_score_example() {
        let player = 1000;
        let score: i64 = [
            (true, player + 10),
            (true, player + 25),
            (true, player - 5),
            (false, player + 5),
        ]
        .iter()
        .map(|(won, opponent)| calculate_performance_delta(*won, player, *opponent))
        .sum();
        assert_eq!(score, 35);
    }

    #[test]
    fn test_calculate_percentage() {
        assert_eq!(calculate_percentage(2, 3), 67);
        assert_eq!(calculate_percentage(0, 0), 0);
    }
}
