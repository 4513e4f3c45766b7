//! Player drill-down and club overview models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EncounterKind, JourneeId, PlayerId, Side, TeamScore};

/// Result of an encounter from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
    Undecided,
}

/// One encounter of the player inside a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDetail {
    pub number: u32,
    pub kind: EncounterKind,
    pub partner: Option<PlayerId>,
    pub opponents: Vec<PlayerId>,

    /// Set scores as (player side, opposing side)
    pub set_scores: Vec<(i64, i64)>,

    pub sets_won: u32,
    pub sets_lost: u32,
    pub outcome: Outcome,
    pub abandoned: bool,
}

/// A match the player took part in, with their encounters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchParticipation {
    pub journee: JourneeId,
    pub date: Option<NaiveDate>,
    pub team_code: Option<String>,
    pub team_a: Option<String>,
    pub team_x: Option<String>,
    pub score: TeamScore,
    pub encounters: Vec<EncounterDetail>,
}

/// Team-match record of the club.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Record {
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Headline club figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubTotals {
    pub players: usize,
    pub team_matches: u32,
    pub individual_encounters: u32,
    pub journee_count: u32,
    pub record: Record,
}

/// One point of the per-journée evolution series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub journee: JourneeId,
    pub number: Option<u32>,
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub record: Record,
}

/// Encounters won and lost for one number of sets played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

/// Club encounters bucketed by how many sets were played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDistribution {
    pub three_sets: WinLoss,
    pub four_sets: WinLoss,
    pub five_sets: WinLoss,

    /// Rounded percentage of encounters won over the three buckets
    pub win_percentage: u32,
}

/// Summary line of a fixture for the journée overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Position of the fixture in the journée document
    pub index: usize,
    pub team_code: Option<String>,
    pub team_a: Option<String>,
    pub team_x: Option<String>,
    pub score: TeamScore,
    pub players_a: usize,
    pub players_x: usize,
    pub encounters_played: usize,
    pub encounters_expected: u32,
    pub sets_a: u32,
    pub sets_x: u32,
}

/// Everything shown for one journée besides the rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneeOverview {
    pub journee: JourneeId,
    pub date: Option<NaiveDate>,
    pub record: Record,
    pub sets: SetDistribution,
    pub matches: Vec<MatchSummary>,
}

/// A roster line of the match drill-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub code: Option<String>,
    pub name: PlayerId,
    pub licence: Option<String>,
    pub points: i64,
}

/// One encounter of a fixture, seen from side A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterLine {
    pub number: u32,
    pub kind: EncounterKind,
    pub players_a: Vec<PlayerId>,
    pub players_x: Vec<PlayerId>,

    /// Set scores as (side A, side X)
    pub set_scores: Vec<(i64, i64)>,

    pub sets_a: u32,
    pub sets_x: u32,
    pub abandoned: bool,

    /// Result for the club; undecided when the club is on neither side
    pub club_outcome: Outcome,
}

/// Everything shown for one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub journee: JourneeId,
    pub date: Option<NaiveDate>,
    pub club_side: Option<Side>,
    pub summary: MatchSummary,
    pub roster_a: Vec<RosterEntry>,
    pub roster_x: Vec<RosterEntry>,
    pub encounters: Vec<EncounterLine>,
    pub sets: SetDistribution,
}
