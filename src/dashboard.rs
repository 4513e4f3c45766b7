//! Computation entry points bound to one loaded corpus.
//!
//! Every view is recomputed from the resident corpus on each call; the
//! selected journée is always passed in as a [`JourneeFilter`].

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::calculate::{
    club_record, compute_journee_stats, match_summaries, merge_all, set_distribution,
    DoublesWeight, StatsMap,
};
use crate::classify::ClubMatcher;
use crate::config::{ClubConfig, RankingConfig};
use crate::history::{match_detail, player_history};
use crate::models::{
    ClubTotals, Corpus, EvolutionPoint, Journee, JourneeId, JourneeOverview, Match, MatchDetail,
    MatchParticipation, PlayerId, RankingEntry, SetDistribution,
};
use crate::ranking::{rank, sort_by, RankingError, RankingOrder, SortDirection};

/// Errors surfaced by dashboard queries.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unknown journée: {0}")]
    UnknownJournee(JourneeId),

    #[error("Unknown match {index} in journée {journee}")]
    UnknownMatch { journee: JourneeId, index: usize },

    #[error("Invalid journée filter: {0:?}")]
    BadFilter(String),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// Which journées a view covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JourneeFilter {
    #[default]
    All,
    Journee(JourneeId),
}

impl FromStr for JourneeFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("toutes") {
            return Ok(JourneeFilter::All);
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(DashboardError::BadFilter(s.to_string()));
        }
        Ok(JourneeFilter::Journee(JourneeId::new(s)))
    }
}

/// A loaded journée as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneeInfo {
    pub id: JourneeId,
    pub number: Option<u32>,
    pub date: Option<NaiveDate>,
    pub matches: usize,
}

pub struct Dashboard {
    corpus: Corpus,
    club: ClubMatcher,
    team_code_prefix: String,
    ranking: RankingConfig,
}

impl Dashboard {
    pub fn new(corpus: Corpus, club: &ClubConfig, ranking: RankingConfig) -> Self {
        let dashboard = Self {
            corpus,
            club: ClubMatcher::new(&club.name_variants),
            team_code_prefix: club.team_code_prefix.clone(),
            ranking,
        };

        for (id, published, derived) in dashboard.baseline_drift() {
            debug!(
                "Baseline total for {} is {} but the loaded journées give {}",
                id, published, derived
            );
        }

        dashboard
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn journees(&self) -> Vec<JourneeInfo> {
        self.corpus
            .journees()
            .iter()
            .map(|j| JourneeInfo {
                id: j.id.clone(),
                number: j.id.number(),
                date: j.date(),
                matches: j.matches.len(),
            })
            .collect()
    }

    fn journee(&self, id: &JourneeId) -> Result<&Journee, DashboardError> {
        self.corpus
            .journee(id)
            .ok_or_else(|| DashboardError::UnknownJournee(id.clone()))
    }

    fn selected(&self, filter: &JourneeFilter) -> Result<Vec<&Journee>, DashboardError> {
        match filter {
            JourneeFilter::All => Ok(self.corpus.journees().iter().collect()),
            JourneeFilter::Journee(id) => Ok(vec![self.journee(id)?]),
        }
    }

    fn selected_matches(&self, filter: &JourneeFilter) -> Result<Vec<&Match>, DashboardError> {
        Ok(self
            .selected(filter)?
            .into_iter()
            .flat_map(|j| j.matches.iter())
            .collect())
    }

    /// Leaderboard for the filter.
    ///
    /// All journées come from the baseline snapshot; a single journée is
    /// computed with half-weighted doubles.
    pub fn statistics_for(&self, filter: &JourneeFilter) -> Result<Vec<RankingEntry>, DashboardError> {
        match filter {
            JourneeFilter::All => Ok(rank(
                self.corpus.baseline.player_stats(),
                self.ranking.all_time_min_matches,
                RankingOrder::Leaderboard,
            )),
            JourneeFilter::Journee(id) => {
                let journee = self.journee(id)?;
                let stats = compute_journee_stats(&journee.matches, &self.club, DoublesWeight::Half);
                Ok(rank(
                    stats.into_values(),
                    self.ranking.journee_min_matches,
                    RankingOrder::Leaderboard,
                ))
            }
        }
    }

    /// Best players of one journée by wins, doubles counted in full.
    pub fn mvp_and_top3_for(&self, id: &JourneeId) -> Result<Vec<RankingEntry>, DashboardError> {
        let journee = self.journee(id)?;
        let stats = compute_journee_stats(&journee.matches, &self.club, DoublesWeight::Full);
        let mut ranked = rank(
            stats.into_values(),
            self.ranking.journee_min_matches,
            RankingOrder::Mvp,
        );
        ranked.truncate(self.ranking.top_n);
        Ok(ranked)
    }

    /// Published club counts plus the team record over loaded journées.
    pub fn club_totals(&self) -> ClubTotals {
        let totals = self.corpus.baseline.totals;
        ClubTotals {
            players: self.corpus.baseline.players.len(),
            team_matches: totals.team_matches,
            individual_encounters: totals.encounters,
            journee_count: totals.journees,
            record: club_record(
                self.corpus.journees().iter().flat_map(|j| j.matches.iter()),
                &self.club,
            ),
        }
    }

    pub fn evolution_series(&self) -> Vec<EvolutionPoint> {
        self.corpus
            .journees()
            .iter()
            .map(|j| EvolutionPoint {
                journee: j.id.clone(),
                number: j.id.number(),
                date: j.date(),
                record: club_record(&j.matches, &self.club),
            })
            .collect()
    }

    pub fn set_distribution(&self, filter: &JourneeFilter) -> Result<SetDistribution, DashboardError> {
        Ok(set_distribution(self.selected_matches(filter)?, &self.club))
    }

    pub fn journee_overview(&self, id: &JourneeId) -> Result<JourneeOverview, DashboardError> {
        let journee = self.journee(id)?;
        Ok(JourneeOverview {
            journee: journee.id.clone(),
            date: journee.date(),
            record: club_record(&journee.matches, &self.club),
            sets: set_distribution(&journee.matches, &self.club),
            matches: match_summaries(&journee.matches, &self.team_code_prefix),
        })
    }

    /// One fixture in full; `index` is its position in the journée document,
    /// as carried by the overview summaries.
    pub fn match_detail(&self, id: &JourneeId, index: usize) -> Result<MatchDetail, DashboardError> {
        let journee = self.journee(id)?;
        match_detail(journee, index, &self.club).ok_or_else(|| DashboardError::UnknownMatch {
            journee: id.clone(),
            index,
        })
    }

    pub fn sort_by(
        &self,
        entries: &[RankingEntry],
        column: &str,
        direction: &str,
    ) -> Result<Vec<RankingEntry>, DashboardError> {
        let direction: SortDirection = direction.parse()?;
        Ok(sort_by(entries, column, direction))
    }

    /// Encounter history of a player; `name` is normalized first.
    pub fn history_for(
        &self,
        name: &str,
        filter: &JourneeFilter,
    ) -> Result<Vec<MatchParticipation>, DashboardError> {
        let player = PlayerId::parse(name);
        Ok(player_history(self.selected(filter)?, &self.club, &player))
    }

    /// All-journées statistics rebuilt from the loaded journées.
    pub fn rederive_all(&self, weight: DoublesWeight) -> StatsMap {
        let per_journee: Vec<(&JourneeId, StatsMap)> = self
            .corpus
            .journees()
            .iter()
            .map(|j| (&j.id, compute_journee_stats(&j.matches, &self.club, weight)))
            .collect();
        merge_all(per_journee.iter().map(|(id, stats)| (*id, stats)))
    }

    /// Players whose published match total differs from the re-derived one.
    pub fn baseline_drift(&self) -> Vec<(PlayerId, f64, f64)> {
        let derived = self.rederive_all(DoublesWeight::Full);
        self.corpus
            .baseline
            .player_stats()
            .into_iter()
            .filter_map(|published| {
                let total = derived.get(&published.name).map_or(0.0, |s| s.matches.total);
                if total == published.matches.total {
                    return None;
                }
                Some((published.name, published.matches.total, total))
            })
            .collect()
    }
}
