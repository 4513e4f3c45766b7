//! Precomputed all-journées snapshot (`statistiques.json`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::de::{lenient_f64, lenient_i64, lenient_u32};
use super::{PlayerId, PlayerStat};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineMatches {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,

    #[serde(rename = "victoires", default, deserialize_with = "lenient_f64")]
    pub wins: f64,

    #[serde(rename = "defaites", default, deserialize_with = "lenient_f64")]
    pub losses: f64,

    #[serde(rename = "taux_victoire", default, deserialize_with = "lenient_f64")]
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineSets {
    #[serde(rename = "gagnes", default, deserialize_with = "lenient_u32")]
    pub won: u32,

    #[serde(rename = "perdus", default, deserialize_with = "lenient_u32")]
    pub lost: u32,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub ratio: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselinePerformance {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub score: i64,
}

/// One player entry of the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselinePlayer {
    #[serde(rename = "points_officiels", default, deserialize_with = "lenient_i64")]
    pub official_points: i64,

    #[serde(default)]
    pub matches: BaselineMatches,

    #[serde(default)]
    pub sets: BaselineSets,

    #[serde(rename = "performance_classement", default)]
    pub performance: Option<BaselinePerformance>,
}

/// Club-wide counts shipped with the snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BaselineTotals {
    #[serde(rename = "nombre_matches", default, deserialize_with = "lenient_u32")]
    pub team_matches: u32,

    #[serde(rename = "nombre_rencontres", default, deserialize_with = "lenient_u32")]
    pub encounters: u32,

    #[serde(rename = "nombre_journees", default, deserialize_with = "lenient_u32")]
    pub journees: u32,
}

/// The authoritative all-journées statistics document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Baseline {
    #[serde(rename = "joueurs")]
    pub players: BTreeMap<String, BaselinePlayer>,

    #[serde(rename = "totaux", default)]
    pub totals: BaselineTotals,
}

impl Baseline {
    /// Player statistics keyed by normalized name, ordered by name.
    ///
    /// Counts are taken as published; totals and ratios are re-derived from
    /// them. Keys that normalize to the same id are summed.
    pub fn player_stats(&self) -> Vec<PlayerStat> {
        let mut by_id: BTreeMap<PlayerId, PlayerStat> = BTreeMap::new();

        for (name, player) in &self.players {
            let id = PlayerId::parse(name);
            if id.is_empty() {
                warn!("Skipping baseline entry with empty player name");
                continue;
            }
            let stat = PlayerStat::from_totals(
                id.clone(),
                player.official_points,
                player.matches.wins,
                player.matches.losses,
                player.sets.won,
                player.sets.lost,
                player.performance.as_ref().map_or(0, |p| p.score),
            );
            match by_id.get_mut(&id) {
                Some(existing) => {
                    warn!("Baseline entries collide on normalized name {}", id);
                    existing.absorb(&stat);
                }
                None => {
                    by_id.insert(id, stat);
                }
            }
        }

        by_id.into_values().collect()
    }
}
