//! Cross-journée merging.

use super::StatsMap;
use crate::models::JourneeId;

/// Sum per-journée statistics by player, re-deriving every ratio.
///
/// Inputs are folded in chronological order of their journée, so the result
/// does not depend on the order they are given in. Ratios are never summed.
/// Official points come from the latest journée where the player has a
/// non-zero value.
pub fn merge_all<'a, I>(per_journee: I) -> StatsMap
where
    I: IntoIterator<Item = (&'a JourneeId, &'a StatsMap)>,
{
    let mut days: Vec<(&JourneeId, &StatsMap)> = per_journee.into_iter().collect();
    days.sort_by(|a, b| a.0.cmp(b.0));

    let mut merged = StatsMap::new();

    for (_, stats) in days {
        for (id, stat) in stats {
            match merged.get_mut(id) {
                Some(existing) => existing.absorb(stat),
                None => {
                    let mut fresh = stat.clone();
                    fresh.refresh();
                    merged.insert(id.clone(), fresh);
                }
            }
        }
    }

    merged
}
