//! Re-sorting ranked players by a user-selected column.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RankingError;
use crate::models::RankingEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(RankingError::UnknownDirection(other.to_string())),
        }
    }
}

enum SortKey {
    Number(f64),
    Text(String),
}

/// Value of a dotted column path for one entry.
fn column_value(entry: &RankingEntry, serialized: &Value, column: &str) -> Option<Value> {
    match column {
        "rank" => Some(Value::from(entry.rank)),
        "sets.total" => Some(Value::from(entry.stat.sets.won + entry.stat.sets.lost)),
        path => path
            .split('.')
            .try_fold(serialized, |node, key| node.get(key))
            .filter(|v| !v.is_null())
            .cloned(),
    }
}

/// Case-insensitive key with French accents folded to their base letter.
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' | 'ã' | 'å' => 'a',
            'ç' => 'c',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' | 'ì' => 'i',
            'ô' | 'ö' | 'ó' | 'ò' | 'õ' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ÿ' | 'ý' => 'y',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Locale-style comparison: base letters first, exact text as tie-break.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Re-sort entries by `column` (a dotted path such as `matches.win_rate`).
///
/// `rank` is the entry's original position and `sets.total` is
/// `won + lost`. The column is numeric when any entry holds a number there;
/// missing values then sort as negative infinity, otherwise as an empty
/// string. Ranks are left untouched and ties keep their current order.
pub fn sort_by(entries: &[RankingEntry], column: &str, direction: SortDirection) -> Vec<RankingEntry> {
    let values: Vec<Option<Value>> = entries
        .iter()
        .map(|entry| {
            let serialized = serde_json::to_value(entry).unwrap_or(Value::Null);
            column_value(entry, &serialized, column)
        })
        .collect();

    let numeric = values.iter().any(|v| matches!(v, Some(Value::Number(_))));
    let keys = values.into_iter().map(|value| {
        if numeric {
            SortKey::Number(
                value
                    .as_ref()
                    .and_then(Value::as_f64)
                    .unwrap_or(f64::NEG_INFINITY),
            )
        } else {
            SortKey::Text(match value {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            })
        }
    });

    let mut keyed: Vec<(SortKey, &RankingEntry)> = keys.zip(entries.iter()).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = match (a, b) {
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Text(x), SortKey::Text(y)) => compare_text(x, y),
            _ => Ordering::Equal,
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, entry)| entry.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, PlayerStat};
    use crate::ranking::{rank, RankingOrder};

    fn entries() -> Vec<RankingEntry> {
        rank(
            vec![
                PlayerStat::from_totals(PlayerId::parse("Élodie BÉRARD"), 1200, 5.0, 1.0, 16, 5, 30),
                PlayerStat::from_totals(PlayerId::parse("Anne DURAND"), 800, 4.0, 2.0, 13, 9, -10),
                PlayerStat::from_totals(PlayerId::parse("Marc LEROY"), 650, 2.0, 2.0, 8, 7, 55),
                PlayerStat::from_totals(PlayerId::parse("Jean DUPONT"), 1000, 1.0, 4.0, 6, 12, 0),
            ],
            1.0,
            RankingOrder::Leaderboard,
        )
    }

    fn names(entries: &[RankingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.stat.name.as_str()).collect()
    }

    #[test]
    fn test_sort_numeric_nested_column() {
        let sorted = sort_by(&entries(), "performance_score", SortDirection::Desc);
        assert_eq!(
            names(&sorted),
            vec!["Marc LEROY", "Élodie BÉRARD", "Jean DUPONT", "Anne DURAND"]
        );

        let sorted = sort_by(&entries(), "sets.ratio", SortDirection::Asc);
        assert_eq!(sorted[0].stat.name.as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_sort_keeps_original_rank() {
        let sorted = sort_by(&entries(), "official_points", SortDirection::Asc);
        let ranks: Vec<usize> = sorted.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![3, 2, 4, 1]);

        let back = sort_by(&sorted, "rank", SortDirection::Asc);
        assert_eq!(names(&back), names(&entries()));
    }

    #[test]
    fn test_sort_synthetic_sets_total() {
        let sorted = sort_by(&entries(), "sets.total", SortDirection::Desc);
        let totals: Vec<u32> = sorted.iter().map(|e| e.stat.sets.total).collect();
        assert_eq!(totals, vec![22, 21, 18, 15]);
    }

    #[test]
    fn test_sort_names_folds_accents() {
        let sorted = sort_by(&entries(), "name", SortDirection::Asc);
        assert_eq!(
            names(&sorted),
            vec!["Anne DURAND", "Élodie BÉRARD", "Jean DUPONT", "Marc LEROY"]
        );
    }

    #[test]
    fn test_sort_round_trip_reverses() {
        let asc = sort_by(&entries(), "matches.win_rate", SortDirection::Asc);
        let mut desc = sort_by(&entries(), "matches.win_rate", SortDirection::Desc);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn test_sort_unknown_column_keeps_order() {
        let sorted = sort_by(&entries(), "does.not.exist", SortDirection::Desc);
        assert_eq!(names(&sorted), names(&entries()));
    }

    #[test]
    fn test_compare_text() {
        assert_eq!(compare_text("élan", "Emile"), Ordering::Less);
        assert_eq!(compare_text("abc", "ABC"), Ordering::Greater);
        assert_eq!(compare_text("", "a"), Ordering::Less);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("up".parse::<SortDirection>().is_err());
    }
}
