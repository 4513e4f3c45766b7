//! Player and journée identifiers.
//!
//! Players carry no stable identifier in the source data, so identity across
//! matches is the normalized display name. Two different people sharing a
//! normalized name are merged; this is a known limitation of the data.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Normalized player name, rendered `Prenom NOM`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Build an id from separate first name and surname fields.
    pub fn from_parts(first_name: &str, surname: &str) -> Self {
        let first = capitalize(&join_words(first_name));
        let last = join_words(surname).to_uppercase();
        Self(join_non_empty(&first, &last))
    }

    /// Normalize a free-form display name.
    ///
    /// Tokens written fully in capitals (more than one letter) are taken as
    /// the surname, the rest as the first name. When every token is in
    /// capitals the source wrote `NOM PRENOM`, so the last token is the first
    /// name. When none is, the first token is the first name.
    pub fn parse(name: &str) -> Self {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        match tokens.len() {
            0 => return Self(String::new()),
            1 => return Self(tokens[0].to_uppercase()),
            _ => {}
        }

        let (surname, first): (Vec<&str>, Vec<&str>) =
            tokens.iter().partition(|token| is_surname_token(token));

        if first.is_empty() {
            if let Some((last, rest)) = tokens.split_last() {
                return Self::from_parts(last, &rest.join(" "));
            }
        }
        if surname.is_empty() {
            return Self::from_parts(tokens[0], &tokens[1..].join(" "));
        }
        Self::from_parts(&first.join(" "), &surname.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join_words(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_non_empty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn is_surname_token(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

fn journee_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[Jj](\d+)_(\d{8})$").unwrap())
}

/// Identifier of a playing day, e.g. `J3_20251012`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JourneeId(String);

impl JourneeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Day number (`3` for `J3_20251012`).
    pub fn number(&self) -> Option<u32> {
        let caps = journee_pattern().captures(&self.0)?;
        caps[1].parse().ok()
    }

    /// Calendar date encoded in the identifier.
    pub fn date(&self) -> Option<NaiveDate> {
        let caps = journee_pattern().captures(&self.0)?;
        NaiveDate::parse_from_str(&caps[2], "%Y%m%d").ok()
    }
}

impl Ord for JourneeId {
    /// Chronological: parsed date, then day number; unparsed ids last, by string.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.number().cmp(&other.number()))
                .then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for JourneeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for JourneeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for JourneeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JourneeId({})", self.0)
    }
}

impl From<&str> for JourneeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_from_parts() {
        let id = PlayerId::from_parts("jean", "dupont");
        assert_eq!(id.as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_player_id_from_parts_collapses_whitespace() {
        let id = PlayerId::from_parts("  MARIE-anne ", "le   goff");
        assert_eq!(id.as_str(), "Marie-anne LE GOFF");
    }

    #[test]
    fn test_player_id_from_parts_accents() {
        let id = PlayerId::from_parts("éLODIE", "bérard");
        assert_eq!(id.as_str(), "Élodie BÉRARD");
    }

    #[test]
    fn test_player_id_parse_surname_first() {
        assert_eq!(PlayerId::parse("DUPONT Jean").as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_player_id_parse_first_name_first() {
        assert_eq!(PlayerId::parse("Jean DUPONT").as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_player_id_parse_all_caps() {
        assert_eq!(PlayerId::parse("DUPONT JEAN").as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_player_id_parse_lowercase() {
        assert_eq!(PlayerId::parse("jean dupont").as_str(), "Jean DUPONT");
    }

    #[test]
    fn test_player_id_parse_is_idempotent() {
        let once = PlayerId::parse("le goff MARIE");
        let twice = PlayerId::parse(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_player_id_parse_empty() {
        assert!(PlayerId::parse("   ").is_empty());
    }

    #[test]
    fn test_player_id_serde_normalizes() {
        let id: PlayerId = serde_json::from_str("\"DUPONT jean\"").unwrap();
        assert_eq!(id.as_str(), "Jean DUPONT");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Jean DUPONT\"");
    }

    #[test]
    fn test_journee_id_parts() {
        let id = JourneeId::from("J3_20251012");
        assert_eq!(id.number(), Some(3));
        assert_eq!(id.date(), NaiveDate::from_ymd_opt(2025, 10, 12));
    }

    #[test]
    fn test_journee_id_unparsed() {
        let id = JourneeId::from("bonus");
        assert_eq!(id.number(), None);
        assert_eq!(id.date(), None);
    }

    #[test]
    fn test_journee_id_ordering() {
        let mut ids = vec![
            JourneeId::from("bonus"),
            JourneeId::from("J4_20251116"),
            JourneeId::from("J3_20251012"),
        ];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(ordered, vec!["J3_20251012", "J4_20251116", "bonus"]);
    }
}
