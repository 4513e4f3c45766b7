//! Raw match records as exported per journée.
//!
//! Field names follow the source documents; accessors expose the shape the
//! rest of the crate works with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de::{
    lenient_i64, lenient_opt_i64, lenient_opt_string, lenient_u32, null_as_default,
};
use super::{Baseline, JourneeId, PlayerId};

/// Characters joining the two roster codes of a doubles pair.
pub const DOUBLES_CODE_SEPARATORS: &[char] = &['/', '&', '+'];

/// Marker used in participant labels for an abandoned encounter.
pub const ABANDON_MARKER: &str = "(A)";

/// Encounter count of a full team match when the document does not say.
const DEFAULT_EXPECTED_ENCOUNTERS: u32 = 20;

/// One of the two sides of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    X,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::X];

    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::X,
            Side::X => Side::A,
        }
    }
}

/// Singles or doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    Singles,
    Doubles,
}

/// A roster entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Roster slot code, unique within the team for this match
    #[serde(rename = "lettre", default, deserialize_with = "lenient_opt_string")]
    pub code: Option<String>,

    #[serde(rename = "nom", default, deserialize_with = "null_as_default")]
    pub surname: String,

    #[serde(rename = "prenom", default, deserialize_with = "null_as_default")]
    pub first_name: String,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub licence: Option<String>,

    /// Official ranking points
    #[serde(default, deserialize_with = "lenient_i64")]
    pub points: i64,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        PlayerId::from_parts(&self.first_name, &self.surname)
    }
}

/// One team of a fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "nom", default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,

    #[serde(rename = "joueurs", default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
}

impl Team {
    pub fn player_by_code(&self, code: &str) -> Option<&Player> {
        let code = code.trim();
        self.players
            .iter()
            .find(|p| p.code.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(code)))
    }

    pub fn player_by_id(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id() == id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Teams {
    #[serde(rename = "equipe_a", default)]
    pub a: Team,

    #[serde(rename = "equipe_x", default)]
    pub x: Team,
}

/// Aggregate team score of a fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    #[serde(rename = "equipe_a", default, deserialize_with = "lenient_u32")]
    pub a: u32,

    #[serde(rename = "equipe_x", default, deserialize_with = "lenient_u32")]
    pub x: u32,
}

impl TeamScore {
    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::X => self.x,
        }
    }
}

/// Score of one set. Both key spellings occur in the exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetScore {
    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    equipe_a: Option<i64>,

    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    score_a: Option<i64>,

    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    equipe_x: Option<i64>,

    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    score_x: Option<i64>,
}

impl SetScore {
    pub fn new(a: i64, x: i64) -> Self {
        Self {
            equipe_a: Some(a),
            equipe_x: Some(x),
            ..Self::default()
        }
    }

    pub fn points(&self, side: Side) -> i64 {
        let (primary, fallback) = match side {
            Side::A => (self.equipe_a, self.score_a),
            Side::X => (self.equipe_x, self.score_x),
        };
        primary.filter(|p| *p != 0).or(fallback).unwrap_or(0)
    }

    /// Side that won the set; `None` for a level (invalid) set.
    pub fn winner(&self) -> Option<Side> {
        let (a, x) = (self.points(Side::A), self.points(Side::X));
        match a.cmp(&x) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::X),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Participant as written in an encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantDetail {
    #[serde(rename = "lettre", default, deserialize_with = "lenient_opt_string")]
    pub code: Option<String>,

    #[serde(rename = "nom", default, deserialize_with = "lenient_opt_string")]
    pub surname: Option<String>,

    #[serde(rename = "prenom", default, deserialize_with = "lenient_opt_string")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub points: Option<i64>,

    /// Second player of a doubles pair
    #[serde(rename = "joueur2", default)]
    pub partner: Option<Box<ParticipantDetail>>,
}

impl ParticipantDetail {
    /// Roster codes of the first and second slot.
    pub fn codes(&self) -> (Option<String>, Option<String>) {
        let mut operands = self
            .code
            .as_deref()
            .map(|c| {
                c.split(DOUBLES_CODE_SEPARATORS)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
            .into_iter();

        let primary = operands.next();
        let composite_second = operands.next();
        let secondary = self
            .partner
            .as_ref()
            .and_then(|p| p.code.clone())
            .or(composite_second);
        (primary, secondary)
    }

    /// Normalized name written on the participant, if any.
    pub fn name_id(&self) -> Option<PlayerId> {
        let surname = self.surname.as_deref().unwrap_or("");
        let first_name = self.first_name.as_deref().unwrap_or("");
        let id = PlayerId::from_parts(first_name, &surname.replace(ABANDON_MARKER, ""));
        (!id.is_empty()).then_some(id)
    }

    fn is_composite(&self) -> bool {
        self.partner.is_some()
            || self
                .code
                .as_deref()
                .is_some_and(|c| c.contains(DOUBLES_CODE_SEPARATORS))
    }

    fn mentions_abandon(&self) -> bool {
        [&self.surname, &self.first_name]
            .iter()
            .any(|s| s.as_deref().is_some_and(|s| s.contains(ABANDON_MARKER)))
            || self.partner.as_ref().is_some_and(|p| p.mentions_abandon())
    }
}

/// A participant is either structured or a bare display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantRef {
    Detailed(ParticipantDetail),
    Label(String),
}

impl ParticipantRef {
    pub fn detail(&self) -> Option<&ParticipantDetail> {
        match self {
            ParticipantRef::Detailed(d) => Some(d),
            ParticipantRef::Label(_) => None,
        }
    }

    fn mentions_abandon(&self) -> bool {
        match self {
            ParticipantRef::Detailed(d) => d.mentions_abandon(),
            ParticipantRef::Label(l) => l.contains(ABANDON_MARKER),
        }
    }
}

/// One singles or doubles game ("rencontre").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(rename = "numero", default, deserialize_with = "lenient_u32")]
    pub number: u32,

    #[serde(rename = "type", default, deserialize_with = "lenient_opt_string")]
    pub kind_label: Option<String>,

    #[serde(rename = "joueur_a", default)]
    pub participant_a: Option<ParticipantRef>,

    #[serde(rename = "joueur_x", default)]
    pub participant_x: Option<ParticipantRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<SetScore>,

    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub score_a: Option<i64>,

    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub score_x: Option<i64>,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub score_match: Option<String>,

    #[serde(rename = "abandon", default, deserialize_with = "null_as_default")]
    pub abandoned: bool,
}

impl Encounter {
    pub fn participant(&self, side: Side) -> Option<&ParticipantRef> {
        match side {
            Side::A => self.participant_a.as_ref(),
            Side::X => self.participant_x.as_ref(),
        }
    }

    pub fn kind(&self) -> EncounterKind {
        if let Some(label) = self.kind_label.as_deref() {
            match label.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
                Some('d') => return EncounterKind::Doubles,
                Some('s') => return EncounterKind::Singles,
                _ => {}
            }
        }
        let composite = Side::BOTH.iter().any(|side| {
            self.participant(*side)
                .and_then(ParticipantRef::detail)
                .is_some_and(ParticipantDetail::is_composite)
        });
        if composite {
            EncounterKind::Doubles
        } else {
            EncounterKind::Singles
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
            || Side::BOTH.iter().any(|side| {
                self.participant(*side)
                    .is_some_and(ParticipantRef::mentions_abandon)
            })
    }

    /// Sets won by each side, level sets ignored.
    pub fn set_tally(&self) -> (u32, u32) {
        self.sets
            .iter()
            .fold((0, 0), |(a, x), set| match set.winner() {
                Some(Side::A) => (a + 1, x),
                Some(Side::X) => (a, x + 1),
                None => (a, x),
            })
    }

    /// Encounter-level score (`1-0`), from explicit fields or `score_match`.
    pub fn encounter_score(&self) -> Option<(i64, i64)> {
        if let (Some(a), Some(x)) = (self.score_a, self.score_x) {
            return Some((a, x));
        }
        let (a, x) = self.score_match.as_deref()?.split_once('-')?;
        Some((a.trim().parse().ok()?, x.trim().parse().ok()?))
    }

    /// Winner by set majority, falling back to the encounter-level score.
    pub fn winner(&self) -> Option<Side> {
        let (a, x) = self.set_tally();
        if a != x {
            return Some(if a > x { Side::A } else { Side::X });
        }
        let (a, x) = self.encounter_score()?;
        match a.cmp(&x) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::X),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One team-vs-team fixture of a journée.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Match {
    /// Club team code, e.g. `TTSH3`
    #[serde(rename = "equipe_ttsh", default, deserialize_with = "lenient_opt_string")]
    pub team_code: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub expected_matches: Option<i64>,

    #[serde(rename = "equipes", default)]
    pub teams: Teams,

    #[serde(rename = "resultat_global", default)]
    pub score: TeamScore,

    #[serde(rename = "rencontres", default, deserialize_with = "null_as_default")]
    pub encounters: Vec<Encounter>,
}

impl Match {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.teams.a,
            Side::X => &self.teams.x,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    pub fn expected_encounters(&self) -> u32 {
        self.expected_matches
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_EXPECTED_ENCOUNTERS)
    }

    /// Sets won by each side over all encounters.
    pub fn set_totals(&self) -> (u32, u32) {
        self.encounters.iter().fold((0, 0), |(a, x), e| {
            let (ea, ex) = e.set_tally();
            (a + ea, x + ex)
        })
    }
}

/// The matches of one playing day.
#[derive(Debug, Clone)]
pub struct Journee {
    pub id: JourneeId,
    pub matches: Vec<Match>,
}

impl Journee {
    /// Date of the day: from the identifier, else the first dated match.
    pub fn date(&self) -> Option<NaiveDate> {
        self.id
            .date()
            .or_else(|| self.matches.iter().find_map(Match::parsed_date))
    }
}

/// Everything loaded for a session: the baseline plus every journée that loaded.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub baseline: Baseline,
    journees: Vec<Journee>,
}

impl Corpus {
    /// Journées are kept in chronological order.
    pub fn new(baseline: Baseline, mut journees: Vec<Journee>) -> Self {
        journees.sort_by(|a, b| a.id.cmp(&b.id));
        Self { baseline, journees }
    }

    pub fn journees(&self) -> &[Journee] {
        &self.journees
    }

    pub fn journee(&self, id: &JourneeId) -> Option<&Journee> {
        self.journees.iter().find(|j| &j.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter(json: serde_json::Value) -> Encounter {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_set_score_key_variants() {
        let set: SetScore = serde_json::from_str(r#"{"score_a": 11, "score_x": 7}"#).unwrap();
        assert_eq!(set.winner(), Some(Side::A));

        let set: SetScore = serde_json::from_str(r#"{"equipe_a": "9", "equipe_x": 11}"#).unwrap();
        assert_eq!(set.winner(), Some(Side::X));
    }

    #[test]
    fn test_level_set_has_no_winner() {
        assert_eq!(SetScore::new(10, 10).winner(), None);
    }

    #[test]
    fn test_encounter_winner_by_sets() {
        let e = encounter(serde_json::json!({
            "numero": 1,
            "sets": [
                {"equipe_a": 11, "equipe_x": 5},
                {"equipe_a": 8, "equipe_x": 11},
                {"equipe_a": 11, "equipe_x": 9},
                {"equipe_a": 12, "equipe_x": 10}
            ]
        }));
        assert_eq!(e.set_tally(), (3, 1));
        assert_eq!(e.winner(), Some(Side::A));
    }

    #[test]
    fn test_encounter_winner_falls_back_to_score_match() {
        let e = encounter(serde_json::json!({"numero": 2, "sets": null, "score_match": "0-1"}));
        assert_eq!(e.set_tally(), (0, 0));
        assert_eq!(e.winner(), Some(Side::X));
    }

    #[test]
    fn test_encounter_without_result() {
        let e = encounter(serde_json::json!({"numero": 3}));
        assert_eq!(e.winner(), None);
    }

    #[test]
    fn test_encounter_kind_from_label_and_shape() {
        let labelled = encounter(serde_json::json!({"type": "double"}));
        assert_eq!(labelled.kind(), EncounterKind::Doubles);

        let composite = encounter(serde_json::json!({
            "joueur_a": {"lettre": "A/B", "nom": "DUPONT"}
        }));
        assert_eq!(composite.kind(), EncounterKind::Doubles);

        let single = encounter(serde_json::json!({
            "joueur_a": {"lettre": "A", "nom": "DUPONT", "prenom": "Jean"},
            "joueur_x": "MARTIN Paul"
        }));
        assert_eq!(single.kind(), EncounterKind::Singles);
    }

    #[test]
    fn test_abandon_detection() {
        let flagged = encounter(serde_json::json!({"abandon": true}));
        assert!(flagged.is_abandoned());

        let labelled = encounter(serde_json::json!({"joueur_x": "MARTIN Paul (A)"}));
        assert!(labelled.is_abandoned());

        let clean = encounter(serde_json::json!({"joueur_x": "MARTIN Paul"}));
        assert!(!clean.is_abandoned());
    }

    #[test]
    fn test_participant_codes() {
        let detail: ParticipantDetail = serde_json::from_value(serde_json::json!({
            "lettre": "A & C",
            "joueur2": {"lettre": "D"}
        }))
        .unwrap();
        assert_eq!(detail.codes(), (Some("A".to_string()), Some("D".to_string())));

        let composite_only: ParticipantDetail =
            serde_json::from_value(serde_json::json!({"lettre": "B/E"})).unwrap();
        assert_eq!(
            composite_only.codes(),
            (Some("B".to_string()), Some("E".to_string()))
        );
    }

    #[test]
    fn test_match_lenient_fields() {
        let m: Match = serde_json::from_value(serde_json::json!({
            "equipe_ttsh": "TTSH2",
            "equipes": {
                "equipe_a": {"nom": null, "joueurs": [{"lettre": "A", "nom": "X", "prenom": "y", "points": "612"}]},
                "equipe_x": {"nom": "ST HERBLAIN TT 2", "joueurs": null}
            },
            "resultat_global": {"equipe_a": 8, "equipe_x": "12"},
            "rencontres": []
        }))
        .unwrap();

        assert_eq!(m.team(Side::A).name, None);
        assert_eq!(m.team(Side::A).players[0].points, 612);
        assert!(m.team(Side::X).players.is_empty());
        assert_eq!(m.score, TeamScore { a: 8, x: 12 });
        assert_eq!(m.expected_encounters(), 20);
    }

    #[test]
    fn test_match_date_formats() {
        let mut m = Match {
            date: Some("12/10/2025".to_string()),
            ..Match::default()
        };
        assert_eq!(m.parsed_date(), NaiveDate::from_ymd_opt(2025, 10, 12));
        m.date = Some("2025-11-16".to_string());
        assert_eq!(m.parsed_date(), NaiveDate::from_ymd_opt(2025, 11, 16));
    }

    #[test]
    fn test_team_player_lookup() {
        let team = Team {
            name: Some("ST HERBLAIN".to_string()),
            players: vec![Player {
                code: Some("B".to_string()),
                surname: "Durand".to_string(),
                first_name: "ANNE".to_string(),
                licence: None,
                points: 700,
            }],
        };
        assert!(team.player_by_code("b").is_some());
        assert!(team.player_by_code("C").is_none());
        assert!(team.player_by_id(&PlayerId::parse("Anne DURAND")).is_some());
    }
}
