//! Fixture builders shared by unit tests.

use serde_json::{json, Value};

use crate::classify::ClubMatcher;
use crate::models::Match;

pub(crate) const CLUB_TEAM: &str = "ST HERBLAIN TT 1";
pub(crate) const OTHER_TEAM: &str = "REZE TT 3";

pub(crate) fn club() -> ClubMatcher {
    ClubMatcher::new(["HERBLAIN", "TTSH"])
}

pub(crate) fn player(code: &str, first: &str, surname: &str, points: i64) -> Value {
    json!({"lettre": code, "prenom": first, "nom": surname, "licence": "4412345", "points": points})
}

/// Sets where side A wins `a` sets first, then side X wins `x` sets.
pub(crate) fn sets(a: u32, x: u32) -> Value {
    let mut out = Vec::new();
    out.extend((0..a).map(|_| json!({"equipe_a": 11, "equipe_x": 7})));
    out.extend((0..x).map(|_| json!({"equipe_a": 7, "equipe_x": 11})));
    Value::Array(out)
}

pub(crate) fn singles(number: u32, a: &str, x: &str, a_sets: u32, x_sets: u32) -> Value {
    json!({
        "numero": number,
        "type": "simple",
        "joueur_a": {"lettre": a},
        "joueur_x": {"lettre": x},
        "sets": sets(a_sets, x_sets)
    })
}

pub(crate) fn doubles(
    number: u32,
    a: (&str, &str),
    x: (&str, &str),
    a_sets: u32,
    x_sets: u32,
) -> Value {
    json!({
        "numero": number,
        "type": "double",
        "joueur_a": {"lettre": format!("{}/{}", a.0, a.1), "joueur2": {"lettre": a.1}},
        "joueur_x": {"lettre": format!("{}/{}", x.0, x.1), "joueur2": {"lettre": x.1}},
        "sets": sets(a_sets, x_sets)
    })
}

/// Club roster: Jean DUPONT 1000, Anne DURAND 800, Marc LEROY 600.
pub(crate) fn club_roster() -> Vec<Value> {
    vec![
        player("A", "Jean", "DUPONT", 1000),
        player("B", "Anne", "DURAND", 800),
        player("C", "Marc", "LEROY", 600),
    ]
}

/// Opponents: Paul MARTIN 1010, Luc PETIT 1025, Hugo ROUX 995, Eva BLANC 1005.
pub(crate) fn other_roster() -> Vec<Value> {
    vec![
        player("W", "Paul", "MARTIN", 1010),
        player("X", "Luc", "PETIT", 1025),
        player("Y", "Hugo", "ROUX", 995),
        player("Z", "Eva", "BLANC", 1005),
    ]
}

/// Club at home (side A) against the default opponent.
pub(crate) fn home_fixture(code: &str, score: (u32, u32), encounters: Vec<Value>) -> Match {
    fixture(
        code,
        (CLUB_TEAM, club_roster()),
        (OTHER_TEAM, other_roster()),
        score,
        encounters,
    )
}

pub(crate) fn fixture(
    code: &str,
    a: (&str, Vec<Value>),
    x: (&str, Vec<Value>),
    score: (u32, u32),
    encounters: Vec<Value>,
) -> Match {
    serde_json::from_value(json!({
        "equipe_ttsh": code,
        "date": "2025-10-12",
        "equipes": {
            "equipe_a": {"nom": a.0, "joueurs": a.1},
            "equipe_x": {"nom": x.0, "joueurs": x.1}
        },
        "resultat_global": {"equipe_a": score.0, "equipe_x": score.1},
        "rencontres": encounters
    }))
    .unwrap()
}
