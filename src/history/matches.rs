use crate::calculate::{match_summary, set_distribution};
use crate::classify::{resolve, ClubMatcher};
use crate::models::{
    Encounter, EncounterLine, Journee, Match, MatchDetail, Outcome, PlayerId, RosterEntry, Side,
    Team,
};

use super::written_names;

/// Full detail of the fixture at `index` in journée document order.
///
/// Club figures follow the first tracked side, side A for intra-club fixtures.
pub fn match_detail(journee: &Journee, index: usize, club: &ClubMatcher) -> Option<MatchDetail> {
    let fixture = journee.matches.get(index)?;
    let club_side = club.tracked_sides(fixture).into_iter().next();

    Some(MatchDetail {
        journee: journee.id.clone(),
        date: fixture.parsed_date().or_else(|| journee.date()),
        club_side,
        summary: match_summary(index, fixture),
        roster_a: roster(&fixture.teams.a),
        roster_x: roster(&fixture.teams.x),
        encounters: fixture
            .encounters
            .iter()
            .map(|encounter| encounter_line(fixture, encounter, club_side))
            .collect(),
        sets: set_distribution(std::iter::once(fixture), club),
    })
}

fn roster(team: &Team) -> Vec<RosterEntry> {
    team.players
        .iter()
        .map(|p| RosterEntry {
            code: p.code.clone(),
            name: p.id(),
            licence: p.licence.clone(),
            points: p.points,
        })
        .collect()
}

/// Roster players behind one side, else the names written on the encounter.
fn participants(fixture: &Match, encounter: &Encounter, side: Side) -> Vec<PlayerId> {
    let participant = encounter.participant(side);
    let resolved = resolve(fixture.team(side), participant, encounter.kind());
    if resolved.is_empty() {
        return written_names(participant);
    }
    resolved.players().map(|(_, p)| p.id()).collect()
}

fn encounter_line(fixture: &Match, encounter: &Encounter, club_side: Option<Side>) -> EncounterLine {
    let (sets_a, sets_x) = encounter.set_tally();
    let club_outcome = match (club_side, encounter.winner()) {
        (Some(side), Some(winner)) if side == winner => Outcome::Won,
        (Some(_), Some(_)) => Outcome::Lost,
        _ => Outcome::Undecided,
    };

    EncounterLine {
        number: encounter.number,
        kind: encounter.kind(),
        players_a: participants(fixture, encounter, Side::A),
        players_x: participants(fixture, encounter, Side::X),
        set_scores: encounter
            .sets
            .iter()
            .map(|s| (s.points(Side::A), s.points(Side::X)))
            .collect(),
        sets_a,
        sets_x,
        abandoned: encounter.is_abandoned(),
        club_outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncounterKind, JourneeId, WinLoss};
    use crate::testing::{
        club, club_roster, doubles, fixture, home_fixture, other_roster, singles, CLUB_TEAM,
        OTHER_TEAM,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(ids: &[PlayerId]) -> Vec<&str> {
        ids.iter().map(|id| id.as_str()).collect()
    }

    fn journee() -> Journee {
        let abandoned = json!({
            "numero": 3,
            "joueur_a": {"lettre": "C"},
            "joueur_x": "GIRARD Tom (A)",
            "sets": []
        });
        Journee {
            id: JourneeId::from("J3_20251012"),
            matches: vec![
                home_fixture("TTSH1", (10, 10), vec![singles(1, "B", "Y", 3, 0)]),
                home_fixture(
                    "TTSH2",
                    (12, 8),
                    vec![
                        singles(1, "A", "W", 3, 1),
                        doubles(2, ("A", "B"), ("W", "X"), 2, 3),
                        abandoned,
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_match_detail_rosters_and_summary() {
        let detail = match_detail(&journee(), 1, &club()).unwrap();

        assert_eq!(detail.journee, JourneeId::from("J3_20251012"));
        assert_eq!(detail.club_side, Some(Side::A));
        assert_eq!(detail.summary.index, 1);
        assert_eq!(detail.summary.team_code.as_deref(), Some("TTSH2"));
        assert_eq!(detail.roster_a.len(), 3);
        assert_eq!(detail.roster_x.len(), 4);
        assert_eq!(
            detail.roster_a[0],
            RosterEntry {
                code: Some("A".to_string()),
                name: PlayerId::parse("Jean DUPONT"),
                licence: Some("4412345".to_string()),
                points: 1000,
            }
        );
    }

    #[test]
    fn test_match_detail_encounters() {
        let detail = match_detail(&journee(), 1, &club()).unwrap();
        assert_eq!(detail.encounters.len(), 3);

        let first = &detail.encounters[0];
        assert_eq!(names(&first.players_a), vec!["Jean DUPONT"]);
        assert_eq!(names(&first.players_x), vec!["Paul MARTIN"]);
        assert_eq!(first.set_scores, vec![(11, 7), (11, 7), (11, 7), (7, 11)]);
        assert_eq!((first.sets_a, first.sets_x), (3, 1));
        assert_eq!(first.club_outcome, Outcome::Won);
        assert!(!first.abandoned);

        let pair = &detail.encounters[1];
        assert_eq!(pair.kind, EncounterKind::Doubles);
        assert_eq!(names(&pair.players_a), vec!["Jean DUPONT", "Anne DURAND"]);
        assert_eq!(names(&pair.players_x), vec!["Paul MARTIN", "Luc PETIT"]);
        assert_eq!(pair.club_outcome, Outcome::Lost);
    }

    #[test]
    fn test_match_detail_abandoned_encounter() {
        let detail = match_detail(&journee(), 1, &club()).unwrap();
        let abandoned = &detail.encounters[2];

        assert!(abandoned.abandoned);
        assert_eq!(names(&abandoned.players_a), vec!["Marc LEROY"]);
        assert_eq!(names(&abandoned.players_x), vec!["Tom GIRARD"]);
        assert!(abandoned.set_scores.is_empty());
        assert_eq!(abandoned.club_outcome, Outcome::Undecided);
    }

    #[test]
    fn test_match_detail_set_distribution_covers_one_fixture() {
        let detail = match_detail(&journee(), 1, &club()).unwrap();

        assert_eq!(detail.sets.three_sets, WinLoss::default());
        assert_eq!(detail.sets.four_sets, WinLoss { wins: 1, losses: 0 });
        assert_eq!(detail.sets.five_sets, WinLoss { wins: 0, losses: 1 });
        assert_eq!(detail.sets.win_percentage, 50);
    }

    #[test]
    fn test_match_detail_club_away() {
        let away = Journee {
            id: JourneeId::from("J4_20251116"),
            matches: vec![fixture(
                "TTSH3",
                (OTHER_TEAM, other_roster()),
                (CLUB_TEAM, club_roster()),
                (8, 12),
                vec![singles(1, "W", "A", 3, 0)],
            )],
        };
        let detail = match_detail(&away, 0, &club()).unwrap();

        assert_eq!(detail.club_side, Some(Side::X));
        assert_eq!(names(&detail.encounters[0].players_a), vec!["Paul MARTIN"]);
        assert_eq!(detail.encounters[0].club_outcome, Outcome::Lost);
        assert_eq!(detail.sets.three_sets, WinLoss { wins: 0, losses: 1 });
    }

    #[test]
    fn test_match_detail_out_of_range() {
        assert!(match_detail(&journee(), 2, &club()).is_none());
    }
}
