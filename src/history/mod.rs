//! Drill-downs: every encounter of one player match by match, or one
//! fixture in full.

mod matches;

pub use matches::match_detail;

use crate::classify::{classify, ClassifiedEncounter, ClubMatcher};
use crate::models::{
    EncounterDetail, EncounterKind, Journee, MatchParticipation, Outcome, ParticipantRef,
    PlayerId, ABANDON_MARKER,
};

/// Encounters of `player` across the given journées.
///
/// Journées are visited in the order given and matches in corpus order.
/// Matches where the player has no resolved encounter are left out.
pub fn player_history<'a, I>(
    journees: I,
    club: &ClubMatcher,
    player: &PlayerId,
) -> Vec<MatchParticipation>
where
    I: IntoIterator<Item = &'a Journee>,
{
    let mut history = Vec::new();

    for journee in journees {
        for fixture in &journee.matches {
            let encounters: Vec<EncounterDetail> = fixture
                .encounters
                .iter()
                .flat_map(|encounter| classify(club, fixture, encounter))
                .filter_map(|classified| encounter_detail(&classified, player))
                .collect();

            if encounters.is_empty() {
                continue;
            }

            history.push(MatchParticipation {
                journee: journee.id.clone(),
                date: fixture.parsed_date().or_else(|| journee.date()),
                team_code: fixture.team_code.clone(),
                team_a: fixture.teams.a.name.clone(),
                team_x: fixture.teams.x.name.clone(),
                score: fixture.score,
                encounters,
            });
        }
    }

    history
}

fn encounter_detail(classified: &ClassifiedEncounter<'_>, player: &PlayerId) -> Option<EncounterDetail> {
    let slot = classified.own.slot_of(player)?;
    let encounter = classified.encounter;
    let side = classified.side;

    let partner = match classified.kind {
        EncounterKind::Doubles => classified.own.partner_of(slot).map(|p| p.id()),
        EncounterKind::Singles => None,
    };

    let mut opponents: Vec<PlayerId> = classified.opponents.players().map(|(_, p)| p.id()).collect();
    if opponents.is_empty() {
        opponents = written_names(encounter.participant(side.opposite()));
    }

    let (sets_won, sets_lost) = classified.set_tally();
    let outcome = match classified.won() {
        Some(true) => Outcome::Won,
        Some(false) => Outcome::Lost,
        None => Outcome::Undecided,
    };

    Some(EncounterDetail {
        number: encounter.number,
        kind: classified.kind,
        partner,
        opponents,
        set_scores: encounter
            .sets
            .iter()
            .map(|s| (s.points(side), s.points(side.opposite())))
            .collect(),
        sets_won,
        sets_lost,
        outcome,
        abandoned: encounter.is_abandoned(),
    })
}

/// Names written on a participant, used when the roster has no match.
pub(crate) fn written_names(participant: Option<&ParticipantRef>) -> Vec<PlayerId> {
    let names = match participant {
        None => Vec::new(),
        Some(ParticipantRef::Detailed(detail)) => {
            let partner = detail.partner.as_ref().and_then(|p| p.name_id());
            detail.name_id().into_iter().chain(partner).collect()
        }
        Some(ParticipantRef::Label(label)) => {
            vec![PlayerId::parse(&label.replace(ABANDON_MARKER, ""))]
        }
    };
    names.into_iter().filter(|id| !id.is_empty()).collect()
}
