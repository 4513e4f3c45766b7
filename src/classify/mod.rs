//! Encounter classification.
//!
//! Decides which side of a fixture belongs to the tracked club and resolves
//! the participants of an encounter against the team rosters.

use crate::models::{
    Encounter, EncounterKind, Match, ParticipantDetail, ParticipantRef, Player, PlayerId, Side,
    Team, ABANDON_MARKER,
};

/// Recognizes the tracked club by substring of the team name.
#[derive(Debug, Clone)]
pub struct ClubMatcher {
    variants: Vec<String>,
}

impl ClubMatcher {
    pub fn new<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let variants = variants
            .into_iter()
            .map(|v| v.as_ref().trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .collect();
        Self { variants }
    }

    /// A missing team name never matches.
    pub fn is_club(&self, team_name: Option<&str>) -> bool {
        let Some(name) = team_name else {
            return false;
        };
        let name = name.to_uppercase();
        self.variants.iter().any(|v| name.contains(v.as_str()))
    }

    /// Sides of the fixture fielded by the club, A first.
    pub fn tracked_sides(&self, fixture: &Match) -> Vec<Side> {
        Side::BOTH
            .into_iter()
            .filter(|side| self.is_club(fixture.team(*side).name.as_deref()))
            .collect()
    }
}

/// Position inside a doubles pair; singles only use `First`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Roster players behind one participant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved<'a> {
    pub first: Option<&'a Player>,
    pub second: Option<&'a Player>,
}

impl<'a> Resolved<'a> {
    pub fn get(&self, slot: Slot) -> Option<&'a Player> {
        match slot {
            Slot::First => self.first,
            Slot::Second => self.second,
        }
    }

    /// Resolved players with their slot, first slot first.
    pub fn players(&self) -> impl Iterator<Item = (Slot, &'a Player)> {
        [(Slot::First, self.first), (Slot::Second, self.second)]
            .into_iter()
            .filter_map(|(slot, player)| player.map(|p| (slot, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// Player facing `slot`: the same slot when resolved, else the first resolved one.
    pub fn facing(&self, slot: Slot) -> Option<&'a Player> {
        self.get(slot).or_else(|| self.players().next().map(|(_, p)| p))
    }

    /// The other member of the pair.
    pub fn partner_of(&self, slot: Slot) -> Option<&'a Player> {
        match slot {
            Slot::First => self.second,
            Slot::Second => self.first,
        }
    }

    pub fn slot_of(&self, id: &PlayerId) -> Option<Slot> {
        self.players()
            .find(|(_, p)| &p.id() == id)
            .map(|(slot, _)| slot)
    }
}

/// An encounter seen from one tracked side.
#[derive(Debug, Clone)]
pub struct ClassifiedEncounter<'a> {
    pub encounter: &'a Encounter,
    pub kind: EncounterKind,
    pub side: Side,
    pub own: Resolved<'a>,
    pub opponents: Resolved<'a>,
}

impl ClassifiedEncounter<'_> {
    /// Sets won and lost by the tracked side.
    pub fn set_tally(&self) -> (u32, u32) {
        let (a, x) = self.encounter.set_tally();
        match self.side {
            Side::A => (a, x),
            Side::X => (x, a),
        }
    }

    /// `Some(true)` when the tracked side won, `None` when undecided.
    pub fn won(&self) -> Option<bool> {
        self.encounter.winner().map(|w| w == self.side)
    }
}

/// Classify an encounter for every tracked side of the fixture.
///
/// Returns nothing when the club is on neither side. A side whose
/// participant cannot be resolved to any roster player is left out.
pub fn classify<'a>(
    club: &ClubMatcher,
    fixture: &'a Match,
    encounter: &'a Encounter,
) -> Vec<ClassifiedEncounter<'a>> {
    let kind = encounter.kind();

    club.tracked_sides(fixture)
        .into_iter()
        .filter_map(|side| {
            let own = resolve(fixture.team(side), encounter.participant(side), kind);
            if own.is_empty() {
                return None;
            }
            let opponents = resolve(
                fixture.team(side.opposite()),
                encounter.participant(side.opposite()),
                kind,
            );
            Some(ClassifiedEncounter {
                encounter,
                kind,
                side,
                own,
                opponents,
            })
        })
        .collect()
}

/// Resolve a participant against its team roster.
pub fn resolve<'a>(
    team: &'a Team,
    participant: Option<&ParticipantRef>,
    kind: EncounterKind,
) -> Resolved<'a> {
    match participant {
        None => Resolved::default(),
        Some(ParticipantRef::Label(label)) => match kind {
            EncounterKind::Singles => Resolved {
                first: team.player_by_id(&PlayerId::parse(&label.replace(ABANDON_MARKER, ""))),
                second: None,
            },
            EncounterKind::Doubles => Resolved::default(),
        },
        Some(ParticipantRef::Detailed(detail)) => resolve_detail(team, detail, kind),
    }
}

/// A written roster code is authoritative: when it does not resolve, the
/// participant is skipped. Names are only consulted when no code is written.
fn resolve_detail<'a>(
    team: &'a Team,
    detail: &ParticipantDetail,
    kind: EncounterKind,
) -> Resolved<'a> {
    let (first_code, second_code) = detail.codes();

    let first = match first_code {
        Some(code) => team.player_by_code(&code),
        None => detail.name_id().and_then(|id| team.player_by_id(&id)),
    };

    let second = match kind {
        EncounterKind::Singles => None,
        EncounterKind::Doubles => match second_code {
            Some(code) => team.player_by_code(&code),
            None => detail
                .partner
                .as_ref()
                .and_then(|p| p.name_id())
                .and_then(|id| team.player_by_id(&id)),
        },
    };

    Resolved { first, second }
}
