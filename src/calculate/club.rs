//! Club-level figures: team record, set distribution, match summaries.

use crate::classify::ClubMatcher;
use crate::models::{Match, MatchSummary, Record, SetDistribution, Side};

use super::calculate_percentage;

/// First tracked side of a fixture; side A wins for intra-club fixtures.
fn club_side(fixture: &Match, club: &ClubMatcher) -> Option<Side> {
    club.tracked_sides(fixture).into_iter().next()
}

/// Team-match wins, draws and losses of the club by aggregate score.
pub fn club_record<'a, I>(matches: I, club: &ClubMatcher) -> Record
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut record = Record::default();

    for fixture in matches {
        let Some(side) = club_side(fixture, club) else {
            continue;
        };
        let own = fixture.score.for_side(side);
        let other = fixture.score.for_side(side.opposite());
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => record.wins += 1,
            std::cmp::Ordering::Less => record.losses += 1,
            std::cmp::Ordering::Equal => record.draws += 1,
        }
    }

    record
}

/// Club encounters won and lost, bucketed by 3, 4 or 5 decided sets.
pub fn set_distribution<'a, I>(matches: I, club: &ClubMatcher) -> SetDistribution
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut dist = SetDistribution::default();

    for fixture in matches {
        let Some(side) = club_side(fixture, club) else {
            continue;
        };
        for encounter in &fixture.encounters {
            let (a, x) = encounter.set_tally();
            let (own, other) = match side {
                Side::A => (a, x),
                Side::X => (x, a),
            };
            let bucket = match own + other {
                3 => &mut dist.three_sets,
                4 => &mut dist.four_sets,
                5 => &mut dist.five_sets,
                _ => continue,
            };
            if own > other {
                bucket.wins += 1;
            } else {
                bucket.losses += 1;
            }
        }
    }

    let wins = dist.three_sets.wins + dist.four_sets.wins + dist.five_sets.wins;
    let losses = dist.three_sets.losses + dist.four_sets.losses + dist.five_sets.losses;
    dist.win_percentage = calculate_percentage(wins, wins + losses);
    dist
}

/// Team number following the club prefix (`TTSH3` -> 3).
pub fn team_number(code: Option<&str>, prefix: &str) -> Option<u32> {
    let code = code?.trim();
    let rest = code.strip_prefix(prefix).unwrap_or(code);
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Summary line of the fixture found at `index` in its journée.
pub fn match_summary(index: usize, fixture: &Match) -> MatchSummary {
    let (sets_a, sets_x) = fixture.set_totals();
    MatchSummary {
        index,
        team_code: fixture.team_code.clone(),
        team_a: fixture.teams.a.name.clone(),
        team_x: fixture.teams.x.name.clone(),
        score: fixture.score,
        players_a: fixture.teams.a.players.len(),
        players_x: fixture.teams.x.players.len(),
        encounters_played: fixture.encounters.len(),
        encounters_expected: fixture.expected_encounters(),
        sets_a,
        sets_x,
    }
}

/// One summary line per fixture, ordered by club team number.
pub fn match_summaries(matches: &[Match], prefix: &str) -> Vec<MatchSummary> {
    let mut summaries: Vec<MatchSummary> = matches
        .iter()
        .enumerate()
        .map(|(index, fixture)| match_summary(index, fixture))
        .collect();

    summaries.sort_by_key(|s| team_number(s.team_code.as_deref(), prefix).unwrap_or(u32::MAX));
    summaries
}
