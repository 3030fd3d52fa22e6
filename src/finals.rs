//! Final-four stage: seed two finals matches from the overall ranking, then
//! turn their results into a finish order.

use crate::data::{MatchRow, TeamId};
use crate::ranking::RankingOrder;
use crate::score::{parse_score, Outcome};
use std::fmt;

/// Row index of the match for third place.
pub const THIRD_PLACE_ROW: usize = 0;
/// Row index of the match for the title.
pub const TITLE_ROW: usize = 1;

const FINALISTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalsError {
    NotEnoughTeams { ranked: usize },
    MissingFinalsRows { found: usize },
}

impl fmt::Display for FinalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalsError::NotEnoughTeams { ranked } => write!(
                f,
                "Not enough teams to determine final matches ({} ranked, {} needed).",
                ranked, FINALISTS
            ),
            FinalsError::MissingFinalsRows { found } => write!(
                f,
                "Finals table not properly set up ({} of 2 matches present).",
                found
            ),
        }
    }
}

/// Writes the top four of `overall` into the finals rows: 3rd v 4th in the
/// first row, 1st v 2nd in the second. Nothing is written on error.
pub fn seed_finals(overall: &RankingOrder, finals: &mut [MatchRow]) -> Result<(), FinalsError> {
    if overall.len() < FINALISTS {
        return Err(FinalsError::NotEnoughTeams {
            ranked: overall.len(),
        });
    }
    if finals.len() <= TITLE_ROW {
        return Err(FinalsError::MissingFinalsRows {
            found: finals.len(),
        });
    }

    let seeds = &overall.teams()[..FINALISTS];
    assign(&mut finals[THIRD_PLACE_ROW], seeds[2], seeds[3], "3rd", "4th");
    assign(&mut finals[TITLE_ROW], seeds[0], seeds[1], "1st", "2nd");
    Ok(())
}

fn assign(row: &mut MatchRow, team_a: TeamId, team_b: TeamId, place_a: &str, place_b: &str) {
    row.team_a = team_a;
    row.team_b = team_b;
    row.matchup = Some(format!(
        "{} place ({}) vs {} place ({})",
        place_a,
        team_a.label(),
        place_b,
        team_b.label()
    ));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishOrder {
    pub champion: TeamId,
    pub runner_up: TeamId,
    pub third: TeamId,
    pub fourth: TeamId,
}

impl FinishOrder {
    pub fn teams(&self) -> [TeamId; 4] {
        [self.champion, self.runner_up, self.third, self.fourth]
    }
}

/// Winner and loser of a decided match; `None` for unplayed or tied rows.
pub fn decided(row: &MatchRow) -> Option<(TeamId, TeamId)> {
    match parse_score(&row.score)?.outcome() {
        Outcome::AWins => Some((row.team_a, row.team_b)),
        Outcome::BWins => Some((row.team_b, row.team_a)),
        Outcome::Tie => None,
    }
}

/// Finish order once both finals have a winner. A tied final has no winner,
/// so it leaves the order unresolved rather than guessing.
pub fn resolve_finish(finals: &[MatchRow]) -> Option<FinishOrder> {
    let (champion, runner_up) = decided(finals.get(TITLE_ROW)?)?;
    let (third, fourth) = decided(finals.get(THIRD_PLACE_ROW)?)?;
    Some(FinishOrder {
        champion,
        runner_up,
        third,
        fourth,
    })
}
