use crate::data::{MatchRow, Table, TournamentLayout};
use crate::finals::{resolve_finish, seed_finals, FinalsError, FinishOrder};
use crate::ranking::{RankingOrder, RankingPolicy};
use crate::schedule::seed_singles;
use crate::score::{parse_score, Outcome};
use crate::standings::Standings;

/// Row data of the three match tables. This is the only state the
/// recomputation reads; everything else is derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoresheet {
    pub doubles: Vec<MatchRow>,
    pub singles: Vec<MatchRow>,
    pub finals: Vec<MatchRow>,
    /// Set once the finals have been seeded; the bracket then only changes
    /// through finals score edits.
    pub finals_locked: bool,
}

/// Output of one recomputation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputed {
    pub standings: Standings,
    pub doubles_ranking: RankingOrder,
    pub overall_ranking: RankingOrder,
    pub singles_seeded: bool,
    pub finals_ready: bool,
}

impl Scoresheet {
    pub fn from_layout(layout: TournamentLayout) -> Self {
        Self {
            doubles: layout.doubles,
            singles: layout.singles,
            finals: layout.finals,
            finals_locked: false,
        }
    }

    pub fn rows(&self, table: Table) -> &[MatchRow] {
        match table {
            Table::Doubles => &self.doubles,
            Table::Singles => &self.singles,
            Table::Finals => &self.finals,
        }
    }

    pub fn rows_mut(&mut self, table: Table) -> &mut Vec<MatchRow> {
        match table {
            Table::Doubles => &mut self.doubles,
            Table::Singles => &mut self.singles,
            Table::Finals => &mut self.finals,
        }
    }

    /// Appends a blank row. The finals table has a fixed size.
    pub fn add_row(&mut self, table: Table) -> bool {
        if table == Table::Finals {
            return false;
        }
        self.rows_mut(table).push(MatchRow::blank(table));
        true
    }

    /// Full pass over the doubles and singles tables.
    ///
    /// The singles schedule is seeded before singles rows are tallied or
    /// labelled, so running this again on its own output changes nothing.
    pub fn recompute(&mut self) -> Recomputed {
        let doubles_only = Standings::compute(&self.doubles, &[]);
        let doubles_ranking = RankingOrder::rank(&doubles_only, RankingPolicy::Doubles);
        let singles_seeded = seed_singles(&doubles_ranking, &mut self.singles);

        let standings = Standings::compute(&self.doubles, &self.singles);
        let doubles_ranking = RankingOrder::rank(&standings, RankingPolicy::Doubles);
        let overall_ranking = RankingOrder::rank(&standings, RankingPolicy::Overall);

        for table in [Table::Doubles, Table::Singles, Table::Finals] {
            label_winners(self.rows_mut(table));
        }

        Recomputed {
            standings,
            doubles_ranking,
            overall_ranking,
            singles_seeded,
            finals_ready: has_score(&self.doubles) && has_score(&self.singles),
        }
    }

    /// Seeds the finals from `overall` and locks the bracket.
    pub fn lock_finals(&mut self, overall: &RankingOrder) -> Result<(), FinalsError> {
        seed_finals(overall, &mut self.finals)?;
        self.finals_locked = true;
        label_winners(&mut self.finals);
        Ok(())
    }

    /// Finals-only pass run on finals score edits.
    pub fn refresh_finals(&mut self) -> Option<FinishOrder> {
        label_winners(&mut self.finals);
        resolve_finish(&self.finals)
    }
}

/// `"Team N"` for the winner, `"Tie"`, or empty when the score does not parse.
pub fn winner_label(row: &MatchRow) -> String {
    match parse_score(&row.score).map(|score| score.outcome()) {
        Some(Outcome::AWins) => row.team_a.label(),
        Some(Outcome::BWins) => row.team_b.label(),
        Some(Outcome::Tie) => "Tie".to_string(),
        None => String::new(),
    }
}

fn label_winners(rows: &mut [MatchRow]) {
    for row in rows {
        row.winner = winner_label(row);
    }
}

fn has_score(rows: &[MatchRow]) -> bool {
    rows.iter().any(|row| !row.score.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TeamId;

    fn team(n: u8) -> TeamId {
        TeamId::new(n).unwrap()
    }

    fn sheet() -> Scoresheet {
        Scoresheet::from_layout(TournamentLayout::builtin())
    }

    fn score(sheet: &mut Scoresheet, table: Table, index: usize, value: &str) {
        sheet.rows_mut(table)[index].score = value.to_string();
    }

    #[test]
    fn labels_follow_scores() {
        let mut sheet = sheet();
        score(&mut sheet, Table::Doubles, 0, "6:3");
        score(&mut sheet, Table::Doubles, 1, "2:6");
        score(&mut sheet, Table::Doubles, 2, "4:4");
        score(&mut sheet, Table::Doubles, 3, "bad");
        sheet.recompute();

        let winners: Vec<_> = sheet.doubles[..4].iter().map(|row| row.winner.as_str()).collect();
        assert_eq!(winners, ["Team 1", "Team 4", "Tie", ""]);
    }

    #[test]
    fn clearing_a_score_clears_the_winner() {
        let mut sheet = sheet();
        score(&mut sheet, Table::Doubles, 0, "6:3");
        sheet.recompute();
        score(&mut sheet, Table::Doubles, 0, " ");
        sheet.recompute();
        assert_eq!(sheet.doubles[0].winner, "");
    }

    #[test]
    fn singles_follow_doubles_ranking() {
        let mut sheet = sheet();
        // Team 4 beats team 3; everyone else level.
        score(&mut sheet, Table::Doubles, 1, "0:6");
        let result = sheet.recompute();

        assert!(result.singles_seeded);
        assert_eq!(result.doubles_ranking.at(0), Some(team(4)));
        assert_eq!(sheet.singles[0].team_a, team(4));
        assert_eq!(sheet.singles[0].team_b, team(1));
    }

    #[test]
    fn singles_labels_use_seeded_teams() {
        let mut sheet = sheet();
        score(&mut sheet, Table::Doubles, 1, "0:6");
        score(&mut sheet, Table::Singles, 0, "6:1");
        let result = sheet.recompute();

        assert_eq!(sheet.singles[0].winner, "Team 4");
        assert_eq!(result.standings.get(team(4)).singles_points, 1.0);
    }

    #[test]
    fn second_pass_is_a_fixed_point() {
        let mut sheet = sheet();
        score(&mut sheet, Table::Doubles, 0, "6:3");
        score(&mut sheet, Table::Doubles, 4, "1:6");
        score(&mut sheet, Table::Singles, 2, "4:4");
        score(&mut sheet, Table::Singles, 4, "6:2");

        let first = sheet.recompute();
        let snapshot = sheet.clone();
        let second = sheet.recompute();

        assert_eq!(first, second);
        assert_eq!(sheet, snapshot);
    }

    #[test]
    fn finals_need_a_score_in_both_disciplines() {
        let mut sheet = sheet();
        score(&mut sheet, Table::Doubles, 0, "6:3");
        assert!(!sheet.recompute().finals_ready);
        score(&mut sheet, Table::Singles, 0, "6:3");
        assert!(sheet.recompute().finals_ready);
    }

    #[test]
    fn finals_rows_cannot_be_added() {
        let mut sheet = sheet();
        assert!(!sheet.add_row(Table::Finals));
        assert!(sheet.add_row(Table::Singles));
        assert_eq!(sheet.singles.len(), 6);
        assert_eq!(sheet.finals.len(), 2);
    }

    #[test]
    fn recompute_leaves_locked_finals_teams_alone() {
        let mut sheet = sheet();
        let overall = RankingOrder::from_teams(vec![team(4), team(1), team(5), team(2), team(3)]);
        sheet.lock_finals(&overall).unwrap();
        score(&mut sheet, Table::Doubles, 0, "6:0");
        sheet.recompute();

        assert!(sheet.finals_locked);
        assert_eq!(sheet.finals[1].team_a, team(4));
        assert_eq!(sheet.finals[0].team_b, team(2));
    }

    #[test]
    fn finals_refresh_resolves_placement() {
        let mut sheet = sheet();
        let overall = RankingOrder::from_teams(vec![team(4), team(1), team(5), team(2), team(3)]);
        sheet.lock_finals(&overall).unwrap();

        score(&mut sheet, Table::Finals, 1, "6:2");
        assert_eq!(sheet.refresh_finals(), None);
        assert_eq!(sheet.finals[1].winner, "Team 4");

        score(&mut sheet, Table::Finals, 0, "3:6");
        let order = sheet.refresh_finals().unwrap();
        assert_eq!(order.teams(), [team(4), team(1), team(2), team(5)]);
    }
}
