use crate::data::{MatchRow, TeamId, TEAM_COUNT};
use crate::score::{parse_score, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Doubles,
    Singles,
}

impl MatchKind {
    pub fn win_points(self) -> f64 {
        match self {
            MatchKind::Doubles => 2.0,
            MatchKind::Singles => 1.0,
        }
    }

    pub fn tie_points(self) -> f64 {
        self.win_points() / 2.0
    }
}

/// Per-team tallies for one recomputation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamResult {
    pub doubles_points: f64,
    pub singles_points: f64,
    pub doubles_games_won: i64,
    pub doubles_games_lost: i64,
    pub singles_games_won: i64,
    pub singles_games_lost: i64,
    pub total_points: f64,
    pub doubles_diff: i64,
    pub singles_diff: i64,
    pub total_diff: i64,
}

impl TeamResult {
    fn finish(&mut self) {
        self.total_points = self.doubles_points + self.singles_points;
        self.doubles_diff = self.doubles_games_won.saturating_sub(self.doubles_games_lost);
        self.singles_diff = self.singles_games_won.saturating_sub(self.singles_games_lost);
        self.total_diff = self.doubles_diff.saturating_add(self.singles_diff);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    results: [TeamResult; TEAM_COUNT as usize],
}

impl Standings {
    pub fn compute(doubles: &[MatchRow], singles: &[MatchRow]) -> Self {
        let mut standings = Self {
            results: Default::default(),
        };
        standings.fold(doubles, MatchKind::Doubles);
        standings.fold(singles, MatchKind::Singles);
        for result in standings.results.iter_mut() {
            result.finish();
        }
        standings
    }

    pub fn get(&self, team: TeamId) -> &TeamResult {
        &self.results[team.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &TeamResult)> {
        TeamId::all().zip(self.results.iter())
    }

    fn fold(&mut self, rows: &[MatchRow], kind: MatchKind) {
        for row in rows {
            let Some(score) = parse_score(&row.score) else {
                continue;
            };

            let (a, b) = (row.team_a.index(), row.team_b.index());
            self.add_games(a, kind, score.a, score.b);
            self.add_games(b, kind, score.b, score.a);

            match score.outcome() {
                Outcome::AWins => self.add_points(a, kind, kind.win_points()),
                Outcome::BWins => self.add_points(b, kind, kind.win_points()),
                Outcome::Tie => {
                    self.add_points(a, kind, kind.tie_points());
                    self.add_points(b, kind, kind.tie_points());
                }
            }
        }
    }

    fn add_games(&mut self, index: usize, kind: MatchKind, won: i64, lost: i64) {
        let result = &mut self.results[index];
        match kind {
            MatchKind::Doubles => {
                result.doubles_games_won = result.doubles_games_won.saturating_add(won);
                result.doubles_games_lost = result.doubles_games_lost.saturating_add(lost);
            }
            MatchKind::Singles => {
                result.singles_games_won = result.singles_games_won.saturating_add(won);
                result.singles_games_lost = result.singles_games_lost.saturating_add(lost);
            }
        }
    }

    fn add_points(&mut self, index: usize, kind: MatchKind, points: f64) {
        let result = &mut self.results[index];
        match kind {
            MatchKind::Doubles => result.doubles_points += points,
            MatchKind::Singles => result.singles_points += points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(n: u8) -> TeamId {
        TeamId::new(n).unwrap()
    }

    fn row(a: u8, b: u8, score: &str) -> MatchRow {
        let mut row = MatchRow::new(team(a), team(b));
        row.score = score.to_string();
        row
    }

    #[test]
    fn doubles_win_is_worth_two_points() {
        let standings = Standings::compute(&[row(1, 2, "6:3")], &[]);
        let first = standings.get(team(1));
        let second = standings.get(team(2));

        assert_eq!(first.doubles_games_won, 6);
        assert_eq!(first.doubles_games_lost, 3);
        assert_eq!(first.doubles_points, 2.0);
        assert_eq!(second.doubles_points, 0.0);
        assert_eq!(second.doubles_diff, -3);
    }

    #[test]
    fn singles_tie_splits_a_point() {
        let standings = Standings::compute(&[], &[row(3, 5, "4:4")]);
        for n in [3, 5] {
            let result = standings.get(team(n));
            assert_eq!(result.singles_points, 0.5);
            assert_eq!(result.singles_games_won, 4);
            assert_eq!(result.singles_games_lost, 4);
        }
    }

    #[test]
    fn doubles_tie_gives_one_point_each() {
        let standings = Standings::compute(&[row(1, 4, "5:5")], &[]);
        assert_eq!(standings.get(team(1)).doubles_points, 1.0);
        assert_eq!(standings.get(team(4)).doubles_points, 1.0);
    }

    #[test]
    fn unparsed_rows_contribute_nothing() {
        let standings = Standings::compute(&[row(1, 2, ""), row(1, 2, "6-1")], &[row(1, 2, "x:1")]);
        assert!(standings.iter().all(|(_, result)| *result == TeamResult::default()));
    }

    #[test]
    fn totals_combine_both_disciplines() {
        let standings = Standings::compute(
            &[row(1, 2, "6:3"), row(1, 3, "2:6")],
            &[row(1, 2, "6:4")],
        );
        let result = standings.get(team(1));
        assert_eq!(result.total_points, 3.0);
        assert_eq!(result.doubles_diff, -1);
        assert_eq!(result.singles_diff, 2);
        assert_eq!(result.total_diff, 1);
    }

    #[test]
    fn same_team_on_both_sides_is_accepted() {
        let standings = Standings::compute(&[row(2, 2, "6:1")], &[]);
        let result = standings.get(team(2));
        assert_eq!(result.doubles_games_won, 7);
        assert_eq!(result.doubles_games_lost, 7);
        assert_eq!(result.doubles_points, 2.0);
    }
}
