use crate::data::TeamId;
use crate::standings::{Standings, TeamResult};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPolicy {
    /// Doubles points, then doubles game differential.
    Doubles,
    /// Total points, then total game differential.
    Overall,
}

impl RankingPolicy {
    fn compare(self, a: &TeamResult, b: &TeamResult) -> Ordering {
        match self {
            RankingPolicy::Doubles => b
                .doubles_points
                .total_cmp(&a.doubles_points)
                .then_with(|| b.doubles_diff.cmp(&a.doubles_diff)),
            RankingPolicy::Overall => b
                .total_points
                .total_cmp(&a.total_points)
                .then_with(|| b.total_diff.cmp(&a.total_diff)),
        }
    }
}

/// Teams from first to last place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOrder {
    teams: Vec<TeamId>,
}

impl RankingOrder {
    /// Orders all five teams. Teams level on both criteria keep ascending
    /// team-number order; there is no head-to-head tiebreak.
    pub fn rank(standings: &Standings, policy: RankingPolicy) -> Self {
        let mut teams: Vec<TeamId> = TeamId::all().collect();
        teams.sort_by(|a, b| {
            policy
                .compare(standings.get(*a), standings.get(*b))
                .then_with(|| a.cmp(b))
        });
        Self { teams }
    }

    pub fn from_teams(teams: Vec<TeamId>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Team holding the zero-based rank position.
    pub fn at(&self, position: usize) -> Option<TeamId> {
        self.teams.get(position).copied()
    }

    /// One-based rank of `team`.
    pub fn rank_of(&self, team: TeamId) -> Option<usize> {
        self.teams
            .iter()
            .position(|candidate| *candidate == team)
            .map(|index| index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MatchRow;

    fn team(n: u8) -> TeamId {
        TeamId::new(n).unwrap()
    }

    fn row(a: u8, b: u8, score: &str) -> MatchRow {
        let mut row = MatchRow::new(team(a), team(b));
        row.score = score.to_string();
        row
    }

    fn numbers(order: &RankingOrder) -> Vec<u8> {
        order.teams().iter().map(|team| team.number()).collect()
    }

    #[test]
    fn most_points_leads_overall_regardless_of_diff() {
        // Team 3 wins two narrow doubles matches; team 1 has a huge doubles
        // margin but only one win.
        let doubles = [row(3, 4, "7:6"), row(3, 5, "7:6"), row(1, 2, "6:0")];
        let standings = Standings::compute(&doubles, &[]);
        let overall = RankingOrder::rank(&standings, RankingPolicy::Overall);

        assert_eq!(overall.at(0), Some(team(3)));
        assert!(standings.get(team(1)).total_diff > standings.get(team(3)).total_diff);
    }

    #[test]
    fn diff_breaks_points_tie() {
        let doubles = [row(1, 3, "6:4"), row(2, 4, "6:0")];
        let standings = Standings::compute(&doubles, &[]);
        let overall = RankingOrder::rank(&standings, RankingPolicy::Overall);

        assert_eq!(numbers(&overall)[..2], [2, 1]);
    }

    #[test]
    fn doubles_policy_ignores_singles() {
        let doubles = [row(1, 2, "6:3")];
        let singles = [row(2, 1, "6:0"), row(2, 3, "6:0")];
        let standings = Standings::compute(&doubles, &singles);

        let by_doubles = RankingOrder::rank(&standings, RankingPolicy::Doubles);
        let overall = RankingOrder::rank(&standings, RankingPolicy::Overall);
        assert_eq!(by_doubles.at(0), Some(team(1)));
        assert_eq!(overall.at(0), Some(team(2)));
    }

    #[test]
    fn level_teams_keep_team_number_order() {
        let standings = Standings::compute(&[], &[]);
        for policy in [RankingPolicy::Doubles, RankingPolicy::Overall] {
            assert_eq!(numbers(&RankingOrder::rank(&standings, policy)), [1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn rank_of_is_one_based() {
        let order = RankingOrder::from_teams(vec![team(4), team(1), team(5), team(2), team(3)]);
        assert_eq!(order.rank_of(team(4)), Some(1));
        assert_eq!(order.rank_of(team(3)), Some(5));
        assert_eq!(order.len(), 5);
    }
}
