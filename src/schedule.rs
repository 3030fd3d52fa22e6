use crate::data::MatchRow;
use crate::ranking::RankingOrder;

/// Singles slot pairings as zero-based doubles rank positions (side A, side B).
const SINGLES_PAIRINGS: [(usize, usize); 5] = [(0, 1), (2, 3), (1, 2), (3, 4), (4, 0)];

pub const SCHEDULED_SLOTS: usize = SINGLES_PAIRINGS.len();

/// Seeds the first five singles rows from the doubles ranking.
///
/// Returns `false` without touching anything when there are fewer than five
/// singles rows or fewer than five ranked teams. Rows beyond the fifth are
/// left alone.
pub fn seed_singles(doubles_ranking: &RankingOrder, singles: &mut [MatchRow]) -> bool {
    if singles.len() < SCHEDULED_SLOTS || doubles_ranking.len() < SCHEDULED_SLOTS {
        return false;
    }

    for (row, &(a, b)) in singles.iter_mut().zip(SINGLES_PAIRINGS.iter()) {
        let (Some(team_a), Some(team_b)) = (doubles_ranking.at(a), doubles_ranking.at(b)) else {
            continue;
        };
        row.team_a = team_a;
        row.team_b = team_b;
        row.matchup = Some(format!("{} vs {}", place_name(a), place_name(b)));
    }

    true
}

/// `"1st place"` for position 0 and so on.
pub fn place_name(position: usize) -> String {
    let rank = position + 1;
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} place", rank, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Table, TeamId};

    fn order(numbers: [u8; 5]) -> RankingOrder {
        RankingOrder::from_teams(numbers.iter().filter_map(|n| TeamId::new(*n)).collect())
    }

    fn singles(count: usize) -> Vec<MatchRow> {
        (0..count).map(|_| MatchRow::blank(Table::Singles)).collect()
    }

    fn pair(row: &MatchRow) -> (u8, u8) {
        (row.team_a.number(), row.team_b.number())
    }

    #[test]
    fn slots_follow_rank_positions() {
        let mut rows = singles(5);
        assert!(seed_singles(&order([4, 1, 5, 2, 3]), &mut rows));

        let pairs: Vec<_> = rows.iter().map(pair).collect();
        assert_eq!(pairs, [(4, 1), (5, 2), (1, 5), (2, 3), (3, 4)]);
        assert_eq!(rows[0].matchup.as_deref(), Some("1st place vs 2nd place"));
        assert_eq!(rows[4].matchup.as_deref(), Some("5th place vs 1st place"));
    }

    #[test]
    fn too_few_rows_is_a_no_op() {
        let mut rows = singles(4);
        let before = rows.clone();
        assert!(!seed_singles(&order([4, 1, 5, 2, 3]), &mut rows));
        assert_eq!(rows, before);
    }

    #[test]
    fn too_few_ranked_teams_is_a_no_op() {
        let mut rows = singles(5);
        let short = RankingOrder::from_teams(TeamId::all().take(4).collect());
        assert!(!seed_singles(&short, &mut rows));
        assert_eq!(rows, singles(5));
    }

    #[test]
    fn extra_rows_keep_their_teams() {
        let mut rows = singles(6);
        rows[5].team_a = TeamId::new(2).unwrap();
        seed_singles(&order([1, 2, 3, 4, 5]), &mut rows);
        assert_eq!(pair(&rows[5]), (2, 1));
        assert_eq!(rows[5].matchup.as_deref(), Some("Custom matchup"));
    }

    #[test]
    fn place_names() {
        assert_eq!(place_name(2), "3rd place");
        assert_eq!(place_name(10), "11th place");
        assert_eq!(place_name(20), "21st place");
    }
}
