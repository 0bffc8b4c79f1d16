// Final standings: winning percentage, ranking, prize spots, and the split
// into money teams and lottery teams.

use serde::{Deserialize, Serialize};
use tracing::info;

// ---------------------------------------------------------------------------
// Team standing
// ---------------------------------------------------------------------------

/// A team's regular-season result. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// Team identifier (e.g., "team_1").
    pub team_id: String,
    /// Display name of the team.
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Fraction of games won, ties counted as half a win.
    pub winning_pct: f64,
}

impl TeamStanding {
    /// Build a standing and derive its winning percentage from the record.
    pub fn new(
        team_id: impl Into<String>,
        team_name: impl Into<String>,
        wins: u32,
        losses: u32,
        ties: u32,
    ) -> Self {
        TeamStanding {
            team_id: team_id.into(),
            team_name: team_name.into(),
            wins,
            losses,
            ties,
            winning_pct: winning_pct(wins, losses, ties),
        }
    }

    /// Games played (wins + losses + ties).
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Record formatted as "W-L" or "W-L-T" when ties exist.
    pub fn record(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }
}

/// `(wins + ties / 2) / games`, or 0.0 for a team that has not played.
pub fn winning_pct(wins: u32, losses: u32, ties: u32) -> f64 {
    let games = wins + losses + ties;
    if games == 0 {
        return 0.0;
    }
    (wins as f64 + 0.5 * ties as f64) / games as f64
}

/// Return a copy of `standings` ordered best record first.
///
/// Ordering: winning percentage descending, then wins descending, then
/// losses ascending. Teams still tied keep their input order.
pub fn rank_standings(standings: &[TeamStanding]) -> Vec<TeamStanding> {
    let mut ranked = standings.to_vec();
    ranked.sort_by(|a, b| {
        b.winning_pct
            .partial_cmp(&a.winning_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.losses.cmp(&b.losses))
    });
    ranked
}

// ---------------------------------------------------------------------------
// Prize spots
// ---------------------------------------------------------------------------

/// Prize pools under this amount pay a single spot when the pool has shrunk.
const SMALL_POOL_THRESHOLD: f64 = 300.0;

/// Pools at or above this amount count as a large pool.
const LARGE_POOL_THRESHOLD: f64 = 10_000.0;

/// Number of prize-earning ("in the money") places for a season.
///
/// A pool that ended below what was collected pays 1 spot under $300 and 2
/// spots otherwise. A pool that held or grew pays 3 spots; large pools
/// (>= $10,000) also pay 3.
#[allow(clippy::if_same_then_else)]
pub fn prize_spots(total_prize_pool: f64, total_collected: f64) -> usize {
    if total_prize_pool < total_collected {
        if total_prize_pool < SMALL_POOL_THRESHOLD {
            1
        } else {
            2
        }
    } else if total_prize_pool >= LARGE_POOL_THRESHOLD {
        3
    } else {
        3
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Standings split into the lottery field and the money teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Lottery-eligible teams, worst record first.
    pub lottery_teams: Vec<TeamStanding>,
    /// Prize-earning teams, best record first.
    pub money_teams: Vec<TeamStanding>,
}

/// Split `ranked_teams` (best record first) into money and lottery teams.
///
/// The first `prize_spots` teams are money teams. The rest are reversed so
/// index 0 of `lottery_teams` is the single worst record. A `prize_spots`
/// larger than the league makes every team a money team.
pub fn classify(ranked_teams: &[TeamStanding], prize_spots: usize) -> Classification {
    let split = prize_spots.min(ranked_teams.len());
    let (money, rest) = ranked_teams.split_at(split);

    let money_teams = money.to_vec();
    let lottery_teams: Vec<TeamStanding> = rest.iter().rev().cloned().collect();

    info!(
        "Classified {} teams: {} money, {} lottery",
        ranked_teams.len(),
        money_teams.len(),
        lottery_teams.len()
    );

    Classification {
        lottery_teams,
        money_teams,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// 12 teams, team_1 best (11-2) down to team_12 worst (0-13).
    fn twelve_ranked() -> Vec<TeamStanding> {
        (1..=12)
            .map(|i| TeamStanding::new(format!("team_{i}"), format!("Team {i}"), 12 - i, i + 1, 0))
            .collect()
    }

    // -- Winning percentage --

    #[test]
    fn winning_pct_counts_ties_as_half() {
        let s = TeamStanding::new("t", "T", 8, 4, 2);
        assert!(approx_eq(s.winning_pct, 9.0 / 14.0, 1e-12));
        assert_eq!(s.games(), 14);
        assert_eq!(s.record(), "8-4-2");
    }

    #[test]
    fn winning_pct_zero_games_is_zero() {
        assert_eq!(winning_pct(0, 0, 0), 0.0);
        assert_eq!(TeamStanding::new("t", "T", 0, 0, 0).record(), "0-0");
    }

    // -- Ranking --

    #[test]
    fn rank_standings_orders_best_first_without_mutating_input() {
        let input = vec![
            TeamStanding::new("a", "A", 3, 10, 0),
            TeamStanding::new("b", "B", 10, 3, 0),
            TeamStanding::new("c", "C", 7, 6, 0),
        ];
        let ranked = rank_standings(&input);
        let ids: Vec<&str> = ranked.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(input[0].team_id, "a");
    }

    #[test]
    fn rank_standings_breaks_pct_ties_by_wins_then_input_order() {
        // 6-6 and 5-5-2 share .500; more wins ranks first.
        let input = vec![
            TeamStanding::new("x", "X", 5, 5, 2),
            TeamStanding::new("y", "Y", 6, 6, 0),
            TeamStanding::new("z", "Z", 6, 6, 0),
        ];
        let ranked = rank_standings(&input);
        let ids: Vec<&str> = ranked.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z", "x"]);
    }

    // -- Prize spots --

    #[test]
    fn declined_small_pool_pays_one_spot() {
        assert_eq!(prize_spots(250.0, 500.0), 1);
    }

    #[test]
    fn declined_pool_at_threshold_pays_two_spots() {
        assert_eq!(prize_spots(300.0, 500.0), 2);
        assert_eq!(prize_spots(4_000.0, 6_000.0), 2);
    }

    #[test]
    fn grown_large_pool_pays_three_spots() {
        assert_eq!(prize_spots(12_000.0, 8_000.0), 3);
    }

    #[test]
    fn unchanged_pool_pays_three_spots() {
        assert_eq!(prize_spots(1_200.0, 1_200.0), 3);
        assert_eq!(prize_spots(0.0, 0.0), 3);
    }

    // -- Classification --

    #[test]
    fn classify_twelve_teams_three_spots() {
        let ranked = twelve_ranked();
        let c = classify(&ranked, 3);

        let money: Vec<&str> = c.money_teams.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(money, vec!["team_1", "team_2", "team_3"]);

        assert_eq!(c.lottery_teams.len(), 9);
        assert_eq!(c.lottery_teams[0].team_id, "team_12");
        assert_eq!(c.lottery_teams[8].team_id, "team_4");
    }

    #[test]
    fn classify_more_spots_than_teams() {
        let ranked = twelve_ranked();
        let c = classify(&ranked[..2], 3);
        assert_eq!(c.money_teams.len(), 2);
        assert!(c.lottery_teams.is_empty());
    }

    #[test]
    fn classify_zero_spots_puts_everyone_in_lottery() {
        let ranked = twelve_ranked();
        let c = classify(&ranked, 0);
        assert!(c.money_teams.is_empty());
        assert_eq!(c.lottery_teams.len(), 12);
        assert_eq!(c.lottery_teams[0].team_id, "team_12");
    }
}
