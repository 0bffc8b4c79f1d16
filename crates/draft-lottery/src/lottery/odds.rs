// First-pick odds from the 14-ball combination table.

use serde::{Deserialize, Serialize};

use super::standings::TeamStanding;

/// Combinations assigned to each lottery slot, worst record first.
///
/// 1,000 of the 1,001 possible four-ball combinations out of 14 balls. The
/// leftover combination is never assigned.
pub const COMBINATIONS: [u32; 14] = [140, 140, 140, 125, 105, 90, 75, 60, 45, 30, 20, 15, 10, 5];

/// Maximum number of teams that can hold lottery combinations.
pub const MAX_LOTTERY_TEAMS: usize = COMBINATIONS.len();

/// A lottery team together with its combination count and chance at pick 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryOdds {
    pub team: TeamStanding,
    /// Pre-lottery position (1 = worst record).
    pub position: usize,
    pub combinations: u32,
    /// Percentage chance (0-100) of landing the first pick.
    pub pct_first_pick: f64,
}

/// Combination counts for a field of `team_count` lottery teams.
///
/// Only the first 14 slots carry combinations; the table is truncated, not
/// rescaled, for smaller fields.
pub fn combinations_for(team_count: usize) -> &'static [u32] {
    &COMBINATIONS[..team_count.min(MAX_LOTTERY_TEAMS)]
}

/// Compute odds for `lottery_teams` (worst record first), preserving order.
///
/// Percentages are normalized over the combinations actually in play, so they
/// always sum to 100. Teams beyond the 14th receive no entry.
pub fn compute_odds(lottery_teams: &[TeamStanding]) -> Vec<LotteryOdds> {
    let combos = combinations_for(lottery_teams.len());
    let total: u32 = combos.iter().sum();

    lottery_teams
        .iter()
        .zip(combos)
        .enumerate()
        .map(|(idx, (team, &combinations))| LotteryOdds {
            team: team.clone(),
            position: idx + 1,
            combinations,
            pct_first_pick: combinations as f64 / total as f64 * 100.0,
        })
        .collect()
}
