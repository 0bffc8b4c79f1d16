// Weighted lottery draw and full draft-order assembly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::odds::{combinations_for, MAX_LOTTERY_TEAMS};
use super::standings::TeamStanding;

/// Number of picks decided by drawing combinations.
pub const LOTTERY_DRAWS: usize = 4;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One slot of the final draft order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryResult {
    /// Draft pick number (1-indexed).
    pub pick: usize,
    pub team_id: String,
    pub team_name: String,
    /// True when the pick was won in the weighted draw.
    pub is_lottery_winner: bool,
    /// Pre-lottery position (1 = worst lottery record). Money teams carry
    /// their pick number here.
    pub original_position: usize,
    /// `original_position - pick`; positive means the team moved up.
    pub movement: i64,
}

impl LotteryResult {
    fn new(pick: usize, team: &TeamStanding, is_lottery_winner: bool, original_position: usize) -> Self {
        LotteryResult {
            pick,
            team_id: team.team_id.clone(),
            team_name: team.team_name.clone(),
            is_lottery_winner,
            original_position,
            movement: original_position as i64 - pick as i64,
        }
    }
}

/// Empirical pick distribution for one lottery team over many draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickDistribution {
    pub team_id: String,
    pub team_name: String,
    /// Pre-lottery position (1 = worst record).
    pub original_position: usize,
    /// Percentage of trials landing at each pick; index 0 is pick 1.
    pub pct_by_pick: Vec<f64>,
    pub pct_first_pick: f64,
    pub average_pick: f64,
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Map a combination number in `[0, sum(combos))` to the slot that owns it.
fn bucket_for(combos: &[u32], ball: u32) -> usize {
    let mut cumulative = 0u32;
    for (idx, &c) in combos.iter().enumerate() {
        cumulative += c;
        if ball < cumulative {
            return idx;
        }
    }
    combos.len().saturating_sub(1)
}

/// Run the lottery and return the full draft order, sorted by pick.
///
/// `lottery_teams` is worst record first; `money_teams` is best record first.
///
/// 1. The top `min(4, n)` picks are drawn by combination weight, where
///    `n = min(lottery teams, 14)`. A draw landing on an already-drawn team
///    is thrown out and redrawn.
/// 2. Undrawn lottery teams follow in worst-to-best order. Teams past the
///    14th slot hold no combinations and fall here.
/// 3. Money teams pick last, worst to best.
pub fn draw<R: Rng + ?Sized>(
    lottery_teams: &[TeamStanding],
    money_teams: &[TeamStanding],
    rng: &mut R,
) -> Vec<LotteryResult> {
    let combos = combinations_for(lottery_teams.len());
    let n = combos.len();
    let total_combos: u32 = combos.iter().sum();
    let lottery_draws = LOTTERY_DRAWS.min(n);

    if lottery_teams.len() > MAX_LOTTERY_TEAMS {
        warn!(
            "{} lottery teams exceeds the {}-team combination table; teams past slot {} get no odds",
            lottery_teams.len(),
            MAX_LOTTERY_TEAMS,
            MAX_LOTTERY_TEAMS
        );
    }

    let mut results = Vec::with_capacity(lottery_teams.len() + money_teams.len());
    let mut drawn = vec![false; lottery_teams.len()];

    for pick in 1..=lottery_draws {
        let mut rejected = 0u32;
        let idx = loop {
            let ball = rng.gen_range(0..total_combos);
            let idx = bucket_for(combos, ball);
            if !drawn[idx] {
                break idx;
            }
            rejected += 1;
        };
        drawn[idx] = true;

        let team = &lottery_teams[idx];
        debug!(
            "Pick {}: {} (position {}, {} redraws)",
            pick,
            team.team_name,
            idx + 1,
            rejected
        );
        results.push(LotteryResult::new(pick, team, true, idx + 1));
    }

    let mut pick = lottery_draws;
    for (idx, team) in lottery_teams.iter().enumerate() {
        if drawn[idx] {
            continue;
        }
        pick += 1;
        results.push(LotteryResult::new(pick, team, false, idx + 1));
    }

    for team in money_teams.iter().rev() {
        pick += 1;
        results.push(LotteryResult::new(pick, team, false, pick));
    }

    results.sort_by_key(|r| r.pick);

    info!(
        "Lottery complete: {} picks ({} drawn, {} lottery, {} money)",
        results.len(),
        lottery_draws,
        lottery_teams.len(),
        money_teams.len()
    );

    results
}

/// Run `trials` lotteries and tally where each lottery team lands.
///
/// Entries follow `lottery_teams` order (worst record first). With zero
/// trials every percentage is 0.
pub fn simulate_pick_distribution<R: Rng + ?Sized>(
    lottery_teams: &[TeamStanding],
    money_teams: &[TeamStanding],
    trials: usize,
    rng: &mut R,
) -> Vec<PickDistribution> {
    let field = lottery_teams.len();
    let mut counts = vec![vec![0usize; field]; field];

    for _ in 0..trials {
        let results = draw(lottery_teams, money_teams, rng);
        // Lottery teams always occupy picks 1..=field.
        for r in results.iter().take(field) {
            counts[r.original_position - 1][r.pick - 1] += 1;
        }
    }

    lottery_teams
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(idx, (team, team_counts))| {
            let (pct_by_pick, average_pick) = if trials == 0 {
                (vec![0.0; field], 0.0)
            } else {
                let t = trials as f64;
                let pct: Vec<f64> = team_counts.iter().map(|&c| c as f64 / t * 100.0).collect();
                let avg = team_counts
                    .iter()
                    .enumerate()
                    .map(|(p, &c)| (p + 1) as f64 * c as f64)
                    .sum::<f64>()
                    / t;
                (pct, avg)
            };
            PickDistribution {
                team_id: team.team_id.clone(),
                team_name: team.team_name.clone(),
                original_position: idx + 1,
                pct_first_pick: pct_by_pick.first().copied().unwrap_or(0.0),
                pct_by_pick,
                average_pick,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
