// Mock draft: best-available selection with pick-dependent Gaussian variance.
//
// At every slot the remaining prospects are ordered by consensus rank and
// weighted by a half-Gaussian over their distance from the best available.
// Sigma widens with pick depth, so early picks track the board closely and
// late picks wander.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lottery::drawer::LotteryResult;

/// Sigma at the first pick of a multi-pick draft.
pub const SIGMA_MIN: f64 = 0.6;

/// Sigma at the last pick of a multi-pick draft.
pub const SIGMA_MAX: f64 = 2.5;

/// Sigma used when the draft has a single pick.
pub const SIGMA_SINGLE_PICK: f64 = 0.5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An incoming player with a consensus ranking (1 = best).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: String,
    pub name: String,
    pub rank: u32,
}

/// One selection in a simulated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockPick {
    pub pick: usize,
    pub team_id: String,
    pub team_name: String,
    pub prospect: Prospect,
    /// The prospect's consensus rank matches the slot.
    pub was_expected: bool,
}

// ---------------------------------------------------------------------------
// Weighting
// ---------------------------------------------------------------------------

/// Spread of the selection curve at `slot` (1-indexed) of `total_picks`.
///
/// Rises linearly from 0.6 at the first pick to 2.5 at the last.
pub fn pick_sigma(slot: usize, total_picks: usize) -> f64 {
    if total_picks <= 1 {
        return SIGMA_SINGLE_PICK;
    }
    let progress = (slot.saturating_sub(1)) as f64 / (total_picks - 1) as f64;
    SIGMA_MIN + progress * (SIGMA_MAX - SIGMA_MIN)
}

/// Normalized selection probabilities for `count` prospects ordered best first.
pub fn selection_weights(count: usize, sigma: f64) -> Vec<f64> {
    let raw: Vec<f64> = (0..count)
        .map(|idx| {
            let d = idx as f64;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Pick an index from normalized `weights` using a uniform draw in `[0, 1)`.
fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let target: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (idx, &w) in weights.iter().enumerate() {
        cumulative += w;
        if target < cumulative {
            return idx;
        }
    }
    // Rounding can leave the cumulative sum just under 1.0.
    weights.len().saturating_sub(1)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Simulate a draft over `pick_order` (ascending by pick) from `prospects`.
///
/// Returns one `MockPick` per slot until either the order or the prospect
/// pool runs out. The caller's prospect slice is never reordered.
pub fn simulate<R: Rng + ?Sized>(
    pick_order: &[LotteryResult],
    prospects: &[Prospect],
    rng: &mut R,
) -> Vec<MockPick> {
    let total_picks = pick_order.len();

    let mut remaining: Vec<Prospect> = prospects.to_vec();
    remaining.sort_by_key(|p| p.rank);
    remaining.truncate(total_picks.max(prospects.len()));

    let mut picks = Vec::with_capacity(total_picks.min(remaining.len()));

    for (i, slot_owner) in pick_order.iter().enumerate() {
        if remaining.is_empty() {
            warn!(
                "Prospect pool exhausted after {} of {} picks",
                picks.len(),
                total_picks
            );
            break;
        }
        let slot = i + 1;

        // Removal preserves order, so `remaining` stays best-first.
        let sigma = pick_sigma(slot, total_picks);
        let weights = selection_weights(remaining.len(), sigma);
        let chosen = sample_index(&weights, rng);
        let prospect = remaining.remove(chosen);

        debug!(
            "Mock pick {}: {} selects {} (rank {}, {} off the board)",
            slot_owner.pick,
            slot_owner.team_name,
            prospect.name,
            prospect.rank,
            chosen
        );

        picks.push(MockPick {
            pick: slot_owner.pick,
            team_id: slot_owner.team_id.clone(),
            team_name: slot_owner.team_name.clone(),
            was_expected: prospect.rank as usize == slot,
            prospect,
        });
    }

    info!(
        "Mock draft complete: {} picks, {} on the board",
        picks.len(),
        picks.iter().filter(|p| p.was_expected).count()
    );

    picks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
