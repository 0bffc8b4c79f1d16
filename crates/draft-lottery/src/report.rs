// Run report: everything one lottery run produced, as JSON or plain text.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::lottery::drawer::{self, LotteryResult, PickDistribution};
use crate::lottery::odds::{self, LotteryOdds};
use crate::lottery::standings::{self, TeamStanding};
use crate::mock::simulator::{self, MockPick, Prospect};

/// Outputs of a single lottery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftReport {
    pub league_name: String,
    pub generated_at: DateTime<Utc>,
    /// Seed used for the draw, when one was configured.
    pub seed: Option<u64>,
    pub prize_spots: usize,
    /// Prize-earning teams, best record first.
    pub money_teams: Vec<TeamStanding>,
    pub odds: Vec<LotteryOdds>,
    pub lottery: Vec<LotteryResult>,
    /// Empty when Monte Carlo simulation was disabled.
    pub distribution: Vec<PickDistribution>,
    /// Empty when the mock draft was disabled.
    pub mock_draft: Vec<MockPick>,
}

impl DraftReport {
    /// Run the whole pipeline for one season.
    ///
    /// `standings` may be in any order. The draw consumes `rng` before the
    /// Monte Carlo table and the mock draft, so a seeded generator always
    /// reproduces the same draft order regardless of the other settings.
    pub fn build<R: Rng + ?Sized>(
        config: &Config,
        standings: &[TeamStanding],
        prospects: &[Prospect],
        rng: &mut R,
    ) -> Self {
        let ranked = standings::rank_standings(standings);
        let spots = standings::prize_spots(
            config.prizes.total_prize_pool,
            config.prizes.total_collected,
        );
        info!(
            "Prize pool ${:.2} vs ${:.2} collected: {} prize spots",
            config.prizes.total_prize_pool, config.prizes.total_collected, spots
        );

        let split = standings::classify(&ranked, spots);
        let odds = odds::compute_odds(&split.lottery_teams);
        let lottery = drawer::draw(&split.lottery_teams, &split.money_teams, rng);

        let distribution = if config.lottery.simulations > 0 {
            drawer::simulate_pick_distribution(
                &split.lottery_teams,
                &split.money_teams,
                config.lottery.simulations,
                rng,
            )
        } else {
            Vec::new()
        };

        let mock_draft = if config.mock_draft.enabled {
            simulator::simulate(&lottery, prospects, rng)
        } else {
            Vec::new()
        };

        DraftReport {
            league_name: config.league.name.clone(),
            generated_at: Utc::now(),
            seed: config.lottery.seed,
            prize_spots: spots,
            money_teams: split.money_teams,
            odds,
            lottery,
            distribution,
            mock_draft,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Signed movement with an explicit `+` for teams that moved up.
fn format_movement(movement: i64) -> String {
    match movement {
        0 => "-".to_string(),
        m if m > 0 => format!("+{m}"),
        m => m.to_string(),
    }
}

/// Render the report as plain-text tables.
pub fn render_text(report: &DraftReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} draft lottery", report.league_name);
    let _ = writeln!(out, "Generated {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(seed) = report.seed {
        let _ = writeln!(out, "Seed {seed}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "In the money ({} spots)", report.prize_spots);
    for (i, team) in report.money_teams.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} ({})", i + 1, team.team_name, team.record());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Lottery odds");
    let _ = writeln!(out, "  {:>3}  {:<24} {:>8} {:>6} {:>7}", "Pos", "Team", "Record", "Combos", "1st %");
    for o in &report.odds {
        let _ = writeln!(
            out,
            "  {:>3}  {:<24} {:>8} {:>6} {:>6.1}%",
            o.position,
            o.team.team_name,
            o.team.record(),
            o.combinations,
            o.pct_first_pick
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Draft order");
    for r in &report.lottery {
        let marker = if r.is_lottery_winner { "*" } else { " " };
        let _ = writeln!(
            out,
            "  {:>3}{} {:<24} {:>4}",
            r.pick,
            marker,
            r.team_name,
            format_movement(r.movement)
        );
    }
    let _ = writeln!(out, "  (* won in the draw)");

    if !report.distribution.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Simulated odds");
        let _ = writeln!(out, "  {:>3}  {:<24} {:>7} {:>8}", "Pos", "Team", "1st %", "Avg pick");
        for d in &report.distribution {
            let _ = writeln!(
                out,
                "  {:>3}  {:<24} {:>6.1}% {:>8.2}",
                d.original_position, d.team_name, d.pct_first_pick, d.average_pick
            );
        }
    }

    if !report.mock_draft.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Mock draft");
        for p in &report.mock_draft {
            let _ = writeln!(
                out,
                "  {:>3}  {:<24} {} (#{}){}",
                p.pick,
                p.team_name,
                p.prospect.name,
                p.prospect.rank,
                if p.was_expected { "" } else { " !" }
            );
        }
    }

    out
}
