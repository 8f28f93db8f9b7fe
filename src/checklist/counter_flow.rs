// =============================================================================
// Counter Flow branch — counter-trend entries at weekly structure
// =============================================================================
//
// Ordered gates:
//   1. Daily zone at a clean weekly order block or swing point? No → invalid.
//   2. HTF zone / liquidity trap nearby that could act as a draw? Yes →
//      invalid, and the "next HQ zone" note is appended regardless of
//      whether an earlier gate already locked the verdict.
//   3. Weekly sweeping / reacting against the trade? Records the
//      prefer-liquidity flag; never invalidates by itself.
//   4. Primary valuation benchmark or TDI active? No → invalid.
//   5. Classify zone formation → provisional entry style.
//   6. Clear intent away from the zone (true supply/demand at extremity)?
//      No → invalid. Yes → Liquidity Entry if the sweep flag is set, else
//      the provisional style.

use serde::{Deserialize, Serialize};

use super::{BranchRun, Evaluation};
use crate::types::{Answer, EntryDecision, ZoneFormation};

/// Complete ordered answer set for the Counter Flow questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterFlowAnswers {
    /// Is the daily zone at a clean weekly OB or swing point?
    pub at_weekly_structure: Answer,
    /// Any liquidity traps / HTF zones nearby that could act as a draw?
    pub htf_draw_nearby: Answer,
    /// Is the weekly reacting / sweeping against the trade?
    pub weekly_sweep_against: Answer,
    /// Is the primary valuation benchmark or TDI active?
    pub benchmark_active: Answer,
    /// Zone formation quality.
    pub formation: ZoneFormation,
    /// Does the zone have clear intent away from it?
    pub clear_intent: Answer,
}

pub fn evaluate(answers: &CounterFlowAnswers) -> Evaluation {
    let mut run = BranchRun::new();

    if answers.at_weekly_structure.is_no() {
        run.invalidate("Daily zone not at clean weekly OB/swing.");
    }

    if answers.htf_draw_nearby.is_yes() {
        run.invalidate("Nearby HTF zone could act as draw → skip this zone.");
        // Follow-up guidance holds even when the verdict was locked earlier.
        run.note("If the delta signal is still valid, the next HQ zone is valid.");
    }

    let prefer_liquidity = answers.weekly_sweep_against.is_yes();
    if prefer_liquidity {
        run.note("Weekly sweep against trade → liquidity entry preferred.");
    }

    if answers.benchmark_active.is_no() {
        run.invalidate("Primary benchmark/TDI not active → trade not valid.");
    }

    if run.is_open() {
        let provisional = answers.formation.provisional_entry();
        match answers.formation {
            ZoneFormation::CleanNoWick => {
                run.note("Zone clean → proximal entry allowed.");
            }
            ZoneFormation::CleanWithWick => {
                run.note("Zone clean but with wick → inducement entry.");
            }
            ZoneFormation::SwingPointOnly => {
                run.note("Zone not clean but swing point → liquidity sweep entry.");
            }
        }

        if answers.clear_intent.is_no() {
            run.invalidate("Zone lacks clear intent → not valid.");
        } else if prefer_liquidity {
            run.settle(EntryDecision::Liquidity);
            run.note("Weekly counter-sweep → liquidity entry.");
        } else {
            run.settle(provisional);
        }
    }

    run.finish()
}
