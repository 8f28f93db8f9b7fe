// =============================================================================
// Pro Flow branch — with-trend entries while internal structure is intact
// =============================================================================
//
// Ordered gates:
//   1. Internal trend intact (protections, mitigations, MS breaks, weekly
//      onside)? No → invalid.
//   2. Zone has direct intention OR a decisional break with intent? No →
//      invalid.
//   3. Classify zone formation → provisional entry style, reason appended.
//   4. Liquidity traps / inducements nearby? Yes → final verdict overridden
//      to Liquidity Entry regardless of step 3.
//
// Steps 3–4 only run while the verdict slot is still open.

use serde::{Deserialize, Serialize};

use super::{BranchRun, Evaluation};
use crate::types::{Answer, EntryDecision, ZoneFormation};

/// Complete ordered answer set for the Pro Flow questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProFlowAnswers {
    /// Is the market trending internally (incl. weekly onside)?
    pub trending_internally: Answer,
    /// Does the zone have direct intention or a decisional break with intent?
    pub zone_has_intention: Answer,
    /// Zone formation quality.
    pub formation: ZoneFormation,
    /// Any liquidity traps / inducements nearby?
    pub traps_nearby: Answer,
}

pub fn evaluate(answers: &ProFlowAnswers) -> Evaluation {
    let mut run = BranchRun::new();

    if answers.trending_internally.is_no() {
        run.invalidate("Market not trending internally / weekly not onside.");
    }

    if answers.zone_has_intention.is_no() {
        run.invalidate("Zone lacks direct intention / no structural break with intent.");
    }

    if run.is_open() {
        let provisional = answers.formation.provisional_entry();
        match answers.formation {
            ZoneFormation::CleanNoWick => {
                run.note("Zone clean → proximal/body entry allowed.");
            }
            ZoneFormation::CleanWithWick => {
                run.note("Zone clean but with wick → inducement entry.");
            }
            ZoneFormation::SwingPointOnly => {
                run.note("Zone not clean but clear swing point → liquidity sweep entry.");
            }
        }

        if answers.traps_nearby.is_yes() {
            run.settle(EntryDecision::Liquidity);
            run.note("Obvious nearby liquidity → liquidity entry only.");
        } else {
            run.settle(provisional);
        }
    }

    run.finish()
}
