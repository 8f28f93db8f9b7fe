// =============================================================================
// Ranging Market branch — range-extremity entries inside internal structure
// =============================================================================
//
// Ordered gates:
//   1. Clear range contained within internal structure? No → invalid.
//   2. Primary valuation signal or TDI active? No → invalid.
//   3. Zone at the extremity of the range? No → invalid.
//   4. Inducement present coming into the entry? No → invalid. Unlike the
//      other branches, inducement is a hard gate here, not an entry-style
//      adjustment.
//   5. Liquidity traps around the zone? Records the prefer-liquidity flag;
//      never invalidates by itself.
//   6. Classify zone formation → provisional entry style.
//   7. Did the zone cause clear intent within the range? No → invalid.
//      Yes → Liquidity Entry if the trap flag is set, else the provisional
//      style.
//   8. Every valid verdict closes with the "Target range liquidity." note.

use serde::{Deserialize, Serialize};

use super::{BranchRun, Evaluation};
use crate::types::{Answer, EntryDecision, ZoneFormation};

/// Complete ordered answer set for the Ranging Market questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangingAnswers {
    /// Has the market formed a clear range, contained within internal
    /// structure?
    pub contained_range: Answer,
    /// Is the primary valuation signal or TDI active?
    pub valuation_signal_active: Answer,
    /// Is the zone at the extremity of the range?
    pub zone_at_extremity: Answer,
    /// Is there inducement present coming into the entry? (A liquidity-sweep
    /// entry counts as inducement.)
    pub inducement_present: Answer,
    /// Any liquidity traps around the zone?
    pub traps_around_zone: Answer,
    /// Zone formation quality.
    pub formation: ZoneFormation,
    /// Did the zone cause clear intent within the range?
    pub caused_intent_in_range: Answer,
}

pub fn evaluate(answers: &RangingAnswers) -> Evaluation {
    let mut run = BranchRun::new();

    if answers.contained_range.is_no() {
        run.invalidate("No clear, contained range → trade invalid.");
    }

    if answers.valuation_signal_active.is_no() {
        run.invalidate("Primary Val Signal / TDI not active → trade invalid.");
    }

    if answers.zone_at_extremity.is_no() {
        run.invalidate("Zone not at range extremity (no value).");
    }

    if answers.inducement_present.is_no() {
        run.invalidate("No inducement present → prone to traps (trade invalid).");
    }

    let prefer_liquidity = answers.traps_around_zone.is_yes();
    if prefer_liquidity {
        run.note(
            "Liquidity traps around zone → must be Liquidity Entry or the next HQ zone \
             if close (within range).",
        );
    }

    if run.is_open() {
        let provisional = answers.formation.provisional_entry();
        match answers.formation {
            ZoneFormation::CleanNoWick => {
                run.note("Zone clean → proximal/body entry allowed.");
            }
            ZoneFormation::CleanWithWick => {
                run.note("Zone clean but with large wick → inducement entry.");
            }
            ZoneFormation::SwingPointOnly => {
                run.note(
                    "Zone not clean but clear swing point of the range → liquidity sweep entry.",
                );
            }
        }

        if answers.caused_intent_in_range.is_no() {
            run.invalidate("Zone did not cause clear intent (no true S/D) → trade invalid.");
        } else if prefer_liquidity {
            run.settle(EntryDecision::Liquidity);
        } else {
            run.settle(provisional);
        }
    }

    // Closing note for every valid ranging verdict.
    if run.decision().map(EntryDecision::is_valid).unwrap_or(false) {
        run.note("Target range liquidity.");
    }

    run.finish()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_base() -> RangingAnswers {
        RangingAnswers {
            contained_range: Answer::Yes,
            valuation_signal_active: Answer::Yes,
            zone_at_extremity: Answer::Yes,
            inducement_present: Answer::Yes,
            traps_around_zone: Answer::No,
            formation: ZoneFormation::CleanNoWick,
            caused_intent_in_range: Answer::Yes,
        }
    }

    #[test]
    fn clean_zone_full_pass_targets_range_liquidity() {
        let eval = evaluate(&valid_base());
        assert_eq!(eval.decision, EntryDecision::Proximal);
        assert_eq!(
            eval.reasons,
            vec![
                "Zone clean → proximal/body entry allowed.",
                "Target range liquidity.",
            ]
        );
    }

    #[test]
    fn no_contained_range_invalidates_without_closing_note() {
        let mut a = valid_base();
        a.contained_range = Answer::No;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(eval.reasons, vec!["No clear, contained range → trade invalid."]);
    }

    #[test]
    fn inactive_signal_invalidates() {
        let mut a = valid_base();
        a.valuation_signal_active = Answer::No;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(
            eval.reasons,
            vec!["Primary Val Signal / TDI not active → trade invalid."]
        );
    }

    #[test]
    fn zone_off_extremity_invalidates() {
        let mut a = valid_base();
        a.zone_at_extremity = Answer::No;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(eval.reasons, vec!["Zone not at range extremity (no value)."]);
    }

    #[test]
    fn missing_inducement_is_a_hard_gate() {
        let mut a = valid_base();
        a.inducement_present = Answer::No;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(
            eval.reasons,
            vec!["No inducement present → prone to traps (trade invalid)."]
        );
    }

    #[test]
    fn missing_intent_invalidates_and_suppresses_closing_note() {
        let mut a = valid_base();
        a.formation = ZoneFormation::SwingPointOnly;
        a.caused_intent_in_range = Answer::No;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        // Last reason is the intent failure — no "Target range liquidity.".
        assert_eq!(
            eval.reasons,
            vec![
                "Zone not clean but clear swing point of the range → liquidity sweep entry.",
                "Zone did not cause clear intent (no true S/D) → trade invalid.",
            ]
        );
    }

    #[test]
    fn traps_override_wicked_zone_to_liquidity() {
        let mut a = valid_base();
        a.traps_around_zone = Answer::Yes;
        a.formation = ZoneFormation::CleanWithWick;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::Liquidity);
        assert_eq!(
            eval.reasons,
            vec![
                "Liquidity traps around zone → must be Liquidity Entry or the next HQ zone \
                 if close (within range).",
                "Zone clean but with large wick → inducement entry.",
                "Target range liquidity.",
            ]
        );
    }

    #[test]
    fn trap_note_still_lands_when_an_early_gate_failed() {
        let mut a = valid_base();
        a.contained_range = Answer::No;
        a.traps_around_zone = Answer::Yes;
        let eval = evaluate(&a);
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(eval.reasons.len(), 2);
        assert_eq!(eval.reasons[0], "No clear, contained range → trade invalid.");
        assert!(eval.reasons[1].starts_with("Liquidity traps around zone"));
    }

    #[test]
    fn closing_note_present_for_every_valid_formation() {
        for formation in [
            ZoneFormation::CleanNoWick,
            ZoneFormation::CleanWithWick,
            ZoneFormation::SwingPointOnly,
        ] {
            let mut a = valid_base();
            a.formation = formation;
            let eval = evaluate(&a);
            assert!(eval.decision.is_valid());
            assert_eq!(eval.reasons.last().unwrap(), "Target range liquidity.");
        }
    }
}
