// =============================================================================
// Shared types used across the Horizon decision engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Market regime context selected once per checklist session.
///
/// Determines which branch of the decision tree runs. The serialized strings
/// match the journal's `flow_phase` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowPhase {
    #[serde(rename = "Pro Flow")]
    ProFlow,
    #[serde(rename = "Counter Flow")]
    CounterFlow,
    #[serde(rename = "Ranging Market")]
    RangingMarket,
}

impl std::fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProFlow => write!(f, "Pro Flow"),
            Self::CounterFlow => write!(f, "Counter Flow"),
            Self::RangingMarket => write!(f, "Ranging Market"),
        }
    }
}

/// Final verdict of a checklist session.
///
/// Exactly one per session. The serialized strings match the journal's
/// `final_decision` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryDecision {
    /// Zone is clean — enter at the proximal edge / body of the zone.
    #[serde(rename = "Proximal Entry")]
    Proximal,
    /// Zone is clean but wicked — wait for the inducement before entering.
    #[serde(rename = "Inducement Entry")]
    Inducement,
    /// Entry only after a liquidity sweep of the zone.
    #[serde(rename = "Liquidity Entry")]
    Liquidity,
    /// One of the gates failed — no trade.
    #[serde(rename = "Trade Not Valid")]
    NotValid,
}

impl EntryDecision {
    /// Whether this verdict permits taking the trade at all.
    pub fn is_valid(self) -> bool {
        self != Self::NotValid
    }
}

impl std::fmt::Display for EntryDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proximal => write!(f, "Proximal Entry"),
            Self::Inducement => write!(f, "Inducement Entry"),
            Self::Liquidity => write!(f, "Liquidity Entry"),
            Self::NotValid => write!(f, "Trade Not Valid"),
        }
    }
}

/// Answer to a binary checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }

    pub fn is_no(self) -> bool {
        self == Self::No
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// The 3-way zone formation quality choice shared by every branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneFormation {
    /// Clean zone, no large wicks.
    CleanNoWick,
    /// Clean zone but with a large wick.
    CleanWithWick,
    /// Not clean, but a clear swing point.
    SwingPointOnly,
}

impl ZoneFormation {
    /// Map formation quality to the provisional entry style.
    ///
    /// Total over the 3-state input; identical for every flow phase. Only the
    /// reason wording differs per branch, which each branch supplies itself.
    pub fn provisional_entry(self) -> EntryDecision {
        match self {
            Self::CleanNoWick => EntryDecision::Proximal,
            Self::CleanWithWick => EntryDecision::Inducement,
            Self::SwingPointOnly => EntryDecision::Liquidity,
        }
    }
}

impl std::fmt::Display for ZoneFormation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CleanNoWick => write!(f, "Clean (no large wicks)"),
            Self::CleanWithWick => write!(f, "Clean, but with a large wick"),
            Self::SwingPointOnly => write!(f, "Not clean, but clear swing point"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_phase_display_matches_journal_strings() {
        assert_eq!(format!("{}", FlowPhase::ProFlow), "Pro Flow");
        assert_eq!(format!("{}", FlowPhase::CounterFlow), "Counter Flow");
        assert_eq!(format!("{}", FlowPhase::RangingMarket), "Ranging Market");
    }

    #[test]
    fn flow_phase_serde_roundtrip() {
        let json = serde_json::to_string(&FlowPhase::RangingMarket).unwrap();
        assert_eq!(json, "\"Ranging Market\"");
        let back: FlowPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FlowPhase::RangingMarket);
    }

    #[test]
    fn entry_decision_display_matches_journal_strings() {
        assert_eq!(format!("{}", EntryDecision::Proximal), "Proximal Entry");
        assert_eq!(format!("{}", EntryDecision::Inducement), "Inducement Entry");
        assert_eq!(format!("{}", EntryDecision::Liquidity), "Liquidity Entry");
        assert_eq!(format!("{}", EntryDecision::NotValid), "Trade Not Valid");
    }

    #[test]
    fn entry_decision_validity() {
        assert!(EntryDecision::Proximal.is_valid());
        assert!(EntryDecision::Inducement.is_valid());
        assert!(EntryDecision::Liquidity.is_valid());
        assert!(!EntryDecision::NotValid.is_valid());
    }

    #[test]
    fn formation_maps_to_all_three_entry_styles() {
        assert_eq!(
            ZoneFormation::CleanNoWick.provisional_entry(),
            EntryDecision::Proximal
        );
        assert_eq!(
            ZoneFormation::CleanWithWick.provisional_entry(),
            EntryDecision::Inducement
        );
        assert_eq!(
            ZoneFormation::SwingPointOnly.provisional_entry(),
            EntryDecision::Liquidity
        );
    }

    #[test]
    fn formation_serde_uses_snake_case() {
        let json = serde_json::to_string(&ZoneFormation::CleanNoWick).unwrap();
        assert_eq!(json, "\"clean_no_wick\"");
        let back: ZoneFormation = serde_json::from_str("\"swing_point_only\"").unwrap();
        assert_eq!(back, ZoneFormation::SwingPointOnly);
    }

    #[test]
    fn answer_helpers() {
        assert!(Answer::Yes.is_yes());
        assert!(Answer::No.is_no());
        assert!(!Answer::No.is_yes());
    }
}
