// =============================================================================
// Anchor Registry — asset-driven fundamentals
// =============================================================================
//
// Static mapping from asset name to its two descriptive anchor tags:
//   - Macro Anchor: who drives the asset's positioning (COT / macro context).
//   - Valuation Anchor: which benchmark drives its valuation.
//
// Pure data, looked up once per session. `lookup` is total: unknown assets
// resolve to a placeholder for both fields, never an error.

use serde::Serialize;

/// Placeholder shown for assets outside the registry.
pub const PLACEHOLDER: &str = "—";

/// The two anchor tags for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorInfo {
    pub macro_anchor: &'static str,
    pub val_anchor: &'static str,
}

const fn anchors(macro_anchor: &'static str, val_anchor: &'static str) -> AnchorInfo {
    AnchorInfo {
        macro_anchor,
        val_anchor,
    }
}

/// Asset → anchors table. Fixed at compile time, never mutated.
const ASSET_ANCHORS: &[(&str, AnchorInfo)] = &[
    ("Cocoa", anchors("Commercials", "Macro")),
    ("Coffee", anchors("Commercials", "Dollar & Gold")),
    ("Cotton", anchors("Commercials", "Dollar & Gold")),
    ("Corn", anchors("Commercials", "Dollar")),
    ("Soybean", anchors("Commercials", "Dollar & Gold")),
    ("Sugar", anchors("Commercials", "Dollar")),
    ("Wheat", anchors("Commercials", "Dollar")),
    ("Bitcoin", anchors("Retail", "Dollar")),
    ("Eth", anchors("Retail", "Macro")),
    ("Natural Gas", anchors("Commercial , Seasonals", "Macro")),
    ("Crude Oil", anchors("Commercial , Seasonals", "Dollar & Gold")),
    ("Euro", anchors("Commercials & Retail", "Dollar")),
    ("British Pound", anchors("Commercials & Retail", "Dollar & Gold")),
    ("Japanese Yen", anchors("Commercials & Retail", "Delta Only")),
    ("Swiss Franc", anchors("Commercials & Retail", "Delta Only")),
    ("Canadian Dollar", anchors("Commercials & Retail", "Dollar")),
    ("Australian Dollar", anchors("Commercials & Retail", "Dollar")),
    ("New Zealand Dollar", anchors("Commercials & Retail", "Dollar")),
    ("US Dollar Index", anchors("Commercials & Retail", "Delta Only")),
    ("Platinum", anchors("Commercials", "Dollar & Gold")),
    ("Palladium", anchors("Commercials", "Dollar & Gold")),
    ("Copper", anchors("Commercials & Retail", "Dollar")),
    ("Gold", anchors("Commercials", "Dollar")),
    ("Silver", anchors("Commercials", "Dollar")),
    ("Nasdaq", anchors("Seasonality", "Bonds")),
    ("Dow Jones", anchors("Seasonality", "Bonds")),
    ("S&P 500", anchors("Seasonality", "Bonds")),
    ("Russel 2000", anchors("Seasonality", "Bonds")),
    ("Dax", anchors("Seasonality", "Bonds")),
    ("Google", anchors("Seasonal & Catalyst", "Bonds")),
    ("Apple", anchors("Seasonal & Catalyst", "Bonds")),
    ("Microsoft", anchors("Seasonal & Catalyst", "Bonds")),
    ("Amazon", anchors("Seasonal & Catalyst", "Bonds")),
    ("Meta", anchors("Seasonal & Catalyst", "Bonds")),
    ("Nvidia", anchors("Seasonal & Catalyst", "Bonds")),
    ("Tesla", anchors("Seasonal & Catalyst", "Macro")),
    ("Ferrari", anchors("Seasonal & Catalyst", "Bonds")),
    ("GBP / JPY", anchors("Delta Only", "Gold & GBP")),
    ("EUR / AUD", anchors("Delta Only", "Gold & GBP")),
    ("USD / JPY", anchors("Delta Only", "Gold & GBP")),
    ("USD / CHF", anchors("Delta Only", "Bonds")),
    ("USD / CAD", anchors("Delta Only", "Dollar")),
];

/// Look up the anchors for `asset`.
///
/// Total function: assets outside the registry resolve to [`PLACEHOLDER`] on
/// both fields.
pub fn lookup(asset: &str) -> AnchorInfo {
    ASSET_ANCHORS
        .iter()
        .find(|(name, _)| *name == asset)
        .map(|(_, info)| *info)
        .unwrap_or(AnchorInfo {
            macro_anchor: PLACEHOLDER,
            val_anchor: PLACEHOLDER,
        })
}

/// All registered asset names, sorted alphabetically for the form layer.
pub fn asset_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ASSET_ANCHORS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_asset() {
        let info = lookup("Gold");
        assert_eq!(info.macro_anchor, "Commercials");
        assert_eq!(info.val_anchor, "Dollar");
    }

    #[test]
    fn lookup_cross_pair() {
        let info = lookup("GBP / JPY");
        assert_eq!(info.macro_anchor, "Delta Only");
        assert_eq!(info.val_anchor, "Gold & GBP");
    }

    #[test]
    fn lookup_unknown_asset_returns_placeholders() {
        let info = lookup("Dogecoin");
        assert_eq!(info.macro_anchor, PLACEHOLDER);
        assert_eq!(info.val_anchor, PLACEHOLDER);
    }

    #[test]
    fn lookup_empty_string_returns_placeholders() {
        let info = lookup("");
        assert_eq!(info.macro_anchor, PLACEHOLDER);
        assert_eq!(info.val_anchor, PLACEHOLDER);
    }

    #[test]
    fn asset_names_sorted_and_complete() {
        let names = asset_names();
        assert_eq!(names.len(), ASSET_ANCHORS.len());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"Gold"));
        assert!(names.contains(&"USD / CAD"));
    }

    #[test]
    fn no_registry_entry_is_blank() {
        for (name, info) in ASSET_ANCHORS {
            assert!(!name.is_empty());
            assert!(!info.macro_anchor.is_empty());
            assert!(!info.val_anchor.is_empty());
        }
    }
}
