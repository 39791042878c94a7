//! Static strategy taxonomy: ordered list of the strategies the backend
//! serves, their display labels, chart legend names, and the baseline
//! each one is compared against in the projection view.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Legend label for the strategy's line on the cumulative chart.
    pub series_name: &'static str,
    /// Legend label for the comparison line.
    pub baseline_series_name: &'static str,
    /// Strategy whose metrics parameterize the baseline simulation.
    pub baseline_id: &'static str,
}

/// Display order is meaningful: this is the order the sidebar cards
/// render in.
pub const STRATEGIES: &[StrategyInfo] = &[
    StrategyInfo {
        id: "sector_rotation",
        name: "Multiscale Sector Rotation",
        series_name: "Multiscale Sector Rotation",
        baseline_series_name: "Risk Parity Baseline",
        baseline_id: "risk_parity",
    },
    StrategyInfo {
        id: "large_cap_100",
        name: "Multiscale Large Cap 100",
        series_name: "Multiscale Large Cap 100",
        baseline_series_name: "Risk Parity Baseline",
        baseline_id: "risk_parity",
    },
    StrategyInfo {
        id: "mag7_momentum",
        name: "Multiscale Mag 7",
        series_name: "Multiscale Mag 7",
        baseline_series_name: "Risk Parity Baseline",
        baseline_id: "risk_parity",
    },
    StrategyInfo {
        id: "stgt_ensemble",
        name: "STGT Ensemble",
        series_name: "STGT Ensemble",
        baseline_series_name: "Sector Rotation",
        baseline_id: "sector_rotation",
    },
    StrategyInfo {
        id: "risk_parity",
        name: "Multi-Horizon Risk Parity",
        series_name: "Multi-Horizon Risk Parity",
        baseline_series_name: "Risk Parity Baseline",
        baseline_id: "risk_parity",
    },
    StrategyInfo {
        id: "quality_factor",
        name: "S&P 500 Quality",
        series_name: "S&P 500 Quality",
        baseline_series_name: "Risk Parity Baseline",
        baseline_id: "risk_parity",
    },
];

pub fn default_strategy() -> &'static StrategyInfo {
    &STRATEGIES[0]
}

pub fn find(id: &str) -> Option<&'static StrategyInfo> {
    STRATEGIES.iter().find(|s| s.id == id)
}

/// Legend names for the chart; unknown ids fall back to the generic pair.
pub fn series_names(id: &str) -> (&'static str, &'static str) {
    match find(id) {
        Some(info) => (info.series_name, info.baseline_series_name),
        None => ("Strategy", "Baseline"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        assert_eq!(STRATEGIES[0].id, "sector_rotation");
        assert_eq!(default_strategy().id, "sector_rotation");
    }

    #[test]
    fn test_unknown_id_gets_generic_series_names() {
        assert_eq!(series_names("nope"), ("Strategy", "Baseline"));
        assert_eq!(
            series_names("stgt_ensemble"),
            ("STGT Ensemble", "Sector Rotation")
        );
    }

    #[test]
    fn test_every_baseline_id_exists_in_catalog() {
        for s in STRATEGIES {
            assert!(find(s.baseline_id).is_some(), "{} baseline missing", s.id);
        }
    }
}
