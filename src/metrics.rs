//! Page-level metrics map: one fetch per process start, zero-valued
//! defaults for every consumer until (or unless) it lands.

use std::collections::HashMap;
use tracing::warn;

use crate::api::types::StrategyMetrics;
use crate::api::DashboardClient;

/// Map of strategy id -> summary metrics. Absence of an id (or of the
/// whole map, after a failed fetch) yields the zero default, never a
/// null propagated into arithmetic.
#[derive(Debug, Clone, Default)]
pub struct MetricsMap {
    by_strategy: HashMap<String, StrategyMetrics>,
}

impl MetricsMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_response(by_strategy: HashMap<String, StrategyMetrics>) -> Self {
        Self { by_strategy }
    }

    pub fn get_or_default(&self, strategy_id: &str) -> StrategyMetrics {
        self.by_strategy
            .get(strategy_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_strategy.is_empty()
    }
}

/// Issued exactly once per page load; selection changes never re-trigger
/// it. Failure (network or malformed body) logs and leaves the map
/// empty so the UI renders immediately with defaults.
pub async fn load_metrics(client: &DashboardClient) -> MetricsMap {
    match client.strategy_metrics().await {
        Ok(response) => MetricsMap::from_response(response),
        Err(e) => {
            warn!(error = %e, "failed to load strategy metrics, falling back to defaults");
            MetricsMap::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_strategy_yields_zero_default() {
        let map = MetricsMap::empty();
        let m = map.get_or_default("sector_rotation");
        assert_eq!(m.cagr, 0.0);
        assert_eq!(m.sharpe, 0.0);
        assert_eq!(m.max_dd, 0.0);
    }

    #[test]
    fn test_present_strategy_returns_fetched_metrics() {
        let mut by_strategy = HashMap::new();
        by_strategy.insert(
            "sector_rotation".to_string(),
            StrategyMetrics {
                cagr: 26.18,
                volatility: 22.92,
                sharpe: 1.13,
                max_dd: -32.82,
                ytd: 0.0,
            },
        );
        let map = MetricsMap::from_response(by_strategy);
        let m = map.get_or_default("sector_rotation");
        assert_eq!(m.cagr, 26.18);
        assert_eq!(m.sharpe, 1.13);
    }
}
