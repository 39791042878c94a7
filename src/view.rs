//! Page-root state: the selected strategy, the active tab, and the
//! staleness guard that keeps late-arriving fetch results from
//! overwriting a newer selection.
//!
//! No ambient singleton: the root owns these values and children receive
//! them as plain values plus callbacks, so the only cross-component
//! coupling is the strategy id itself.

use crate::curve::Period;
use crate::metrics::MetricsMap;
use crate::strategy_catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Historical,
    Projection,
}

/// Identifies which selection triggered a fetch. Responses carry their
/// ticket back; a response whose ticket no longer matches the current
/// generation is stale and must be dropped, not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub strategy_id: String,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub selected_strategy: String,
    pub active_tab: Tab,
    pub chart_period: Period,
    pub metrics: MetricsMap,
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            selected_strategy: strategy_catalog::default_strategy().id.to_string(),
            active_tab: Tab::default(),
            chart_period: Period::default(),
            metrics: MetricsMap::empty(),
            generation: 0,
        }
    }
}

impl DashboardState {
    pub fn new(metrics: MetricsMap) -> Self {
        DashboardState {
            metrics,
            ..Default::default()
        }
    }

    /// Change the selection and invalidate every outstanding ticket.
    pub fn select_strategy(&mut self, strategy_id: &str) -> FetchTicket {
        self.selected_strategy = strategy_id.to_string();
        self.generation += 1;
        self.ticket()
    }

    /// Ticket for a fetch keyed by the current selection.
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            strategy_id: self.selected_strategy.clone(),
            generation: self.generation,
        }
    }

    /// True when the ticket still matches the current selection; stale
    /// results must be discarded by the caller.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && ticket.strategy_id == self.selected_strategy
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Period changes re-derive only; they never invalidate fetches.
    pub fn set_chart_period(&mut self, period: Period) {
        self.chart_period = period;
    }

    pub fn selected_metrics(&self) -> crate::api::types::StrategyMetrics {
        self.metrics.get_or_default(&self.selected_strategy)
    }

    /// Metrics for the baseline paired with the current selection.
    pub fn baseline_metrics(&self) -> crate::api::types::StrategyMetrics {
        let baseline_id = strategy_catalog::find(&self.selected_strategy)
            .map(|info| info.baseline_id)
            .unwrap_or("risk_parity");
        self.metrics.get_or_default(baseline_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ticket_is_rejected_after_reselection() {
        let mut state = DashboardState::default();
        let old_ticket = state.select_strategy("sector_rotation");
        assert!(state.is_current(&old_ticket));

        // A new selection supersedes the in-flight fetch.
        let new_ticket = state.select_strategy("mag7_momentum");
        assert!(!state.is_current(&old_ticket));
        assert!(state.is_current(&new_ticket));
    }

    #[test]
    fn test_reselecting_same_strategy_still_invalidates_old_ticket() {
        let mut state = DashboardState::default();
        let first = state.select_strategy("sector_rotation");
        let second = state.select_strategy("sector_rotation");
        // Re-selection is a fresh fetch; the superseded response loses.
        assert!(!state.is_current(&first));
        assert!(state.is_current(&second));
    }

    #[test]
    fn test_period_change_does_not_invalidate_tickets() {
        let mut state = DashboardState::default();
        let ticket = state.select_strategy("sector_rotation");
        state.set_chart_period(Period::FiveYears);
        assert!(state.is_current(&ticket));
    }

    #[test]
    fn test_default_selection_is_catalog_head() {
        let state = DashboardState::default();
        assert_eq!(state.selected_strategy, "sector_rotation");
        assert_eq!(state.active_tab, Tab::Historical);
    }
}
