//! Trailing-performance table: fetch per strategy change, partition the
//! fixed period vocabulary into always-shown key rows and a toggleable
//! short-term group, and look rows up by exact label.

use tracing::warn;

use crate::api::types::{PerformanceStat, StrategyMetrics};
use crate::api::DashboardClient;

/// Always shown. The YTD row is not served by the performance endpoint;
/// it is injected from the metrics map via [`ytd_row`].
pub const KEY_PERIODS: [&str; 6] = ["YTD", "1 Year", "3 Years", "5 Years", "10 Years", "Max"];

/// Shown only while the in-session toggle is open.
pub const SHORT_PERIODS: [&str; 4] = ["1 Day", "1 Week", "1 Month", "1 Quarter"];

/// 5- and 10-year rows get the KEY highlight in the rendered table.
pub fn is_highlighted(period: &str) -> bool {
    period == "5 Years" || period == "10 Years"
}

/// View state for the trailing-performance table of one strategy.
#[derive(Debug, Clone, Default)]
pub struct PerformanceView {
    pub strategy_id: String,
    rows: Vec<PerformanceStat>,
    /// In-session only; resets on reload.
    pub show_short_term: bool,
}

impl PerformanceView {
    /// Fetch rows for `strategy_id`. Failure logs and leaves the table
    /// empty; every period then renders its placeholder.
    pub async fn load(client: &DashboardClient, strategy_id: &str) -> Self {
        let rows = match client.trailing_performance(strategy_id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(strategy_id, error = %e, "failed to fetch trailing performance");
                Vec::new()
            }
        };
        PerformanceView {
            strategy_id: strategy_id.to_string(),
            rows,
            show_short_term: false,
        }
    }

    pub fn from_rows(strategy_id: &str, rows: Vec<PerformanceStat>) -> Self {
        PerformanceView {
            strategy_id: strategy_id.to_string(),
            rows,
            show_short_term: false,
        }
    }

    /// Exact label match against the closed vocabulary; a missing
    /// period is `None` (rendered as the placeholder), never an error.
    pub fn lookup(&self, period: &str) -> Option<&PerformanceStat> {
        self.rows.iter().find(|stat| stat.period == period)
    }

    pub fn toggle_short_term(&mut self) {
        self.show_short_term = !self.show_short_term;
    }

    /// Period labels currently visible, in display order.
    pub fn visible_periods(&self) -> Vec<&'static str> {
        let mut periods: Vec<&'static str> = KEY_PERIODS.to_vec();
        if self.show_short_term {
            periods.extend(SHORT_PERIODS);
        }
        periods
    }
}

/// The YTD row comes from the metrics API, not the performance endpoint.
pub fn ytd_row(metrics: &StrategyMetrics) -> PerformanceStat {
    PerformanceStat {
        period: "YTD".to_string(),
        performance: metrics.ytd,
        volatility: metrics.volatility,
        is_annualized: false,
    }
}

/// Sign-prefixed percent, or the explicit placeholder for a missing row.
pub fn format_return(stat: Option<&PerformanceStat>) -> String {
    match stat {
        Some(stat) => {
            let sign = if stat.performance > 0.0 { "+" } else { "" };
            let badge = if stat.is_annualized { " ann" } else { "" };
            format!("{sign}{:.2}%{badge}", stat.performance)
        }
        None => "—".to_string(),
    }
}

pub fn format_volatility(stat: Option<&PerformanceStat>) -> String {
    match stat {
        Some(stat) => format!("{:.1}%", stat.volatility),
        None => "—".to_string(),
    }
}
