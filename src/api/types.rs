use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary metrics for one strategy, as served by `/backtest/metrics`.
///
/// All fields are decimal percentages (13.6 means 13.6%). `max_dd` is
/// signed, negative-for-loss. `Default` is the all-zero fallback used
/// whenever a strategy id is absent from the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyMetrics {
    #[serde(default)]
    pub cagr: f64,
    #[serde(default)]
    pub volatility: f64,
    #[serde(default)]
    pub sharpe: f64,
    #[serde(default)]
    pub max_dd: f64,
    #[serde(default)]
    pub ytd: f64,
}

pub type MetricsResponse = HashMap<String, StrategyMetrics>;

/// One trading day of the combined equity curve. `stgt` and `baseline`
/// are cumulative fractional returns since inception (0.0799 = +7.99%),
/// not rebased; `relative` is the precomputed excess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String, // zero-padded ISO "YYYY-MM-DD"
    #[serde(rename = "STGT")]
    pub stgt: f64,
    #[serde(rename = "Baseline")]
    pub baseline: f64,
    #[serde(rename = "Relative", default)]
    pub relative: f64,
}

/// Scalar risk-adjusted summary over the full history of one curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveMetrics {
    pub sharpe: f64,
    pub sortino: f64,
    pub calmar: f64,
    pub information_ratio: f64,
    pub alpha_pct: f64,
    pub beta: f64,
    pub max_dd_duration: i64, // trading days underwater
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquityCurveResponse {
    #[serde(default)]
    pub timeseries: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub metrics: Option<CurveMetrics>,
}

/// One row of the trailing-performance table. `period` is drawn from a
/// fixed closed vocabulary ("1 Day" .. "Max"); lookups are by exact
/// label match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStat {
    pub period: String,
    pub performance: f64, // percent
    pub volatility: f64,  // percent, annualized
    pub is_annualized: bool,
}

/// The performance endpoint answers either rows or `{"error": ...}` when
/// the strategy has no data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformanceResponse {
    #[serde(default)]
    pub performance_analysis: Vec<PerformanceStat>,
    #[serde(default)]
    pub error: Option<String>,
}

/// OLS factor-regression outputs plus model-fit diagnostics.
/// Profitability and momentum betas only appear when the backend runs
/// the extended five-factor model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribution {
    pub alpha_ann_pct: f64,
    pub beta_market: f64,
    pub beta_size: f64,
    pub beta_value: f64,
    #[serde(default)]
    pub beta_profitability: Option<f64>,
    #[serde(default)]
    pub beta_momentum: Option<f64>,
    pub r_squared: f64,
    pub tracking_error_pct: f64,
    pub information_ratio: f64,
    pub win_rate_pct: f64,
    pub n_observations: u64,
}

/// The attribution endpoint returns either the full regression or an
/// `{error}` body when data is unavailable. The error shape must be
/// treated as "no attribution", never a partial result.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttributionResponse {
    Ready(Attribution),
    Unavailable {
        error: String,
        #[serde(default)]
        strategy_id: Option<String>,
    },
}

impl AttributionResponse {
    pub fn into_option(self) -> Option<Attribution> {
        match self {
            AttributionResponse::Ready(attribution) => Some(attribution),
            AttributionResponse::Unavailable { error, .. } => {
                tracing::debug!(reason = %error, "attribution unavailable upstream");
                None
            }
        }
    }
}

/// POST body for `/simulation/simulate`. CAGR/volatility values are
/// decimal percentages, matching the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub base_cagr: f64,
    pub base_volatility: f64,
    pub years: u32,
}

/// One simulated month of the dual Monte Carlo projection, months
/// 0..=120 over the fixed 10-year horizon. Dollar amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub month: u32,
    pub pessimistic: f64, // 10th percentile
    pub expected: f64,    // 50th percentile
    pub optimistic: f64,  // 90th percentile
    #[serde(default)]
    pub base_pessimistic: f64,
    #[serde(default)]
    pub base_expected: f64,
    #[serde(default)]
    pub base_optimistic: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub projection: Vec<ProjectionRow>,
}

/// Live model stats for the ticker banner, `/live/stats/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveStats {
    pub last_updated: String,
    pub ytd_return: f64,
    pub current_drawdown: f64,
    pub rolling_30d_vol: f64,
    pub status: String,
}
