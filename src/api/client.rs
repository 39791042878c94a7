use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::types::{
    Attribution, AttributionResponse, EquityCurveResponse, LiveStats, MetricsResponse,
    PerformanceResponse, PerformanceStat, ProjectionRow, SimulationRequest, SimulationResponse,
};
use crate::config::Config;
use crate::error::DashboardError;

/// Thin typed client over the dashboard backend. One resolved base URL
/// for all requests; no retries and no reachability checks, so failures
/// surface to callers as `DashboardError::Transport`.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http_client: Client,
    base_url: Url,
}

impl DashboardClient {
    pub fn new(config: &Config) -> Result<Self, DashboardError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// GET `path` and decode the body as `T`. The body is parsed from
    /// text so a non-JSON or shape-mismatched response becomes a typed
    /// `Malformed` error instead of leaking into the derivation layer.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(url = %url, "GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DashboardError::malformed(path, e))
    }

    /// Full map of strategy id -> summary metrics. Fetched once per
    /// page load; consumers fall back to zero defaults on absence.
    #[instrument(skip(self))]
    pub async fn strategy_metrics(&self) -> Result<MetricsResponse, DashboardError> {
        self.get_json("/api/v1/backtest/metrics").await
    }

    /// Merged cumulative-return series plus curve-level risk metrics.
    #[instrument(skip(self))]
    pub async fn equity_curve(
        &self,
        strategy_id: &str,
    ) -> Result<EquityCurveResponse, DashboardError> {
        let path = format!("/api/v1/backtest/equity-curve/{strategy_id}");
        self.get_json(&path).await
    }

    /// Trailing performance rows (1 Day .. Max). An `{error}` body from
    /// upstream surfaces as `DashboardError::Upstream`.
    #[instrument(skip(self))]
    pub async fn trailing_performance(
        &self,
        strategy_id: &str,
    ) -> Result<Vec<PerformanceStat>, DashboardError> {
        let path = format!("/api/v1/backtest/strategy/{strategy_id}/performance");
        let response: PerformanceResponse = self.get_json(&path).await?;
        if let Some(error) = response.error {
            return Err(DashboardError::Upstream(error));
        }
        Ok(response.performance_analysis)
    }

    /// OLS factor attribution. `Ok(None)` means upstream reported the
    /// data as unavailable; the caller hides the section entirely.
    #[instrument(skip(self))]
    pub async fn attribution(
        &self,
        strategy_id: &str,
    ) -> Result<Option<Attribution>, DashboardError> {
        let path = format!("/api/v1/backtest/strategy/{strategy_id}/attribution");
        let response: AttributionResponse = self.get_json(&path).await?;
        Ok(response.into_option())
    }

    /// POST simulation parameters, returning percentile bands for
    /// months 0..=120.
    #[instrument(skip(self, request))]
    pub async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<Vec<ProjectionRow>, DashboardError> {
        let path = "/api/v1/simulation/simulate";
        let url = self.base_url.join(path)?;
        tracing::debug!(url = %url, initial = request.initial_investment, monthly = request.monthly_contribution, "POST");
        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let parsed: SimulationResponse =
            serde_json::from_str(&body).map_err(|e| DashboardError::malformed(path, e))?;
        Ok(parsed.projection)
    }

    /// Live model stats for the ticker banner.
    #[instrument(skip(self))]
    pub async fn live_stats(&self, strategy_id: &str) -> Result<LiveStats, DashboardError> {
        let path = format!("/api/v1/live/stats/{strategy_id}");
        self.get_json(&path).await
    }
}
