//! Monte Carlo projection: debounced simulation requests driven by the
//! two wealth sliders plus the selected/baseline strategy parameters,
//! and the summary figures derived from the final projected month.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::debug;

use crate::api::types::{ProjectionRow, SimulationRequest};
use crate::error::DashboardError;

pub const INITIAL_INVESTMENT_MIN: f64 = 10_000.0;
pub const INITIAL_INVESTMENT_MAX: f64 = 1_000_000.0;
pub const INITIAL_INVESTMENT_STEP: f64 = 10_000.0;

pub const MONTHLY_CONTRIBUTION_MIN: f64 = 0.0;
pub const MONTHLY_CONTRIBUTION_MAX: f64 = 20_000.0;
pub const MONTHLY_CONTRIBUTION_STEP: f64 = 500.0;

pub const PROJECTION_YEARS: u32 = 10;
pub const PROJECTION_MONTHS: u32 = PROJECTION_YEARS * 12;

/// Slider drags settle for this long before a request fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// The six inputs that parameterize one simulation request. Any change
/// to any of them restarts the debounce window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub base_cagr: f64,
    pub base_volatility: f64,
}

impl SimulationParams {
    /// Clamp the sliders into their domains.
    pub fn clamped(mut self) -> Self {
        self.initial_investment = self
            .initial_investment
            .clamp(INITIAL_INVESTMENT_MIN, INITIAL_INVESTMENT_MAX);
        self.monthly_contribution = self
            .monthly_contribution
            .clamp(MONTHLY_CONTRIBUTION_MIN, MONTHLY_CONTRIBUTION_MAX);
        self
    }

    pub fn to_request(&self) -> SimulationRequest {
        SimulationRequest {
            initial_investment: self.initial_investment,
            monthly_contribution: self.monthly_contribution,
            cagr: self.cagr,
            volatility: self.volatility,
            base_cagr: self.base_cagr,
            base_volatility: self.base_volatility,
            years: PROJECTION_YEARS,
        }
    }
}

pub struct SimulationOutcome {
    pub params: SimulationParams,
    pub result: Result<Vec<ProjectionRow>, DashboardError>,
}

/// Spawn the debounce loop: every change on `params_rx` restarts a
/// 300ms window; once the inputs settle, exactly one request runs with
/// the latest values and its outcome is delivered on the returned
/// channel. At most one request is in flight per settling period;
/// changes arriving while a request runs coalesce into the next window.
pub fn spawn_debounced_simulator<F, Fut>(
    mut params_rx: watch::Receiver<SimulationParams>,
    run: F,
) -> mpsc::Receiver<SimulationOutcome>
where
    F: Fn(SimulationParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<ProjectionRow>, DashboardError>> + Send + 'static,
{
    let (outcome_tx, outcome_rx) = mpsc::channel(8);

    tokio::spawn(async move {
        while params_rx.changed().await.is_ok() {
            // Restart the window until the sliders go quiet.
            loop {
                tokio::select! {
                    _ = time::sleep(DEBOUNCE_WINDOW) => break,
                    changed = params_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }

            let params = params_rx.borrow_and_update().clamped();
            debug!(
                initial = params.initial_investment,
                monthly = params.monthly_contribution,
                "debounce window settled, running simulation"
            );
            let result = run(params).await;
            if outcome_tx
                .send(SimulationOutcome { params, result })
                .await
                .is_err()
            {
                return;
            }
        }
    });

    outcome_rx
}

/// Summary deltas derived from the final projected month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSummary {
    pub total_invested: f64,
    pub gain: f64,
    pub return_pct: f64,
    pub outperformance: f64,
}

impl ProjectionSummary {
    /// Computed from the **last** row only; `None` when the projection
    /// is empty. `return_pct` is guarded against a zero denominator.
    pub fn from_projection(params: &SimulationParams, rows: &[ProjectionRow]) -> Option<Self> {
        let last = rows.last()?;
        let total_invested =
            params.initial_investment + params.monthly_contribution * PROJECTION_MONTHS as f64;
        let gain = last.expected - total_invested;
        let return_pct = if total_invested == 0.0 {
            0.0
        } else {
            gain / total_invested * 100.0
        };
        Some(ProjectionSummary {
            total_invested,
            gain,
            return_pct,
            outperformance: last.expected - last.base_expected,
        })
    }
}

/// Chart-side view state. Previously rendered rows stay on screen while
/// a new request is in flight (the loading overlay gates the chart, it
/// does not unmount it).
#[derive(Debug, Clone, Default)]
pub struct ProjectionView {
    pub rows: Vec<ProjectionRow>,
    pub summary: Option<ProjectionSummary>,
    pub loading: bool,
}

impl ProjectionView {
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Apply a settled outcome. A failed request clears the loading
    /// gate but keeps the stale rows visible.
    pub fn apply(&mut self, outcome: &SimulationOutcome) {
        self.loading = false;
        match &outcome.result {
            Ok(rows) => {
                self.summary = ProjectionSummary::from_projection(&outcome.params, rows);
                self.rows = rows.clone();
            }
            Err(e) => {
                tracing::warn!(error = %e, "simulation request failed, keeping previous projection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn params(initial: f64, monthly: f64) -> SimulationParams {
        SimulationParams {
            initial_investment: initial,
            monthly_contribution: monthly,
            cagr: 13.6,
            volatility: 17.58,
            base_cagr: 13.02,
            base_volatility: 16.1,
        }
    }

    fn row(month: u32, expected: f64, base_expected: f64) -> ProjectionRow {
        ProjectionRow {
            month,
            pessimistic: expected * 0.6,
            expected,
            optimistic: expected * 1.5,
            base_pessimistic: base_expected * 0.6,
            base_expected,
            base_optimistic: base_expected * 1.5,
        }
    }

    #[test]
    fn test_summary_uses_last_row_only() {
        let p = params(100_000.0, 1_000.0);
        let rows = vec![row(0, 100_000.0, 100_000.0), row(120, 450_000.0, 400_000.0)];
        let summary = ProjectionSummary::from_projection(&p, &rows).unwrap();
        assert_eq!(summary.total_invested, 100_000.0 + 1_000.0 * 120.0);
        assert_eq!(summary.gain, 450_000.0 - 220_000.0);
        assert!((summary.return_pct - (230_000.0 / 220_000.0 * 100.0)).abs() < 1e-9);
        assert_eq!(summary.outperformance, 50_000.0);
    }

    #[test]
    fn test_summary_of_empty_projection_is_none() {
        let p = params(100_000.0, 1_000.0);
        assert!(ProjectionSummary::from_projection(&p, &[]).is_none());
    }

    #[test]
    fn test_summary_guards_zero_invested() {
        let p = params(0.0, 0.0);
        let rows = vec![row(120, 1_000.0, 900.0)];
        let summary = ProjectionSummary::from_projection(&p, &rows).unwrap();
        assert_eq!(summary.return_pct, 0.0);
    }

    #[test]
    fn test_params_clamp_to_slider_domains() {
        let p = params(5_000.0, 50_000.0).clamped();
        assert_eq!(p.initial_investment, INITIAL_INVESTMENT_MIN);
        assert_eq!(p.monthly_contribution, MONTHLY_CONTRIBUTION_MAX);
    }

    #[test]
    fn test_view_keeps_stale_rows_while_loading_and_on_failure() {
        let mut view = ProjectionView::default();
        let p = params(100_000.0, 1_000.0);
        view.apply(&SimulationOutcome {
            params: p,
            result: Ok(vec![row(120, 450_000.0, 400_000.0)]),
        });
        assert_eq!(view.rows.len(), 1);

        view.begin_loading();
        assert!(view.loading);
        assert_eq!(view.rows.len(), 1); // stale-while-revalidate

        view.apply(&SimulationOutcome {
            params: p,
            result: Err(DashboardError::Upstream("boom".to_string())),
        });
        assert!(!view.loading);
        assert_eq!(view.rows.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_six_rapid_changes_fire_one_request_with_last_values() {
        let (params_tx, params_rx) = watch::channel(params(100_000.0, 1_000.0));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_runner = Arc::clone(&calls);

        let mut outcomes = spawn_debounced_simulator(params_rx, move |_| {
            let calls = Arc::clone(&calls_in_runner);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, DashboardError>(Vec::new())
            }
        });

        // Six rapid changes, 20ms apart, all inside one 300ms window.
        for step in 1..=6u32 {
            params_tx
                .send(params(100_000.0 + 10_000.0 * step as f64, 500.0 * step as f64))
                .unwrap();
            time::advance(Duration::from_millis(20)).await;
        }

        time::advance(DEBOUNCE_WINDOW).await;
        let outcome = outcomes.recv().await.expect("one outcome");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.params.initial_investment, 160_000.0);
        assert_eq!(outcome.params.monthly_contribution, 3_000.0);

        // Nothing else pending once the window settled.
        time::advance(DEBOUNCE_WINDOW).await;
        assert!(outcomes.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_changes_after_settling_fire_again() {
        let (params_tx, params_rx) = watch::channel(params(100_000.0, 1_000.0));
        let mut outcomes =
            spawn_debounced_simulator(params_rx, |_| async { Ok::<_, DashboardError>(Vec::new()) });

        params_tx.send(params(200_000.0, 1_000.0)).unwrap();
        time::advance(DEBOUNCE_WINDOW).await;
        assert!(outcomes.recv().await.is_some());

        params_tx.send(params(300_000.0, 1_000.0)).unwrap();
        time::advance(DEBOUNCE_WINDOW).await;
        let second = outcomes.recv().await.unwrap();
        assert_eq!(second.params.initial_investment, 300_000.0);
    }
}
