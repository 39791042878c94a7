//! Equity-curve windowing and rebasing.
//!
//! The full series is fetched once per strategy change; the displayed
//! subseries is derived purely client-side. Changing the period re-runs
//! the derivation only and never touches the network.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::warn;

use crate::api::types::{CurveMetrics, TimeSeriesPoint};
use crate::api::DashboardClient;
use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    FiveYears,
    TenYears,
    #[default]
    Max,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::FiveYears => "5Y",
            Period::TenYears => "10Y",
            Period::Max => "Max",
        }
    }

    fn years(&self) -> Option<i32> {
        match self {
            Period::FiveYears => Some(5),
            Period::TenYears => Some(10),
            Period::Max => None,
        }
    }
}

/// Calendar-year subtraction (not trading days). Feb 29 clamps to
/// Feb 28 when the target year is not a leap year.
fn window_cutoff(today: NaiveDate, years: i32) -> NaiveDate {
    let year = today.year() - years;
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).expect("Feb 28 always exists"))
}

/// Window `series` to the selected period and rebase both cumulative
/// series to 0% at the window's first point.
///
/// - `Max` is the identity: the series is returned unchanged.
/// - An empty windowed slice is `Ok(empty)`; the caller renders the
///   "no data for window" state.
/// - A window starting at exactly -100% cumulative return has no
///   defined rebase and is a typed error, never an `Infinity`.
///
/// Date filtering compares ISO strings directly, valid because dates
/// are zero-padded `YYYY-MM-DD`.
pub fn window_and_rebase(
    series: &[TimeSeriesPoint],
    period: Period,
    today: NaiveDate,
) -> Result<Vec<TimeSeriesPoint>, DashboardError> {
    let Some(years) = period.years() else {
        return Ok(series.to_vec());
    };

    let cutoff = window_cutoff(today, years).format("%Y-%m-%d").to_string();
    let slice: Vec<&TimeSeriesPoint> = series
        .iter()
        .filter(|p| p.date.as_str() >= cutoff.as_str())
        .collect();

    let Some(first) = slice.first() else {
        return Ok(Vec::new());
    };

    let b0 = 1.0 + first.stgt;
    let bl0 = 1.0 + first.baseline;
    if b0 == 0.0 || bl0 == 0.0 {
        return Err(DashboardError::RebaseUndefined {
            date: first.date.clone(),
        });
    }

    Ok(slice
        .into_iter()
        .map(|p| {
            let stgt = (1.0 + p.stgt) / b0 - 1.0;
            let baseline = (1.0 + p.baseline) / bl0 - 1.0;
            TimeSeriesPoint {
                date: p.date.clone(),
                stgt,
                baseline,
                relative: stgt - baseline,
            }
        })
        .collect())
}

/// View state for the interactive chart: the fetched series, its curve
/// metrics, and the period-derived subseries actually displayed.
#[derive(Debug, Clone, Default)]
pub struct CurveView {
    pub strategy_id: String,
    series: Vec<TimeSeriesPoint>,
    pub metrics: Option<CurveMetrics>,
    period: Period,
    displayed: Vec<TimeSeriesPoint>,
}

impl CurveView {
    /// Fetch the full series for `strategy_id`. Runs once per strategy
    /// change; a failed fetch logs and leaves the view empty rather
    /// than surfacing an error to the caller.
    pub async fn load(client: &DashboardClient, strategy_id: &str) -> Self {
        let mut view = CurveView {
            strategy_id: strategy_id.to_string(),
            ..Default::default()
        };
        match client.equity_curve(strategy_id).await {
            Ok(response) => {
                view.series = response.timeseries;
                view.metrics = response.metrics;
            }
            Err(e) => {
                warn!(strategy_id, error = %e, "failed to fetch equity curve");
            }
        }
        view.rederive(Utc::now().date_naive());
        view
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Change the display window. Derivation only; no network.
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        self.rederive(Utc::now().date_naive());
    }

    fn rederive(&mut self, today: NaiveDate) {
        self.displayed = match window_and_rebase(&self.series, self.period, today) {
            Ok(points) => points,
            Err(e) => {
                warn!(strategy_id = %self.strategy_id, error = %e, "curve derivation failed");
                Vec::new()
            }
        };
    }

    /// The period-windowed, rebased subseries. Empty either because no
    /// data exists for the window or because the fetch failed; both
    /// render the explicit empty state.
    pub fn display_series(&self) -> &[TimeSeriesPoint] {
        &self.displayed
    }

    pub fn has_data(&self) -> bool {
        !self.displayed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, stgt: f64, baseline: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: date.to_string(),
            stgt,
            baseline,
            relative: stgt - baseline,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_max_period_is_identity() {
        let series = vec![point("2010-01-04", 0.0, 0.0), point("2024-06-14", 4.2, 2.9)];
        let out = window_and_rebase(&series, Period::Max, today()).unwrap();
        assert_eq!(out, series);
    }

    #[test]
    fn test_windowed_output_starts_at_exactly_zero() {
        let series = vec![
            point("2015-03-02", 0.8, 0.5),
            point("2020-01-01", 1.5, 0.9),
            point("2022-06-01", 2.1, 1.2),
        ];
        for period in [Period::FiveYears, Period::TenYears] {
            let out = window_and_rebase(&series, period, today()).unwrap();
            assert!(!out.is_empty());
            assert_eq!(out[0].stgt, 0.0);
            assert_eq!(out[0].baseline, 0.0);
            assert_eq!(out[0].relative, 0.0);
        }
    }

    #[test]
    fn test_rebase_matches_hand_computed_values() {
        // 5y cutoff at 2019-06-15 keeps both points.
        let series = vec![
            point("2020-01-01", 0.5, 0.3),
            point("2020-06-01", 0.6, 0.35),
        ];
        let out = window_and_rebase(&series, Period::FiveYears, today()).unwrap();
        assert_eq!(out[0].stgt, 0.0);
        assert_eq!(out[0].baseline, 0.0);
        assert!((out[1].stgt - (1.6 / 1.5 - 1.0)).abs() < 1e-12);
        assert!((out[1].baseline - (1.35 / 1.3 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_window_older_than_history_is_empty_not_error() {
        let series = vec![point("2005-01-03", 0.2, 0.1)];
        let out = window_and_rebase(&series, Period::FiveYears, today()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_rebase_at_total_loss_is_typed_error() {
        let series = vec![point("2020-01-01", -1.0, 0.3)];
        let err = window_and_rebase(&series, Period::FiveYears, today()).unwrap_err();
        assert!(matches!(err, DashboardError::RebaseUndefined { .. }));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let series = vec![
            point("2020-01-01", 0.5, 0.3),
            point("2020-06-01", 0.6, 0.35),
        ];
        let a = window_and_rebase(&series, Period::FiveYears, today()).unwrap();
        let b = window_and_rebase(&series, Period::FiveYears, today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cutoff_clamps_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            window_cutoff(leap, 5),
            NaiveDate::from_ymd_opt(2019, 2, 28).unwrap()
        );
        assert_eq!(
            window_cutoff(leap, 4),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
    }
}
