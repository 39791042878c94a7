//! Terminal presentation of the derived view state. Pure functions of
//! the data: absence renders explicit placeholders, never a panic.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::analytics::{AnalyticsBundle, Factor, Tilt};
use crate::api::types::{LiveStats, StrategyMetrics};
use crate::curve::CurveView;
use crate::performance::{self, PerformanceView};
use crate::projection::ProjectionView;
use crate::strategy_catalog::StrategyInfo;

fn signed_pct(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

fn usd(value: f64) -> String {
    format!("${:.0}", value)
}

/// One sidebar card: headline metrics for a strategy.
pub fn strategy_card(info: &StrategyInfo, metrics: &StrategyMetrics, selected: bool) -> Table {
    let marker = if selected { "> " } else { "  " };
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(format!("{marker}{}", info.name))]);
    table.add_row(vec![format!(
        "CAGR {:.2}%   Sharpe {:.2}   MaxDD {:.2}%   YTD {}",
        metrics.cagr,
        metrics.sharpe,
        metrics.max_dd,
        signed_pct(metrics.ytd)
    )]);
    table
}

/// Trailing-performance table: key periods always, short-term rows only
/// while toggled open. The YTD row is injected from the metrics map.
pub fn performance_table(view: &PerformanceView, metrics: &StrategyMetrics) -> Table {
    let ytd = performance::ytd_row(metrics);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Period", "Return", "Type", "Ann. Vol"]);

    for period in view.visible_periods() {
        let stat = if period == "YTD" {
            Some(&ytd)
        } else {
            view.lookup(period)
        };
        let label = if performance::is_highlighted(period) {
            format!("{period} [KEY]")
        } else {
            period.to_string()
        };
        let kind = match stat {
            Some(s) if s.is_annualized => "Annualized",
            Some(_) => "Cumulative",
            None => "—",
        };
        table.add_row(vec![
            label,
            performance::format_return(stat),
            kind.to_string(),
            performance::format_volatility(stat),
        ]);
    }
    table
}

/// Cumulative chart header: metrics strip plus the windowed series
/// bounds, or the explicit empty state.
pub fn curve_summary(view: &CurveView, series_name: &str, baseline_name: &str) -> String {
    let mut out = String::new();
    if let Some(m) = &view.metrics {
        out.push_str(&format!(
            "Sharpe {:.2} | Sortino {:.2} | Calmar {:.2} | IR {:.2} | Alpha {} | Beta {:.2} | DD {}d\n",
            m.sharpe,
            m.sortino,
            m.calmar,
            m.information_ratio,
            signed_pct(m.alpha_pct),
            m.beta,
            m.max_dd_duration
        ));
    }
    let points = view.display_series();
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&format!(
                "{} [{}] {} .. {}: {} {} vs {} {}\n",
                series_name,
                view.period().label(),
                first.date,
                last.date,
                signed_pct(last.stgt * 100.0),
                series_name,
                signed_pct(last.baseline * 100.0),
                baseline_name,
            ));
        }
        _ => out.push_str(&format!("No data for {} window\n", view.period().label())),
    }
    out
}

/// Analytics panel. Attribution sections are omitted entirely when the
/// bundle carries no attribution.
pub fn analytics_panel(bundle: &AnalyticsBundle, metrics: &StrategyMetrics) -> String {
    let mut out = String::new();

    out.push_str("== Period Returns ==\n");
    let perf = PerformanceView::from_rows(&bundle.strategy_id, bundle.performance.clone());
    let ytd = performance::ytd_row(metrics);
    for period in perf.visible_periods() {
        let stat = if period == "YTD" {
            Some(&ytd)
        } else {
            perf.lookup(period)
        };
        out.push_str(&format!("{period}: {}\n", performance::format_return(stat)));
    }

    out.push_str("== Risk Profile ==\n");
    out.push_str(&format!(
        "Max Drawdown {:.2}%   Ann. Volatility {:.2}%\n",
        metrics.max_dd, metrics.volatility
    ));

    if let Some(m) = &bundle.curve_metrics {
        out.push_str("== Risk-Adjusted Performance ==\n");
        out.push_str(&format!(
            "Sharpe {:.2}   Sortino {:.2}   Calmar {:.2}   Info Ratio {:.2}   Alpha {}   Beta {:.2}\n",
            m.sharpe,
            m.sortino,
            m.calmar,
            m.information_ratio,
            signed_pct(m.alpha_pct),
            m.beta
        ));
    }

    if let Some(attribution) = &bundle.attribution {
        out.push_str("== Market Attribution (OLS vs SPY) ==\n");
        out.push_str(&format!(
            "Alpha (ann.) {}   Market Beta {:.2}   R² {:.1}%   Tracking Error {:.2}%\n",
            signed_pct(attribution.alpha_ann_pct),
            attribution.beta_market,
            attribution.r_squared * 100.0,
            attribution.tracking_error_pct
        ));
        out.push_str(&format!(
            "Info Ratio {:.2}   Win Rate {:.1}% over {} trading days\n",
            attribution.information_ratio, attribution.win_rate_pct, attribution.n_observations
        ));

        out.push_str("== Factor Attribution (Fama-French proxies) ==\n");
        out.push_str(&factor_line(Factor::Size, attribution.beta_size));
        out.push_str(&factor_line(Factor::Value, attribution.beta_value));
        if let Some(beta) = attribution.beta_profitability {
            out.push_str(&factor_line(Factor::Profitability, beta));
        }
        if let Some(beta) = attribution.beta_momentum {
            out.push_str(&factor_line(Factor::Momentum, beta));
        }
    }

    out
}

fn factor_line(factor: Factor, beta: f64) -> String {
    let tilt = factor.classify(beta);
    let sign = if beta >= 0.0 { "+" } else { "" };
    format!(
        "{:?} beta {sign}{beta:.3} -> {}\n",
        factor,
        factor.tilt_label(tilt)
    )
}

/// Projection summary card derived from the final simulated month.
pub fn projection_summary(view: &ProjectionView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Total Invested", "Expected Gain", "Return", "Vs Baseline"]);
    match &view.summary {
        Some(s) => {
            table.add_row(vec![
                usd(s.total_invested),
                usd(s.gain),
                signed_pct(s.return_pct),
                usd(s.outperformance),
            ]);
        }
        None => {
            table.add_row(vec!["—", "—", "—", "—"]);
        }
    }
    table
}

/// One-line live ticker, the terminal cousin of the sticky banner.
pub fn live_banner(stats: &LiveStats) -> String {
    format!(
        "LIVE {} | YTD {} | Drawdown {:.2}% | 30D Vol {:.2}% | updated {}",
        stats.status,
        signed_pct(stats.ytd_return),
        stats.current_drawdown,
        stats.rolling_30d_vol,
        stats.last_updated
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Attribution;

    fn attribution() -> Attribution {
        Attribution {
            alpha_ann_pct: 3.2,
            beta_market: 0.91,
            beta_size: -0.15,
            beta_value: 0.04,
            beta_profitability: None,
            beta_momentum: None,
            r_squared: 0.87,
            tracking_error_pct: 5.1,
            information_ratio: 0.63,
            win_rate_pct: 53.4,
            n_observations: 2514,
        }
    }

    #[test]
    fn test_panel_hides_attribution_when_absent() {
        let bundle = AnalyticsBundle {
            strategy_id: "sector_rotation".to_string(),
            performance: Vec::new(),
            curve_metrics: None,
            attribution: None,
        };
        let out = analytics_panel(&bundle, &StrategyMetrics::default());
        assert!(!out.contains("Attribution"));
        assert!(out.contains("Risk Profile"));
    }

    #[test]
    fn test_panel_shows_both_attribution_sections_when_present() {
        let bundle = AnalyticsBundle {
            strategy_id: "sector_rotation".to_string(),
            performance: Vec::new(),
            curve_metrics: None,
            attribution: Some(attribution()),
        };
        let out = analytics_panel(&bundle, &StrategyMetrics::default());
        assert!(out.contains("Market Attribution"));
        assert!(out.contains("Factor Attribution"));
        assert!(out.contains("Large-Cap Tilt"));
        assert!(out.contains("Style-Neutral"));
    }

    #[test]
    fn test_empty_projection_renders_placeholders() {
        let view = ProjectionView::default();
        let rendered = projection_summary(&view).to_string();
        assert!(rendered.contains("—"));
    }

    #[test]
    fn test_empty_curve_renders_no_data_state() {
        let view = CurveView::default();
        let out = curve_summary(&view, "Strategy", "Baseline");
        assert!(out.contains("No data for"));
    }
}
