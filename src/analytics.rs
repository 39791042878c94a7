//! Strategy analytics: fan-out fetch of performance, curve metrics, and
//! attribution, merged into one render-ready bundle, plus the pure
//! factor-tilt classification.

use tracing::warn;

use crate::api::types::{Attribution, CurveMetrics, PerformanceStat};
use crate::api::DashboardClient;

/// Everything the analytics panel needs for one strategy. Each section
/// degrades independently: failed performance -> empty rows, failed
/// curve metrics -> `None`, failed or upstream-errored attribution ->
/// `None` (both attribution sections hide entirely).
#[derive(Debug, Clone, Default)]
pub struct AnalyticsBundle {
    pub strategy_id: String,
    pub performance: Vec<PerformanceStat>,
    pub curve_metrics: Option<CurveMetrics>,
    pub attribution: Option<Attribution>,
}

/// Three concurrent fetches, all awaited before the bundle is produced.
pub async fn load_bundle(client: &DashboardClient, strategy_id: &str) -> AnalyticsBundle {
    let (performance, curve, attribution) = tokio::join!(
        client.trailing_performance(strategy_id),
        client.equity_curve(strategy_id),
        client.attribution(strategy_id),
    );

    let performance = performance.unwrap_or_else(|e| {
        warn!(strategy_id, error = %e, "performance section unavailable");
        Vec::new()
    });
    let curve_metrics = match curve {
        Ok(response) => response.metrics,
        Err(e) => {
            warn!(strategy_id, error = %e, "curve metrics unavailable");
            None
        }
    };
    let attribution = match attribution {
        Ok(attribution) => attribution,
        Err(e) => {
            warn!(strategy_id, error = %e, "attribution unavailable");
            None
        }
    };

    AnalyticsBundle {
        strategy_id: strategy_id.to_string(),
        performance,
        curve_metrics,
        attribution,
    }
}

// ---------------- Factor tilt classification ----------------

pub const SIZE_TILT_THRESHOLD: f64 = 0.1;
pub const VALUE_TILT_THRESHOLD: f64 = 0.1;
pub const PROFITABILITY_TILT_THRESHOLD: f64 = 0.05;
pub const MOMENTUM_TILT_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    Positive,
    Negative,
    Neutral,
}

/// Pure sign/threshold rule: same inputs always produce the same label.
pub fn classify_tilt(beta: f64, threshold: f64) -> Tilt {
    if beta > threshold {
        Tilt::Positive
    } else if beta < -threshold {
        Tilt::Negative
    } else {
        Tilt::Neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Size,
    Value,
    Profitability,
    Momentum,
}

impl Factor {
    pub fn threshold(&self) -> f64 {
        match self {
            Factor::Size => SIZE_TILT_THRESHOLD,
            Factor::Value => VALUE_TILT_THRESHOLD,
            Factor::Profitability => PROFITABILITY_TILT_THRESHOLD,
            Factor::Momentum => MOMENTUM_TILT_THRESHOLD,
        }
    }

    pub fn classify(&self, beta: f64) -> Tilt {
        classify_tilt(beta, self.threshold())
    }

    /// Badge text for each tilt direction.
    pub fn tilt_label(&self, tilt: Tilt) -> &'static str {
        match (self, tilt) {
            (Factor::Size, Tilt::Positive) => "Small-Cap Tilt",
            (Factor::Size, Tilt::Negative) => "Large-Cap Tilt",
            (Factor::Size, Tilt::Neutral) => "Cap-Neutral",
            (Factor::Value, Tilt::Positive) => "Value Tilt",
            (Factor::Value, Tilt::Negative) => "Growth Tilt",
            (Factor::Value, Tilt::Neutral) => "Style-Neutral",
            (Factor::Profitability, Tilt::Positive) => "Quality Tilt",
            (Factor::Profitability, Tilt::Negative) => "Junk Tilt",
            (Factor::Profitability, Tilt::Neutral) => "Quality-Neutral",
            (Factor::Momentum, Tilt::Positive) => "Momentum Tilt",
            (Factor::Momentum, Tilt::Negative) => "Reversal Tilt",
            (Factor::Momentum, Tilt::Neutral) => "Momentum-Neutral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tilt_threshold_rules() {
        assert_eq!(classify_tilt(0.15, 0.1), Tilt::Positive);
        assert_eq!(classify_tilt(-0.15, 0.1), Tilt::Negative);
        assert_eq!(classify_tilt(0.05, 0.1), Tilt::Neutral);
        // Boundary is neutral: strict inequality on both sides.
        assert_eq!(classify_tilt(0.1, 0.1), Tilt::Neutral);
        assert_eq!(classify_tilt(-0.1, 0.1), Tilt::Neutral);
    }

    #[test]
    fn test_factor_thresholds() {
        assert_eq!(Factor::Size.classify(0.07), Tilt::Neutral);
        assert_eq!(Factor::Profitability.classify(0.07), Tilt::Positive);
        assert_eq!(Factor::Momentum.classify(-0.07), Tilt::Negative);
    }

    #[test]
    fn test_tilt_labels() {
        assert_eq!(Factor::Size.tilt_label(Tilt::Positive), "Small-Cap Tilt");
        assert_eq!(Factor::Value.tilt_label(Tilt::Negative), "Growth Tilt");
        assert_eq!(Factor::Value.tilt_label(Tilt::Neutral), "Style-Neutral");
    }

    #[test]
    fn test_classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify_tilt(0.15, 0.1), Tilt::Positive);
        }
    }
}
