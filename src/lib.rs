//! Client-side data layer of the quant-investing dashboard.
//!
//! Fetches precomputed backtest metrics, equity curves, trailing
//! performance, factor attribution, and Monte Carlo projections from the
//! backend REST API, and derives presentation-ready statistics from the
//! raw payloads. All numeric heavy lifting happens upstream; this crate
//! owns the fetch orchestration, the typed boundary, and the client-side
//! derivations (windowing/rebasing, period partitioning, tilt
//! classification, debounced simulation requests).

pub mod analytics;
pub mod api;
pub mod config;
pub mod curve;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod performance;
pub mod projection;
pub mod render;
pub mod strategy_catalog;
pub mod view;
