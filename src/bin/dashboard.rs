use quant_dashboard::analytics;
use quant_dashboard::api::DashboardClient;
use quant_dashboard::config;
use quant_dashboard::curve::{CurveView, Period};
use quant_dashboard::logging;
use quant_dashboard::metrics;
use quant_dashboard::performance::PerformanceView;
use quant_dashboard::projection::{self, SimulationParams};
use quant_dashboard::render;
use quant_dashboard::strategy_catalog;
use quant_dashboard::view::{DashboardState, Tab};

use dotenvy::dotenv;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME")) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    // Load configuration and build the API client
    let cfg = config::Config::load();
    tracing::info!(api_base_url = %cfg.api_base_url, "Loaded configuration and initialized logging");
    let client = DashboardClient::new(&cfg)?;

    // Page-load metrics fetch: happens exactly once; everything renders
    // with zero defaults until it lands.
    let metrics_map = metrics::load_metrics(&client).await;
    if metrics_map.is_empty() {
        tracing::warn!("metrics map is empty, cards will show zero defaults");
    }
    let mut state = DashboardState::new(metrics_map);

    // Live ticker for the default strategy
    match client.live_stats(&state.selected_strategy).await {
        Ok(stats) => println!("{}", render::live_banner(&stats)),
        Err(e) => tracing::warn!(error = %e, "live stats unavailable"),
    }

    // Sidebar cards
    for info in strategy_catalog::STRATEGIES {
        let card_metrics = state.metrics.get_or_default(info.id);
        let selected = info.id == state.selected_strategy;
        println!("{}", render::strategy_card(info, &card_metrics, selected));
    }

    // Historical tab: equity curve (full then 5y window) and the
    // trailing-performance table for the selected strategy.
    state.set_tab(Tab::Historical);
    let ticket = state.ticket();
    let mut curve_view = CurveView::load(&client, &ticket.strategy_id).await;
    let performance_view = PerformanceView::load(&client, &ticket.strategy_id).await;
    if !state.is_current(&ticket) {
        tracing::debug!("selection changed while fetching, dropping stale views");
        return Ok(());
    }

    let (series_name, baseline_name) = strategy_catalog::series_names(&state.selected_strategy);
    println!("{}", render::curve_summary(&curve_view, series_name, baseline_name));
    state.set_chart_period(Period::FiveYears);
    curve_view.set_period(state.chart_period);
    println!("{}", render::curve_summary(&curve_view, series_name, baseline_name));
    println!(
        "{}",
        render::performance_table(&performance_view, &state.selected_metrics())
    );

    // Analytics panel: three concurrent fetches joined into one bundle
    let bundle = analytics::load_bundle(&client, &state.selected_strategy).await;
    println!(
        "{}",
        render::analytics_panel(&bundle, &state.selected_metrics())
    );

    // Projection tab: debounced simulation driven by the sliders
    state.set_tab(Tab::Projection);
    let selected = state.selected_metrics();
    let baseline = state.baseline_metrics();
    let initial_params = SimulationParams {
        initial_investment: 100_000.0,
        monthly_contribution: 1_000.0,
        cagr: selected.cagr,
        volatility: selected.volatility,
        base_cagr: baseline.cagr,
        base_volatility: baseline.volatility,
    };
    let (params_tx, params_rx) = watch::channel(initial_params);
    let sim_client = client.clone();
    let mut outcomes = projection::spawn_debounced_simulator(params_rx, move |params| {
        let client = sim_client.clone();
        async move { client.simulate(&params.to_request()).await }
    });

    // Simulate a slider drag: several rapid updates, one settled request
    let mut projection_view = projection::ProjectionView::default();
    projection_view.begin_loading();
    for initial in [200_000.0, 300_000.0, 400_000.0] {
        params_tx.send(SimulationParams {
            initial_investment: initial,
            ..initial_params
        })?;
    }
    if let Some(outcome) = outcomes.recv().await {
        projection_view.apply(&outcome);
    }
    println!("{}", render::projection_summary(&projection_view));

    Ok(())
}
