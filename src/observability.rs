use std::net::SocketAddr;

use crate::view::ViewUpdate;

// ── Recompute / redraw metrics ──────────────────────────────────

/// Counter: full status recomputations.
pub const RECOMPUTATIONS_TOTAL: &str = "deskmap_recomputations_total";

/// Counter: surface redraws (one clear + repaint each).
pub const REDRAWS_TOTAL: &str = "deskmap_redraws_total";

/// Histogram: recompute + redraw latency in seconds.
pub const REDRAW_DURATION_SECONDS: &str = "deskmap_redraw_duration_seconds";

/// Histogram: shapes drawn per redraw.
pub const SHAPES_DRAWN: &str = "deskmap_shapes_drawn";

// ── Deferrals and batching ──────────────────────────────────────

/// Counter: surface builds skipped because the container was missing or unsized.
pub const DEFERRED_BUILDS_TOTAL: &str = "deskmap_deferred_builds_total";

/// Counter: updates folded into another update's redraw. Labels: update.
pub const COALESCED_UPDATES_TOTAL: &str = "deskmap_coalesced_updates_total";

/// Counter: query intervals rejected as inverted.
pub const REJECTED_QUERIES_TOTAL: &str = "deskmap_rejected_queries_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a ViewUpdate variant to a short label for metrics.
pub fn update_label(update: &ViewUpdate) -> &'static str {
    match update {
        ViewUpdate::Desks(_) => "desks",
        ViewUpdate::Reservations(_) => "reservations",
        ViewUpdate::Query(_) => "query",
        ViewUpdate::Resized => "resized",
        ViewUpdate::Tick => "tick",
        ViewUpdate::ToggleFavorite(_) => "toggle_favorite",
        ViewUpdate::SetMaintenance { .. } => "set_maintenance",
        ViewUpdate::Unmount => "unmount",
    }
}
