use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use deskmap::compose::{InteractFn, Interaction};
use deskmap::geometry::{GeometryConfig, SurfaceSize};
use deskmap::model::*;
use deskmap::surface::{PointerEvent, SceneContainer, SceneSnapshot};
use deskmap::view::{spawn_view_loop, FloorView, ViewUpdate};

/// Input file: what the desk and reservation providers would hand over.
#[derive(Debug, Deserialize)]
struct Snapshot {
    desks: Vec<Desk>,
    #[serde(default)]
    reservations: Vec<Reservation>,
    #[serde(default)]
    query: Option<Span>,
}

#[derive(Debug, Serialize)]
struct Output {
    query: Span,
    statuses: Vec<(DeskId, DeskStatus)>,
    available: Vec<DeskId>,
    scene: Option<SceneSnapshot>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("DESKMAP_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    deskmap::observability::init(metrics_port)?;

    let snapshot_path = std::env::var("DESKMAP_SNAPSHOT").unwrap_or_else(|_| "demos/floor.json".into());
    let width: f64 = env_or("DESKMAP_WIDTH", 1200.0);
    let height: f64 = env_or("DESKMAP_HEIGHT", 750.0);
    let geometry = GeometryConfig::from_env();

    let raw = std::fs::read_to_string(&snapshot_path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    let query = snapshot
        .query
        .unwrap_or_else(|| deskmap::presets::default_query(deskmap::presets::now_ms()));

    info!("deskmap rendering {snapshot_path}");
    info!("  desks: {}", snapshot.desks.len());
    info!("  reservations: {}", snapshot.reservations.len());
    info!("  surface: {width}x{height}");
    info!("  query: [{}, {})", query.start, query.end);

    let on_interact: InteractFn = Arc::new(|kind: Interaction, desk_id: DeskId, _ev: &mut PointerEvent| {
        info!("desk {desk_id}: {kind:?}");
    });
    let (container, _layout) = SceneContainer::new(Some(SurfaceSize::new(width, height)));
    let mut view = FloorView::new(geometry, on_interact);
    view.mount(container);

    let (tx, handle) = spawn_view_loop(view);
    tx.send(ViewUpdate::Desks(snapshot.desks)).await?;
    tx.send(ViewUpdate::Reservations(snapshot.reservations)).await?;
    tx.send(ViewUpdate::Query(query)).await?;
    drop(tx);
    let view = handle.await?;

    let statuses = view
        .views()
        .iter()
        .map(|v| (v.desk_id, v.status))
        .collect();
    let available = view
        .desks()
        .iter()
        .filter(|d| view.is_available(d.id))
        .map(|d| d.id)
        .collect();
    let output = Output {
        query,
        statuses,
        available,
        scene: view.surface().map(|s| s.snapshot()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    let stats = view.stats();
    info!(
        "recomputations={} redraws={} deferred={} coalesced={}",
        stats.recomputations, stats.redraws, stats.deferred, stats.coalesced
    );
    Ok(())
}
