use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::compose::{self, InteractFn};
use crate::error::ViewError;
use crate::geometry::GeometryConfig;
use crate::limits::VIEW_CHANNEL_CAPACITY;
use crate::model::*;
use crate::observability::*;
use crate::status::{derive_views, StatusResolver};
use crate::surface::{Container, SurfaceManager};

/// Input changes delivered to a running view loop.
#[derive(Debug, Clone)]
pub enum ViewUpdate {
    Desks(Vec<Desk>),
    Reservations(Vec<Reservation>),
    Query(Span),
    /// The container's size changed; rebuild the surface.
    Resized,
    /// Layout/animation tick. Retries a deferred redraw.
    Tick,
    ToggleFavorite(DeskId),
    SetMaintenance { desk_id: DeskId, on: bool },
    Unmount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    pub recomputations: u64,
    pub redraws: u64,
    /// Flushes skipped for a missing query, container or size.
    pub deferred: u64,
    /// Updates absorbed into an earlier update's flush.
    pub coalesced: u64,
}

/// One floor plan bound to one container: latest inputs, a dirty flag, and
/// the surface they are drawn on. Nothing is redrawn until `flush`.
pub struct FloorView<C: Container> {
    surfaces: SurfaceManager<C>,
    geometry: GeometryConfig,
    desks: Vec<Desk>,
    reservations: Vec<Reservation>,
    query: Option<Span>,
    on_interact: InteractFn,
    views: Vec<DeskView>,
    dirty: bool,
    stats: ViewStats,
}

impl<C: Container> FloorView<C> {
    pub fn new(geometry: GeometryConfig, on_interact: InteractFn) -> Self {
        Self {
            surfaces: SurfaceManager::new(),
            geometry,
            desks: Vec::new(),
            reservations: Vec::new(),
            query: None,
            on_interact,
            views: Vec::new(),
            dirty: true,
            stats: ViewStats::default(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────

    pub fn mount(&mut self, container: C) {
        self.surfaces.attach(container);
        self.dirty = true;
    }

    /// Dispose the surface and release every shape handler.
    pub fn unmount(&mut self) {
        if self.surfaces.detach().is_some() {
            info!("floor view unmounted");
        }
        self.dirty = true;
    }

    pub fn resized(&mut self) {
        self.surfaces.dispose();
        self.dirty = true;
    }

    pub fn surfaces(&self) -> &SurfaceManager<C> {
        &self.surfaces
    }

    pub fn surface(&self) -> Option<&C::Surface> {
        self.surfaces.surface()
    }

    // ── Inputs ───────────────────────────────────────────────

    pub fn set_desks(&mut self, desks: Vec<Desk>) {
        self.desks = desks;
        self.dirty = true;
    }

    pub fn set_reservations(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
        self.dirty = true;
    }

    /// Returns false (and keeps the previous query) for an inverted interval.
    pub fn set_query(&mut self, query: Span) -> bool {
        let query = match Span::try_new(query.start, query.end) {
            Ok(q) => q,
            Err(e) => {
                warn!("ignoring query: {e}");
                metrics::counter!(REJECTED_QUERIES_TOTAL).increment(1);
                return false;
            }
        };
        if self.query != Some(query) {
            self.query = Some(query);
            self.dirty = true;
        }
        true
    }

    pub fn query(&self) -> Option<Span> {
        self.query
    }

    pub fn desks(&self) -> &[Desk] {
        &self.desks
    }

    fn desk_mut(&mut self, desk_id: DeskId) -> Result<&mut Desk, ViewError> {
        self.desks
            .iter_mut()
            .find(|d| d.id == desk_id)
            .ok_or(ViewError::UnknownDesk(desk_id))
    }

    /// Flip the favourite flag. Returns the new value, `None` for unknown desks.
    /// Favourites don't change the drawing, so no redraw is scheduled.
    pub fn toggle_favorite(&mut self, desk_id: DeskId) -> Option<bool> {
        match self.desk_mut(desk_id) {
            Ok(desk) => {
                desk.is_favorite = !desk.is_favorite;
                Some(desk.is_favorite)
            }
            Err(e) => {
                debug!("toggle favorite: {e}");
                None
            }
        }
    }

    /// Set or lift the maintenance override. `on == false` returns the desk to
    /// reservation-derived status.
    pub fn set_maintenance(&mut self, desk_id: DeskId, on: bool) -> bool {
        let desk = match self.desk_mut(desk_id) {
            Ok(desk) => desk,
            Err(e) => {
                debug!("set maintenance: {e}");
                return false;
            }
        };
        desk.status = if on {
            DeskStatus::Maintenance
        } else {
            DeskStatus::Available
        };
        self.dirty = true;
        true
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Desks(desks) => self.set_desks(desks),
            ViewUpdate::Reservations(reservations) => self.set_reservations(reservations),
            ViewUpdate::Query(query) => {
                self.set_query(query);
            }
            ViewUpdate::Resized => self.resized(),
            ViewUpdate::Tick => {}
            ViewUpdate::ToggleFavorite(desk_id) => {
                self.toggle_favorite(desk_id);
            }
            ViewUpdate::SetMaintenance { desk_id, on } => {
                self.set_maintenance(desk_id, on);
            }
            ViewUpdate::Unmount => self.unmount(),
        }
    }

    // ── Queries over the current snapshot ────────────────────

    /// `None` until a query interval is selected.
    pub fn resolver(&self) -> Option<StatusResolver<'_>> {
        self.query
            .map(|query| StatusResolver::new(&self.desks, &self.reservations, query))
    }

    pub fn is_available(&self, desk_id: DeskId) -> bool {
        self.resolver().is_some_and(|r| r.is_available(desk_id))
    }

    pub fn overlapping_reservations_for(&self, desk_id: DeskId) -> Vec<&Reservation> {
        self.resolver()
            .map(|r| r.overlapping_reservations_for(desk_id))
            .unwrap_or_default()
    }

    /// Views from the last successful recomputation.
    pub fn views(&self) -> &[DeskView] {
        &self.views
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    // ── Recompute + redraw ───────────────────────────────────

    fn defer(&mut self, reason: ViewError) -> bool {
        debug!("redraw deferred: {reason}");
        self.stats.deferred += 1;
        false
    }

    /// If anything changed, recompute every desk's status and redraw the
    /// surface once. Returns true if a redraw happened. A deferred flush keeps
    /// the view dirty so the next call retries.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        let Some(query) = self.query else {
            return self.defer(ViewError::NoQuery);
        };
        if !self.surfaces.is_live() && !self.surfaces.build() {
            let reason = if self.surfaces.container().is_none() {
                ViewError::MissingContainer
            } else {
                ViewError::NotLaidOut(self.surfaces.container().and_then(|c| c.measure()))
            };
            return self.defer(reason);
        }

        let started = Instant::now();
        self.views = derive_views(&self.desks, &self.reservations, &query);
        self.stats.recomputations += 1;
        metrics::counter!(RECOMPUTATIONS_TOTAL).increment(1);

        let Some(surface) = self.surfaces.surface_mut() else {
            return self.defer(ViewError::SurfaceDisposed);
        };
        let drawn = compose::render(surface, &self.views, &self.geometry, &self.on_interact);

        self.dirty = false;
        self.stats.redraws += 1;
        metrics::counter!(REDRAWS_TOTAL).increment(1);
        metrics::histogram!(REDRAW_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        debug!("redrew {drawn} desks for [{}, {})", query.start, query.end);
        true
    }
}

// ── Coalescing view loop ─────────────────────────────────

/// Owns the view and redraws it as updates arrive.
/// 1. Block until the first update arrives.
/// 2. Apply it.
/// 3. Apply every update already queued behind it.
/// 4. Flush once for the whole batch.
///
/// Returns the view when every sender is dropped.
pub async fn run_view_loop<C: Container>(
    mut view: FloorView<C>,
    mut rx: mpsc::Receiver<ViewUpdate>,
) -> FloorView<C> {
    while let Some(update) = rx.recv().await {
        view.apply(update);

        while let Ok(update) = rx.try_recv() {
            metrics::counter!(COALESCED_UPDATES_TOTAL, "update" => update_label(&update)).increment(1);
            view.stats.coalesced += 1;
            view.apply(update);
        }

        view.flush();
    }
    debug!("view loop stopped");
    view
}

/// Spawn the view loop on the current runtime.
pub fn spawn_view_loop<C>(view: FloorView<C>) -> (mpsc::Sender<ViewUpdate>, JoinHandle<FloorView<C>>)
where
    C: Container + Send + 'static,
    C::Surface: Send + 'static,
{
    let (tx, rx) = mpsc::channel(VIEW_CHANNEL_CAPACITY);
    let handle = tokio::spawn(run_view_loop(view, rx));
    (tx, handle)
}
