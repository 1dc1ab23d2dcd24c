mod palette;
mod weekly;

pub use palette::{color_for, derive_views};
pub use weekly::{weekly_availability, DayStatus};

use crate::model::*;

// ── Status resolution ────────────────────────────────────────────

/// Reservations that hold `desk_id` during `query`: same desk, not cancelled,
/// overlapping. Every status answer goes through this one filter.
fn blocking_reservations<'r>(
    desk_id: DeskId,
    reservations: &'r [Reservation],
    query: &Span,
) -> impl Iterator<Item = &'r Reservation> {
    let query = *query;
    reservations
        .iter()
        .filter(move |r| r.desk_id == desk_id && r.blocks() && r.span.overlaps(&query))
}

/// Priority:
/// 1. Static maintenance override → `Maintenance`, no scan.
/// 2. Any blocking reservation overlapping the query → `Occupied`.
/// 3. Otherwise → `Available`. Other static values are ignored.
pub(crate) fn status_for(desk: &Desk, reservations: &[Reservation], query: &Span) -> DeskStatus {
    if desk.under_maintenance() {
        return DeskStatus::Maintenance;
    }
    if blocking_reservations(desk.id, reservations, query)
        .next()
        .is_some()
    {
        DeskStatus::Occupied
    } else {
        DeskStatus::Available
    }
}

/// One status per desk, in desk order. Reservations for unknown desks match nothing.
pub fn resolve_statuses(desks: &[Desk], reservations: &[Reservation], query: &Span) -> Vec<DeskStatus> {
    desks
        .iter()
        .map(|desk| status_for(desk, reservations, query))
        .collect()
}

/// Read-only queries over one immutable snapshot of desks and reservations.
#[derive(Debug, Clone, Copy)]
pub struct StatusResolver<'a> {
    desks: &'a [Desk],
    reservations: &'a [Reservation],
    query: Span,
}

impl<'a> StatusResolver<'a> {
    pub fn new(desks: &'a [Desk], reservations: &'a [Reservation], query: Span) -> Self {
        Self {
            desks,
            reservations,
            query,
        }
    }

    pub fn query(&self) -> Span {
        self.query
    }

    pub fn resolve(&self) -> Vec<DeskStatus> {
        resolve_statuses(self.desks, self.reservations, &self.query)
    }

    fn desk(&self, desk_id: DeskId) -> Option<&'a Desk> {
        self.desks.iter().find(|d| d.id == desk_id)
    }

    /// `None` for desks not in the snapshot.
    pub fn status_of(&self, desk_id: DeskId) -> Option<DeskStatus> {
        self.desk(desk_id)
            .map(|desk| status_for(desk, self.reservations, &self.query))
    }

    /// Unknown desks are never available, even with no reservations: the
    /// desk snapshot decides which desks exist.
    pub fn is_available(&self, desk_id: DeskId) -> bool {
        self.status_of(desk_id) == Some(DeskStatus::Available)
    }

    /// The reservations that make a desk occupied, in input order.
    pub fn overlapping_reservations_for(&self, desk_id: DeskId) -> Vec<&'a Reservation> {
        blocking_reservations(desk_id, self.reservations, &self.query).collect()
    }
}
