use crate::model::*;

use super::resolve_statuses;

pub const AVAILABLE: Color = Color("#4caf50");
pub const OCCUPIED: Color = Color("#f44336");
pub const RESERVED: Color = Color("#ff9800");
pub const MAINTENANCE: Color = Color("#9e9e9e");

pub fn color_for(status: DeskStatus) -> Color {
    match status {
        DeskStatus::Available => AVAILABLE,
        DeskStatus::Occupied => OCCUPIED,
        DeskStatus::Reserved => RESERVED,
        DeskStatus::Maintenance => MAINTENANCE,
    }
}

/// Full recomputation: resolve every desk, then attach colour and placement.
pub fn derive_views(desks: &[Desk], reservations: &[Reservation], query: &Span) -> Vec<DeskView> {
    let statuses = resolve_statuses(desks, reservations, query);
    desks
        .iter()
        .zip(statuses)
        .map(|(desk, status)| DeskView {
            desk_id: desk.id,
            status,
            color: color_for(status),
            position_x: desk.position_x,
            position_y: desk.position_y,
            orientation: desk.orientation,
        })
        .collect()
}
