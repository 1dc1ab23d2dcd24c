use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::ViewError;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

pub type DeskId = u64;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Checked constructor for intervals coming from user input.
    pub fn try_new(start: Ms, end: Ms) -> Result<Self, ViewError> {
        if start > end {
            return Err(ViewError::InvertedSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        overlaps(self, other)
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }
}

/// True iff `a` and `b` share at least one instant. Touching endpoints don't count.
pub fn overlaps(a: &Span, b: &Span) -> bool {
    a.start < b.end && a.end > b.start
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskStatus {
    Available,
    Occupied,
    /// Only ever a static hint from the desk provider; never derived.
    Reserved,
    Maintenance,
}

/// A bookable position on a floor plan. Position is in floor centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desk {
    pub id: DeskId,
    pub position_x: f64,
    pub position_y: f64,
    pub orientation: Orientation,
    #[serde(default)]
    pub floor: u32,
    /// Static status. Only `Maintenance` overrides reservation data.
    pub status: DeskStatus,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub booked_by: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Desk {
    pub fn new(id: DeskId, position_x: f64, position_y: f64, orientation: Orientation) -> Self {
        Self {
            id,
            position_x,
            position_y,
            orientation,
            floor: 0,
            status: DeskStatus::Available,
            is_favorite: false,
            booked_by: None,
            features: Vec::new(),
        }
    }

    pub fn under_maintenance(&self) -> bool {
        self.status == DeskStatus::Maintenance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationState {
    Active,
    Completed,
    Cancelled,
}

/// A time-bounded claim on a desk. `desk_id` is a reference, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub desk_id: DeskId,
    pub span: Span,
    pub state: ReservationState,
    pub user_id: String,
}

impl Reservation {
    pub fn new(desk_id: DeskId, span: Span, user_id: impl Into<String>) -> Self {
        Self {
            id: Ulid::new(),
            desk_id,
            span,
            state: ReservationState::Active,
            user_id: user_id.into(),
        }
    }

    /// Cancelled reservations never block availability.
    pub fn blocks(&self) -> bool {
        self.state != ReservationState::Cancelled
    }
}

/// Hex fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Ephemeral per-pass result: identity, derived status, colour and placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskView {
    pub desk_id: DeskId,
    pub status: DeskStatus,
    pub color: Color,
    pub position_x: f64,
    pub position_y: f64,
    pub orientation: Orientation,
}
