use serde::{Deserialize, Serialize};

use crate::limits::*;
use crate::model::{DeskView, Orientation};

/// Real-world floor size in centimetres. Desk positions live in this space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorDimensions {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for FloorDimensions {
    fn default() -> Self {
        Self {
            width_cm: DEFAULT_FLOOR_WIDTH_CM,
            height_cm: DEFAULT_FLOOR_HEIGHT_CM,
        }
    }
}

/// Physical desk footprint: `width_cm` is the short edge, `length_cm` the long one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeskDimensions {
    pub width_cm: f64,
    pub length_cm: f64,
}

impl Default for DeskDimensions {
    fn default() -> Self {
        Self {
            width_cm: DEFAULT_DESK_WIDTH_CM,
            length_cm: DEFAULT_DESK_LENGTH_CM,
        }
    }
}

/// Measured size of a drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// False until the container has been given a real, non-zero size.
    pub fn is_laid_out(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Linear floor-to-surface projection. Recomputed on every call; the only
/// state is the fixed floor and desk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub floor: FloorDimensions,
    pub desk: DeskDimensions,
}

impl GeometryConfig {
    pub fn to_surface_x(&self, cm: f64, surface_width: f64) -> f64 {
        cm / self.floor.width_cm * surface_width
    }

    pub fn to_surface_y(&self, cm: f64, surface_height: f64) -> f64 {
        cm / self.floor.height_cm * surface_height
    }

    /// Rendered `(width, height)` of a desk. Vertical desks put the short edge
    /// on X and the long edge on Y; horizontal desks the other way round.
    pub fn desk_size(&self, orientation: Orientation, size: SurfaceSize) -> (f64, f64) {
        match orientation {
            Orientation::Vertical => (
                self.to_surface_x(self.desk.width_cm, size.width),
                self.to_surface_y(self.desk.length_cm, size.height),
            ),
            Orientation::Horizontal => (
                self.to_surface_x(self.desk.length_cm, size.width),
                self.to_surface_y(self.desk.width_cm, size.height),
            ),
        }
    }

    pub fn desk_rect(&self, view: &DeskView, size: SurfaceSize) -> PixelRect {
        debug_assert!(size.is_laid_out(), "mapping against an unsized surface");
        let (width, height) = self.desk_size(view.orientation, size);
        PixelRect {
            left: self.to_surface_x(view.position_x, size.width),
            top: self.to_surface_y(view.position_y, size.height),
            width,
            height,
        }
    }
}
