use serde::Serialize;

use crate::geometry::PixelRect;
use crate::model::{Color, DeskId};

/// Handle assigned by a surface when a shape is added. Never reused within one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    pub bounds: PixelRect,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShape {
    pub text: String,
    /// Anchor point, the centre of the rectangle.
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub fill: Color,
}

/// Rectangle and label drawn and hit-tested as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskShape {
    pub desk_id: DeskId,
    pub rect: RectShape,
    pub label: LabelShape,
    pub selectable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Map a DOM-style `MouseEvent.button` code.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// Raw pointer-down as delivered by the host, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, button: PointerButton) -> Self {
        Self {
            x,
            y,
            button,
            default_prevented: false,
        }
    }

    /// Suppress the host's default action (the context menu, for secondary clicks).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type PointerHandler = Box<dyn Fn(&mut PointerEvent) + Send + Sync>;
