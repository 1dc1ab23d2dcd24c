use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ViewError;
use crate::geometry::GeometryConfig;
use crate::limits::LABEL_MAX_CHARS;
use crate::model::{Color, DeskId, DeskView};
use crate::surface::*;

const STROKE: Color = Color("#000");
const LABEL_FILL: Color = Color("#fff");
const STROKE_WIDTH: f64 = 1.0;
const CORNER_RADIUS: f64 = 4.0;
const FONT_SIZE: f64 = 12.0;

/// What the user did to a desk, as far as the floor plan can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// Primary button: select the desk.
    Primary,
    /// Secondary button: open the desk's actions.
    Secondary,
}

/// Receives classified interactions. Deciding what they mean is up to the host.
pub type InteractFn = Arc<dyn Fn(Interaction, DeskId, &mut PointerEvent) + Send + Sync>;

/// Display text for a desk: the last three characters of its id.
pub fn label_text(desk_id: DeskId) -> String {
    let text = desk_id.to_string();
    let skip = text.chars().count().saturating_sub(LABEL_MAX_CHARS);
    text.chars().skip(skip).collect()
}

fn classify(button: PointerButton) -> Option<Interaction> {
    match button {
        PointerButton::Primary => Some(Interaction::Primary),
        PointerButton::Secondary => Some(Interaction::Secondary),
        PointerButton::Middle | PointerButton::Other(_) => None,
    }
}

fn pointer_handler(desk_id: DeskId, on_interact: InteractFn) -> PointerHandler {
    Box::new(move |event: &mut PointerEvent| {
        let Some(kind) = classify(event.button) else {
            return;
        };
        if kind == Interaction::Secondary {
            event.prevent_default();
        }
        on_interact(kind, desk_id, event);
    })
}

fn check_drawable<S: Surface>(surface: &S) -> Result<(), ViewError> {
    if !surface.is_live() {
        return Err(ViewError::SurfaceDisposed);
    }
    let size = surface.size();
    if !size.is_laid_out() {
        return Err(ViewError::NotLaidOut(Some(size)));
    }
    Ok(())
}

pub fn desk_shape(view: &DeskView, geometry: &GeometryConfig, surface: &impl Surface) -> DeskShape {
    let bounds = geometry.desk_rect(view, surface.size());
    let (x, y) = bounds.center();
    DeskShape {
        desk_id: view.desk_id,
        rect: RectShape {
            bounds,
            fill: view.color,
            stroke: STROKE,
            stroke_width: STROKE_WIDTH,
            corner_radius: CORNER_RADIUS,
        },
        label: LabelShape {
            text: label_text(view.desk_id),
            x,
            y,
            font_size: FONT_SIZE,
            fill: LABEL_FILL,
        },
        selectable: false,
    }
}

/// Clear the surface and draw one interactive group per view, then repaint
/// once. Returns the number of shapes drawn; 0 when the surface is disposed or
/// unsized.
pub fn render<S: Surface>(
    surface: &mut S,
    views: &[DeskView],
    geometry: &GeometryConfig,
    on_interact: &InteractFn,
) -> usize {
    if let Err(e) = check_drawable(surface) {
        warn!("skipping desk render: {e}");
        return 0;
    }

    surface.clear();
    for view in views {
        let shape = desk_shape(view, geometry, &*surface);
        surface.add(shape, pointer_handler(view.desk_id, on_interact.clone()));
    }
    surface.request_render();

    debug!("rendered {} desks", views.len());
    metrics::histogram!(crate::observability::SHAPES_DRAWN).record(views.len() as f64);
    views.len()
}
