use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::geometry::SurfaceSize;

use super::*;

/// In-memory retained surface. Shapes keep draw order; handlers live in a
/// side-table keyed by shape id so nothing outlives `clear`/`dispose`.
pub struct Scene {
    size: SurfaceSize,
    options: SurfaceOptions,
    shapes: Vec<(ShapeId, DeskShape)>,
    handlers: HashMap<ShapeId, PointerHandler>,
    next_id: u64,
    renders: u64,
    live: bool,
}

/// Serialisable copy of what is currently drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub size: SurfaceSize,
    pub options: SurfaceOptions,
    pub renders: u64,
    pub shapes: Vec<DeskShape>,
}

impl Scene {
    pub fn new(size: SurfaceSize, options: SurfaceOptions) -> Self {
        Self {
            size,
            options,
            shapes: Vec::new(),
            handlers: HashMap::new(),
            next_id: 1,
            renders: 0,
            live: true,
        }
    }

    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    pub fn shapes(&self) -> impl Iterator<Item = &DeskShape> {
        self.shapes.iter().map(|(_, shape)| shape)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&DeskShape> {
        self.shapes.iter().find(|(sid, _)| *sid == id).map(|(_, s)| s)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of repaints requested since the surface was built.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Topmost shape under the point (last drawn wins).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|(_, shape)| shape.rect.bounds.contains(x, y))
            .map(|(id, _)| *id)
    }

    /// Deliver a pointer-down to one shape. Returns false when the shape has no
    /// handler (unknown id, cleared, or surface disposed).
    pub fn pointer_down(&self, id: ShapeId, event: &mut PointerEvent) -> bool {
        if !self.live {
            return false;
        }
        match self.handlers.get(&id) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Hit-test and dispatch. Returns the event as seen after the handler ran,
    /// or `None` if nothing was under the pointer.
    pub fn pointer_down_at(&self, x: f64, y: f64, button: PointerButton) -> Option<PointerEvent> {
        let id = self.hit_test(x, y)?;
        let mut event = PointerEvent::new(x, y, button);
        self.pointer_down(id, &mut event).then_some(event)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            size: self.size,
            options: self.options,
            renders: self.renders,
            shapes: self.shapes().cloned().collect(),
        }
    }
}

impl Surface for Scene {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.handlers.clear();
    }

    fn add(&mut self, shape: DeskShape, handler: PointerHandler) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        if !self.live {
            // Dead surface: hand out an id but keep nothing.
            return id;
        }
        self.handlers.insert(id, handler);
        self.shapes.push((id, shape));
        id
    }

    fn request_render(&mut self) {
        if self.live {
            self.renders += 1;
        }
    }

    fn dispose(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.clear();
        debug!("scene disposed");
    }
}

/// Shared layout slot the host writes and the container measures.
#[derive(Debug, Clone, Default)]
pub struct ContainerLayout {
    size: Arc<Mutex<Option<SurfaceSize>>>,
}

impl ContainerLayout {
    pub fn resize(&self, size: SurfaceSize) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = Some(size);
    }

    /// Take the element out of the layout (e.g. hidden).
    pub fn clear(&self) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<SurfaceSize> {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Container producing [`Scene`] surfaces.
#[derive(Debug, Clone)]
pub struct SceneContainer {
    layout: ContainerLayout,
}

impl SceneContainer {
    /// Returns the container and the layout handle the host resizes.
    pub fn new(size: Option<SurfaceSize>) -> (Self, ContainerLayout) {
        let layout = ContainerLayout::default();
        if let Some(size) = size {
            layout.resize(size);
        }
        (
            Self {
                layout: layout.clone(),
            },
            layout,
        )
    }
}

impl Container for SceneContainer {
    type Surface = Scene;

    fn measure(&self) -> Option<SurfaceSize> {
        self.layout.get()
    }

    fn create_surface(&self, size: SurfaceSize, options: SurfaceOptions) -> Scene {
        Scene::new(size, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PixelRect;
    use crate::model::Color;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shape(desk_id: u64, left: f64, top: f64) -> DeskShape {
        let bounds = PixelRect {
            left,
            top,
            width: 10.0,
            height: 10.0,
        };
        let (x, y) = bounds.center();
        DeskShape {
            desk_id,
            rect: RectShape {
                bounds,
                fill: Color("#4caf50"),
                stroke: Color("#000"),
                stroke_width: 1.0,
                corner_radius: 4.0,
            },
            label: LabelShape {
                text: desk_id.to_string(),
                x,
                y,
                font_size: 12.0,
                fill: Color("#fff"),
            },
            selectable: false,
        }
    }

    fn counting_handler(counter: &Arc<AtomicUsize>) -> PointerHandler {
        let counter = counter.clone();
        Box::new(move |_ev: &mut PointerEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut scene = Scene::new(SurfaceSize::new(100.0, 100.0), SurfaceOptions::VIEW_ONLY);
        let hits = Arc::new(AtomicUsize::new(0));
        let bottom = scene.add(shape(1, 0.0, 0.0), counting_handler(&hits));
        let top = scene.add(shape(2, 5.0, 5.0), counting_handler(&hits));
        assert_eq!(scene.hit_test(2.0, 2.0), Some(bottom));
        assert_eq!(scene.hit_test(7.0, 7.0), Some(top));
        assert_eq!(scene.hit_test(50.0, 50.0), None);
    }

    #[test]
    fn clear_drops_handlers() {
        let mut scene = Scene::new(SurfaceSize::new(100.0, 100.0), SurfaceOptions::VIEW_ONLY);
        let hits = Arc::new(AtomicUsize::new(0));
        let id = scene.add(shape(1, 0.0, 0.0), counting_handler(&hits));
        let mut ev = PointerEvent::new(1.0, 1.0, PointerButton::Primary);
        assert!(scene.pointer_down(id, &mut ev));
        scene.clear();
        assert!(!scene.pointer_down(id, &mut ev));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scene.handler_count(), 0);
    }

    #[test]
    fn disposed_scene_ignores_draws_and_events() {
        let mut scene = Scene::new(SurfaceSize::new(100.0, 100.0), SurfaceOptions::VIEW_ONLY);
        let hits = Arc::new(AtomicUsize::new(0));
        let id = scene.add(shape(1, 0.0, 0.0), counting_handler(&hits));
        scene.dispose();
        scene.dispose();
        assert!(!scene.is_live());
        assert!(scene.pointer_down_at(1.0, 1.0, PointerButton::Primary).is_none());
        let mut ev = PointerEvent::new(1.0, 1.0, PointerButton::Primary);
        assert!(!scene.pointer_down(id, &mut ev));

        scene.add(shape(2, 0.0, 0.0), counting_handler(&hits));
        scene.request_render();
        assert_eq!(scene.shape_count(), 0);
        assert_eq!(scene.render_count(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut scene = Scene::new(SurfaceSize::new(100.0, 100.0), SurfaceOptions::VIEW_ONLY);
        let hits = Arc::new(AtomicUsize::new(0));
        let a = scene.add(shape(1, 0.0, 0.0), counting_handler(&hits));
        scene.clear();
        let b = scene.add(shape(1, 0.0, 0.0), counting_handler(&hits));
        assert_ne!(a, b);
        assert!(scene.shape(a).is_none());
        assert_eq!(scene.shape(b).map(|s| s.desk_id), Some(1));
    }

    #[test]
    fn snapshot_serializes() {
        let mut scene = Scene::new(SurfaceSize::new(100.0, 50.0), SurfaceOptions::VIEW_ONLY);
        scene.add(shape(42, 0.0, 0.0), Box::new(|_: &mut PointerEvent| {}));
        scene.request_render();
        let json = serde_json::to_value(scene.snapshot()).unwrap();
        assert_eq!(json["renders"], 1);
        assert_eq!(json["shapes"][0]["desk_id"], 42);
        assert_eq!(json["shapes"][0]["rect"]["fill"], "#4caf50");
        assert_eq!(json["options"]["selection"], false);
    }

    #[test]
    fn layout_handle_is_shared() {
        let (container, layout) = SceneContainer::new(None);
        assert_eq!(container.measure(), None);
        layout.resize(SurfaceSize::new(640.0, 480.0));
        assert_eq!(container.measure(), Some(SurfaceSize::new(640.0, 480.0)));
        layout.clear();
        assert_eq!(container.measure(), None);
    }
}
