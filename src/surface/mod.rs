pub mod scene;
mod shape;

pub use scene::{ContainerLayout, Scene, SceneContainer, SceneSnapshot};
pub use shape::*;

use tracing::{debug, warn};

use crate::error::ViewError;
use crate::geometry::SurfaceSize;

/// Interaction features the surface itself provides. Desks are never
/// selected or dragged by the viewer; all input goes through shape handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SurfaceOptions {
    pub selection: bool,
    pub draggable: bool,
}

impl SurfaceOptions {
    pub const VIEW_ONLY: SurfaceOptions = SurfaceOptions {
        selection: false,
        draggable: false,
    };
}

/// A drawing surface holding interactive desk shapes.
pub trait Surface {
    fn size(&self) -> SurfaceSize;
    /// False once disposed. Draw calls on a dead surface are no-ops.
    fn is_live(&self) -> bool;
    fn clear(&mut self);
    fn add(&mut self, shape: DeskShape, handler: PointerHandler) -> ShapeId;
    /// Flush pending shape changes to the screen.
    fn request_render(&mut self);
    /// Release the surface and drop every registered handler. Idempotent.
    fn dispose(&mut self);
}

/// The host element a surface is bound to.
pub trait Container {
    type Surface: Surface;

    /// Current laid-out size, `None` while the element is not in the layout.
    fn measure(&self) -> Option<SurfaceSize>;

    fn create_surface(&self, size: SurfaceSize, options: SurfaceOptions) -> Self::Surface;
}

/// Owns the single live surface of one container.
pub struct SurfaceManager<C: Container> {
    container: Option<C>,
    surface: Option<C::Surface>,
}

impl<C: Container> Default for SurfaceManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Container> SurfaceManager<C> {
    pub fn new() -> Self {
        Self {
            container: None,
            surface: None,
        }
    }

    /// Bind a container. A surface built for a previous container is disposed.
    pub fn attach(&mut self, container: C) {
        self.dispose();
        self.container = Some(container);
    }

    pub fn detach(&mut self) -> Option<C> {
        self.dispose();
        self.container.take()
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    fn check_ready(&self) -> Result<SurfaceSize, ViewError> {
        let container = self.container.as_ref().ok_or(ViewError::MissingContainer)?;
        match container.measure() {
            Some(size) if size.is_laid_out() => Ok(size),
            other => Err(ViewError::NotLaidOut(other)),
        }
    }

    /// Create a fresh surface at the container's current size, disposing any
    /// previous one. Returns false (and logs) when the container is missing or
    /// not laid out yet; the caller retries on its next tick.
    pub fn build(&mut self) -> bool {
        let size = match self.check_ready() {
            Ok(size) => size,
            Err(e) => {
                warn!("surface build deferred: {e}");
                metrics::counter!(crate::observability::DEFERRED_BUILDS_TOTAL).increment(1);
                return false;
            }
        };
        self.dispose();
        let Some(container) = self.container.as_ref() else {
            return false;
        };
        let surface = container.create_surface(size, SurfaceOptions::VIEW_ONLY);
        debug!("built surface {}x{}", size.width, size.height);
        self.surface = Some(surface);
        true
    }

    pub fn dispose(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
            debug!("surface disposed");
        }
    }

    pub fn is_live(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_live())
    }

    pub fn surface(&self) -> Option<&C::Surface> {
        self.surface.as_ref().filter(|s| s.is_live())
    }

    /// Borrow the live surface. The borrow cannot outlive a dispose.
    pub fn surface_mut(&mut self) -> Option<&mut C::Surface> {
        self.surface.as_mut().filter(|s| s.is_live())
    }
}

impl<C: Container> Drop for SurfaceManager<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(size: Option<SurfaceSize>) -> (SurfaceManager<SceneContainer>, ContainerLayout) {
        let (container, layout) = SceneContainer::new(size);
        let mut manager = SurfaceManager::new();
        manager.attach(container);
        (manager, layout)
    }

    #[test]
    fn build_without_container_is_noop() {
        let mut manager: SurfaceManager<SceneContainer> = SurfaceManager::new();
        assert!(!manager.build());
        assert!(!manager.is_live());
        assert!(manager.surface_mut().is_none());
    }

    #[test]
    fn build_defers_until_laid_out() {
        let (mut manager, layout) = manager_with(None);
        assert!(!manager.build());

        layout.resize(SurfaceSize::new(0.0, 300.0));
        assert!(!manager.build());

        layout.resize(SurfaceSize::new(800.0, 600.0));
        assert!(manager.build());
        assert!(manager.is_live());
        let surface = manager.surface().unwrap();
        assert_eq!(surface.size(), SurfaceSize::new(800.0, 600.0));
        assert_eq!(surface.options(), SurfaceOptions::VIEW_ONLY);
    }

    #[test]
    fn rebuild_replaces_surface() {
        let (mut manager, layout) = manager_with(Some(SurfaceSize::new(800.0, 600.0)));
        assert!(manager.build());
        layout.resize(SurfaceSize::new(400.0, 300.0));
        assert!(manager.build());
        assert_eq!(manager.surface().unwrap().size(), SurfaceSize::new(400.0, 300.0));
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut manager, _layout) = manager_with(Some(SurfaceSize::new(800.0, 600.0)));
        manager.dispose(); // nothing built yet
        assert!(manager.build());
        manager.dispose();
        manager.dispose();
        assert!(!manager.is_live());
        assert!(manager.surface().is_none());
    }

    #[test]
    fn detach_disposes_and_blocks_rebuild() {
        let (mut manager, _layout) = manager_with(Some(SurfaceSize::new(800.0, 600.0)));
        assert!(manager.build());
        assert!(manager.detach().is_some());
        assert!(!manager.is_live());
        assert!(!manager.build());
        assert!(manager.container().is_none());
    }
}
