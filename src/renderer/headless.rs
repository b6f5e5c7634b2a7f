//! Headless surface that records what would be drawn

use super::surface::{Frame, RenderSurface, SurfaceConfig};
use crate::sim::{ObjectId, Rect, SceneId};

/// Display-tree change, in the order the surface received them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Configured,
    SceneAttached(SceneId),
    SceneDetached(SceneId),
    OverlayAttached,
    OverlayDetached,
}

/// Surface without a window; used by the autoplay binary and tests
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    config: Option<SurfaceConfig>,
    scene: Option<(SceneId, Vec<ObjectId>)>,
    overlay: bool,
    events: Vec<SurfaceEvent>,
    frames_presented: u64,
    last_frame: Vec<(ObjectId, Rect)>,
    last_overlay_shapes: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SurfaceConfig> {
        self.config.as_ref()
    }

    pub fn attached_scene(&self) -> Option<SceneId> {
        self.scene.as_ref().map(|(id, _)| *id)
    }

    /// Objects listed when the current scene was attached
    pub fn attached_objects(&self) -> &[ObjectId] {
        self.scene.as_ref().map_or(&[], |(_, objects)| objects.as_slice())
    }

    pub fn overlay_attached(&self) -> bool {
        self.overlay
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Entities and their rectangles from the most recent frame
    pub fn last_frame(&self) -> &[(ObjectId, Rect)] {
        &self.last_frame
    }

    pub fn last_overlay_shapes(&self) -> usize {
        self.last_overlay_shapes
    }
}

impl RenderSurface for HeadlessSurface {
    fn configure(&mut self, config: &SurfaceConfig) {
        self.config = Some(*config);
        self.events.push(SurfaceEvent::Configured);
    }

    fn attach_scene(&mut self, scene: SceneId, objects: &[ObjectId]) {
        if let Some((previous, _)) = &self.scene {
            log::warn!("Attaching {scene} while {previous} is still attached");
        }
        self.scene = Some((scene, objects.to_vec()));
        self.events.push(SurfaceEvent::SceneAttached(scene));
    }

    fn detach_scene(&mut self, scene: SceneId) {
        if self.attached_scene() == Some(scene) {
            self.scene = None;
            self.last_frame.clear();
        }
        self.events.push(SurfaceEvent::SceneDetached(scene));
    }

    fn attach_overlay(&mut self) {
        self.overlay = true;
        self.events.push(SurfaceEvent::OverlayAttached);
    }

    fn detach_overlay(&mut self) {
        self.overlay = false;
        self.last_overlay_shapes = 0;
        self.events.push(SurfaceEvent::OverlayDetached);
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.frames_presented += 1;
        self.last_frame = frame.items.iter().map(|item| (item.id, item.rect)).collect();
        self.last_overlay_shapes = frame.overlay.map_or(0, |layer| layer.shapes().len());
        log::trace!(
            "Frame {} presented with {} item(s)",
            frame.time.frame_index,
            frame.items.len()
        );
    }
}
