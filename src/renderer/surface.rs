//! Rendering surface contract
//!
//! The orchestrator never draws by itself. It attaches/detaches display trees
//! and hands one [`Frame`] per tick to whatever surface it was built with.

use serde::{Deserialize, Serialize};

use super::debug::DebugLayer;
use crate::sim::{ObjectId, Rect, Renderable, SceneId};
use crate::time::FrameTime;

/// Surface parameters fixed at orchestrator construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub background_color: u32,
    /// Nearest-neighbour scaling instead of smoothing
    pub pixelated: bool,
}

/// One entity to draw this frame
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub id: ObjectId,
    pub renderable: &'a Renderable,
    pub rect: Rect,
}

/// Everything presented for a single tick
#[derive(Debug)]
pub struct Frame<'a> {
    pub time: FrameTime,
    pub background_color: u32,
    pub items: Vec<DrawItem<'a>>,
    pub overlay: Option<&'a DebugLayer>,
}

/// Display-tree capability provided by the host
pub trait RenderSurface {
    fn configure(&mut self, config: &SurfaceConfig);

    /// Attach a scene's display tree
    fn attach_scene(&mut self, scene: SceneId, objects: &[ObjectId]);

    fn detach_scene(&mut self, scene: SceneId);

    /// Add the translucent debug overlay above the scene
    fn attach_overlay(&mut self);

    fn detach_overlay(&mut self);

    fn present(&mut self, frame: &Frame<'_>);
}
