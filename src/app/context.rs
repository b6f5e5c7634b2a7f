//! Per-tick context handed to every registered callback

use super::game_loops::{GameLoops, LoopId};
use crate::renderer::DebugLayer;
use crate::sim::{Rect, Scene, SceneCtx, SceneRequests};
use crate::time::FrameTime;

/// What a per-frame callback can see and do during one tick
///
/// Registration changes made here apply to the live callback set immediately:
/// a removed callback that has not run yet is skipped this tick, an added one
/// first runs next tick (even when it reuses the id of a removed one).
pub struct TickCtx<'a, C> {
    pub(crate) frame: FrameTime,
    pub(crate) screen: Rect,
    pub(crate) loops: &'a mut GameLoops<C>,
    pub(crate) scene: Option<&'a mut Scene<C>>,
    pub(crate) debug_layer: Option<&'a mut DebugLayer>,
    pub(crate) session: &'a mut C,
    pub(crate) requests: &'a mut SceneRequests<C>,
}

impl<C> TickCtx<'_, C> {
    pub fn frame(&self) -> FrameTime {
        self.frame
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn session(&self) -> &C {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut C {
        self.session
    }

    pub fn current_scene(&self) -> Option<&Scene<C>> {
        self.scene.as_deref()
    }

    /// Debug overlay of the active scene, if debug mode is on
    pub fn debug_layer(&mut self) -> Option<&mut DebugLayer> {
        self.debug_layer.as_deref_mut()
    }

    pub fn add_game_loop<F>(&mut self, id: impl Into<LoopId>, callback: F) -> bool
    where
        F: FnMut(&mut TickCtx<'_, C>) + 'static,
    {
        self.loops.add(id, callback)
    }

    pub fn remove_game_loop(&mut self, id: &LoopId) -> bool {
        self.loops.remove(id)
    }

    pub fn clear_game_loops(&mut self) {
        self.loops.clear();
    }

    pub fn has_game_loop(&self, id: &LoopId) -> bool {
        self.loops.contains(id)
    }

    /// Switch scenes after this tick completes
    pub fn change_scene(&mut self, scene: Scene<C>) {
        self.requests.request(scene);
    }

    /// Run the active scene's update
    pub fn update_scene(&mut self) {
        if let Some(scene) = self.scene.as_deref_mut() {
            let mut ctx = SceneCtx::new(
                self.screen,
                self.frame,
                &mut *self.session,
                &mut *self.requests,
            );
            scene.update(&mut ctx);
        }
    }
}
