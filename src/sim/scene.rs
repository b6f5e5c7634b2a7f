//! Scenes: lifecycle containers owning game objects
//!
//! A scene is created, preloads its resources in `start`, then receives one
//! `update` per tick while active. Disposal releases every child and makes the
//! scene unusable.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use super::game_object::{GameObject, ObjectId};
use super::rect::Rect;
use super::vector::Vector2;
use crate::assets::{ResourceLoader, Texture};
use crate::error::{EngineError, InvalidStateError};
use crate::platform::PointerInput;
use crate::renderer::DrawItem;
use crate::time::FrameTime;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique scene identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub u32);

impl SceneId {
    fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene-{}", self.0)
    }
}

/// Scene lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Created,
    Preloading,
    Started,
    Disposed,
}

/// Scene switch requested by content during a tick or pointer event
///
/// Requests are only applied by the orchestrator between ticks. The last
/// request made before that point wins.
pub struct SceneRequests<C> {
    next: Option<Scene<C>>,
}

impl<C> Default for SceneRequests<C> {
    fn default() -> Self {
        Self { next: None }
    }
}

impl<C> SceneRequests<C> {
    pub fn request(&mut self, scene: Scene<C>) {
        if let Some(previous) = self.next.replace(scene) {
            log::debug!("Scene request {} superseded", previous.name());
        }
    }

    pub fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    pub fn take(&mut self) -> Option<Scene<C>> {
        self.next.take()
    }

    /// Move any request from `other` into `self` (later wins)
    pub fn merge(&mut self, mut other: SceneRequests<C>) {
        if let Some(scene) = other.take() {
            self.request(scene);
        }
    }
}

/// What content code sees while a scene runs
pub struct SceneCtx<'a, C> {
    screen: Rect,
    frame: FrameTime,
    session: &'a mut C,
    requests: &'a mut SceneRequests<C>,
}

impl<'a, C> SceneCtx<'a, C> {
    pub fn new(
        screen: Rect,
        frame: FrameTime,
        session: &'a mut C,
        requests: &'a mut SceneRequests<C>,
    ) -> Self {
        Self {
            screen,
            frame,
            session,
            requests,
        }
    }

    /// Field bounds (the rendering surface in screen space)
    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn frame(&self) -> FrameTime {
        self.frame
    }

    pub fn session(&self) -> &C {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut C {
        self.session
    }

    /// Ask the orchestrator to switch to `scene` once the current tick ends
    pub fn change_scene(&mut self, scene: Scene<C>) {
        self.requests.request(scene);
    }

    pub fn scene_change_pending(&self) -> bool {
        self.requests.is_pending()
    }
}

/// Content behaviour attached to a scene
pub trait SceneScript<C> {
    fn name(&self) -> &str {
        "scene"
    }

    /// Runs once after preload completes; spawn objects here
    fn on_start(&mut self, scene: &mut Scene<C>, ctx: &mut SceneCtx<'_, C>) -> Result<(), EngineError>;

    /// Runs every tick while the scene is active
    fn on_update(&mut self, scene: &mut Scene<C>, ctx: &mut SceneCtx<'_, C>) {
        scene.update_children(ctx);
    }
}

pub struct Scene<C> {
    id: SceneId,
    preload: Vec<String>,
    textures: HashMap<String, Texture>,
    children: Vec<GameObject<C>>,
    pointer: PointerInput<C>,
    state: LifecycleState,
    script: Option<Box<dyn SceneScript<C>>>,
    next_object_id: u32,
}

impl<C> fmt::Debug for Scene<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("state", &self.state)
            .field("preload", &self.preload)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl<C> Scene<C> {
    /// Plain scene; `update` advances every child in insertion order
    pub fn new<I, S>(preload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: SceneId::next(),
            preload: preload.into_iter().map(Into::into).collect(),
            textures: HashMap::new(),
            children: Vec::new(),
            pointer: PointerInput::new(),
            state: LifecycleState::Created,
            script: None,
            next_object_id: 1,
        }
    }

    pub fn with_script<I, S>(preload: I, script: impl SceneScript<C> + 'static) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scene = Self::new(preload);
        scene.script = Some(Box::new(script));
        scene
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.script.as_ref().map_or("scene", |s| s.name())
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == LifecycleState::Started
    }

    pub fn preload_list(&self) -> &[String] {
        &self.preload
    }

    /// Texture obtained during preload
    pub fn texture(&self, id: &str) -> Option<&Texture> {
        self.textures.get(id)
    }

    /// Preload every resource, then run the script's start hook
    ///
    /// On failure the scene stays in `Preloading` and may be retried.
    pub async fn start<L: ResourceLoader>(
        &mut self,
        loader: &L,
        ctx: &mut SceneCtx<'_, C>,
    ) -> Result<(), EngineError> {
        match self.state {
            LifecycleState::Disposed => return Err(InvalidStateError::SceneDisposed.into()),
            LifecycleState::Started => return Ok(()),
            LifecycleState::Created | LifecycleState::Preloading => {}
        }
        self.state = LifecycleState::Preloading;
        log::info!("Preloading {} resource(s) for {}", self.preload.len(), self.name());

        for id in &self.preload {
            match loader.load(id).await {
                Ok(texture) => {
                    self.textures.insert(id.clone(), texture);
                }
                Err(err) => {
                    log::warn!("Preload failed for {}: {}", self.name(), err);
                    return Err(err.into());
                }
            }
        }

        if let Some(mut script) = self.script.take() {
            let kept = self.children.len();
            let next_object_id = self.next_object_id;
            let result = script.on_start(self, ctx);
            self.script = Some(script);
            if let Err(err) = result {
                log::warn!("Start hook failed for {}: {}", self.name(), err);
                self.discard_children_from(kept);
                self.next_object_id = next_object_id;
                return Err(err);
            }
        }

        self.state = LifecycleState::Started;
        log::info!("{} started with {} object(s)", self.name(), self.children.len());
        Ok(())
    }

    /// Add a game object; returns its id
    pub fn instantiate(&mut self, mut object: GameObject<C>) -> Result<ObjectId, InvalidStateError> {
        if self.state == LifecycleState::Disposed {
            return Err(InvalidStateError::SceneDisposed);
        }
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        object.assign_id(id);
        if let Some(handler) = object.take_pointer_handler() {
            self.pointer.subscribe(id, handler);
        }
        self.children.push(object);
        Ok(id)
    }

    /// Detach one child and drop its pointer subscription
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject<C>> {
        let index = self.children.iter().position(|c| c.id() == Some(id))?;
        self.pointer.unsubscribe(id);
        Some(self.children.remove(index))
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject<C>> {
        self.children.iter().find(|c| c.id() == Some(id))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject<C>> {
        self.children.iter_mut().find(|c| c.id() == Some(id))
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = &GameObject<C>> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn pointer_input(&self) -> &PointerInput<C> {
        &self.pointer
    }

    /// Subscribe a pointer-down handler for child `id`, replacing any previous one
    ///
    /// Returns false if `id` is not a child of this scene.
    pub fn on_pointer_down(
        &mut self,
        id: ObjectId,
        handler: impl FnMut(&mut GameObject<C>, &mut SceneCtx<'_, C>) + 'static,
    ) -> bool {
        if self.object(id).is_none() {
            log::warn!("Pointer handler for unknown object {id} in {}", self.id);
            return false;
        }
        self.pointer.subscribe(id, Box::new(handler));
        true
    }

    /// Subscribe handlers registered on children after they were instantiated
    fn adopt_pointer_handlers(&mut self) {
        for child in &mut self.children {
            let Some(id) = child.id() else { continue };
            if let Some(handler) = child.take_pointer_handler() {
                self.pointer.subscribe(id, handler);
            }
        }
    }

    /// Per-tick entry point; ignored unless started
    pub fn update(&mut self, ctx: &mut SceneCtx<'_, C>) {
        if self.state != LifecycleState::Started {
            log::trace!("Skipping update of {} in state {:?}", self.name(), self.state);
            return;
        }
        match self.script.take() {
            Some(mut script) => {
                script.on_update(self, ctx);
                self.script = Some(script);
            }
            None => self.update_children(ctx),
        }
    }

    /// Update every child in insertion order
    pub fn update_children(&mut self, ctx: &mut SceneCtx<'_, C>) {
        for child in &mut self.children {
            child.update(ctx);
        }
    }

    /// Route a pointer-down to the topmost interactive child under `point`
    pub fn dispatch_pointer_down(
        &mut self,
        point: Vector2,
        ctx: &mut SceneCtx<'_, C>,
    ) -> Option<ObjectId> {
        if self.state != LifecycleState::Started {
            return None;
        }
        self.adopt_pointer_handlers();
        // Later children draw on top
        let target = self.children.iter_mut().rev().find(|c| {
            c.is_interactive() && c.id().is_some_and(|id| self.pointer.is_subscribed(id)) && c.hit_test(point)
        })?;
        let id = target.id()?;
        if self.pointer.dispatch(target, ctx) {
            log::debug!("Pointer down at ({}, {}) hit {}", point.x(), point.y(), id);
            Some(id)
        } else {
            None
        }
    }

    /// Display nodes for the rendering surface
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.children.iter().filter_map(GameObject::id).collect()
    }

    /// One draw item per child, in draw order
    pub fn draw_items(&self) -> Vec<DrawItem<'_>> {
        self.children
            .iter()
            .filter_map(|child| {
                Some(DrawItem {
                    id: child.id()?,
                    renderable: child.renderable(),
                    rect: child.rect(),
                })
            })
            .collect()
    }

    /// Drop children added after the first `kept`, with their subscriptions
    fn discard_children_from(&mut self, kept: usize) {
        if kept >= self.children.len() {
            return;
        }
        for mut child in self.children.drain(kept..) {
            if let Some(id) = child.id() {
                self.pointer.unsubscribe(id);
            }
            child.dispose();
        }
        log::debug!("{} rolled back to {} object(s)", self.id, kept);
    }

    /// Release all children; no further updates are delivered
    pub(crate) fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        for child in &mut self.children {
            child.dispose();
        }
        self.children.clear();
        self.pointer.clear();
        self.textures.clear();
        self.script = None;
        self.state = LifecycleState::Disposed;
        log::debug!("{} disposed", self.id);
    }
}
