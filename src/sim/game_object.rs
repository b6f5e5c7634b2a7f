//! Game objects: renderable + position/velocity integration + collider
//!
//! Position and velocity change only through [`GameObject::set_physics`], which
//! takes either literal values or pure `(previous) -> next` transitions. The
//! bounding rectangle and world collider are derived from the current state on
//! every read, so they can never lag behind the position.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collider::Collider;
use super::rect::{Origin, Rect};
use super::renderable::Renderable;
use super::scene::SceneCtx;
use super::vector::Vector2;
use crate::error::{ConfigurationError, InvalidStateError};
use crate::platform::CursorStyle;

/// Identity of an entity within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-entity callback: tick hooks and pointer handlers
pub type ObjectHook<C> = Box<dyn FnMut(&mut GameObject<C>, &mut SceneCtx<'_, C>)>;

/// Next value for a physics field
pub enum Transition {
    Value(Vector2),
    Map(Box<dyn FnOnce(Vector2) -> Vector2>),
}

impl Transition {
    fn apply(self, previous: Vector2) -> Vector2 {
        match self {
            Transition::Value(v) => v,
            Transition::Map(f) => f(previous),
        }
    }
}

impl From<Vector2> for Transition {
    fn from(v: Vector2) -> Self {
        Transition::Value(v)
    }
}

/// A batch of physics changes applied together by `set_physics`
pub struct Physics<C> {
    position: Option<Transition>,
    velocity: Option<Transition>,
    on_update: Option<ObjectHook<C>>,
}

impl<C> Default for Physics<C> {
    fn default() -> Self {
        Self {
            position: None,
            velocity: None,
            on_update: None,
        }
    }
}

impl<C> Physics<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Vector2) -> Self {
        self.position = Some(Transition::Value(position));
        self
    }

    pub fn position_with(mut self, f: impl FnOnce(Vector2) -> Vector2 + 'static) -> Self {
        self.position = Some(Transition::Map(Box::new(f)));
        self
    }

    pub fn velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = Some(Transition::Value(velocity));
        self
    }

    pub fn velocity_with(mut self, f: impl FnOnce(Vector2) -> Vector2 + 'static) -> Self {
        self.velocity = Some(Transition::Map(Box::new(f)));
        self
    }

    /// Install the per-tick hook run after integration
    pub fn on_update(
        mut self,
        hook: impl FnMut(&mut GameObject<C>, &mut SceneCtx<'_, C>) + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }
}

/// An entity with position, velocity, collider and optional tick logic
pub struct GameObject<C> {
    id: Option<ObjectId>,
    renderable: Renderable,
    position: Vector2,
    velocity: Vector2,
    origin: Origin,
    /// Local-space collider; `None` means the full bounding rectangle
    collider: Option<Collider>,
    on_update: Option<ObjectHook<C>>,
    /// Held until the object joins a scene, then moved into the scene's input
    pending_pointer_handler: Option<ObjectHook<C>>,
    interactive: bool,
    cursor: CursorStyle,
    disposed: bool,
}

impl<C> fmt::Debug for GameObject<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("renderable", &self.renderable)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("origin", &self.origin)
            .field("collider", &self.collider)
            .field("interactive", &self.interactive)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<C> GameObject<C> {
    pub fn new(renderable: Renderable) -> Self {
        Self {
            id: None,
            renderable,
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            origin: Origin::Corner,
            collider: None,
            on_update: None,
            pending_pointer_handler: None,
            interactive: false,
            cursor: CursorStyle::Default,
            disposed: false,
        }
    }

    /// Id assigned by the owning scene; `None` until instantiated
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }

    pub fn renderable_mut(&mut self) -> &mut Renderable {
        &mut self.renderable
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Intrinsic size of the renderable
    pub fn size(&self) -> Vector2 {
        self.renderable.size()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Apply position/velocity changes (and optionally a new tick hook)
    ///
    /// Takes effect immediately: reads after this call see the new state.
    pub fn set_physics(&mut self, physics: Physics<C>) -> Result<(), InvalidStateError> {
        if self.disposed {
            return Err(InvalidStateError::GameObjectDisposed);
        }
        if let Some(transition) = physics.position {
            self.position = transition.apply(self.position);
        }
        if let Some(transition) = physics.velocity {
            self.velocity = transition.apply(self.velocity);
        }
        if let Some(hook) = physics.on_update {
            self.on_update = Some(hook);
        }
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    /// Attach a collider in local space (relative to the rectangle's top-left)
    pub fn set_collider(&mut self, collider: Collider) -> Result<(), ConfigurationError> {
        collider.validate()?;
        self.collider = Some(collider);
        Ok(())
    }

    pub fn set_button_mode(&mut self, enabled: bool, cursor: CursorStyle) {
        self.interactive = enabled;
        self.cursor = if enabled { cursor } else { CursorStyle::Default };
    }

    /// Register the pointer-down handler
    ///
    /// Takes effect when the object joins a scene, or at the scene's next
    /// pointer event if it is already a child.
    pub fn on_pointer_down(
        &mut self,
        handler: impl FnMut(&mut GameObject<C>, &mut SceneCtx<'_, C>) + 'static,
    ) {
        self.pending_pointer_handler = Some(Box::new(handler));
    }

    pub(crate) fn take_pointer_handler(&mut self) -> Option<ObjectHook<C>> {
        self.pending_pointer_handler.take()
    }

    /// Bounding rectangle from position, size and origin
    pub fn rect(&self) -> Rect {
        Rect::anchored(self.position, self.size(), self.origin)
    }

    /// Collider in world space
    pub fn world_collider(&self) -> Collider {
        let rect = self.rect();
        match self.collider {
            Some(local) => local.translate(rect.top_left()),
            None => Collider::Box(rect),
        }
    }

    /// Whether a screen point falls within the current collider
    pub fn hit_test(&self, point: Vector2) -> bool {
        self.world_collider().contains(point)
    }

    /// One physics tick: integrate, then run the tick hook
    pub fn update(&mut self, ctx: &mut SceneCtx<'_, C>) {
        if self.disposed {
            return;
        }
        self.position = self.position + self.velocity;

        if let Some(mut hook) = self.on_update.take() {
            hook(self, ctx);
            // A hook installed by the running hook replaces it
            if self.on_update.is_none() {
                self.on_update = Some(hook);
            }
        }
    }

    pub(crate) fn dispose(&mut self) {
        self.disposed = true;
        self.on_update = None;
        self.pending_pointer_handler = None;
    }
}
