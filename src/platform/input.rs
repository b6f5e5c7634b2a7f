//! Pointer input: publish/subscribe keyed by entity identity

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::{GameObject, ObjectHook, ObjectId, SceneCtx};

/// Cursor shown while hovering an interactive entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// Handler invoked with the entity that received a pointer-down
pub type PointerHandler<C> = ObjectHook<C>;

/// Pointer-down subscriptions for the entities of one scene
pub struct PointerInput<C> {
    handlers: HashMap<ObjectId, PointerHandler<C>>,
}

impl<C> Default for PointerInput<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> PointerInput<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `id` to pointer-down events. Returns true if a handler was replaced.
    pub fn subscribe(&mut self, id: ObjectId, handler: PointerHandler<C>) -> bool {
        self.handlers.insert(id, handler).is_some()
    }

    pub fn unsubscribe(&mut self, id: ObjectId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: ObjectId) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Deliver a pointer-down to `target`'s handler
    ///
    /// The handler is detached while it runs so it can freely mutate the
    /// target; a handler installed meanwhile for the same id wins.
    pub(crate) fn dispatch(&mut self, target: &mut GameObject<C>, ctx: &mut SceneCtx<'_, C>) -> bool {
        let Some(id) = target.id() else {
            return false;
        };
        let Some(mut handler) = self.handlers.remove(&id) else {
            return false;
        };
        handler(target, ctx);
        self.handlers.entry(id).or_insert(handler);
        true
    }
}
