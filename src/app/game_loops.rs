//! Registered per-frame callbacks
//!
//! Callbacks are keyed by a caller-chosen [`LoopId`]; registering an id that is
//! already present is a no-op. Iteration order is registration order.

use std::borrow::Cow;
use std::fmt;

use super::context::TickCtx;

/// Identity of a per-frame callback
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopId(Cow<'static, str>);

impl LoopId {
    /// Reserved for the active scene's update
    pub const SCENE_UPDATE: LoopId = LoopId(Cow::Borrowed("scene.update"));

    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for LoopId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for LoopId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A per-frame callback
pub type GameLoop<C> = Box<dyn FnMut(&mut TickCtx<'_, C>)>;

struct Entry<C> {
    id: LoopId,
    /// Distinguishes a re-registered id from the entry it replaced
    generation: u64,
    /// `None` while the callback itself is running
    callback: Option<GameLoop<C>>,
}

/// Ordered set of per-frame callbacks without duplicate ids
pub struct GameLoops<C> {
    entries: Vec<Entry<C>>,
    next_generation: u64,
}

/// One callback scheduled for the running tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scheduled {
    id: LoopId,
    generation: u64,
}

impl<C> Default for GameLoops<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_generation: 0,
        }
    }
}

impl<C> GameLoops<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `id`. Returns false if `id` was already registered.
    pub fn add<F>(&mut self, id: impl Into<LoopId>, callback: F) -> bool
    where
        F: FnMut(&mut TickCtx<'_, C>) + 'static,
    {
        self.add_boxed(id.into(), Box::new(callback))
    }

    pub fn add_boxed(&mut self, id: LoopId, callback: GameLoop<C>) -> bool {
        if self.contains(&id) {
            log::debug!("Game loop {id} already registered");
            return false;
        }
        log::debug!("Game loop {id} registered");
        let generation = self.next_generation;
        self.next_generation += 1;
        self.entries.push(Entry {
            id,
            generation,
            callback: Some(callback),
        });
        true
    }

    /// Unregister `id`. Returns false if it was not registered.
    pub fn remove(&mut self, id: &LoopId) -> bool {
        match self.entries.iter().position(|e| &e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                log::debug!("Game loop {id} removed");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Clearing {} game loop(s)", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn contains(&self, id: &LoopId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in invocation order
    pub fn ids(&self) -> impl Iterator<Item = &LoopId> {
        self.entries.iter().map(|e| &e.id)
    }

    /// Callbacks scheduled for the tick about to run
    pub(crate) fn snapshot(&self) -> Vec<Scheduled> {
        self.entries
            .iter()
            .map(|e| Scheduled {
                id: e.id.clone(),
                generation: e.generation,
            })
            .collect()
    }

    fn entry_mut(&mut self, scheduled: &Scheduled) -> Option<&mut Entry<C>> {
        self.entries
            .iter_mut()
            .find(|e| e.id == scheduled.id && e.generation == scheduled.generation)
    }

    /// Detach a callback for invocation
    ///
    /// Returns `None` when the entry was removed earlier in the tick, even if
    /// the same id has been registered again since.
    pub(crate) fn take(&mut self, scheduled: &Scheduled) -> Option<GameLoop<C>> {
        self.entry_mut(scheduled).and_then(|e| e.callback.take())
    }

    /// Put a callback back after it ran
    ///
    /// Dropped if the entry was removed or replaced while it was running.
    pub(crate) fn restore(&mut self, scheduled: &Scheduled, callback: GameLoop<C>) {
        if let Some(entry) = self.entry_mut(scheduled) {
            if entry.callback.is_none() {
                entry.callback = Some(callback);
            }
        }
    }
}
