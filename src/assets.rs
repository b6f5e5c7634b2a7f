//! Drawable resource handles and loaders
//!
//! The core only needs "request N identifiers, await all, obtain handle by
//! identifier". Anything that can produce a [`Texture`] for an id can act as a
//! loader.

use std::collections::HashMap;
use std::future::{Future, ready};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::sim::Vector2;

/// A loaded drawable: identifier plus intrinsic pixel size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub id: String,
    pub width: f32,
    pub height: f32,
}

impl Texture {
    pub fn new(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }
}

/// Source of textures for scene preloading
pub trait ResourceLoader {
    /// Resolve `id` to a texture; may complete immediately when cached
    fn load(&self, id: &str) -> impl Future<Output = Result<Texture, LoadError>>;
}

/// In-memory loader holding pre-registered textures
#[derive(Debug, Clone, Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture, replacing any previous one with the same id
    pub fn insert(&mut self, texture: Texture) {
        log::debug!(
            "Registered texture {} ({}x{})",
            texture.id,
            texture.width,
            texture.height
        );
        self.textures.insert(texture.id.clone(), texture);
    }

    pub fn with(mut self, texture: Texture) -> Self {
        self.insert(texture);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.textures.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl ResourceLoader for TextureCache {
    fn load(&self, id: &str) -> impl Future<Output = Result<Texture, LoadError>> {
        ready(
            self.textures
                .get(id)
                .cloned()
                .ok_or_else(|| LoadError::NotFound(id.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = TextureCache::new().with(Texture::new("img/ball.png", 32.0, 32.0));
        let hit = pollster::block_on(cache.load("img/ball.png")).unwrap();
        assert_eq!(hit.size(), Vector2::new(32.0, 32.0));

        let miss = pollster::block_on(cache.load("img/missing.png"));
        assert_eq!(miss, Err(LoadError::NotFound("img/missing.png".to_string())));
    }
}
