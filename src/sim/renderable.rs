//! Renderable handles carried by game objects

use serde::{Deserialize, Serialize};

use super::vector::Vector2;
use crate::assets::Texture;

/// Approximate advance of one glyph relative to the font size
const GLYPH_ASPECT: f32 = 0.6;

/// Text drawn with a single color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// 0xRRGGBB
    pub color: u32,
    pub font_size: f32,
}

impl Label {
    /// Layout size, monospace approximation
    pub fn size(&self) -> Vector2 {
        let glyphs = self.text.chars().count() as f32;
        Vector2::new(glyphs * self.font_size * GLYPH_ASPECT, self.font_size)
    }
}

/// What the rendering surface draws for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Renderable {
    Sprite(Texture),
    Label(Label),
}

impl Renderable {
    pub fn sprite(texture: Texture) -> Self {
        Renderable::Sprite(texture)
    }

    pub fn label(text: impl Into<String>, color: u32, font_size: f32) -> Self {
        Renderable::Label(Label {
            text: text.into(),
            color,
            font_size,
        })
    }

    /// Intrinsic size used to derive the bounding rectangle
    pub fn size(&self) -> Vector2 {
        match self {
            Renderable::Sprite(texture) => texture.size(),
            Renderable::Label(label) => label.size(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Renderable::Label(label) => Some(&label.text),
            Renderable::Sprite(_) => None,
        }
    }

    /// Replace label text; no-op for sprites
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Renderable::Label(label) = self {
            label.text = text.into();
        }
    }
}
