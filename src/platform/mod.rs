//! Platform-facing collaborators
//!
//! Input sources deliver events to the core through these types. Time lives in
//! [`crate::time`], the drawing surface in [`crate::renderer`].

pub mod input;

pub use input::{CursorStyle, PointerHandler, PointerInput};
