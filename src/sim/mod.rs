//! Entity and physics core
//!
//! Everything a tick touches lives here. This module must stay deterministic:
//! - One integration step per tick, no wall-clock input
//! - Stable iteration order (insertion order within a scene)
//! - No rendering or platform dependencies beyond the handle types

pub mod collider;
pub mod game_object;
pub mod rect;
pub mod renderable;
pub mod scene;
pub mod vector;

pub use collider::{Collider, ColliderManager};
pub use game_object::{GameObject, ObjectHook, ObjectId, Physics, Transition};
pub use rect::{Origin, Rect};
pub use renderable::{Label, Renderable};
pub use scene::{LifecycleState, Scene, SceneCtx, SceneId, SceneRequests, SceneScript};
pub use vector::Vector2;
