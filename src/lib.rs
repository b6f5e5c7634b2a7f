//! Tap Bounce - run loop and entity core for a small tap-the-ball arcade game
//!
//! Core modules:
//! - `app`: Frame-clock orchestrator (active scene slot, per-frame callbacks)
//! - `sim`: Scenes, game objects, physics integration and collider geometry
//! - `renderer`: Rendering surface contract, headless surface, debug overlay
//! - `platform`: Pointer input routing
//! - `assets`: Texture handles and loaders
//! - `game`: The arcade game built on top of the core

pub mod app;
pub mod assets;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod time;

pub use app::{AppManager, LoopId, TickCtx};
pub use error::{ConfigurationError, EngineError, InvalidStateError, LoadError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Vector2;

    /// Nominal display refresh step (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up ticks per host frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default field dimensions
    pub const DEFAULT_WIDTH: f32 = 480.0;
    pub const DEFAULT_HEIGHT: f32 = 640.0;

    /// Ball defaults
    pub const BALL_START_VELOCITY: Vector2 = Vector2::new(5.0, 0.0);
    /// Vertical velocity applied when the ball is tapped (pixels/tick, upward)
    pub const BALL_TAP_VELOCITY_Y: f32 = -8.0;
    /// Downward pull added to the ball's velocity each tick once in play
    pub const BALL_GRAVITY: f32 = 0.25;

    /// Text sizes
    pub const SCORE_FONT_SIZE: f32 = 24.0;
    pub const BIG_LABEL_FONT_SIZE: f32 = 40.0;
    pub const BUTTON_FONT_SIZE: f32 = 28.0;
}
