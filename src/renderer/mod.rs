//! Rendering collaborators
//!
//! The surface trait the orchestrator draws through, a headless implementation,
//! and the debug overlay layer.

pub mod debug;
pub mod headless;
pub mod surface;

pub use debug::{DebugLayer, DebugShape, Fill};
pub use headless::{HeadlessSurface, SurfaceEvent};
pub use surface::{DrawItem, Frame, RenderSurface, SurfaceConfig};
