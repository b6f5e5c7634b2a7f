//! The arcade game: keep the ball in the air by tapping it
//!
//! Content built on the core: the session store, the ball entity and the two
//! scenes.

pub mod ball;
pub mod end_scene;
pub mod game_scene;
pub mod session;

pub use ball::{BALL_IMAGE, bounce_off_sides};
pub use end_scene::EndScene;
pub use game_scene::GameScene;
pub use session::{Session, share_message};
