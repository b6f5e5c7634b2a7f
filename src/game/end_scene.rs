//! Result screen: final score, retry and share buttons

use super::game_scene::GameScene;
use super::session::{Session, share_message};
use crate::consts::{BIG_LABEL_FONT_SIZE, BUTTON_FONT_SIZE};
use crate::error::{EngineError, InvalidStateError};
use crate::platform::CursorStyle;
use crate::sim::{GameObject, Origin, Physics, Renderable, Scene, SceneCtx, SceneScript, Vector2};

const MESSAGE_COLOR: u32 = 0xfcbb08;
const BUTTON_COLOR: u32 = 0xffffff;

#[derive(Debug, Default)]
pub struct EndScene;

impl EndScene {
    pub const NAME: &'static str = "end";

    pub fn scene() -> Scene<Session> {
        Scene::with_script(Vec::<String>::new(), EndScene)
    }
}

fn label(text: String, color: u32, font_size: f32, position: Vector2) -> Result<GameObject<Session>, InvalidStateError> {
    let mut object = GameObject::new(Renderable::label(text, color, font_size));
    object.set_origin(Origin::Center);
    object.set_physics(Physics::new().position(position))?;
    Ok(object)
}

fn button(
    text: &str,
    position: Vector2,
    on_press: fn(&mut SceneCtx<'_, Session>),
) -> Result<GameObject<Session>, InvalidStateError> {
    let mut object = label(text.to_string(), BUTTON_COLOR, BUTTON_FONT_SIZE, position)?;
    object.set_button_mode(true, CursorStyle::Pointer);
    object.on_pointer_down(move |_, ctx| on_press(ctx));
    Ok(object)
}

fn retry(ctx: &mut SceneCtx<'_, Session>) {
    log::info!("Retry pressed");
    ctx.change_scene(GameScene::scene());
}

fn share(ctx: &mut SceneCtx<'_, Session>) {
    let message = share_message(ctx.session().score);
    log::info!("Share: {message}");
    ctx.session_mut().shared = Some(message);
}

impl SceneScript<Session> for EndScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_start(
        &mut self,
        scene: &mut Scene<Session>,
        ctx: &mut SceneCtx<'_, Session>,
    ) -> Result<(), EngineError> {
        let screen = ctx.screen();
        let score = ctx.session().score;

        scene.instantiate(label(
            format!("SCORE: {score}"),
            MESSAGE_COLOR,
            BIG_LABEL_FONT_SIZE,
            screen.grid(1.0 / 2.0, 1.0 / 3.0),
        )?)?;
        scene.instantiate(button("RETRY", screen.grid(1.0 / 4.0, 5.0 / 6.0), retry)?)?;
        scene.instantiate(button("SHARE", screen.grid(3.0 / 4.0, 5.0 / 6.0), share)?)?;
        Ok(())
    }
}
