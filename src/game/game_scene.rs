//! The playing field: one ball and a scoreboard

use super::ball::{self, BALL_IMAGE};
use super::session::Session;
use crate::consts::{BALL_START_VELOCITY, SCORE_FONT_SIZE};
use crate::error::EngineError;
use crate::sim::{GameObject, ObjectId, Physics, Renderable, Scene, SceneCtx, SceneScript, Vector2};

#[derive(Debug, Default)]
pub struct GameScene {
    ball: Option<ObjectId>,
    scoreboard: Option<ObjectId>,
}

impl GameScene {
    pub const NAME: &'static str = "game";

    /// A fresh, unstarted game scene
    pub fn scene() -> Scene<Session> {
        Scene::with_script([BALL_IMAGE], Self::default())
    }

    pub fn ball(&self) -> Option<ObjectId> {
        self.ball
    }
}

fn score_text(score: u64) -> String {
    format!("SCORE: {score}")
}

impl SceneScript<Session> for GameScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_start(
        &mut self,
        scene: &mut Scene<Session>,
        ctx: &mut SceneCtx<'_, Session>,
    ) -> Result<(), EngineError> {
        ctx.session_mut().score = 0;

        let screen = ctx.screen();
        self.ball = Some(ball::spawn(
            scene,
            screen.grid(1.0 / 2.0, 5.0 / 6.0),
            BALL_START_VELOCITY,
        )?);

        let mut scoreboard = GameObject::new(Renderable::label(score_text(0), 0xffffff, SCORE_FONT_SIZE));
        scoreboard.set_physics(Physics::new().position(Vector2::ZERO))?;
        self.scoreboard = Some(scene.instantiate(scoreboard)?);
        Ok(())
    }

    fn on_update(&mut self, scene: &mut Scene<Session>, ctx: &mut SceneCtx<'_, Session>) {
        let score = ctx.session().score;
        if let Some(board) = self.scoreboard.and_then(|id| scene.object_mut(id)) {
            board.renderable_mut().set_text(score_text(score));
        }

        // The ball waits for the first tap
        if score == 0 {
            return;
        }

        if let Some(ball) = self.ball.and_then(|id| scene.object_mut(id)) {
            ball.update(ctx);
        }
    }
}
