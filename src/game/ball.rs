//! The tappable ball
//!
//! Bounces off the side walls, flies up when tapped, falls back under a constant
//! pull, and ends the run once it drops below the field.

use super::end_scene::EndScene;
use super::session::Session;
use crate::consts::{BALL_GRAVITY, BALL_TAP_VELOCITY_Y};
use crate::error::{EngineError, InvalidStateError, LoadError};
use crate::platform::CursorStyle;
use crate::sim::{
    ColliderManager, GameObject, ObjectId, Origin, Physics, Rect, Renderable, Scene, SceneCtx,
    Vector2,
};

pub const BALL_IMAGE: &str = "img/ball.png";

/// Spawn a ball centred on `center` into `scene`
pub fn spawn(
    scene: &mut Scene<Session>,
    center: Vector2,
    velocity: Vector2,
) -> Result<ObjectId, EngineError> {
    let texture = scene
        .texture(BALL_IMAGE)
        .cloned()
        .ok_or_else(|| LoadError::NotFound(BALL_IMAGE.to_string()))?;

    let mut ball = GameObject::new(Renderable::sprite(texture));
    // Edge tests below work on the rectangle, so anchor at the corner
    ball.set_origin(Origin::Corner);
    let size = ball.size();
    ball.set_physics(
        Physics::new()
            .position(center.calc(|p| {
                Vector2::new(p.x() - size.x() / 2.0, p.y() - size.y() / 2.0)
            }))
            .velocity(velocity)
            .on_update(on_tick),
    )?;
    ball.set_collider(ColliderManager::box_to_circle(0.0, 0.0, size.x()))?;
    ball.set_button_mode(true, CursorStyle::Pointer);
    ball.on_pointer_down(on_tap);

    Ok(scene.instantiate(ball)?)
}

/// Clamp against the left/right field edges and reflect horizontal velocity
///
/// Top and bottom edges are left alone. Returns whether a bounce happened.
pub fn bounce_off_sides<C>(object: &mut GameObject<C>, field: Rect) -> Result<bool, InvalidStateError> {
    let rect = object.rect();
    let mut bounced = false;

    if rect.right() > field.right() {
        let overshoot = rect.right() - field.right();
        object.set_physics(
            Physics::new()
                .position_with(move |p| p.with_x(p.x() - overshoot))
                .velocity_with(Vector2::flip_x),
        )?;
        bounced = true;
    }
    if rect.left() < field.left() {
        let undershoot = field.left() - rect.left();
        object.set_physics(
            Physics::new()
                .position_with(move |p| p.with_x(p.x() + undershoot))
                .velocity_with(Vector2::flip_x),
        )?;
        bounced = true;
    }
    Ok(bounced)
}

fn on_tick(ball: &mut GameObject<Session>, ctx: &mut SceneCtx<'_, Session>) {
    let screen = ctx.screen();
    let result = bounce_off_sides(ball, screen).and_then(|_| {
        ball.set_physics(Physics::new().velocity_with(|v| v.with_y(v.y() + BALL_GRAVITY)))
    });
    if let Err(err) = result {
        log::warn!("Ball tick skipped: {err}");
        return;
    }

    if ball.position().y() >= screen.bottom() && !ctx.scene_change_pending() {
        log::info!("Ball dropped with score {}", ctx.session().score);
        ctx.session_mut().finish_run();
        ctx.change_scene(EndScene::scene());
    }
}

fn on_tap(ball: &mut GameObject<Session>, ctx: &mut SceneCtx<'_, Session>) {
    ctx.session_mut().score += 1;
    let result = ball.set_physics(
        Physics::new().velocity_with(|v| v.with_y(BALL_TAP_VELOCITY_Y)),
    );
    if let Err(err) = result {
        log::warn!("Tap ignored: {err}");
    }
}
