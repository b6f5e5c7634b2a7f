//! Tap Bounce headless autoplay
//!
//! Runs the game on a recording surface with a seeded virtual player.
//!
//! Usage: `tap-bounce [settings.json] [seed] [runs]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tap_bounce::assets::{Texture, TextureCache};
use tap_bounce::consts::{MAX_SUBSTEPS, SIM_DT};
use tap_bounce::game::{BALL_IMAGE, EndScene, GameScene, Session};
use tap_bounce::renderer::HeadlessSurface;
use tap_bounce::sim::{Renderable, Scene, Vector2};
use tap_bounce::time::FixedStep;
use tap_bounce::{AppManager, EngineError, Settings};

type App = AppManager<HeadlessSurface, Session>;

/// Host frame length fed to the fixed-step accumulator (30 Hz host)
const HOST_FRAME: f32 = 1.0 / 30.0;
/// Give up after this many host frames
const MAX_HOST_FRAMES: u32 = 30 * 60 * 5;
const BALL_SIZE: f32 = 32.0;
/// Chance per tick that the player reacts to a low, falling ball
const TAP_CHANCE: f64 = 0.08;

/// Seeded player that taps the falling ball, sometimes late, sometimes off target
struct VirtualPlayer {
    rng: Pcg32,
    runs_wanted: u32,
}

impl VirtualPlayer {
    fn new(seed: u64, runs_wanted: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            runs_wanted,
        }
    }

    /// Pick a screen point to tap this tick, if any
    fn choose_tap(&mut self, scene: &Scene<Session>, session: &Session, screen_height: f32) -> Option<Vector2> {
        match scene.name() {
            GameScene::NAME => {
                let ball = scene
                    .children()
                    .find(|c| matches!(c.renderable(), Renderable::Sprite(_)))?;
                let center = ball.rect().center();
                if session.score == 0 {
                    return Some(center);
                }
                let falling = ball.velocity().y() > 0.0;
                let low = ball.rect().bottom() > screen_height * 0.7;
                if !(falling && low) || !self.rng.random_bool(TAP_CHANCE) {
                    return None;
                }
                let reach = BALL_SIZE * 0.6;
                let jitter = Vector2::new(
                    self.rng.random_range(-reach..reach),
                    self.rng.random_range(-reach..reach),
                );
                Some(center + jitter)
            }
            EndScene::NAME if session.runs < self.runs_wanted => scene
                .children()
                .find(|c| c.renderable().text() == Some("RETRY"))
                .map(|retry| retry.rect().center()),
            _ => None,
        }
    }
}

fn load_settings() -> Result<Settings, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading settings from {path}");
            Ok(Settings::from_json(&std::fs::read_to_string(path)?)?)
        }
        None => Ok(Settings::default()),
    }
}

fn parse_arg<T: std::str::FromStr>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(default)
}

fn run(app: &mut App, loader: &TextureCache, session: &mut Session, player: &mut VirtualPlayer) -> Result<u32, EngineError> {
    let mut step = FixedStep::new(SIM_DT, MAX_SUBSTEPS);
    let screen_height = app.screen().height;
    let mut ticks = 0;

    for _ in 0..MAX_HOST_FRAMES {
        for _ in 0..step.advance(HOST_FRAME) {
            let tap = app
                .current_scene()
                .and_then(|scene| player.choose_tap(scene, session, screen_height));
            if let Some(point) = tap {
                if app.pointer_down(point, session).is_none() {
                    log::debug!("Tap at ({:.1}, {:.1}) missed", point.x(), point.y());
                }
            }

            app.tick(session);
            ticks += 1;

            if pollster::block_on(app.apply_pending(loader, session))? {
                log::debug!("Tick {ticks}: switched to {}", app.current_scene().map_or("none", |s| s.name()));
            }
        }

        let done = session.runs >= player.runs_wanted
            && app.current_scene().is_some_and(|s| s.name() == EndScene::NAME);
        if done {
            break;
        }
    }
    Ok(ticks)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tap Bounce (headless) starting...");

    let settings = load_settings()?;
    let seed = parse_arg(2, 0x7a9_b0u64);
    let runs = parse_arg(3, 3u32);

    let mut app = App::new(settings, HeadlessSurface::new())?;
    let loader = TextureCache::new().with(Texture::new(BALL_IMAGE, BALL_SIZE, BALL_SIZE));
    let mut session = Session::new();
    let mut player = VirtualPlayer::new(seed, runs);
    log::info!("Virtual player seed: {seed}, runs: {runs}");

    pollster::block_on(app.load_scene(GameScene::scene(), &loader, &mut session))?;
    let ticks = run(&mut app, &loader, &mut session, &mut player)?;

    log::info!(
        "Played {} run(s) in {} ticks ({} frames presented)",
        session.runs,
        ticks,
        app.surface().frames_presented()
    );
    match session.best_score() {
        Some(best) => log::info!("Best score: {best} (table: {:?})", session.best_scores()),
        None => log::info!("No run scored"),
    }
    Ok(())
}
