//! Frame-clock orchestrator
//!
//! `AppManager` owns the rendering surface, the active-scene slot and the set of
//! per-frame callbacks. The host calls [`AppManager::tick`] once per display
//! refresh; scene switches requested during a tick are applied afterwards by
//! [`AppManager::apply_pending`], so a tick only ever sees one scene.

pub mod context;
pub mod game_loops;

pub use context::TickCtx;
pub use game_loops::{GameLoop, GameLoops, LoopId};

use crate::assets::ResourceLoader;
use crate::error::{ConfigurationError, EngineError, InvalidStateError};
use crate::renderer::{DebugLayer, Frame, RenderSurface};
use crate::settings::Settings;
use crate::sim::{ObjectId, Rect, Scene, SceneCtx, SceneRequests, Vector2};
use crate::time::{FrameClock, FrameTime};

pub struct AppManager<S, C> {
    settings: Settings,
    surface: S,
    scene: Option<Scene<C>>,
    debug_layer: Option<DebugLayer>,
    game_loops: GameLoops<C>,
    pending: SceneRequests<C>,
    clock: FrameClock,
    last_frame: FrameTime,
}

impl<S: RenderSurface, C: 'static> AppManager<S, C> {
    /// Validate `settings` and configure `surface`
    pub fn new(settings: Settings, mut surface: S) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        surface.configure(&settings.surface_config());
        log::info!(
            "Surface {}x{} (pixelated: {}, debug: {})",
            settings.width,
            settings.height,
            settings.pixelated,
            settings.debug
        );
        Ok(Self {
            settings,
            surface,
            scene: None,
            debug_layer: None,
            game_loops: GameLoops::new(),
            pending: SceneRequests::default(),
            clock: FrameClock::new(),
            last_frame: FrameTime::default(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_debug(&self) -> bool {
        self.settings.debug
    }

    /// Field bounds in screen space
    pub fn screen(&self) -> Rect {
        self.settings.screen()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn current_scene(&self) -> Option<&Scene<C>> {
        self.scene.as_ref()
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut Scene<C>> {
        self.scene.as_mut()
    }

    /// Timing of the most recent tick
    pub fn last_frame(&self) -> FrameTime {
        self.last_frame
    }

    /// Debug overlay of the active scene
    ///
    /// With debug mode off this only warns and returns `None`.
    pub fn debug_layer(&mut self) -> Option<&mut DebugLayer> {
        if !self.settings.debug {
            log::warn!("Debug features are disabled");
            return None;
        }
        self.debug_layer.as_mut()
    }

    pub fn add_game_loop<F>(&mut self, id: impl Into<LoopId>, callback: F) -> bool
    where
        F: FnMut(&mut TickCtx<'_, C>) + 'static,
    {
        self.game_loops.add(id, callback)
    }

    pub fn remove_game_loop(&mut self, id: &LoopId) -> bool {
        self.game_loops.remove(id)
    }

    /// Unregister every callback, the scene update included
    pub fn clear_game_loops(&mut self) {
        self.game_loops.clear();
    }

    pub fn has_game_loop(&self, id: &LoopId) -> bool {
        self.game_loops.contains(id)
    }

    pub fn game_loops(&self) -> &GameLoops<C> {
        &self.game_loops
    }

    /// Tear down the active scene and its debug overlay
    pub fn clear_scene(&mut self) {
        if let Some(mut scene) = self.scene.take() {
            self.game_loops.remove(&LoopId::SCENE_UPDATE);
            self.surface.detach_scene(scene.id());
            log::info!("Tearing down {} ({})", scene.name(), scene.id());
            scene.dispose();
        }
        if self.debug_layer.take().is_some() {
            self.surface.detach_overlay();
        }
    }

    /// Make a started scene the active one, tearing down the previous scene first
    pub fn set_scene_container(&mut self, scene: Scene<C>) -> Result<(), InvalidStateError> {
        if !scene.is_started() {
            log::warn!("Refusing to activate {} in state {:?}", scene.name(), scene.state());
            return Err(InvalidStateError::SceneNotStarted(scene.state()));
        }
        self.clear_scene();

        self.surface.attach_scene(scene.id(), &scene.object_ids());
        log::info!("Activated {} ({}) with {} object(s)", scene.name(), scene.id(), scene.len());
        self.scene = Some(scene);

        if self.settings.debug {
            self.debug_layer = Some(DebugLayer::new(self.settings.overlay_fill()));
            self.surface.attach_overlay();
        }

        self.game_loops
            .add(LoopId::SCENE_UPDATE, |ctx: &mut TickCtx<'_, C>| ctx.update_scene());
        Ok(())
    }

    /// Preload `scene`, then activate it
    ///
    /// On failure the current scene stays active and `scene` is dropped.
    pub async fn load_scene<L: ResourceLoader>(
        &mut self,
        mut scene: Scene<C>,
        loader: &L,
        session: &mut C,
    ) -> Result<(), EngineError> {
        let mut requests = SceneRequests::default();
        {
            let mut ctx = SceneCtx::new(self.screen(), self.last_frame, session, &mut requests);
            scene.start(loader, &mut ctx).await?;
        }
        self.set_scene_container(scene)?;
        self.pending.merge(requests);
        Ok(())
    }

    /// Whether content asked for a scene switch
    pub fn has_pending_scene(&self) -> bool {
        self.pending.is_pending()
    }

    /// Apply a scene switch requested during the last tick
    ///
    /// Returns `Ok(true)` if a new scene became active.
    pub async fn apply_pending<L: ResourceLoader>(
        &mut self,
        loader: &L,
        session: &mut C,
    ) -> Result<bool, EngineError> {
        match self.pending.take() {
            Some(scene) => {
                self.load_scene(scene, loader, session).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run every registered callback once, in registration order, then present
    pub fn tick(&mut self, session: &mut C) -> FrameTime {
        let frame = self.clock.tick();
        self.last_frame = frame;
        let screen = self.screen();

        for scheduled in self.game_loops.snapshot() {
            // Removed by an earlier callback this tick
            let Some(mut callback) = self.game_loops.take(&scheduled) else {
                continue;
            };
            let mut ctx = TickCtx {
                frame,
                screen,
                loops: &mut self.game_loops,
                scene: self.scene.as_mut(),
                debug_layer: self.debug_layer.as_mut(),
                session: &mut *session,
                requests: &mut self.pending,
            };
            callback(&mut ctx);
            self.game_loops.restore(&scheduled, callback);
        }

        self.present(frame);
        frame
    }

    fn present(&mut self, time: FrameTime) {
        let frame = Frame {
            time,
            background_color: self.settings.background_color,
            items: self
                .scene
                .as_ref()
                .map(Scene::draw_items)
                .unwrap_or_default(),
            overlay: self.debug_layer.as_ref(),
        };
        self.surface.present(&frame);
    }

    /// Deliver a pointer-down at `point` to the active scene
    ///
    /// Returns the entity that handled it.
    pub fn pointer_down(&mut self, point: Vector2, session: &mut C) -> Option<ObjectId> {
        let screen = self.screen();
        let scene = self.scene.as_mut()?;
        let mut ctx = SceneCtx::new(screen, self.last_frame, session, &mut self.pending);
        scene.dispatch_pointer_down(point, &mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::assets::{Texture, TextureCache};
    use crate::error::LoadError;
    use crate::renderer::{HeadlessSurface, SurfaceEvent};
    use crate::sim::{GameObject, LifecycleState, Physics, Renderable};

    type Trace = Rc<RefCell<Vec<String>>>;
    type App = AppManager<HeadlessSurface, ()>;

    fn app(debug: bool) -> App {
        AppManager::new(Settings::default().with_debug(debug), HeadlessSurface::new()).unwrap()
    }

    fn loader() -> TextureCache {
        TextureCache::new().with(Texture::new("img/ball.png", 10.0, 10.0))
    }

    fn record(trace: &Trace, name: &str) -> impl FnMut(&mut TickCtx<'_, ()>) + 'static {
        let trace = Rc::clone(trace);
        let name = name.to_string();
        move |_ctx| trace.borrow_mut().push(name.clone())
    }

    /// Started scene whose single child logs `tag` on every update
    fn traced_scene(trace: &Trace, tag: &'static str) -> Scene<()> {
        let mut scene = Scene::new(Vec::<String>::new());
        let trace = Rc::clone(trace);
        let mut obj = GameObject::new(Renderable::sprite(Texture::new("x", 10.0, 10.0)));
        obj.set_physics(Physics::new().on_update(move |_, _| trace.borrow_mut().push(tag.to_string())))
            .unwrap();
        scene.instantiate(obj).unwrap();
        scene
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let result: Result<App, _> =
            AppManager::new(Settings::default().with_size(-1.0, 10.0), HeadlessSurface::new());
        assert!(matches!(result, Err(ConfigurationError::InvalidSize { .. })));
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        app.add_game_loop("a", record(&trace, "a"));
        app.add_game_loop("b", record(&trace, "b"));
        assert!(!app.add_game_loop("a", record(&trace, "dup")));

        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_self_removal_does_not_skip_siblings() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        app.add_game_loop("first", record(&trace, "first"));
        {
            let trace = Rc::clone(&trace);
            app.add_game_loop("once", move |ctx: &mut TickCtx<'_, ()>| {
                trace.borrow_mut().push("once".to_string());
                ctx.remove_game_loop(&LoopId::new("once"));
            });
        }
        app.add_game_loop("last", record(&trace, "last"));

        app.tick(&mut ());
        app.tick(&mut ());
        assert_eq!(
            *trace.borrow(),
            vec!["first", "once", "last", "first", "last"]
        );
        assert!(!app.has_game_loop(&LoopId::new("once")));
    }

    #[test]
    fn test_removing_later_sibling_and_adding_during_tick() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        {
            let trace = Rc::clone(&trace);
            let added = trace.clone();
            app.add_game_loop("killer", move |ctx: &mut TickCtx<'_, ()>| {
                trace.borrow_mut().push("killer".to_string());
                ctx.remove_game_loop(&LoopId::new("victim"));
                let added = added.clone();
                ctx.add_game_loop("late", move |_| added.borrow_mut().push("late".to_string()));
            });
        }
        app.add_game_loop("victim", record(&trace, "victim"));

        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["killer"]);
        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["killer", "killer", "late"]);
    }

    #[test]
    fn test_readded_sibling_waits_for_next_tick() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        {
            let trace = Rc::clone(&trace);
            let replacement = Rc::clone(&trace);
            let mut swapped = false;
            app.add_game_loop("a", move |ctx: &mut TickCtx<'_, ()>| {
                trace.borrow_mut().push("a".to_string());
                if !swapped {
                    swapped = true;
                    assert!(ctx.remove_game_loop(&LoopId::new("b")));
                    let replacement = Rc::clone(&replacement);
                    ctx.add_game_loop("b", move |_| replacement.borrow_mut().push("b-new".to_string()));
                }
            });
        }
        app.add_game_loop("b", record(&trace, "b-old"));

        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["a"]);
        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["a", "a", "b-new"]);
    }

    #[test]
    fn test_clear_game_loops_stops_everything() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        {
            let trace = Rc::clone(&trace);
            app.add_game_loop("clearer", move |ctx: &mut TickCtx<'_, ()>| {
                trace.borrow_mut().push("clearer".to_string());
                ctx.clear_game_loops();
            });
        }
        app.add_game_loop("after", record(&trace, "after"));

        app.tick(&mut ());
        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["clearer"]);
        assert!(app.game_loops().is_empty());
    }

    #[test]
    fn test_unstarted_scene_is_rejected() {
        let mut app = app(false);
        let scene = Scene::new(["img/ball.png"]);
        assert_eq!(
            app.set_scene_container(scene),
            Err(InvalidStateError::SceneNotStarted(LifecycleState::Created))
        );
        assert!(app.current_scene().is_none());
        assert!(!app.has_game_loop(&LoopId::SCENE_UPDATE));
    }

    #[test]
    fn test_swap_tears_down_before_attach() {
        let trace: Trace = Rc::default();
        let mut app = app(true);

        pollster::block_on(app.load_scene(traced_scene(&trace, "A"), &loader(), &mut ())).unwrap();
        let a = app.current_scene().unwrap().id();
        app.tick(&mut ());

        pollster::block_on(app.load_scene(traced_scene(&trace, "B"), &loader(), &mut ())).unwrap();
        let b = app.current_scene().unwrap().id();
        app.tick(&mut ());
        app.tick(&mut ());

        // Nothing from A after the swap
        assert_eq!(*trace.borrow(), vec!["A", "B", "B"]);

        let events = app.surface().events();
        let detach_a = events.iter().position(|e| *e == SurfaceEvent::SceneDetached(a)).unwrap();
        let attach_b = events.iter().position(|e| *e == SurfaceEvent::SceneAttached(b)).unwrap();
        assert!(detach_a < attach_b);
        assert_eq!(
            &events[detach_a..=attach_b + 1],
            &[
                SurfaceEvent::SceneDetached(a),
                SurfaceEvent::OverlayDetached,
                SurfaceEvent::SceneAttached(b),
                SurfaceEvent::OverlayAttached,
            ]
        );
        assert_eq!(app.surface().attached_scene(), Some(b));
        assert_eq!(app.game_loops().len(), 1);
    }

    #[test]
    fn test_failed_preload_keeps_current_scene() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        pollster::block_on(app.load_scene(traced_scene(&trace, "A"), &loader(), &mut ())).unwrap();
        let a = app.current_scene().unwrap().id();

        let mut broken: Scene<()> = Scene::new(["img/missing.png"]);
        let err = pollster::block_on(broken.start(
            &loader(),
            &mut SceneCtx::new(app.screen(), FrameTime::default(), &mut (), &mut SceneRequests::default()),
        ))
        .unwrap_err();
        assert!(matches!(err, EngineError::Load(LoadError::NotFound(_))));
        assert_eq!(broken.state(), LifecycleState::Preloading);
        assert!(app.set_scene_container(broken).is_err());

        let result = pollster::block_on(app.load_scene(
            Scene::new(["img/missing.png"]),
            &loader(),
            &mut (),
        ));
        assert!(result.is_err());
        assert_eq!(app.current_scene().map(Scene::id), Some(a));

        app.tick(&mut ());
        assert_eq!(*trace.borrow(), vec!["A"]);
    }

    #[test]
    fn test_debug_layer_only_in_debug_mode() {
        let mut plain = app(false);
        pollster::block_on(plain.load_scene(Scene::new(Vec::<String>::new()), &loader(), &mut ()))
            .unwrap();
        assert!(plain.debug_layer().is_none());
        assert!(!plain.surface().overlay_attached());

        let mut debug = app(true);
        assert!(debug.debug_layer().is_none());
        pollster::block_on(debug.load_scene(Scene::new(Vec::<String>::new()), &loader(), &mut ()))
            .unwrap();
        debug
            .debug_layer()
            .unwrap()
            .draw_rect(Rect::new(0.0, 0.0, 200.0, 200.0));
        debug.tick(&mut ());
        assert_eq!(debug.surface().last_overlay_shapes(), 1);

        // A fresh scene gets a fresh overlay
        pollster::block_on(debug.load_scene(Scene::new(Vec::<String>::new()), &loader(), &mut ()))
            .unwrap();
        assert!(debug.debug_layer().unwrap().shapes().is_empty());
    }

    #[test]
    fn test_scene_requested_mid_tick_applies_after() {
        let mut app = app(false);
        pollster::block_on(app.load_scene(Scene::new(Vec::<String>::new()), &loader(), &mut ()))
            .unwrap();
        let first = app.current_scene().unwrap().id();

        let next: Rc<RefCell<Option<Scene<()>>>> = Rc::new(RefCell::new(Some(Scene::new(["img/ball.png"]))));
        {
            let next = Rc::clone(&next);
            app.add_game_loop("switcher", move |ctx: &mut TickCtx<'_, ()>| {
                if let Some(scene) = next.borrow_mut().take() {
                    ctx.change_scene(scene);
                }
                // Still the old scene for the whole tick
                assert!(ctx.current_scene().is_some());
            });
        }

        app.tick(&mut ());
        assert!(app.has_pending_scene());
        assert_eq!(app.current_scene().unwrap().id(), first);

        assert!(pollster::block_on(app.apply_pending(&loader(), &mut ())).unwrap());
        assert_ne!(app.current_scene().unwrap().id(), first);
        assert!(!pollster::block_on(app.apply_pending(&loader(), &mut ())).unwrap());
    }

    #[test]
    fn test_present_reports_scene_items() {
        let trace: Trace = Rc::default();
        let mut app = app(false);
        pollster::block_on(app.load_scene(traced_scene(&trace, "A"), &loader(), &mut ())).unwrap();
        app.tick(&mut ());
        assert_eq!(app.surface().frames_presented(), 1);
        assert_eq!(app.surface().last_frame().len(), 1);
        assert_eq!(app.last_frame().frame_index, 0);
    }
}
