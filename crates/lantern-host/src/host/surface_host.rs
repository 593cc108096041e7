use crate::context::{ContextManager, GraphicsContext, HostSurface};
use crate::engine::RenderEngine;
use crate::error::HostResult;
use crate::input::{InputTranslator, PointerEvent};
use crate::scheduler::{FrameScheduler, Schedule, SchedulerState};
use crate::time::FrameClock;

use super::HostConfig;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Lifecycle {
    /// Engine not yet initialized; only the init sequence may call into it.
    Pending,
    Ready,
    TornDown,
}

/// Bridges host notifications to the engine protocol.
///
/// Notifications must arrive serially on the thread that owns the graphics
/// context. Every `on_*` method returns the [`Schedule`] the host must honour.
///
/// Error policy: transient surface errors are absorbed here and retried on the
/// next host opportunity; engine failures propagate and are fatal.
pub struct SurfaceHost<E: RenderEngine, C: GraphicsContext> {
    engine: E,
    contexts: ContextManager<C>,
    scheduler: FrameScheduler,
    input: InputTranslator,
    clock: FrameClock,

    framebuffer: Option<u32>,
    diagnostics: bool,
    lifecycle: Lifecycle,
}

impl<E: RenderEngine, C: GraphicsContext> SurfaceHost<E, C> {
    pub fn new(engine: E, contexts: ContextManager<C>, config: &HostConfig) -> Self {
        Self {
            engine,
            contexts,
            scheduler: FrameScheduler::new(config.animate),
            input: InputTranslator::new(config.pointer_sensitivity),
            clock: FrameClock::new(),
            framebuffer: config.framebuffer,
            diagnostics: config.diagnostics,
            lifecycle: Lifecycle::Pending,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn input(&self) -> &InputTranslator {
        &self.input
    }

    /// The surface became visible or needs repainting.
    ///
    /// Runs the one-time init sequence on first successful exposure, then asks
    /// for a frame. If the surface cannot be made current yet, nothing happens
    /// and the next exposure retries.
    pub fn on_expose(&mut self, surface: &C::Surface) -> HostResult<Schedule> {
        if !self.ensure_initialized(surface)? {
            return Ok(Schedule::Idle);
        }
        Ok(self.scheduler.request_render())
    }

    /// The surface changed size or device pixel ratio.
    ///
    /// The surface's size at the time of the next draw reaches the engine's
    /// `resize_window` before that draw.
    pub fn on_resize(&mut self, surface: &C::Surface) -> Schedule {
        if self.is_torn_down() {
            return Schedule::Idle;
        }
        let size = surface.viewport();
        log::debug!(
            "resize to {}x{} @ {}",
            size.width,
            size.height,
            size.device_pixel_ratio
        );
        self.scheduler.resize()
    }

    /// Explicit "render now" request from the embedding application.
    pub fn request_render(&mut self) -> Schedule {
        if self.is_torn_down() {
            return Schedule::Idle;
        }
        self.scheduler.request_render()
    }

    /// Pointer press/move/release.
    ///
    /// Camera deltas reach the engine only once it is initialized; earlier
    /// ones are dropped but still move the baseline.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> HostResult<Schedule> {
        let Some(delta) = self.input.apply(event) else {
            return Ok(Schedule::Idle);
        };

        if !self.is_initialized() {
            log::trace!("dropping camera delta before engine init");
            return Ok(Schedule::Idle);
        }

        log::trace!("camera delta {delta:?}");
        self.engine.handle_mouse(delta)?;
        Ok(self.scheduler.request_render())
    }

    /// Host render callback: draws at most one frame.
    pub fn on_render_callback(&mut self, surface: &C::Surface) -> HostResult<Schedule> {
        if self.scheduler.state() != SchedulerState::RenderRequested {
            log::trace!("dropping unrequested render callback");
            return Ok(Schedule::Idle);
        }

        let ready = self.ensure_initialized(surface)?
            && surface.viewport().is_drawable()
            && self.contexts.make_current(surface);

        let plan = match self.scheduler.begin_frame(ready) {
            Ok(plan) => plan,
            Err(reason) => {
                log::debug!("frame skipped: {reason:?}");
                return Ok(Schedule::Idle);
            }
        };

        if plan.resize {
            let size = surface.viewport();
            self.contexts.resize_surface(surface, size);
            self.engine.resize_window(size)?;
        }

        let time = self.clock.tick();
        self.engine.display_loop(time.elapsed, self.framebuffer)?;

        if let Err(err) = self.contexts.swap(surface) {
            if !err.is_transient() {
                return Err(err);
            }
            log::warn!("frame {} not presented: {err}", time.frame_index);
        }

        Ok(self.scheduler.finish_frame())
    }

    /// Clears the engine's accumulated frame state and redraws.
    pub fn on_reset(&mut self, surface: &C::Surface) -> HostResult<Schedule> {
        if !self.is_initialized() || !self.contexts.make_current(surface) {
            return Ok(Schedule::Idle);
        }
        self.engine.reset(self.framebuffer)?;
        self.clock.reset();
        Ok(self.scheduler.request_render())
    }

    pub fn set_animating(&mut self, animating: bool) -> Schedule {
        if self.is_torn_down() {
            return Schedule::Idle;
        }
        log::debug!("animation {}", if animating { "on" } else { "off" });
        self.scheduler.set_animating(animating)
    }

    pub fn toggle_animation(&mut self) -> Schedule {
        let animating = !self.scheduler.is_animating();
        self.set_animating(animating)
    }

    /// Shuts the engine down and releases the context.
    ///
    /// Idempotent. The context is released even if the engine's `quit` fails;
    /// that failure is still reported.
    pub fn teardown(&mut self, surface: &C::Surface) -> HostResult<()> {
        let was_ready = match self.lifecycle {
            Lifecycle::TornDown => return Ok(()),
            Lifecycle::Ready => true,
            Lifecycle::Pending => false,
        };
        self.lifecycle = Lifecycle::TornDown;

        // `quit` frees GL objects of this context and needs it current.
        let result = if !was_ready {
            Ok(())
        } else if self.contexts.make_current(surface) {
            self.engine.quit()
        } else {
            log::warn!("context not current at teardown; skipping engine quit");
            Ok(())
        };

        self.contexts.destroy();
        log::info!("engine host torn down");
        result
    }

    /// Runs `make_current → load_gl_symbol → init_gl → init_scene → [print_gl_info]`
    /// exactly once. Returns whether the engine is ready for draw calls.
    fn ensure_initialized(&mut self, surface: &C::Surface) -> HostResult<bool> {
        match self.lifecycle {
            Lifecycle::Ready => return Ok(true),
            Lifecycle::TornDown => return Ok(false),
            Lifecycle::Pending => {}
        }

        let viewport = surface.viewport();
        if !viewport.is_drawable() || !self.contexts.make_current(surface) {
            log::debug!("surface not ready; engine init deferred");
            return Ok(false);
        }

        // Latch first so a re-entrant expose cannot start a second sequence.
        self.lifecycle = Lifecycle::Ready;

        self.contexts.resize_surface(surface, viewport);
        self.engine.load_gl_symbol()?;
        self.engine.init_gl(viewport)?;
        self.engine.init_scene(viewport)?;
        if self.diagnostics {
            self.engine.print_gl_info()?;
        }

        // The init size supersedes any resize recorded before it.
        self.scheduler.clear_pending_resize();

        log::info!(
            "engine initialized at {}x{} @ {}",
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SurfaceConfig;
    use crate::error::HostError;
    use crate::input::{CameraDelta, MouseButton, DEFAULT_SENSITIVITY};
    use crate::testing::{Call, CallLog, FakeSurface, RecordingContext, RecordingEngine};
    use crate::viewport::ViewportSize;

    type TestHost = SurfaceHost<RecordingEngine, RecordingContext>;

    fn host_with(log: &CallLog, config: HostConfig) -> (FakeSurface, TestHost) {
        let ctx_log = log.clone();
        let (surface, contexts) = ContextManager::create(SurfaceConfig::default(), move |_| {
            Ok((
                FakeSurface::exposed(640.0, 480.0, 1.0),
                RecordingContext::new(ctx_log),
            ))
        })
        .unwrap();
        let host = SurfaceHost::new(RecordingEngine::new(log.clone()), contexts, &config);
        (surface, host)
    }

    fn host(log: &CallLog) -> (FakeSurface, TestHost) {
        host_with(
            log,
            HostConfig {
                diagnostics: false,
                ..HostConfig::default()
            },
        )
    }

    fn vp(w: f64, h: f64) -> ViewportSize {
        ViewportSize::new(w, h, 1.0)
    }

    fn drag_delta(dx: f32, dy: f32) -> Call {
        Call::HandleMouse(CameraDelta {
            dx,
            dy,
            sensitivity: DEFAULT_SENSITIVITY,
        })
    }

    // ── initialization ────────────────────────────────────────────────────

    #[test]
    fn expose_runs_init_sequence_once() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);

        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Render);
        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Idle);

        assert_eq!(
            log.engine_calls(),
            vec![
                Call::LoadGlSymbol,
                Call::InitGl(vp(640.0, 480.0)),
                Call::InitScene(vp(640.0, 480.0)),
            ]
        );
        assert!(host.is_initialized());
    }

    #[test]
    fn diagnostics_follow_init() {
        let log = CallLog::default();
        let (surface, mut host) = host_with(&log, HostConfig::default());

        let _ = host.on_expose(&surface).unwrap();
        assert_eq!(log.engine_calls().last(), Some(&Call::PrintGlInfo));
    }

    #[test]
    fn hidden_surface_defers_init_until_exposed() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        surface.set_exposed(false);

        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Idle);
        assert!(log.calls().is_empty());

        surface.set_exposed(true);
        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Render);
        assert_eq!(log.count(|c| *c == Call::LoadGlSymbol), 1);
    }

    #[test]
    fn make_current_failure_is_retried_silently() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        log.fail_make_current(true);

        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Idle);
        assert!(!host.is_initialized());

        log.fail_make_current(false);
        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Render);
        assert!(host.is_initialized());
    }

    #[test]
    fn init_failure_is_fatal() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        log.fail_engine_call("init_scene");

        let err = host.on_expose(&surface).unwrap_err();
        assert!(matches!(err, HostError::EngineCall { call: "init_scene", .. }));
        assert!(!err.is_transient());
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn expose_then_resize_scenario() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);

        let _ = host.on_expose(&surface).unwrap();
        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);
        log.clear();

        surface.set_size(800.0, 600.0, 1.0);
        assert_eq!(host.on_resize(&surface), Schedule::Render);
        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);

        assert_eq!(
            log.engine_calls(),
            vec![Call::ResizeWindow(vp(800.0, 600.0)), Call::DisplayLoop(None)]
        );
        assert_eq!(host.scheduler().state(), SchedulerState::Idle);
    }

    #[test]
    fn resize_reaches_native_surface_before_engine() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();
        log.clear();

        surface.set_size(400.0, 300.0, 2.0);
        let _ = host.on_resize(&surface);
        let _ = host.on_render_callback(&surface).unwrap();

        let calls = log.calls();
        let native = calls.iter().position(|c| *c == Call::ResizeSurface(800, 600));
        let engine = calls
            .iter()
            .position(|c| matches!(c, Call::ResizeWindow(_)));
        assert!(native.is_some() && native < engine);
    }

    #[test]
    fn double_resize_draws_once_with_latest_size() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();
        log.clear();

        surface.set_size(800.0, 600.0, 1.0);
        let _ = host.on_resize(&surface);
        surface.set_size(1024.0, 768.0, 1.0);
        let _ = host.on_resize(&surface);
        let _ = host.on_render_callback(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(
            log.engine_calls(),
            vec![Call::ResizeWindow(vp(1024.0, 768.0)), Call::DisplayLoop(None)]
        );
    }

    #[test]
    fn resize_forwards_size_current_at_draw_time() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();
        log.clear();

        surface.set_size(800.0, 600.0, 1.0);
        let _ = host.on_resize(&surface);
        // Geometry keeps changing before the callback arrives.
        surface.set_size(1280.0, 720.0, 2.0);
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(
            log.calls(),
            vec![
                Call::MakeCurrent,
                Call::ResizeSurface(2560, 1440),
                Call::ResizeWindow(ViewportSize::new(1280.0, 720.0, 2.0)),
                Call::DisplayLoop(None),
                Call::Swap,
            ]
        );
    }

    #[test]
    fn every_draw_is_presented() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        let calls = log.calls();
        let draw = calls.iter().position(|c| matches!(c, Call::DisplayLoop(_)));
        let swap = calls.iter().position(|c| *c == Call::Swap);
        assert!(draw.is_some() && draw < swap);
    }

    #[test]
    fn hidden_surface_drops_request() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        surface.set_exposed(false);

        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);
        assert_eq!(host.scheduler().state(), SchedulerState::Idle);
        assert_eq!(log.count(|c| matches!(c, Call::DisplayLoop(_))), 0);
    }

    #[test]
    fn zero_size_surface_is_never_drawn() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        surface.set_size(0.0, 0.0, 1.0);

        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);
        assert_eq!(log.count(|c| matches!(c, Call::DisplayLoop(_))), 0);
    }

    #[test]
    fn render_callback_before_expose_initializes_lazily() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);

        let _ = host.on_resize(&surface);
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(
            log.engine_calls(),
            vec![
                Call::LoadGlSymbol,
                Call::InitGl(vp(640.0, 480.0)),
                Call::InitScene(vp(640.0, 480.0)),
                Call::DisplayLoop(None),
            ]
        );
    }

    #[test]
    fn draw_failure_is_fatal() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        log.fail_engine_call("display_loop");

        let err = host.on_render_callback(&surface).unwrap_err();
        assert!(matches!(err, HostError::EngineCall { call: "display_loop", .. }));
    }

    #[test]
    fn framebuffer_target_is_forwarded() {
        let log = CallLog::default();
        let (surface, mut host) = host_with(
            &log,
            HostConfig {
                framebuffer: Some(3),
                diagnostics: false,
                ..HostConfig::default()
            },
        );
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(log.engine_calls().last(), Some(&Call::DisplayLoop(Some(3))));
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn animating_keeps_requesting_frames() {
        let log = CallLog::default();
        let (surface, mut host) = host_with(
            &log,
            HostConfig {
                animate: true,
                diagnostics: false,
                ..HostConfig::default()
            },
        );

        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Render);
        for _ in 0..3 {
            assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Render);
        }

        assert_eq!(host.toggle_animation(), Schedule::Idle);
        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);
        assert_eq!(log.count(|c| matches!(c, Call::DisplayLoop(_))), 4);

        let elapsed = log.elapsed();
        assert_eq!(elapsed[0], 0.0);
        assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn enabling_animation_from_idle_requests_frame() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(host.set_animating(true), Schedule::Render);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn drag_scenario_resets_baseline_between_presses() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();
        log.clear();

        let events = [
            PointerEvent::Press(MouseButton::Left),
            PointerEvent::Move { x: 100.0, y: 100.0 },
            PointerEvent::Move { x: 90.0, y: 95.0 },
            PointerEvent::Release(MouseButton::Left),
            PointerEvent::Press(MouseButton::Left),
            PointerEvent::Move { x: 50.0, y: 50.0 },
            PointerEvent::Move { x: 40.0, y: 40.0 },
        ];
        for ev in events {
            let _ = host.on_pointer_event(ev).unwrap();
        }

        assert_eq!(
            log.engine_calls(),
            vec![drag_delta(10.0, 5.0), drag_delta(10.0, 10.0)]
        );
    }

    #[test]
    fn camera_delta_requests_redraw() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        let _ = host.on_pointer_event(PointerEvent::Press(MouseButton::Left)).unwrap();
        assert_eq!(
            host.on_pointer_event(PointerEvent::Move { x: 1.0, y: 1.0 }).unwrap(),
            Schedule::Idle
        );
        assert_eq!(
            host.on_pointer_event(PointerEvent::Move { x: 2.0, y: 2.0 }).unwrap(),
            Schedule::Render
        );
    }

    #[test]
    fn deltas_before_init_never_reach_engine() {
        let log = CallLog::default();
        let (_surface, mut host) = host(&log);

        let _ = host.on_pointer_event(PointerEvent::Press(MouseButton::Left)).unwrap();
        let _ = host.on_pointer_event(PointerEvent::Move { x: 0.0, y: 0.0 }).unwrap();
        let s = host.on_pointer_event(PointerEvent::Move { x: 5.0, y: 5.0 }).unwrap();

        assert_eq!(s, Schedule::Idle);
        assert!(log.engine_calls().is_empty());
        assert!(host.input().state().initialized);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_requires_initialized_engine() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);

        assert_eq!(host.on_reset(&surface).unwrap(), Schedule::Idle);
        let _ = host.on_expose(&surface).unwrap();
        let _ = host.on_render_callback(&surface).unwrap();

        assert_eq!(host.on_reset(&surface).unwrap(), Schedule::Render);
        assert_eq!(log.count(|c| *c == Call::Reset(None)), 1);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn teardown_quits_engine_then_releases_context_once() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        log.clear();

        host.teardown(&surface).unwrap();
        host.teardown(&surface).unwrap();

        let calls = log.calls();
        assert_eq!(calls.iter().filter(|c| **c == Call::Quit).count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == Call::Release).count(), 1);
        assert!(calls.iter().position(|c| *c == Call::Quit) < calls.iter().position(|c| *c == Call::Release));
    }

    #[test]
    fn teardown_before_init_skips_quit() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);

        host.teardown(&surface).unwrap();
        assert_eq!(log.calls(), vec![Call::Release]);
    }

    #[test]
    fn teardown_on_hidden_surface_skips_quit_but_releases() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        log.clear();

        surface.set_exposed(false);
        host.teardown(&surface).unwrap();

        assert_eq!(log.calls(), vec![Call::Release]);
        assert!(host.is_torn_down());
    }

    #[test]
    fn torn_down_host_ignores_notifications() {
        let log = CallLog::default();
        let (surface, mut host) = host(&log);
        let _ = host.on_expose(&surface).unwrap();
        host.teardown(&surface).unwrap();
        log.clear();

        assert_eq!(host.on_expose(&surface).unwrap(), Schedule::Idle);
        assert_eq!(host.on_resize(&surface), Schedule::Idle);
        assert_eq!(host.on_render_callback(&surface).unwrap(), Schedule::Idle);
        assert!(log.calls().is_empty());
    }
}
