use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::context::{
    open_window, ContextManager, GlTarget, GlutinContext, GraphicsContext, SurfaceConfig,
};
use crate::engine::RenderEngine;
use crate::error::{HostError, HostResult};
use crate::host::{HostConfig, SurfaceHost};
use crate::input::platform::{translate_key, translate_pointer};
use crate::input::HostKey;
use crate::scheduler::{Schedule, SchedulerState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub surface: SurfaceConfig,
    pub host: HostConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lantern".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            surface: SurfaceConfig::default(),
            host: HostConfig::default(),
        }
    }
}

/// Entry point for the runtime.
///
/// Owns the winit event loop, one window with its GL context, and the
/// [`SurfaceHost`] driving the engine.
pub struct Runtime;

impl Runtime {
    /// Runs until the window closes or a fatal error occurs.
    ///
    /// Fatal errors (context creation, engine calls) are returned after the
    /// host has been torn down.
    pub fn run<E>(config: RuntimeConfig, engine: E) -> Result<()>
    where
        E: RenderEngine + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, engine);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err).context("engine host stopped"),
            None => Ok(()),
        }
    }
}

struct WindowEntry<E: RenderEngine> {
    id: WindowId,
    target: GlTarget,
    host: SurfaceHost<E, GlutinContext>,
}

impl<E: RenderEngine> WindowEntry<E> {
    fn window(&self) -> &Window {
        self.target.window()
    }
}

struct AppState<E: RenderEngine> {
    config: RuntimeConfig,

    /// Moved into the host once the window exists.
    engine: Option<E>,

    entry: Option<WindowEntry<E>>,
    fatal: Option<HostError>,
}

impl<E: RenderEngine> AppState<E> {
    fn new(config: RuntimeConfig, engine: E) -> Self {
        Self {
            config,
            engine: Some(engine),
            entry: None,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> HostResult<()> {
        let Some(engine) = self.engine.take() else {
            return Ok(());
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (mut target, contexts) = ContextManager::create(self.config.surface.clone(), |cfg| {
            open_window(event_loop, attrs, cfg)
        })?;

        // A freshly created window is mapped; occlusion events update this later.
        target.set_exposed(true);

        let mut host = SurfaceHost::new(engine, contexts, &self.config.host);
        let schedule = host.on_expose(&target)?;

        let entry = WindowEntry {
            id: target.window().id(),
            target,
            host,
        };
        apply_schedule(&entry, schedule);
        self.entry = Some(entry);
        Ok(())
    }

    /// Tears the host down once and leaves the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut entry) = self.entry.take() {
            if let Err(e) = entry.host.teardown(&entry.target) {
                log::error!("engine teardown failed: {e}");
                self.fatal.get_or_insert(e);
            }
        }
        event_loop.exit();
    }

    /// Honours a handler result: schedules a redraw, or stops on fatal errors.
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, result: HostResult<Schedule>) {
        match result {
            Ok(schedule) => {
                if let Some(entry) = self.entry.as_ref() {
                    apply_schedule(entry, schedule);
                }
            }
            Err(e) if e.is_transient() => log::warn!("{e}; waiting for next exposure"),
            Err(e) => {
                log::error!("fatal: {e}");
                self.fatal = Some(e);
                self.shutdown(event_loop);
            }
        }
    }
}

/// Handles a platform redraw.
///
/// A redraw arriving while the scheduler is idle was not requested by the host;
/// it is the platform asking for damaged contents, so it counts as an expose.
fn redraw<E, C>(host: &mut SurfaceHost<E, C>, surface: &C::Surface) -> HostResult<Schedule>
where
    E: RenderEngine,
    C: GraphicsContext,
{
    if host.scheduler().state() == SchedulerState::Idle {
        let _ = host.on_expose(surface)?;
    }
    host.on_render_callback(surface)
}

fn apply_schedule<E: RenderEngine>(entry: &WindowEntry<E>, schedule: Schedule) {
    if schedule.wants_render() {
        entry.window().request_redraw();
    }
}

impl<E: RenderEngine> ApplicationHandler for AppState<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to start engine host: {e}");
            self.fatal = Some(e);
            self.shutdown(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.id != window_id {
            return;
        }

        let key = translate_key(&event);
        if matches!(event, WindowEvent::CloseRequested) || key == Some(HostKey::Close) {
            self.shutdown(event_loop);
            return;
        }

        let result = match &event {
            WindowEvent::Occluded(occluded) => {
                entry.target.set_exposed(!*occluded);
                if *occluded {
                    Ok(Schedule::Idle)
                } else {
                    entry.host.on_expose(&entry.target)
                }
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                Ok(entry.host.on_resize(&entry.target))
            }

            WindowEvent::RedrawRequested => redraw(&mut entry.host, &entry.target),

            _ => match key {
                Some(HostKey::Reset) => entry.host.on_reset(&entry.target),
                Some(HostKey::ToggleAnimation) => Ok(entry.host.toggle_animation()),
                Some(HostKey::Close) => Ok(Schedule::Idle),
                None => match translate_pointer(entry.window(), &event) {
                    Some(pointer) => entry.host.on_pointer_event(pointer),
                    None => Ok(Schedule::Idle),
                },
            },
        };

        self.dispatch(event_loop, result);
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}
