use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile as GlutinProfile, PossiblyCurrentContext,
    Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::error::{HostError, HostResult};
use crate::viewport::ViewportSize;

use super::{GlProfile, GraphicsContext, HostSurface, SurfaceConfig};

/// A winit window plus the GL window surface bound to it.
pub struct GlTarget {
    /// Declared before `window`: the surface must be dropped first.
    surface: Surface<WindowSurface>,

    window: Window,

    /// Tracked from winit occlusion events; winit has no expose query.
    exposed: bool,
}

impl GlTarget {
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn set_exposed(&mut self, exposed: bool) {
        self.exposed = exposed;
    }
}

impl HostSurface for GlTarget {
    fn is_exposed(&self) -> bool {
        self.exposed
    }

    fn viewport(&self) -> ViewportSize {
        let size = self.window.inner_size();
        ViewportSize::from_physical(size.width, size.height, self.window.scale_factor())
    }
}

/// glutin-backed OpenGL context.
pub struct GlutinContext {
    /// `None` once released.
    context: Option<PossiblyCurrentContext>,
    vsync: bool,
    swap_interval_applied: bool,
}

impl GraphicsContext for GlutinContext {
    type Surface = GlTarget;

    fn make_current(&mut self, target: &GlTarget) -> HostResult<()> {
        let context = self.context.as_ref().ok_or(HostError::SurfaceNotReady)?;

        context.make_current(&target.surface).map_err(|err| {
            log::debug!("glutin make_current: {err}");
            HostError::SurfaceNotReady
        })?;

        if !self.swap_interval_applied {
            let interval = if self.vsync {
                SwapInterval::Wait(NonZeroU32::MIN)
            } else {
                SwapInterval::DontWait
            };
            if let Err(err) = target.surface.set_swap_interval(context, interval) {
                log::debug!("swap interval {interval:?} not supported: {err}");
            }
            self.swap_interval_applied = true;
        }

        Ok(())
    }

    fn resize_surface(&mut self, target: &GlTarget, width: u32, height: u32) {
        // GL surfaces cannot be zero-sized; keep the previous size until a real one arrives.
        let (Some(context), Some(w), Some(h)) = (
            self.context.as_ref(),
            NonZeroU32::new(width),
            NonZeroU32::new(height),
        ) else {
            return;
        };
        target.surface.resize(context, w, h);
    }

    fn swap_buffers(&mut self, target: &GlTarget) -> HostResult<()> {
        let context = self.context.as_ref().ok_or(HostError::SurfaceNotReady)?;
        target.window.pre_present_notify();
        target.surface.swap_buffers(context).map_err(|err| {
            log::warn!("swap_buffers failed: {err}");
            HostError::SurfaceNotReady
        })
    }

    fn release(&mut self) {
        self.context.take();
    }
}

/// Creates a window, a GL window surface, and a context matching `config`.
///
/// The context is returned not yet bound; the first `make_current` binds it.
pub(crate) fn open_window(
    event_loop: &ActiveEventLoop,
    attrs: WindowAttributes,
    config: &SurfaceConfig,
) -> HostResult<(GlTarget, GlutinContext)> {
    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_transparency(false);

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(attrs))
        .build(event_loop, template, pick_config)
        .map_err(|e| HostError::ContextCreation(format!("no usable GL config: {e}")))?;

    let window = window.ok_or_else(|| {
        HostError::ContextCreation("display builder did not create a window".to_string())
    })?;

    let raw_window_handle = window.window_handle().ok().map(|h| h.as_raw());
    let display = gl_config.display();

    let profile = match config.profile {
        GlProfile::Core => GlutinProfile::Core,
        GlProfile::Compatibility => GlutinProfile::Compatibility,
    };
    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(config.major, config.minor))))
        .with_profile(profile)
        .build(raw_window_handle);

    // SAFETY: the raw window handle comes from `window`, which outlives the context.
    let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }.map_err(|e| {
        HostError::ContextCreation(format!(
            "OpenGL {}.{} {:?} unavailable: {e}",
            config.major, config.minor, config.profile
        ))
    })?;

    let surface_attrs = window
        .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
        .map_err(|e| HostError::ContextCreation(format!("window handle unavailable: {e}")))?;

    // SAFETY: `GlTarget` keeps the window alive for as long as the surface exists.
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
        .map_err(|e| HostError::ContextCreation(format!("failed to create window surface: {e}")))?;

    log::debug!(
        "GL config: {} samples, alpha {}",
        gl_config.num_samples(),
        gl_config.alpha_size()
    );

    Ok((
        GlTarget {
            surface,
            window,
            exposed: false,
        },
        GlutinContext {
            context: Some(not_current.treat_as_possibly_current()),
            vsync: config.vsync,
            swap_interval_applied: false,
        },
    ))
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // `DisplayBuilder::build` returns an error when the display matches no
    // config and only calls the picker with a non-empty list, so the picker
    // has no way to report an empty one.
    most_samples(configs, |cfg| cfg.num_samples()).expect("glutin offered no GL configs")
}

/// Candidate with the highest sample count; the first one wins ties.
fn most_samples<T>(candidates: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    candidates.reduce(|best, cfg| {
        if samples(&cfg) > samples(&best) {
            cfg
        } else {
            best
        }
    })
}
