use crate::error::HostResult;
use crate::input::CameraDelta;
use crate::viewport::ViewportSize;

/// Shape of the engine's per-frame draw entry point.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DisplaySignature {
    /// `display_loop(elapsed)`: draws into the default framebuffer.
    #[default]
    Elapsed,
    /// `display_loop(elapsed, framebuffer)`: draws into a host-chosen framebuffer.
    ElapsedFramebuffer,
}

impl DisplaySignature {
    /// Picks the signature matching a configured framebuffer target.
    pub fn for_target(framebuffer: Option<u32>) -> Self {
        match framebuffer {
            Some(_) => DisplaySignature::ElapsedFramebuffer,
            None => DisplaySignature::Elapsed,
        }
    }
}

/// Ordered call protocol of the external rendering engine.
///
/// Callers must respect the ordering: `load_gl_symbol` exactly once with a
/// current context, then `init_gl` and `init_scene` once, before any other
/// call. Draw and resize never overlap. Implementations need not re-check it.
pub trait RenderEngine {
    /// Resolves graphics API entry points from the current context.
    fn load_gl_symbol(&mut self) -> HostResult<()>;

    /// One-time graphics backend setup.
    fn init_gl(&mut self, viewport: ViewportSize) -> HostResult<()>;

    /// One-time scene/resource setup.
    fn init_scene(&mut self, viewport: ViewportSize) -> HostResult<()>;

    /// Diagnostics only; engines without it succeed silently.
    fn print_gl_info(&mut self) -> HostResult<()> {
        Ok(())
    }

    /// Must precede the first draw after a geometry change.
    fn resize_window(&mut self, viewport: ViewportSize) -> HostResult<()>;

    /// Draws exactly one frame into the bound (or given) framebuffer.
    fn display_loop(&mut self, elapsed_seconds: f64, framebuffer: Option<u32>) -> HostResult<()>;

    /// Applies one camera delta.
    fn handle_mouse(&mut self, delta: CameraDelta) -> HostResult<()>;

    /// Clears accumulated frame state.
    fn reset(&mut self, framebuffer: Option<u32>) -> HostResult<()> {
        let _ = framebuffer;
        Ok(())
    }

    /// Releases engine resources. No call may follow.
    fn quit(&mut self) -> HostResult<()> {
        Ok(())
    }
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn load_gl_symbol(&mut self) -> HostResult<()> {
        (**self).load_gl_symbol()
    }

    fn init_gl(&mut self, viewport: ViewportSize) -> HostResult<()> {
        (**self).init_gl(viewport)
    }

    fn init_scene(&mut self, viewport: ViewportSize) -> HostResult<()> {
        (**self).init_scene(viewport)
    }

    fn print_gl_info(&mut self) -> HostResult<()> {
        (**self).print_gl_info()
    }

    fn resize_window(&mut self, viewport: ViewportSize) -> HostResult<()> {
        (**self).resize_window(viewport)
    }

    fn display_loop(&mut self, elapsed_seconds: f64, framebuffer: Option<u32>) -> HostResult<()> {
        (**self).display_loop(elapsed_seconds, framebuffer)
    }

    fn handle_mouse(&mut self, delta: CameraDelta) -> HostResult<()> {
        (**self).handle_mouse(delta)
    }

    fn reset(&mut self, framebuffer: Option<u32>) -> HostResult<()> {
        (**self).reset(framebuffer)
    }

    fn quit(&mut self) -> HostResult<()> {
        (**self).quit()
    }
}
