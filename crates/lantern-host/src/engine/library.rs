use std::path::Path;

use libloading::{Library, Symbol};

use crate::error::{HostError, HostResult};
use crate::input::CameraDelta;
use crate::viewport::ViewportSize;

use super::{DisplaySignature, RenderEngine};

type VoidFn = unsafe extern "C" fn();
type SizeFn = unsafe extern "C" fn(f64, f64, f64);
type DisplayFn = unsafe extern "C" fn(f64);
type DisplayTargetFn = unsafe extern "C" fn(f64, u32);
type MouseFn = unsafe extern "C" fn(f32, f32, f32);
type ResetFn = unsafe extern "C" fn(u32);

#[derive(Copy, Clone)]
enum DisplayEntry {
    Default(DisplayFn),
    Targeted(DisplayTargetFn),
}

/// Engine resolved from a shared library by symbol name.
///
/// All entry points are looked up once in [`DynamicEngine::load`]; calls go
/// through the cached function pointers.
pub struct DynamicEngine {
    load_gl_symbol: VoidFn,
    init_gl: SizeFn,
    init_scene: SizeFn,
    resize_window: SizeFn,
    display_loop: DisplayEntry,

    print_gl_info: Option<VoidFn>,
    handle_mouse: Option<MouseFn>,
    reset: Option<ResetFn>,
    quit: Option<VoidFn>,

    /// Keeps the function pointers above valid.
    _library: Library,
}

impl DynamicEngine {
    /// Opens the engine module at `path` and resolves its entry points.
    ///
    /// `load_gl_symbol`, `init_gl`, `init_scene`, `resize_window` and
    /// `display_loop` are required; the rest are optional.
    pub fn load(path: &Path, display: DisplaySignature) -> HostResult<Self> {
        // SAFETY: loading runs the module's initializers; the engine module is
        // trusted configuration.
        let library = unsafe { Library::new(path) }.map_err(|source| HostError::LibraryLoad {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: the signatures below are the engine's exported C ABI.
        let engine = unsafe {
            DynamicEngine {
                load_gl_symbol: required(&library, "load_gl_symbol")?,
                init_gl: required(&library, "init_gl")?,
                init_scene: required(&library, "init_scene")?,
                resize_window: required(&library, "resize_window")?,
                display_loop: match display {
                    DisplaySignature::Elapsed => {
                        DisplayEntry::Default(required(&library, "display_loop")?)
                    }
                    DisplaySignature::ElapsedFramebuffer => {
                        DisplayEntry::Targeted(required(&library, "display_loop")?)
                    }
                },
                print_gl_info: optional(&library, "print_gl_info"),
                handle_mouse: optional(&library, "handle_mouse"),
                reset: optional(&library, "reset"),
                quit: optional(&library, "quit"),
                _library: library,
            }
        };

        log::info!("engine loaded from {}", path.display());
        Ok(engine)
    }
}

/// Copies a required entry point out of `library`.
///
/// # Safety
/// `T` must match the exported symbol's real signature.
unsafe fn required<T: Copy>(library: &Library, name: &'static str) -> HostResult<T> {
    let symbol: Symbol<'_, T> = unsafe { library.get(name.as_bytes()) }
        .map_err(|source| HostError::MissingSymbol { name, source })?;
    Ok(*symbol)
}

/// Like [`required`], but a missing symbol yields `None`.
///
/// # Safety
/// `T` must match the exported symbol's real signature.
unsafe fn optional<T: Copy>(library: &Library, name: &'static str) -> Option<T> {
    match unsafe { library.get::<T>(name.as_bytes()) } {
        Ok(symbol) => Some(*symbol),
        Err(_) => {
            log::debug!("engine does not export optional `{name}`");
            None
        }
    }
}

// SAFETY (all calls below): the pointers were resolved from `_library`, which
// is alive for as long as `self`, and the host serializes every call.
impl RenderEngine for DynamicEngine {
    fn load_gl_symbol(&mut self) -> HostResult<()> {
        unsafe { (self.load_gl_symbol)() };
        Ok(())
    }

    fn init_gl(&mut self, vp: ViewportSize) -> HostResult<()> {
        unsafe { (self.init_gl)(vp.width, vp.height, vp.device_pixel_ratio) };
        Ok(())
    }

    fn init_scene(&mut self, vp: ViewportSize) -> HostResult<()> {
        unsafe { (self.init_scene)(vp.width, vp.height, vp.device_pixel_ratio) };
        Ok(())
    }

    fn print_gl_info(&mut self) -> HostResult<()> {
        if let Some(f) = self.print_gl_info {
            unsafe { f() };
        }
        Ok(())
    }

    fn resize_window(&mut self, vp: ViewportSize) -> HostResult<()> {
        unsafe { (self.resize_window)(vp.width, vp.height, vp.device_pixel_ratio) };
        Ok(())
    }

    fn display_loop(&mut self, elapsed_seconds: f64, framebuffer: Option<u32>) -> HostResult<()> {
        match self.display_loop {
            DisplayEntry::Default(f) => unsafe { f(elapsed_seconds) },
            DisplayEntry::Targeted(f) => unsafe { f(elapsed_seconds, framebuffer.unwrap_or(0)) },
        }
        Ok(())
    }

    fn handle_mouse(&mut self, d: CameraDelta) -> HostResult<()> {
        if let Some(f) = self.handle_mouse {
            unsafe { f(d.dx, d.dy, d.sensitivity) };
        }
        Ok(())
    }

    fn reset(&mut self, framebuffer: Option<u32>) -> HostResult<()> {
        if let Some(f) = self.reset {
            unsafe { f(framebuffer.unwrap_or(0)) };
        }
        Ok(())
    }

    fn quit(&mut self) -> HostResult<()> {
        if let Some(f) = self.quit {
            unsafe { f() };
        }
        Ok(())
    }
}
