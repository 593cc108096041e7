//! Recording test doubles for the engine protocol and the graphics context.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::context::{GraphicsContext, HostSurface};
use crate::engine::RenderEngine;
use crate::error::{HostError, HostResult};
use crate::input::CameraDelta;
use crate::viewport::ViewportSize;

/// One recorded call, engine or context.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MakeCurrent,
    ResizeSurface(u32, u32),
    Swap,
    Release,

    LoadGlSymbol,
    InitGl(ViewportSize),
    InitScene(ViewportSize),
    PrintGlInfo,
    ResizeWindow(ViewportSize),
    DisplayLoop(Option<u32>),
    HandleMouse(CameraDelta),
    Reset(Option<u32>),
    Quit,
}

impl Call {
    fn is_engine(&self) -> bool {
        !matches!(
            self,
            Call::MakeCurrent | Call::ResizeSurface(..) | Call::Swap | Call::Release
        )
    }
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    elapsed: Vec<f64>,
    fail_make_current: bool,
    fail_engine_call: Option<&'static str>,
}

/// Shared, ordered call log.
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Inner>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn engine_calls(&self) -> Vec<Call> {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|c| c.is_engine())
            .cloned()
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn elapsed(&self) -> Vec<f64> {
        self.0.borrow().elapsed.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().calls.clear();
    }

    pub fn fail_make_current(&self, fail: bool) {
        self.0.borrow_mut().fail_make_current = fail;
    }

    /// Makes the named engine entry point fail from now on.
    pub fn fail_engine_call(&self, name: &'static str) {
        self.0.borrow_mut().fail_engine_call = Some(name);
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }

    fn engine(&self, name: &'static str, call: Call) -> HostResult<()> {
        if self.0.borrow().fail_engine_call == Some(name) {
            return Err(HostError::engine_call(name, "injected failure"));
        }
        self.push(call);
        Ok(())
    }
}

pub struct RecordingEngine {
    log: CallLog,
}

impl RecordingEngine {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl RenderEngine for RecordingEngine {
    fn load_gl_symbol(&mut self) -> HostResult<()> {
        self.log.engine("load_gl_symbol", Call::LoadGlSymbol)
    }

    fn init_gl(&mut self, viewport: ViewportSize) -> HostResult<()> {
        self.log.engine("init_gl", Call::InitGl(viewport))
    }

    fn init_scene(&mut self, viewport: ViewportSize) -> HostResult<()> {
        self.log.engine("init_scene", Call::InitScene(viewport))
    }

    fn print_gl_info(&mut self) -> HostResult<()> {
        self.log.engine("print_gl_info", Call::PrintGlInfo)
    }

    fn resize_window(&mut self, viewport: ViewportSize) -> HostResult<()> {
        self.log.engine("resize_window", Call::ResizeWindow(viewport))
    }

    fn display_loop(&mut self, elapsed_seconds: f64, framebuffer: Option<u32>) -> HostResult<()> {
        self.log.engine("display_loop", Call::DisplayLoop(framebuffer))?;
        self.log.0.borrow_mut().elapsed.push(elapsed_seconds);
        Ok(())
    }

    fn handle_mouse(&mut self, delta: CameraDelta) -> HostResult<()> {
        self.log.engine("handle_mouse", Call::HandleMouse(delta))
    }

    fn reset(&mut self, framebuffer: Option<u32>) -> HostResult<()> {
        self.log.engine("reset", Call::Reset(framebuffer))
    }

    fn quit(&mut self) -> HostResult<()> {
        self.log.engine("quit", Call::Quit)
    }
}

pub struct RecordingContext {
    log: CallLog,
}

impl RecordingContext {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl GraphicsContext for RecordingContext {
    type Surface = FakeSurface;

    fn make_current(&mut self, _surface: &FakeSurface) -> HostResult<()> {
        if self.log.0.borrow().fail_make_current {
            return Err(HostError::SurfaceNotReady);
        }
        self.log.push(Call::MakeCurrent);
        Ok(())
    }

    fn resize_surface(&mut self, _surface: &FakeSurface, width: u32, height: u32) {
        self.log.push(Call::ResizeSurface(width, height));
    }

    fn swap_buffers(&mut self, _surface: &FakeSurface) -> HostResult<()> {
        self.log.push(Call::Swap);
        Ok(())
    }

    fn release(&mut self) {
        self.log.push(Call::Release);
    }
}

/// Surface whose visibility and size the test controls.
pub struct FakeSurface {
    exposed: Cell<bool>,
    viewport: Cell<ViewportSize>,
}

impl FakeSurface {
    pub fn exposed(width: f64, height: f64, dpi: f64) -> Self {
        Self {
            exposed: Cell::new(true),
            viewport: Cell::new(ViewportSize::new(width, height, dpi)),
        }
    }

    pub fn set_exposed(&self, exposed: bool) {
        self.exposed.set(exposed);
    }

    pub fn set_size(&self, width: f64, height: f64, dpi: f64) {
        self.viewport.set(ViewportSize::new(width, height, dpi));
    }
}

impl HostSurface for FakeSurface {
    fn is_exposed(&self) -> bool {
        self.exposed.get()
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport.get()
    }
}
