//! Graphics context management.
//!
//! This module is responsible for:
//! - describing the requested GL surface/profile (`SurfaceConfig`)
//! - owning the native context and its binding to a drawable surface
//! - presenting frames and releasing native resources exactly once

mod config;
mod gl;
mod manager;

pub use config::{GlProfile, RenderableApi, SurfaceConfig};
pub use gl::{GlTarget, GlutinContext};
pub use manager::{ContextManager, GraphicsContext, HostSurface};

pub(crate) use gl::open_window;
