//! Lantern host crate.
//!
//! Hosts an externally supplied OpenGL rendering engine inside a window:
//! owns the graphics context, schedules frames, and turns pointer input into
//! camera deltas. The engine itself is reached only through [`engine::RenderEngine`].

pub mod context;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod scheduler;
pub mod time;
pub mod viewport;
pub mod window;

pub mod logging;

#[cfg(test)]
mod testing;

pub use error::{HostError, HostResult};
