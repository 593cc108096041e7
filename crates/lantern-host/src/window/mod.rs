//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, creates the GL context through
//! `glutin`, and forwards window events to the engine host.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
