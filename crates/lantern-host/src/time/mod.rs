//! Time subsystem.
//!
//! Provides the monotonic elapsed time handed to the engine's draw call.
//! Intended usage: one `FrameClock` per surface, `tick()` once per drawn frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
