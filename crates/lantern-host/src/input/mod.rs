//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into
//! `PointerEvent`s; `InputTranslator` turns them into camera deltas.

pub(crate) mod platform;
mod state;
mod translator;
mod types;

pub use state::PointerState;
pub use translator::{CameraDelta, InputTranslator, DEFAULT_SENSITIVITY};
pub use types::{HostKey, MouseButton, PointerEvent};
