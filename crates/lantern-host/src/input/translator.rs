use super::state::PointerState;
use super::types::PointerEvent;

/// Camera rotation per pixel of pointer travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.001;

/// One camera-control update for the engine's `handle_mouse` entry point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraDelta {
    pub dx: f32,
    pub dy: f32,
    pub sensitivity: f32,
}

/// Converts pointer notifications into relative camera deltas.
///
/// Only the primary button drives the camera. The first move after a press
/// sets the baseline and emits nothing, so a click never causes a jump.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    state: PointerState,
    sensitivity: f32,
}

impl InputTranslator {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            state: PointerState::default(),
            sensitivity,
        }
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Applies one pointer notification; returns a delta to forward, if any.
    pub fn apply(&mut self, event: PointerEvent) -> Option<CameraDelta> {
        match event {
            PointerEvent::Press(button) if button.is_primary() => {
                self.state.press();
                None
            }
            PointerEvent::Release(button) if button.is_primary() => {
                self.state.release();
                None
            }
            PointerEvent::Press(_) | PointerEvent::Release(_) => None,

            PointerEvent::Move { x, y } => {
                let (dx, dy) = self.state.advance(x, y)?;
                log::trace!("camera delta ({dx}, {dy})");
                Some(CameraDelta {
                    dx: dx as f32,
                    dy: dy as f32,
                    sensitivity: self.sensitivity,
                })
            }
        }
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY)
    }
}
