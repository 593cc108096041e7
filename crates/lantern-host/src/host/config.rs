use crate::input::DEFAULT_SENSITIVITY;

/// Behaviour knobs for [`SurfaceHost`](super::SurfaceHost).
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Forwarded to the engine with every camera delta.
    pub pointer_sensitivity: f32,

    /// Start in continuous-render mode.
    pub animate: bool,

    /// Framebuffer the engine draws into; `None` uses the default one.
    pub framebuffer: Option<u32>,

    /// Call the engine's diagnostics entry point after initialization.
    pub diagnostics: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            pointer_sensitivity: DEFAULT_SENSITIVITY,
            animate: false,
            framebuffer: None,
            diagnostics: true,
        }
    }
}
