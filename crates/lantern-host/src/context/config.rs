/// Rendering API requested from the platform.
///
/// The hosted engine issues raw OpenGL calls, so this is fixed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RenderableApi {
    #[default]
    OpenGl,
}

/// OpenGL profile kind.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GlProfile {
    #[default]
    Core,
    Compatibility,
}

/// Surface/context parameters.
///
/// Set once at startup and immutable once the context exists. Add fields only
/// when a concrete driver or platform requirement exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub api: RenderableApi,

    /// Requested context version; the engine targets GL 4.1 core by default,
    /// the newest version macOS exposes.
    pub major: u8,
    pub minor: u8,

    pub profile: GlProfile,

    /// Synchronize buffer swaps with the display refresh.
    ///
    /// This value is a hint; support depends on platform/driver.
    pub vsync: bool,
}

impl SurfaceConfig {
    /// Returns a copy requesting a different context version.
    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            api: RenderableApi::OpenGl,
            major: 4,
            minor: 1,
            profile: GlProfile::Core,
            vsync: true,
        }
    }
}
