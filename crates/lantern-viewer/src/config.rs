use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use winit::dpi::LogicalSize;

use lantern_host::context::{GlProfile, SurfaceConfig};
use lantern_host::engine::resolve_library;
use lantern_host::host::HostConfig;
use lantern_host::input::DEFAULT_SENSITIVITY;
use lantern_host::window::RuntimeConfig;

/// Viewer configuration file. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub window: WindowSection,
    pub surface: SurfaceSection,
    pub engine: EngineSection,
    pub input: InputSection,
    pub render: RenderSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "lantern".to_string(),
            width: 640.0,
            height: 480.0,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSetting {
    #[default]
    Core,
    Compatibility,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceSection {
    pub major: u8,
    pub minor: u8,
    pub profile: ProfileSetting,
    pub vsync: bool,
}

impl Default for SurfaceSection {
    fn default() -> Self {
        let defaults = SurfaceConfig::default();
        Self {
            major: defaults.major,
            minor: defaults.minor,
            profile: ProfileSetting::Core,
            vsync: defaults.vsync,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Explicit library path; wins over `name` + `search_dir`.
    pub library: Option<PathBuf>,
    pub name: String,
    pub search_dir: PathBuf,

    /// Framebuffer handed to `display_loop`; absent for the default framebuffer.
    pub framebuffer: Option<u32>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            library: None,
            name: "engine".to_string(),
            search_dir: PathBuf::from("target/debug"),
            framebuffer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    pub sensitivity: f32,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub animate: bool,
    pub diagnostics: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            animate: false,
            diagnostics: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Engine library to load.
    pub fn library_path(&self) -> PathBuf {
        match &self.engine.library {
            Some(path) => path.clone(),
            None => resolve_library(&self.engine.search_dir, &self.engine.name),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let profile = match self.surface.profile {
            ProfileSetting::Core => GlProfile::Core,
            ProfileSetting::Compatibility => GlProfile::Compatibility,
        };

        RuntimeConfig {
            title: self.window.title.clone(),
            initial_size: LogicalSize::new(self.window.width, self.window.height),
            surface: SurfaceConfig {
                profile,
                vsync: self.surface.vsync,
                ..SurfaceConfig::default().with_version(self.surface.major, self.surface.minor)
            },
            host: HostConfig {
                pointer_sensitivity: self.input.sensitivity,
                animate: self.render.animate,
                framebuffer: self.engine.framebuffer,
                diagnostics: self.render.diagnostics,
            },
        }
    }
}
