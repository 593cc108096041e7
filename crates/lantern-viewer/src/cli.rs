use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewerConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "lantern")]
#[command(about = "Hosts an OpenGL rendering engine in a window", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Engine library to load, overriding the configured name and directory
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Render continuously instead of on demand
    #[arg(long)]
    pub animate: bool,

    /// Requested OpenGL version, e.g. 3.3
    #[arg(long, value_name = "MAJOR.MINOR", value_parser = parse_gl_version)]
    pub gl_version: Option<(u8, u8)>,

    /// Log filter in env_logger syntax
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    /// Command-line flags win over the file.
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(library) = &self.library {
            config.engine.library = Some(library.clone());
        }
        if self.animate {
            config.render.animate = true;
        }
        if let Some((major, minor)) = self.gl_version {
            config.surface.major = major;
            config.surface.minor = minor;
        }
        if let Some(filter) = &self.log {
            config.logging.filter = Some(filter.clone());
        }
    }
}

fn parse_gl_version(s: &str) -> Result<(u8, u8), String> {
    let (major, minor) = s
        .split_once('.')
        .ok_or_else(|| format!("expected MAJOR.MINOR, got `{s}`"))?;
    let major = major
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("bad major version `{major}`: {e}"))?;
    let minor = minor
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("bad minor version `{minor}`: {e}"))?;
    if major == 0 {
        return Err("major version must be at least 1".to_string());
    }
    Ok((major, minor))
}
