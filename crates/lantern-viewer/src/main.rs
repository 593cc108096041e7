mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;

use lantern_host::engine::{DisplaySignature, DynamicEngine};
use lantern_host::logging::{init_logging, LoggingConfig};
use lantern_host::window::Runtime;

use cli::Cli;
use config::ViewerConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    cli.apply(&mut config);

    init_logging(LoggingConfig {
        env_filter: config.logging.filter.clone(),
        ..LoggingConfig::default()
    });

    let library = config.library_path();
    let signature = DisplaySignature::for_target(config.engine.framebuffer);
    let engine = DynamicEngine::load(&library, signature)
        .with_context(|| format!("cannot start engine from {}", library.display()))?;

    let runtime = config.runtime_config();
    log::info!(
        "opening `{}` with OpenGL {}.{} ({:?})",
        runtime.title,
        runtime.surface.major,
        runtime.surface.minor,
        runtime.surface.profile
    );

    Runtime::run(runtime, engine)
}
