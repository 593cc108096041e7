use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while hosting the engine.
///
/// Only [`HostError::SurfaceNotReady`] is transient. Everything else is fatal:
/// the engine protocol has no recovery path once a context or an engine call
/// has failed.
#[derive(Error, Debug)]
pub enum HostError {
    /// The platform could not allocate the requested surface/profile combination.
    #[error("graphics context creation failed: {0}")]
    ContextCreation(String),

    /// The surface is hidden, zero-sized, or refused to become current.
    #[error("surface is not ready for drawing")]
    SurfaceNotReady,

    /// An engine entry point reported a failure.
    ///
    /// The C entry points behind `DynamicEngine` return nothing, so only
    /// in-process `RenderEngine` implementations raise this.
    #[error("engine call `{call}` failed: {reason}")]
    EngineCall { call: &'static str, reason: String },

    /// The engine module could not be opened.
    #[error("failed to load engine library {}", path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A required entry point is not exported by the engine module.
    #[error("engine library does not export `{name}`")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

impl HostError {
    /// Returns true for errors that are absorbed and retried on the next host
    /// opportunity rather than terminating the process.
    pub fn is_transient(&self) -> bool {
        matches!(self, HostError::SurfaceNotReady)
    }

    #[cfg(test)]
    pub(crate) fn engine_call(call: &'static str, reason: impl Into<String>) -> Self {
        HostError::EngineCall {
            call,
            reason: reason.into(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;
