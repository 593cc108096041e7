//! Engine hosting.
//!
//! `SurfaceHost` composes the context manager, the frame scheduler and the
//! input translator. The embedding event loop wires its notifications to the
//! `on_*` methods and honours the returned [`Schedule`](crate::scheduler::Schedule).

mod config;
mod surface_host;

pub use config::HostConfig;
pub use surface_host::SurfaceHost;
