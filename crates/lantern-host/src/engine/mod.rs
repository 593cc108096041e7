//! External rendering engine.
//!
//! The engine is consumed only through the ordered call protocol described by
//! [`RenderEngine`]:
//! `load_gl_symbol → init_gl → init_scene → [print_gl_info] → (resize_window | display_loop | handle_mouse)* → quit`.
//!
//! [`DynamicEngine`] resolves that protocol from a shared library at startup.

mod library;
mod naming;
mod protocol;

pub use library::DynamicEngine;
pub use naming::{library_file_name, resolve_library};
pub use protocol::{DisplaySignature, RenderEngine};
