use crate::error::{HostError, HostResult};
use crate::viewport::ViewportSize;

use super::SurfaceConfig;

/// Host-side view of a drawable surface.
pub trait HostSurface {
    /// Whether the surface is currently visible on screen.
    fn is_exposed(&self) -> bool;

    /// Current size, read fresh from the host on every call.
    fn viewport(&self) -> ViewportSize;
}

/// Native graphics context operations.
///
/// Implementations only wrap the platform calls; ordering, idempotent teardown
/// and current-ness tracking live in [`ContextManager`].
pub trait GraphicsContext {
    type Surface: HostSurface;

    /// Binds the context to the calling thread and `surface`.
    fn make_current(&mut self, surface: &Self::Surface) -> HostResult<()>;

    /// Resizes the native drawable to `width` x `height` physical pixels.
    fn resize_surface(&mut self, surface: &Self::Surface, width: u32, height: u32);

    /// Presents the completed frame.
    fn swap_buffers(&mut self, surface: &Self::Surface) -> HostResult<()>;

    /// Releases native resources. Called at most once.
    fn release(&mut self);
}

/// Exclusive owner of the graphics context handle.
///
/// Lifetimes:
/// - created once at startup via [`ContextManager::create`]
/// - bound to one surface at a time via [`ContextManager::make_current`]
/// - released by [`ContextManager::destroy`] (or on drop)
pub struct ContextManager<C: GraphicsContext> {
    config: SurfaceConfig,

    /// `None` once destroyed.
    handle: Option<C>,

    /// Set by a successful `make_current`.
    current: bool,
}

impl<C: GraphicsContext> ContextManager<C> {
    /// Allocates the native context through `factory`.
    ///
    /// The factory also returns the surface it created alongside the context
    /// (the two are usually born together). Fails with
    /// [`HostError::ContextCreation`] when the platform cannot satisfy `config`.
    pub fn create<T, F>(config: SurfaceConfig, factory: F) -> HostResult<(T, Self)>
    where
        F: FnOnce(&SurfaceConfig) -> HostResult<(T, C)>,
    {
        let (surface, handle) = factory(&config).map_err(|err| match err {
            HostError::ContextCreation(msg) => HostError::ContextCreation(msg),
            other => HostError::ContextCreation(other.to_string()),
        })?;

        log::info!(
            "graphics context created ({:?} {}.{} {:?})",
            config.api,
            config.major,
            config.minor,
            config.profile
        );

        Ok((
            surface,
            Self {
                config,
                handle: Some(handle),
                current: false,
            },
        ))
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_none()
    }

    /// Binds the context to `surface`.
    ///
    /// Returns `false` when the surface is not exposed or the platform refuses;
    /// the caller must wait for the next exposure rather than draw.
    pub fn make_current(&mut self, surface: &C::Surface) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };

        if !surface.is_exposed() {
            self.current = false;
            return false;
        }

        match handle.make_current(surface) {
            Ok(()) => {
                self.current = true;
                true
            }
            Err(err) => {
                log::warn!("make_current failed, retrying on next exposure: {err}");
                self.current = false;
                false
            }
        }
    }

    /// Resizes the drawable to match `viewport`. Requires a current context.
    pub fn resize_surface(&mut self, surface: &C::Surface, viewport: ViewportSize) {
        if !self.current {
            return;
        }
        if let Some(handle) = self.handle.as_mut() {
            let (w, h) = viewport.physical();
            handle.resize_surface(surface, w, h);
        }
    }

    /// Presents the frame drawn since the last `make_current`.
    pub fn swap(&mut self, surface: &C::Surface) -> HostResult<()> {
        let handle = self.handle.as_mut().ok_or(HostError::SurfaceNotReady)?;
        if !self.current {
            return Err(HostError::SurfaceNotReady);
        }
        handle.swap_buffers(surface)
    }

    /// Releases the native context. Calling this again is a no-op.
    pub fn destroy(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
            self.current = false;
            log::info!("graphics context destroyed");
        }
    }
}

impl<C: GraphicsContext> Drop for ContextManager<C> {
    fn drop(&mut self) {
        self.destroy();
    }
}
