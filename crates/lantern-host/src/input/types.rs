/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// The button that drives the camera.
    pub const PRIMARY: MouseButton = MouseButton::Left;

    #[inline]
    pub fn is_primary(self) -> bool {
        self == Self::PRIMARY
    }
}

/// Pointer notification delivered by the host.
///
/// Coordinates are surface-local logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Press(MouseButton),
    Release(MouseButton),
    Move { x: f64, y: f64 },
}

/// Keys the runtime binds to host actions.
///
/// Everything else is ignored by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HostKey {
    /// Clear accumulated engine state.
    Reset,
    /// Toggle continuous rendering.
    ToggleAnimation,
    /// Close the window.
    Close,
}
