use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{HostKey, MouseButton, PointerEvent};

/// Translates a winit `WindowEvent` into a `PointerEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_pointer(window: &Window, event: &WindowEvent) -> Option<PointerEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(window, *position);
            Some(PointerEvent::Move { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            Some(match state {
                ElementState::Pressed => PointerEvent::Press(button),
                ElementState::Released => PointerEvent::Release(button),
            })
        }

        _ => None,
    }
}

/// Maps key presses to host actions. Repeats and releases are ignored.
pub(crate) fn translate_key(event: &WindowEvent) -> Option<HostKey> {
    let WindowEvent::KeyboardInput {
        event:
            KeyEvent {
                physical_key: PhysicalKey::Code(code),
                state: ElementState::Pressed,
                repeat: false,
                ..
            },
        ..
    } = event
    else {
        return None;
    };

    match code {
        KeyCode::KeyR => Some(HostKey::Reset),
        KeyCode::Space => Some(HostKey::ToggleAnimation),
        KeyCode::Escape => Some(HostKey::Close),
        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x, logical.y)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
