//! Input types delivered to application hooks, and their mapping from winit
//!
//! Keys are translated from the physical key code so that bindings follow
//! key positions (the US layout names) rather than the active layout.

use winit::event::{ElementState, MouseButton as WinitMouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Minus,
    Equal,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    /// A key without a name in this enum
    Unknown,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// State transition of a key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Press,
    Release,
    /// Key held long enough for the OS to auto-repeat it
    Repeat,
}

/// Convert a winit physical key to a lab key
pub fn key_from_winit(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Unknown;
    };
    match code {
        // Letters (A-Z)
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        // Numbers (0-9)
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,

        // Whitespace and editing
        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Minus => Key::Minus,
        KeyCode::Equal => Key::Equal,

        // Navigation
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,

        // Function keys
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        // Modifiers
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::ControlRight => Key::RightControl,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::AltRight => Key::RightAlt,

        _ => Key::Unknown,
    }
}

/// Convert a winit mouse button to a lab mouse button
pub fn mouse_button_from_winit(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Convert a winit element state (plus the key-repeat flag) to an action
pub fn action_from_winit(state: ElementState, repeat: bool) -> Action {
    match (state, repeat) {
        (ElementState::Released, _) => Action::Release,
        (ElementState::Pressed, true) => Action::Repeat,
        (ElementState::Pressed, false) => Action::Press,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(
            mouse_button_from_winit(WinitMouseButton::Left),
            MouseButton::Left
        );
        assert_eq!(
            mouse_button_from_winit(WinitMouseButton::Right),
            MouseButton::Right
        );
        assert_eq!(
            mouse_button_from_winit(WinitMouseButton::Middle),
            MouseButton::Middle
        );
        assert_eq!(
            mouse_button_from_winit(WinitMouseButton::Other(10)),
            MouseButton::Other(10)
        );
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_winit(PhysicalKey::Code(KeyCode::KeyA)), Key::A);
        assert_eq!(key_from_winit(PhysicalKey::Code(KeyCode::Digit1)), Key::Num1);
        assert_eq!(
            key_from_winit(PhysicalKey::Code(KeyCode::Escape)),
            Key::Escape
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(KeyCode::NumpadEnter)),
            Key::Enter
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(KeyCode::ShiftRight)),
            Key::RightShift
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(KeyCode::MediaPlayPause)),
            Key::Unknown
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Unknown
        );
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            action_from_winit(ElementState::Pressed, false),
            Action::Press
        );
        assert_eq!(
            action_from_winit(ElementState::Pressed, true),
            Action::Repeat
        );
        assert_eq!(
            action_from_winit(ElementState::Released, false),
            Action::Release
        );
        assert_eq!(
            action_from_winit(ElementState::Released, true),
            Action::Release
        );
    }
}
