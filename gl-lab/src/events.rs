//! Input events collected from the event pump and dispatched to hooks

use winit::event::{ElementState, WindowEvent};

use crate::Application;
use crate::input::{
    Action, Key, MouseButton, action_from_winit, key_from_winit, mouse_button_from_winit,
};

/// An input event addressed to the application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, action: Action },
    Resize { width: u32, height: u32 },
    MouseButton { button: MouseButton, action: Action },
    MouseMove { x: i32, y: i32 },
}

impl InputEvent {
    /// Translate a winit window event, if it is one the lab forwards
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => Some(Self::Key {
                key: key_from_winit(event.physical_key),
                action: action_from_winit(event.state, event.repeat),
            }),
            WindowEvent::Resized(size) => Some(Self::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::MouseInput { state, button, .. } => Some(Self::MouseButton {
                button: mouse_button_from_winit(*button),
                action: action_from_winit(*state, false),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(Self::MouseMove {
                x: position.x as i32,
                y: position.y as i32,
            }),
            _ => None,
        }
    }

    /// Forward the event to the matching hook of `app`
    pub fn dispatch<G, A>(self, app: &mut A)
    where
        A: Application<G> + ?Sized,
    {
        match self {
            Self::Key { key, action } => app.on_key(key, action),
            Self::Resize { width, height } => app.on_resize(width, height),
            Self::MouseButton { button, action } => app.on_mouse_button(button, action),
            Self::MouseMove { x, y } => app.on_mouse_move(x, y),
        }
    }
}

/// Window state the run loop polls after each event pump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    pub escape_held: bool,
    pub close_requested: bool,
}

impl WindowFlags {
    /// Track the state the loop's exit condition depends on
    pub fn observe(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close_requested = true,
            WindowEvent::KeyboardInput { event, .. } => {
                self.observe_key(key_from_winit(event.physical_key), event.state);
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows
                self.escape_held = false;
            }
            _ => {}
        }
    }

    /// Escape is held from its press (auto-repeats included) until its
    /// release; other keys leave the flag alone.
    pub fn observe_key(&mut self, key: Key, state: ElementState) {
        if key == Key::Escape {
            self.escape_held = state == ElementState::Pressed;
        }
    }

    pub fn should_exit(&self) -> bool {
        self.escape_held || self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameInfo;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::DeviceId;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    impl Application<()> for Recorder {
        fn render(&mut self, _gl: &(), _frame: &FrameInfo) {}

        fn on_key(&mut self, key: Key, action: Action) {
            self.seen.push(format!("key {key:?} {action:?}"));
        }

        fn on_resize(&mut self, width: u32, height: u32) {
            self.seen.push(format!("resize {width}x{height}"));
        }

        fn on_mouse_button(&mut self, button: MouseButton, action: Action) {
            self.seen.push(format!("button {button:?} {action:?}"));
        }

        fn on_mouse_move(&mut self, x: i32, y: i32) {
            self.seen.push(format!("move {x},{y}"));
        }
    }

    #[test]
    fn test_dispatch_reaches_matching_hook() {
        let mut app = Recorder::default();
        let events = [
            InputEvent::Key {
                key: Key::W,
                action: Action::Press,
            },
            InputEvent::Resize {
                width: 640,
                height: 480,
            },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                action: Action::Release,
            },
            InputEvent::MouseMove { x: 12, y: -3 },
        ];
        for event in events {
            event.dispatch::<(), _>(&mut app);
        }
        assert_eq!(
            app.seen,
            vec![
                "key W Press",
                "resize 640x480",
                "button Left Release",
                "move 12,-3",
            ]
        );
    }

    #[test]
    fn test_window_event_translation() {
        let resized = WindowEvent::Resized(PhysicalSize::new(800, 600));
        assert_eq!(
            InputEvent::from_window_event(&resized),
            Some(InputEvent::Resize {
                width: 800,
                height: 600
            })
        );

        let moved = WindowEvent::CursorMoved {
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(10.9, 20.2),
        };
        assert_eq!(
            InputEvent::from_window_event(&moved),
            Some(InputEvent::MouseMove { x: 10, y: 20 })
        );

        let clicked = WindowEvent::MouseInput {
            device_id: unsafe { DeviceId::dummy() },
            state: ElementState::Pressed,
            button: winit::event::MouseButton::Right,
        };
        assert_eq!(
            InputEvent::from_window_event(&clicked),
            Some(InputEvent::MouseButton {
                button: MouseButton::Right,
                action: Action::Press
            })
        );

        assert_eq!(InputEvent::from_window_event(&WindowEvent::Focused(true)), None);
    }

    #[test]
    fn test_flags_track_close_and_focus() {
        let mut flags = WindowFlags::default();
        assert!(!flags.should_exit());

        flags.escape_held = true;
        flags.observe(&WindowEvent::Focused(false));
        assert!(!flags.escape_held);

        flags.observe(&WindowEvent::CloseRequested);
        assert!(flags.close_requested);
        assert!(flags.should_exit());
    }

    #[test]
    fn test_escape_held_between_press_and_release() {
        let mut flags = WindowFlags::default();

        flags.observe_key(Key::Escape, ElementState::Pressed);
        assert!(flags.escape_held);
        assert!(flags.should_exit());

        // Auto-repeat arrives as further presses
        flags.observe_key(Key::Escape, ElementState::Pressed);
        assert!(flags.escape_held);

        flags.observe_key(Key::Escape, ElementState::Released);
        assert!(!flags.escape_held);
        assert!(!flags.should_exit());
    }

    #[test]
    fn test_other_keys_leave_escape_alone() {
        let mut flags = WindowFlags::default();
        flags.observe_key(Key::Q, ElementState::Pressed);
        flags.observe_key(Key::Unknown, ElementState::Pressed);
        assert!(!flags.escape_held);

        flags.observe_key(Key::Escape, ElementState::Pressed);
        flags.observe_key(Key::Space, ElementState::Released);
        assert!(flags.escape_held);
    }

    #[test]
    fn test_escape_tapped_within_one_pump_does_not_exit() {
        let mut flags = WindowFlags::default();
        flags.observe_key(Key::Escape, ElementState::Pressed);
        flags.observe_key(Key::Escape, ElementState::Released);
        assert!(!flags.should_exit());
    }
}
