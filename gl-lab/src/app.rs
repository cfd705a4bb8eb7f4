//! Hooks implemented by a lab application

use std::time::Duration;

use crate::input::{Action, Key, MouseButton};

/// Per-frame timing handed to [`Application::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Zero-based index of the frame
    pub index: u64,
    /// Time since the previous frame began (zero for the first frame)
    pub delta: Duration,
}

/// A lab application driven by [`Lab::run`](crate::Lab::run).
///
/// `G` is the GL handle handed to the lifecycle hooks; it defaults to the
/// glow context owned by the lab window. Every hook except `render` is a
/// no-op by default.
///
/// Call order: `start` once, then `render` once per frame with input hooks
/// in between frames, then `finish` once.
pub trait Application<G = glow::Context> {
    fn start(&mut self, _gl: &G) {}

    fn render(&mut self, gl: &G, frame: &FrameInfo);

    fn finish(&mut self, _gl: &G) {}

    fn on_key(&mut self, _key: Key, _action: Action) {}

    /// Window size in physical pixels
    fn on_resize(&mut self, _width: u32, _height: u32) {}

    fn on_mouse_button(&mut self, _button: MouseButton, _action: Action) {}

    /// Cursor position in physical pixels relative to the top-left corner
    fn on_mouse_move(&mut self, _x: i32, _y: i32) {}
}
