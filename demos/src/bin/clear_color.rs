//! Clears the window with a color steered by the mouse.
//!
//! Moving the cursor picks red and green, Space toggles a slow pulse on
//! blue, R restores the configured color. Escape quits.

use gl_lab::glow::{self, HasContext};
use gl_lab::{Action, Application, FrameInfo, Key, Lab, LabConfig, exit_on_error};
use tracing::info;

struct ClearColor {
    base: [f32; 4],
    color: [f32; 4],
    size: (u32, u32),
    viewport_dirty: bool,
    pulse: bool,
    elapsed: f32,
}

impl ClearColor {
    fn new(base: [f32; 4], size: (u32, u32)) -> Self {
        Self {
            base,
            color: base,
            size,
            viewport_dirty: true,
            pulse: false,
            elapsed: 0.0,
        }
    }
}

impl Application for ClearColor {
    fn start(&mut self, _gl: &glow::Context) {
        info!("Move the mouse to change the color, Space to pulse, R to reset");
    }

    fn render(&mut self, gl: &glow::Context, frame: &FrameInfo) {
        if self.pulse {
            self.elapsed += frame.delta.as_secs_f32();
            self.color[2] = 0.5 + 0.5 * self.elapsed.sin();
        }

        unsafe {
            if self.viewport_dirty {
                gl.viewport(0, 0, self.size.0 as i32, self.size.1 as i32);
                self.viewport_dirty = false;
            }
            let [r, g, b, a] = self.color;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn finish(&mut self, _gl: &glow::Context) {
        info!(color = ?self.color, "Final clear color");
    }

    fn on_key(&mut self, key: Key, action: Action) {
        if action != Action::Press {
            return;
        }
        match key {
            Key::Space => self.pulse = !self.pulse,
            Key::R => {
                self.color = self.base;
                self.pulse = false;
                self.elapsed = 0.0;
            }
            _ => {}
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.viewport_dirty = true;
    }

    fn on_mouse_move(&mut self, x: i32, y: i32) {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return;
        }
        self.color[0] = (x as f32 / width as f32).clamp(0.0, 1.0);
        self.color[1] = (y as f32 / height as f32).clamp(0.0, 1.0);
    }
}

fn main() {
    gl_lab::logging::init_tracing();

    let config =
        LabConfig::new(800, 600, "gl-lab clear color").with_clear_color([0.2, 0.3, 0.3, 1.0]);
    let mut lab = exit_on_error(Lab::with_config(config));

    let mut app = ClearColor::new(lab.config().clear_color, lab.inner_size());
    let frames = exit_on_error(lab.run(&mut app));
    info!(frames, "Done");
}
