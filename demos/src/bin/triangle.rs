//! Draws a rotating triangle from shaders loaded off disk.
//!
//! Usage: `triangle [SHADER_DIR]`. The directory must contain
//! `triangle.vert` and `triangle.frag` and defaults to the demo's bundled
//! shaders. Space pauses the rotation, Escape quits.

use std::path::PathBuf;

use gl_lab::glow::{self, HasContext};
use gl_lab::{
    Action, Application, FrameInfo, GlProgram, Key, Lab, exit_on_error, logging::init_tracing,
};
use tracing::{error, info};

const DEFAULT_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

struct Triangle {
    program: GlProgram,
    vertex_array: Option<glow::VertexArray>,
    angle_location: Option<glow::UniformLocation>,
    angle: f32,
    paused: bool,
    viewport: Option<(u32, u32)>,
}

impl Triangle {
    fn new(program: GlProgram, size: (u32, u32)) -> Self {
        Self {
            program,
            vertex_array: None,
            angle_location: None,
            angle: 0.0,
            paused: false,
            viewport: Some(size),
        }
    }
}

impl Application for Triangle {
    fn start(&mut self, gl: &glow::Context) {
        unsafe {
            // Core profile draws need a bound vertex array even without
            // vertex attributes.
            match gl.create_vertex_array() {
                Ok(vao) => self.vertex_array = Some(vao),
                Err(e) => error!("Cannot create vertex array: {e}"),
            }
            self.angle_location = gl.get_uniform_location(self.program, "u_angle");
        }
    }

    fn render(&mut self, gl: &glow::Context, frame: &FrameInfo) {
        if !self.paused {
            self.angle += frame.delta.as_secs_f32();
        }

        unsafe {
            if let Some((width, height)) = self.viewport.take() {
                gl.viewport(0, 0, width as i32, height as i32);
            }
            gl.clear_color(0.05, 0.05, 0.08, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            let Some(vao) = self.vertex_array else {
                return;
            };
            gl.use_program(Some(self.program));
            gl.uniform_1_f32(self.angle_location.as_ref(), self.angle);
            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(glow::TRIANGLES, 0, 3);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
    }

    fn finish(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(vao) = self.vertex_array.take() {
                gl.delete_vertex_array(vao);
            }
            gl.delete_program(self.program);
        }
    }

    fn on_key(&mut self, key: Key, action: Action) {
        if key == Key::Space && action == Action::Press {
            self.paused = !self.paused;
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }
}

fn main() {
    init_tracing();

    let shader_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHADER_DIR));
    info!(dir = %shader_dir.display(), "Loading shaders");

    let mut lab = exit_on_error(Lab::new(800, 600, "gl-lab triangle"));
    let program = exit_on_error(lab.load_program(&[
        shader_dir.join("triangle.vert"),
        shader_dir.join("triangle.frag"),
    ]));

    let mut app = Triangle::new(program, lab.inner_size());
    let frames = exit_on_error(lab.run(&mut app));
    info!(frames, "Done");
}
