//! gl-lab: a minimal OpenGL laboratory shell
//!
//! Hides the boilerplate around an OpenGL experiment: window and context
//! creation (winit + glutin), GL function loading (glow), a blocking
//! render loop that forwards input to application hooks, and loading
//! shaders from files.
//!
//! # Example
//!
//! ```no_run
//! use gl_lab::{Application, FrameInfo, Lab, exit_on_error};
//! use gl_lab::glow::{self, HasContext};
//!
//! struct Clear;
//!
//! impl Application for Clear {
//!     fn render(&mut self, gl: &glow::Context, _frame: &FrameInfo) {
//!         unsafe {
//!             gl.clear_color(0.1, 0.2, 0.3, 1.0);
//!             gl.clear(glow::COLOR_BUFFER_BIT);
//!         }
//!     }
//! }
//!
//! let mut lab = exit_on_error(Lab::new(800, 600, "clear"));
//! exit_on_error(lab.run(&mut Clear));
//! ```

// Re-export glow to make it easier for users to use the correct version.
pub use glow;
use glow::{Context, HasContext};

mod app;
mod config;
mod error;
mod events;
mod input;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod run_loop;
mod shaders;
mod shell;
mod versions;
mod window;

pub use app::*;
pub use config::*;
pub use error::*;
pub use events::{InputEvent, WindowFlags};
pub use input::*;
pub use run_loop::Surface;
pub use shaders::*;
pub use shell::Lab;
pub use versions::*;
pub use window::GlWindow;

pub type GlShader = <Context as HasContext>::Shader;
pub type GlProgram = <Context as HasContext>::Program;
