//! The lab shell: window bootstrap plus the blocking run loop

use std::path::Path;

use tracing::{debug, info};
use winit::window::Window;

use crate::run_loop::{self, Surface};
use crate::window::GlWindow;
use crate::{
    AppInfo, Application, GlProgram, GlShader, GlVersion, GlslVersion, LabConfig, LabError,
    LabResult, RendererInfo, ShaderLoader, ShaderResult, ShaderStage,
};

/// An OpenGL window ready to run an [`Application`].
///
/// Construction either yields a window with a current context of at least
/// the requested version, or an error; there is no partially initialized
/// state. Dropping the lab destroys the context and the window.
pub struct Lab {
    info: AppInfo,
    config: LabConfig,
    renderer: RendererInfo,
    gl_version: GlVersion,
    window: GlWindow,
}

impl Lab {
    /// Open a `width` x `height` window titled `title` with an OpenGL 4.6
    /// core context.
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> LabResult<Self> {
        Self::with_config(LabConfig::new(width, height, title))
    }

    pub fn with_config(config: LabConfig) -> LabResult<Self> {
        let info = config.app_info();
        let window = GlWindow::new(&config)?;

        let gl_version = GlVersion::read(window.gl());
        if !gl_version.supports(info.major_version.into(), info.minor_version.into()) {
            return Err(LabError::UnsupportedVersion {
                requested: format!("{}.{}", info.major_version, info.minor_version),
                actual: gl_version.to_string(),
            });
        }

        let renderer = RendererInfo::read(window.gl());
        info!(
            "Initialize successful: OpenGL {}, GLSL {}",
            renderer.version, renderer.shading_language_version
        );
        debug!(vendor = %renderer.vendor, renderer = %renderer.renderer, "GL driver");

        Ok(Self {
            info,
            config,
            renderer,
            gl_version,
            window,
        })
    }

    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Version, GLSL version, vendor and renderer strings of the context
    pub fn renderer_info(&self) -> &RendererInfo {
        &self.renderer
    }

    pub fn gl_version(&self) -> GlVersion {
        self.gl_version
    }

    pub fn gl(&self) -> &glow::Context {
        self.window.gl()
    }

    pub fn window(&self) -> &Window {
        self.window.window()
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Current inner size in physical pixels
    pub fn inner_size(&self) -> (u32, u32) {
        self.window.inner_size()
    }

    /// A loader bounded by the configured source size that prepends the
    /// context's GLSL `#version` to sources lacking one
    pub fn shader_loader(&self) -> ShaderLoader {
        ShaderLoader::new(self.config.max_shader_source_len)
            .with_version_directive(GlslVersion::for_gl_version(self.gl_version))
    }

    pub fn load_shader(
        &self,
        path: impl AsRef<Path>,
        stage: ShaderStage,
    ) -> ShaderResult<GlShader> {
        self.shader_loader().load(self.gl(), path, stage)
    }

    /// Load the shaders at `paths` (stages from file extensions) and link
    /// them into a program
    pub fn load_program<P: AsRef<Path>>(&self, paths: &[P]) -> ShaderResult<GlProgram> {
        self.shader_loader().load_program(self.gl(), paths)
    }

    /// Run `app` until Escape is held or the window is closed.
    ///
    /// Calls `start` once, then per frame `render`, a buffer swap and an
    /// event poll that feeds the input hooks, then `finish` once. Returns
    /// the number of rendered frames.
    pub fn run<A>(&mut self, app: &mut A) -> LabResult<u64>
    where
        A: Application + ?Sized,
    {
        run_loop::drive(&mut self.window, app)
    }
}
