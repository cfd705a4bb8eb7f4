//! Shader loading, compilation and program linking
//!
//! The GL calls go through [`ShaderBackend`], implemented for
//! [`glow::Context`]. Failed objects are deleted before the error is
//! returned, so a handle returned from this module is always valid.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use glow::HasContext;
use tracing::{debug, error};

use crate::config::DEFAULT_MAX_SHADER_SOURCE_LEN;
use crate::{GlslVersion, ShaderError, ShaderResult};

const EMPTY_LOG: &str = "no diagnostic reported by the driver";

/// Programmable pipeline stage of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    /// The GL shader type enum
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
            Self::Geometry => glow::GEOMETRY_SHADER,
            Self::TessControl => glow::TESS_CONTROL_SHADER,
            Self::TessEvaluation => glow::TESS_EVALUATION_SHADER,
            Self::Compute => glow::COMPUTE_SHADER,
        }
    }

    /// Infer the stage from the conventional file extension
    /// (`.vert`, `.frag`, `.geom`, `.tesc`, `.tese`, `.comp`)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vert" => Some(Self::Vertex),
            "frag" => Some(Self::Fragment),
            "geom" => Some(Self::Geometry),
            "tesc" => Some(Self::TessControl),
            "tese" => Some(Self::TessEvaluation),
            "comp" => Some(Self::Compute),
            _ => None,
        }
    }
}

/// The subset of GL used to build shader objects and programs
pub trait ShaderBackend {
    type Shader: Copy;
    type Program: Copy;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
}

impl ShaderBackend for glow::Context {
    type Shader = crate::GlShader;
    type Program = crate::GlProgram;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }
}

/// Reads shader sources from disk and compiles them
#[derive(Debug, Clone)]
pub struct ShaderLoader {
    max_source_len: usize,
    version_directive: Option<GlslVersion>,
}

impl Default for ShaderLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SHADER_SOURCE_LEN)
    }
}

impl ShaderLoader {
    pub fn new(max_source_len: usize) -> Self {
        Self {
            max_source_len,
            version_directive: None,
        }
    }

    /// Prepend `directive` to sources that carry no `#version` line
    pub fn with_version_directive(mut self, directive: GlslVersion) -> Self {
        self.version_directive = Some(directive);
        self
    }

    pub fn max_source_len(&self) -> usize {
        self.max_source_len
    }

    /// Read a UTF-8 shader source, rejecting files above the size limit
    pub fn read_source(&self, path: &Path) -> ShaderResult<String> {
        let read_error = |source| ShaderError::Read {
            path: path.to_path_buf(),
            source,
        };
        let too_large = |len| ShaderError::SourceTooLarge {
            path: path.to_path_buf(),
            len,
            max: self.max_source_len,
        };

        let file = File::open(path).map_err(read_error)?;
        let len = file.metadata().map_err(read_error)?.len();
        if len > self.max_source_len as u64 {
            return Err(too_large(len));
        }

        // The file may grow between the metadata query and the read.
        let mut bytes = Vec::with_capacity(len as usize);
        file.take((self.max_source_len as u64).saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(read_error)?;
        if bytes.len() > self.max_source_len {
            return Err(too_large(bytes.len() as u64));
        }

        String::from_utf8(bytes).map_err(|_| ShaderError::Encoding {
            path: path.to_path_buf(),
        })
    }

    /// Read and compile the shader at `path`
    pub fn load<B>(
        &self,
        gl: &B,
        path: impl AsRef<Path>,
        stage: ShaderStage,
    ) -> ShaderResult<B::Shader>
    where
        B: ShaderBackend + ?Sized,
    {
        let path = path.as_ref();
        let source = self.read_source(path)?;
        let source = self.apply_version_directive(source);
        compile_shader(gl, stage, &source, &path.display().to_string())
    }

    /// Like [`load`](Self::load), with the stage taken from the file extension
    pub fn load_auto<B>(&self, gl: &B, path: impl AsRef<Path>) -> ShaderResult<B::Shader>
    where
        B: ShaderBackend + ?Sized,
    {
        let path = path.as_ref();
        let stage = ShaderStage::from_path(path).ok_or_else(|| ShaderError::UnknownStage {
            path: path.to_path_buf(),
        })?;
        self.load(gl, path, stage)
    }

    /// Load every file in `paths` (stages from extensions) and link them.
    ///
    /// The intermediate shader objects are deleted whether or not linking
    /// succeeds.
    pub fn load_program<B, P>(&self, gl: &B, paths: &[P]) -> ShaderResult<B::Program>
    where
        B: ShaderBackend + ?Sized,
        P: AsRef<Path>,
    {
        let mut shaders = Vec::with_capacity(paths.len());
        for path in paths {
            match self.load_auto(gl, path) {
                Ok(shader) => shaders.push(shader),
                Err(err) => {
                    shaders.into_iter().for_each(|s| gl.delete_shader(s));
                    return Err(err);
                }
            }
        }

        let program = link_program(gl, &shaders);
        shaders.into_iter().for_each(|s| gl.delete_shader(s));
        program
    }

    fn apply_version_directive(&self, source: String) -> String {
        match &self.version_directive {
            Some(directive) if !has_version_directive(&source) => {
                format!("{}\n{}", directive.as_str(), source)
            }
            _ => source,
        }
    }
}

fn has_version_directive(source: &str) -> bool {
    source
        .lines()
        .any(|line| line.trim_start().starts_with("#version"))
}

fn non_empty_log(log: String) -> String {
    let trimmed = log.trim();
    if trimmed.is_empty() {
        EMPTY_LOG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read and compile the shader at `path` with the default size limit
pub fn load_shader<B>(
    gl: &B,
    path: impl AsRef<Path>,
    stage: ShaderStage,
) -> ShaderResult<B::Shader>
where
    B: ShaderBackend + ?Sized,
{
    ShaderLoader::default().load(gl, path, stage)
}

/// Compile `source` as a shader of `stage`; `name` labels diagnostics.
///
/// On failure the shader object is deleted and the driver's info log is
/// returned in the error.
pub fn compile_shader<B>(
    gl: &B,
    stage: ShaderStage,
    source: &str,
    name: &str,
) -> ShaderResult<B::Shader>
where
    B: ShaderBackend + ?Sized,
{
    let shader = gl.create_shader(stage).map_err(|e| {
        error!(shader = name, "Cannot create {stage:?} shader: {e}");
        ShaderError::Create(e)
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = non_empty_log(gl.shader_info_log(shader));
        gl.delete_shader(shader);
        error!(shader = name, "Shader compilation failed:\n{log}");
        return Err(ShaderError::Compile {
            name: name.to_string(),
            log,
        });
    }

    debug!(shader = name, ?stage, "Shader compiled");
    Ok(shader)
}

/// Link `shaders` into a program.
///
/// The shaders are detached again after linking and remain owned by the
/// caller. On failure the program object is deleted.
pub fn link_program<B>(gl: &B, shaders: &[B::Shader]) -> ShaderResult<B::Program>
where
    B: ShaderBackend + ?Sized,
{
    let program = gl.create_program().map_err(|e| {
        error!("Cannot create program: {e}");
        ShaderError::Create(e)
    })?;

    for &shader in shaders {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);
    let linked = gl.program_link_status(program);
    for &shader in shaders {
        gl.detach_shader(program, shader);
    }

    if !linked {
        let log = non_empty_log(gl.program_info_log(program));
        gl.delete_program(program);
        error!("Program link failed:\n{log}");
        return Err(ShaderError::Link { log });
    }

    debug!(shaders = shaders.len(), "Program linked");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_extension() {
        assert_eq!(
            ShaderStage::from_path(Path::new("a/b/light.vert")),
            Some(ShaderStage::Vertex)
        );
        assert_eq!(
            ShaderStage::from_path(Path::new("light.frag")),
            Some(ShaderStage::Fragment)
        );
        assert_eq!(
            ShaderStage::from_path(Path::new("cull.comp")),
            Some(ShaderStage::Compute)
        );
        assert_eq!(ShaderStage::from_path(Path::new("light.glsl")), None);
        assert_eq!(ShaderStage::from_path(Path::new("light")), None);
    }

    #[test]
    fn test_stage_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
        assert_eq!(
            ShaderStage::TessEvaluation.gl_enum(),
            glow::TESS_EVALUATION_SHADER
        );
    }

    #[test]
    fn test_version_directive_only_added_when_missing() {
        let loader = ShaderLoader::default().with_version_directive(GlslVersion {
            version_string: "#version 460 core".to_string(),
        });
        assert_eq!(
            loader.apply_version_directive("void main() {}".to_string()),
            "#version 460 core\nvoid main() {}"
        );
        let explicit = "  #version 330 core\nvoid main() {}".to_string();
        assert_eq!(loader.apply_version_directive(explicit.clone()), explicit);
    }

    #[test]
    fn test_empty_driver_log_gets_placeholder() {
        assert_eq!(non_empty_log(" \n".to_string()), EMPTY_LOG);
        assert_eq!(non_empty_log("0:1: error\n".to_string()), "0:1: error");
    }
}
