//! Error types for the lab shell and the shader loader

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while bootstrapping or running the lab window
#[derive(Error, Debug)]
pub enum LabError {
    /// The windowing library could not be initialized (or was already
    /// initialized once in this process)
    #[error("Cannot initialize the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The event loop exited before a window could be created
    #[error("Event loop exited during startup with code {0}")]
    EventLoopExited(i32),

    /// Failed to create the OS window or pick a GL config for it
    #[error("Cannot create window: {0}")]
    CreateWindow(String),

    /// Failed to create the OpenGL context
    #[error("Cannot create OpenGL context: {0}")]
    CreateContext(#[source] glutin::error::Error),

    /// Failed to create the window surface
    #[error("Cannot create window surface: {0}")]
    CreateSurface(String),

    /// Failed to make the context current on the window surface
    #[error("Cannot make OpenGL context current: {0}")]
    MakeCurrent(#[source] glutin::error::Error),

    /// The context does not provide the requested OpenGL version
    #[error("OpenGL {requested} unsupported (context reports {actual})")]
    UnsupportedVersion { requested: String, actual: String },

    /// Swapping or resizing the window surface failed
    #[error("Surface error: {0}")]
    Surface(#[source] glutin::error::Error),

    /// A shader failed to load, compile or link
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Errors that can occur while loading, compiling or linking shaders
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Failed to read the shader source file
    #[error("Cannot read shader source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shader source is not valid UTF-8
    #[error("Shader source {} is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    /// The shader source exceeds the configured size bound
    #[error("Shader source {} is {len} bytes, limit is {max}", .path.display())]
    SourceTooLarge { path: PathBuf, len: u64, max: usize },

    /// The shader stage could not be inferred from the file extension
    #[error("Cannot infer shader stage from {}", .path.display())]
    UnknownStage { path: PathBuf },

    /// Failed to create the OpenGL shader or program object
    #[error("Failed to create shader object: {0}")]
    Create(String),

    /// The driver rejected the shader source
    #[error("Failed to compile shader {name}: {log}")]
    Compile { name: String, log: String },

    /// The driver rejected the program
    #[error("Failed to link program: {log}")]
    Link { log: String },
}

/// Result type for lab operations
pub type LabResult<T> = Result<T, LabError>;

/// Result type for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Unwrap `result` or log the error and terminate the process.
///
/// Initialization failures of the lab are fatal; binaries call this at
/// their boundary instead of handling each variant. The message also goes
/// to stderr when no global `tracing` subscriber is installed.
pub fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            report_fatal(&err);
            std::process::exit(1);
        }
    }
}

/// Log a fatal error; returns whether it was echoed to stderr
fn report_fatal(err: &dyn std::fmt::Display) -> bool {
    tracing::error!("{err}");
    if tracing::dispatcher::has_been_set() {
        return false;
    }
    eprintln!("error: {err}");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_error_reaches_stderr_without_subscriber() {
        let err = LabError::UnsupportedVersion {
            requested: "4.6".to_string(),
            actual: "3.3".to_string(),
        };
        assert!(report_fatal(&err));
    }

    #[test]
    fn test_shader_error_messages_name_the_file() {
        let err = ShaderError::SourceTooLarge {
            path: PathBuf::from("shaders/big.frag"),
            len: 64,
            max: 16,
        };
        assert_eq!(
            err.to_string(),
            "Shader source shaders/big.frag is 64 bytes, limit is 16"
        );
    }
}
