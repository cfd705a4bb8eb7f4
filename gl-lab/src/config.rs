//! Lab configuration

/// OpenGL version requested when none is configured
pub const DEFAULT_GL_VERSION: (u8, u8) = (4, 6);

/// Upper bound on shader source size when none is configured (1 MiB)
pub const DEFAULT_MAX_SHADER_SOURCE_LEN: usize = 1 << 20;

/// Window and context parameters fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub window_width: u32,
    pub window_height: u32,
    pub major_version: u8,
    pub minor_version: u8,
    pub window_title: String,
}

/// Construction-time configuration of a [`Lab`](crate::Lab)
#[derive(Debug, Clone)]
pub struct LabConfig {
    pub window_title: String,
    /// Inner window size in logical pixels
    pub window_size: (u32, u32),
    /// Requested OpenGL version (core profile)
    pub gl_version: (u8, u8),
    /// Swap interval 1 when set, 0 otherwise
    pub vsync: bool,
    pub resizable: bool,
    /// Clear color for applications that want a shared default
    pub clear_color: [f32; 4],
    /// Shader sources above this many bytes are rejected
    pub max_shader_source_len: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            window_title: format!("gl-lab - {}", env!("CARGO_PKG_VERSION")),
            window_size: (1280, 720),
            gl_version: DEFAULT_GL_VERSION,
            vsync: true,
            resizable: true,
            clear_color: [0.1, 0.2, 0.3, 1.0],
            max_shader_source_len: DEFAULT_MAX_SHADER_SOURCE_LEN,
        }
    }
}

impl LabConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self::default().with_size(width, height).with_title(title)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_max_shader_source_len(mut self, max: usize) -> Self {
        self.max_shader_source_len = max;
        self
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            window_width: self.window_size.0,
            window_height: self.window_size.1,
            major_version: self.gl_version.0,
            minor_version: self.gl_version.1,
            window_title: self.window_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_requests_gl_4_6() {
        let info = LabConfig::new(800, 600, "lab").app_info();
        assert_eq!(
            info,
            AppInfo {
                window_width: 800,
                window_height: 600,
                major_version: 4,
                minor_version: 6,
                window_title: "lab".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let cfg = LabConfig::default()
            .with_gl_version(3, 3)
            .with_vsync(false)
            .with_resizable(false)
            .with_max_shader_source_len(64);
        assert_eq!(cfg.gl_version, (3, 3));
        assert!(!cfg.vsync);
        assert!(!cfg.resizable);
        assert_eq!(cfg.max_shader_source_len, 64);
        assert_eq!(cfg.window_size, (1280, 720));
    }
}
