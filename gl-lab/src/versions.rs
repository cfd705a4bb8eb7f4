//! OpenGL version detection

use std::fmt;

use glow::{Context, HasContext};

/// OpenGL version reported by a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_es: bool,
}

impl GlVersion {
    /// Read the OpenGL version from the current context
    pub fn read(gl: &Context) -> Self {
        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        Self::parse(&version_string)
    }

    /// Parse an OpenGL version from a `GL_VERSION` string
    pub fn parse(version_string: &str) -> Self {
        // Examples:
        // "4.6.0 NVIDIA 460.89"
        // "4.6 (Core Profile) Mesa 23.2.1"
        // "OpenGL ES 3.2 Mesa 23.2.1"

        let is_es = version_string.contains("OpenGL ES") || version_string.contains("WebGL");

        let (major, minor) = Self::parse_version_numbers(version_string)
            .unwrap_or(if is_es { (2, 0) } else { (2, 1) });

        Self {
            major,
            minor,
            is_es,
        }
    }

    fn parse_version_numbers(version_string: &str) -> Option<(u32, u32)> {
        // First word shaped like "3.2" or "4.6.0"
        for word in version_string.split_whitespace() {
            if let Some((major_str, rest)) = word.split_once('.') {
                let minor_str = rest.split('.').next().unwrap_or(rest);
                if let (Ok(major), Ok(minor)) = (major_str.parse(), minor_str.parse()) {
                    return Some((major, minor));
                }
            }
        }
        None
    }

    /// Whether this is a desktop context providing at least `major.minor`
    pub fn supports(self, major: u32, minor: u32) -> bool {
        !self.is_es && (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_es {
            write!(f, "ES {}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

/// GLSL `#version` directive matching a GL version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlslVersion {
    pub version_string: String,
}

impl GlslVersion {
    /// Get the appropriate GLSL version directive for the given OpenGL version
    pub fn for_gl_version(gl_version: GlVersion) -> Self {
        let version_string = if gl_version.is_es {
            if gl_version.major >= 3 {
                format!("#version 3{}0 es", gl_version.minor.min(2))
            } else {
                "#version 100".to_string()
            }
        } else {
            match (gl_version.major, gl_version.minor) {
                (4, minor) => format!("#version 4{}0 core", minor.min(6)),
                (major, _) if major > 4 => "#version 460 core".to_string(),
                (3, minor) if minor >= 3 => "#version 330 core".to_string(),
                (3, 2) => "#version 150 core".to_string(),
                (3, 1) => "#version 140".to_string(),
                (3, 0) => "#version 130".to_string(),
                (2, 1) => "#version 120".to_string(),
                (2, 0) => "#version 110".to_string(),
                _ => "#version 130".to_string(),
            }
        };

        Self { version_string }
    }

    /// Get the directive string
    pub fn as_str(&self) -> &str {
        &self.version_string
    }
}

/// Driver-reported identification strings of the current context
#[derive(Debug, Clone, Default)]
pub struct RendererInfo {
    pub version: String,
    pub shading_language_version: String,
    pub vendor: String,
    pub renderer: String,
}

impl RendererInfo {
    pub fn read(gl: &Context) -> Self {
        unsafe {
            Self {
                version: gl.get_parameter_string(glow::VERSION),
                shading_language_version: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_desktop_version_strings() {
        assert_eq!(
            GlVersion::parse("4.6.0 NVIDIA 460.89"),
            GlVersion {
                major: 4,
                minor: 6,
                is_es: false
            }
        );
        assert_eq!(
            GlVersion::parse("4.5 (Core Profile) Mesa 23.2.1"),
            GlVersion {
                major: 4,
                minor: 5,
                is_es: false
            }
        );
    }

    #[test]
    fn parses_es_version_strings() {
        let v = GlVersion::parse("OpenGL ES 3.2 Mesa 23.2.1");
        assert!(v.is_es);
        assert_eq!((v.major, v.minor), (3, 2));
    }

    #[test]
    fn falls_back_on_garbage() {
        assert_eq!(
            GlVersion::parse("unknown driver"),
            GlVersion {
                major: 2,
                minor: 1,
                is_es: false
            }
        );
    }

    #[test]
    fn support_check_compares_major_then_minor() {
        let v = GlVersion::parse("4.6.0");
        assert!(v.supports(4, 6));
        assert!(v.supports(4, 5));
        assert!(v.supports(3, 3));
        assert!(!v.supports(4, 7));

        let old = GlVersion::parse("3.3.0");
        assert!(!old.supports(4, 6));

        let es = GlVersion::parse("OpenGL ES 3.2");
        assert!(!es.supports(3, 0));
    }

    #[test]
    fn glsl_directive_follows_gl_version() {
        let glsl = |s| GlslVersion::for_gl_version(GlVersion::parse(s));
        assert_eq!(glsl("4.6.0").as_str(), "#version 460 core");
        assert_eq!(glsl("4.1 Metal").as_str(), "#version 410 core");
        assert_eq!(glsl("3.3.0").as_str(), "#version 330 core");
        assert_eq!(glsl("3.2.0").as_str(), "#version 150 core");
        assert_eq!(glsl("OpenGL ES 3.0").as_str(), "#version 300 es");
        assert_eq!(glsl("OpenGL ES 2.0").as_str(), "#version 100");
    }

    #[test]
    fn display_formats_version() {
        assert_eq!(GlVersion::parse("4.6.0").to_string(), "4.6");
        assert_eq!(GlVersion::parse("OpenGL ES 3.1").to_string(), "ES 3.1");
    }
}
