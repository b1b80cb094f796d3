//! # Unified Configuration System
//!
//! Configuration for the engine subsystems, grouped under
//! [`ApplicationConfig`]:
//!
//! - **Logging**: log file location and level filter
//! - **Window**: title, size and swap behaviour of the main window
//! - **Shaders**: vertex and fragment shader source paths
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory the log file is written to, created on demand
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`
    pub file_name: String,
    /// Level filter in `RUST_LOG` syntax (`"info"`, `"nt_engine=debug"`, ...)
    pub filter: String,
    /// Whether entries are echoed to stdout
    pub echo_to_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_name: "engine.log".to_string(),
            filter: "info".to_string(),
            echo_to_console: true,
        }
    }
}

impl LoggingConfig {
    /// Set the log directory
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Set the level filter
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Wait for vertical sync when swapping buffers
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Window".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

impl WindowConfig {
    /// Set the window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Width over height
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::Invalid("Window title cannot be empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// # Shader Configuration
///
/// Paths to the GLSL sources of the default shader program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: PathBuf,
    /// Path to the fragment shader source
    pub fragment_shader_path: PathBuf,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<PathBuf>, fragment_path: impl Into<PathBuf>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries the common shader locations so applications can be started from
    /// the workspace root or from a crate directory.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        Self {
            vertex_shader_path: Self::resolve_shader_path(base_vertex),
            fragment_shader_path: Self::resolve_shader_path(base_fragment),
        }
    }

    fn resolve_shader_path(file_name: &str) -> PathBuf {
        const SHADER_DIRS: [&str; 4] = ["resources/shaders", "../resources/shaders", "shaders", "."];

        SHADER_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(file_name))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| Path::new(SHADER_DIRS[0]).join(file_name))
    }

    /// Validate that shader files exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (stage, path) in [
            ("Vertex", &self.vertex_shader_path),
            ("Fragment", &self.fragment_shader_path),
        ] {
            if !path.exists() {
                return Err(ConfigError::Invalid(format!(
                    "{stage} shader not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("basic.vert", "basic.frag")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Main window configuration
    pub window: WindowConfig,
    /// Default shader program sources
    pub shaders: ShaderConfig,
}

impl ApplicationConfig {
    /// Validate the settings needed to open a window.
    ///
    /// Shader paths are checked separately through [`ShaderConfig::validate`]
    /// since a missing shader is not fatal to startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()
    }
}

impl Config for ApplicationConfig {}
