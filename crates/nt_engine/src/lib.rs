//! # NT Engine
//!
//! Foundation of a real-time rendering engine.
//!
//! ## Features
//!
//! - **Math**: 2D/3D/4D vectors and a row-major 4x4 transform matrix
//! - **Logging**: leveled, timestamped console and file logging
//! - **Configuration**: TOML/RON application settings
//! - **Shaders**: backend-agnostic shader program compilation and linking
//!
//! ## Quick Start
//!
//! ```rust
//! use nt_engine::prelude::*;
//!
//! let model = Matrix4::translate(Vector3::new(1.0, 2.0, 3.0))
//!     * Matrix4::rotate_z(PI / 2.0)
//!     * Matrix4::scale(Vector3::new(2.0, 2.0, 2.0));
//!
//! // Scale, then rotate, then translate.
//! assert_eq!(model * Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 4.0, 3.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

#[doc(hidden)]
pub use log;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, Config, ConfigError, LoggingConfig, ShaderConfig, WindowConfig},
        critical,
        foundation::{
            logging::{LogLevel, Logger},
            math::{utils::deg_to_rad, Matrix4, Vector2, Vector3, Vector4, EPSILON, PI},
        },
        render::{ShaderBackend, ShaderError, ShaderProgram, ShaderStage},
    };
}
