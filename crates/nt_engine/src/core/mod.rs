//! # Core Engine Module
//!
//! Shared configuration types used by the engine subsystems and the
//! applications that drive them.

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

pub use config::{ApplicationConfig, Config, ConfigError, LoggingConfig, ShaderConfig, WindowConfig};
