//! Rendering support
//!
//! Currently only shader program management; the graphics API itself sits
//! behind [`shader::ShaderBackend`].

pub mod shader;

pub use shader::{
    load_shader_source, ProgramId, ShaderBackend, ShaderError, ShaderProgram, ShaderStage, StageId,
};
