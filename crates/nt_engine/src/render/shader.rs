//! Shader program loading, compilation and linking
//!
//! [`ShaderProgram`] drives a [`ShaderBackend`] through the usual sequence:
//! read both sources, compile each stage, link, then release the stage
//! objects. The backend is the only part that talks to a graphics API.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::config::ShaderConfig;
use crate::critical;
use crate::foundation::math::Vector3;

/// Backend handle of a compiled shader stage
pub type StageId = u32;

/// Backend handle of a linked shader program
pub type ProgramId = u32;

/// Name of the color uniform set by [`ShaderProgram::set_color`]
pub const COLOR_UNIFORM: &str = "vertexColor";

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "VERTEX",
            Self::Fragment => "FRAGMENT",
        })
    }
}

/// Shader loading errors
#[derive(thiserror::Error, Debug)]
pub enum ShaderError {
    /// A source file could not be read
    #[error("Failed to load shader source: {}", path.display())]
    SourceLoad {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A stage failed to compile
    #[error("Shader compilation failed: {stage}\n{log}")]
    Compile {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler info log
        log: String,
    },

    /// The program failed to link
    #[error("Shader program linking failed:\n{log}")]
    Link {
        /// Linker info log
        log: String,
    },
}

/// Graphics API operations needed to build and use shader programs.
///
/// Errors are returned as the backend's info log text.
pub trait ShaderBackend {
    /// Compile one stage from source
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageId, String>;

    /// Link compiled stages into a program
    fn link_program(&mut self, stages: &[StageId]) -> Result<ProgramId, String>;

    /// Release a compiled stage
    fn delete_stage(&mut self, stage: StageId);

    /// Release a linked program
    fn delete_program(&mut self, program: ProgramId);

    /// Make `program` current for subsequent draws
    fn use_program(&mut self, program: ProgramId);

    /// Set a `vec3` uniform on `program`
    fn set_uniform_vec3(&mut self, program: ProgramId, name: &str, value: Vector3);
}

/// Read a shader source file to a string
pub fn load_shader_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderError::SourceLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// A linked vertex + fragment program
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    id: ProgramId,
}

impl ShaderProgram {
    /// Compile and link a program from in-memory sources.
    ///
    /// Stage objects are released once linking has been attempted, whatever
    /// its outcome. Failures are logged at critical level and returned.
    pub fn from_sources<B: ShaderBackend>(
        backend: &mut B,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let result = Self::build(backend, vertex_source, fragment_source);
        if let Err(err) = &result {
            critical!("{err}");
        }
        result
    }

    /// Load both sources named by `config`, then compile and link them
    pub fn from_config<B: ShaderBackend>(backend: &mut B, config: &ShaderConfig) -> Result<Self, ShaderError> {
        let sources = load_shader_source(&config.vertex_shader_path)
            .and_then(|vertex| Ok((vertex, load_shader_source(&config.fragment_shader_path)?)));

        match sources {
            Ok((vertex, fragment)) => Self::from_sources(backend, &vertex, &fragment),
            Err(err) => {
                critical!("{err}");
                Err(err)
            }
        }
    }

    fn build<B: ShaderBackend>(backend: &mut B, vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex = compile(backend, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile(backend, ShaderStage::Fragment, fragment_source) {
            Ok(fragment) => fragment,
            Err(err) => {
                backend.delete_stage(vertex);
                return Err(err);
            }
        };

        let linked = backend.link_program(&[vertex, fragment]);
        backend.delete_stage(vertex);
        backend.delete_stage(fragment);

        let id = linked.map_err(|log| ShaderError::Link { log })?;
        debug!("Linked shader program {id}");
        Ok(Self { id })
    }

    /// Backend handle of the program
    pub const fn id(&self) -> ProgramId {
        self.id
    }

    /// Make this program current
    pub fn bind<B: ShaderBackend>(&self, backend: &mut B) {
        backend.use_program(self.id);
    }

    /// Set the `vertexColor` uniform
    pub fn set_color<B: ShaderBackend>(&self, backend: &mut B, r: f32, g: f32, b: f32) {
        backend.set_uniform_vec3(self.id, COLOR_UNIFORM, Vector3::new(r, g, b));
    }

    /// Release the program
    pub fn destroy<B: ShaderBackend>(self, backend: &mut B) {
        backend.delete_program(self.id);
    }
}

fn compile<B: ShaderBackend>(backend: &mut B, stage: ShaderStage, source: &str) -> Result<StageId, ShaderError> {
    backend
        .compile_stage(stage, source)
        .map_err(|log| ShaderError::Compile { stage, log })
}
