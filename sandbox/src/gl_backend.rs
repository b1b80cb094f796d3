//! OpenGL implementation of the engine's shader backend
//!
//! Every call assumes the window's context is current and that
//! [`Window::new`](crate::window::Window::new) has loaded the GL function
//! pointers.

use std::ffi::CString;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use nt_engine::foundation::math::{Vector3, Vector4};
use nt_engine::render::{ProgramId, ShaderBackend, ShaderStage, StageId};

/// Background color cleared at the start of every frame
pub const CLEAR_COLOR: Vector4 = Vector4::new(0.3, 0.3, 0.3, 0.2);

/// Shader backend issuing raw OpenGL calls on the current context
#[derive(Debug, Default)]
pub struct GlBackend;

impl GlBackend {
    /// Backend for the context current on this thread
    pub fn new() -> Self {
        Self
    }

    /// Clear the color buffer to `color`
    pub fn clear(&mut self, color: Vector4) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, color.w);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Match the viewport to a resized framebuffer
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }
}

const fn stage_kind(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

impl ShaderBackend for GlBackend {
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageId, String> {
        let source = CString::new(source).map_err(|err| err.to_string())?;

        unsafe {
            let id = gl::CreateShader(stage_kind(stage));
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(id);

            let mut status = GLint::from(gl::FALSE);
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let log = shader_info_log(id);
                gl::DeleteShader(id);
                return Err(log);
            }
            Ok(id)
        }
    }

    fn link_program(&mut self, stages: &[StageId]) -> Result<ProgramId, String> {
        unsafe {
            let id = gl::CreateProgram();
            for &stage in stages {
                gl::AttachShader(id, stage);
            }
            gl::LinkProgram(id);

            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let log = program_info_log(id);
                gl::DeleteProgram(id);
                return Err(log);
            }
            Ok(id)
        }
    }

    fn delete_stage(&mut self, stage: StageId) {
        unsafe {
            gl::DeleteShader(stage);
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    // glUniform* writes to the bound program, so bind before setting.
    fn set_uniform_vec3(&mut self, program: ProgramId, name: &str, value: Vector3) {
        let Ok(name) = CString::new(name) else {
            return;
        };
        unsafe {
            let location = gl::GetUniformLocation(program, name.as_ptr());
            gl::Uniform3f(location, value.x, value.y, value.z);
        }
    }
}

unsafe fn shader_info_log(id: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; usize::try_from(len).unwrap_or(0).max(1)];
    let mut written: GLsizei = 0;
    gl::GetShaderInfoLog(id, len, &mut written, buf.as_mut_ptr().cast::<GLchar>());
    info_log_text(buf, written)
}

unsafe fn program_info_log(id: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; usize::try_from(len).unwrap_or(0).max(1)];
    let mut written: GLsizei = 0;
    gl::GetProgramInfoLog(id, len, &mut written, buf.as_mut_ptr().cast::<GLchar>());
    info_log_text(buf, written)
}

/// Keep the `written` bytes a driver reported, minus trailing whitespace
fn info_log_text(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(usize::try_from(written).unwrap_or(0));
    String::from_utf8_lossy(&buf).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_log_text_keeps_written_bytes() {
        let mut buf = b"0:3(1): error: syntax error\n".to_vec();
        buf.resize(64, 0);
        assert_eq!(info_log_text(buf, 28), "0:3(1): error: syntax error");
    }

    #[test]
    fn test_info_log_text_ignores_bad_lengths() {
        assert_eq!(info_log_text(b"garbage".to_vec(), -1), "");
        assert_eq!(info_log_text(b"short".to_vec(), 100), "short");
    }

    #[test]
    fn test_stage_kinds() {
        assert_eq!(stage_kind(ShaderStage::Vertex), gl::VERTEX_SHADER);
        assert_eq!(stage_kind(ShaderStage::Fragment), gl::FRAGMENT_SHADER);
    }
}
