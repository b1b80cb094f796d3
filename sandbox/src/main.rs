//! Sandbox: opens a window and runs the engine's frame loop
//!
//! Usage: `sandbox [config.toml]`. Without an argument the sandbox looks for
//! `sandbox.toml` and `sandbox/sandbox.toml`, falling back to defaults.

mod gl_backend;
mod window;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glfw::{Action, Key, WindowEvent};
use log::{debug, info, warn};
use nt_engine::core::config::{ApplicationConfig, Config, ConfigError, ShaderConfig};
use nt_engine::critical;
use nt_engine::foundation::logging;
use nt_engine::foundation::math::{Matrix4, Vector3};
use nt_engine::render::{ShaderBackend, ShaderProgram};

use gl_backend::{GlBackend, CLEAR_COLOR};
use window::{Window, WindowError};

const CONFIG_CANDIDATES: [&str; 2] = ["sandbox.toml", "sandbox/sandbox.toml"];

/// Frames between model transform debug reports
const REPORT_INTERVAL: u64 = 300;

const MODEL_COLOR: Vector3 = Vector3::new(1.0, 0.5, 0.2);

#[derive(thiserror::Error, Debug)]
enum SandboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map_or_else(default_config_path, PathBuf::from);
    let (config, config_error) = match ApplicationConfig::load_or_default(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (ApplicationConfig::default(), Some(err)),
    };

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("{err}");
    }
    if let Some(err) = config_error {
        warn!("Using default configuration, {} could not be loaded: {err}", config_path.display());
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            critical!("{err}");
            log::Log::flush(log::logger());
            ExitCode::FAILURE
        }
    }
}

fn default_config_path() -> PathBuf {
    CONFIG_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .unwrap_or_else(|| Path::new(CONFIG_CANDIDATES[0]))
        .to_path_buf()
}

fn run(config: &ApplicationConfig) -> Result<(), SandboxError> {
    config.validate()?;

    let mut window = Window::new(&config.window)?;
    let (fb_width, fb_height) = window.framebuffer_size();
    info!(
        "Opened \"{}\" ({}x{}, framebuffer {fb_width}x{fb_height})",
        config.window.title, config.window.width, config.window.height
    );

    let mut backend = GlBackend::new();
    // Failures are already logged at critical level; keep clearing frames without a program.
    let program = prepare_program(&mut backend, &config.shaders);

    let mut frame: u64 = 0;
    while !window.should_close() {
        window.poll_events();
        for event in window.drain_events() {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => window.set_should_close(true),
                WindowEvent::FramebufferSize(width, height) => {
                    debug!("Framebuffer resized to {width}x{height}");
                    backend.set_viewport(width, height);
                }
                _ => {}
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let model = model_transform(window.time() as f32);
        if frame % REPORT_INTERVAL == 0 {
            debug!("Frame {frame}: model * (1, 0, 0) = {}", model * Vector3::new(1.0, 0.0, 0.0));
        }

        backend.clear(CLEAR_COLOR);
        window.swap_buffers();
        frame += 1;
    }

    if let Some(program) = program {
        program.destroy(&mut backend);
    }
    info!("Window closed after {frame} frames");
    Ok(())
}

/// Half-size model spinning about Y, pushed two units down -Z
fn model_transform(time: f32) -> Matrix4 {
    Matrix4::translate(Vector3::new(0.0, 0.0, -2.0))
        * Matrix4::rotate_y(time)
        * Matrix4::scale(Vector3::ones() * 0.5)
}

/// Build the configured program, bind it and set its color
fn prepare_program<B: ShaderBackend>(backend: &mut B, shaders: &ShaderConfig) -> Option<ShaderProgram> {
    let program = ShaderProgram::from_config(backend, shaders).ok()?;
    program.bind(backend);
    program.set_color(backend, MODEL_COLOR.x, MODEL_COLOR.y, MODEL_COLOR.z);
    info!("Shader program {} ready", program.id());
    Some(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_engine::render::{ProgramId, ShaderStage, StageId};

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<String>,
        next_id: u32,
    }

    impl ShaderBackend for RecordingBackend {
        fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageId, String> {
            assert!(source.starts_with("#version 330 core"));
            self.next_id += 1;
            self.calls.push(format!("compile {stage}"));
            Ok(self.next_id)
        }

        fn link_program(&mut self, stages: &[StageId]) -> Result<ProgramId, String> {
            self.next_id += 1;
            self.calls.push(format!("link {stages:?}"));
            Ok(self.next_id)
        }

        fn delete_stage(&mut self, stage: StageId) {
            self.calls.push(format!("delete stage {stage}"));
        }

        fn delete_program(&mut self, program: ProgramId) {
            self.calls.push(format!("delete program {program}"));
        }

        fn use_program(&mut self, program: ProgramId) {
            self.calls.push(format!("use {program}"));
        }

        fn set_uniform_vec3(&mut self, program: ProgramId, name: &str, value: Vector3) {
            self.calls.push(format!("uniform {program} {name} {value}"));
        }
    }

    fn shipped_shaders() -> ShaderConfig {
        let shaders = Path::new(env!("CARGO_MANIFEST_DIR")).join("../resources/shaders");
        ShaderConfig::new(shaders.join("basic.vert"), shaders.join("basic.frag"))
    }

    #[test]
    fn test_prepare_program_binds_and_colors_shipped_shaders() {
        let mut backend = RecordingBackend::default();
        let program = prepare_program(&mut backend, &shipped_shaders()).unwrap();
        assert_eq!(program.id(), 3);

        assert_eq!(
            backend.calls,
            [
                "compile VERTEX".to_string(),
                "compile FRAGMENT".to_string(),
                "link [1, 2]".to_string(),
                "delete stage 1".to_string(),
                "delete stage 2".to_string(),
                "use 3".to_string(),
                format!("uniform 3 vertexColor {MODEL_COLOR}"),
            ]
        );
    }

    #[test]
    fn test_prepare_program_without_sources() {
        let mut backend = RecordingBackend::default();
        let shaders = ShaderConfig::new("missing.vert", "missing.frag");
        assert!(prepare_program(&mut backend, &shaders).is_none());
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_clear_color() {
        assert_eq!(CLEAR_COLOR, nt_engine::foundation::math::Vector4::new(0.3, 0.3, 0.3, 0.2));
    }

    #[test]
    fn test_model_transform_at_rest() {
        let p = model_transform(0.0) * Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(p, Vector3::new(0.5, 0.0, -2.0));
    }

    #[test]
    fn test_model_transform_quarter_turn() {
        let p = model_transform(nt_engine::foundation::math::PI / 2.0) * Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(p, Vector3::new(0.0, 0.0, -2.5));
    }
}
