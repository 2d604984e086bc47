//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for
//! managing OpenGL shaders. Shader sources are read from disk at startup;
//! the [`Uniform`] trait covers the values uploaded to program uniforms.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;
use thiserror::Error;

/// A failure while loading, compiling or linking a shader program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to allocate shader object: {0}")]
    Allocate(String),
    #[error("shader compilation failed ({path}): {log}")]
    Compile { path: PathBuf, log: String },
    #[error("shader program linking failed: {0}")]
    Link(String),
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code. `path` is only
    /// used for diagnostics.
    pub fn new(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        source: &str,
        path: &Path,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(ShaderError::Allocate)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile {
                    path: path.to_path_buf(),
                    log,
                });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }

    /// Reads a shader source file and compiles it.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(gl, shader_type, &source, path)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Allocate)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles the given vertex and fragment shader source files and links
    /// them into a program.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vert = Shader::from_file(gl, glow::VERTEX_SHADER, vertex_path)?;
        let frag = Shader::from_file(gl, glow::FRAGMENT_SHADER, fragment_path)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program. The program must be
    /// the one currently in use.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
