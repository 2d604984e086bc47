//! The OpenGL scene: two triangles, two shader programs, one window.
//!
//! [`GlScene`] is the real [`RenderBackend`]. It owns every GL resource
//! the loop touches plus the [`App`] itself, so dropping it releases the
//! vertex buffers, the vertex array and both programs (in field order)
//! before the SDL context goes away.

use glam::Mat4;
use glow::HasContext;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use thiserror::Error;

use crate::abs::{App, ShaderError, ShaderProgram, TriangleBuffer, VertexArray};
use crate::driver::{FrameControl, Pass, RenderBackend};

/// Vertex shader shared by both passes.
pub const VERTEX_SHADER_FILE: &str = "SimpleVertexShader.vertexshader";
/// Fragment shader of the first pass.
pub const FIRST_FRAGMENT_SHADER_FILE: &str = "FirstFragmentShader.fragmentshader";
/// Fragment shader of the second pass.
pub const SECOND_FRAGMENT_SHADER_FILE: &str = "SecondFragmentShader.fragmentshader";

/// The two triangles, three xyz positions each.
pub const FIRST_TRIANGLE: [f32; 9] = [
    0.9, -0.2, 0.3, //
    0.4, 0.3, -0.8, //
    -0.6, 0.2, 0.7,
];
pub const SECOND_TRIANGLE: [f32; 9] = [
    0.3, -0.7, 0.1, //
    -0.9, 0.9, 0.9, //
    0.6, -0.2, -0.7,
];

/// A failure while building the scene's GL resources.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("failed to create vertex array: {0}")]
    VertexArray(String),
    #[error("failed to create vertex buffer: {0}")]
    Buffer(String),
}

/// GL-side state of the render loop.
///
/// Field order is teardown order: buffers, vertex array, programs, then
/// the windowing subsystem.
pub struct GlScene {
    first_buffer: TriangleBuffer,
    second_buffer: TriangleBuffer,
    _vao: VertexArray,
    first_program: ShaderProgram,
    second_program: ShaderProgram,
    app: App,
}

impl GlScene {
    /// Loads both shader programs, uploads both triangles and sets the
    /// fixed GL state of the loop.
    pub fn new(app: App) -> Result<Self, SceneError> {
        let gl = &app.gl;

        unsafe {
            // Dark blue background.
            gl.clear_color(0.0, 0.0, 0.4, 0.0);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        let vao = VertexArray::new(gl).map_err(SceneError::VertexArray)?;
        vao.bind();

        let first_program =
            ShaderProgram::from_files(gl, VERTEX_SHADER_FILE, FIRST_FRAGMENT_SHADER_FILE)?;
        let second_program =
            ShaderProgram::from_files(gl, VERTEX_SHADER_FILE, SECOND_FRAGMENT_SHADER_FILE)?;
        tracing::info!("shader programs compiled and linked");

        let first_buffer = TriangleBuffer::new(gl, &FIRST_TRIANGLE).map_err(SceneError::Buffer)?;
        let second_buffer =
            TriangleBuffer::new(gl, &SECOND_TRIANGLE).map_err(SceneError::Buffer)?;
        tracing::debug!(
            first = first_buffer.vertex_count(),
            second = second_buffer.vertex_count(),
            "triangle buffers uploaded"
        );

        Ok(Self {
            first_buffer,
            second_buffer,
            _vao: vao,
            first_program,
            second_program,
            app,
        })
    }

    fn program(&self, pass: Pass) -> &ShaderProgram {
        match pass {
            Pass::One => &self.first_program,
            Pass::Two => &self.second_program,
        }
    }

    fn buffer(&self, pass: Pass) -> &TriangleBuffer {
        match pass {
            Pass::One => &self.first_buffer,
            Pass::Two => &self.second_buffer,
        }
    }
}

impl RenderBackend for GlScene {
    fn begin_frame(&mut self) {
        unsafe {
            self.app
                .gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn bind_pass(&mut self, pass: Pass) {
        self.program(pass).use_program();
    }

    fn set_transform(&mut self, pass: Pass, mvp: Mat4) {
        self.program(pass).set_uniform("MVP", mvp);
    }

    fn draw(&mut self, pass: Pass) {
        self.buffer(pass).draw();
    }

    fn finish_frame(&mut self) -> FrameControl {
        self.app.window.gl_swap_window();
        for event in self.app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return FrameControl::Exit,
                _ => {}
            }
        }
        FrameControl::Continue
    }

    fn shutdown(self) {
        // Drop order of the fields releases everything: the buffers, the
        // vertex array, both programs, then the SDL context.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_constants_match_the_uploaded_data() {
        assert_eq!(
            FIRST_TRIANGLE,
            [0.9, -0.2, 0.3, 0.4, 0.3, -0.8, -0.6, 0.2, 0.7]
        );
        assert_eq!(
            SECOND_TRIANGLE,
            [0.3, -0.7, 0.1, -0.9, 0.9, 0.9, 0.6, -0.2, -0.7]
        );
    }
}
