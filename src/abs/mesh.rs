//! GPU vertex buffer handling.
//!
//! This module defines the [`TriangleBuffer`] struct holding a triangle's
//! worth of vertex positions on the GPU side, and the [`VertexArray`]
//! object the core profile requires before any attribute state is touched.

use std::sync::Arc;

use glow::HasContext;

/// A GPU-resident buffer holding tightly packed xyz vertex positions,
/// drawn as a triangle list through attribute slot 0.
pub struct TriangleBuffer {
    gl: Arc<glow::Context>,
    vbo: glow::Buffer,
    vertex_count: i32,
}

impl TriangleBuffer {
    /// Uploads the given vertex positions into a new buffer. The data is
    /// interpreted as consecutive xyz triples.
    pub fn new(gl: &Arc<glow::Context>, vertices: &[f32]) -> Result<Self, String> {
        debug_assert!(vertices.len().is_multiple_of(3));
        unsafe {
            let vbo = gl.create_buffer()?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                vbo,
                vertex_count: (vertices.len() / 3) as i32,
            })
        }
    }

    /// Draws the buffer.
    pub fn draw(&self) {
        unsafe {
            self.gl.enable_vertex_attrib_array(0);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl
                .vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
            self.gl.disable_vertex_attrib_array(0);
        }
    }

    /// Returns the amount of vertices stored in the buffer.
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}

impl Drop for TriangleBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
        }
    }
}

/// A vertex array object. One must be bound for the whole lifetime of the
/// render loop.
pub struct VertexArray {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            Ok(Self {
                gl: Arc::clone(gl),
                vao,
            })
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
