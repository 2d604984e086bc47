//! Core SDL2/OpenGL abstractions: window and context setup, shader
//! management and vertex buffer handling.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
