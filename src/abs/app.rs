//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use thiserror::Error;

/// A failure while bringing up the windowing subsystem or the OpenGL
/// context. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize SDL: {0}")]
    Init(String),
    #[error("failed to open window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create OpenGL context: {0}")]
    GlContext(String),
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width, and
    /// height. Requests an OpenGL 3.3 core-profile context with 4x
    /// multisampling.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Init)?;
        let video_subsystem = sdl.video().map_err(AppError::Init)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_multisample_buffers(1);
        gl_attr.set_multisample_samples(4);
        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .build()?;
        let gl_context = window
            .gl_create_context()
            .map_err(AppError::GlContext)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::GlContext)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(AppError::Init)?;
        let gl = Arc::new(gl);

        tracing::info!(title, width, height, "window and GL 3.3 core context created");

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }
}
