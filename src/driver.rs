//! The render loop driver.
//!
//! One parameterized loop covers both variants: the static one uploads
//! the transform once before the first frame, the orbit one advances the
//! camera and re-uploads it every frame.
//!
//! The driver talks to the GPU and the window through the
//! [`RenderBackend`] trait so the loop can run against a recording mock
//! without a display.

use std::time::Duration;

use glam::Mat4;

use crate::camera::OrbitCamera;

/// Identifies one of the two triangle draw passes. Each pass has its own
/// shader program and vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    One,
    Two,
}

impl Pass {
    pub const ALL: [Pass; 2] = [Pass::One, Pass::Two];
}

/// Whether the loop keeps running after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// Everything the driver needs from the windowing and graphics layer.
pub trait RenderBackend {
    /// Clears the color and depth buffers.
    fn begin_frame(&mut self);
    /// Binds the pass's shader program.
    fn bind_pass(&mut self, pass: Pass);
    /// Uploads the combined transform to the pass's `MVP` uniform. The
    /// pass must currently be bound.
    fn set_transform(&mut self, pass: Pass, mvp: Mat4);
    /// Draws the pass's triangle.
    fn draw(&mut self, pass: Pass);
    /// Presents the frame and polls input, reporting whether Escape was
    /// pressed or the window close was requested.
    fn finish_frame(&mut self) -> FrameControl;
    /// Releases all resources. Teardown order: vertex buffers, vertex
    /// array, shader programs, then the windowing subsystem.
    fn shutdown(self)
    where
        Self: Sized;
}

/// Render loop parameters.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Advance the camera along its arc and re-upload the transform each
    /// frame. When false, the transform computed at startup stays.
    pub animate_camera: bool,
    /// Fixed sleep per iteration. `None` paces on vsync alone, which also
    /// lets tests run frames without real time passing.
    pub frame_interval: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            animate_camera: true,
            frame_interval: Some(Duration::from_millis(50)),
        }
    }
}

/// Owns the camera and projection and runs the per-frame contract until
/// the backend reports an exit.
pub struct Driver {
    config: DriverConfig,
    camera: OrbitCamera,
    projection: Mat4,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        // 45 degree fov, 4:3 aspect, display range 0.1 to 100 units.
        let projection =
            Mat4::perspective_rh_gl(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        Self {
            config,
            camera: OrbitCamera::new(),
            projection,
        }
    }

    /// Combined transform: projection * view * model, model = identity.
    fn transform(&self) -> Mat4 {
        self.projection * self.camera.view()
    }

    /// Runs the loop to completion and tears the backend down.
    pub fn run<B: RenderBackend>(&mut self, mut backend: B) {
        // Initial transform, uploaded once to both programs. The static
        // variant never touches the uniforms again.
        let mut mvp = self.transform();
        for pass in Pass::ALL {
            backend.bind_pass(pass);
            backend.set_transform(pass, mvp);
        }

        loop {
            if let Some(interval) = self.config.frame_interval {
                std::thread::sleep(interval);
            }

            if self.config.animate_camera {
                self.camera.advance();
                let pos = self.camera.position();
                tracing::trace!(x = pos.x, y = pos.y, "camera position");
                mvp = self.transform();
            }

            backend.begin_frame();
            for pass in Pass::ALL {
                backend.bind_pass(pass);
                if self.config.animate_camera {
                    backend.set_transform(pass, mvp);
                }
                backend.draw(pass);
            }

            if backend.finish_frame() == FrameControl::Exit {
                break;
            }
        }

        tracing::info!("exit requested, shutting down");
        backend.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Bind(Pass),
        Transform(Pass),
        Draw { pass: Pass, vertices: u32 },
        Present,
        DeleteBuffers,
        DeleteVertexArray,
        DeleteProgram(Pass),
        Terminate,
    }

    /// Records every backend call and requests an exit after a fixed
    /// number of presented frames.
    struct MockBackend {
        log: Rc<RefCell<Vec<Call>>>,
        frames_left: u32,
    }

    impl MockBackend {
        fn new(frames: u32) -> (Self, Rc<RefCell<Vec<Call>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    log: Rc::clone(&log),
                    frames_left: frames,
                },
                log,
            )
        }
    }

    impl RenderBackend for MockBackend {
        fn begin_frame(&mut self) {
            self.log.borrow_mut().push(Call::Clear);
        }

        fn bind_pass(&mut self, pass: Pass) {
            self.log.borrow_mut().push(Call::Bind(pass));
        }

        fn set_transform(&mut self, pass: Pass, _mvp: Mat4) {
            self.log.borrow_mut().push(Call::Transform(pass));
        }

        fn draw(&mut self, pass: Pass) {
            self.log.borrow_mut().push(Call::Draw { pass, vertices: 3 });
        }

        fn finish_frame(&mut self) -> FrameControl {
            self.log.borrow_mut().push(Call::Present);
            self.frames_left -= 1;
            if self.frames_left == 0 {
                FrameControl::Exit
            } else {
                FrameControl::Continue
            }
        }

        fn shutdown(self) {
            let mut log = self.log.borrow_mut();
            log.push(Call::DeleteBuffers);
            log.push(Call::DeleteVertexArray);
            log.push(Call::DeleteProgram(Pass::One));
            log.push(Call::DeleteProgram(Pass::Two));
            log.push(Call::Terminate);
        }
    }

    fn run_frames(animate_camera: bool, frames: u32) -> Vec<Call> {
        let (backend, log) = MockBackend::new(frames);
        let mut driver = Driver::new(DriverConfig {
            animate_camera,
            frame_interval: None,
        });
        driver.run(backend);
        Rc::try_unwrap(log).unwrap().into_inner()
    }

    #[test]
    fn draws_two_triangles_per_frame_alternating_passes() {
        let frames = 7;
        let log = run_frames(true, frames);
        let draws: Vec<_> = log
            .iter()
            .filter_map(|c| match c {
                Call::Draw { pass, vertices } => Some((*pass, *vertices)),
                _ => None,
            })
            .collect();
        assert_eq!(draws.len(), 2 * frames as usize);
        for pair in draws.chunks(2) {
            assert_eq!(pair, [(Pass::One, 3), (Pass::Two, 3)]);
        }
    }

    #[test]
    fn static_variant_uploads_transform_only_at_startup() {
        let log = run_frames(false, 5);
        let uploads = log
            .iter()
            .filter(|c| matches!(c, Call::Transform(_)))
            .count();
        assert_eq!(uploads, 2);
        // Both uploads happen before the first frame is cleared.
        let first_clear = log.iter().position(|c| *c == Call::Clear).unwrap();
        assert_eq!(
            log[..first_clear]
                .iter()
                .filter(|c| matches!(c, Call::Transform(_)))
                .count(),
            2
        );
    }

    #[test]
    fn orbit_variant_reuploads_transform_every_frame() {
        let frames = 5;
        let log = run_frames(true, frames);
        let uploads = log
            .iter()
            .filter(|c| matches!(c, Call::Transform(_)))
            .count();
        assert_eq!(uploads, 2 + 2 * frames as usize);
    }

    #[test]
    fn passes_are_bound_before_their_uploads_and_draws() {
        let log = run_frames(true, 3);
        let mut bound = None;
        for call in &log {
            match call {
                Call::Bind(pass) => bound = Some(*pass),
                Call::Transform(pass) | Call::Draw { pass, .. } => {
                    assert_eq!(bound, Some(*pass));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn teardown_follows_last_present_in_order() {
        let log = run_frames(true, 4);
        let tail = &log[log.len() - 5..];
        assert_eq!(
            tail,
            [
                Call::DeleteBuffers,
                Call::DeleteVertexArray,
                Call::DeleteProgram(Pass::One),
                Call::DeleteProgram(Pass::Two),
                Call::Terminate,
            ]
        );
        let last_present = log.iter().rposition(|c| *c == Call::Present).unwrap();
        assert_eq!(last_present, log.len() - 6);
    }

    #[test]
    fn exits_as_soon_as_close_is_requested() {
        let log = run_frames(true, 1);
        let presents = log.iter().filter(|c| **c == Call::Present).count();
        assert_eq!(presents, 1);
    }
}
