//! Camera path along a bounded circular arc.
//!
//! The camera oscillates on the semicircle `x² + y² = 16` in front of the
//! scene: `x` sweeps between -4 and 4 in fixed steps, `y` follows the
//! circle, and on reaching either end the direction and the vertical sign
//! reverse so the sweep continues along the mirrored arc.

use glam::{Mat4, Vec3, vec3};

/// Radius of the circle the camera moves on.
pub const ORBIT_RADIUS: f32 = 4.0;

/// Horizontal distance covered per step.
pub const ORBIT_STEP: f32 = 0.1;

/// Distance of the camera from the triangle plane.
const CAMERA_Z: f32 = 3.0;

/// Camera position on the arc, looking at the origin.
pub struct OrbitCamera {
    x: f32,
    y: f32,
    step: f32,
    sign: f32,
}

impl OrbitCamera {
    /// Starts at the rightmost point of the arc, moving left.
    pub fn new() -> Self {
        Self {
            x: ORBIT_RADIUS,
            y: 0.0,
            step: ORBIT_STEP,
            sign: 1.0,
        }
    }

    /// Moves one step along the arc, reflecting at the endpoints.
    ///
    /// `x` is clamped into `[-ORBIT_RADIUS, ORBIT_RADIUS]` and the radicand
    /// to zero before the square root, so float drift can never push the
    /// position off the circle's domain.
    pub fn advance(&mut self) {
        self.x -= self.step;
        if self.x < -ORBIT_RADIUS || self.x > ORBIT_RADIUS {
            // Bounce: reverse direction, mirror the arc, restart at an end.
            self.x = self.x.clamp(-ORBIT_RADIUS, ORBIT_RADIUS);
            self.step = -self.step;
            self.sign = -self.sign;
            self.y = 0.0;
        } else {
            let radicand = (ORBIT_RADIUS * ORBIT_RADIUS - self.x * self.x).max(0.0);
            self.y = self.sign * radicand.sqrt();
        }
    }

    pub fn position(&self) -> Vec3 {
        vec3(self.x, self.y, CAMERA_Z)
    }

    /// View matrix looking from the current position at the origin, +Y up.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
