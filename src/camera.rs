//! Camera state for pointer projection and picking.
//!
//! The renderer owns the real camera (orbit controls, projection matrix); this
//! mirror carries just enough state for the core to build pointer rays and to
//! persist/restore the viewpoint: position, look-at target, vertical field of
//! view, and aspect ratio.

use glam::Vec3;

/// Step size for the discrete keyboard camera moves.
pub const MOVE_STEP: f32 = 0.5;

/// One discrete camera move, mapped from the arrow keys and q/e.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    /// Toward the scene (-Z).
    In,
    /// Away from the scene (+Z).
    Out,
    Left,
    Right,
    Down,
    Up,
}

/// Perspective camera in LookAt form.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at target; orientation is derived from it.
    pub target: Vec3,
    /// Up vector, Y-up by default.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov,
            aspect,
        }
    }

    /// Unit view direction. Falls back to -Z if the target coincides with the
    /// camera position.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Apply one discrete keyboard move. Only the position moves; the look-at
    /// target stays put.
    pub fn nudge(&mut self, mv: CameraMove) {
        match mv {
            CameraMove::In => self.position.z -= MOVE_STEP,
            CameraMove::Out => self.position.z += MOVE_STEP,
            CameraMove::Left => self.position.x -= MOVE_STEP,
            CameraMove::Right => self.position.x += MOVE_STEP,
            CameraMove::Down => self.position.y -= MOVE_STEP,
            CameraMove::Up => self.position.y += MOVE_STEP,
        }
    }
}

impl Default for Camera {
    /// The bootstrap viewpoint: above and behind the row of objects, looking
    /// at the origin.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO, 75.0, 16.0 / 9.0)
    }
}
