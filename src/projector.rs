//! Pointer projection and ray picking.
//!
//! Two pieces of ray math drive all pointer interaction:
//!
//! - **Projection**: while recording, the 2D pointer is projected onto a plane
//!   that faces the camera and passes through the recorded object, so dragging
//!   tracks naturally as the camera orbits.
//! - **Picking**: while idle, a pointer press ray-tests the objects and the
//!   nearest hit becomes the selection.
//!
//! The plane is rebuilt from the live camera and object positions on every
//! call; nothing here caches or mutates state.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::scene::{SceneRegistry, StemId};

/// Rays whose direction is closer than this to perpendicular with the plane
/// normal are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Intersect with the plane through `point` with unit normal `normal`.
    ///
    /// Returns `None` when the ray is parallel to the plane or the
    /// intersection lies behind the origin. Callers treat `None` as a
    /// skip-this-frame condition, never as an error.
    pub fn intersect_plane(&self, normal: Vec3, point: Vec3) -> Option<Vec3> {
        let denom = self.dir.dot(normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.origin + self.dir * t)
    }

    /// Distance along the ray to the nearest hit on a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        // Unit direction, so the quadratic's leading coefficient is 1.
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        if t_near >= 0.0 {
            return Some(t_near);
        }
        let t_far = -b + sqrt_d;
        if t_far >= 0.0 {
            // Origin inside the sphere.
            return Some(t_far);
        }
        None
    }
}

/// Build the world-space ray through a pointer position in normalized device
/// coordinates (`x, y` in `[-1, 1]`, y up).
pub fn pointer_ray(camera: &Camera, pointer: Vec2) -> Ray {
    let forward = camera.forward();
    let right = forward.cross(camera.up).normalize();
    let up = right.cross(forward);
    let half_height = (camera.fov.to_radians() * 0.5).tan();
    let half_width = half_height * camera.aspect;
    let dir = (forward + right * (pointer.x * half_width) + up * (pointer.y * half_height))
        .normalize();
    Ray {
        origin: camera.position,
        dir,
    }
}

/// Project the pointer onto the recording plane for `reference`: the plane
/// faces the camera (normal = view direction) and passes through the
/// reference point. Recomputed from scratch each call so it re-orients as the
/// camera or the object moves.
pub fn project_pointer(camera: &Camera, pointer: Vec2, reference: Vec3) -> Option<Vec3> {
    pointer_ray(camera, pointer).intersect_plane(camera.forward(), reference)
}

/// Abstract pick capability the session depends on. The render layer supplies
/// one backed by its real meshes; [`SpherePicker`] is the headless stand-in.
pub trait ObjectPicker {
    /// Hit-test the pointer against the scene. The nearest hit wins; a miss
    /// returns `None`.
    fn pick(&self, registry: &SceneRegistry, pointer: Vec2) -> Option<StemId>;
}

/// Picker that ray-tests each object's bounding sphere at its current
/// position.
pub struct SpherePicker<'a> {
    camera: &'a Camera,
}

impl<'a> SpherePicker<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self { camera }
    }
}

impl ObjectPicker for SpherePicker<'_> {
    fn pick(&self, registry: &SceneRegistry, pointer: Vec2) -> Option<StemId> {
        let ray = pointer_ray(self.camera, pointer);
        let mut nearest: Option<(f32, StemId)> = None;
        for obj in registry.iter() {
            if let Some(t) = ray.intersect_sphere(obj.position, obj.shape.bounding_radius()) {
                if nearest.map_or(true, |(best, _)| t < best) {
                    nearest = Some((t, obj.id));
                }
            }
        }
        nearest.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_camera() -> Camera {
        // Straight down the -Z axis with a square 90 degree frustum, so the
        // ray math has easy closed-form answers.
        Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 90.0, 1.0)
    }

    #[test]
    fn test_center_ray_hits_reference_plane() {
        let camera = axis_camera();
        let hit = project_pointer(&camera, Vec2::ZERO, Vec3::ZERO).unwrap();
        assert!(hit.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_edge_ray_direction() {
        let camera = axis_camera();
        let ray = pointer_ray(&camera, Vec2::new(1.0, 0.0));
        // fov 90, aspect 1: the right edge ray leans 45 degrees off axis.
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!(ray.dir.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_offset_pointer_lands_on_plane() {
        let camera = axis_camera();
        let reference = Vec3::new(0.0, 0.0, 0.0);
        let hit = project_pointer(&camera, Vec2::new(0.5, -0.25), reference).unwrap();
        // The recording plane is z = 0 here; fov 90 at distance 10 spans
        // 10 units per half screen.
        assert!((hit.z - 0.0).abs() < 1e-4);
        assert!((hit.x - 5.0).abs() < 1e-4);
        assert!((hit.y - -2.5).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            dir: Vec3::X,
        };
        // Plane normal perpendicular to the ray direction.
        assert!(ray.intersect_plane(Vec3::Y, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        assert!(ray.intersect_plane(Vec3::NEG_Z, Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_sphere_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            dir: Vec3::NEG_Z,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        // Sphere entirely behind the origin.
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn test_picker_selects_nearest() {
        let mut registry = SceneRegistry::new();
        let camera = axis_camera();
        // Put Drums directly in front of Bass on the view axis.
        registry.get_mut(StemId::Bass).position = Vec3::new(0.0, 0.0, 0.0);
        registry.get_mut(StemId::Drums).position = Vec3::new(0.0, 0.0, 5.0);
        registry.get_mut(StemId::Melody).position = Vec3::new(50.0, 0.0, 0.0);

        let picker = SpherePicker::new(&camera);
        assert_eq!(picker.pick(&registry, Vec2::ZERO), Some(StemId::Drums));
    }

    #[test]
    fn test_picker_miss_returns_none() {
        let registry = SceneRegistry::new();
        let camera = axis_camera();
        let picker = SpherePicker::new(&camera);
        // Top-left corner: nothing up there in the default layout.
        assert_eq!(picker.pick(&registry, Vec2::new(-1.0, 1.0)), None);
    }
}
