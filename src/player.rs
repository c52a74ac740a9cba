//! Motion playback: per-object cursor advancement.
//!
//! Each object loops its own path independently. One call per rendered frame
//! moves the object to `path[cursor]` and steps the cursor modulo the path
//! length, so paths of different lengths drift in and out of phase rather
//! than synchronizing. A length-1 path simply freezes the object at its
//! single point.

use crate::scene::{SceneObject, SceneRegistry, StemId};

/// Advance one object a single playback step. No-op for an empty path.
pub fn advance(obj: &mut SceneObject) {
    if obj.path.is_empty() {
        return;
    }
    obj.position = obj.path[obj.cursor];
    obj.cursor = (obj.cursor + 1) % obj.path.len();
}

/// Advance every object with a recorded path, except `skip` (the object
/// currently being recorded, when recording is layered over playback).
pub fn advance_all(registry: &mut SceneRegistry, skip: Option<StemId>) {
    for obj in registry.iter_mut() {
        if Some(obj.id) == skip {
            continue;
        }
        advance(obj);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cursor_wraps_modulo_length() {
        let mut registry = SceneRegistry::new();
        let path = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        registry.get_mut(StemId::Drums).set_path(path.clone());

        for k in 0..7 {
            assert_eq!(registry.get(StemId::Drums).cursor, k % 3);
            advance(registry.get_mut(StemId::Drums));
            assert_eq!(registry.get(StemId::Drums).position, path[k % 3]);
        }
    }

    #[test]
    fn test_cursors_advance_independently() {
        let mut registry = SceneRegistry::new();
        registry
            .get_mut(StemId::Drums)
            .set_path(vec![Vec3::ZERO, Vec3::ONE]);
        registry
            .get_mut(StemId::Bass)
            .set_path(vec![Vec3::ZERO, Vec3::ONE, Vec3::ZERO]);

        for _ in 0..5 {
            advance_all(&mut registry, None);
        }
        assert_eq!(registry.get(StemId::Drums).cursor, 5 % 2);
        assert_eq!(registry.get(StemId::Bass).cursor, 5 % 3);
        // Objects without a path never move.
        let melody = registry.get(StemId::Melody);
        assert_eq!(melody.position, melody.initial_position());
        assert_eq!(melody.cursor, 0);
    }

    #[test]
    fn test_single_point_path_freezes_object() {
        let mut registry = SceneRegistry::new();
        let point = Vec3::new(4.0, 5.0, 6.0);
        registry.get_mut(StemId::Piano).set_path(vec![point]);

        for _ in 0..3 {
            advance_all(&mut registry, None);
            let obj = registry.get(StemId::Piano);
            assert_eq!(obj.position, point);
            assert_eq!(obj.cursor, 0);
        }
    }

    #[test]
    fn test_skip_leaves_recorded_object_alone() {
        let mut registry = SceneRegistry::new();
        registry
            .get_mut(StemId::Vocals)
            .set_path(vec![Vec3::ONE, Vec3::ZERO]);
        registry
            .get_mut(StemId::Bass)
            .set_path(vec![Vec3::ONE, Vec3::ZERO]);

        advance_all(&mut registry, Some(StemId::Vocals));
        assert_eq!(registry.get(StemId::Vocals).cursor, 0);
        assert_eq!(registry.get(StemId::Bass).cursor, 1);
    }
}
