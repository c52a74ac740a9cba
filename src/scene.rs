//! Scene object registry for the five stem objects.
//!
//! This module holds the domain state of the scene: which objects exist, where
//! they are, and what motion each has recorded. Rendering-specific handles
//! (meshes, audio nodes) live with the render collaborator and are looked up
//! by the same [`StemId`].

use std::fmt;
use std::path::PathBuf;

use glam::Vec3;

/// Stable identity for the five stem objects. The set is fixed for the
/// lifetime of the process; no objects are created or destroyed after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StemId {
    Drums,
    Bass,
    Melody,
    Vocals,
    Piano,
}

impl StemId {
    /// All stem identities in registry order.
    pub const ALL: [StemId; 5] = [
        StemId::Drums,
        StemId::Bass,
        StemId::Melody,
        StemId::Vocals,
        StemId::Piano,
    ];

    /// Display name, also used in saved file names.
    pub fn name(&self) -> &'static str {
        match self {
            StemId::Drums => "Drums",
            StemId::Bass => "Bass",
            StemId::Melody => "Melody",
            StemId::Vocals => "Vocals",
            StemId::Piano => "Piano",
        }
    }
}

impl fmt::Display for StemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape descriptor for an object. Consumed by the render collaborator for
/// mesh construction; the core only uses the bounding radius for picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Sphere,
    Cone,
    Torus,
    Cylinder,
}

impl Shape {
    /// Bounding-sphere radius for ray picking, sized to the ~1-unit
    /// primitives the scene uses (box half-diagonal, sphere radius, etc.).
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Shape::Box => 0.87,
            Shape::Sphere => 0.5,
            Shape::Cone => 0.71,
            Shape::Torus => 0.7,
            Shape::Cylinder => 0.71,
        }
    }
}

/// One stem object: identity, presentation hints, current transform, and its
/// recorded motion path with the per-object playback cursor.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: StemId,
    pub shape: Shape,
    /// Base color as 0xRRGGBB, consumed by the render collaborator.
    pub color: u32,
    /// Current world position.
    pub position: Vec3,
    /// Seed position. Set once at construction and never mutated; rewind
    /// copies it back into `position`.
    initial_position: Vec3,
    /// Recorded motion path. Empty means "no recording".
    pub path: Vec<Vec3>,
    /// Playback cursor into `path`. Always `< path.len()` when the path is
    /// non-empty, and 0 when it is empty.
    pub cursor: usize,
    /// Separated stem file attached to this object, once loaded.
    pub audio_source: Option<PathBuf>,
}

impl SceneObject {
    fn new(id: StemId, shape: Shape, color: u32, position: Vec3) -> Self {
        Self {
            id,
            shape,
            color,
            position,
            initial_position: position,
            path: Vec::new(),
            cursor: 0,
            audio_source: None,
        }
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Replace the recorded path wholesale. Resets the cursor so the
    /// cursor-bounds invariant holds for the new length.
    pub fn set_path(&mut self, path: Vec<Vec3>) {
        self.path = path;
        self.cursor = 0;
    }

    /// Drop the recorded path and return to the seed position.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.cursor = 0;
        self.position = self.initial_position;
    }

    /// Return to the seed position and rewind the cursor. The path itself is
    /// left intact.
    pub fn rewind(&mut self) {
        self.position = self.initial_position;
        self.cursor = 0;
    }
}

/// The fixed registry of five stem objects, in [`StemId::ALL`] order.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    objects: [SceneObject; 5],
}

impl SceneRegistry {
    /// Build the registry with the standard scene layout: the five stems in a
    /// row along X at y = 0.5.
    pub fn new() -> Self {
        Self {
            objects: [
                SceneObject::new(StemId::Drums, Shape::Box, 0xff0000, Vec3::new(-8.0, 0.5, 0.0)),
                SceneObject::new(StemId::Bass, Shape::Sphere, 0x00ff00, Vec3::new(-4.0, 0.5, 0.0)),
                SceneObject::new(StemId::Melody, Shape::Cone, 0x0000ff, Vec3::new(0.0, 0.5, 0.0)),
                SceneObject::new(StemId::Vocals, Shape::Torus, 0xffff00, Vec3::new(4.0, 0.5, 0.0)),
                SceneObject::new(StemId::Piano, Shape::Cylinder, 0x800080, Vec3::new(8.0, 0.5, 0.0)),
            ],
        }
    }

    pub fn get(&self, id: StemId) -> &SceneObject {
        &self.objects[id as usize]
    }

    pub fn get_mut(&mut self, id: StemId) -> &mut SceneObject {
        &mut self.objects[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Reposition one object at its seed position with its cursor rewound.
    pub fn rewind(&mut self, id: StemId) {
        self.get_mut(id).rewind();
    }

    /// Rewind every object.
    pub fn rewind_all(&mut self) {
        for obj in self.objects.iter_mut() {
            obj.rewind();
        }
    }

    /// Drop one object's recorded path and return it to its seed position.
    pub fn clear_path(&mut self, id: StemId) {
        self.get_mut(id).clear_path();
    }

    /// Attach a loaded stem file to an object.
    pub fn attach_audio(&mut self, id: StemId, source: PathBuf) {
        log::info!("attaching audio source {:?} to {}", source, id);
        self.get_mut(id).audio_source = Some(source);
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
