//! Motion document serialization.
//!
//! The persisted form is a small JSON object:
//!
//! ```json
//! {
//!   "cameraPosition": { "x": 0.0, "y": 10.0, "z": 20.0 },
//!   "motionPath": [ { "x": 0.0, "y": 0.5, "z": 0.0 }, ... ]
//! }
//! ```
//!
//! `cameraPosition` is optional (restoration becomes a no-op without it);
//! `motionPath` is required and never empty when written. Documents are saved
//! as `<Name>_scene.json` and the load side infers the target object from the
//! chosen file name by case-insensitive substring match.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::SessionError;
use crate::scene::{SceneObject, SceneRegistry, StemId};

/// A 3D point in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDoc {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for PointDoc {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<PointDoc> for Vec3 {
    fn from(p: PointDoc) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// The persisted motion document: one recorded path plus the viewpoint it was
/// recorded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionDocument {
    /// Viewpoint at save time. Optional on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_position: Option<PointDoc>,

    /// The recorded path. Required; rejected structurally when absent.
    pub motion_path: Vec<PointDoc>,
}

/// Outcome of a successful [`load`]: which object received the path and the
/// viewpoint to restore, if the document carried one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOutcome {
    pub target: StemId,
    pub camera_position: Option<Vec3>,
}

impl MotionDocument {
    /// Capture an object's recorded path and the camera position by value.
    ///
    /// Errors with [`SessionError::EmptyPath`] when the object has no
    /// recording; empty paths are never serialized.
    pub fn capture(object: &SceneObject, camera: &Camera) -> Result<Self, SessionError> {
        if object.path.is_empty() {
            return Err(SessionError::EmptyPath(object.id));
        }
        Ok(Self {
            camera_position: Some(camera.position.into()),
            motion_path: object.path.iter().copied().map(PointDoc::from).collect(),
        })
    }

    /// Parse a document from JSON text.
    pub fn parse(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render to two-space-indented JSON, matching the save format.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Install this document's path on the target object: the path is copied
    /// in, the cursor resets to 0, and the object returns to its *seed*
    /// position (not the first path point) — the loaded path takes effect
    /// only once playback or recording resumes.
    ///
    /// Returns the camera position to restore, if present.
    pub fn apply_to(&self, registry: &mut SceneRegistry, target: StemId) -> Option<Vec3> {
        let obj = registry.get_mut(target);
        obj.set_path(self.motion_path.iter().copied().map(Vec3::from).collect());
        obj.rewind();
        self.camera_position.map(Vec3::from)
    }
}

/// Conventional save file name for an object's document.
pub fn file_name(id: StemId) -> String {
    format!("{}_scene.json", id.name())
}

/// Infer which object a document file targets from its name,
/// case-insensitively. `bass_scene.json` and `My-BASS-take2.json` both map to
/// Bass.
pub fn infer_target(file_name: &str) -> Result<StemId, SessionError> {
    let lowered = file_name.to_lowercase();
    StemId::ALL
        .into_iter()
        .find(|id| lowered.contains(&id.name().to_lowercase()))
        .ok_or_else(|| SessionError::NoMatchingObject(file_name.to_string()))
}

/// Full load flow: parse `contents`, infer the target from `file_name`, and
/// install the path. Any failure leaves the registry untouched.
pub fn load(
    registry: &mut SceneRegistry,
    file_name: &str,
    contents: &str,
) -> Result<LoadOutcome, SessionError> {
    let document = MotionDocument::parse(contents)?;
    let target = infer_target(file_name)?;
    let camera_position = document.apply_to(registry, target);
    log::info!(
        "loaded {} path points into {} from `{}`",
        document.motion_path.len(),
        target,
        file_name
    );
    Ok(LoadOutcome {
        target,
        camera_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_rejects_empty_path() {
        let registry = SceneRegistry::new();
        let camera = Camera::default();
        let err = MotionDocument::capture(registry.get(StemId::Melody), &camera).unwrap_err();
        assert!(matches!(err, SessionError::EmptyPath(StemId::Melody)));
    }

    #[test]
    fn test_round_trip_preserves_path_and_camera() {
        let mut registry = SceneRegistry::new();
        let camera = Camera::default();
        let path = vec![
            Vec3::new(0.25, 1.5, -3.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-8.125, 0.5, 9.75),
        ];
        registry.get_mut(StemId::Vocals).set_path(path.clone());

        let doc = MotionDocument::capture(registry.get(StemId::Vocals), &camera).unwrap();
        let json = doc.to_json().unwrap();
        let parsed = MotionDocument::parse(&json).unwrap();

        let restored: Vec<Vec3> = parsed.motion_path.iter().copied().map(Vec3::from).collect();
        assert_eq!(restored, path);
        assert_eq!(Vec3::from(parsed.camera_position.unwrap()), camera.position);
    }

    #[test]
    fn test_wire_field_names() {
        let mut registry = SceneRegistry::new();
        registry.get_mut(StemId::Drums).set_path(vec![Vec3::ONE]);
        let doc =
            MotionDocument::capture(registry.get(StemId::Drums), &Camera::default()).unwrap();
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"cameraPosition\""));
        assert!(json.contains("\"motionPath\""));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(
            MotionDocument::parse("not json at all"),
            Err(SessionError::MalformedDocument(_))
        ));
        // Structurally valid JSON missing the required motionPath field.
        assert!(matches!(
            MotionDocument::parse(r#"{ "cameraPosition": { "x": 0, "y": 0, "z": 0 } }"#),
            Err(SessionError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_camera_position_is_optional() {
        let doc = MotionDocument::parse(
            r#"{ "motionPath": [ { "x": 1.0, "y": 2.0, "z": 3.0 } ] }"#,
        )
        .unwrap();
        assert!(doc.camera_position.is_none());
        assert_eq!(doc.motion_path.len(), 1);
    }

    #[test]
    fn test_file_name_convention_and_inference() {
        assert_eq!(file_name(StemId::Bass), "Bass_scene.json");
        assert_eq!(infer_target("Bass_scene.json").unwrap(), StemId::Bass);
        assert_eq!(infer_target("my-VOCALS-take2.json").unwrap(), StemId::Vocals);
        assert!(matches!(
            infer_target("untitled.json"),
            Err(SessionError::NoMatchingObject(_))
        ));
    }

    #[test]
    fn test_load_targets_object_and_leaves_camera_choice_to_caller() {
        let mut registry = SceneRegistry::new();
        let contents = r#"{
            "motionPath": [
                { "x": 1.0, "y": 0.5, "z": 0.0 },
                { "x": 2.0, "y": 0.5, "z": 0.0 },
                { "x": 3.0, "y": 0.5, "z": 0.0 },
                { "x": 4.0, "y": 0.5, "z": 0.0 }
            ]
        }"#;

        let outcome = load(&mut registry, "bass_scene.json", contents).unwrap();
        assert_eq!(outcome.target, StemId::Bass);
        assert_eq!(outcome.camera_position, None);

        let bass = registry.get(StemId::Bass);
        assert_eq!(bass.path.len(), 4);
        assert_eq!(bass.cursor, 0);
        // Loading repositions to the seed position, not the first path point.
        assert_eq!(bass.position, bass.initial_position());
    }

    #[test]
    fn test_failed_load_leaves_registry_untouched() {
        let mut registry = SceneRegistry::new();
        registry.get_mut(StemId::Bass).set_path(vec![Vec3::ONE]);

        assert!(load(&mut registry, "bass_scene.json", "{ broken").is_err());
        assert!(load(&mut registry, "untitled.json", r#"{ "motionPath": [] }"#).is_err());
        assert_eq!(registry.get(StemId::Bass).path, vec![Vec3::ONE]);
    }
}
