//! The motion session: recorder state machine, selection, and playback.
//!
//! One `Session` owns the scene registry and the three process-wide flags
//! (recorder state, playback toggle, camera-rotation lock), so the whole
//! state machine is testable without a renderer. The render loop drives it
//! with exactly one [`Session::tick`] per frame plus the discrete commands
//! wired to UI events.
//!
//! Mutual exclusion between recording and playback is enforced here: playback
//! never advances outside `Idle`, and entering `Armed` forces playback off.

use glam::Vec2;

use crate::camera::Camera;
use crate::error::SessionError;
use crate::player;
use crate::projector::{self, ObjectPicker};
use crate::scene::{SceneRegistry, StemId};

/// Recorder lifecycle. Process-wide: only one object records at a time,
/// matching the single selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// No recording activity.
    #[default]
    Idle,
    /// Recording requested and a target selected; waiting for the press that
    /// starts sampling.
    Armed,
    /// Pointer samples are appended to the selected object's path each frame.
    Recording,
}

/// Interactive session over the scene registry.
#[derive(Debug)]
pub struct Session {
    registry: SceneRegistry,
    selection: Option<StemId>,
    recorder: RecorderState,
    playing: bool,
    camera_rotation_enabled: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            registry: SceneRegistry::new(),
            selection: None,
            recorder: RecorderState::Idle,
            playing: false,
            camera_rotation_enabled: true,
        }
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    pub fn selection(&self) -> Option<StemId> {
        self.selection
    }

    pub fn recorder_state(&self) -> RecorderState {
        self.recorder
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the render layer should allow orbit rotation. Disabled for the
    /// whole recording session so drags sample motion instead of moving the
    /// camera.
    pub fn camera_rotation_enabled(&self) -> bool {
        self.camera_rotation_enabled
    }

    /// Change (or clear) the selection. Always permitted at this layer; the
    /// UI protocol is expected not to switch targets mid-recording.
    pub fn select(&mut self, target: Option<StemId>) {
        if let Some(id) = target {
            log::debug!("selected {}", id);
        }
        self.selection = target;
    }

    /// Request a recording session for the selected object: `Idle` → `Armed`.
    ///
    /// Halts playback and locks camera rotation for the duration. Errors with
    /// [`SessionError::NoSelection`] when nothing is selected; a no-op outside
    /// `Idle`.
    pub fn request_start(&mut self) -> Result<(), SessionError> {
        if self.recorder != RecorderState::Idle {
            log::debug!("record start ignored in {:?}", self.recorder);
            return Ok(());
        }
        if self.selection.is_none() {
            return Err(SessionError::NoSelection);
        }
        self.playing = false;
        self.recorder = RecorderState::Armed;
        self.camera_rotation_enabled = false;
        Ok(())
    }

    /// End the recording session unconditionally: any state → `Idle`, camera
    /// rotation re-enabled.
    pub fn request_stop(&mut self) {
        self.recorder = RecorderState::Idle;
        self.camera_rotation_enabled = true;
    }

    /// Handle a pointer press. What it means depends on the recorder state:
    ///
    /// - `Armed`: start sampling. The selected object's previous path is
    ///   discarded first; there is no append mode.
    /// - `Recording`: pen up; pause sampling without ending the session.
    /// - `Idle`: pick. The nearest object under the pointer becomes the
    ///   selection; a miss clears it.
    pub fn pointer_press(&mut self, pointer: Vec2, picker: &dyn ObjectPicker) {
        match self.recorder {
            RecorderState::Armed => {
                if let Some(id) = self.selection {
                    let obj = self.registry.get_mut(id);
                    obj.path.clear();
                    obj.cursor = 0;
                    self.recorder = RecorderState::Recording;
                }
            }
            RecorderState::Recording => {
                self.recorder = RecorderState::Armed;
            }
            RecorderState::Idle => {
                self.select(picker.pick(&self.registry, pointer));
            }
        }
    }

    /// Per-frame update, called once per rendered frame.
    ///
    /// While `Recording`, the pointer is projected onto the plane through the
    /// selected object; a hit moves the object there and appends one sample
    /// (a miss appends nothing this frame). Every *other* object with a path
    /// keeps looping underneath, which is what makes layered multi-track
    /// choreography possible. While `Idle` with playback on, all objects with
    /// paths advance one step.
    pub fn tick(&mut self, pointer: Vec2, camera: &Camera) {
        match self.recorder {
            RecorderState::Recording => {
                if let Some(id) = self.selection {
                    let reference = self.registry.get(id).position;
                    if let Some(point) = projector::project_pointer(camera, pointer, reference) {
                        let obj = self.registry.get_mut(id);
                        obj.position = point;
                        obj.path.push(point);
                    }
                    player::advance_all(&mut self.registry, Some(id));
                }
            }
            RecorderState::Idle if self.playing => {
                player::advance_all(&mut self.registry, None);
            }
            _ => {}
        }
    }

    /// Flip the playback toggle and return the new state. Rejected (no state
    /// change) while the recorder is not `Idle`.
    pub fn toggle_playback(&mut self) -> bool {
        if self.recorder != RecorderState::Idle {
            log::debug!("playback toggle rejected while recording");
            return self.playing;
        }
        self.playing = !self.playing;
        self.playing
    }

    /// Stop playback and return the selected object to its seed position with
    /// its cursor rewound.
    pub fn rewind_selected(&mut self) -> Result<(), SessionError> {
        let id = self.selection.ok_or(SessionError::NoSelection)?;
        self.playing = false;
        self.registry.rewind(id);
        Ok(())
    }

    /// Stop playback and rewind every object.
    pub fn rewind_all(&mut self) {
        self.playing = false;
        self.registry.rewind_all();
    }

    /// Stop playback and erase the selected object's recorded path.
    pub fn clear_path(&mut self) -> Result<(), SessionError> {
        let id = self.selection.ok_or(SessionError::NoSelection)?;
        self.playing = false;
        self.registry.clear_path(id);
        log::info!("cleared recorded path for {}", id);
        Ok(())
    }

}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
