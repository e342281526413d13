//! Visual side of the tray
//!
//! The session reports what happened to each die through [`SceneSink`]. The
//! viewer turns these calls into entities; headless hosts pass `()` and the
//! calls vanish. [`RecordingScene`] keeps them for inspection.

use crate::tray::physics::Pose;
use crate::tray::types::{DieId, Polyhedron};

pub trait SceneSink {
    fn add_die(&mut self, id: DieId, polyhedron: &Polyhedron);

    fn remove_die(&mut self, id: DieId);

    fn sync_pose(&mut self, id: DieId, pose: Pose);

    /// Relabel a die whose value is not printed on its geometry (d100).
    fn show_value(&mut self, id: DieId, value: u32);
}

impl SceneSink for () {
    fn add_die(&mut self, _id: DieId, _polyhedron: &Polyhedron) {}

    fn remove_die(&mut self, _id: DieId) {}

    fn sync_pose(&mut self, _id: DieId, _pose: Pose) {}

    fn show_value(&mut self, _id: DieId, _value: u32) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum VisualCommand {
    Add { id: DieId, face_count: usize },
    Remove(DieId),
    Sync { id: DieId, pose: Pose },
    ShowValue { id: DieId, value: u32 },
}

/// Scene sink that records every command in order
#[derive(Clone, Debug, Default)]
pub struct RecordingScene {
    commands: Vec<VisualCommand>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[VisualCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn drain(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl SceneSink for RecordingScene {
    fn add_die(&mut self, id: DieId, polyhedron: &Polyhedron) {
        self.commands.push(VisualCommand::Add {
            id,
            face_count: polyhedron.faces.len(),
        });
    }

    fn remove_die(&mut self, id: DieId) {
        self.commands.push(VisualCommand::Remove(id));
    }

    fn sync_pose(&mut self, id: DieId, pose: Pose) {
        self.commands.push(VisualCommand::Sync { id, pose });
    }

    fn show_value(&mut self, id: DieId, value: u32) {
        self.commands.push(VisualCommand::ShowValue { id, value });
    }
}
