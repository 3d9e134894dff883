//! Keyframe store
//!
//! The ordered list of per-frame pose snapshots and its backing file. The
//! whole list is rewritten after every appended frame; persistence cost is
//! linear in the number of frames seen so far, an accepted inefficiency of
//! the recording protocol.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{Quat, Vec3};

/// Extension expected of keyframe dump files
pub const DUMP_EXTENSION: &str = "ron";

/// Keyframe store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The dump path belongs to a prior run
    #[error("keyframe dump path '{}' already exists", .0.display())]
    PathExists(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame list serialization error
    #[error("frame list serialization error: {0}")]
    Serialize(String),

    /// Frame list parse error
    #[error("frame list parse error: {0}")]
    Parse(String),
}

/// One object's pose within a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    /// Object name; the join key when the frame list is imported
    pub name: String,

    /// World-space location
    pub location: Vec3,

    /// World-space orientation
    pub rotation: Quat,
}

/// All object poses of a single simulation time step
pub type FrameSnapshot = Vec<PoseSnapshot>;

/// The in-memory frame list plus its backing file
#[derive(Debug)]
pub struct KeyframeStore {
    dump_path: PathBuf,
    frames: Vec<FrameSnapshot>,
}

impl KeyframeStore {
    /// Create a store backed by `dump_path`
    ///
    /// Fails if the path already exists, so a new run can never silently
    /// clobber the recording of a prior one.
    pub fn create(dump_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dump_path = dump_path.into();
        if dump_path.exists() {
            return Err(StoreError::PathExists(dump_path));
        }
        Ok(Self {
            dump_path,
            frames: Vec::new(),
        })
    }

    /// Append one frame and rewrite the persisted blob
    ///
    /// Returns the new frame count. If persisting fails the frame is rolled
    /// back, keeping the list length equal to the number of frames on disk.
    pub fn append(&mut self, frame: FrameSnapshot) -> Result<usize, StoreError> {
        self.frames.push(frame);
        if let Err(error) = self.persist() {
            self.frames.pop();
            return Err(error);
        }
        Ok(self.frames.len())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let contents = ron::ser::to_string_pretty(&self.frames, ron::ser::PrettyConfig::default())
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.dump_path, contents)?;
        Ok(())
    }

    /// Number of recorded frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The backing file path
    #[must_use]
    pub fn dump_path(&self) -> &Path {
        &self.dump_path
    }

    /// Read a persisted frame list back from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<FrameSnapshot>, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        ron::from_str(&contents).map_err(|e| StoreError::Parse(e.to_string()))
    }
}
