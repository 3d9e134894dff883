//! Stage model
//!
//! The stage is the explicit stand-in for a content-creation tool's
//! process-wide object graph: named objects, collections, scene settings,
//! and the animation timeline, owned as a plain value. A recording session
//! builds one stage per request and passes it around instead of mutating
//! global state.

pub mod object;
pub mod collection;
pub mod timeline;
pub mod settings;

pub use object::StageObject;
pub use collection::Collection;
pub use timeline::{Keyframe, ObjectChannels, Timeline};
pub use settings::{SceneSettings, StageSettings, DEFAULT_IMPORT_COLLECTION};

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Native extension of stage project files
pub const STAGE_EXTENSION: &str = "stage";

/// Stage errors
#[derive(Error, Debug)]
pub enum StageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Project file parse error
    #[error("stage project parse error: {0}")]
    Parse(String),

    /// Project file serialization error
    #[error("stage project serialization error: {0}")]
    Serialize(String),
}

/// A complete stage: objects, collections, settings, and timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Scene-level settings
    pub settings: SceneSettings,

    objects: Vec<StageObject>,
    collections: Vec<Collection>,
    timeline: Timeline,
}

impl Stage {
    /// Create an empty stage
    ///
    /// The analogue of resetting a host tool to factory settings and then
    /// deleting its default content: no objects, no collections, no keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stage project file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StageError> {
        let contents = std::fs::read_to_string(path)?;
        ron::from_str(&contents).map_err(|e| StageError::Parse(e.to_string()))
    }

    /// Save the stage as a project file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StageError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| StageError::Serialize(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Number of objects on the stage
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All objects, in insertion order
    pub fn objects(&self) -> impl Iterator<Item = &StageObject> {
        self.objects.iter()
    }

    /// Look up an object by name
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&StageObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Look up an object by name, mutably
    pub fn object_mut(&mut self, name: &str) -> Option<&mut StageObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Insert an object, deduplicating its name on collision
    ///
    /// Returns the final name, which gets a `.001`-style numeric suffix when
    /// the requested name is already taken.
    pub fn insert_object(&mut self, mut object: StageObject) -> String {
        if self.object(&object.name).is_some() {
            let base = object.name.clone();
            let mut counter = 1u32;
            loop {
                let candidate = format!("{base}.{counter:03}");
                if self.object(&candidate).is_none() {
                    object.name = candidate;
                    break;
                }
                counter += 1;
            }
        }
        let name = object.name.clone();
        self.objects.push(object);
        name
    }

    /// All collections
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    /// Look up a collection by name
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Link an object into a collection, creating the collection on demand
    ///
    /// The object is unlinked from every other collection first, so an
    /// object belongs to at most one collection at a time.
    pub fn link_to_collection(&mut self, collection_name: &str, object_name: &str) {
        for collection in &mut self.collections {
            collection.unlink(object_name);
        }
        if let Some(collection) = self
            .collections
            .iter_mut()
            .find(|c| c.name == collection_name)
        {
            collection.link(object_name);
            return;
        }
        let mut collection = Collection::new(collection_name);
        collection.link(object_name);
        self.collections.push(collection);
    }

    /// The animation timeline
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The animation timeline, mutably
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};

    fn object(name: &str) -> StageObject {
        StageObject::new(name, Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
    }

    #[test]
    fn test_insert_deduplicates_names() {
        let mut stage = Stage::new();

        let first = stage.insert_object(object("box"));
        let second = stage.insert_object(object("box"));
        let third = stage.insert_object(object("box"));

        assert_eq!(first, "box");
        assert_eq!(second, "box.001");
        assert_eq!(third, "box.002");
        assert_eq!(stage.object_count(), 3);
    }

    #[test]
    fn test_link_moves_between_collections() {
        let mut stage = Stage::new();
        stage.insert_object(object("box"));

        stage.link_to_collection("first", "box");
        stage.link_to_collection("second", "box");

        assert!(!stage.collection("first").expect("first").contains("box"));
        assert!(stage.collection("second").expect("second").contains("box"));
    }

    #[test]
    fn test_project_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scene.stage");

        let mut stage = Stage::new();
        stage.insert_object(object("box"));
        stage.link_to_collection(DEFAULT_IMPORT_COLLECTION, "box");
        stage.timeline_mut().set_current_frame(2);
        stage
            .timeline_mut()
            .key_location("box", Vec3::new(0.5, 0.5, 0.5));
        stage.save(&path).expect("save stage");

        let loaded = Stage::load(&path).expect("load stage");
        assert_eq!(loaded, stage);
    }
}
