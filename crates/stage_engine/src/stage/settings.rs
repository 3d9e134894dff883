//! Stage settings
//!
//! `SceneSettings` is the settings block stored inside every stage.
//! `StageSettings` is the optional declarative overlay loaded from a
//! `--settings-file` and applied on top of a freshly built session stage.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::stage::Stage;

/// Default name for the collection that imported objects are linked into
pub const DEFAULT_IMPORT_COLLECTION: &str = "RecordedObjects";

/// Settings stored inside a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Playback frame rate in frames per second
    pub frame_rate: u32,

    /// Scale factor from scene units to meters
    pub unit_scale: f64,

    /// Collection that scene imports are grouped into
    pub import_collection: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            unit_scale: 1.0,
            import_collection: DEFAULT_IMPORT_COLLECTION.to_owned(),
        }
    }
}

/// Declarative settings overlay for a recording session
///
/// Only the fields present in the settings file are applied; everything else
/// keeps the value from the base stage. This replaces the host-scripting
/// hook of tools that let a settings file run arbitrary code against their
/// API — here the surface is data, not code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Override the playback frame rate
    pub frame_rate: Option<u32>,

    /// Override the unit scale
    pub unit_scale: Option<f64>,

    /// Override the import collection name
    pub import_collection: Option<String>,
}

impl Config for StageSettings {}

impl StageSettings {
    /// Apply the overlay to a stage
    pub fn apply(&self, stage: &mut Stage) {
        if let Some(frame_rate) = self.frame_rate {
            stage.settings.frame_rate = frame_rate;
        }
        if let Some(unit_scale) = self.unit_scale {
            stage.settings.unit_scale = unit_scale;
        }
        if let Some(collection) = &self.import_collection {
            stage.settings.import_collection = collection.clone();
        }
    }
}
