//! Recording session
//!
//! The scene-import adapter: builds a fresh stage per request, imports the
//! request's glTF scene into it, extracts the imported objects' poses, and
//! appends them to the keyframe store. After the first frame the session
//! also exports the stage project that the importer later loads as its base
//! scene.

use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

use thiserror::Error;

use crate::assets::{GltfError, GltfLoader};
use crate::config::{Config, ConfigError};
use crate::foundation::math::{Quat, Vec3};
use crate::recording::params::RenderParams;
use crate::recording::store::{FrameSnapshot, KeyframeStore, PoseSnapshot, StoreError};
use crate::stage::{Stage, StageError, StageSettings};

/// Recording errors
#[derive(Error, Debug)]
pub enum RecordError {
    /// Base stage or export failure
    #[error("stage error: {0}")]
    Stage(#[from] StageError),

    /// Settings file failure
    #[error("settings error: {0}")]
    Settings(#[from] ConfigError),

    /// Scene import failure
    #[error("scene import error: {0}")]
    Import(#[from] GltfError),

    /// Keyframe store failure
    #[error("keyframe store error: {0}")]
    Store(#[from] StoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Base `.stage` project loaded at the start of every request; a fresh
    /// empty stage is used when absent
    pub base_stage: Option<PathBuf>,

    /// Declarative settings overlay applied after the base stage, so the
    /// overlay has priority
    pub settings_file: Option<PathBuf>,

    /// Where to export the stage project after the first recorded frame
    pub export_path: Option<PathBuf>,
}

/// A recording session: one per server process
///
/// The session owns the keyframe store and rebuilds its stage from scratch
/// for every request, so each frame's poses come out of an isolated import
/// rather than a long-lived mutable scene.
#[derive(Debug)]
pub struct RecordingSession {
    config: SessionConfig,
    store: KeyframeStore,
}

impl RecordingSession {
    /// Create a session around an already-constructed store
    #[must_use]
    pub fn new(config: SessionConfig, store: KeyframeStore) -> Self {
        Self { config, store }
    }

    /// The keyframe store
    #[must_use]
    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    /// Record one frame from a render request
    ///
    /// Returns the frame count after the append. Any failure leaves the
    /// store untouched; there is no partial frame.
    pub fn record_frame(&mut self, params: &RenderParams) -> Result<usize, RecordError> {
        let mut stage = self.build_stage()?;

        let imported = GltfLoader::load_objects(&params.scene)?;

        // The loader's up-axis conversion is undone here wholesale, about the
        // world origin, so recorded poses stay in the simulation's own axes.
        // This is an empirical correction for this import pipeline; see the
        // design notes before reusing it elsewhere.
        // TODO: verify the correction against scenes whose root nodes carry
        // their own rotation instead of an identity transform.
        let correction = Quat::from_axis_angle(&Vec3::x_axis(), -FRAC_PI_2);

        let group = stage.settings.import_collection.clone();
        let mut frame = FrameSnapshot::with_capacity(imported.len());
        for mut object in imported {
            object.transform = object.transform.rotated_about_origin(&correction);
            let location = object.location();
            let rotation = object.rotation();
            let name = stage.insert_object(object);
            stage.link_to_collection(&group, &name);
            frame.push(PoseSnapshot {
                name,
                location,
                rotation,
            });
        }

        let frame_count = self.store.append(frame)?;

        if frame_count == 1 {
            if let Some(export_path) = &self.config.export_path {
                if let Some(parent) = export_path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                stage.save(export_path)?;
            }
        }

        Ok(frame_count)
    }

    /// Build the per-request stage: base project plus settings overlay
    fn build_stage(&self) -> Result<Stage, RecordError> {
        let mut stage = match &self.config.base_stage {
            Some(path) => Stage::load(path)?,
            None => Stage::new(),
        };
        if let Some(path) = &self.config.settings_file {
            // Re-read per request so edits apply without a server restart.
            let settings = StageSettings::load_from_file(path)?;
            settings.apply(&mut stage);
        }
        Ok(stage)
    }
}
