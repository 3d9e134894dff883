//! # Stage Engine
//!
//! A headless stage and animation timeline engine for recording simulation
//! poses. The crate models a content-creation "stage" — named objects,
//! collections, and a keyframe timeline — without any rendering backend.
//!
//! ## Features
//!
//! - **Stage Model**: Named objects with transforms, grouped into collections
//! - **Animation Timeline**: Per-object location and rotation keyframe channels
//! - **glTF Import**: Scene files become stage objects with composed transforms
//! - **Pose Recording**: Per-frame pose snapshots persisted after every frame
//! - **Project Files**: Stages round-trip through a RON-based `.stage` format
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stage_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = KeyframeStore::create("poses.ron")?;
//!     let mut session = RecordingSession::new(SessionConfig::default(), store);
//!
//!     let params = RenderParams::minimal("scene.gltf", ImageType::Color, 640, 480);
//!     let frame_count = session.record_frame(&params)?;
//!     println!("recorded frame {frame_count}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod stage;
pub mod assets;
pub mod recording;

pub use foundation::math::{Mat3, Mat4, Quat, Transform, Vec3};
pub use stage::{Stage, StageError, StageObject, StageSettings, Timeline};
pub use recording::{
    FrameSnapshot, ImageType, KeyframeStore, PoseSnapshot, RecordError, RecordingSession,
    RenderParams, SessionConfig,
};

/// Commonly used types for working with the recording pipeline
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::foundation::math::{Quat, Transform, Vec3};
    pub use crate::recording::{
        FrameSnapshot, ImageType, KeyframeStore, PoseSnapshot, RecordError, RecordingSession,
        RenderParams, SessionConfig,
    };
    pub use crate::stage::{Stage, StageObject, StageSettings, Timeline};
}
