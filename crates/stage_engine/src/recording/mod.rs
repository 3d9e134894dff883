//! Pose recording
//!
//! The server-side recording pipeline: validated render parameters, the
//! scene-import session, the persisted keyframe store, the placeholder
//! image, and the timeline replay used by the importer.

pub mod params;
pub mod store;
pub mod session;
pub mod placeholder;
pub mod replay;

pub use params::{ImageType, ParamError, RenderParams};
pub use store::{FrameSnapshot, KeyframeStore, PoseSnapshot, StoreError};
pub use session::{RecordError, RecordingSession, SessionConfig};
pub use placeholder::placeholder_png;
pub use replay::{replay_frames, ReplayStats};
