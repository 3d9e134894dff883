//! Stage objects
//!
//! A stage object is a named transform. Geometry, materials, and other
//! payloads live in the source scene files; the stage only tracks what the
//! recording pipeline needs to key and replay poses.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Transform, Vec3};

/// A named object on the stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageObject {
    /// Object name, unique within a stage
    pub name: String,

    /// World-space transform
    pub transform: Transform,
}

impl StageObject {
    /// Create a new object from a name and transform
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }

    /// Create an object at a position with an orientation
    pub fn from_pose(name: impl Into<String>, location: Vec3, rotation: Quat) -> Self {
        Self::new(name, Transform::from_position_rotation(location, rotation))
    }

    /// World-space location
    #[must_use]
    pub fn location(&self) -> Vec3 {
        self.transform.position
    }

    /// World-space orientation
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }
}
