//! Render request parameters
//!
//! One validated record per render request. The protocol supplies camera
//! intrinsics alongside the scene; the recording pipeline only consumes the
//! scene path and the image dimensions, but the whole record is parsed so a
//! malformed request fails before any scene import happens.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter validation errors
#[derive(Error, Debug)]
pub enum ParamError {
    /// `image_type` value outside the declared set
    #[error("invalid image_type '{0}', expected one of: color, depth, label")]
    InvalidImageType(String),
}

/// The kind of image a render request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Color image
    Color,
    /// Depth image
    Depth,
    /// Label (segmentation) image
    Label,
}

impl ImageType {
    /// The wire spelling of this image type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Depth => "depth",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(Self::Color),
            "depth" => Ok(Self::Depth),
            "label" => Ok(Self::Label),
            other => Err(ParamError::InvalidImageType(other.to_owned())),
        }
    }
}

/// All parameters of one render request
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    /// The glTF input file, already saved to the scratch directory
    pub scene: PathBuf,

    /// Checksum of `scene`; carried for protocol compatibility, never verified
    pub scene_sha256: String,

    /// The type of image being rendered
    pub image_type: ImageType,

    /// Width of the requested image in pixels
    pub width: u32,

    /// Height of the requested image in pixels
    pub height: u32,

    /// Near clipping plane of the camera
    pub near: f64,

    /// Far clipping plane of the camera
    pub far: f64,

    /// Focal length x, in pixels
    pub focal_x: f64,

    /// Focal length y, in pixels
    pub focal_y: f64,

    /// Field of view in the x-direction, in radians
    pub fov_x: f64,

    /// Field of view in the y-direction, in radians
    pub fov_y: f64,

    /// Principal point x coordinate in pixels
    pub center_x: f64,

    /// Principal point y coordinate in pixels
    pub center_y: f64,

    /// Minimum depth range; supplied for depth requests
    pub min_depth: Option<f64>,

    /// Maximum depth range; supplied for depth requests
    pub max_depth: Option<f64>,
}

impl RenderParams {
    /// Build a parameter record with placeholder camera intrinsics
    ///
    /// Handy for tests and examples where only the scene and the image
    /// dimensions matter.
    #[must_use]
    pub fn minimal(
        scene: impl Into<PathBuf>,
        image_type: ImageType,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            scene: scene.into(),
            scene_sha256: String::new(),
            image_type,
            width,
            height,
            near: 0.01,
            far: 10.0,
            focal_x: f64::from(width),
            focal_y: f64::from(height),
            fov_x: 1.0,
            fov_y: 1.0,
            center_x: f64::from(width) / 2.0,
            center_y: f64::from(height) / 2.0,
            min_depth: None,
            max_depth: None,
        }
    }
}
