//! Animation timeline
//!
//! Per-object keyframe channels for location and rotation, plus the active
//! frame range. Keying always happens at the timeline's current frame, the
//! way a host tool's `keyframe_insert` operates on the scene's frame cursor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Vec3};

/// A single keyframe on a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Frame index
    pub frame: u32,

    /// Keyed value
    pub value: T,
}

/// Location and rotation channels for one object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectChannels {
    /// Location keyframes, sorted by frame
    pub location: Vec<Keyframe<Vec3>>,

    /// Rotation keyframes, sorted by frame
    pub rotation: Vec<Keyframe<Quat>>,
}

/// The stage's animation timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    frame_start: u32,
    frame_end: u32,
    current_frame: u32,
    channels: HashMap<String, ObjectChannels>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty timeline
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_start: 0,
            frame_end: 0,
            current_frame: 0,
            channels: HashMap::new(),
        }
    }

    /// First frame of the active range
    #[must_use]
    pub fn frame_start(&self) -> u32 {
        self.frame_start
    }

    /// Last frame of the active range
    #[must_use]
    pub fn frame_end(&self) -> u32 {
        self.frame_end
    }

    /// Set the active frame range
    pub fn set_frame_range(&mut self, start: u32, end: u32) {
        self.frame_start = start;
        self.frame_end = end.max(start);
    }

    /// The frame cursor that keying operates on
    #[must_use]
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Move the frame cursor
    pub fn set_current_frame(&mut self, frame: u32) {
        self.current_frame = frame;
    }

    /// Key an object's location at the current frame
    pub fn key_location(&mut self, object_name: &str, value: Vec3) {
        let frame = self.current_frame;
        let channels = self.channels.entry(object_name.to_owned()).or_default();
        insert_keyframe(&mut channels.location, frame, value);
    }

    /// Key an object's rotation at the current frame
    pub fn key_rotation(&mut self, object_name: &str, value: Quat) {
        let frame = self.current_frame;
        let channels = self.channels.entry(object_name.to_owned()).or_default();
        insert_keyframe(&mut channels.rotation, frame, value);
    }

    /// Channels for one object, if it has any keyframes
    #[must_use]
    pub fn channels(&self, object_name: &str) -> Option<&ObjectChannels> {
        self.channels.get(object_name)
    }

    /// Names of all keyed objects
    pub fn keyed_objects(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Total number of keyframes across all channels
    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.channels
            .values()
            .map(|c| c.location.len() + c.rotation.len())
            .sum()
    }
}

/// Insert a keyframe keeping the channel sorted; re-keying a frame replaces
/// the existing value.
fn insert_keyframe<T>(channel: &mut Vec<Keyframe<T>>, frame: u32, value: T) {
    match channel.binary_search_by_key(&frame, |k| k.frame) {
        Ok(index) => channel[index].value = value,
        Err(index) => channel.insert(index, Keyframe { frame, value }),
    }
}
