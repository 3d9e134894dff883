//! Timeline replay
//!
//! Writes a recorded frame list back into a stage's keyframe timeline. This
//! is the importer half of the recording round trip: poses join to stage
//! objects by name, unmatched names are skipped with a warning, and the
//! timeline range is set to span exactly the replayed frames.

use crate::recording::store::FrameSnapshot;
use crate::stage::Stage;

/// Summary of one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Number of frames replayed
    pub frames: usize,

    /// Poses applied to a matching stage object
    pub applied: usize,

    /// Poses skipped because no stage object carried their name
    pub unmatched: usize,
}

/// Replay a frame list into a stage's timeline
///
/// For every frame the timeline cursor is moved to the frame's index, then
/// each pose whose name matches an existing object updates that object and
/// keys both its location and rotation channels. Objects are never created;
/// a pose with no match logs a warning and is skipped.
pub fn replay_frames(stage: &mut Stage, frames: &[FrameSnapshot]) -> ReplayStats {
    let mut stats = ReplayStats {
        frames: frames.len(),
        ..ReplayStats::default()
    };

    for (frame_index, frame) in frames.iter().enumerate() {
        stage
            .timeline_mut()
            .set_current_frame(frame_index as u32);

        for pose in frame {
            let Some(object) = stage.object_mut(&pose.name) else {
                log::warn!("object '{}' not found in stage, skipping pose", pose.name);
                stats.unmatched += 1;
                continue;
            };
            object.transform.position = pose.location;
            object.transform.rotation = pose.rotation;

            stage.timeline_mut().key_location(&pose.name, pose.location);
            stage.timeline_mut().key_rotation(&pose.name, pose.rotation);
            stats.applied += 1;
        }
    }

    let last_frame = frames.len().saturating_sub(1) as u32;
    stage.timeline_mut().set_frame_range(0, last_frame);

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Transform, Vec3};
    use crate::recording::store::PoseSnapshot;
    use crate::stage::StageObject;

    fn pose(name: &str, x: f64) -> PoseSnapshot {
        PoseSnapshot {
            name: name.to_owned(),
            location: Vec3::new(x, 0.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::z_axis(), x),
        }
    }

    #[test]
    fn test_replay_keys_matching_objects_per_frame() {
        let mut stage = Stage::new();
        stage.insert_object(StageObject::new("box", Transform::identity()));
        stage.insert_object(StageObject::new("lid", Transform::identity()));

        let frames = vec![
            vec![pose("box", 1.0), pose("lid", 2.0)],
            vec![pose("box", 3.0), pose("lid", 4.0)],
            vec![pose("box", 5.0), pose("lid", 6.0)],
        ];

        let stats = replay_frames(&mut stage, &frames);

        assert_eq!(stats.frames, 3);
        assert_eq!(stats.applied, 6);
        assert_eq!(stats.unmatched, 0);

        // One keyframe per (object, frame) pair on each channel.
        for name in ["box", "lid"] {
            let channels = stage.timeline().channels(name).expect("channels");
            assert_eq!(channels.location.len(), 3);
            assert_eq!(channels.rotation.len(), 3);
        }

        // The object ends up at its last keyed pose.
        let box_object = stage.object("box").expect("box");
        assert_eq!(box_object.location(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_unmatched_pose_is_skipped_not_fatal() {
        let mut stage = Stage::new();
        stage.insert_object(StageObject::new("box", Transform::identity()));

        let frames = vec![vec![pose("box", 1.0), pose("ghost", 2.0)]];

        let stats = replay_frames(&mut stage, &frames);

        assert_eq!(stats.applied, 1);
        assert_eq!(stats.unmatched, 1);
        assert!(stage.timeline().channels("ghost").is_none());
    }

    #[test]
    fn test_replay_sets_frame_range() {
        let mut stage = Stage::new();
        stage.insert_object(StageObject::new("box", Transform::identity()));

        let frames = vec![vec![pose("box", 0.0)]; 5];
        replay_frames(&mut stage, &frames);

        assert_eq!(stage.timeline().frame_start(), 0);
        assert_eq!(stage.timeline().frame_end(), 4);
    }

    #[test]
    fn test_replay_of_empty_list_is_harmless() {
        let mut stage = Stage::new();

        let stats = replay_frames(&mut stage, &[]);

        assert_eq!(stats, ReplayStats::default());
        assert_eq!(stage.timeline().frame_end(), 0);
    }
}
