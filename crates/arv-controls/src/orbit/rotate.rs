//! Orbit rotation control

use glam::Vec2;

use arv_core::{Motion, MotionConfig, Pose, Range, pose::PITCH_RANGE_DEG};

use crate::config::OrbitConfig;

/// Maps drag deltas to yaw/pitch Motions over a [`Pose`].
///
/// Yaw accumulates unbounded and is normalized into [0, 360) by the pose
/// on read; pitch is clamped at the poles by its Motion range.
pub struct RotateControl {
    enabled: bool,
    sensitivity: f32,
    yaw_motion: Motion,
    pitch_motion: Motion,
}

impl RotateControl {
    pub fn new(config: &OrbitConfig) -> Self {
        Self {
            enabled: true,
            sensitivity: config.rotate_sensitivity,
            yaw_motion: Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                ..Default::default()
            }),
            pitch_motion: Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                range: Range::new(PITCH_RANGE_DEG.0, PITCH_RANGE_DEG.1),
                ..Default::default()
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Pin the motions to the pose's current angles.
    pub fn sync(&mut self, pose: &Pose) {
        self.yaw_motion.reset(pose.yaw());
        self.pitch_motion.reset(pose.pitch());
    }

    /// Feed a drag delta in pixels.
    pub fn handle_drag(&mut self, delta_px: Vec2, viewport: Vec2) {
        if !self.enabled {
            return;
        }
        let yaw_delta = delta_px.x / viewport.x.max(1.0) * self.sensitivity;
        let pitch_delta = delta_px.y / viewport.y.max(1.0) * self.sensitivity;
        self.yaw_motion.set_end_delta(yaw_delta);
        self.pitch_motion.set_end_delta(pitch_delta);
    }

    pub fn update(&mut self, delta_ms: f32, pose: &mut Pose) {
        self.yaw_motion.update(delta_ms);
        self.pitch_motion.update(delta_ms);
        pose.set_yaw(self.yaw_motion.val());
        pose.set_pitch(self.pitch_motion.val());
    }
}
