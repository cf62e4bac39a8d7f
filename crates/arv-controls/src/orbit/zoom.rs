//! Orbit zoom control

use arv_core::{Motion, MotionConfig, Pose, Range};

use crate::config::OrbitConfig;

/// Maps wheel steps to the orbit distance, clamped to the configured
/// range.
pub struct ZoomControl {
    enabled: bool,
    sensitivity: f32,
    motion: Motion,
}

impl ZoomControl {
    pub fn new(config: &OrbitConfig) -> Self {
        Self {
            enabled: true,
            sensitivity: config.zoom_sensitivity,
            motion: Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                range: Range::new(config.min_zoom, config.max_zoom),
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

    /// Pin the motion to the pose's current distance.
    pub fn sync(&mut self, pose: &Pose) {
        self.motion.reset(pose.zoom());
    }

    /// Positive steps zoom in (distance shrinks).
    pub fn handle_wheel(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        self.motion.set_end_delta(-steps * self.sensitivity);
    }

    pub fn update(&mut self, delta_ms: f32, pose: &mut Pose) {
        self.motion.update(delta_ms);
        pose.set_zoom(self.motion.val());
    }
}
