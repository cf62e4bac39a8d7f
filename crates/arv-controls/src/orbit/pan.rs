//! Orbit pan control

use glam::{Vec2, Vec3};

use arv_core::{Motion, MotionConfig, Pose};

use crate::config::OrbitConfig;

/// Moves the orbit pivot in the camera's view plane.
///
/// The two Motions accumulate screen-space deltas; each tick's eased
/// delta is applied along the current camera right/up vectors, so the pan
/// direction stays correct while the camera also rotates.
pub struct PanControl {
    enabled: bool,
    sensitivity: f32,
    x_motion: Motion,
    y_motion: Motion,
}

impl PanControl {
    pub fn new(config: &OrbitConfig) -> Self {
        let motion = || {
            Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                ..Default::default()
            })
        };
        Self {
            enabled: true,
            sensitivity: config.pan_sensitivity,
            x_motion: motion(),
            y_motion: motion(),
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

    /// Feed a drag delta in pixels. `zoom` scales the pan so it covers a
    /// constant fraction of the view regardless of distance.
    pub fn handle_drag(&mut self, delta_px: Vec2, viewport: Vec2, zoom: f32) {
        if !self.enabled {
            return;
        }
        let scale = self.sensitivity * zoom;
        self.x_motion
            .set_end_delta(delta_px.x / viewport.x.max(1.0) * scale);
        self.y_motion
            .set_end_delta(delta_px.y / viewport.y.max(1.0) * scale);
    }

    pub fn update(&mut self, delta_ms: f32, pose: &mut Pose) {
        let dx = self.x_motion.update(delta_ms);
        let dy = self.y_motion.update(delta_ms);
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let eye = pose.eye_position();
        let forward = (pose.pivot() - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);

        pose.set_pivot(pose.pivot() + right * -dx + up * dy);
    }
}
