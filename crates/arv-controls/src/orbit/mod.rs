//! Desktop orbit controls
//!
//! The same Motion-driven pattern as the AR controls, applied to
//! mouse/trackpad deltas against a [`Pose`]. No surface tracking: input
//! mapping is trivial, smoothing is identical.

use glam::Vec2;

use arv_core::Pose;

use crate::config::OrbitConfig;

pub mod pan;
pub mod rotate;
pub mod zoom;

pub use pan::PanControl;
pub use rotate::RotateControl;
pub use zoom::ZoomControl;

/// Composes the rotate/pan/zoom controls over one owned [`Pose`].
pub struct OrbitControl {
    pose: Pose,
    rotate: RotateControl,
    pan: PanControl,
    zoom: ZoomControl,
}

impl OrbitControl {
    pub fn new(config: &OrbitConfig, pose: Pose) -> Self {
        let mut rotate = RotateControl::new(config);
        let mut zoom = ZoomControl::new(config);
        rotate.sync(&pose);
        zoom.sync(&pose);
        Self {
            pose,
            rotate,
            pan: PanControl::new(config),
            zoom,
        }
    }

    /// Current pose, cloned for the caller.
    pub fn pose(&self) -> Pose {
        self.pose.clone()
    }

    pub fn rotate_mut(&mut self) -> &mut RotateControl {
        &mut self.rotate
    }

    pub fn pan_mut(&mut self) -> &mut PanControl {
        &mut self.pan
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomControl {
        &mut self.zoom
    }

    /// Feed a rotation drag delta in pixels.
    pub fn handle_rotate(&mut self, delta_px: Vec2, viewport: Vec2) {
        self.rotate.handle_drag(delta_px, viewport);
    }

    /// Feed a pan drag delta in pixels.
    pub fn handle_pan(&mut self, delta_px: Vec2, viewport: Vec2) {
        self.pan.handle_drag(delta_px, viewport, self.pose.zoom());
    }

    /// Feed a wheel/pinch zoom step.
    pub fn handle_zoom(&mut self, steps: f32) {
        self.zoom.handle_wheel(steps);
    }

    /// Advance all motions and return the updated pose.
    pub fn update(&mut self, delta_ms: f32) -> Pose {
        self.rotate.update(delta_ms, &mut self.pose);
        self.pan.update(delta_ms, &mut self.pose);
        self.zoom.update(delta_ms, &mut self.pose);
        self.pose.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-3;

    fn orbit() -> OrbitControl {
        let config = OrbitConfig::default();
        OrbitControl::new(&config, Pose::new(0.0, 20.0, 5.0, Vec3::ZERO))
    }

    #[test]
    fn rotate_drag_changes_yaw_smoothly() {
        let mut orbit = orbit();
        let viewport = Vec2::new(800.0, 600.0);

        // Half a viewport width of drag: 90 degrees at default sensitivity.
        orbit.handle_rotate(Vec2::new(400.0, 0.0), viewport);
        let mid = orbit.update(100.0);
        assert!(mid.yaw() > 0.0 && mid.yaw() < 90.0, "eases in: {}", mid.yaw());

        for _ in 0..10 {
            orbit.update(100.0);
        }
        assert!((orbit.pose().yaw() - 90.0).abs() < EPS);
    }

    #[test]
    fn yaw_circulates_through_360() {
        let mut orbit = orbit();
        let viewport = Vec2::new(800.0, 600.0);

        // Repeated full-width drags accumulate past 360 and wrap on read.
        for _ in 0..3 {
            orbit.handle_rotate(Vec2::new(800.0, 0.0), viewport);
            for _ in 0..10 {
                orbit.update(100.0);
            }
        }
        assert!((orbit.pose().yaw() - 180.0).abs() < 0.1);
    }

    #[test]
    fn pitch_clamps_at_poles() {
        let mut orbit = orbit();
        let viewport = Vec2::new(800.0, 600.0);

        orbit.handle_rotate(Vec2::new(0.0, 4000.0), viewport);
        for _ in 0..20 {
            orbit.update(100.0);
        }
        assert!((orbit.pose().pitch() - 89.9).abs() < EPS);
    }

    #[test]
    fn zoom_clamps_to_range() {
        let config = OrbitConfig::default();
        let mut orbit = OrbitControl::new(&config, Pose::new(0.0, 0.0, 5.0, Vec3::ZERO));

        orbit.handle_zoom(-1000.0);
        for _ in 0..20 {
            orbit.update(100.0);
        }
        assert!((orbit.pose().zoom() - config.max_zoom).abs() < EPS);

        orbit.handle_zoom(10000.0);
        for _ in 0..20 {
            orbit.update(100.0);
        }
        assert!((orbit.pose().zoom() - config.min_zoom).abs() < EPS);
    }

    #[test]
    fn pan_moves_pivot_in_view_plane() {
        let mut orbit = orbit();
        let viewport = Vec2::new(800.0, 600.0);

        orbit.handle_pan(Vec2::new(200.0, 0.0), viewport);
        for _ in 0..10 {
            orbit.update(100.0);
        }
        let pivot = orbit.pose().pivot();
        assert!(pivot.length() > 0.0);
        // A horizontal pan keeps the pivot at the same height.
        assert!(pivot.y.abs() < EPS);
    }

    #[test]
    fn disabled_rotate_ignores_input() {
        let mut orbit = orbit();
        let viewport = Vec2::new(800.0, 600.0);

        orbit.rotate_mut().disable();
        orbit.handle_rotate(Vec2::new(400.0, 0.0), viewport);
        for _ in 0..10 {
            orbit.update(100.0);
        }
        assert!(orbit.pose().yaw().abs() < EPS);
    }
}
