//! Two-finger swipe rotation

use glam::{Quat, Vec2, Vec3};

use arv_core::{AnchorTransform, FrameContext, Motion, MotionConfig, Range};

use crate::config::RotationConfig;
use crate::controls::ArControl;
use crate::gesture::Gestures;
use crate::scene::{Indicator, IndicatorKind, SceneWriter};

/// Screen axis the committed gesture locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragAxis {
    Horizontal,
    Vertical,
}

/// Rotates the anchored object with a two-finger drag.
///
/// The rotation axis is chosen once at activation from the committed
/// gesture bit: a horizontal swipe spins about the world up axis, a
/// vertical swipe tilts about the camera-right direction flattened onto
/// the horizontal plane. Drag distance times sensitivity is interpreted
/// as an angle, smoothed through the same committed/target slerp Motion
/// as the swirl control.
pub struct ArSwipeControl {
    sensitivity: f32,
    enabled: bool,
    active: bool,
    drag_axis: DragAxis,
    rotation_axis: Vec3,
    committed: Quat,
    target: Quat,
    motion: Motion,
    prev_coord: f32,
}

impl ArSwipeControl {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            sensitivity: config.swipe_sensitivity,
            enabled: true,
            active: false,
            drag_axis: DragAxis::Horizontal,
            rotation_axis: Vec3::Y,
            committed: Quat::IDENTITY,
            target: Quat::IDENTITY,
            motion: Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                range: Range::new(0.0, 1.0),
                ..Default::default()
            }),
            prev_coord: 0.0,
        }
    }

    /// Midpoint of the first two touches, normalized per axis.
    fn midpoint(ctx: &FrameContext) -> Option<Vec2> {
        match ctx.touches[..] {
            [a, b, ..] => {
                Some((a.normalized(ctx.viewport) + b.normalized(ctx.viewport)) * 0.5)
            }
            _ => None,
        }
    }

    fn coord(&self, midpoint: Vec2) -> f32 {
        match self.drag_axis {
            DragAxis::Horizontal => midpoint.x,
            DragAxis::Vertical => midpoint.y,
        }
    }
}

impl ArControl for ArSwipeControl {
    fn gestures(&self) -> Gestures {
        Gestures::TWO_FINGER
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self, scene: &mut dyn SceneWriter) {
        self.deactivate(scene);
        self.enabled = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self, ctx: &FrameContext, anchor: &AnchorTransform, gesture: Gestures) {
        self.active = true;

        if gesture.intersects(Gestures::TWO_FINGER_VERTICAL) {
            self.drag_axis = DragAxis::Vertical;
            // Camera right, flattened so the tilt axis stays horizontal.
            let right = ctx.camera.world.x_axis.truncate();
            let flat = Vec3::new(right.x, 0.0, right.z);
            self.rotation_axis = if flat.length_squared() > 1e-8 {
                flat.normalize()
            } else {
                Vec3::X
            };
        } else {
            self.drag_axis = DragAxis::Horizontal;
            self.rotation_axis = Vec3::Y;
        }

        self.committed = anchor.rotation;
        self.target = anchor.rotation;
        self.motion.reset(0.0);
        self.prev_coord = Self::midpoint(ctx).map_or(0.0, |m| self.coord(m));
    }

    fn deactivate(&mut self, scene: &mut dyn SceneWriter) {
        self.active = false;
        scene.hide_indicator(IndicatorKind::RotationArrows);
    }

    fn process(&mut self, ctx: &FrameContext, _anchor: &AnchorTransform) {
        if !self.active {
            return;
        }
        let Some(mid) = Self::midpoint(ctx) else {
            return;
        };

        let coord = self.coord(mid);
        let angle = (coord - self.prev_coord) * self.sensitivity;
        self.prev_coord = coord;

        self.committed = self.committed.slerp(self.target, self.motion.val());
        self.target = Quat::from_axis_angle(self.rotation_axis, angle) * self.target;
        self.motion.reset(0.0);
        self.motion.set_end_delta(1.0);
    }

    fn update(&mut self, delta_ms: f32, anchor: &mut AnchorTransform, scene: &mut dyn SceneWriter) {
        if !self.active {
            return;
        }
        self.motion.update(delta_ms);
        anchor.rotation = self.committed.slerp(self.target, self.motion.val());
        scene.show_indicator(Indicator::RotationArrows {
            position: anchor.position,
            axis: self.rotation_axis,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingScene;
    use arv_core::{CameraFrame, TouchPoint};
    use glam::Mat4;

    fn frame(touches: Vec<TouchPoint>) -> FrameContext {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        FrameContext {
            touches,
            pointer_ray: None,
            hit: None,
            delta_ms: 16.0,
            camera: CameraFrame::new(view.inverse(), proj),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    fn two(x: f32, y: f32) -> Vec<TouchPoint> {
        vec![TouchPoint::new(x - 20.0, y), TouchPoint::new(x + 20.0, y)]
    }

    #[test]
    fn horizontal_swipe_spins_about_up() {
        let config = RotationConfig::default();
        let mut control = ArSwipeControl::new(&config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();

        control.activate(
            &frame(two(200.0, 300.0)),
            &anchor,
            Gestures::TWO_FINGER_HORIZONTAL,
        );
        control.process(&frame(two(600.0, 300.0)), &anchor);
        for _ in 0..40 {
            control.update(16.0, &mut anchor, &mut scene);
        }

        let (axis, angle) = anchor.rotation.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-3) || axis.abs_diff_eq(-Vec3::Y, 1e-3));
        // Half the viewport width at default sensitivity.
        assert!((angle - 0.5 * config.swipe_sensitivity).abs() < 1e-3);
    }

    #[test]
    fn vertical_swipe_tilts_about_camera_right() {
        let config = RotationConfig::default();
        let mut control = ArSwipeControl::new(&config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();

        control.activate(
            &frame(two(400.0, 150.0)),
            &anchor,
            Gestures::TWO_FINGER_VERTICAL,
        );
        control.process(&frame(two(400.0, 450.0)), &anchor);
        for _ in 0..40 {
            control.update(16.0, &mut anchor, &mut scene);
        }

        let (axis, angle) = anchor.rotation.to_axis_angle();
        assert!(axis.y.abs() < 1e-3, "tilt axis must stay horizontal: {axis}");
        assert!(angle > 0.1);
    }

    #[test]
    fn axis_is_locked_at_activation() {
        let config = RotationConfig::default();
        let mut control = ArSwipeControl::new(&config);
        let anchor = AnchorTransform::default();

        control.activate(
            &frame(two(400.0, 300.0)),
            &anchor,
            Gestures::TWO_FINGER_HORIZONTAL,
        );
        // A vertical-looking drag afterwards still rotates about Y.
        control.process(&frame(two(400.0, 500.0)), &anchor);
        assert_eq!(control.rotation_axis, Vec3::Y);
    }
}
