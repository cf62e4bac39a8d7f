//! One-finger swirl rotation

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};

use arv_core::{AnchorTransform, FrameContext, Motion, MotionConfig, Range};

use crate::config::RotationConfig;
use crate::controls::ArControl;
use crate::gesture::Gestures;
use crate::scene::{Indicator, IndicatorKind, SceneWriter};

/// Rotates the anchored object about the world up axis by the angle the
/// finger sweeps around the object's projected screen-space center.
///
/// Each raw sample premultiplies an incremental quaternion onto a target;
/// a [0, 1] Motion is re-based on every new target so the visible rotation
/// is always a smooth slerp from the previously committed rotation, even
/// under bursty input.
pub struct ArSwirlControl {
    sensitivity: f32,
    enabled: bool,
    active: bool,
    committed: Quat,
    target: Quat,
    motion: Motion,
    prev_angle: f32,
}

impl ArSwirlControl {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            sensitivity: config.swirl_sensitivity,
            enabled: true,
            active: false,
            committed: Quat::IDENTITY,
            target: Quat::IDENTITY,
            motion: Motion::new(MotionConfig {
                duration_ms: config.duration_ms,
                range: Range::new(0.0, 1.0),
                ..Default::default()
            }),
            prev_angle: 0.0,
        }
    }

    /// Angle of the first touch around the anchor's projected center,
    /// in aspect-corrected NDC. Proceeds without a frustum guard even when
    /// the center projects off screen or behind the camera.
    fn touch_angle(ctx: &FrameContext, anchor_position: Vec3) -> Option<f32> {
        let touch = ctx.touches.first()?;
        let center = ctx.camera.project_to_ndc(anchor_position);

        let ndc = Vec2::new(
            2.0 * touch.x / ctx.viewport.x - 1.0,
            1.0 - 2.0 * touch.y / ctx.viewport.y,
        );
        let d = ndc - center;
        let aspect = ctx.viewport.x / ctx.viewport.y.max(1.0);
        Some(d.y.atan2(d.x * aspect))
    }
}

impl ArControl for ArSwirlControl {
    fn gestures(&self) -> Gestures {
        Gestures::ONE_FINGER
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

    fn wants(&self, gesture: Gestures, touching_object: bool) -> bool {
        // One finger on the object means translate, not rotate.
        gesture.intersects(Gestures::ONE_FINGER) && !touching_object
    }

    fn activate(&mut self, ctx: &FrameContext, anchor: &AnchorTransform, _gesture: Gestures) {
        self.active = true;
        self.committed = anchor.rotation;
        self.target = anchor.rotation;
        self.motion.reset(0.0);
        self.prev_angle = Self::touch_angle(ctx, anchor.position).unwrap_or(0.0);
    }

    fn deactivate(&mut self, scene: &mut dyn SceneWriter) {
        self.active = false;
        scene.hide_indicator(IndicatorKind::RotationArrows);
    }

    fn process(&mut self, ctx: &FrameContext, anchor: &AnchorTransform) {
        if !self.active {
            return;
        }
        let Some(angle) = Self::touch_angle(ctx, anchor.position) else {
            return;
        };

        // Shortest signed sweep since the previous sample.
        let delta = (angle - self.prev_angle + PI).rem_euclid(2.0 * PI) - PI;
        self.prev_angle = angle;

        // Commit the currently visible rotation, then push the target on.
        self.committed = self.committed.slerp(self.target, self.motion.val());
        self.target = Quat::from_axis_angle(Vec3::Y, delta * self.sensitivity) * self.target;
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
            axis: Vec3::Y,
        });
    }
}
