//! Surface-free hover orchestrator

use arv_core::{AnchorTransform, BoundingSphere, FrameContext};

use crate::config::ControlConfig;
use crate::controls::{ArControl, ArScaleControl, ArSwipeControl, ArSwirlControl};
use crate::orchestrator::GestureSession;
use crate::scene::SceneWriter;

/// Control set for an object floating in front of the camera: swirl and
/// swipe rotation plus pinch scale. No surface tracking, no placement
/// state machine, and one-finger input always rotates since there is no
/// translation to route to.
pub struct HoverControl {
    session: GestureSession,
    anchor: AnchorTransform,
}

impl HoverControl {
    pub fn new(config: &ControlConfig, bounds: BoundingSphere, anchor: AnchorTransform) -> Self {
        let mut scale = ArScaleControl::new(&config.scale);
        scale.set_badge_offset(bounds.radius);

        let controls: Vec<Box<dyn ArControl>> = vec![
            Box::new(ArSwirlControl::new(&config.rotation)),
            Box::new(ArSwipeControl::new(&config.rotation)),
            Box::new(scale),
        ];

        Self {
            session: GestureSession::new(config.deadzone.size, controls),
            anchor,
        }
    }

    pub fn anchor(&self) -> &AnchorTransform {
        &self.anchor
    }

    pub fn controls(&self) -> &[Box<dyn ArControl>] {
        self.session.controls()
    }

    pub fn controls_mut(&mut self) -> &mut [Box<dyn ArControl>] {
        self.session.controls_mut()
    }

    pub fn on_gesture_start(&mut self, ctx: &FrameContext) {
        // No bounds: the finger-on-object bit stays false, so one-finger
        // gestures always reach the rotation controls.
        self.session.start(ctx, &self.anchor, None);
    }

    pub fn on_gesture_end(&mut self, scene: &mut dyn SceneWriter) {
        self.session.end(scene);
    }

    pub fn update(&mut self, ctx: &FrameContext, scene: &mut dyn SceneWriter) -> AnchorTransform {
        self.session.drive(ctx, &mut self.anchor, scene);
        scene.set_anchor_transform(&self.anchor);
        self.anchor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingScene;
    use arv_core::{CameraFrame, Ray, TouchPoint};
    use glam::{Mat4, Quat, Vec2, Vec3};

    fn frame(touches: Vec<TouchPoint>, pointer_ray: Option<Ray>) -> FrameContext {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        FrameContext {
            touches,
            pointer_ray,
            hit: None,
            delta_ms: 16.0,
            camera: CameraFrame::new(view.inverse(), proj),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    fn hover_control() -> HoverControl {
        let config = ControlConfig::default();
        HoverControl::new(
            &config,
            BoundingSphere::new(Vec3::ZERO, 0.5),
            AnchorTransform::default(),
        )
    }

    #[test]
    fn one_finger_on_object_still_rotates() {
        let mut control = hover_control();
        let mut scene = RecordingScene::default();

        // The ray goes straight through the object; with no translation
        // control in the set that must not block rotation.
        let on_object = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let start = frame(vec![TouchPoint::new(400.0, 100.0)], Some(on_object));
        control.on_gesture_start(&start);

        let drag = frame(vec![TouchPoint::new(520.0, 100.0)], None);
        control.update(&drag, &mut scene);
        assert!(control.controls()[0].is_active(), "swirl takes the drag");

        // The sweep continues after commitment; the motion then converges.
        let sweep = frame(vec![TouchPoint::new(640.0, 200.0)], None);
        for _ in 0..30 {
            control.update(&sweep, &mut scene);
        }
        assert_ne!(control.anchor().rotation, Quat::IDENTITY);
    }

    #[test]
    fn pinch_scales_without_any_surface() {
        let mut control = hover_control();
        let mut scene = RecordingScene::default();

        let start = frame(
            vec![TouchPoint::new(300.0, 300.0), TouchPoint::new(500.0, 300.0)],
            None,
        );
        control.on_gesture_start(&start);

        let commit = frame(
            vec![TouchPoint::new(200.0, 300.0), TouchPoint::new(600.0, 300.0)],
            None,
        );
        control.update(&commit, &mut scene);
        assert!(control.controls()[2].is_active());

        let wide = frame(
            vec![TouchPoint::new(100.0, 300.0), TouchPoint::new(700.0, 300.0)],
            None,
        );
        for _ in 0..30 {
            control.update(&wide, &mut scene);
        }
        assert!(control.anchor().scale > 1.0);
        assert!(scene.last_transform().is_some());
    }
}
