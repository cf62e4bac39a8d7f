//! Pinch-to-scale control

use glam::{Vec2, Vec3};

use arv_core::{AnchorTransform, BoundingSphere, CameraFrame, FrameContext, Motion, MotionConfig, Range};

use crate::config::ScaleConfig;
use crate::controls::ArControl;
use crate::gesture::Gestures;
use crate::scene::{Indicator, IndicatorKind, SceneWriter};

/// Scales the anchored object from the two-finger span delta, clamped to
/// the configured range, with a percentage badge above the object.
pub struct ArScaleControl {
    config: ScaleConfig,
    enabled: bool,
    active: bool,
    motion: Motion,
    start_span: f32,
    prev_span: f32,
    base_scale: f32,
    /// Badge height above the anchor, in object units.
    badge_offset: f32,
}

impl ArScaleControl {
    pub fn new(config: &ScaleConfig) -> Self {
        let motion = Motion::new(MotionConfig {
            duration_ms: config.duration_ms,
            range: Range::new(config.min, config.max),
            ..Default::default()
        });
        Self {
            config: config.clone(),
            enabled: true,
            active: false,
            motion,
            start_span: 1.0,
            prev_span: 1.0,
            base_scale: 1.0,
            badge_offset: 0.0,
        }
    }

    /// Current scale multiplier.
    pub fn scale(&self) -> f32 {
        self.motion.val()
    }

    /// Pin the scale, e.g. after the auto initial fit at placement.
    pub fn reset_scale(&mut self, scale: f32) {
        self.motion.reset(scale);
    }

    /// Badge anchor height; typically the object's bounding radius.
    pub fn set_badge_offset(&mut self, offset: f32) {
        self.badge_offset = offset;
    }

    /// Scale that fits the object's bounding sphere inside the visible
    /// frustum at the anchor's distance, never exceeding 100%.
    pub fn initial_scale(
        config: &ScaleConfig,
        camera: &CameraFrame,
        bounds: &BoundingSphere,
        position: Vec3,
    ) -> f32 {
        let distance = (position - camera.position()).length();
        let half_height = (camera.fov_y() * 0.5).tan() * distance;
        let half_width = half_height * camera.aspect();
        let fit = config.fit_margin * half_height.min(half_width);

        if bounds.radius <= f32::EPSILON {
            return 1.0;
        }
        (fit / bounds.radius).min(1.0).max(config.min)
    }

    /// Aspect-corrected two-finger span, in viewport-width units.
    fn span(ctx: &FrameContext) -> Option<f32> {
        match ctx.touches[..] {
            [a, b, ..] => {
                let aspect = ctx.deadzone_aspect();
                let a = a.normalized(ctx.viewport);
                let b = b.normalized(ctx.viewport);
                let d = b - a;
                Some(Vec2::new(d.x, d.y * aspect).length())
            }
            _ => None,
        }
    }
}

impl ArControl for ArScaleControl {
    fn gestures(&self) -> Gestures {
        Gestures::PINCH
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

    fn activate(&mut self, ctx: &FrameContext, anchor: &AnchorTransform, _gesture: Gestures) {
        self.active = true;
        self.base_scale = anchor.scale;
        self.motion.reset(anchor.scale);
        let span = Self::span(ctx).unwrap_or(1.0).max(f32::EPSILON);
        self.start_span = span;
        self.prev_span = span;
    }

    fn deactivate(&mut self, scene: &mut dyn SceneWriter) {
        self.active = false;
        scene.hide_indicator(IndicatorKind::ScaleBadge);
    }

    fn process(&mut self, ctx: &FrameContext, _anchor: &AnchorTransform) {
        if !self.active {
            return;
        }
        let Some(span) = Self::span(ctx) else {
            return;
        };

        // Span delta relative to the starting span, so a doubled span
        // doubles the scale at sensitivity 1.
        let delta =
            (span - self.prev_span) / self.start_span * self.base_scale * self.config.sensitivity;
        self.prev_span = span;
        self.motion.set_end_delta(delta);
    }

    fn update(&mut self, delta_ms: f32, anchor: &mut AnchorTransform, scene: &mut dyn SceneWriter) {
        if !self.active {
            return;
        }
        self.motion.update(delta_ms);
        anchor.scale = self.motion.val();
        scene.show_indicator(Indicator::ScaleBadge {
            position: anchor.position + Vec3::Y * self.badge_offset * anchor.scale,
            percent: anchor.scale * 100.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingScene;
    use arv_core::TouchPoint;
    use glam::Mat4;

    const EPS: f32 = 1e-3;

    fn frame(touches: Vec<TouchPoint>) -> FrameContext {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.5, 3.0), Vec3::ZERO, Vec3::Y);
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

    #[test]
    fn doubled_span_scales_up_within_range() {
        let config = ScaleConfig::default();
        let mut control = ArScaleControl::new(&config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();

        // Touches at (100, 300) and (100, 340), span 40px.
        let start = vec![TouchPoint::new(100.0, 300.0), TouchPoint::new(100.0, 340.0)];
        control.activate(&frame(start), &anchor, Gestures::PINCH);

        // Span doubles to 80px in one frame.
        let spread = vec![TouchPoint::new(100.0, 280.0), TouchPoint::new(100.0, 360.0)];
        control.process(&frame(spread), &anchor);
        for _ in 0..20 {
            control.update(16.0, &mut anchor, &mut scene);
        }

        assert!(anchor.scale > 1.0);
        assert!(anchor.scale <= config.max);
        assert!((anchor.scale - 2.0).abs() < EPS);
    }

    #[test]
    fn scale_clamps_at_range_limits() {
        let config = ScaleConfig::default();
        let mut control = ArScaleControl::new(&config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();

        let start = vec![TouchPoint::new(300.0, 300.0), TouchPoint::new(500.0, 300.0)];
        control.activate(&frame(start), &anchor, Gestures::PINCH);

        // An absurd spread clamps at max.
        let spread = vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(10000.0, 300.0)];
        control.process(&frame(spread), &anchor);
        for _ in 0..20 {
            control.update(16.0, &mut anchor, &mut scene);
        }
        assert!((anchor.scale - config.max).abs() < EPS);

        // Pinching fully closed clamps at min.
        let closed = vec![TouchPoint::new(400.0, 300.0), TouchPoint::new(400.0, 300.0)];
        control.process(&frame(closed), &anchor);
        for _ in 0..20 {
            control.update(16.0, &mut anchor, &mut scene);
        }
        assert!((anchor.scale - config.min).abs() < EPS);
    }

    #[test]
    fn badge_follows_scale() {
        let config = ScaleConfig::default();
        let mut control = ArScaleControl::new(&config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();
        control.set_badge_offset(0.5);

        let start = vec![TouchPoint::new(300.0, 300.0), TouchPoint::new(500.0, 300.0)];
        control.activate(&frame(start), &anchor, Gestures::PINCH);
        control.update(16.0, &mut anchor, &mut scene);

        match scene.visible_indicator(IndicatorKind::ScaleBadge) {
            Some(Indicator::ScaleBadge { percent, .. }) => {
                assert!((percent - 100.0).abs() < 0.5);
            }
            other => panic!("expected scale badge, got {other:?}"),
        }

        control.deactivate(&mut scene);
        assert!(scene.visible_indicator(IndicatorKind::ScaleBadge).is_none());
    }

    #[test]
    fn initial_scale_fits_large_objects_and_caps_at_one() {
        let config = ScaleConfig::default();
        let camera = frame(vec![]).camera;

        // A small object keeps its natural size.
        let small = BoundingSphere::new(Vec3::ZERO, 0.1);
        let s = ArScaleControl::initial_scale(&config, &camera, &small, Vec3::ZERO);
        assert!((s - 1.0).abs() < EPS);

        // A huge object is shrunk to fit the frustum.
        let huge = BoundingSphere::new(Vec3::ZERO, 50.0);
        let s = ArScaleControl::initial_scale(&config, &camera, &huge, Vec3::ZERO);
        assert!(s < 1.0);
        assert!(s >= config.min);
    }
}
