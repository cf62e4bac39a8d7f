//! Surface-anchored translation (floor and wall variants)
//!
//! The defining resilience property lives here: the drag plane is updated
//! only from fresh, confidently-oriented hit-test samples. When tracking
//! drops out, the pointer ray keeps intersecting the previously stored
//! plane, so translation stays visually continuous through dropouts of
//! arbitrary length.

use glam::{Mat3, Quat, Vec3};

use arv_core::{
    AnchorTransform, FrameContext, HitTestSample, Motion, MotionConfig, Plane, easing,
};

use crate::config::TranslateConfig;
use crate::controls::ArControl;
use crate::gesture::Gestures;
use crate::scene::{Indicator, IndicatorKind, SceneWriter};

/// Which surface orientation this control accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    Floor,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Waiting,
    Translating,
    /// Settling the hover offset back to the surface after release.
    /// Floor only; the wall variant releases instantly.
    Bouncing,
}

/// Rotation aligning an object to a wall: +Z along the outward wall
/// normal, up kept along world up.
pub fn wall_basis(normal: Vec3) -> Quat {
    let z = normal.normalize_or_zero();
    let up = Vec3::Y - z * Vec3::Y.dot(z);
    let y = if up.length_squared() > 1e-8 {
        up.normalize()
    } else {
        Vec3::Y
    };
    let x = y.cross(z).normalize_or_zero();
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Drags the anchored object along a detected floor or wall.
pub struct ArTranslateControl {
    mode: SurfaceMode,
    config: TranslateConfig,
    enabled: bool,
    state: DragState,
    drag_plane: Plane,
    surface_normal: Vec3,
    wall_rotation: Quat,
    /// Current drag target, on the (hover-offset) drag plane.
    position: Vec3,
    /// Hover offset baked into the drag plane while translating.
    hover: f32,
    /// Surface point the bounce settles onto.
    settle_position: Vec3,
    float_motion: Motion,
    bounce_motion: Motion,
}

impl ArTranslateControl {
    pub fn new(mode: SurfaceMode, config: &TranslateConfig) -> Self {
        let surface_normal = match mode {
            SurfaceMode::Floor => Vec3::Y,
            SurfaceMode::Wall => Vec3::Z,
        };
        Self {
            mode,
            config: config.clone(),
            enabled: true,
            state: DragState::Waiting,
            drag_plane: Plane::new(surface_normal, 0.0),
            surface_normal,
            wall_rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            hover: 0.0,
            settle_position: Vec3::ZERO,
            float_motion: Motion::new(MotionConfig {
                duration_ms: config.hover_period_ms,
                looped: true,
                easing: easing::sine_wave,
                ..Default::default()
            }),
            bounce_motion: Motion::new(MotionConfig {
                duration_ms: config.bounce_duration_ms,
                easing: easing::ease_out_cubic,
                ..Default::default()
            }),
        }
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    /// Whether a hit-test normal matches this control's surface mode.
    /// The ambiguous band between the wall and floor thresholds is
    /// rejected by both modes.
    pub fn orientation_matches(&self, normal: Vec3) -> bool {
        let up_dot = normal.dot(Vec3::Y);
        match self.mode {
            SurfaceMode::Floor => up_dot > self.config.floor_normal_threshold,
            SurfaceMode::Wall => up_dot.abs() < self.config.wall_normal_threshold,
        }
    }

    /// Basis-aligned rotation for the wall variant.
    pub fn surface_rotation(&self) -> Quat {
        self.wall_rotation
    }

    fn ring_indicator(&self) -> Indicator {
        Indicator::PlacementRing {
            position: self.position - self.surface_normal * self.hover,
            rotation: Quat::from_rotation_arc(Vec3::Y, self.surface_normal),
        }
    }
}

impl ArControl for ArTranslateControl {
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
        self.state != DragState::Waiting
    }

    fn wants(&self, gesture: Gestures, touching_object: bool) -> bool {
        gesture.intersects(Gestures::ONE_FINGER) && touching_object
    }

    fn on_placement(&mut self, hit: &HitTestSample) {
        self.surface_normal = hit.normal.normalize_or_zero();
        self.drag_plane = Plane::from_normal_point(self.surface_normal, hit.position);
        self.position = hit.position;
        if self.mode == SurfaceMode::Wall {
            self.wall_rotation = wall_basis(self.surface_normal);
        }
    }

    fn activate(&mut self, _ctx: &FrameContext, anchor: &AnchorTransform, _gesture: Gestures) {
        self.state = DragState::Translating;
        self.hover = match self.mode {
            SurfaceMode::Floor => self.config.hover_height,
            SurfaceMode::Wall => 0.0,
        };

        // Snapshot the drag plane at the last known anchor, lifted by the
        // hover offset along the stored normal.
        let n = self.surface_normal;
        self.drag_plane = Plane::new(n, -(n.dot(anchor.position) + self.hover));
        self.position = anchor.position + n * self.hover;

        self.float_motion.reset(0.0);
        self.float_motion.set_end_delta(1.0);
        tracing::debug!(mode = ?self.mode, "translation started");
    }

    fn deactivate(&mut self, scene: &mut dyn SceneWriter) {
        scene.hide_indicator(IndicatorKind::PlacementRing);
        if self.state != DragState::Translating {
            return;
        }

        if self.mode == SurfaceMode::Floor && self.hover > 0.0 {
            self.state = DragState::Bouncing;
            self.settle_position = self.position - self.surface_normal * self.hover;
            self.bounce_motion.reset(self.hover);
            self.bounce_motion.set_end_delta(-self.hover);
        } else {
            self.state = DragState::Waiting;
        }
    }

    fn process(&mut self, ctx: &FrameContext, _anchor: &AnchorTransform) {
        if self.state != DragState::Translating {
            return;
        }
        let Some(ray) = ctx.pointer_ray else {
            return;
        };

        let confident = ctx.hit.filter(|h| self.orientation_matches(h.normal));
        if let Some(hit) = confident {
            // Fresh, confidently-oriented sample: refresh the plane at the
            // surface. A new basis is adopted only past the jitter
            // threshold.
            let degrees = self.surface_normal.angle_between(hit.normal).to_degrees();
            if degrees >= self.config.rebake_angle_deg {
                tracing::debug!(degrees, "surface basis re-baked");
                self.surface_normal = hit.normal.normalize_or_zero();
                if self.mode == SurfaceMode::Wall {
                    self.wall_rotation = wall_basis(self.surface_normal);
                }
            }
            self.drag_plane = Plane::from_normal_point(
                self.surface_normal,
                hit.position + self.surface_normal * self.hover,
            );
        }

        // With or without a sample, the pointer ray against the stored
        // plane yields the contact point. A parallel ray skips the frame.
        if let Some(point) = ray.intersect_plane(&self.drag_plane) {
            self.position = point;
        }
    }

    fn update(&mut self, delta_ms: f32, anchor: &mut AnchorTransform, scene: &mut dyn SceneWriter) {
        match self.state {
            DragState::Waiting => {}
            DragState::Translating => {
                self.float_motion.update(delta_ms);
                let float = match self.mode {
                    SurfaceMode::Floor => self.float_motion.val() * self.config.hover_amplitude,
                    SurfaceMode::Wall => 0.0,
                };
                anchor.position = self.position + self.surface_normal * float;
                if self.mode == SurfaceMode::Wall {
                    anchor.rotation = self.wall_rotation;
                }
                scene.show_indicator(self.ring_indicator());
            }
            DragState::Bouncing => {
                self.bounce_motion.update(delta_ms);
                anchor.position =
                    self.settle_position + self.surface_normal * self.bounce_motion.val();
                if !self.bounce_motion.is_activated() {
                    self.state = DragState::Waiting;
                    tracing::debug!("bounce settled");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingScene;
    use arv_core::{CameraFrame, Ray};
    use glam::{Mat4, Vec2};

    const EPS: f32 = 1e-3;

    fn frame(pointer_ray: Option<Ray>, hit: Option<HitTestSample>) -> FrameContext {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.5, 3.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        FrameContext {
            touches: vec![],
            pointer_ray,
            hit,
            delta_ms: 16.0,
            camera: CameraFrame::new(view.inverse(), proj),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    fn floor_hit(x: f32, z: f32) -> HitTestSample {
        HitTestSample {
            position: Vec3::new(x, 0.0, z),
            normal: Vec3::Y,
        }
    }

    fn ray_to(target: Vec3) -> Ray {
        let origin = Vec3::new(0.0, 1.5, 3.0);
        Ray::new(origin, target - origin)
    }

    fn activated_floor() -> (ArTranslateControl, AnchorTransform) {
        let config = TranslateConfig {
            hover_amplitude: 0.0, // keep positions exact in tests
            ..Default::default()
        };
        let mut control = ArTranslateControl::new(SurfaceMode::Floor, &config);
        let anchor = AnchorTransform::default();
        control.on_placement(&floor_hit(0.0, 0.0));
        control.activate(&frame(None, None), &anchor, Gestures::ONE_FINGER);
        (control, anchor)
    }

    #[test]
    fn confident_hit_moves_along_surface() {
        let (mut control, mut anchor) = activated_floor();
        let mut scene = RecordingScene::default();
        let hover = control.config.hover_height;

        let target = Vec3::new(0.5, hover, 0.5);
        let ctx = frame(Some(ray_to(target)), Some(floor_hit(0.5, 0.5)));
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);

        assert!((anchor.position.y - hover).abs() < EPS);
        assert!((anchor.position.x - 0.5).abs() < 0.05);
    }

    #[test]
    fn fallback_holds_plane_through_dropout() {
        let (mut control, mut anchor) = activated_floor();
        let mut scene = RecordingScene::default();
        let hover = control.config.hover_height;

        // Establish the plane with one confident sample.
        let ctx = frame(
            Some(ray_to(Vec3::new(0.0, hover, 0.0))),
            Some(floor_hit(0.0, 0.0)),
        );
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);

        // N frames with no hit sample but a moving pointer ray: every
        // reported position must be the exact ray/plane intersection.
        let plane = Plane::new(Vec3::Y, -hover);
        for i in 1..=10 {
            let target = Vec3::new(0.1 * i as f32, hover, 0.05 * i as f32);
            let ray = ray_to(target);
            let ctx = frame(Some(ray), None);
            control.process(&ctx, &anchor);
            control.update(16.0, &mut anchor, &mut scene);

            let expected = ray.intersect_plane(&plane).unwrap();
            assert!(
                (anchor.position - expected).length() < EPS,
                "frame {i}: {:?} vs {:?}",
                anchor.position,
                expected
            );
        }

        // Tracking resumes on the same surface: no discontinuity.
        let before = anchor.position;
        let ctx = frame(Some(ray_to(before)), Some(floor_hit(before.x, before.z)));
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);
        assert!((anchor.position - before).length() < EPS);
    }

    #[test]
    fn ambiguous_orientation_rejected_by_both_modes() {
        let config = TranslateConfig::default();
        let floor = ArTranslateControl::new(SurfaceMode::Floor, &config);
        let wall = ArTranslateControl::new(SurfaceMode::Wall, &config);

        // |y| in (0.25, 0.75): neither clearly floor nor clearly wall.
        let ambiguous = Vec3::new(0.0, 0.5, 0.866).normalize();
        assert!(!floor.orientation_matches(ambiguous));
        assert!(!wall.orientation_matches(ambiguous));

        assert!(floor.orientation_matches(Vec3::Y));
        assert!(wall.orientation_matches(Vec3::Z));
    }

    #[test]
    fn ambiguous_hit_falls_back_to_stored_plane() {
        let (mut control, mut anchor) = activated_floor();
        let mut scene = RecordingScene::default();
        let hover = control.config.hover_height;

        // A slanted sample must not move the drag plane.
        let slanted = HitTestSample {
            position: Vec3::new(0.0, 0.5, 0.0),
            normal: Vec3::new(0.0, 0.5, 0.866).normalize(),
        };
        let ray = ray_to(Vec3::new(0.3, hover, 0.0));
        let ctx = frame(Some(ray), Some(slanted));
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);

        let plane = Plane::new(Vec3::Y, -hover);
        let expected = ray.intersect_plane(&plane).unwrap();
        assert!((anchor.position - expected).length() < EPS);
    }

    #[test]
    fn small_normal_change_keeps_basis() {
        let (mut control, anchor) = activated_floor();

        // 5 degrees of tilt: inside the jitter threshold, basis kept.
        let tilted = Vec3::new(0.0, 5f32.to_radians().cos(), 5f32.to_radians().sin());
        let ctx = frame(
            Some(ray_to(Vec3::ZERO)),
            Some(HitTestSample {
                position: Vec3::ZERO,
                normal: tilted,
            }),
        );
        control.process(&ctx, &anchor);
        assert_eq!(control.surface_normal, Vec3::Y);

        // 15 degrees: re-baked.
        let tilted = Vec3::new(0.0, 15f32.to_radians().cos(), 15f32.to_radians().sin());
        let ctx = frame(
            Some(ray_to(Vec3::ZERO)),
            Some(HitTestSample {
                position: Vec3::ZERO,
                normal: tilted,
            }),
        );
        control.process(&ctx, &anchor);
        assert!((control.surface_normal - tilted).length() < EPS);
    }

    #[test]
    fn release_bounces_to_surface_and_settles() {
        let (mut control, mut anchor) = activated_floor();
        let mut scene = RecordingScene::default();
        let hover = control.config.hover_height;

        let ctx = frame(
            Some(ray_to(Vec3::new(0.2, hover, 0.2))),
            Some(floor_hit(0.2, 0.2)),
        );
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);
        assert!(anchor.position.y > 0.0);

        control.deactivate(&mut scene);
        assert!(control.is_active(), "bounce still animating");
        assert!(scene.visible_indicator(IndicatorKind::PlacementRing).is_none());

        // Advance past the bounce duration: object rests on the floor.
        for _ in 0..80 {
            control.update(16.0, &mut anchor, &mut scene);
        }
        assert!(anchor.position.y.abs() < EPS);
        assert!(!control.is_active());
    }

    #[test]
    fn wall_mode_outputs_basis_rotation() {
        let config = TranslateConfig::default();
        let mut control = ArTranslateControl::new(SurfaceMode::Wall, &config);
        let mut anchor = AnchorTransform::default();
        let mut scene = RecordingScene::default();

        control.on_placement(&HitTestSample {
            position: Vec3::new(0.0, 1.0, -2.0),
            normal: Vec3::Z,
        });
        control.activate(&frame(None, None), &anchor, Gestures::ONE_FINGER);

        let ctx = frame(
            Some(ray_to(Vec3::new(0.5, 1.0, -2.0))),
            Some(HitTestSample {
                position: Vec3::new(0.5, 1.0, -2.0),
                normal: Vec3::Z,
            }),
        );
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);

        // Object +Z must face out of the wall, up stays up.
        let out = anchor.rotation * Vec3::Z;
        assert!((out - Vec3::Z).length() < EPS);
        let up = anchor.rotation * Vec3::Y;
        assert!((up - Vec3::Y).length() < EPS);
    }

    #[test]
    fn parallel_ray_retains_prior_position() {
        let (mut control, mut anchor) = activated_floor();
        let mut scene = RecordingScene::default();
        let hover = control.config.hover_height;

        let ctx = frame(
            Some(ray_to(Vec3::new(0.4, hover, 0.0))),
            Some(floor_hit(0.4, 0.0)),
        );
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);
        let before = anchor.position;

        // Horizontal ray, parallel to the floor plane.
        let parallel = Ray::new(Vec3::new(0.0, 1.5, 3.0), Vec3::new(1.0, 0.0, 0.0));
        let ctx = frame(Some(parallel), None);
        control.process(&ctx, &anchor);
        control.update(16.0, &mut anchor, &mut scene);
        assert!((anchor.position - before).length() < EPS);
    }
}
