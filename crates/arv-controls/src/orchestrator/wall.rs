//! Wall-anchored AR orchestrator

use std::future::Future;

use glam::Vec3;

use arv_core::{AnchorTransform, BoundingSphere, FrameContext, HitTestSample};

use crate::config::{ControlConfig, ScaleConfig};
use crate::controls::{ArControl, ArScaleControl, ArTranslateControl, SurfaceMode, wall_basis};
use crate::orchestrator::{ControlError, GestureSession, PlacementState};
use crate::scene::{Indicator, IndicatorKind, SceneWriter};
use crate::session::{HitTestSource, SessionError};

/// Wall control set: wall translation and pinch scale. The object must be
/// grabbed (finger on the object) to translate; there is no free-space
/// rotation against a wall, orientation follows the wall basis.
pub struct WallControl {
    session: GestureSession,
    source: Option<HitTestSource>,
    placement: PlacementState,
    anchor: AnchorTransform,
    bounds: BoundingSphere,
    scale_config: ScaleConfig,
    wall_threshold: f32,
}

impl WallControl {
    pub fn new(config: &ControlConfig, bounds: BoundingSphere) -> Self {
        let mut scale = ArScaleControl::new(&config.scale);
        scale.set_badge_offset(bounds.radius);

        let controls: Vec<Box<dyn ArControl>> = vec![
            Box::new(ArTranslateControl::new(SurfaceMode::Wall, &config.translate)),
            Box::new(scale),
        ];

        Self {
            session: GestureSession::new(config.deadzone.size, controls),
            source: None,
            placement: PlacementState::Searching,
            anchor: AnchorTransform::default(),
            bounds,
            scale_config: config.scale.clone(),
            wall_threshold: config.translate.wall_normal_threshold,
        }
    }

    /// Await the platform's one-shot hit-test source acquisition.
    pub async fn bootstrap<F>(&mut self, acquire: F) -> Result<(), ControlError>
    where
        F: Future<Output = Result<HitTestSource, SessionError>>,
    {
        let source = acquire.await?;
        tracing::info!(space = source.reference_space(), "hit-test source acquired");
        self.source = Some(source);
        Ok(())
    }

    pub fn placement(&self) -> PlacementState {
        self.placement
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

    pub fn on_gesture_start(&mut self, ctx: &FrameContext) -> Result<(), ControlError> {
        if self.source.is_none() {
            return Err(ControlError::NotBootstrapped);
        }
        if self.placement != PlacementState::Placed {
            return Err(ControlError::NotPlaced);
        }
        self.session.start(ctx, &self.anchor, Some(&self.bounds));
        Ok(())
    }

    pub fn on_gesture_end(&mut self, scene: &mut dyn SceneWriter) {
        self.session.end(scene);
    }

    pub fn update(
        &mut self,
        ctx: &FrameContext,
        scene: &mut dyn SceneWriter,
    ) -> Result<AnchorTransform, ControlError> {
        if self.source.is_none() {
            return Err(ControlError::NotBootstrapped);
        }

        match self.placement {
            PlacementState::Searching => self.search(ctx, scene),
            PlacementState::Placed => {
                self.session.drive(ctx, &mut self.anchor, scene);
                scene.set_anchor_transform(&self.anchor);
            }
        }
        Ok(self.anchor.clone())
    }

    fn search(&mut self, ctx: &FrameContext, scene: &mut dyn SceneWriter) {
        let confident = ctx
            .hit
            .filter(|h| h.normal.dot(Vec3::Y).abs() < self.wall_threshold);

        match (confident, ctx.hit) {
            (Some(hit), _) => self.place(ctx, &hit, scene),
            (None, Some(hit)) => {
                scene.show_indicator(Indicator::PlacementRing {
                    position: hit.position,
                    rotation: glam::Quat::from_rotation_arc(Vec3::Y, hit.normal),
                });
            }
            (None, None) => scene.hide_indicator(IndicatorKind::PlacementRing),
        }
    }

    fn place(&mut self, ctx: &FrameContext, hit: &HitTestSample, scene: &mut dyn SceneWriter) {
        self.anchor.position = hit.position;
        self.anchor.rotation = wall_basis(hit.normal);
        self.anchor.scale =
            ArScaleControl::initial_scale(&self.scale_config, &ctx.camera, &self.bounds, hit.position);
        for control in self.session.controls_mut() {
            control.on_placement(hit);
        }
        scene.hide_indicator(IndicatorKind::PlacementRing);
        scene.set_anchor_transform(&self.anchor);
        self.placement = PlacementState::Placed;
        tracing::info!(position = ?hit.position, "object placed on wall");
    }
}
