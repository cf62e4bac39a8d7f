//! Gesture orchestrators
//!
//! Each orchestrator owns one gesture classifier and a boxed set of
//! per-gesture controls. Per frame the pipeline always runs in the same
//! order: classifier, a single activation decision, the active control's
//! `process`, every enabled control's `update`, then exactly one anchor
//! transform write into the scene.

use glam::Vec2;
use thiserror::Error;

use arv_core::{AnchorTransform, BoundingSphere, FrameContext};

use crate::controls::ArControl;
use crate::deadzone::DeadzoneChecker;
use crate::gesture::Gestures;
use crate::scene::SceneWriter;
use crate::session::SessionError;

pub mod floor;
pub mod hover;
pub mod wall;

pub use floor::WebArControl;
pub use hover::HoverControl;
pub use wall::WallControl;

/// Placement lifecycle of the anchored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// Waiting for a confidently-oriented surface sample.
    Searching,
    /// Anchored; gestures manipulate the object.
    Placed,
}

/// Host sequencing errors. Sensor conditions (tracking loss, degenerate
/// geometry, ambiguous input) are recovered silently; these are not.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("frame update before the hit-test source was acquired")]
    NotBootstrapped,
    #[error("gesture input before the object was placed")]
    NotPlaced,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Classifier plus control set shared by all orchestrators.
pub(crate) struct GestureSession {
    checker: DeadzoneChecker,
    controls: Vec<Box<dyn ArControl>>,
    active: Option<usize>,
    touching_object: bool,
}

impl GestureSession {
    pub(crate) fn new(deadzone_size: f32, controls: Vec<Box<dyn ArControl>>) -> Self {
        Self {
            checker: DeadzoneChecker::new(deadzone_size),
            controls,
            active: None,
            touching_object: false,
        }
    }

    pub(crate) fn controls(&self) -> &[Box<dyn ArControl>] {
        &self.controls
    }

    pub(crate) fn controls_mut(&mut self) -> &mut [Box<dyn ArControl>] {
        &mut self.controls
    }

    /// OR of the gesture masks of the currently-enabled controls.
    pub(crate) fn testing_mask(&self) -> Gestures {
        self.controls
            .iter()
            .filter(|c| c.is_enabled())
            .fold(Gestures::empty(), |mask, c| mask | c.gestures())
    }

    fn points(ctx: &FrameContext) -> Vec<Vec2> {
        ctx.touches
            .iter()
            .map(|t| t.normalized(ctx.viewport))
            .collect()
    }

    /// Begin an interaction: seed the classifier and, for one-finger
    /// input, ray-test the anchored object's bounds to decide whether the
    /// finger is on the object. `bounds: None` disables that routing and
    /// leaves the bit false.
    pub(crate) fn start(
        &mut self,
        ctx: &FrameContext,
        anchor: &AnchorTransform,
        bounds: Option<&BoundingSphere>,
    ) {
        self.checker.set_aspect(ctx.deadzone_aspect());
        self.checker.set_testing(self.testing_mask());
        self.checker.set_first_input(&Self::points(ctx));

        self.touching_object = match (&ctx.touches[..], ctx.pointer_ray, bounds) {
            ([_], Some(ray), Some(bounds)) => ray
                .intersect_sphere(&bounds.transformed(anchor.position, anchor.scale))
                .is_some(),
            _ => false,
        };
        tracing::debug!(
            fingers = ctx.touches.len(),
            touching = self.touching_object,
            "interaction started"
        );
    }

    /// Run one frame of the pipeline against `anchor`.
    pub(crate) fn drive(
        &mut self,
        ctx: &FrameContext,
        anchor: &mut AnchorTransform,
        scene: &mut dyn SceneWriter,
    ) {
        let gesture = self.checker.check(&Self::points(ctx));

        if self.active.is_none() && !gesture.is_empty() {
            let touching = self.touching_object;
            self.active = self
                .controls
                .iter()
                .position(|c| c.is_enabled() && c.wants(gesture, touching));
            if let Some(index) = self.active {
                self.controls[index].activate(ctx, anchor, gesture);
                tracing::debug!(?gesture, index, "control activated");
            }
        }

        if let Some(index) = self.active {
            self.controls[index].process(ctx, anchor);
        }

        // Inactive controls still tick so residual animations (the bounce
        // settle) finish after release.
        for control in &mut self.controls {
            if control.is_enabled() {
                control.update(ctx.delta_ms, anchor, scene);
            }
        }
    }

    /// End the interaction: deactivate everything, reset the classifier.
    pub(crate) fn end(&mut self, scene: &mut dyn SceneWriter) {
        self.active = None;
        self.touching_object = false;
        for control in &mut self.controls {
            control.deactivate(scene);
        }
        self.checker.cleanup();
    }
}
