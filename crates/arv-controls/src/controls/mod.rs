//! Per-gesture manipulation controls
//!
//! All controls share one update pattern: `process` ingests this frame's
//! raw samples and moves an internal target, `update` advances the
//! control's [`Motion`](arv_core::Motion)s and writes the eased value into
//! the anchor transform. Input sampling rate is thereby decoupled from
//! rendering rate.

use arv_core::{AnchorTransform, FrameContext, HitTestSample};

use crate::gesture::Gestures;
use crate::scene::SceneWriter;

pub mod scale;
pub mod swipe;
pub mod swirl;
pub mod translate;

pub use scale::ArScaleControl;
pub use swipe::ArSwipeControl;
pub use swirl::ArSwirlControl;
pub use translate::{ArTranslateControl, SurfaceMode, wall_basis};

/// Common interface for the orchestrators' homogeneous control sets.
pub trait ArControl {
    /// Gesture mask this control can handle. Orchestrators OR the masks
    /// of enabled controls into the classifier's testing set.
    fn gestures(&self) -> Gestures;

    fn is_enabled(&self) -> bool;
    fn enable(&mut self);
    /// Disable, deactivating first if a gesture is in flight.
    fn disable(&mut self, scene: &mut dyn SceneWriter);

    fn is_active(&self) -> bool;

    /// Whether this control should take a freshly-committed gesture.
    /// `touching_object` is the orchestrator's finger-on-object bit,
    /// which disambiguates one-finger rotate from one-finger translate.
    fn wants(&self, gesture: Gestures, touching_object: bool) -> bool {
        let _ = touching_object;
        self.gestures().intersects(gesture)
    }

    /// Take ownership of a freshly-committed gesture and seed reference
    /// state from this frame's samples.
    fn activate(&mut self, ctx: &FrameContext, anchor: &AnchorTransform, gesture: Gestures);

    /// End the interaction. Must be safe from any state and must leave no
    /// dangling indicators.
    fn deactivate(&mut self, scene: &mut dyn SceneWriter);

    /// Ingest this frame's raw samples and update the internal target.
    fn process(&mut self, ctx: &FrameContext, anchor: &AnchorTransform);

    /// Advance motions and write the eased output into `anchor`.
    /// Called every frame on every enabled control; inactive controls
    /// without residual animation are a no-op.
    fn update(&mut self, delta_ms: f32, anchor: &mut AnchorTransform, scene: &mut dyn SceneWriter);

    /// Placement hook: the orchestrator just anchored the object on a
    /// confident surface sample.
    fn on_placement(&mut self, hit: &HitTestSample) {
        let _ = hit;
    }
}
