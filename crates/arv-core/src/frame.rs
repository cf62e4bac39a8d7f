//! Per-frame value types exchanged with the host
//!
//! The host (AR session / render loop) pushes a [`FrameContext`] into the
//! control layer once per rendered frame; the control layer's sole output
//! is an [`AnchorTransform`]. No platform event wiring lives here.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use crate::geometry::Ray;

/// Raw touch position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize into [0, 1] per axis against the viewport size.
    pub fn normalized(&self, viewport: Vec2) -> Vec2 {
        Vec2::new(self.x / viewport.x.max(1.0), self.y / viewport.y.max(1.0))
    }
}

/// One hit-test sample delivered by the AR runtime this frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitTestSample {
    /// Surface contact point in world space.
    pub position: Vec3,
    /// Surface normal, unit length.
    pub normal: Vec3,
}

/// Camera state for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame {
    /// Camera local-to-world matrix.
    pub world: Mat4,
    /// Projection matrix.
    pub proj: Mat4,
}

impl CameraFrame {
    pub fn new(world: Mat4, proj: Mat4) -> Self {
        Self { world, proj }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.world.w_axis.xyz()
    }

    /// World-to-view matrix.
    pub fn view(&self) -> Mat4 {
        self.world.inverse()
    }

    /// Project a world point to normalized device coordinates.
    ///
    /// No behind-camera or off-screen guard: callers that sweep angles
    /// around this point accept jitter at extreme poses.
    pub fn project_to_ndc(&self, point: Vec3) -> Vec2 {
        let clip = self.proj * self.view() * point.extend(1.0);
        clip.xy() / clip.w
    }

    /// Vertical field of view in radians, recovered from the projection
    /// matrix.
    pub fn fov_y(&self) -> f32 {
        2.0 * (1.0 / self.proj.y_axis.y).atan()
    }

    /// Viewport aspect ratio (width / height) from the projection matrix.
    pub fn aspect(&self) -> f32 {
        self.proj.y_axis.y / self.proj.x_axis.x
    }
}

/// Everything the control layer consumes in one frame.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Active touch positions, in pixels.
    pub touches: Vec<TouchPoint>,
    /// Tracked-input pointer ray, available even when hit-testing fails.
    pub pointer_ray: Option<Ray>,
    /// Best hit-test sample this frame, if any.
    pub hit: Option<HitTestSample>,
    /// Elapsed time since the previous frame, milliseconds.
    pub delta_ms: f32,
    pub camera: CameraFrame,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl FrameContext {
    /// Viewport aspect as height / width, the classifier's convention.
    pub fn deadzone_aspect(&self) -> f32 {
        self.viewport.y / self.viewport.x.max(1.0)
    }
}

/// World transform of the anchored object: the subsystem's sole output,
/// written once per frame by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for AnchorTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}
