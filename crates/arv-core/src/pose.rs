//! Orbit camera pose value object

use glam::Vec3;

use crate::motion::circulate;

/// Pitch is kept just short of the poles to avoid a degenerate view basis.
pub const PITCH_RANGE_DEG: (f32, f32) = (-89.9, 89.9);

/// Yaw/pitch/zoom orbit pose around a pivot point.
///
/// Immutable by convention: cloned, never aliased, when handed between
/// layers. Mutation goes through the explicit setters so the invariants
/// (pitch clamp, yaw normalization on read) cannot be bypassed.
#[derive(Debug, Clone)]
pub struct Pose {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pivot: Vec3,
}

impl Pose {
    pub fn new(yaw: f32, pitch: f32, zoom: f32, pivot: Vec3) -> Self {
        let mut pose = Self {
            yaw,
            pitch: 0.0,
            zoom,
            pivot,
        };
        pose.set_pitch(pitch);
        pose
    }

    /// Yaw in degrees, normalized into [0, 360).
    pub fn yaw(&self) -> f32 {
        circulate(self.yaw, 0.0, 360.0)
    }

    /// Pitch in degrees, inside [`PITCH_RANGE_DEG`].
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Orbit distance from the pivot.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(PITCH_RANGE_DEG.0, PITCH_RANGE_DEG.1);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub fn set_pivot(&mut self, pivot: Vec3) {
        self.pivot = pivot;
    }

    /// Camera eye position derived from the orbit parameters (Y up).
    pub fn eye_position(&self) -> Vec3 {
        let yaw = self.yaw().to_radians();
        let pitch = self.pitch.to_radians();
        let x = self.zoom * pitch.cos() * yaw.sin();
        let y = self.zoom * pitch.sin();
        let z = self.zoom * pitch.cos() * yaw.cos();
        self.pivot + Vec3::new(x, y, z)
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        self.yaw() == other.yaw()
            && self.pitch == other.pitch
            && self.zoom == other.zoom
            && self.pivot == other.pivot
    }
}
