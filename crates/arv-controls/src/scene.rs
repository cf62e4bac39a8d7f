//! Scene write-back interface
//!
//! The control layer never touches a scene graph directly. The host
//! implements [`SceneWriter`]; the orchestrator writes the anchor
//! transform exactly once per frame, and controls publish or hide their
//! visual indicators through the same seam.

use glam::{Quat, Vec3};

use arv_core::AnchorTransform;

/// Which indicator a [`hide_indicator`](SceneWriter::hide_indicator) call
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Ring on the detected surface (search and drag feedback).
    PlacementRing,
    /// Arrows around the rotation axis while a rotation gesture is live.
    RotationArrows,
    /// Percentage badge shown while pinch-scaling.
    ScaleBadge,
}

/// Indicator payloads pushed to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indicator {
    PlacementRing { position: Vec3, rotation: Quat },
    RotationArrows { position: Vec3, axis: Vec3 },
    ScaleBadge { position: Vec3, percent: f32 },
}

impl Indicator {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            Indicator::PlacementRing { .. } => IndicatorKind::PlacementRing,
            Indicator::RotationArrows { .. } => IndicatorKind::RotationArrows,
            Indicator::ScaleBadge { .. } => IndicatorKind::ScaleBadge,
        }
    }
}

/// Host-implemented sink for the control layer's outputs.
pub trait SceneWriter {
    fn set_anchor_transform(&mut self, transform: &AnchorTransform);
    fn show_indicator(&mut self, indicator: Indicator);
    fn hide_indicator(&mut self, kind: IndicatorKind);
}

/// One recorded [`SceneWriter`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Transform(AnchorTransform),
    Show(Indicator),
    Hide(IndicatorKind),
}

/// Recording scene double for tests and the headless replay binary.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub events: Vec<SceneEvent>,
}

impl RecordingScene {
    pub fn last_transform(&self) -> Option<AnchorTransform> {
        self.events.iter().rev().find_map(|e| match e {
            SceneEvent::Transform(t) => Some(*t),
            _ => None,
        })
    }

    /// The indicator of `kind` currently on screen, if any.
    pub fn visible_indicator(&self, kind: IndicatorKind) -> Option<Indicator> {
        for event in self.events.iter().rev() {
            match event {
                SceneEvent::Show(i) if i.kind() == kind => return Some(*i),
                SceneEvent::Hide(k) if *k == kind => return None,
                _ => {}
            }
        }
        None
    }
}

impl SceneWriter for RecordingScene {
    fn set_anchor_transform(&mut self, transform: &AnchorTransform) {
        self.events.push(SceneEvent::Transform(*transform));
    }

    fn show_indicator(&mut self, indicator: Indicator) {
        self.events.push(SceneEvent::Show(indicator));
    }

    fn hide_indicator(&mut self, kind: IndicatorKind) {
        self.events.push(SceneEvent::Hide(kind));
    }
}
