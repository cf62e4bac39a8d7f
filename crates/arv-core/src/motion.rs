//! Scalar animation primitive
//!
//! [`Motion`] converts discrete input deltas into smooth, interruptible
//! value changes. Every animated quantity in the control layer (rotation
//! slerp progress, scale, hover offset, orbit yaw/pitch/zoom) is driven by
//! one of these rather than mutated directly.

use crate::easing::{self, Easing};

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap `v` into the half-open interval `[min, max)`.
///
/// Returns `v` unchanged when the interval is unbounded or degenerate.
pub fn circulate(v: f32, min: f32, max: f32) -> f32 {
    let width = max - min;
    if !width.is_finite() || width <= 0.0 {
        return v;
    }
    min + (v - min).rem_euclid(width)
}

/// Inclusive value range for a [`Motion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    /// Unbounded range.
    pub const INFINITE: Self = Self {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::INFINITE
    }
}

/// Construction parameters for a [`Motion`].
#[derive(Clone, Copy)]
pub struct MotionConfig {
    /// Animation duration in milliseconds.
    pub duration_ms: f32,
    /// Looped motions circulate progress through [0, 1) instead of
    /// clamping, for periodic animations.
    pub looped: bool,
    /// Value range. Clamped for non-looped motions.
    pub range: Range,
    /// Easing applied to progress before interpolation.
    pub easing: Easing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300.0,
            looped: false,
            range: Range::INFINITE,
            easing: easing::ease_out_cubic,
        }
    }
}

/// Scalar animation state.
///
/// Invariant: `val == lerp(start, end, easing(progress))` after every
/// [`update`](Self::update), and `val` stays inside the range for
/// non-looped motions.
#[derive(Clone)]
pub struct Motion {
    duration_ms: f32,
    looped: bool,
    range: Range,
    easing: Easing,
    start: f32,
    end: f32,
    val: f32,
    progress: f32,
    activated: bool,
}

impl Motion {
    pub fn new(config: MotionConfig) -> Self {
        let v = if config.looped {
            0.0
        } else {
            config.range.clamp(0.0)
        };
        Self {
            duration_ms: config.duration_ms.max(f32::EPSILON),
            looped: config.looped,
            range: config.range,
            easing: config.easing,
            start: v,
            end: v,
            val: v,
            progress: 0.0,
            activated: false,
        }
    }

    /// Current value.
    pub fn val(&self) -> f32 {
        self.val
    }

    /// Current interpolation target.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the motion is still advancing.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn set_duration(&mut self, duration_ms: f32) {
        self.duration_ms = duration_ms.max(f32::EPSILON);
    }

    /// Stop the motion and pin it at `v` (clamped or circulated into range).
    pub fn reset(&mut self, v: f32) {
        let v = if self.looped {
            circulate(v, self.range.min, self.range.max)
        } else {
            self.range.clamp(v)
        };
        self.start = v;
        self.end = v;
        self.val = v;
        self.progress = 0.0;
        self.activated = false;
    }

    /// Re-base the motion toward a new target offset by `delta`.
    ///
    /// The current value becomes the new start, so an in-flight animation
    /// is interrupted without a visible jump.
    pub fn set_end_delta(&mut self, delta: f32) {
        self.start = self.val;
        self.end = if self.looped {
            self.end + delta
        } else {
            self.range.clamp(self.end + delta)
        };
        self.progress = 0.0;
        self.activated = true;
    }

    /// Advance by `delta_ms` elapsed milliseconds and return the change in
    /// value this tick. Inactive motions return 0.
    pub fn update(&mut self, delta_ms: f32) -> f32 {
        if !self.activated {
            return 0.0;
        }

        self.progress += delta_ms / self.duration_ms;
        if self.looped {
            // Wrap with the overflow carried so sub-frame precision is kept.
            if self.progress >= 1.0 {
                self.progress -= self.progress.floor();
            }
        } else if self.progress >= 1.0 {
            self.progress = 1.0;
            self.activated = false;
        }

        let prev = self.val;
        self.val = lerp(self.start, self.end, (self.easing)(self.progress));
        self.val - prev
    }
}
