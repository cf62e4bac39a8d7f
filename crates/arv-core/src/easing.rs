//! Easing functions for [`Motion`](crate::Motion)

use std::f32::consts::PI;

/// Easing function: maps normalized progress in [0, 1] to an eased fraction.
pub type Easing = fn(f32) -> f32;

/// No easing.
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-out.
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-out. Default for most control motions.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Bounce ease-out, used for the settle-to-surface animation.
pub fn ease_out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// One full sine period, zero at both ends. Only useful with looped
/// motions (e.g. the hover float animation).
pub fn sine_wave(t: f32) -> f32 {
    (t * PI * 2.0).sin()
}
