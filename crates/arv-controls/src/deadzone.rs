//! Gesture classifier with a movement deadzone
//!
//! While the aggregate movement of an interaction stays inside the
//! deadzone radius the checker withholds judgment; the first test that
//! crosses the radius commits the interaction to exactly one gesture,
//! which is then reported unconditionally until [`DeadzoneChecker::cleanup`].

use glam::Vec2;

use crate::gesture::Gestures;

/// Default deadzone radius, in viewport-width-normalized units.
pub const DEFAULT_DEADZONE_SIZE: f32 = 0.1;

/// Classifier lifecycle state for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadzoneState {
    /// No touches seeded yet.
    Waiting,
    /// Reference positions seeded, movement still inside the deadzone.
    InDeadzone,
    /// Committed to a gesture; sticky until cleanup.
    OutOfDeadzone,
}

/// Deadzone-based gesture classifier.
///
/// Input points are expected normalized per axis into [0, 1]; the aspect
/// correction (y scaled by height/width) makes displacement comparisons
/// isotropic on non-square viewports.
pub struct DeadzoneChecker {
    size: f32,
    aspect: f32,
    testing: Gestures,
    state: DeadzoneState,
    detected: Gestures,
    ref_points: Vec<Vec2>,
    ref_midpoint: Vec2,
    ref_span: f32,
    finger_count: usize,
}

impl Default for DeadzoneChecker {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE_SIZE)
    }
}

impl DeadzoneChecker {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            aspect: 1.0,
            testing: Gestures::empty(),
            state: DeadzoneState::Waiting,
            detected: Gestures::empty(),
            ref_points: Vec::new(),
            ref_midpoint: Vec2::ZERO,
            ref_span: 0.0,
            finger_count: 0,
        }
    }

    pub fn state(&self) -> DeadzoneState {
        self.state
    }

    /// True while judgment is still withheld.
    pub fn in_deadzone(&self) -> bool {
        self.state == DeadzoneState::InDeadzone
    }

    /// Viewport aspect as height / width.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Set of gestures the current interaction may resolve to.
    pub fn set_testing(&mut self, testing: Gestures) {
        self.testing = testing;
    }

    /// Seed reference positions for a new interaction (or a changed
    /// finger count) and enter the deadzone.
    pub fn set_first_input(&mut self, points: &[Vec2]) {
        self.finger_count = points.len();
        self.ref_points = points.iter().map(|p| self.correct(*p)).collect();

        if let [a, b] = self.ref_points[..] {
            self.ref_midpoint = (a + b) * 0.5;
            self.ref_span = (b - a).length();
        }

        self.state = if points.is_empty() {
            DeadzoneState::Waiting
        } else {
            DeadzoneState::InDeadzone
        };
    }

    /// Test this frame's points against the deadzone.
    ///
    /// Returns the committed gesture mask, or empty while undecided. A
    /// finger-count change re-seeds the references and yields empty for
    /// the transition frame: intent does not carry across the transition.
    pub fn check(&mut self, points: &[Vec2]) -> Gestures {
        if self.state == DeadzoneState::OutOfDeadzone {
            return self.detected;
        }

        if points.len() != self.finger_count {
            self.set_first_input(points);
            return Gestures::empty();
        }

        if self.state != DeadzoneState::InDeadzone {
            return Gestures::empty();
        }

        let corrected: Vec<Vec2> = points.iter().map(|p| self.correct(*p)).collect();
        let result = match corrected[..] {
            [p] => self.check_one_finger(p),
            [a, b] => self.check_two_finger(a, b),
            _ => Gestures::empty(),
        };

        if !result.is_empty() {
            self.detected = result;
            self.state = DeadzoneState::OutOfDeadzone;
            tracing::debug!(gesture = ?result, "gesture committed");
        }

        result
    }

    /// Reset to a fresh interaction.
    pub fn cleanup(&mut self) {
        self.state = DeadzoneState::Waiting;
        self.detected = Gestures::empty();
        self.ref_points.clear();
        self.ref_midpoint = Vec2::ZERO;
        self.ref_span = 0.0;
        self.finger_count = 0;
    }

    fn correct(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, p.y * self.aspect)
    }

    fn check_one_finger(&self, p: Vec2) -> Gestures {
        if !self.testing.intersects(Gestures::ONE_FINGER) {
            return Gestures::empty();
        }

        let d = p - self.ref_points[0];
        if d.length() <= self.size {
            return Gestures::empty();
        }

        let gesture = if d.x.abs() > d.y.abs() {
            Gestures::ONE_FINGER_HORIZONTAL
        } else {
            Gestures::ONE_FINGER_VERTICAL
        };
        gesture & self.testing
    }

    fn check_two_finger(&self, a: Vec2, b: Vec2) -> Gestures {
        // Pan is evaluated before pinch: when both could cross in the
        // same frame, the midpoint test wins.
        if self.testing.intersects(Gestures::TWO_FINGER) {
            let d = (a + b) * 0.5 - self.ref_midpoint;
            if d.length() > self.size {
                let gesture = if d.x.abs() > d.y.abs() {
                    Gestures::TWO_FINGER_HORIZONTAL
                } else {
                    Gestures::TWO_FINGER_VERTICAL
                };
                let masked = gesture & self.testing;
                if !masked.is_empty() {
                    return masked;
                }
            }
        }

        if self.testing.contains(Gestures::PINCH) {
            let span = (b - a).length();
            if (span - self.ref_span).abs() > self.size {
                return Gestures::PINCH;
            }
        }

        Gestures::empty()
    }
}
