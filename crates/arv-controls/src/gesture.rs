//! Gesture vocabulary

use bitflags::bitflags;

bitflags! {
    /// Bitmask of gestures a control can handle or a classifier can emit.
    ///
    /// Orchestrators OR together the masks of their enabled sub-controls
    /// and hand the union to the classifier as the testing set for the
    /// current interaction. The empty set means "no gesture".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Gestures: u32 {
        const ONE_FINGER_HORIZONTAL = 1;
        const ONE_FINGER_VERTICAL = 1 << 1;
        const ONE_FINGER = Self::ONE_FINGER_HORIZONTAL.bits() | Self::ONE_FINGER_VERTICAL.bits();
        const TWO_FINGER_HORIZONTAL = 1 << 2;
        const TWO_FINGER_VERTICAL = 1 << 3;
        const TWO_FINGER = Self::TWO_FINGER_HORIZONTAL.bits() | Self::TWO_FINGER_VERTICAL.bits();
        const PINCH = 1 << 4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_masks_cover_axes() {
        assert!(Gestures::ONE_FINGER.contains(Gestures::ONE_FINGER_HORIZONTAL));
        assert!(Gestures::ONE_FINGER.contains(Gestures::ONE_FINGER_VERTICAL));
        assert!(Gestures::TWO_FINGER.contains(Gestures::TWO_FINGER_VERTICAL));
        assert!(!Gestures::TWO_FINGER.contains(Gestures::PINCH));
    }

    #[test]
    fn bit_values_are_stable() {
        assert_eq!(Gestures::ONE_FINGER.bits(), 3);
        assert_eq!(Gestures::TWO_FINGER.bits(), 12);
        assert_eq!(Gestures::PINCH.bits(), 16);
    }
}
