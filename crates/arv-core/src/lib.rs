//! Math and data-model primitives for the AR viewer control layer
//!
//! This crate has no I/O and no platform dependencies. It holds the
//! building blocks the control layer composes every frame:
//!
//! - [`Motion`] - scalar animation primitive (eased, interruptible)
//! - [`Pose`] - orbit camera pose value object
//! - [`geometry`] - rays, planes, bounding spheres, intersections
//! - [`frame`] - per-frame input/output value types exchanged with the host

pub mod easing;
pub mod frame;
pub mod geometry;
pub mod motion;
pub mod pose;

pub use easing::Easing;
pub use frame::{AnchorTransform, CameraFrame, FrameContext, HitTestSample, TouchPoint};
pub use geometry::{BoundingSphere, Plane, Ray};
pub use motion::{Motion, MotionConfig, Range, circulate, lerp};
pub use pose::Pose;
