//! AR Viewer Controls
//!
//! Gesture-driven manipulation of a single anchored 3D object: a deadzone
//! gesture classifier, per-gesture controls (swirl/swipe rotation,
//! surface-anchored translation, pinch scale), the orchestrators that wire
//! them into a per-frame pipeline, and the matching desktop orbit controls.
//!
//! # Architecture
//!
//! - [`deadzone::DeadzoneChecker`] - Commits each interaction to exactly
//!   one gesture once movement leaves the deadzone
//! - [`controls::ArControl`] - Trait implemented by every per-gesture
//!   control; all output is eased through `Motion`s
//! - [`orchestrator`] - `WebArControl` (floor), `WallControl`,
//!   `HoverControl`: classifier + control set + placement state machine
//! - [`orbit::OrbitControl`] - Mouse/trackpad orbit over a `Pose`
//! - [`scene::SceneWriter`] - Host-implemented write-back seam for the
//!   anchor transform and visual indicators
//!
//! # Module Structure
//!
//! ```text
//! arv-controls/
//! ├── gesture.rs       # Gesture bit flags
//! ├── deadzone.rs      # Gesture classifier
//! ├── controls/        # Per-gesture controls (swirl, swipe, translate, scale)
//! ├── orchestrator/    # Floor / wall / hover orchestrators
//! ├── orbit/           # Desktop orbit controls
//! ├── scene.rs         # Scene write-back trait + indicators
//! ├── session.rs       # One-shot hit-test source handshake
//! └── config.rs        # RON-serializable tunables
//! ```

pub mod config;
pub mod controls;
pub mod deadzone;
pub mod gesture;
pub mod orbit;
pub mod orchestrator;
pub mod scene;
pub mod session;

pub use config::{
    ConfigError, ControlConfig, DeadzoneConfig, OrbitConfig, RotationConfig, ScaleConfig,
    TranslateConfig,
};
pub use controls::{
    ArControl, ArScaleControl, ArSwipeControl, ArSwirlControl, ArTranslateControl, SurfaceMode,
};
pub use deadzone::{DEFAULT_DEADZONE_SIZE, DeadzoneChecker, DeadzoneState};
pub use gesture::Gestures;
pub use orbit::OrbitControl;
pub use orchestrator::{ControlError, HoverControl, PlacementState, WallControl, WebArControl};
pub use scene::{Indicator, IndicatorKind, RecordingScene, SceneWriter};
pub use session::{HitTestSource, SessionError};
