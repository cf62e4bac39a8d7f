//! Headless replay of a scripted AR session
//!
//! Drives the full frame pipeline without a renderer or an AR runtime:
//! bootstrap, surface search, placement, a one-finger drag through a
//! simulated tracking dropout, release (bounce settle), then a pinch.
//! Doubles as an integration smoke test; transforms are logged instead of
//! rendered.

use glam::{Mat4, Vec2, Vec3};

use arv_controls::{
    ControlConfig, ControlError, HitTestSource, Indicator, IndicatorKind, SceneWriter,
    WebArControl,
};
use arv_core::{AnchorTransform, BoundingSphere, CameraFrame, FrameContext, HitTestSample, Ray, TouchPoint};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const EYE: Vec3 = Vec3::new(0.0, 1.6, 3.0);
const FRAME_MS: f32 = 16.0;

/// Scene that logs every write instead of rendering.
#[derive(Default)]
struct ConsoleScene {
    frames: u64,
}

impl SceneWriter for ConsoleScene {
    fn set_anchor_transform(&mut self, transform: &AnchorTransform) {
        self.frames += 1;
        // Once per simulated second is enough for the log.
        if self.frames % 60 == 0 {
            tracing::info!(
                position = ?transform.position,
                scale = transform.scale,
                "anchor transform"
            );
        }
    }

    fn show_indicator(&mut self, indicator: Indicator) {
        tracing::debug!(kind = ?indicator.kind(), "indicator shown");
    }

    fn hide_indicator(&mut self, kind: IndicatorKind) {
        tracing::debug!(?kind, "indicator hidden");
    }
}

fn camera() -> CameraFrame {
    let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(60f32.to_radians(), VIEWPORT.x / VIEWPORT.y, 0.1, 100.0);
    CameraFrame::new(view.inverse(), proj)
}

fn frame(
    touches: Vec<TouchPoint>,
    pointer_ray: Option<Ray>,
    hit: Option<HitTestSample>,
) -> FrameContext {
    FrameContext {
        touches,
        pointer_ray,
        hit,
        delta_ms: FRAME_MS,
        camera: camera(),
        viewport: VIEWPORT,
    }
}

fn ray_to(target: Vec3) -> Ray {
    Ray::new(EYE, target - EYE)
}

fn floor_hit(x: f32, z: f32) -> HitTestSample {
    HitTestSample {
        position: Vec3::new(x, 0.0, z),
        normal: Vec3::Y,
    }
}

async fn acquire_source() -> Result<HitTestSource, arv_controls::SessionError> {
    // Stands in for the platform's async hit-test source creation.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    Ok(HitTestSource::new("local-floor"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ControlError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arv_replay=info,arv_controls=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AR session replay");

    let config = ControlConfig::default();
    let bounds = BoundingSphere::new(Vec3::ZERO, 0.5);
    let mut control = WebArControl::new(&config, bounds);
    let mut scene = ConsoleScene::default();

    control.bootstrap(acquire_source()).await?;

    // Surface search: a few empty frames, then a confident floor sample.
    for _ in 0..5 {
        control.update(&frame(vec![], None, None), &mut scene)?;
    }
    control.update(&frame(vec![], None, Some(floor_hit(0.0, 0.0))), &mut scene)?;
    tracing::info!(anchor = ?control.anchor().position, "placed");

    // One-finger drag on the object, sliding it along the floor. Tracking
    // drops out halfway; the drag plane carries the translation through.
    let grab = frame(
        vec![TouchPoint::new(400.0, 300.0)],
        Some(ray_to(Vec3::ZERO)),
        None,
    );
    control.on_gesture_start(&grab)?;

    for i in 1..=120 {
        let target = Vec3::new(0.01 * i as f32, 0.0, 0.005 * i as f32);
        let tracking = i <= 60;
        let ctx = frame(
            vec![TouchPoint::new(400.0 - 2.0 * i as f32, 300.0)],
            Some(ray_to(target)),
            tracking.then(|| floor_hit(target.x, target.z)),
        );
        control.update(&ctx, &mut scene)?;
        if i == 61 {
            tracing::info!("tracking dropped, drag continues on the stored plane");
        }
    }
    control.on_gesture_end(&mut scene);
    tracing::info!(anchor = ?control.anchor().position, "drag released");

    // Let the bounce settle back onto the floor.
    for _ in 0..90 {
        control.update(&frame(vec![], None, None), &mut scene)?;
    }
    tracing::info!(anchor = ?control.anchor().position, "settled");

    // Pinch to scale up.
    let pinch_start = frame(
        vec![TouchPoint::new(350.0, 300.0), TouchPoint::new(450.0, 300.0)],
        None,
        None,
    );
    control.on_gesture_start(&pinch_start)?;
    for i in 1..=60 {
        let spread = 50.0 + 2.0 * i as f32;
        let ctx = frame(
            vec![
                TouchPoint::new(400.0 - spread, 300.0),
                TouchPoint::new(400.0 + spread, 300.0),
            ],
            None,
            None,
        );
        control.update(&ctx, &mut scene)?;
    }
    control.on_gesture_end(&mut scene);

    let anchor = control.anchor();
    tracing::info!(position = ?anchor.position, scale = anchor.scale, "replay finished");
    Ok(())
}
