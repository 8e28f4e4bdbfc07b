//! Spawn placement relative to the camera view

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::hindrance::HindranceKind;
use crate::platform::CameraView;

/// How far inside the view edge hindrances appear (fraction of the view)
pub const SPAWN_PADDING: f32 = 0.05;

/// Normalized viewport point for a kind.
///
/// - Octopus: bottom edge
/// - Fisher: top edge
/// - Seahorse: left or right edge, 50/50
/// - Blowfish: anywhere inside the padded frame
pub fn viewport_point<R: Rng + ?Sized>(kind: HindranceKind, padding: f32, rng: &mut R) -> Vec2 {
    let padding = padding.clamp(0.0, 0.5);
    match kind {
        HindranceKind::Octopus => Vec2::new(rng.random_range(0.0..=1.0), padding),
        HindranceKind::Fisher => Vec2::new(rng.random_range(0.0..=1.0), 1.0 - padding),
        HindranceKind::Seahorse => {
            let x = if rng.random_bool(0.5) {
                padding
            } else {
                1.0 - padding
            };
            Vec2::new(x, rng.random_range(0.0..=1.0))
        }
        HindranceKind::Blowfish => Vec2::new(
            rng.random_range(padding..=1.0 - padding),
            rng.random_range(padding..=1.0 - padding),
        ),
    }
}

/// World position on the gameplay plane (z = 0) for a kind
pub fn spawn_position<R: Rng + ?Sized>(
    kind: HindranceKind,
    padding: f32,
    camera: &dyn CameraView,
    rng: &mut R,
) -> Vec2 {
    let vp = viewport_point(kind, padding, rng);
    let depth = -camera.position().z;
    camera.viewport_to_world(Vec3::new(vp.x, vp.y, depth)).truncate()
}
