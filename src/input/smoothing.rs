//! Smoothed camera intent.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Below this magnitude the smoothed intent snaps to zero.
const SETTLE_EPSILON: f32 = 1e-3;

/// Camera rotation and zoom the player is asking for, filtered over time.
///
/// Raw intent jumps between zero and full speed as keys go down and up. The
/// filter eases towards the raw value at a frame-rate independent rate:
/// `alpha = 1 - exp(-rate * dt)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraIntent {
    pub rotation: Vec2,
    pub zoom: f32,
}

impl CameraIntent {
    /// Ease towards `target` over `dt` seconds.
    ///
    /// A non-positive `rate` disables smoothing.
    pub fn update(&mut self, target: CameraIntent, rate: f32, dt: f32) {
        let alpha = if rate > 0.0 {
            1.0 - (-rate * dt.max(0.0)).exp()
        } else {
            1.0
        };

        self.rotation = self.rotation.lerp(target.rotation, alpha);
        self.zoom += (target.zoom - self.zoom) * alpha;

        if target.is_zero() && self.rotation.length() < SETTLE_EPSILON {
            self.rotation = Vec2::ZERO;
        }
        if target.zoom == 0.0 && self.zoom.abs() < SETTLE_EPSILON {
            self.zoom = 0.0;
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rotation == Vec2::ZERO && self.zoom == 0.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
