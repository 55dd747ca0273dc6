//! Length-limited tether between two balls.

use raylib::prelude::*;
use tracing::debug;

use crate::body::Ball;

/// A tether that applies no force while shorter than its maximum length and
/// clamps endpoint positions once stretched past it.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    /// Maximum allowed distance between the endpoints, in pixels.
    pub max_length: f32,
}

/// Drawing data for a spring: a bar from `origin`, `length` pixels long,
/// rotated by `angle_deg`.
#[derive(Clone, Copy, Debug)]
pub struct SpringGeometry {
    /// Endpoint the bar is anchored at.
    pub origin: Vector2,
    /// Current endpoint distance in pixels.
    pub length: f32,
    /// Bar rotation in degrees.
    pub angle_deg: f32,
}

impl Spring {
    /// Create a tether with the given maximum length.
    pub const fn new(max_length: f32) -> Self {
        Self { max_length }
    }

    /// Clamp the endpoints back together if they are further apart than
    /// `max_length`.
    ///
    /// The correction is split evenly when both balls are free; a pinned
    /// ball stays put and the free one absorbs the whole excess. Coincident
    /// endpoints are left alone.
    pub fn constrain(&self, a: &mut Ball, b: &mut Ball) {
        let diff = b.position - a.position;
        let length = diff.length();
        if length <= self.max_length || length == 0.0 {
            return;
        }

        let direction = diff / length;
        let excess = length - self.max_length;
        debug!(length, excess, "tether stretched past max length");

        match (a.pinned, b.pinned) {
            (false, false) => {
                a.position += direction * (excess * 0.5);
                b.position -= direction * (excess * 0.5);
            }
            (true, false) => b.position -= direction * excess,
            (false, true) => a.position += direction * excess,
            (true, true) => {}
        }
    }

    /// Geometry for drawing the tether between the two balls.
    pub fn geometry(a: &Ball, b: &Ball) -> SpringGeometry {
        let diff = b.position - a.position;
        SpringGeometry {
            origin: a.position,
            length: diff.length(),
            angle_deg: diff.y.atan2(diff.x).to_degrees(),
        }
    }
}
