//! Ball-ball contact resolution
//!
//! Overlapping pairs are pushed apart by a virtual spring of infinite
//! stiffness: each ball moves half the overlap along the line between centers.

use glam::Vec2;

/// Result of resolving one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCorrection {
    /// Displacement to subtract from the first ball and add to the second
    pub push: Vec2,
}

/// Whether two balls with centers `a`, `b` touch or overlap
#[inline]
pub fn in_contact(a: Vec2, b: Vec2, contact: f32) -> bool {
    (b - a).length_squared() <= contact * contact
}

/// Spring correction for a pair in contact whose center offset is `delta` (`b - a`)
///
/// Callers check [`in_contact`] first. `jitter` is added to `delta` so
/// coincident centers still get a direction. Returns `None` if the offset is
/// still degenerate after jitter.
pub fn spring_correction(delta: Vec2, jitter: Vec2, contact: f32) -> Option<PairCorrection> {
    let delta = delta + jitter;
    let d = delta.length();
    if d <= f32::EPSILON * contact {
        return None;
    }

    let c = 0.5 * (contact - d) / d;
    if !c.is_finite() {
        return None;
    }
    Some(PairCorrection { push: delta * c })
}
