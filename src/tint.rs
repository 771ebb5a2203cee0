//! Sprite shading from physical parameters
//!
//! Neutral balls are pushed toward blue by their charge draw. Charged balls
//! gain green, and positive ones also gain red, so positives read yellow and
//! negatives read green.

use crate::sim::Particle;

/// Channel boost for a jitter value in `[-charge_jitter/2, charge_jitter/2)`
#[inline]
fn boost(jitter: f32, charge_jitter: f32) -> i32 {
    (255.0 * (jitter / charge_jitter + 0.5)).floor() as i32
}

#[inline]
fn add_saturating(channel: u8, amount: i32) -> u8 {
    (channel as i32 + amount).clamp(0, 255) as u8
}

/// Shade one RGBA pixel of the base ball sprite
pub fn tint(base: [u8; 4], charge: Option<f32>, tint_jitter: f32, charge_jitter: f32) -> [u8; 4] {
    let [r, g, b, a] = base;
    match charge {
        None => [r, g, add_saturating(b, boost(tint_jitter, charge_jitter)), a],
        Some(_) => {
            let r = if tint_jitter > 0.0 {
                add_saturating(r, boost(tint_jitter, charge_jitter))
            } else {
                r
            };
            let g = add_saturating(g, boost(tint_jitter.abs(), charge_jitter));
            [r, g, b, a]
        }
    }
}

/// Shade a whole RGBA8 sprite for `particle` in place
pub fn tint_sprite(pixels: &mut [u8], particle: &Particle, charge_jitter: f32) {
    for px in pixels.chunks_exact_mut(4) {
        let shaded = tint(
            [px[0], px[1], px[2], px[3]],
            particle.charge(),
            particle.tint_jitter(),
            charge_jitter,
        );
        px.copy_from_slice(&shaded);
    }
}
