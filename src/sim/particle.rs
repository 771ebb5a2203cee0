//! A single ball on the table
//!
//! Particles never reach back into their system: bounds, timestep and screen
//! geometry are handed in by the caller on every call.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::convert::ScreenConverter;
use crate::settings::SimConfig;

/// Opaque pointer identifier supplied by the host's input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u32);

/// Physical parameters fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleParams {
    pub mass: f32,
    /// Fraction of implied velocity kept per step (`1 - friction`)
    pub friction_retention: f32,
    /// Signed charge, `None` when the ball ignores the field
    pub charge: Option<f32>,
    /// Raw charge draw, used for shading even when uncharged
    pub tint_jitter: f32,
}

impl ParticleParams {
    /// Draw randomized parameters the way every ball on the table is made
    pub fn random<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        let r1 = (rng.random::<f32>() - 0.5) * config.friction_jitter;
        let r2 = rng.random::<f32>() + 0.5;
        let r3 = (rng.random::<f32>() - 0.5) * config.charge_jitter;
        let charged = rng.random_bool(config.charge_probability);

        Self {
            mass: config.mass_base + config.mass_base * r2,
            friction_retention: 1.0 - config.friction + r1,
            charge: charged.then_some(r3),
            tint_jitter: r3,
        }
    }
}

/// A ball, integrated with time-corrected Verlet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) pos: Vec2,
    prev_pos: Vec2,
    accel: Vec2,
    params: ParticleParams,
    scale_factor: f32,
    radius: f32,
    pinned_by: Option<PointerId>,
}

impl Particle {
    /// Create a particle at rest at the origin
    pub fn new(params: ParticleParams, config: &SimConfig) -> Self {
        let scale_factor = params.mass / config.nominal_mass;
        Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            accel: Vec2::ZERO,
            params,
            scale_factor,
            radius: config.ball_diameter * scale_factor / 2.0,
            pinned_by: None,
        }
    }

    pub fn random<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        Self::new(ParticleParams::random(config, rng), config)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn previous_position(&self) -> Vec2 {
        self.prev_pos
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.accel
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.params.mass
    }

    #[inline]
    pub fn friction_retention(&self) -> f32 {
        self.params.friction_retention
    }

    #[inline]
    pub fn charge(&self) -> Option<f32> {
        self.params.charge
    }

    #[inline]
    pub fn tint_jitter(&self) -> f32 {
        self.params.tint_jitter
    }

    /// Sprite scale relative to a nominal-mass ball (`mass / nominal_mass`)
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    /// Set position and history directly; `prev == pos` places it at rest
    pub(crate) fn place(&mut self, pos: Vec2, prev: Vec2) {
        self.pos = pos;
        self.prev_pos = prev;
    }

    /// Advance one step under tilt and field forces
    ///
    /// `dt_ratio` is `dt / dt_prev`. Pinned particles are left alone.
    pub fn integrate(&mut self, tilt: Vec2, field: Vec2, dt: f32, dt_ratio: f32) {
        if self.pinned_by.is_some() {
            return;
        }

        let mass = self.params.mass;
        let gravity = -tilt * mass;
        let coulomb = match self.params.charge {
            Some(charge) => field * mass * charge,
            None => Vec2::ZERO,
        };
        // F = mA, kept explicit rather than cancelling the mass
        let accel = (gravity + coulomb) / mass;

        // x(t+dt) = x(t) + (1-f) * (x(t) - x(t-dt)) * (dt/dt_prev) + a(t) * dt^2
        let inertia = (self.pos - self.prev_pos) * (self.params.friction_retention * dt_ratio);
        let next = self.pos + inertia + accel * (dt * dt);

        self.prev_pos = self.pos;
        self.pos = next;
        self.accel = accel;
    }

    /// Keep the ball inside the box; returns whether it had to move
    ///
    /// Only the current position is clamped. Leaving `prev_pos` untouched
    /// gives a damped rebound on the next step.
    pub fn clamp_to_bounds(&mut self, half_width: f32, half_height: f32) -> bool {
        let max = Vec2::new(
            (half_width - self.radius).max(0.0),
            (half_height - self.radius).max(0.0),
        );
        let clamped = self.pos.clamp(-max, max);
        let moved = clamped != self.pos;
        self.pos = clamped;
        moved
    }

    /// Whether a point (meters) falls inside the ball's rendered sprite box
    pub fn hit_test(&self, point: Vec2, converter: &ScreenConverter) -> bool {
        let half = converter.sprite_half_extents(self.radius * 2.0);
        let offset = (point - self.pos).abs();
        offset.x <= half.x && offset.y <= half.y
    }

    /// Hand control of the position to a pointer (last pin wins)
    pub fn pin(&mut self, pointer: PointerId) {
        self.pinned_by = Some(pointer);
    }

    pub fn unpin(&mut self) {
        self.pinned_by = None;
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned_by.is_some()
    }

    #[inline]
    pub fn is_pinned_by(&self, pointer: PointerId) -> bool {
        self.pinned_by == Some(pointer)
    }

    pub fn pinned_by(&self) -> Option<PointerId> {
        self.pinned_by
    }

    /// Drag a pinned ball to `pos`
    ///
    /// History is kept, so on release the ball carries the implied velocity
    /// of the drag back into integrated motion.
    pub fn move_to(&mut self, pos: Vec2) {
        if self.pinned_by.is_some() {
            self.pos = pos;
        }
    }
}
