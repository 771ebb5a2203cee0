//! The ball table: a fixed set of particles in a box
//!
//! Per frame: integrate every free particle, then alternate pairwise spring
//! corrections with wall clamping until a pass separates no pair or the pass
//! cap is hit.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::FrameClock;
use super::collision::{in_contact, spring_correction};
use super::particle::{Particle, PointerId};
use crate::convert::ScreenConverter;
use crate::instance::ParticleInstance;
use crate::settings::{ConfigError, SimConfig};

/// Outcome of one run of the collision solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Passes run, capped at `max_passes`
    pub passes: u32,
    /// The final pass neither separated a pair nor clamped a ball, so every
    /// pair is apart and every ball is inside the walls
    pub settled: bool,
}

/// The whole table: balls, walls, frame timing and the jitter RNG
///
/// This is the only type a host drives. Call [`Self::on_viewport_resized`]
/// when the display changes, [`Self::update`] once per frame, and the pointer
/// methods from the input layer, then read positions back for drawing. All
/// mutation goes through `&mut self`, one call at a time.
pub struct ParticleSystem {
    config: SimConfig,
    /// Fixed for the system's lifetime; order drives pairwise iteration
    particles: Vec<Particle>,
    half_width: f32,
    half_height: f32,
    clock: FrameClock,
    rng: Pcg32,
    last_solve: SolverStats,
}

impl ParticleSystem {
    /// Build a table of `config.particle_count` randomized balls, all at the origin
    ///
    /// Bounds start at zero extent until [`Self::on_viewport_resized`] is called.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|_| Particle::random(&config, &mut rng))
            .collect();

        let charged = particles.iter().filter(|p| p.charge().is_some()).count();
        log::info!(
            "Particle system ready: {} balls ({} charged), seed {:#x}",
            particles.len(),
            charged,
            config.seed
        );

        Ok(Self {
            config,
            particles,
            half_width: 0.0,
            half_height: 0.0,
            clock: FrameClock::new(),
            rng,
            last_solve: SolverStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Advance one frame
    ///
    /// `tilt` drives the gravity-like force, `field` drives the charge force,
    /// `timestamp` is a monotonic clock in nanoseconds. The first two frames
    /// after construction or [`Self::reset_clock`] only record timing.
    pub fn update(&mut self, tilt_x: f32, tilt_y: f32, field_x: f32, field_y: f32, timestamp: i64) {
        let tilt = Vec2::new(tilt_x, tilt_y);
        let field = Vec2::new(field_x, field_y);
        if !tilt.is_finite() || !field.is_finite() {
            log::warn!("Rejecting frame with non-finite input: tilt={tilt}, field={field}");
            return;
        }

        if let Some(step) = self.clock.advance(timestamp) {
            for particle in &mut self.particles {
                particle.integrate(tilt, field, step.dt, step.dt_ratio);
            }
        }

        self.last_solve = resolve_collisions(
            &mut self.particles,
            &mut self.rng,
            self.half_width,
            self.half_height,
            &self.config,
        );
    }

    /// Forget frame timing; the next two updates bootstrap without integrating
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Recompute the walls from the viewport's physical size (meters)
    pub fn on_viewport_resized(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            log::warn!("Ignoring non-finite viewport size {width} x {height}");
            return;
        }
        self.half_width = width.max(0.0) * 0.5;
        self.half_height = height.max(0.0) * 0.5;
        log::debug!(
            "Viewport resized: bounds ±{:.4} x ±{:.4} m",
            self.half_width,
            self.half_height
        );
    }

    /// Half extents of the box (meters)
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Collision passes run by the most recent update
    pub fn last_passes(&self) -> u32 {
        self.last_solve.passes
    }

    pub fn last_solve(&self) -> SolverStats {
        self.last_solve
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.particles.get(index).map(Particle::position)
    }

    /// Snapshot for an instanced sprite renderer
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from_particle).collect()
    }

    /// Pin the first ball (in table order) whose sprite contains `point`
    ///
    /// A pointer holds at most one ball, so any ball it already held is
    /// released first. Returns the index of the pinned ball.
    pub fn pin_particle_at(
        &mut self,
        point: Vec2,
        pointer: PointerId,
        converter: &ScreenConverter,
    ) -> Option<usize> {
        if !point.is_finite() {
            return None;
        }
        let index = self
            .particles
            .iter()
            .position(|p| p.hit_test(point, converter))?;

        self.release_pointer(pointer);
        self.particles[index].pin(pointer);
        Some(index)
    }

    /// Release whatever `pointer` is holding; no-op if nothing
    pub fn release_pointer(&mut self, pointer: PointerId) {
        for particle in self.particles.iter_mut().filter(|p| p.is_pinned_by(pointer)) {
            particle.unpin();
        }
    }

    /// Drag the ball held by `pointer` to `point` (meters); no-op if nothing
    pub fn move_particle(&mut self, pointer: PointerId, point: Vec2) {
        if !point.is_finite() {
            log::warn!("Ignoring non-finite pointer position {point}");
            return;
        }
        if let Some(particle) = self.particles.iter_mut().find(|p| p.is_pinned_by(pointer)) {
            particle.move_to(point);
        }
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

/// Push overlapping balls apart and keep them inside the walls
///
/// A pass that separates no pair ends the loop early. Wall clamps run after
/// every pass but do not keep the loop going.
fn resolve_collisions(
    particles: &mut [Particle],
    rng: &mut Pcg32,
    half_width: f32,
    half_height: f32,
    config: &SimConfig,
) -> SolverStats {
    let count = particles.len();
    let mut passes = 0;
    let mut more = true;
    let mut clamped = false;

    while more && passes < config.max_passes {
        more = false;
        clamped = false;
        passes += 1;

        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = particles.split_at_mut(j);
                let (curr, ball) = (&mut head[i], &mut tail[0]);

                let contact = curr.radius() + ball.radius();
                if !in_contact(curr.pos, ball.pos, contact) {
                    continue;
                }
                let delta = ball.pos - curr.pos;

                // Symmetric jitter, at most collision_jitter / 2 per axis
                let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
                    * config.collision_jitter;
                if let Some(fix) = spring_correction(delta, jitter, contact) {
                    curr.pos -= fix.push;
                    ball.pos += fix.push;
                    more = true;
                }
            }
        }

        for particle in particles.iter_mut() {
            clamped |= particle.clamp_to_bounds(half_width, half_height);
        }
    }

    if more {
        log::trace!("Collision solver hit the {passes}-pass cap");
    }
    SolverStats {
        passes,
        settled: !more && !clamped,
    }
}
