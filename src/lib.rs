//! Tesla Table - a ball table driven by tilt and a magnetic field
//!
//! Core modules:
//! - `sim`: Simulation engine (particles, Verlet integrator, collision solver)
//! - `settings`: Tunable simulation constants, loadable from JSON
//! - `convert`: Meters <-> pixels conversion for the host's rendering layer
//! - `tint`: Per-particle sprite shading derived from physical parameters
//! - `instance`: Packed per-particle data for GPU instance buffers

pub mod convert;
pub mod instance;
pub mod settings;
pub mod sim;
pub mod tint;

pub use convert::ScreenConverter;
pub use instance::ParticleInstance;
pub use settings::{ConfigError, SimConfig};
pub use sim::{Particle, ParticleSystem, PointerId};

/// Simulation constants (defaults for [`SimConfig`])
pub mod consts {
    /// Number of balls on the table
    pub const NUM_PARTICLES: usize = 15;

    /// Diameter of a ball of nominal mass, in meters
    pub const BALL_DIAMETER: f32 = 0.004;
    /// Friction of the virtual table and air
    pub const FRICTION: f32 = 0.1;
    /// Spread of the per-ball friction perturbation
    pub const FRICTION_JITTER: f32 = 0.2;

    /// Mass is drawn as `MASS_BASE + MASS_BASE * (u + 0.5)`, `u` uniform in [0, 1)
    pub const MASS_BASE: f32 = 500.0;
    /// Mass that maps to a sprite scale factor of 1.0
    pub const NOMINAL_MASS: f32 = 1000.0;

    /// Probability that a ball carries a charge
    pub const CHARGE_PROBABILITY: f64 = 0.5;
    /// Spread of the charge draw (charge lies in ±CHARGE_JITTER/2)
    pub const CHARGE_JITTER: f32 = 0.2;

    /// Collision passes per frame before giving up on convergence
    pub const MAX_COLLISION_PASSES: u32 = 10;
    /// Entropy added to colliding pair offsets, in meters
    pub const COLLISION_JITTER: f32 = 0.00001;

    /// Timestamps are nanoseconds
    pub const NANOS_TO_SECONDS: f32 = 1.0 / 1_000_000_000.0;
    /// Meters per inch, for DPI conversion
    pub const METERS_PER_INCH: f32 = 0.0254;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x7e51a;
}
