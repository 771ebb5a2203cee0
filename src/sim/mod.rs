//! Simulation engine
//!
//! Everything here works in meters, in an inertial frame centered on the table:
//! - Time-corrected Verlet integration under variable frame intervals
//! - Pairwise spring correction, bounded to a fixed number of passes
//! - Seeded RNG only, stable particle order

pub mod clock;
pub mod collision;
pub mod particle;
pub mod system;

pub use clock::{FrameClock, Step};
pub use collision::{PairCorrection, in_contact, spring_correction};
pub use particle::{Particle, ParticleParams, PointerId};
pub use system::{ParticleSystem, SolverStats};
