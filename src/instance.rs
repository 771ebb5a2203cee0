//! Per-particle instance data for GPU upload

use bytemuck::{Pod, Zeroable};

use crate::sim::Particle;

/// One ball as seen by an instanced sprite shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Center in meters (inertial frame)
    pub center: [f32; 2],
    pub radius: f32,
    /// Sprite scale relative to a nominal-mass ball
    pub scale: f32,
    /// Signed charge, 0.0 when uncharged
    pub charge: f32,
}

impl ParticleInstance {
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            center: particle.position().to_array(),
            radius: particle.radius(),
            scale: particle.scale_factor(),
            charge: particle.charge().unwrap_or(0.0),
        }
    }

    /// Stride of one instance in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}
