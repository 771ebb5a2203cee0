//! Simulation settings
//!
//! Every tunable constant of the table lives here. Missing JSON fields fall back
//! to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physical and solver parameters for a [`crate::ParticleSystem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of balls, fixed for the lifetime of a system
    pub particle_count: usize,
    /// Diameter of a nominal-mass ball (meters)
    pub ball_diameter: f32,
    /// Base friction; retention is `1 - friction` plus jitter
    pub friction: f32,
    pub friction_jitter: f32,
    pub mass_base: f32,
    /// Mass mapped to scale factor 1.0
    pub nominal_mass: f32,
    pub charge_probability: f64,
    pub charge_jitter: f32,
    /// Upper bound on collision passes per frame
    pub max_passes: u32,
    /// Symmetric offset noise applied to colliding pairs (meters)
    pub collision_jitter: f32,
    /// RNG seed for construction draws and collision jitter
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: NUM_PARTICLES,
            ball_diameter: BALL_DIAMETER,
            friction: FRICTION,
            friction_jitter: FRICTION_JITTER,
            mass_base: MASS_BASE,
            nominal_mass: NOMINAL_MASS,
            charge_probability: CHARGE_PROBABILITY,
            charge_jitter: CHARGE_JITTER,
            max_passes: MAX_COLLISION_PASSES,
            collision_jitter: COLLISION_JITTER,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Default config with a different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} particles, seed {:#x}",
            config.particle_count,
            config.seed
        );
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the particle model relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.ball_diameter.is_finite() && self.ball_diameter > 0.0) {
            return invalid("ball_diameter", "must be positive");
        }
        if !(self.mass_base.is_finite() && self.mass_base > 0.0) {
            return invalid("mass_base", "must be positive");
        }
        if !(self.nominal_mass.is_finite() && self.nominal_mass > 0.0) {
            return invalid("nominal_mass", "must be positive");
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return invalid("friction", "must lie in (0, 1)");
        }
        // Retention stays inside (0, 1) only while the jitter is narrower than the friction band
        if !(self.friction_jitter >= 0.0 && self.friction_jitter / 2.0 <= self.friction) {
            return invalid("friction_jitter", "must lie in [0, 2 * friction]");
        }
        if !(0.0..=1.0).contains(&self.charge_probability) {
            return invalid("charge_probability", "must lie in [0, 1]");
        }
        if !(self.charge_jitter.is_finite() && self.charge_jitter > 0.0) {
            return invalid("charge_jitter", "must be positive");
        }
        if self.max_passes == 0 {
            return invalid("max_passes", "must be at least 1");
        }
        if !(self.collision_jitter.is_finite() && self.collision_jitter >= 0.0) {
            return invalid("collision_jitter", "must be non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "particle_count": 4, "seed": 7 }"#).unwrap();
        assert_eq!(config.particle_count, 4);
        assert_eq!(config.seed, 7);
        assert_eq!(config.ball_diameter, BALL_DIAMETER);
        assert_eq!(config.max_passes, MAX_COLLISION_PASSES);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::with_seed(42);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load("/nonexistent/tesla-table/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tesla-table-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "particle_count": 3, "seed": 11 }"#).unwrap();
        let config = SimConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.particle_count, 3);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let cases = [
            r#"{ "ball_diameter": 0.0 }"#,
            r#"{ "mass_base": -1.0 }"#,
            r#"{ "friction": 1.0 }"#,
            r#"{ "friction": 0.05, "friction_jitter": 0.2 }"#,
            r#"{ "charge_probability": 1.5 }"#,
            r#"{ "max_passes": 0 }"#,
        ];
        for json in cases {
            let err = SimConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{json} should be rejected");
        }
    }
}
