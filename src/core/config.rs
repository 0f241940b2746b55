//! Lattice configuration
//!
//! The constants that shape a lattice (base orbit, gravitational constant,
//! origin, harmonic ceiling) live in a [`LatticeConfig`] value that is
//! handed to every constructor. Two lattices with different bases can
//! coexist in one process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{LatticeError, Result};

/// Base orbital frequency, in Hz
pub const DEFAULT_BASE_ORBITS: f64 = 432.0;

/// Gravitational constant (mass is proxied by luminosity, so G is unitless)
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Ceiling for the `r^(-1.5)` harmonic factor.
///
/// Radii are quantised to thousandths, so the smallest non-zero radius is
/// `0.001` and the largest finite factor is `0.001^(-1.5) = 1000^1.5`. A
/// body at `r = 0` is clamped to that same value.
pub const DEFAULT_HARMONIC_CEILING: f64 = 31_622.776_601_683_792;

/// Amplitude of the angular modulation applied to each harmonic
pub const DEFAULT_HARMONIC_MODULATION: f64 = 0.1;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".lattice.json";

/// Configuration for a lattice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Base orbital frequency; scales both periods and melodies
    #[serde(default = "default_base_orbits")]
    pub base_orbits: f64,
    /// Gravitational constant used by the gravity engine
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    /// Position of the central mass
    #[serde(default)]
    pub origin: [f64; 3],
    /// Finite stand-in for the divergent harmonic factor at `r = 0`
    #[serde(default = "default_harmonic_ceiling")]
    pub harmonic_ceiling: f64,
    /// Amplitude of the `sin(theta+i)·cos(phi+i)` modulation
    #[serde(default = "default_harmonic_modulation")]
    pub harmonic_modulation: f64,
}

fn default_base_orbits() -> f64 {
    DEFAULT_BASE_ORBITS
}

fn default_gravitational_constant() -> f64 {
    DEFAULT_GRAVITATIONAL_CONSTANT
}

fn default_harmonic_ceiling() -> f64 {
    DEFAULT_HARMONIC_CEILING
}

fn default_harmonic_modulation() -> f64 {
    DEFAULT_HARMONIC_MODULATION
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            base_orbits: DEFAULT_BASE_ORBITS,
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            origin: [0.0; 3],
            harmonic_ceiling: DEFAULT_HARMONIC_CEILING,
            harmonic_modulation: DEFAULT_HARMONIC_MODULATION,
        }
    }
}

impl LatticeConfig {
    /// Create a new LatticeConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set base orbit
    pub fn with_base_orbits(mut self, base: f64) -> Self {
        self.base_orbits = base;
        self
    }

    /// Builder pattern: set gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Builder pattern: set origin
    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Builder pattern: set harmonic ceiling
    pub fn with_harmonic_ceiling(mut self, ceiling: f64) -> Self {
        self.harmonic_ceiling = ceiling;
        self
    }

    /// Builder pattern: set harmonic modulation
    pub fn with_harmonic_modulation(mut self, modulation: f64) -> Self {
        self.harmonic_modulation = modulation;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.base_orbits.is_finite() || self.base_orbits <= 0.0 {
            return Err(LatticeError::invalid_config(format!(
                "base_orbits must be finite and positive, got {}",
                self.base_orbits
            )));
        }
        if !self.gravitational_constant.is_finite() || self.gravitational_constant < 0.0 {
            return Err(LatticeError::invalid_config(format!(
                "gravitational_constant must be finite and non-negative, got {}",
                self.gravitational_constant
            )));
        }
        if self.origin.iter().any(|c| !c.is_finite()) {
            return Err(LatticeError::invalid_config("origin must be finite"));
        }
        if !self.harmonic_ceiling.is_finite() || self.harmonic_ceiling <= 0.0 {
            return Err(LatticeError::invalid_config(format!(
                "harmonic_ceiling must be finite and positive, got {}",
                self.harmonic_ceiling
            )));
        }
        if !self.harmonic_modulation.is_finite() {
            return Err(LatticeError::invalid_config("harmonic_modulation must be finite"));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LatticeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from file path, returning default if the file doesn't exist.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Get the default config path for a directory
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(DEFAULT_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = LatticeConfig::default();
        assert_eq!(config.base_orbits, 432.0);
        assert_eq!(config.gravitational_constant, 1.0);
        assert_eq!(config.origin, [0.0, 0.0, 0.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_harmonic_ceiling_matches_finest_radius() {
        let finest = 0.001_f64.powf(-1.5);
        assert!((DEFAULT_HARMONIC_CEILING - finest).abs() < 1e-6);
    }

    #[test]
    fn test_builder() {
        let config = LatticeConfig::new()
            .with_base_orbits(440.0)
            .with_gravitational_constant(2.0)
            .with_origin([1.0, 0.0, 0.0]);
        assert_eq!(config.base_orbits, 440.0);
        assert_eq!(config.gravitational_constant, 2.0);
        assert_eq!(config.origin[0], 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LatticeConfig::from_json(r#"{"base_orbits": 528.0}"#).unwrap();
        assert_eq!(config.base_orbits, 528.0);
        assert_eq!(config.harmonic_ceiling, DEFAULT_HARMONIC_CEILING);
        assert_eq!(config.harmonic_modulation, DEFAULT_HARMONIC_MODULATION);
    }

    #[test]
    fn test_rejects_non_positive_base() {
        let err = LatticeConfig::from_json(r#"{"base_orbits": 0.0}"#).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_zero_ceiling() {
        let config = LatticeConfig::default().with_harmonic_ceiling(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = LatticeConfig::load_from_file(&LatticeConfig::default_path(dir.path())).unwrap();
        assert_eq!(config, LatticeConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = LatticeConfig::default_path(dir.path());
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            LatticeConfig::load_from_file(&path),
            Err(LatticeError::Json(_))
        ));

        std::fs::write(&path, r#"{"harmonic_ceiling": -1.0}"#).unwrap();
        assert!(matches!(
            LatticeConfig::load_from_file(&path),
            Err(LatticeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = LatticeConfig::default_path(dir.path());
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"gravitational_constant": 6.0, "origin": [0.5, 0.5, 0.5]}}"#).unwrap();

        let config = LatticeConfig::from_file(&path).unwrap();
        assert_eq!(config.gravitational_constant, 6.0);
        assert_eq!(config.origin, [0.5, 0.5, 0.5]);
        assert_eq!(config.base_orbits, DEFAULT_BASE_ORBITS);
    }
}
