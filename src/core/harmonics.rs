//! Harmonic Generator
//!
//! Turns an orbit and a sequence of eigenvalues into a melody: one
//! frequency per eigenvalue.
//!
//! ```text
//! freq_i = base · eigen_i · 1/(1+r) · (1 + m·sin(theta+i)·cos(phi+i)) · r^(-1.5)
//! ```
//!
//! `r^(-1.5)` diverges at `r = 0`. There the factor is clamped to the
//! configured harmonic ceiling, so the melody stays finite. Frequencies
//! are not limited to any audible band; that is left to consumers.

use super::config::LatticeConfig;
use super::error::{DegeneracyKind, LatticeError, Result};
use super::orbit::OrbitalCoordinates;

/// Generates melodies for a lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicGenerator {
    base_orbits: f64,
    ceiling: f64,
    modulation: f64,
}

impl HarmonicGenerator {
    /// Create a generator for the given lattice
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            base_orbits: config.base_orbits,
            ceiling: config.harmonic_ceiling,
            modulation: config.harmonic_modulation,
        }
    }

    /// The `r^(-1.5)` factor, clamped to the ceiling at `r = 0`.
    pub fn radial_factor(&self, r: f64) -> f64 {
        if r > 0.0 {
            r.powf(-1.5)
        } else {
            self.ceiling
        }
    }

    /// Whether this orbit hits the divergent branch of the radial factor.
    pub fn is_divergent(&self, coordinates: &OrbitalCoordinates) -> bool {
        coordinates.r() <= 0.0
    }

    /// Generate one frequency per eigenvalue, in order.
    pub fn generate(&self, coordinates: &OrbitalCoordinates, eigenvalues: &[f64]) -> Vec<f64> {
        let r = coordinates.r();
        let damping = 1.0 / (1.0 + r);
        let radial = self.radial_factor(r);

        eigenvalues
            .iter()
            .enumerate()
            .map(|(i, &eigen)| {
                let step = i as f64;
                let wobble = 1.0
                    + self.modulation
                        * (coordinates.theta() + step).sin()
                        * (coordinates.phi() + step).cos();
                self.base_orbits * eigen * damping * wobble * radial
            })
            .collect()
    }

    /// Like [`generate`](Self::generate), but reports the zero-radius clamp
    /// as `DegenerateGeometry` instead of applying it.
    pub fn try_generate(
        &self,
        coordinates: &OrbitalCoordinates,
        eigenvalues: &[f64],
    ) -> Result<Vec<f64>> {
        if self.is_divergent(coordinates) {
            return Err(LatticeError::degenerate(DegeneracyKind::ZeroRadius));
        }
        Ok(self.generate(coordinates, eigenvalues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_HARMONIC_CEILING;
    use crate::core::orbit::OrbitalMapper;

    fn setup() -> (OrbitalMapper, HarmonicGenerator) {
        let config = LatticeConfig::default();
        (OrbitalMapper::new(&config), HarmonicGenerator::new(&config))
    }

    #[test]
    fn test_zero_radius_is_clamped() {
        let (mapper, gen) = setup();
        let origin = mapper.map_words([0, 0, 0, 0]);
        let melody = gen.generate(&origin, &[1.0, 0.5, 0.25, 0.125]);

        assert_eq!(melody.len(), 4);
        assert!(melody.iter().all(|f| f.is_finite()));
        assert!(gen.is_divergent(&origin));

        // theta = phi = 0: the first note has sin(0)·cos(0) = 0 modulation
        assert!((melody[0] - 432.0 * DEFAULT_HARMONIC_CEILING).abs() < 1e-6);
    }

    #[test]
    fn test_try_generate_reports_divergence() {
        let (mapper, gen) = setup();
        let origin = mapper.map_words([0, 0, 0, 0]);
        let err = gen.try_generate(&origin, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            LatticeError::DegenerateGeometry {
                kind: DegeneracyKind::ZeroRadius
            }
        ));

        let orbit = mapper.map_words([500, 0, 0, 0]);
        assert_eq!(gen.try_generate(&orbit, &[1.0]).unwrap(), gen.generate(&orbit, &[1.0]));
    }

    #[test]
    fn test_radial_factor_is_continuous_at_finest_radius() {
        let (_, gen) = setup();
        assert!((gen.radial_factor(0.001) - gen.radial_factor(0.0)).abs() < 1e-6);
        assert!((gen.radial_factor(0.25) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_formula() {
        let (mapper, gen) = setup();
        let orbit = mapper.synthetic_at(0.25, 0.3, 1.2, 0.0);
        let melody = gen.generate(&orbit, &[2.0, 3.0]);

        for (i, eigen) in [2.0_f64, 3.0].iter().enumerate() {
            let step = i as f64;
            let expected = 432.0 * eigen * (1.0 / 1.25)
                * (1.0 + 0.1 * (0.3 + step).sin() * (1.2 + step).cos())
                * 8.0;
            assert!((melody[i] - expected).abs() < 1e-9, "note {}", i);
        }
    }

    #[test]
    fn test_length_matches_eigenvalues() {
        let (mapper, gen) = setup();
        let orbit = mapper.map_words([321, 4_321, 8_765, 7]);
        for n in [1, 2, 7, 64] {
            let eigen: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
            assert_eq!(gen.generate(&orbit, &eigen).len(), n);
        }
    }

    #[test]
    fn test_custom_ceiling() {
        let config = LatticeConfig::default().with_harmonic_ceiling(100.0);
        let gen = HarmonicGenerator::new(&config);
        assert_eq!(gen.radial_factor(0.0), 100.0);
        // Only the divergent point is clamped
        assert!((gen.radial_factor(0.01) - 1000.0).abs() < 1e-9);
    }
}
