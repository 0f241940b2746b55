//! Celestial Bodies
//!
//! A [`CelestialBody`] is the immutable record forged from one
//! `(soul, eigenvalues)` pair. The [`CelestialBodyFactory`] is the only
//! way to build one. Bodies serialize for output but never deserialize;
//! stored bodies come back as [`ExportedBody`](super::archive::ExportedBody)
//! entries and are re-forged.
//!
//!
//! ```text
//! soul ─→ SoulDigest ─→ OrbitalMapper ─→ OrbitalCoordinates ─┬─→ HarmonicGenerator ─→ melody
//!                                                            └─→ ColorBand
//! eigenvalues ─→ luminosity = 1 / (1 + mean)
//! ```

use serde::Serialize;

use super::color::ColorBand;
use super::config::LatticeConfig;
use super::decoder::SoulDigest;
use super::error::{LatticeError, Result};
use super::harmonics::HarmonicGenerator;
use super::orbit::{OrbitalCoordinates, OrbitalMapper};

/// A body in the lattice. Value data only; never mutated after forging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialBody {
    cid: String,
    soul: String,
    coordinates: OrbitalCoordinates,
    harmonics: Vec<f64>,
    melody: Vec<f64>,
    luminosity: f64,
    color: ColorBand,
}

impl CelestialBody {
    /// Opaque content identifier
    pub fn cid(&self) -> &str {
        &self.cid
    }

    /// The hash string this body was forged from
    pub fn soul(&self) -> &str {
        &self.soul
    }

    pub fn coordinates(&self) -> &OrbitalCoordinates {
        &self.coordinates
    }

    /// The input eigenvalues, verbatim
    pub fn harmonics(&self) -> &[f64] {
        &self.harmonics
    }

    /// Frequencies computed from the harmonics, one per eigenvalue
    pub fn melody(&self) -> &[f64] {
        &self.melody
    }

    /// Brightness and gravitational mass proxy
    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }

    pub fn color(&self) -> ColorBand {
        self.color
    }
}

/// Forges celestial bodies for one lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBodyFactory {
    mapper: OrbitalMapper,
    harmonics: HarmonicGenerator,
}

impl CelestialBodyFactory {
    /// Create a factory for the given lattice
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            mapper: OrbitalMapper::new(config),
            harmonics: HarmonicGenerator::new(config),
        }
    }

    /// The mapper this factory places bodies with
    pub fn mapper(&self) -> &OrbitalMapper {
        &self.mapper
    }

    /// The generator this factory composes melodies with
    pub fn harmonic_generator(&self) -> &HarmonicGenerator {
        &self.harmonics
    }

    /// Forge a body.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if `eigenvalues` is empty. The soul itself is
    ///   never rejected.
    pub fn create(
        &self,
        cid: impl Into<String>,
        soul: impl Into<String>,
        eigenvalues: &[f64],
    ) -> Result<CelestialBody> {
        if eigenvalues.is_empty() {
            return Err(LatticeError::invalid_input(
                "eigenvalue sequence is empty; luminosity is undefined",
            ));
        }

        let soul = soul.into();
        let coordinates = self.mapper.map_digest(&SoulDigest::decode(&soul));
        let melody = self.harmonics.generate(&coordinates, eigenvalues);
        let color = ColorBand::classify(coordinates.r());

        Ok(CelestialBody {
            cid: cid.into(),
            soul,
            coordinates,
            harmonics: eigenvalues.to_vec(),
            melody,
            luminosity: luminosity(eigenvalues),
            color,
        })
    }
}

/// `1 / (1 + mean(eigenvalues))`. Callers guarantee a non-empty slice.
pub fn luminosity(eigenvalues: &[f64]) -> f64 {
    let mean = eigenvalues.iter().sum::<f64>() / eigenvalues.len() as f64;
    1.0 / (1.0 + mean)
}
