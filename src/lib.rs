//! orbital_lattice - Deterministic celestial signatures for content hashes
//!
//! This library turns an opaque content hash (a "soul") and a vector of
//! eigenvalues into a [`CelestialBody`]: an orbit, a melody, a color band
//! and a luminosity. Finished bodies can then be related to each other
//! through the [`GravityEngine`].
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/lattice.rs**: Thin wrapper that calls the library
//!
//! ```text
//! soul ─→ SoulDigest ─→ OrbitalMapper ─→ {HarmonicGenerator, ColorBand} ─→ CelestialBody
//!                                                                             ↓
//!                                                        GravityEngine / Constellation
//! ```
//!
//! Every transform is pure and deterministic; the same soul and
//! eigenvalues always forge a bit-identical body.
//!
//! ```
//! use orbital_lattice::{Lattice, ColorBand};
//!
//! let lattice = Lattice::default();
//! let body = lattice.forge("cid-1", "0".repeat(64), &[1.0]).unwrap();
//! assert_eq!(body.coordinates().r(), 0.0);
//! assert_eq!(body.luminosity(), 0.5);
//! assert_eq!(body.color(), ColorBand::VeryClose);
//! ```

pub mod core;

pub use crate::core::{
    CelestialBody, CelestialBodyFactory, ColorBand, Constellation, ConstellationCensus,
    ConstellationExport, GravityEngine, HarmonicGenerator, LagrangeKind, LagrangePoint,
    LatticeConfig, LatticeError, OrbitalCoordinates, OrbitalMapper, PairCursor, PairPull,
    PairwiseField, Result, SoulDigest,
};

/// Library version, shared with the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the orbital_lattice library
pub fn version() -> &'static str {
    VERSION
}

/// A configured lattice: the factory and gravity engine for one config.
///
/// Lattices hold no shared state, so several with different configs can
/// be used side by side.
#[derive(Debug, Clone)]
pub struct Lattice {
    config: LatticeConfig,
    factory: CelestialBodyFactory,
    gravity: GravityEngine,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::from_config(LatticeConfig::default())
    }
}

impl Lattice {
    /// Build a lattice from a validated config.
    pub fn new(config: LatticeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: LatticeConfig) -> Self {
        Self {
            factory: CelestialBodyFactory::new(&config),
            gravity: GravityEngine::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    pub fn factory(&self) -> &CelestialBodyFactory {
        &self.factory
    }

    pub fn gravity(&self) -> &GravityEngine {
        &self.gravity
    }

    /// Forge a body. Fails only on an empty eigenvalue sequence.
    pub fn forge(
        &self,
        cid: impl Into<String>,
        soul: impl Into<String>,
        eigenvalues: &[f64],
    ) -> Result<CelestialBody> {
        self.factory.create(cid, soul, eigenvalues)
    }

    /// View `bodies` as a constellation under this lattice's gravity
    pub fn constellation<'a>(&self, bodies: &'a [CelestialBody]) -> Constellation<'a> {
        Constellation::new(bodies, self.gravity)
    }

    /// Export bodies stamped with the current time
    pub fn export(&self, bodies: &[CelestialBody]) -> ConstellationExport {
        ConstellationExport::new(bodies)
    }

    /// Re-forge the bodies of an export
    pub fn import(&self, export: &ConstellationExport) -> Result<Vec<CelestialBody>> {
        crate::core::import_bodies(export, &self.factory)
    }
}
