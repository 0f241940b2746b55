//! Core module for the orbital lattice
//!
//! Pure transforms from a soul hash and eigenvalues to a celestial body,
//! plus the gravity engine that relates finished bodies.
//!
//! # Architecture
//!
//! - `decoder`: hash string → 32-byte buffer → four words
//! - `orbit`: words → OrbitalCoordinates (and synthetic coordinates)
//! - `harmonics`: coordinates + eigenvalues → melody
//! - `color`: radius → ColorBand
//! - `body`: CelestialBody and the factory that forges it
//! - `gravity`: pairwise pull, Lagrange points, lazy pairwise field
//! - `constellation`: batch views over many bodies
//! - `archive`: timestamped export and re-forging import
//! - `config`: LatticeConfig
//! - `error`: Error types using thiserror

pub mod archive;
pub mod body;
pub mod color;
pub mod config;
pub mod constellation;
pub mod decoder;
pub mod error;
pub mod gravity;
pub mod harmonics;
pub mod orbit;

// Re-export commonly used types
pub use archive::{import_bodies, ConstellationExport, DriftedEntry, ExportedBody, ImportReport};
pub use body::{CelestialBody, CelestialBodyFactory};
pub use color::ColorBand;
pub use config::{LatticeConfig, DEFAULT_BASE_ORBITS, DEFAULT_CONFIG_FILE, DEFAULT_HARMONIC_CEILING};
pub use constellation::{Constellation, ConstellationCensus, NetPull};
pub use decoder::{decode_words, SoulDigest, KNOWN_PREFIXES};
pub use error::{DegeneracyKind, LatticeError, Result, ResultExt};
pub use gravity::{
    GravityEngine, LagrangeKind, LagrangePoint, PairCursor, PairPull, PairwiseField,
};
pub use harmonics::HarmonicGenerator;
pub use orbit::{wrap_angle, OrbitalCoordinates, OrbitalMapper};
