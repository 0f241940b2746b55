//! Orbital Mapper
//!
//! Maps the four decoded words of a soul onto an orbit: spherical
//! position, Cartesian position, and Kepler-style period and velocity.
//!
//! ```text
//! w0 ─→ r      = (w0 mod 1000) / 1000
//! w1 ─→ theta  = (w1 mod 10000) / 10000 · 2π
//! w2 ─→ phi    = (w2 mod 10000) / 10000 · 2π
//! w3 ─→ ecc    = (w3 mod 100) / 100 · 0.5
//!       period = √(r³) · base
//!       velocity = 2πr / period   (0 when period is 0)
//! ```

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::config::LatticeConfig;
use super::decoder::SoulDigest;

/// Radius resolution: `w0` is reduced modulo this and divided by it
pub const RADIUS_STEPS: u32 = 1_000;

/// Angular resolution for theta and phi
pub const ANGLE_STEPS: u32 = 10_000;

/// Eccentricity resolution
pub const ECCENTRICITY_STEPS: u32 = 100;

/// Upper bound (exclusive) of the eccentricity range
pub const MAX_ECCENTRICITY: f64 = 0.5;

/// A body's orbit. Every field is derived; nothing can be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalCoordinates {
    r: f64,
    theta: f64,
    phi: f64,
    x: f64,
    y: f64,
    z: f64,
    period: f64,
    velocity: f64,
    eccentricity: f64,
}

impl OrbitalCoordinates {
    /// Orbital radius in `[0, 1)`
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Azimuth in `[0, 2π)`
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Polar angle in `[0, 2π)`
    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Cartesian position `[x, y, z]`
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Orbital period, `√(r³)·base`
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Orbital velocity, `2πr/period`
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Eccentricity in `[0, 0.5)`
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Euclidean distance between two Cartesian positions.
    pub fn distance_to(&self, other: &OrbitalCoordinates) -> f64 {
        distance(self.position(), other.position())
    }
}

/// Maps words (or explicit spherical coordinates) onto orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMapper {
    base_orbits: f64,
}

impl OrbitalMapper {
    /// Create a mapper for the given lattice
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            base_orbits: config.base_orbits,
        }
    }

    /// The base orbit this mapper scales periods by
    pub fn base_orbits(&self) -> f64 {
        self.base_orbits
    }

    /// Map four words onto an orbit.
    pub fn map_words(&self, words: [u32; 4]) -> OrbitalCoordinates {
        let [w0, w1, w2, w3] = words;

        let r = f64::from(w0 % RADIUS_STEPS) / f64::from(RADIUS_STEPS);
        let theta = f64::from(w1 % ANGLE_STEPS) / f64::from(ANGLE_STEPS) * TAU;
        let phi = f64::from(w2 % ANGLE_STEPS) / f64::from(ANGLE_STEPS) * TAU;
        let eccentricity =
            f64::from(w3 % ECCENTRICITY_STEPS) / f64::from(ECCENTRICITY_STEPS) * MAX_ECCENTRICITY;

        self.derive(r, theta, phi, eccentricity)
    }

    /// Map a decoded soul onto an orbit.
    pub fn map_digest(&self, digest: &SoulDigest) -> OrbitalCoordinates {
        self.map_words(digest.words())
    }

    /// Build coordinates that were not produced from a hash.
    ///
    /// Angles are wrapped into `[0, 2π)`; radius and eccentricity are
    /// taken as given.
    pub fn synthetic_at(&self, r: f64, theta: f64, phi: f64, eccentricity: f64) -> OrbitalCoordinates {
        self.derive(r, wrap_angle(theta), wrap_angle(phi), eccentricity)
    }

    fn derive(&self, r: f64, theta: f64, phi: f64, eccentricity: f64) -> OrbitalCoordinates {
        let period = (r * r * r).sqrt() * self.base_orbits;
        let velocity = if period > 0.0 { TAU * r / period } else { 0.0 };

        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();

        OrbitalCoordinates {
            r,
            theta,
            phi,
            x: r * sin_phi * cos_theta,
            y: r * sin_phi * sin_theta,
            z: r * cos_phi,
            period,
            velocity,
            eccentricity,
        }
    }
}

/// Reduce an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative angles up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

pub(crate) fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
