//! Gravity Engine
//!
//! Relates finished bodies to each other. Luminosity stands in for mass:
//!
//! ```text
//! pull(a, b) = G · lum(a) · lum(b) / |pos(a) − pos(b)|²
//! ```
//!
//! Coincident bodies have no defined pull. [`GravityEngine::gravitational_pull`]
//! returns `f64::INFINITY` for them and [`GravityEngine::try_pull`] returns
//! `DegenerateGeometry`; guard before dividing by a pull.
//!
//! # Scaling
//!
//! The all-pairs field over N bodies costs N·(N−1)/2 distance and pull
//! evaluations, O(N²). [`PairwiseField`] yields them lazily so a caller can
//! stop early, or keep a [`PairCursor`] and resume later.

use std::f64::consts::PI;
use std::iter::FusedIterator;

use serde::Serialize;

use super::body::CelestialBody;
use super::config::LatticeConfig;
use super::error::{DegeneracyKind, LatticeError, Result};
use super::orbit::{distance, OrbitalCoordinates, OrbitalMapper};

/// Radius ratio of the inner Lagrange point
pub const INNER_RATIO: f64 = 0.9;

/// Radius ratio of the outer Lagrange point
pub const OUTER_RATIO: f64 = 1.1;

/// Angular offset of the leading and trailing Lagrange points
pub const TROJAN_OFFSET: f64 = PI / 3.0;

/// The five synthetic equilibrium points around a primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LagrangeKind {
    /// `r·0.9`, same angles
    Inner,
    /// `r·1.1`, same angles
    Outer,
    /// `theta + π`
    Opposite,
    /// `theta + π/3`
    Leading,
    /// `theta − π/3`
    Trailing,
}

impl LagrangeKind {
    /// All kinds, in the order they are generated
    pub const ALL: [LagrangeKind; 5] = [
        LagrangeKind::Inner,
        LagrangeKind::Outer,
        LagrangeKind::Opposite,
        LagrangeKind::Leading,
        LagrangeKind::Trailing,
    ];
}

/// One Lagrange point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LagrangePoint {
    pub kind: LagrangeKind,
    pub coordinates: OrbitalCoordinates,
}

/// Pull between bodies `a` and `b` (indices into the scanned slice, `a < b`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairPull {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    /// `f64::INFINITY` when the bodies coincide
    pub pull: f64,
}

impl PairPull {
    /// Whether the two bodies share a position
    pub fn is_coincident(&self) -> bool {
        self.distance == 0.0
    }
}

/// Position of a [`PairwiseField`]: the next pair it will yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PairCursor {
    pub a: usize,
    pub b: usize,
}

impl PairCursor {
    /// The first pair of any field
    pub fn start() -> Self {
        Self { a: 0, b: 1 }
    }
}

impl Default for PairCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Computes pulls and equilibrium points for one lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityEngine {
    g: f64,
    origin: [f64; 3],
    mapper: OrbitalMapper,
}

impl GravityEngine {
    /// Create an engine for the given lattice
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            g: config.gravitational_constant,
            origin: config.origin,
            mapper: OrbitalMapper::new(config),
        }
    }

    /// Gravitational pull between two bodies. Symmetric.
    ///
    /// Returns `f64::INFINITY` when the bodies coincide.
    pub fn gravitational_pull(&self, a: &CelestialBody, b: &CelestialBody) -> f64 {
        let d = a.coordinates().distance_to(b.coordinates());
        self.pull_at(a.luminosity() * b.luminosity(), d)
    }

    /// Gravitational pull, with coincident bodies reported as an error.
    pub fn try_pull(&self, a: &CelestialBody, b: &CelestialBody) -> Result<f64> {
        let d = a.coordinates().distance_to(b.coordinates());
        if d == 0.0 {
            return Err(LatticeError::degenerate(DegeneracyKind::CoincidentBodies));
        }
        Ok(self.pull_at(a.luminosity() * b.luminosity(), d))
    }

    /// Pull of a unit mass at the lattice origin on `body`.
    ///
    /// Returns `f64::INFINITY` for a body sitting on the origin.
    pub fn central_pull(&self, body: &CelestialBody) -> f64 {
        let d = distance(body.coordinates().position(), self.origin);
        self.pull_at(body.luminosity(), d)
    }

    fn pull_at(&self, mass_product: f64, d: f64) -> f64 {
        if d == 0.0 {
            f64::INFINITY
        } else {
            self.g * mass_product / (d * d)
        }
    }

    /// The five Lagrange points of `primary`, in [`LagrangeKind::ALL`] order.
    pub fn find_lagrange_points(&self, primary: &CelestialBody) -> [LagrangePoint; 5] {
        self.lagrange_points_of(primary.coordinates())
    }

    /// Lagrange points around arbitrary coordinates. Eccentricity is forced to 0.
    pub fn lagrange_points_of(&self, primary: &OrbitalCoordinates) -> [LagrangePoint; 5] {
        let (r, theta, phi) = (primary.r(), primary.theta(), primary.phi());

        LagrangeKind::ALL.map(|kind| {
            let (radius, azimuth) = match kind {
                LagrangeKind::Inner => (r * INNER_RATIO, theta),
                LagrangeKind::Outer => (r * OUTER_RATIO, theta),
                LagrangeKind::Opposite => (r, theta + PI),
                LagrangeKind::Leading => (r, theta + TROJAN_OFFSET),
                LagrangeKind::Trailing => (r, theta - TROJAN_OFFSET),
            };
            LagrangePoint {
                kind,
                coordinates: self.mapper.synthetic_at(radius, azimuth, phi, 0.0),
            }
        })
    }

    /// Lazily scan every unordered pair of `bodies`. O(N²) pairs.
    pub fn pairwise<'a>(&self, bodies: &'a [CelestialBody]) -> PairwiseField<'a> {
        self.resume_pairwise(bodies, PairCursor::start())
    }

    /// Continue a scan from a cursor taken with [`PairwiseField::cursor`].
    pub fn resume_pairwise<'a>(
        &self,
        bodies: &'a [CelestialBody],
        cursor: PairCursor,
    ) -> PairwiseField<'a> {
        PairwiseField {
            engine: *self,
            bodies,
            cursor,
        }
    }
}

/// Lazy, resumable iterator over all pairs `(a, b)` with `a < b`.
///
/// Reads the bodies only; dropping it part-way leaves nothing to undo.
#[derive(Debug, Clone)]
pub struct PairwiseField<'a> {
    engine: GravityEngine,
    bodies: &'a [CelestialBody],
    cursor: PairCursor,
}

impl<'a> PairwiseField<'a> {
    /// The next pair this iterator will yield
    pub fn cursor(&self) -> PairCursor {
        self.cursor
    }

    /// Total number of pairs in the full scan
    pub fn total_pairs(&self) -> usize {
        let n = self.bodies.len();
        n * n.saturating_sub(1) / 2
    }

    fn pairs_before_cursor(&self) -> usize {
        let n = self.bodies.len();
        let PairCursor { a, b } = self.cursor;
        if a >= n || b >= n || b <= a {
            return self.total_pairs();
        }
        // Rows 0..a hold (n-1) + (n-2) + ... + (n-a) pairs
        a * n - a * (a + 1) / 2 + (b - a - 1)
    }
}

impl<'a> Iterator for PairwiseField<'a> {
    type Item = PairPull;

    fn next(&mut self) -> Option<PairPull> {
        let n = self.bodies.len();
        let PairCursor { a, b } = self.cursor;
        if a >= n || b >= n || b <= a {
            return None;
        }

        let (first, second) = (&self.bodies[a], &self.bodies[b]);
        let item = PairPull {
            a,
            b,
            distance: first.coordinates().distance_to(second.coordinates()),
            pull: self.engine.gravitational_pull(first, second),
        };

        self.cursor = if b + 1 < n {
            PairCursor { a, b: b + 1 }
        } else {
            PairCursor { a: a + 1, b: a + 2 }
        };

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_pairs() - self.pairs_before_cursor();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PairwiseField<'_> {}

impl FusedIterator for PairwiseField<'_> {}
