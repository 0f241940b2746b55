//! Constellation
//!
//! Batch views over a set of forged bodies.
//!
//! # Cost
//!
//! Every operation that relates bodies to each other walks the pairwise
//! field, N·(N−1)/2 pull evaluations for N bodies. `field()` exposes that
//! walk lazily; `strongest_pairs`, `net_pull` and `census` consume it in
//! full.

use std::collections::BTreeMap;

use serde::Serialize;

use super::body::CelestialBody;
use super::color::ColorBand;
use super::gravity::{GravityEngine, PairCursor, PairPull, PairwiseField};

/// Summary of a constellation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstellationCensus {
    /// Number of bodies
    pub body_count: usize,
    /// Bodies per color band
    pub bands: BTreeMap<ColorBand, usize>,
    /// Mean luminosity (0 when empty)
    pub mean_luminosity: f64,
    /// Mean orbital period (0 when empty)
    pub mean_period: f64,
    /// Pairs sharing a position
    pub coincident_pairs: usize,
    /// Largest finite pull, if any pair has one
    pub strongest_pull: Option<f64>,
}

/// Net finite pull on one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetPull {
    /// Sum of finite pulls from every other body
    pub total: f64,
    /// Partners sharing this body's position, excluded from `total`
    pub coincident: usize,
}

/// A read-only view over borrowed bodies.
#[derive(Debug, Clone, Copy)]
pub struct Constellation<'a> {
    bodies: &'a [CelestialBody],
    engine: GravityEngine,
}

impl<'a> Constellation<'a> {
    /// Create a view over `bodies`
    pub fn new(bodies: &'a [CelestialBody], engine: GravityEngine) -> Self {
        Self { bodies, engine }
    }

    pub fn bodies(&self) -> &'a [CelestialBody] {
        self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Find a body by cid
    pub fn find(&self, cid: &str) -> Option<&'a CelestialBody> {
        self.bodies.iter().find(|b| b.cid() == cid)
    }

    /// The lazy pairwise field
    pub fn field(&self) -> PairwiseField<'a> {
        self.engine.pairwise(self.bodies)
    }

    /// Continue a field scan from a cursor
    pub fn resume_field(&self, cursor: PairCursor) -> PairwiseField<'a> {
        self.engine.resume_pairwise(self.bodies, cursor)
    }

    /// The `k` strongest finite pulls, strongest first.
    pub fn strongest_pairs(&self, k: usize) -> Vec<PairPull> {
        let mut pulls: Vec<PairPull> = self.field().filter(|p| p.pull.is_finite()).collect();
        pulls.sort_by(|a, b| b.pull.total_cmp(&a.pull));
        pulls.truncate(k);
        pulls
    }

    /// Net finite pull on the body at `index`, or `None` if out of range.
    pub fn net_pull(&self, index: usize) -> Option<NetPull> {
        let body = self.bodies.get(index)?;
        let mut net = NetPull {
            total: 0.0,
            coincident: 0,
        };

        for (other_index, other) in self.bodies.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let pull = self.engine.gravitational_pull(body, other);
            if pull.is_finite() {
                net.total += pull;
            } else {
                net.coincident += 1;
            }
        }

        Some(net)
    }

    /// Census of bands, averages and the pairwise field.
    pub fn census(&self) -> ConstellationCensus {
        let body_count = self.bodies.len();
        let mut census = ConstellationCensus {
            body_count,
            ..Default::default()
        };
        if body_count == 0 {
            return census;
        }

        for body in self.bodies {
            *census.bands.entry(body.color()).or_insert(0) += 1;
        }
        census.mean_luminosity =
            self.bodies.iter().map(|b| b.luminosity()).sum::<f64>() / body_count as f64;
        census.mean_period = self
            .bodies
            .iter()
            .map(|b| b.coordinates().period())
            .sum::<f64>()
            / body_count as f64;

        for pair in self.field() {
            if pair.is_coincident() {
                census.coincident_pairs += 1;
            } else {
                census.strongest_pull = Some(match census.strongest_pull {
                    Some(current) => current.max(pair.pull),
                    None => pair.pull,
                });
            }
        }

        log::debug!(
            "census: {} bodies, {} coincident pairs",
            census.body_count,
            census.coincident_pairs
        );
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::CelestialBodyFactory;
    use crate::core::config::LatticeConfig;

    fn soul(w0: u32, w1: u32, w2: u32) -> String {
        [w0, w1, w2, 0]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    fn forge() -> (Vec<CelestialBody>, GravityEngine) {
        let config = LatticeConfig::default();
        let factory = CelestialBodyFactory::new(&config);
        let bodies = vec![
            factory.create("near", soul(100, 0, 2_500), &[1.0]).unwrap(),
            factory.create("mid", soul(500, 0, 2_500), &[0.5]).unwrap(),
            factory.create("far", soul(900, 5_000, 2_500), &[0.0]).unwrap(),
            factory.create("twin", soul(900, 5_000, 2_500), &[2.0]).unwrap(),
        ];
        (bodies, GravityEngine::new(&config))
    }

    #[test]
    fn test_census() {
        let (bodies, engine) = forge();
        let census = Constellation::new(&bodies, engine).census();

        assert_eq!(census.body_count, 4);
        assert_eq!(census.bands.get(&ColorBand::VeryClose), Some(&1));
        assert_eq!(census.bands.get(&ColorBand::Medium), Some(&1));
        assert_eq!(census.bands.get(&ColorBand::VeryFar), Some(&2));
        assert_eq!(census.coincident_pairs, 1);
        assert!(census.strongest_pull.unwrap().is_finite());

        let expected_lum = (0.5 + 1.0 / 1.5 + 1.0 + 1.0 / 3.0) / 4.0;
        assert!((census.mean_luminosity - expected_lum).abs() < 1e-12);
    }

    #[test]
    fn test_empty_census() {
        let (_, engine) = forge();
        let census = Constellation::new(&[], engine).census();
        assert_eq!(census, ConstellationCensus::default());
    }

    #[test]
    fn test_strongest_pairs_skip_coincident() {
        let (bodies, engine) = forge();
        let constellation = Constellation::new(&bodies, engine);
        let top = constellation.strongest_pairs(10);

        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].pull >= w[1].pull));
        assert!(top.iter().all(|p| !(p.a == 2 && p.b == 3)));
        assert_eq!(constellation.strongest_pairs(2).len(), 2);
    }

    #[test]
    fn test_net_pull() {
        let (bodies, engine) = forge();
        let constellation = Constellation::new(&bodies, engine);

        let far = constellation.net_pull(2).unwrap();
        assert_eq!(far.coincident, 1);
        let expected = engine.gravitational_pull(&bodies[2], &bodies[0])
            + engine.gravitational_pull(&bodies[2], &bodies[1]);
        assert!((far.total - expected).abs() < 1e-12);

        assert!(constellation.net_pull(4).is_none());
    }

    #[test]
    fn test_find_and_resume() {
        let (bodies, engine) = forge();
        let constellation = Constellation::new(&bodies, engine);
        assert_eq!(constellation.find("mid").map(|b| b.cid()), Some("mid"));
        assert!(constellation.find("absent").is_none());

        let mut field = constellation.field();
        field.next();
        let rest: Vec<_> = constellation.resume_field(field.cursor()).collect();
        assert_eq!(rest.len(), 5);
    }
}
