//! Constellation Archive
//!
//! Export and import of forged bodies.
//!
//! An export records what was forged and when:
//!
//! ```json
//! {
//!   "timestamp": "2026-10-19T12:00:00Z",
//!   "bodies": [ { "cid": "...", "soul": "...", "coordinates": {...},
//!                 "harmonics": [...], "luminosity": 0.5 } ]
//! }
//! ```
//!
//! Import never trusts the stored coordinates or luminosity. Every body is
//! re-forged from `(soul, harmonics)`; entries whose stored values disagree
//! with the re-forged ones are reported as drift.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::body::{CelestialBody, CelestialBodyFactory};
use super::error::{LatticeError, Result, ResultExt};
use super::orbit::OrbitalCoordinates;

/// One body as written to an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedBody {
    pub cid: String,
    pub soul: String,
    pub coordinates: OrbitalCoordinates,
    pub harmonics: Vec<f64>,
    pub luminosity: f64,
}

impl From<&CelestialBody> for ExportedBody {
    fn from(body: &CelestialBody) -> Self {
        Self {
            cid: body.cid().to_string(),
            soul: body.soul().to_string(),
            coordinates: *body.coordinates(),
            harmonics: body.harmonics().to_vec(),
            luminosity: body.luminosity(),
        }
    }
}

/// A timestamped export of a constellation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationExport {
    pub timestamp: DateTime<Utc>,
    pub bodies: Vec<ExportedBody>,
}

/// An entry whose stored values disagree with its re-forged body
#[derive(Debug, Clone, PartialEq)]
pub struct DriftedEntry {
    /// Position in the export
    pub index: usize,
    pub cid: String,
    pub coordinates_drifted: bool,
    pub luminosity_drifted: bool,
}

/// Outcome of an import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Re-forged bodies, in export order
    pub bodies: Vec<CelestialBody>,
    /// Entries whose stored values were overridden
    pub drifted: Vec<DriftedEntry>,
}

impl ImportReport {
    /// Whether every stored value matched its re-forged counterpart
    pub fn is_clean(&self) -> bool {
        self.drifted.is_empty()
    }
}

impl ConstellationExport {
    /// Export bodies, stamped with the current time.
    pub fn new(bodies: &[CelestialBody]) -> Self {
        Self::at(bodies, Utc::now())
    }

    /// Export bodies with an explicit timestamp.
    pub fn at(bodies: &[CelestialBody], timestamp: DateTime<Utc>) -> Self {
        log::debug!("exporting {} bodies", bodies.len());
        Self {
            timestamp,
            bodies: bodies.iter().map(ExportedBody::from).collect(),
        }
    }

    /// Serialize to a pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an export from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to a file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read an export file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(LatticeError::from)
            .context(format!("reading {}", path.display()))?;
        Self::from_json(&content).context(format!("parsing {}", path.display()))
    }

    /// Re-forge every entry through `factory`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` (with the entry's cid as context) if an entry has
    ///   no harmonics.
    pub fn import(&self, factory: &CelestialBodyFactory) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for (index, entry) in self.bodies.iter().enumerate() {
            let body = factory
                .create(entry.cid.as_str(), entry.soul.as_str(), &entry.harmonics)
                .context(format!("importing body {} ({})", index, entry.cid))?;

            let coordinates_drifted = *body.coordinates() != entry.coordinates;
            let luminosity_drifted = body.luminosity() != entry.luminosity;
            if coordinates_drifted || luminosity_drifted {
                log::warn!(
                    "body {} ({}) drifted from its export; using re-forged values",
                    index,
                    entry.cid
                );
                report.drifted.push(DriftedEntry {
                    index,
                    cid: entry.cid.clone(),
                    coordinates_drifted,
                    luminosity_drifted,
                });
            }

            report.bodies.push(body);
        }

        log::debug!(
            "imported {} bodies ({} drifted)",
            report.bodies.len(),
            report.drifted.len()
        );
        Ok(report)
    }
}

/// Re-forge bodies from an export, discarding the drift report.
pub fn import_bodies(
    export: &ConstellationExport,
    factory: &CelestialBodyFactory,
) -> Result<Vec<CelestialBody>> {
    Ok(export.import(factory)?.bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LatticeConfig;
    use chrono::TimeZone;

    fn factory() -> CelestialBodyFactory {
        CelestialBodyFactory::new(&LatticeConfig::default())
    }

    fn sample_bodies() -> Vec<CelestialBody> {
        let f = factory();
        vec![
            f.create("cid-a", "bafkreif4010000a00f0000c81900002a000000", &[0.9, 0.4]).unwrap(),
            f.create("cid-b", "phash:2c010000881300001027000063000000", &[0.1]).unwrap(),
            f.create("cid-c", "0".repeat(64), &[1.0, 0.5, 0.25, 0.125]).unwrap(),
        ]
    }

    #[test]
    fn test_export_fields() {
        let bodies = sample_bodies();
        let stamp = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let export = ConstellationExport::at(&bodies, stamp);

        assert_eq!(export.timestamp, stamp);
        assert_eq!(export.bodies.len(), 3);
        assert_eq!(export.bodies[0].cid, "cid-a");
        assert_eq!(export.bodies[1].harmonics, vec![0.1]);
        assert_eq!(export.bodies[2].luminosity, bodies[2].luminosity());
    }

    #[test]
    fn test_json_round_trip_reforges_equal_bodies() {
        let bodies = sample_bodies();
        let json = ConstellationExport::new(&bodies).to_json().unwrap();
        let parsed = ConstellationExport::from_json(&json).unwrap();

        let report = parsed.import(&factory()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.bodies, bodies);
    }

    #[test]
    fn test_import_ignores_tampered_coordinates() {
        let bodies = sample_bodies();
        let mut export = ConstellationExport::new(&bodies);
        export.bodies[1].coordinates = export.bodies[0].coordinates;
        export.bodies[2].luminosity = 0.01;

        let report = export.import(&factory()).unwrap();
        assert_eq!(report.bodies, bodies);
        assert_eq!(report.drifted.len(), 2);
        assert_eq!(report.drifted[0].index, 1);
        assert!(report.drifted[0].coordinates_drifted);
        assert!(!report.drifted[0].luminosity_drifted);
        assert!(report.drifted[1].luminosity_drifted);
    }

    #[test]
    fn test_forged_body_reads_back_as_export_entry() {
        let bodies = sample_bodies();
        let mut value = serde_json::to_value(&bodies[0]).unwrap();
        value["melody"] = serde_json::json!([]);
        value["luminosity"] = serde_json::json!(42.0);

        let entry: ExportedBody = serde_json::from_value(value).unwrap();
        let export = ConstellationExport {
            timestamp: Utc::now(),
            bodies: vec![entry],
        };

        let report = export.import(&factory()).unwrap();
        assert_eq!(report.bodies[0], bodies[0]);
        assert_eq!(report.bodies[0].melody().len(), 2);
        assert!(report.drifted[0].luminosity_drifted);
    }

    #[test]
    fn test_import_rejects_empty_harmonics() {
        let mut export = ConstellationExport::new(&sample_bodies());
        export.bodies[1].harmonics.clear();

        let err = export.import(&factory()).unwrap_err();
        assert!(err.to_string().contains("cid-b"));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("constellation.json");
        let bodies = sample_bodies();

        ConstellationExport::new(&bodies).save_to_file(&path).unwrap();
        let loaded = ConstellationExport::load_from_file(&path).unwrap();
        assert_eq!(import_bodies(&loaded, &factory()).unwrap(), bodies);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = ConstellationExport::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
