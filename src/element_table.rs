//! # Osculating element tables
//!
//! Reads tables of osculating elements published with a mean anomaly at epoch,
//! one body per row:
//!
//! ```text
//! name,q,e,i,node,peri,M,epoch
//! Earth,0.98329134,0.01671123,0.0,0.0,102.93768193,357.52688973,2451545.0
//! ```
//!
//! Distances in AU, angles in degrees, epoch as Julian day. Each row is turned
//! into [`OrbitalElements`] through [`OrbitalElements::from_mean_anomaly`], so
//! only elliptic rows are accepted.
//!
//! A J2000 table of the eight planets (Standish, *Keplerian Elements for
//! Approximate Positions of the Major Planets*) is bundled and available through
//! [`ElementTable::planets_j2000`].
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::conics_errors::ConicsError;
use crate::orbital_elements::OrbitalElements;

static PLANETS_J2000: &str = include_str!("../data/planets.csv");

#[derive(Debug, Deserialize)]
struct ElementRecord {
    name: String,
    q: f64,
    e: f64,
    i: f64,
    node: f64,
    peri: f64,
    #[serde(rename = "M")]
    mean_anomaly: f64,
    epoch: f64,
}

/// A named row of an element table.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedElements {
    pub name: String,
    pub elements: OrbitalElements,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementTable {
    entries: Vec<NamedElements>,
}

impl ElementTable {
    /// Read a CSV table (with header) from `reader`.
    ///
    /// Arguments
    /// -----------------
    /// * `reader` – CSV source.
    /// * `mu` – Gravitational parameter used to turn mean anomalies into periapsis epochs.
    ///
    /// Errors
    /// ----------
    /// * `ConicsError::ElementTable` – malformed CSV or row.
    /// * `ConicsError::InvalidConversion` – a row with `e ≥ 1` or `q ≤ 0`.
    pub fn from_reader<R: Read>(reader: R, mu: f64) -> Result<Self, ConicsError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut entries = Vec::new();
        for record in csv_reader.deserialize::<ElementRecord>() {
            let r = record?;
            let elements = OrbitalElements::from_mean_anomaly(
                r.q,
                r.e,
                r.i,
                r.node,
                r.peri,
                r.mean_anomaly,
                r.epoch,
                mu,
            )?;
            entries.push(NamedElements {
                name: r.name,
                elements,
            });
        }

        log::debug!("element table: {} bodies loaded", entries.len());
        Ok(ElementTable { entries })
    }

    /// Read a CSV table from a file.
    pub fn from_path<P: AsRef<Path>>(path: P, mu: f64) -> Result<Self, ConicsError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, mu)
    }

    /// The bundled J2000 table of the eight major planets.
    pub fn planets_j2000(mu: f64) -> Result<Self, ConicsError> {
        Self::from_reader(PLANETS_J2000.as_bytes(), mu)
    }

    /// Elements of the body named `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&OrbitalElements> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| &e.elements)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedElements> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod element_table_test {
    use super::*;
    use crate::constants::GAUSS_GRAV_SQUARED;
    use approx::assert_abs_diff_eq;

    const MU: f64 = GAUSS_GRAV_SQUARED;

    #[test]
    fn test_planets_j2000() {
        let table = ElementTable::planets_j2000(MU).unwrap();
        assert_eq!(table.len(), 8);

        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names[0], "Mercury");
        assert_eq!(names[7], "Neptune");

        let earth = table.get("earth").unwrap();
        assert_abs_diff_eq!(earth.eccentricity, 0.01671123);
        // perihelion passage early January 2000
        assert!(earth.periapsis_epoch > 2451545.0 && earth.periapsis_epoch < 2451550.0);
    }

    #[test]
    fn test_from_reader_with_spaces() {
        let data = "name, q, e, i, node, peri, M, epoch\n\
                    Test, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2451545.0\n";
        let table = ElementTable::from_reader(data.as_bytes(), MU).unwrap();
        assert_eq!(table.get("Test").unwrap().periapsis_epoch, 2451545.0);
        assert!(table.get("Pluto").is_none());
    }

    #[test]
    fn test_rejects_bad_rows() {
        let malformed = "name,q,e,i,node,peri,M,epoch\nX,abc,0,0,0,0,0,0\n";
        assert!(matches!(
            ElementTable::from_reader(malformed.as_bytes(), MU),
            Err(ConicsError::ElementTable(_))
        ));

        let hyperbolic = "name,q,e,i,node,peri,M,epoch\nX,1.0,1.2,0,0,0,0,0\n";
        assert!(matches!(
            ElementTable::from_reader(hyperbolic.as_bytes(), MU),
            Err(ConicsError::InvalidConversion(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ElementTable::from_path("does/not/exist.csv", MU),
            Err(ConicsError::IoError(_))
        ));
    }
}
