//! # Orbit geometry
//!
//! Secondary geometric quantities derived from the elements: the line of nodes,
//! the direction of the angular momentum and the vectors pointing to periapsis.
//!
//! Node points farther than the display range (or on the missing branch of a
//! hyperbola) are flagged invalid rather than reported as errors: their
//! distance and position are zero and their direction collapses onto the other
//! node.
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::constants::Radian;
use crate::orbital_elements::{ConicElements, OrbitalElements};

/// A point of the line of nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// True anomaly of the node (rad).
    pub true_anomaly: Radian,
    /// Heliocentric distance (AU), 0 when invalid.
    pub distance: f64,
    /// Heliocentric position (AU), zero when invalid.
    pub position: Vector3<f64>,
    /// `false` when the node lies beyond the display range or off the conic.
    pub valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOfNodes {
    pub ascending: Node,
    pub descending: Node,
}

/// Geometry of an orbit in the heliocentric ecliptic frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGeometry {
    pub line_of_nodes: LineOfNodes,
    /// Unit vector along the angular momentum, `(sinΩ·sin i, −cosΩ·sin i, cos i)`.
    pub angular_momentum_direction: Vector3<f64>,
    /// Eccentricity vector: toward periapsis, magnitude `e`.
    pub eccentricity_vector: Vector3<f64>,
    /// Periapsis position: toward periapsis, magnitude `q`.
    pub periapsis_vector: Vector3<f64>,
    conic: ConicElements,
    mu: f64,
}

impl OrbitGeometry {
    /// Derive the geometry of `elements`.
    ///
    /// Arguments
    /// -----------------
    /// * `elements` – Orbital elements (borrowed, unchanged).
    /// * `mu` – Gravitational parameter (AU³/day²).
    /// * `max_range` – Display range (AU) beyond which a node is invalid.
    pub fn new(elements: &OrbitalElements, mu: f64, max_range: f64) -> Self {
        let conic = elements.to_conic(mu);
        let (si, ci) = conic.inclination.sin_cos();
        let (so, co) = conic.ascending_node.sin_cos();

        let periapsis_dir = conic.radial_direction(conic.periapsis_argument);

        OrbitGeometry {
            line_of_nodes: line_of_nodes(&conic, mu, max_range),
            angular_momentum_direction: Vector3::new(so * si, -co * si, ci),
            eccentricity_vector: conic.eccentricity * periapsis_dir,
            periapsis_vector: conic.periapsis_distance(mu) * periapsis_dir,
            conic,
            mu,
        }
    }

    /// Position of the periapsis (AU).
    pub fn periapsis_point(&self) -> Vector3<f64> {
        self.periapsis_vector
    }

    /// Position of the apoapsis (AU), `None` for open orbits.
    pub fn apoapsis_point(&self) -> Option<Vector3<f64>> {
        if self.conic.eccentricity >= 1.0 {
            return None;
        }
        let ra = self.conic.radius_at(PI, self.mu);
        Some(-ra * self.conic.radial_direction(self.conic.periapsis_argument))
    }
}

fn raw_node(conic: &ConicElements, true_anomaly: Radian, mu: f64, max_range: f64) -> Node {
    let distance = conic.radius_at(true_anomaly, mu);
    let valid = distance.is_finite() && distance >= 0.0 && distance <= max_range;
    let position = if valid {
        distance * conic.radial_direction(conic.periapsis_argument + true_anomaly)
    } else {
        Vector3::zeros()
    };
    Node {
        true_anomaly,
        distance: if valid { distance } else { 0.0 },
        position,
        valid,
    }
}

/// Ascending node at `ν = −ω`, descending node at `ν = π − ω`.
fn line_of_nodes(conic: &ConicElements, mu: f64, max_range: f64) -> LineOfNodes {
    let mut ascending = raw_node(conic, -conic.periapsis_argument, mu, max_range);
    let mut descending = raw_node(conic, PI - conic.periapsis_argument, mu, max_range);

    let (asc_nu, desc_nu) = (ascending.true_anomaly, descending.true_anomaly);
    if !ascending.valid {
        ascending.true_anomaly = desc_nu;
    }
    if !descending.valid {
        descending.true_anomaly = asc_nu;
    }

    LineOfNodes {
        ascending,
        descending,
    }
}
