//! # Cartesian state vectors
//!
//! [`StateVector`] holds a heliocentric ecliptic position (AU) and velocity
//! (AU/day). Besides the usual two-body invariants (energy, angular momentum,
//! eccentricity vector) it provides the inverse of the element → state
//! conversion, [`StateVector::to_elements`].
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::anomaly::principal_angle;
use crate::constants::JulianDay;
use crate::orbital_elements::{ConicElements, OrbitalElements};
use crate::vector::{cross, dot, norm};

/// Below this magnitude the eccentricity (resp. sin i) is treated as zero and
/// the argument of periapsis (resp. node) is undefined.
const DEGENERACY_EPS: f64 = 1e-12;

/// Position (AU) and velocity (AU/day) of a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// Build from `[x, y, z, vx, vy, vz]`.
    pub fn from_array(xv: [f64; 6]) -> Self {
        StateVector {
            position: Vector3::new(xv[0], xv[1], xv[2]),
            velocity: Vector3::new(xv[3], xv[4], xv[5]),
        }
    }

    /// Export as `[x, y, z, vx, vy, vz]`.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }

    /// Heliocentric distance |r| (AU).
    pub fn radius(&self) -> f64 {
        norm(&self.position)
    }

    /// Speed |v| (AU/day).
    pub fn speed(&self) -> f64 {
        norm(&self.velocity)
    }

    /// Specific orbital energy `ξ = v²/2 − μ/r`.
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.norm_squared() - mu / self.radius()
    }

    /// Specific angular momentum vector `h = r × v`.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        cross(&self.position, &self.velocity)
    }

    /// Eccentricity vector `((v² − μ/r)·r − (r·v)·v)/μ`, pointing toward periapsis.
    pub fn eccentricity_vector(&self, mu: f64) -> Vector3<f64> {
        let r = self.radius();
        let v2 = self.velocity.norm_squared();
        let rv = dot(&self.position, &self.velocity);
        ((v2 - mu / r) * self.position - rv * self.velocity) / mu
    }

    /// Osculating elements of the state at `epoch`.
    ///
    /// The inclination comes from the angular momentum direction, the node from
    /// `k × h`. The true anomaly is obtained from `e·cos ν = p/r − 1` and
    /// `e·sin ν = (r·v)·p/(h·r)`, and the argument of periapsis as the argument
    /// of latitude minus ν.
    ///
    /// Degenerate geometries follow the usual conventions:
    /// * equatorial orbit (`sin i = 0`): `Ω = 0`, the argument of latitude is
    ///   measured from the x axis;
    /// * circular orbit (`e = 0`): `ω = 0`, the true anomaly equals the argument
    ///   of latitude.
    ///
    /// Arguments
    /// -----------------
    /// * `mu` – Gravitational parameter (AU³/day²).
    /// * `epoch` – Julian day of the state.
    ///
    /// Return
    /// ----------
    /// * [`OrbitalElements`] in degrees, with the periapsis epoch
    ///   `epoch − time_since_periapsis(ν)`.
    pub fn to_elements(&self, mu: f64, epoch: JulianDay) -> OrbitalElements {
        let r_vec = &self.position;
        let h_vec = self.angular_momentum();
        let h = norm(&h_vec);
        let r = self.radius();
        let rv = dot(r_vec, &self.velocity);

        let sini = (h_vec.x * h_vec.x + h_vec.y * h_vec.y).sqrt() / h;
        let inc = sini.atan2(h_vec.z / h);
        let node = if sini < DEGENERACY_EPS {
            0.0
        } else {
            principal_angle(h_vec.x.atan2(-h_vec.y))
        };

        // in-plane basis: n along the line of nodes, m = h_hat × n
        let n_hat = Vector3::new(node.cos(), node.sin(), 0.0);
        let m_hat = cross(&(h_vec / h), &n_hat);
        let arg_lat = dot(r_vec, &m_hat).atan2(dot(r_vec, &n_hat));

        let p = h * h / mu;
        let ecosf = p / r - 1.0;
        let esinf = rv * p / (h * r);
        let ecc = (ecosf * ecosf + esinf * esinf).sqrt();

        let (true_anomaly, peri) = if ecc < DEGENERACY_EPS {
            (arg_lat, 0.0)
        } else {
            let nu = esinf.atan2(ecosf);
            (nu, principal_angle(arg_lat - nu))
        };

        let conic = ConicElements {
            angular_momentum: h,
            eccentricity: ecc,
            inclination: inc,
            ascending_node: node,
            periapsis_argument: peri,
            periapsis_epoch: 0.0,
        };
        let tp = epoch - conic.time_since_periapsis(true_anomaly, mu);

        OrbitalElements {
            periapsis_distance: p / (1.0 + ecc),
            eccentricity: ecc,
            inclination: inc.to_degrees(),
            ascending_node: node.to_degrees(),
            periapsis_argument: peri.to_degrees(),
            periapsis_epoch: tp,
        }
    }
}
