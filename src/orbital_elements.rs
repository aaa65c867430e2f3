//! # Perihelion-based orbital elements
//!
//! Two representations of the same conic:
//!
//! - [`OrbitalElements`] – the caller-facing set `(q, e, i, Ω, ω, T)` in **degrees**,
//!   with the time of periapsis passage `T` as a Julian day. It is valid for every
//!   eccentricity, parabolic and hyperbolic orbits included.
//! - [`ConicElements`] – the working set in **radians**, where the periapsis
//!   distance is replaced by the specific angular momentum `h = √(q·μ·(1+e))`.
//!
//! The conversion [`OrbitalElements::to_conic`] is explicit and leaves its input
//! untouched.
//!
//! ## Element → state
//!
//! [`ConicElements::state_at`] evaluates the conic equation
//! `r = (h²/μ)/(1 + e·cos ν)` together with the radial and transverse velocity
//! components `v_r = (μ/h)·e·sin ν`, `v_t = (μ/h)·(1 + e·cos ν)`, and projects them
//! on the radial / transverse unit vectors built from `Ω`, `i` and the argument
//! of latitude `u = ω + ν`.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::anomaly::{
    angle_diff, barker_mean_anomaly, hyperbolic_mean_anomaly, mean_to_true_with, true_to_mean,
    KeplerSolution,
};
use crate::conics_errors::ConicsError;
use crate::constants::{Degree, JulianDay, Radian};
use crate::params::ConicsParams;
use crate::state_vector::StateVector;

/// |e − 1| below which an orbit is handled with the parabolic (Barker) relations.
pub(crate) const PARABOLIC_ECC_TOL: f64 = 1e-10;

/// Classical perihelion-based elements.
///
/// Units & conventions
/// --------------------
/// - Distances in **AU**, angles in **degrees**, epoch as **Julian day**.
/// - The anomaly is not stored: it is derived from the periapsis epoch.
/// - `inclination ∈ [0, 180]`, `ascending_node` and `periapsis_argument` ∈ `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Periapsis distance `q` (AU, > 0).
    pub periapsis_distance: f64,
    /// Eccentricity `e` (≥ 0).
    pub eccentricity: f64,
    /// Inclination `i` (deg).
    pub inclination: Degree,
    /// Longitude of the ascending node `Ω` (deg).
    pub ascending_node: Degree,
    /// Argument of periapsis `ω` (deg).
    pub periapsis_argument: Degree,
    /// Time of periapsis passage `T` (JD).
    pub periapsis_epoch: JulianDay,
}

/// Working form of [`OrbitalElements`]: radians, with the specific angular
/// momentum `h` in place of the periapsis distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicElements {
    /// Specific angular momentum `h` (AU²/day).
    pub angular_momentum: f64,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub periapsis_argument: Radian,
    /// Time of periapsis passage (JD).
    pub periapsis_epoch: JulianDay,
}

impl OrbitalElements {
    pub fn new(
        periapsis_distance: f64,
        eccentricity: f64,
        inclination: Degree,
        ascending_node: Degree,
        periapsis_argument: Degree,
        periapsis_epoch: JulianDay,
    ) -> Self {
        OrbitalElements {
            periapsis_distance,
            eccentricity,
            inclination,
            ascending_node,
            periapsis_argument,
            periapsis_epoch,
        }
    }

    /// Build elliptic elements from a mean anomaly published at an epoch.
    ///
    /// The periapsis epoch is `epoch − M/n` with `n = √(μ/a³)` and `a = q/(1 − e)`,
    /// `M` being first reduced to `[-180°, 180°]` so that the nearest passage is kept.
    ///
    /// Arguments
    /// -----------------
    /// * `periapsis_distance`, `eccentricity`, `inclination`, `ascending_node`,
    ///   `periapsis_argument` – as in [`OrbitalElements`] (AU, degrees).
    /// * `mean_anomaly` – Mean anomaly at `epoch` (deg).
    /// * `epoch` – Epoch of the mean anomaly (JD).
    /// * `mu` – Gravitational parameter (AU³/day²).
    ///
    /// Errors
    /// ----------
    /// * `ConicsError::InvalidConversion` – when `e ≥ 1` (no mean anomaly defined
    ///   by this relation) or `q ≤ 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_mean_anomaly(
        periapsis_distance: f64,
        eccentricity: f64,
        inclination: Degree,
        ascending_node: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
        epoch: JulianDay,
        mu: f64,
    ) -> Result<Self, ConicsError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ConicsError::InvalidConversion(format!(
                "mean anomaly at epoch requires 0 <= e < 1, got e = {eccentricity}"
            )));
        }
        if periapsis_distance <= 0.0 {
            return Err(ConicsError::InvalidConversion(format!(
                "periapsis distance must be > 0, got q = {periapsis_distance}"
            )));
        }

        let sma = periapsis_distance / (1.0 - eccentricity);
        let mean_motion = (mu / sma.powi(3)).sqrt();
        let periapsis_epoch = epoch - angle_diff(mean_anomaly.to_radians(), 0.0) / mean_motion;

        Ok(OrbitalElements::new(
            periapsis_distance,
            eccentricity,
            inclination,
            ascending_node,
            periapsis_argument,
            periapsis_epoch,
        ))
    }

    /// Explicit transformation into the working [`ConicElements`].
    pub fn to_conic(&self, mu: f64) -> ConicElements {
        ConicElements {
            angular_momentum: (self.periapsis_distance * mu * (1.0 + self.eccentricity)).sqrt(),
            eccentricity: self.eccentricity,
            inclination: self.inclination.to_radians(),
            ascending_node: self.ascending_node.to_radians(),
            periapsis_argument: self.periapsis_argument.to_radians(),
            periapsis_epoch: self.periapsis_epoch,
        }
    }

    /// True anomaly at `jd` for an elliptic orbit, solving Kepler's equation
    /// with the solver controls of `params`.
    ///
    /// Errors
    /// ----------
    /// * `ConicsError::InvalidConversion` – when `e ≥ 1`.
    pub fn true_anomaly_at(
        &self,
        jd: JulianDay,
        params: &ConicsParams,
    ) -> Result<KeplerSolution, ConicsError> {
        let ecc = self.eccentricity;
        if ecc >= 1.0 {
            return Err(ConicsError::InvalidConversion(format!(
                "Kepler's equation needs an elliptic orbit, got e = {ecc}"
            )));
        }

        let sma = self.periapsis_distance / (1.0 - ecc);
        let mean_motion = (params.mu / sma.powi(3)).sqrt();
        let mean_anomaly = mean_motion * (jd - self.periapsis_epoch);

        Ok(mean_to_true_with(
            ecc,
            mean_anomaly,
            params.kepler_max_iter,
            params.kepler_tol,
        ))
    }
}

impl ConicElements {
    /// Semi-latus rectum `p = h²/μ` (AU).
    pub fn semi_latus_rectum(&self, mu: f64) -> f64 {
        self.angular_momentum * self.angular_momentum / mu
    }

    /// Periapsis distance `q = p/(1 + e)` (AU).
    pub fn periapsis_distance(&self, mu: f64) -> f64 {
        self.semi_latus_rectum(mu) / (1.0 + self.eccentricity)
    }

    /// Distance on the conic at true anomaly `ν`. Negative or non-finite
    /// beyond the asymptotes of a hyperbola.
    pub fn radius_at(&self, true_anomaly: Radian, mu: f64) -> f64 {
        self.semi_latus_rectum(mu) / (1.0 + self.eccentricity * true_anomaly.cos())
    }

    /// Unit vector from the focus toward the point of argument of latitude `u`.
    pub fn radial_direction(&self, arg_latitude: Radian) -> Vector3<f64> {
        let (so, co) = self.ascending_node.sin_cos();
        let (si, ci) = self.inclination.sin_cos();
        let (su, cu) = arg_latitude.sin_cos();
        Vector3::new(co * cu - so * su * ci, so * cu + co * su * ci, su * si)
    }

    fn transverse_direction(&self, arg_latitude: Radian) -> Vector3<f64> {
        let (so, co) = self.ascending_node.sin_cos();
        let (si, ci) = self.inclination.sin_cos();
        let (su, cu) = arg_latitude.sin_cos();
        Vector3::new(-co * su - so * cu * ci, -so * su + co * cu * ci, cu * si)
    }

    /// State on the conic at true anomaly `ν` (rad).
    ///
    /// Return
    /// ----------
    /// * Heliocentric position (AU) and velocity (AU/day). Use
    ///   [`StateVector::to_array`] for the flat `[x, y, z, vx, vy, vz]` form.
    pub fn state_at(&self, true_anomaly: Radian, mu: f64) -> StateVector {
        let h = self.angular_momentum;
        let ecc = self.eccentricity;
        let (sin_nu, cos_nu) = true_anomaly.sin_cos();

        let r = h * h / mu / (1.0 + ecc * cos_nu);
        let v_r = mu / h * ecc * sin_nu;
        let v_t = mu / h * (1.0 + ecc * cos_nu);

        let u = self.periapsis_argument + true_anomaly;
        let radial = self.radial_direction(u);
        let transverse = self.transverse_direction(u);

        StateVector::new(r * radial, v_r * radial + v_t * transverse)
    }

    /// Signed time (days) from periapsis passage to true anomaly `ν`.
    ///
    /// * elliptic: `M/n` with `M = E − e·sin E`, `n = √(μ/a³)`;
    /// * hyperbolic: `M/n` with `M = e·sinh H − H`, `n = √(μ/(−a)³)`;
    /// * parabolic: Barker's equation `½·√(p³/μ)·(D + D³/3)`, `D = tan(ν/2)`.
    ///
    /// For an ellipse the result lies within half a period of the passage.
    pub fn time_since_periapsis(&self, true_anomaly: Radian, mu: f64) -> f64 {
        let ecc = self.eccentricity;
        let p = self.semi_latus_rectum(mu);

        if (ecc - 1.0).abs() < PARABOLIC_ECC_TOL {
            return 0.5 * (p.powi(3) / mu).sqrt() * barker_mean_anomaly(true_anomaly);
        }

        let sma_abs = p / (1.0 - ecc * ecc).abs();
        let mean_motion = (mu / sma_abs.powi(3)).sqrt();
        let mean_anomaly = if ecc < 1.0 {
            true_to_mean(ecc, true_anomaly)
        } else {
            hyperbolic_mean_anomaly(ecc, true_anomaly)
        };
        mean_anomaly / mean_motion
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Orbital Elements @ periapsis epoch (JD): {:.6}",
            self.periapsis_epoch
        )?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(
            f,
            "  q   (periapsis distance)      = {:.6} AU",
            self.periapsis_distance
        )?;
        writeln!(
            f,
            "  e   (eccentricity)            = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)             = {:.6}° ({:.6} rad)",
            self.inclination,
            self.inclination.to_radians()
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)       = {:.6}° ({:.6} rad)",
            self.ascending_node,
            self.ascending_node.to_radians()
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis)   = {:.6}° ({:.6} rad)",
            self.periapsis_argument,
            self.periapsis_argument.to_radians()
        )
    }
}
