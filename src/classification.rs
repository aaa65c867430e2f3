//! # Orbit classification
//!
//! Derived scalar quantities of an orbit computed from its elements alone.
//! Quantities that are not defined for a given conic (the semi-major axis of a
//! parabola, the period of an open orbit, ...) are `None` and displayed as `N/A`.
use std::fmt;

use crate::constants::DPI;
use crate::orbital_elements::OrbitalElements;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitType {
    Circular,
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl OrbitType {
    pub fn from_eccentricity(ecc: f64) -> Self {
        if ecc == 0.0 {
            OrbitType::Circular
        } else if ecc < 1.0 {
            OrbitType::Elliptic
        } else if ecc == 1.0 {
            OrbitType::Parabolic
        } else {
            OrbitType::Hyperbolic
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, OrbitType::Circular | OrbitType::Elliptic)
    }
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitType::Circular => "circular",
            OrbitType::Elliptic => "elliptic",
            OrbitType::Parabolic => "parabolic",
            OrbitType::Hyperbolic => "hyperbolic",
        };
        f.write_str(name)
    }
}

/// Orbit type and derived quantities (AU, days, AU/day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSummary {
    pub orbit_type: OrbitType,
    /// `a = q/(1 − e)`, negative for hyperbolas.
    pub semi_major_axis: Option<f64>,
    /// `2π·√(a³/μ)` (days).
    pub period: Option<f64>,
    /// `√(μ/|a|³)` (rad/day); the hyperbolic mean motion for `e > 1`.
    pub mean_motion: Option<f64>,
    /// Vis-viva speed at periapsis.
    pub periapsis_speed: f64,
    pub apoapsis_distance: Option<f64>,
    pub apoapsis_speed: Option<f64>,
    /// Specific angular momentum `h`.
    pub angular_momentum: f64,
}

impl OrbitSummary {
    /// Classify `elements` under gravitational parameter `mu`.
    pub fn new(elements: &OrbitalElements, mu: f64) -> Self {
        let q = elements.periapsis_distance;
        let ecc = elements.eccentricity;
        let orbit_type = OrbitType::from_eccentricity(ecc);

        let semi_major_axis = (orbit_type != OrbitType::Parabolic).then(|| q / (1.0 - ecc));

        let (period, apoapsis_distance) = match semi_major_axis {
            Some(a) if orbit_type.is_closed() => (
                Some(DPI * (a.powi(3) / mu).sqrt()),
                Some(q * (1.0 + ecc) / (1.0 - ecc)),
            ),
            _ => (None, None),
        };

        let mean_motion = semi_major_axis.map(|a| (mu / a.abs().powi(3)).sqrt());

        // v² = μ(1 + e)/q at periapsis, μ(1 − e)/Q at apoapsis
        let periapsis_speed = (mu * (1.0 + ecc) / q).sqrt();
        let apoapsis_speed = apoapsis_distance.map(|ra| (mu * (1.0 - ecc) / ra).sqrt());

        OrbitSummary {
            orbit_type,
            semi_major_axis,
            period,
            mean_motion,
            periapsis_speed,
            apoapsis_distance,
            apoapsis_speed,
            angular_momentum: (q * mu * (1.0 + ecc)).sqrt(),
        }
    }
}

struct Maybe(Option<f64>);

impl fmt::Display for Maybe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.6}"),
            None => f.write_str("N/A"),
        }
    }
}

impl fmt::Display for OrbitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbit type           : {}", self.orbit_type)?;
        writeln!(f, "Semi-major axis (AU) : {}", Maybe(self.semi_major_axis))?;
        writeln!(f, "Period (days)        : {}", Maybe(self.period))?;
        writeln!(f, "Mean motion (rad/d)  : {}", Maybe(self.mean_motion))?;
        writeln!(f, "Periapsis speed      : {:.6}", self.periapsis_speed)?;
        writeln!(f, "Apoapsis (AU)        : {}", Maybe(self.apoapsis_distance))?;
        writeln!(f, "Apoapsis speed       : {}", Maybe(self.apoapsis_speed))?;
        write!(f, "Angular momentum     : {:.6}", self.angular_momentum)
    }
}
