//! # Trajectory sampling
//!
//! Discretizes an orbit into evenly spaced true anomalies and computes the
//! reference state of the body at a requested epoch.
//!
//! ## Sampling range
//!
//! Closed orbits whose apoapsis lies within the display range `R` are sampled
//! over the full revolution `[0, 2π)`. Open orbits, and ellipses reaching
//! beyond `R`, are clipped symmetrically about periapsis to `[−b, b]` with
//!
//! ```text
//! b = acos( (h²/(μ·R) − 1) / e )
//! ```
//!
//! i.e. the true anomaly where the conic crosses the sphere of radius `R`
//! (the cosine argument is clamped to `[−1, 1]`).
//!
//! ## Reference state
//!
//! The periapsis state (ν = 0) is propagated with the universal-variable
//! kernel by `Δt = jd − T`, `T` being the time of periapsis passage.

use crate::constants::{JulianDay, Radian, DPI};
use crate::kepler::{propagate, Propagation};
use crate::orbital_elements::OrbitalElements;
use crate::params::ConicsParams;
use crate::state_vector::StateVector;

/// True-anomaly interval covered by a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingRange {
    /// Full revolution `[0, 2π)`.
    Full,
    /// Symmetric interval `[−limit, limit]` (rad) clipped at the display range.
    Truncated { limit: Radian },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryPoint {
    pub true_anomaly: Radian,
    pub state: StateVector,
}

/// Sampled orbit plus the reference state at the requested epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    /// Largest absolute value of each of `[x, y, z, vx, vy, vz]` over the samples.
    pub max_abs: [f64; 6],
    /// Body state at the requested epoch.
    pub reference: Propagation,
    pub range: SamplingRange,
    /// Plot extent `ceil(1.1·max(|x|, |y|, |z|))`, capped to the display range.
    pub maxc: f64,
}

/// Sampling range of a conic for display range `max_range`.
///
/// Arguments
/// -----------------
/// * `angular_momentum` – `h` (AU²/day).
/// * `ecc` – Eccentricity.
/// * `periapsis_distance` – `q` (AU).
/// * `mu` – Gravitational parameter.
/// * `max_range` – Display range (AU).
pub fn sampling_range(
    angular_momentum: f64,
    ecc: f64,
    periapsis_distance: f64,
    mu: f64,
    max_range: f64,
) -> SamplingRange {
    let closed_within_range =
        ecc < 1.0 && periapsis_distance * (1.0 + ecc) / (1.0 - ecc) <= max_range;

    if closed_within_range {
        SamplingRange::Full
    } else {
        let cos_b = (angular_momentum * angular_momentum / (mu * max_range) - 1.0) / ecc;
        SamplingRange::Truncated {
            limit: cos_b.clamp(-1.0, 1.0).acos(),
        }
    }
}

/// Sample `elements` with the display range of `params`.
pub fn sample(elements: &OrbitalElements, jd: JulianDay, params: &ConicsParams) -> Trajectory {
    sample_with_range(elements, jd, params, params.max_range)
}

/// Sample `elements` over `params.samples` true anomalies and propagate the
/// reference state to `jd`, clipping at `max_range` (AU).
///
/// Inputs are not validated; out-of-domain elements give unspecified numbers.
pub fn sample_with_range(
    elements: &OrbitalElements,
    jd: JulianDay,
    params: &ConicsParams,
    max_range: f64,
) -> Trajectory {
    let mu = params.mu;
    let n = params.samples;
    let conic = elements.to_conic(mu);

    let range = sampling_range(
        conic.angular_momentum,
        conic.eccentricity,
        elements.periapsis_distance,
        mu,
        max_range,
    );

    let anomaly_at = |k: usize| -> Radian {
        match range {
            SamplingRange::Full => DPI * k as f64 / n as f64,
            SamplingRange::Truncated { limit } => {
                -limit + 2.0 * limit * k as f64 / (n - 1).max(1) as f64
            }
        }
    };

    if let SamplingRange::Truncated { limit } = range {
        log::debug!(
            "sampling truncated at ±{:.3}° (e = {}, range = {max_range} AU)",
            limit.to_degrees(),
            conic.eccentricity
        );
    }

    let mut max_abs = [0.0_f64; 6];
    let points: Vec<TrajectoryPoint> = (0..n)
        .map(|k| {
            let nu = anomaly_at(k);
            let state = conic.state_at(nu, mu);
            for (m, c) in max_abs.iter_mut().zip(state.to_array()) {
                *m = m.max(c.abs());
            }
            TrajectoryPoint {
                true_anomaly: nu,
                state,
            }
        })
        .collect();

    let periapsis = conic.state_at(0.0, mu);
    let reference = propagate(&periapsis, jd - elements.periapsis_epoch, params);

    let extent = max_abs[0].max(max_abs[1]).max(max_abs[2]);
    let maxc = (1.1 * extent).ceil().min(max_range);

    Trajectory {
        points,
        max_abs,
        reference,
        range,
        maxc,
    }
}
