//! # Conics: the two-body engine façade
//!
//! [`Conics`] bundles the read-only [`ConicsParams`] (gravitational parameter,
//! display range, solver controls) with the operations of the crate:
//!
//! - element → state conversion at a given true anomaly ([`Conics::convert`]),
//! - universal-variable propagation of a state ([`Conics::propagate`]),
//! - orbit sampling and reference state at an epoch ([`Conics::sample`]),
//! - line of nodes and orientation vectors ([`Conics::geometry`]),
//! - orbit type and derived quantities ([`Conics::classify`]),
//! - state → element inversion ([`Conics::elements_from_state`]).
//!
//! Every query is a pure function of its arguments and of the parameters; no
//! state is carried between calls. Elements are borrowed and never modified.
//!
//! ## Typical usage
//!
//! ```rust
//! use conics::conics::Conics;
//! use conics::orbital_elements::OrbitalElements;
//! use conics::time::julian_day_from_calendar;
//!
//! let engine = Conics::default();
//!
//! // Halley, 1986 apparition
//! let halley = OrbitalElements::new(0.58598, 0.96727, 162.2422, 58.8601, 111.8657, 2446470.959);
//! let jd = julian_day_from_calendar(1986, 4, 1.0).unwrap();
//!
//! let trajectory = engine.sample(&halley, jd);
//! assert_eq!(trajectory.points.len(), 360);
//! assert!(trajectory.reference.convergence.converged);
//!
//! println!("{}", engine.classify(&halley));
//! ```
use crate::classification::OrbitSummary;
use crate::constants::{Degree, JulianDay};
use crate::geometry::OrbitGeometry;
use crate::kepler::{self, Propagation};
use crate::orbital_elements::OrbitalElements;
use crate::params::ConicsParams;
use crate::sampler::{self, Trajectory};
use crate::state_vector::StateVector;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conics {
    params: ConicsParams,
}

impl Conics {
    pub fn new(params: ConicsParams) -> Self {
        Conics { params }
    }

    pub fn params(&self) -> &ConicsParams {
        &self.params
    }

    /// State at true anomaly `true_anomaly` (deg) on the conic of `elements`.
    pub fn convert(&self, elements: &OrbitalElements, true_anomaly: Degree) -> StateVector {
        elements
            .to_conic(self.params.mu)
            .state_at(true_anomaly.to_radians(), self.params.mu)
    }

    /// Propagate `state` by `dt` days.
    pub fn propagate(&self, state: &StateVector, dt: f64) -> Propagation {
        kepler::propagate(state, dt, &self.params)
    }

    /// Sample the orbit and compute the reference state at `epoch`, clipping at
    /// the configured display range.
    pub fn sample(&self, elements: &OrbitalElements, epoch: JulianDay) -> Trajectory {
        sampler::sample(elements, epoch, &self.params)
    }

    /// Same as [`Conics::sample`] with an explicit display range (AU).
    pub fn sample_with_range(
        &self,
        elements: &OrbitalElements,
        epoch: JulianDay,
        max_range: f64,
    ) -> Trajectory {
        sampler::sample_with_range(elements, epoch, &self.params, max_range)
    }

    pub fn geometry(&self, elements: &OrbitalElements) -> OrbitGeometry {
        OrbitGeometry::new(elements, self.params.mu, self.params.max_range)
    }

    pub fn classify(&self, elements: &OrbitalElements) -> OrbitSummary {
        OrbitSummary::new(elements, self.params.mu)
    }

    /// Osculating elements of `state` at `epoch`.
    pub fn elements_from_state(&self, state: &StateVector, epoch: JulianDay) -> OrbitalElements {
        state.to_elements(self.params.mu, epoch)
    }
}

#[cfg(test)]
mod conics_test {
    use super::*;
    use crate::classification::OrbitType;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_facade_uses_params() {
        let params = ConicsParams::builder().max_range(5.0).build().unwrap();
        let engine = Conics::new(params);
        assert_eq!(engine.params().max_range, 5.0);

        let el = OrbitalElements::new(1.0, 0.8, 10.0, 0.0, 0.0, 0.0);
        // apoapsis 9 AU > 5 AU: truncated, and descending node dropped
        let traj = engine.sample(&el, 0.0);
        assert!(matches!(traj.range, crate::sampler::SamplingRange::Truncated { .. }));
        assert!(!engine.geometry(&el).line_of_nodes.descending.valid);

        let wide = engine.sample_with_range(&el, 0.0, 20.0);
        assert_eq!(wide.range, crate::sampler::SamplingRange::Full);
    }

    #[test]
    fn test_convert_propagate_invert() {
        let engine = Conics::default();
        let el = OrbitalElements::new(0.9, 0.4, 12.0, 200.0, 35.0, 2451000.0);

        let s0 = engine.convert(&el, 0.0);
        let p = engine.propagate(&s0, 75.0);
        assert!(p.convergence.converged);

        let back = engine.elements_from_state(&p.state, 2451075.0);
        assert_abs_diff_eq!(back.periapsis_distance, 0.9, epsilon = 1e-10);
        assert_abs_diff_eq!(back.periapsis_epoch, 2451000.0, epsilon = 1e-6);

        assert_eq!(engine.classify(&el).orbit_type, OrbitType::Elliptic);
    }
}
