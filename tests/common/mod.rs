use approx::assert_abs_diff_eq;
use conics::orbital_elements::OrbitalElements;
use conics::state_vector::StateVector;

pub fn assert_elements_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_abs_diff_eq!(
        actual.periapsis_distance,
        expected.periapsis_distance,
        epsilon = epsilon
    );
    assert_abs_diff_eq!(actual.eccentricity, expected.eccentricity, epsilon = epsilon);
    assert_abs_diff_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_abs_diff_eq!(
        actual.ascending_node,
        expected.ascending_node,
        epsilon = epsilon
    );
    assert_abs_diff_eq!(
        actual.periapsis_argument,
        expected.periapsis_argument,
        epsilon = epsilon
    );
}

pub fn assert_state_close(actual: &StateVector, expected: &StateVector, pos_eps: f64, vel_eps: f64) {
    assert_abs_diff_eq!(actual.position, expected.position, epsilon = pos_eps);
    assert_abs_diff_eq!(actual.velocity, expected.velocity, epsilon = vel_eps);
}

/// Elements with periapsis at `q` and the given eccentricity, moderately inclined.
pub fn sample_elements(q: f64, ecc: f64) -> OrbitalElements {
    OrbitalElements::new(q, ecc, 27.0, 142.0, 63.0, 2451545.0)
}
