//! # Anomaly conversions
//!
//! Relations between the three parameterizations of the position along a conic:
//! true anomaly `ν`, eccentric anomaly `E` (hyperbolic anomaly `H` for `e > 1`)
//! and mean anomaly `M`.
//!
//! All angles are in **radians**.
//!
//! ## Provided functionality
//!
//! - [`eccentric_to_true`] / [`true_to_eccentric`] – closed-form, elliptic.
//! - [`mean_to_true`] – Newton–Raphson on Kepler's equation `E − e·sin E = M`, elliptic only.
//! - [`true_to_mean`] – forward evaluation of Kepler's equation.
//! - [`true_to_hyperbolic`], [`hyperbolic_to_true`], [`hyperbolic_mean_anomaly`] – hyperbolic relations.
//! - [`barker_mean_anomaly`] – parabolic (Barker) relation.
//! - [`principal_angle`] / [`angle_diff`] – angle normalization helpers.
//!
//! The solver never raises: when the iteration cap is reached the last estimate
//! is returned and flagged through [`Convergence`].
use crate::constants::{DPI, KEPLER_MAX_ITER, KEPLER_TOL};
use std::f64::consts::PI;

/// Outcome of an iterative solve.
///
/// Solvers in this crate always return their best estimate; this annotation
/// tells the caller whether that estimate met the tolerance or whether the
/// iteration cap was reached first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convergence {
    /// `true` when the stopping criterion was met before the iteration cap.
    pub converged: bool,
    /// Number of iterations performed.
    pub iterations: usize,
}

impl Convergence {
    pub(crate) fn reached(iterations: usize) -> Self {
        Convergence {
            converged: true,
            iterations,
        }
    }

    pub(crate) fn exhausted(iterations: usize) -> Self {
        Convergence {
            converged: false,
            iterations,
        }
    }
}

/// Solution of Kepler's equation for an elliptic orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// True anomaly ν (rad), in `(-π, π]`.
    pub true_anomaly: f64,
    /// Eccentric anomaly E (rad).
    pub eccentric_anomaly: f64,
    /// Convergence diagnostic of the Newton iteration.
    pub convergence: Convergence,
}

/// Returns the principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Returns the principal difference `a − b` between two angles, in `[-π, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let a = principal_angle(a);
    let b = principal_angle(b);

    let mut diff = a - b;

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Eccentric anomaly → true anomaly (elliptic, `0 ≤ e < 1`).
///
/// `ν = atan2(√(1−e²)·sin E, cos E − e)`
pub fn eccentric_to_true(ecc: f64, eccentric_anomaly: f64) -> f64 {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - ecc * ecc).sqrt() * sin_e).atan2(cos_e - ecc)
}

/// True anomaly → eccentric anomaly (elliptic, `0 ≤ e < 1`).
///
/// `E = atan2(√(1−e²)·sin ν, cos ν + e)`
pub fn true_to_eccentric(ecc: f64, true_anomaly: f64) -> f64 {
    let (sin_v, cos_v) = true_anomaly.sin_cos();
    ((1.0 - ecc * ecc).sqrt() * sin_v).atan2(cos_v + ecc)
}

/// True anomaly → mean anomaly (elliptic), `M = E − e·sin E`, in `(-π, π]`.
pub fn true_to_mean(ecc: f64, true_anomaly: f64) -> f64 {
    let e_anom = true_to_eccentric(ecc, true_anomaly);
    e_anom - ecc * e_anom.sin()
}

/// Solve Kepler's equation `E − e·sin E − M = 0` for the eccentric anomaly.
///
/// Newton–Raphson seeded with `E₀ = M` (after reduction of `M` to `[-π, π]`).
/// The iteration stops when both the residual `|f(E)|` and the relative step
/// `|ΔE|/|E|` fall below `tol`. Iterates are kept inside the bracket
/// `[M − e, M + e] ∩ [-π, π]`, which always contains the root; a Newton step
/// leaving it is replaced by a bisection step.
///
/// Arguments
/// -----------------
/// * `ecc` – Eccentricity, `0 ≤ e < 1`.
/// * `mean_anomaly` – Mean anomaly `M` (rad).
/// * `max_iter` – Hard iteration cap.
/// * `tol` – Tolerance on the residual and on the relative step.
///
/// Return
/// ----------
/// * `(E, Convergence)` – the last estimate of `E` and the convergence diagnostic.
pub fn mean_to_eccentric(
    ecc: f64,
    mean_anomaly: f64,
    max_iter: usize,
    tol: f64,
) -> (f64, Convergence) {
    let m = angle_diff(mean_anomaly, 0.0);

    let mut lo = (m - ecc).max(-PI);
    let mut hi = (m + ecc).min(PI);
    let mut e_anom = m;

    for it in 1..=max_iter {
        let fun = e_anom - ecc * e_anom.sin() - m;
        let funp = 1.0 - ecc * e_anom.cos();

        if fun == 0.0 {
            return (e_anom, Convergence::reached(it));
        } else if fun < 0.0 {
            lo = e_anom;
        } else {
            hi = e_anom;
        }

        let mut next = e_anom - fun / funp;
        if !next.is_finite() || next < lo || next > hi {
            next = 0.5 * (lo + hi);
        }

        let step = (next - e_anom).abs();
        let rel_step = if next != 0.0 { step / next.abs() } else { step };
        e_anom = next;

        if fun.abs() < tol && rel_step < tol {
            return (e_anom, Convergence::reached(it));
        }
    }

    log::warn!(
        "Kepler equation not converged after {max_iter} iterations (e = {ecc}, M = {mean_anomaly}, E = {e_anom})"
    );
    (e_anom, Convergence::exhausted(max_iter))
}

/// Mean anomaly → true anomaly (elliptic), with the default cap (50) and tolerance (1e-10).
///
/// See also
/// ------------
/// * [`mean_to_true_with`] – Same solve with explicit controls.
pub fn mean_to_true(ecc: f64, mean_anomaly: f64) -> KeplerSolution {
    mean_to_true_with(ecc, mean_anomaly, KEPLER_MAX_ITER, KEPLER_TOL)
}

/// Mean anomaly → true anomaly (elliptic) with explicit iteration cap and tolerance.
pub fn mean_to_true_with(
    ecc: f64,
    mean_anomaly: f64,
    max_iter: usize,
    tol: f64,
) -> KeplerSolution {
    let (eccentric_anomaly, convergence) = mean_to_eccentric(ecc, mean_anomaly, max_iter, tol);
    KeplerSolution {
        true_anomaly: eccentric_to_true(ecc, eccentric_anomaly),
        eccentric_anomaly,
        convergence,
    }
}

/// True anomaly → hyperbolic anomaly (`e > 1`).
///
/// `tanh(H/2) = √((e−1)/(e+1))·tan(ν/2)`; `ν` must lie strictly between the asymptotes.
pub fn true_to_hyperbolic(ecc: f64, true_anomaly: f64) -> f64 {
    let tanh_half_h = ((ecc - 1.0) / (ecc + 1.0)).sqrt() * (true_anomaly / 2.0).tan();
    2.0 * tanh_half_h.atanh()
}

/// Hyperbolic anomaly → true anomaly (`e > 1`).
pub fn hyperbolic_to_true(ecc: f64, hyperbolic_anomaly: f64) -> f64 {
    2.0 * ((hyperbolic_anomaly / 2.0).tanh() / ((ecc - 1.0) / (ecc + 1.0)).sqrt()).atan()
}

/// Hyperbolic mean anomaly `M = e·sinh H − H` from the true anomaly (`e > 1`).
pub fn hyperbolic_mean_anomaly(ecc: f64, true_anomaly: f64) -> f64 {
    let h = true_to_hyperbolic(ecc, true_anomaly);
    ecc * h.sinh() - h
}

/// Parabolic mean anomaly from Barker's equation, `D + D³/3` with `D = tan(ν/2)`.
pub fn barker_mean_anomaly(true_anomaly: f64) -> f64 {
    let d = (true_anomaly / 2.0).tan();
    d + d.powi(3) / 3.0
}

#[cfg(test)]
mod anomaly_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_principal_angle() {
        assert_abs_diff_eq!(principal_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-15);
        assert_abs_diff_eq!(principal_angle(5.0 * PI), PI, epsilon = 1e-14);
        assert_abs_diff_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-14);
        assert_abs_diff_eq!(angle_diff(DPI - 0.1, 0.1), -0.2, epsilon = 1e-14);
    }

    #[test]
    fn test_circular_anomalies_coincide() {
        for v in [-2.0, -0.5, 0.0, 1.0, 3.0] {
            assert_abs_diff_eq!(true_to_eccentric(0.0, v), v, epsilon = 1e-15);
            assert_abs_diff_eq!(eccentric_to_true(0.0, v), v, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_eccentric_true_round_trip() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..2000 {
            let ecc = rng.random_range(0.0..0.999);
            let e_anom = rng.random_range(-PI..PI);
            let back = true_to_eccentric(ecc, eccentric_to_true(ecc, e_anom));
            assert_abs_diff_eq!(angle_diff(back, e_anom), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_mean_to_true_satisfies_kepler_equation() {
        let mut rng = StdRng::seed_from_u64(0xBADF00D);
        for _ in 0..2000 {
            let ecc = rng.random_range(0.0..=0.99);
            let m = rng.random_range(-PI..PI);

            let sol = mean_to_true(ecc, m);
            assert!(sol.convergence.converged, "e = {ecc}, M = {m}");

            let e_anom = true_to_eccentric(ecc, sol.true_anomaly);
            let m_back = e_anom - ecc * e_anom.sin();
            assert_abs_diff_eq!(angle_diff(m_back, m), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_mean_to_true_high_eccentricity_small_mean_anomaly() {
        // plain Newton from E0 = M jumps past π here
        let sol = mean_to_true(0.99, 0.1);
        assert!(sol.convergence.converged);
        assert!(sol.convergence.iterations <= KEPLER_MAX_ITER);
        assert_abs_diff_eq!(
            sol.eccentric_anomaly - 0.99 * sol.eccentric_anomaly.sin(),
            0.1,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_mean_to_true_wraps_large_mean_anomaly() {
        let sol = mean_to_true(0.3, 1.0 + 4.0 * PI);
        let reference = mean_to_true(0.3, 1.0);
        assert_abs_diff_eq!(sol.true_anomaly, reference.true_anomaly, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_to_true_zero() {
        let sol = mean_to_true(0.5, 0.0);
        assert_eq!(sol.true_anomaly, 0.0);
        assert!(sol.convergence.converged);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let (e_anom, conv) = mean_to_eccentric(0.9, 0.3, 1, 1e-15);
        assert!(!conv.converged);
        assert_eq!(conv.iterations, 1);
        assert!(e_anom.is_finite());
    }

    #[test]
    fn test_true_to_mean_inverse_of_mean_to_true() {
        let ecc = 0.6;
        for m in [-3.0, -1.2, 0.4, 2.5] {
            let v = mean_to_true(ecc, m).true_anomaly;
            assert_abs_diff_eq!(true_to_mean(ecc, v), m, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_hyperbolic_round_trip() {
        let ecc = 1.7;
        for v in [-1.5, -0.3, 0.0, 0.8, 1.9] {
            let h = true_to_hyperbolic(ecc, v);
            assert_abs_diff_eq!(hyperbolic_to_true(ecc, h), v, epsilon = 1e-12);
        }
        assert_eq!(hyperbolic_mean_anomaly(ecc, 0.0), 0.0);
        assert!(hyperbolic_mean_anomaly(ecc, 1.0) > 0.0);
    }

    #[test]
    fn test_barker() {
        assert_eq!(barker_mean_anomaly(0.0), 0.0);
        // ν = 90° → D = 1 → 4/3
        assert_abs_diff_eq!(barker_mean_anomaly(PI / 2.0), 4.0 / 3.0, epsilon = 1e-14);
    }
}
