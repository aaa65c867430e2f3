//! # Universal-variable Kepler propagation
//!
//! Two-body propagation of a Cartesian state by an arbitrary time step, valid
//! for elliptic, parabolic and hyperbolic motion, using the universal variable
//! `χ` and the Stumpff coefficients `c2(ψ)`, `c3(ψ)` with `ψ = χ²·α`.
//!
//! ## Algorithm
//!
//! 1. From the initial state compute `α = 2/r0 − v0²/μ` (the reciprocal
//!    semi-major axis) and select the [`Regime`] once.
//! 2. Seed `χ₀` with the regime-specific guess.
//! 3. Newton iteration on the universal Kepler equation
//!    `√μ·Δt = χ³c3 + (r0·v0)/√μ·χ²c2 + r0·χ·(1 − ψc3)`.
//! 4. Build the Lagrange coefficients `f, g, ḟ, ġ` and the new state.
//!
//! The iteration is capped (500 by default). Reaching the cap is not an error:
//! the last iterate is used and the [`Convergence`] annotation says so.
//!
//! ## References
//!
//! * Vallado, *Fundamentals of Astrodynamics and Applications*, Algorithm 8 (KEPLER).
//! * Danby, *Fundamentals of Celestial Mechanics*, universal variables.
use nalgebra::Vector3;

use crate::anomaly::Convergence;
use crate::constants::{REGIME_ALPHA_TOL, STUMPFF_TOL};
use crate::params::ConicsParams;
use crate::state_vector::StateVector;
use crate::vector::{cross, dot, norm};

/// |ψ| below which the Stumpff coefficients are summed as power series.
const STUMPFF_SERIES_BOUND: f64 = 0.1;
const JMAX: usize = 30;
/// Rounding-floor width (in ulps of the summed terms) of the Kepler residual.
const NOISE_ULPS: f64 = 1024.0;

/// Conic regime of a two-body state, selected from the reciprocal semi-major axis α.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl Regime {
    /// Classify from `α = 1/a` (1/AU): `α > 1e-6` elliptic, `α < -1e-6` hyperbolic,
    /// parabolic in between.
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha > REGIME_ALPHA_TOL {
            Regime::Elliptic
        } else if alpha < -REGIME_ALPHA_TOL {
            Regime::Hyperbolic
        } else {
            Regime::Parabolic
        }
    }
}

/// Result of a universal-variable propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// Propagated state.
    pub state: StateVector,
    /// Regime used to seed the solver.
    pub regime: Regime,
    /// Final universal variable χ (AU^(1/2)).
    pub chi: f64,
    /// Convergence diagnostic of the Newton iteration.
    pub convergence: Convergence,
}

/// Stumpff coefficients `(c2, c3)` of `ψ`.
///
/// * `ψ > 0`: `c2 = (1 − cos√ψ)/ψ`, `c3 = (√ψ − sin√ψ)/ψ^1.5`
/// * `ψ < 0`: `c2 = (1 − cosh√−ψ)/ψ`, `c3 = (sinh√−ψ − √−ψ)/(−ψ)^1.5`
/// * `|ψ| ≤ 1e-12`: `c2 = 1/2`, `c3 = 1/6`
///
/// For `|ψ|` below 0.1 the power series `Σ(−ψ)^k/(2k+2)!` and `Σ(−ψ)^k/(2k+3)!`
/// replace the closed forms, which lose digits to cancellation there.
pub fn stumpff(psi: f64) -> (f64, f64) {
    if psi.abs() <= STUMPFF_TOL {
        (0.5, 1.0 / 6.0)
    } else if psi.abs() < STUMPFF_SERIES_BOUND {
        stumpff_series(psi)
    } else if psi > 0.0 {
        let sqrt_psi = psi.sqrt();
        (
            (1.0 - sqrt_psi.cos()) / psi,
            (sqrt_psi - sqrt_psi.sin()) / (psi * sqrt_psi),
        )
    } else {
        let sqrt_mpsi = (-psi).sqrt();
        (
            (1.0 - sqrt_mpsi.cosh()) / psi,
            (sqrt_mpsi.sinh() - sqrt_mpsi) / (-psi * sqrt_mpsi),
        )
    }
}

fn stumpff_series(psi: f64) -> (f64, f64) {
    let mut term2 = 0.5;
    let mut term3 = 1.0 / 6.0;
    let mut c2 = term2;
    let mut c3 = term3;

    for j in 1..=JMAX {
        let j = j as f64;
        term2 *= -psi / ((2.0 * j + 1.0) * (2.0 * j + 2.0));
        term3 *= -psi / ((2.0 * j + 2.0) * (2.0 * j + 3.0));
        c2 += term2;
        c3 += term3;
        if term2.abs() < f64::EPSILON * c2.abs() && term3.abs() < f64::EPSILON * c3.abs() {
            break;
        }
    }

    (c2, c3)
}

/// Regime-specific initial guess of χ.
fn seed_chi(
    regime: Regime,
    dt: f64,
    r0: f64,
    rdotv: f64,
    h: f64,
    alpha: f64,
    mu: f64,
) -> f64 {
    let sqrt_mu = mu.sqrt();

    let chi0 = match regime {
        Regime::Elliptic => sqrt_mu * dt * alpha,
        Regime::Hyperbolic => {
            let a = 1.0 / alpha;
            let s = dt.signum();
            s * (-a).sqrt()
                * ((-2.0 * mu * alpha * dt)
                    / (rdotv + s * (-mu * a).sqrt() * (1.0 - r0 * alpha)))
                    .ln()
        }
        Regime::Parabolic => {
            // Barker's equation on the osculating parabola
            let p = h * h / mu;
            let s = 0.5 * (1.0 / (3.0 * (mu / p.powi(3)).sqrt() * dt)).atan();
            let w = s.tan().cbrt().atan();
            p.sqrt() * 2.0 / (2.0 * w).tan()
        }
    };

    if chi0.is_finite() {
        chi0
    } else {
        sqrt_mu * dt / r0
    }
}

/// Propagate a two-body state by `dt` days.
///
/// Arguments
/// -----------------
/// * `state` – Initial position (AU) and velocity (AU/day).
/// * `dt` – Time of flight (days), any sign.
/// * `mu` – Gravitational parameter (AU³/day²).
/// * `max_iter` – Hard cap of the Newton iteration.
/// * `tol` – Tolerance on successive iterates `|χ − χ₀|`, relative once |χ| > 1.
///   An iteration stuck at the rounding floor of the residual also counts as
///   converged.
///
/// Return
/// ----------
/// * A [`Propagation`] holding the new state, the regime, the final χ and the
///   convergence diagnostic. `dt == 0` returns the input state unchanged.
pub fn universal_kepler(
    state: &StateVector,
    dt: f64,
    mu: f64,
    max_iter: usize,
    tol: f64,
) -> Propagation {
    let r0_vec = state.position;
    let v0_vec = state.velocity;

    let r0 = norm(&r0_vec);
    let v0 = norm(&v0_vec);
    let rdotv = dot(&r0_vec, &v0_vec);
    let sqrt_mu = mu.sqrt();

    // ξ = v²/2 − μ/r, α = −2ξ/μ = 1/a
    let energy = v0 * v0 / 2.0 - mu / r0;
    let alpha = -2.0 * energy / mu;
    let regime = Regime::from_alpha(alpha);

    if dt == 0.0 {
        return Propagation {
            state: state.clone(),
            regime,
            chi: 0.0,
            convergence: Convergence::reached(0),
        };
    }

    let h = norm(&cross(&r0_vec, &v0_vec));
    let mut chi = seed_chi(regime, dt, r0, rdotv, h, alpha, mu);
    log::debug!("universal Kepler: regime {regime:?}, alpha = {alpha:e}, chi0 = {chi:e}");

    let mut convergence = Convergence::exhausted(max_iter);
    let mut prev_step = f64::INFINITY;

    for it in 1..=max_iter {
        let chi2 = chi * chi;
        let psi = chi2 * alpha;
        let (c2, c3) = stumpff(psi);

        let r = chi2 * c2 + rdotv / sqrt_mu * chi * (1.0 - psi * c3) + r0 * (1.0 - psi * c2);
        let terms = [
            sqrt_mu * dt,
            chi2 * chi * c3,
            rdotv / sqrt_mu * chi2 * c2,
            r0 * chi * (1.0 - psi * c3),
        ];
        let fun = terms[0] - terms[1] - terms[2] - terms[3];

        let next = chi + fun / r;
        if !next.is_finite() {
            convergence = Convergence::exhausted(it);
            break;
        }

        let step = (next - chi).abs();
        chi = next;

        if step < tol * chi.abs().max(1.0) {
            convergence = Convergence::reached(it);
            break;
        }

        // rounding floor: the step stopped shrinking and the residual is
        // within the cancellation error of the summed terms
        let scale: f64 = terms.iter().map(|t| t.abs()).sum();
        if step >= prev_step && fun.abs() <= NOISE_ULPS * f64::EPSILON * scale {
            convergence = Convergence::reached(it);
            break;
        }
        prev_step = step;
    }

    if !convergence.converged {
        log::warn!(
            "universal Kepler not converged after {} iterations (regime {regime:?}, dt = {dt}, chi = {chi})",
            convergence.iterations
        );
    }

    // Lagrange coefficients at the final χ
    let chi2 = chi * chi;
    let psi = chi2 * alpha;
    let (c2, c3) = stumpff(psi);
    let r = chi2 * c2 + rdotv / sqrt_mu * chi * (1.0 - psi * c3) + r0 * (1.0 - psi * c2);

    let f = 1.0 - chi2 / r0 * c2;
    let g = dt - chi2 * chi / sqrt_mu * c3;
    let fdot = sqrt_mu / (r * r0) * chi * (psi * c3 - 1.0);
    let gdot = 1.0 - chi2 / r * c2;

    let position: Vector3<f64> = f * r0_vec + g * v0_vec;
    let velocity: Vector3<f64> = fdot * r0_vec + gdot * v0_vec;

    Propagation {
        state: StateVector::new(position, velocity),
        regime,
        chi,
        convergence,
    }
}

/// Propagate a state by `dt` days with the gravitational parameter and solver
/// controls of `params`.
pub fn propagate(state: &StateVector, dt: f64, params: &ConicsParams) -> Propagation {
    universal_kepler(
        state,
        dt,
        params.mu,
        params.universal_max_iter,
        params.universal_tol,
    )
}
