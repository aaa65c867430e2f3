//! # Engine parameters
//!
//! This module defines [`ConicsParams`], the read-only configuration shared by
//! every query of the two-body engine, and its validating builder.
//!
//! ## Purpose
//!
//! The engine has exactly two pieces of process-wide configuration, the
//! gravitational parameter μ of the central body and the maximum display range
//! used to truncate unbounded orbits. Both are carried here together with the
//! numerical controls of the two Newton solvers:
//!
//! - `mu` – gravitational parameter (AU³/day²), heliocentric by default,
//! - `max_range` – maximum display range (AU) for sampling and node points,
//! - `samples` – number of true-anomaly samples along a trajectory,
//! - `kepler_max_iter` / `kepler_tol` – mean → eccentric anomaly solver,
//! - `universal_max_iter` / `universal_tol` – universal-variable propagator.
//!
//! The iteration caps are hard limits: every solver call terminates after at
//! most that many steps, converged or not.
//!
//! ## Example
//!
//! ```rust
//! use conics::params::ConicsParams;
//!
//! let params = ConicsParams::builder()
//!     .max_range(50.0)
//!     .samples(720)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.max_range, 50.0);
//! ```
use crate::constants::{
    DEFAULT_MAX_RANGE, DEFAULT_SAMPLES, GAUSS_GRAV_SQUARED, KEPLER_MAX_ITER, KEPLER_TOL,
    UNIVERSAL_MAX_ITER, UNIVERSAL_TOL,
};
use crate::conics_errors::ConicsError;
use std::fmt;

/// Configuration of the two-body engine.
///
/// Build it with [`ConicsParams::builder`] to get validation, or use
/// [`ConicsParams::default`] for the heliocentric setup (μ = k², 100 AU range,
/// 360 samples, caps of 50 and 500 iterations).
#[derive(Debug, Clone, PartialEq)]
pub struct ConicsParams {
    /// Gravitational parameter of the central body (AU³/day²).
    pub mu: f64,
    /// Maximum display range (AU).
    pub max_range: f64,
    /// Number of sampled points along a trajectory.
    pub samples: usize,

    /// Iteration cap of the mean → eccentric anomaly solver.
    pub kepler_max_iter: usize,
    /// Residual / relative step tolerance of the mean → eccentric anomaly solver.
    pub kepler_tol: f64,

    /// Iteration cap of the universal-variable solver.
    pub universal_max_iter: usize,
    /// Tolerance on successive universal-variable iterates.
    pub universal_tol: f64,
}

impl ConicsParams {
    /// Construct a new [`ConicsParams`] with the default heliocentric values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ConicsParamsBuilder`] initialized with the defaults.
    pub fn builder() -> ConicsParamsBuilder {
        ConicsParamsBuilder::new()
    }
}

impl Default for ConicsParams {
    fn default() -> Self {
        ConicsParams {
            mu: GAUSS_GRAV_SQUARED,
            max_range: DEFAULT_MAX_RANGE,
            samples: DEFAULT_SAMPLES,

            kepler_max_iter: KEPLER_MAX_ITER,
            kepler_tol: KEPLER_TOL,

            universal_max_iter: UNIVERSAL_MAX_ITER,
            universal_tol: UNIVERSAL_TOL,
        }
    }
}

/// Builder for [`ConicsParams`], with validation.
#[derive(Debug, Clone)]
pub struct ConicsParamsBuilder {
    params: ConicsParams,
}

impl Default for ConicsParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConicsParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: ConicsParams::default(),
        }
    }

    pub fn mu(mut self, v: f64) -> Self {
        self.params.mu = v;
        self
    }

    pub fn max_range(mut self, v: f64) -> Self {
        self.params.max_range = v;
        self
    }

    pub fn samples(mut self, v: usize) -> Self {
        self.params.samples = v;
        self
    }

    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }

    pub fn kepler_tol(mut self, v: f64) -> Self {
        self.params.kepler_tol = v;
        self
    }

    pub fn universal_max_iter(mut self, v: usize) -> Self {
        self.params.universal_max_iter = v;
        self
    }

    pub fn universal_tol(mut self, v: f64) -> Self {
        self.params.universal_tol = v;
        self
    }

    #[inline]
    fn gt0(x: f64) -> bool {
        x.is_finite() && x > 0.0
    }

    /// Validate and return the parameters.
    ///
    /// Validation rules
    /// -----------------
    /// * `mu`, `max_range`, `kepler_tol`, `universal_tol` must be finite and `> 0`.
    /// * `samples ≥ 2` (a truncated range needs both of its end points).
    /// * `kepler_max_iter ≥ 1`, `universal_max_iter ≥ 1`.
    ///
    /// Return
    /// ----------
    /// * `Ok(ConicsParams)` when every rule holds, `Err(ConicsError::InvalidParameter)` otherwise.
    pub fn build(self) -> Result<ConicsParams, ConicsError> {
        let p = &self.params;

        if !Self::gt0(p.mu) {
            return Err(ConicsError::InvalidParameter("mu must be > 0".into()));
        }
        if !Self::gt0(p.max_range) {
            return Err(ConicsError::InvalidParameter(
                "max_range must be > 0".into(),
            ));
        }
        if p.samples < 2 {
            return Err(ConicsError::InvalidParameter(
                "samples must be >= 2".into(),
            ));
        }

        if p.kepler_max_iter == 0 {
            return Err(ConicsError::InvalidParameter(
                "kepler_max_iter must be >= 1".into(),
            ));
        }
        if !Self::gt0(p.kepler_tol) {
            return Err(ConicsError::InvalidParameter(
                "kepler_tol must be > 0".into(),
            ));
        }
        if p.universal_max_iter == 0 {
            return Err(ConicsError::InvalidParameter(
                "universal_max_iter must be >= 1".into(),
            ));
        }
        if !Self::gt0(p.universal_tol) {
            return Err(ConicsError::InvalidParameter(
                "universal_tol must be > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for ConicsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Two-body Engine Parameters")?;
            writeln!(f, "--------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Central body / display]")?;
            line!("mu                 = {:.10e}", self.mu, "AU^3/day^2")?;
            line!("max_range          = {:.3} AU", self.max_range, "Display truncation radius")?;
            line!("samples            = {}", self.samples, "True-anomaly samples")?;

            writeln!(f, "[Solvers]")?;
            line!("kepler_max_iter    = {}", self.kepler_max_iter, "Mean anomaly Newton cap")?;
            line!("kepler_tol         = {:.1e}", self.kepler_tol, "Residual and relative step")?;
            line!("universal_max_iter = {}", self.universal_max_iter, "Universal-variable Newton cap")?;
            line!("universal_tol      = {:.1e}", self.universal_tol, "Step on chi")?;
            Ok(())
        } else {
            write!(
                f,
                "ConicsParams(mu={:.6e}, max_range={}, samples={}, kepler={}/{:.0e}, universal={}/{:.0e})",
                self.mu,
                self.max_range,
                self.samples,
                self.kepler_max_iter,
                self.kepler_tol,
                self.universal_max_iter,
                self.universal_tol
            )
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ConicsParams::default();
        assert_eq!(p.mu, GAUSS_GRAV_SQUARED);
        assert_eq!(p.samples, 360);
        assert_eq!(p.kepler_max_iter, 50);
        assert_eq!(p.universal_max_iter, 500);
        assert_eq!(ConicsParams::builder().build().unwrap(), p);
    }

    #[test]
    fn test_builder_overrides() {
        let p = ConicsParams::builder()
            .mu(1.0)
            .max_range(50.0)
            .samples(10)
            .universal_tol(1e-10)
            .build()
            .unwrap();

        assert_eq!(p.mu, 1.0);
        assert_eq!(p.max_range, 50.0);
        assert_eq!(p.samples, 10);
        assert_eq!(p.universal_tol, 1e-10);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        assert_eq!(
            ConicsParams::builder().mu(0.0).build(),
            Err(ConicsError::InvalidParameter("mu must be > 0".into()))
        );
        assert_eq!(
            ConicsParams::builder().max_range(f64::NAN).build(),
            Err(ConicsError::InvalidParameter("max_range must be > 0".into()))
        );
        assert_eq!(
            ConicsParams::builder().samples(1).build(),
            Err(ConicsError::InvalidParameter("samples must be >= 2".into()))
        );
        assert!(ConicsParams::builder().kepler_max_iter(0).build().is_err());
        assert!(ConicsParams::builder().universal_tol(-1.0).build().is_err());
    }

    #[test]
    fn test_display_alternate() {
        let s = format!("{:#}", ConicsParams::default());
        assert!(s.starts_with("Two-body Engine Parameters"));
        assert!(s.contains("samples            = 360"));
    }
}
