//! # Constants and type definitions for Conics
//!
//! This module centralizes the **physical constants**, **conversion factors** and
//! **numerical thresholds** shared by the two-body engine.
//!
//! ## Overview
//!
//! - Heliocentric gravitational parameter (Gaussian constant squared)
//! - Reference epoch and display defaults
//! - Solver tolerances and iteration caps
//! - Core type aliases used across the crate
//!
//! Everything here is read-only. Callers who need a different central body
//! substitute μ through [`ConicsParams`](crate::params::ConicsParams) rather
//! than touching these values.

// -------------------------------------------------------------------------------------------------
// Physical constants and defaults
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Julian Date of J2000.0 (2000-01-01 12:00:00)
pub const JD2000: f64 = 2451545.0;

/// Gaussian gravitational constant k (AU^(3/2) / day)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², the heliocentric gravitational parameter μ in AU³/day²
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

/// Default maximum display range (AU) used to truncate samples and node points
pub const DEFAULT_MAX_RANGE: f64 = 100.0;

/// Default number of true-anomaly samples along an orbit
pub const DEFAULT_SAMPLES: usize = 360;

// -------------------------------------------------------------------------------------------------
// Solver thresholds
// -------------------------------------------------------------------------------------------------

/// Iteration cap of the mean → eccentric anomaly Newton solver
pub const KEPLER_MAX_ITER: usize = 50;

/// Residual and relative step tolerance of the mean → eccentric anomaly solver
pub const KEPLER_TOL: f64 = 1e-10;

/// Iteration cap of the universal-variable Newton solver
pub const UNIVERSAL_MAX_ITER: usize = 500;

/// Tolerance on successive universal-variable iterates
pub const UNIVERSAL_TOL: f64 = 1e-12;

/// |ψ| below which the Stumpff coefficients take their series limits
pub const STUMPFF_TOL: f64 = 1e-12;

/// |α| (1/AU) separating the elliptic, parabolic and hyperbolic regimes
pub const REGIME_ALPHA_TOL: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Julian Date (days)
pub type JulianDay = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
