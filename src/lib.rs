//! # Conics
//!
//! A two-body (Keplerian) orbital mechanics engine: conversion between
//! perihelion-based orbital elements and Cartesian state vectors,
//! universal-variable propagation valid for every conic, orbit geometry,
//! trajectory sampling, orbit classification and calendar ↔ Julian day
//! conversion.
//!
//! Units are AU, days and degrees at the public boundary (radians inside the
//! numerical kernels). The default central body is the Sun, `μ = k²`.
//!
//! Entry point: [`conics::Conics`].
pub mod anomaly;
pub mod classification;
pub mod conics;
pub mod conics_errors;
pub mod constants;
pub mod element_table;
pub mod geometry;
pub mod kepler;
pub mod orbital_elements;
pub mod params;
pub mod sampler;
pub mod state_vector;
pub mod time;
pub mod vector;

pub use crate::conics::Conics;
pub use crate::conics_errors::ConicsError;
pub use crate::orbital_elements::OrbitalElements;
pub use crate::params::ConicsParams;
pub use crate::state_vector::StateVector;
