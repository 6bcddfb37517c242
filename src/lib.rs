//! # Concentric HX
//!
//! Steady-state model of a counter-flow concentric-tube (double-pipe) heat
//! exchanger, with parametric sweeps over its design variables.
//!
//! The cold stream flows through the inner pipe and the hot stream through the
//! surrounding annulus. For a given operating point the model characterizes
//! both flows, builds the overall heat-transfer coefficient from a series
//! resistance network, and iterates an LMTD heat balance to a self-consistent
//! cold outlet temperature.
//!
//! ## Crate layout
//!
//! - [`models`]: The concentric-tube exchanger model and its sweep driver.
//! - [`support`]: Supporting utilities (numeric constraints, unit helpers,
//!   property tables, LMTD and efficiency primitives).
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable.

pub mod models;
pub mod support;
