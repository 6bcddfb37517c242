//! Heat exchanger analysis building blocks.
//!
//! - [`CapacitanceRate`]: `m_dot · c_p` of a stream
//! - [`log_mean_temperature_difference`]: LMTD from the two terminal
//!   temperature differences, with [`CounterFlowEnds`] to derive them
//! - [`Efficiency`]: actual duty over the maximum duty
//!
//! # Example
//!
//! ```
//! use concentric_hx::support::hx::log_mean_temperature_difference;
//! use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};
//!
//! let lmtd = log_mean_temperature_difference(
//!     TemperatureInterval::new::<kelvin>(40.0),
//!     TemperatureInterval::new::<kelvin>(40.0),
//! )
//! .unwrap();
//! assert_eq!(lmtd.get::<kelvin>(), 40.0);
//! ```

mod capacitance_rate;
mod efficiency;
mod lmtd;

pub use capacitance_rate::CapacitanceRate;
pub use efficiency::Efficiency;
pub use lmtd::{CounterFlowEnds, LmtdError, log_mean_temperature_difference};
