//! Extensions to [`uom`].
//!
//! All physical values in this crate are [`uom`] quantities. This module holds
//! the small conversions that [`uom`] does not cover directly:
//!
//! - [`TemperatureDifference`]: subtracting two absolute temperatures to get a
//!   [`TemperatureInterval`](uom::si::f64::TemperatureInterval).
//! - [`liters_per_minute`] and [`LitersPerMinute`]: the volumetric flow unit
//!   used for laboratory flow meters.
//!
//! ```
//! use concentric_hx::support::units::{LitersPerMinute, liters_per_minute};
//!
//! let flow = liters_per_minute(10.0);
//! assert!((flow.as_liters_per_minute() - 10.0).abs() < 1e-12);
//! ```

mod flow_rate;
mod temperature_difference;

pub use flow_rate::{LitersPerMinute, liters_per_minute};
pub use temperature_difference::TemperatureDifference;
