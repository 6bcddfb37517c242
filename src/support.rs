//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod hx;
pub mod properties;
pub mod units;
