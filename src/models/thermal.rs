//! Thermal systems models.

pub mod concentric_tube;
