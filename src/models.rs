//! Public models.
//!
//! Each model lives in its own module and keeps its computation in an internal
//! `core` submodule. The public type is a thin adapter over that core that
//! also implements [`twine_core::Model`].

pub mod thermal;
