//! Pipe and annulus geometry.

use std::f64::consts::PI;

use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// Errors from invalid exchanger geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A dimension is zero, negative, or `NaN`.
    #[error("{dimension} must be strictly positive")]
    NonPositive {
        dimension: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The wall leaves no bore: `2 · wall_thickness ≥ outer_diameter`.
    #[error("wall thickness {wall_thickness:?} leaves no bore in outer diameter {outer_diameter:?}")]
    WallTooThick {
        outer_diameter: Length,
        wall_thickness: Length,
    },

    /// The annulus does not clear the inner pipe.
    #[error("annulus bore {annulus_diameter:?} does not clear pipe of diameter {pipe_diameter:?}")]
    AnnulusTooSmall {
        annulus_diameter: Length,
        pipe_diameter: Length,
    },
}

fn positive(dimension: &'static str, value: Length) -> Result<Length, GeometryError> {
    StrictlyPositive::new(value)
        .map(|v| v.into_inner())
        .map_err(|source| GeometryError::NonPositive { dimension, source })
}

/// The inner pipe, carrying the cold stream.
///
/// Invariant: `0 < wall_thickness < outer_diameter / 2`, so the bore is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    outer_diameter: Length,
    wall_thickness: Length,
    length: Length,
}

impl PipeGeometry {
    /// Creates a validated pipe.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if any dimension is not strictly positive or
    /// the wall is at least half the outer diameter.
    pub fn new(
        outer_diameter: Length,
        wall_thickness: Length,
        length: Length,
    ) -> Result<Self, GeometryError> {
        let outer_diameter = positive("outer diameter", outer_diameter)?;
        let wall_thickness = positive("wall thickness", wall_thickness)?;
        let length = positive("length", length)?;

        if wall_thickness * 2.0 >= outer_diameter {
            return Err(GeometryError::WallTooThick {
                outer_diameter,
                wall_thickness,
            });
        }

        Ok(Self {
            outer_diameter,
            wall_thickness,
            length,
        })
    }

    #[must_use]
    pub fn outer_diameter(&self) -> Length {
        self.outer_diameter
    }

    #[must_use]
    pub fn wall_thickness(&self) -> Length {
        self.wall_thickness
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    /// Bore diameter, `outer_diameter − 2 · wall_thickness`.
    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        self.outer_diameter - self.wall_thickness * 2.0
    }

    #[must_use]
    pub fn inner_radius(&self) -> Length {
        self.inner_diameter() / 2.0
    }

    #[must_use]
    pub fn outer_radius(&self) -> Length {
        self.outer_diameter / 2.0
    }

    /// Outer surface area, `π · D_o · L`, the reference area for U.
    #[must_use]
    pub fn outer_area(&self) -> Area {
        Area::new::<square_meter>(
            PI * self.outer_diameter.get::<meter>() * self.length.get::<meter>(),
        )
    }
}

/// The outer pipe, forming the annulus that carries the hot stream.
///
/// The annulus spans the full length of the inner pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusGeometry {
    inner_diameter: Length,
    wall_thickness: Length,
    length: Length,
    hydraulic_diameter: Length,
}

impl AnnulusGeometry {
    /// Creates an annulus with bore `inner_diameter` around `pipe`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::AnnulusTooSmall`] unless the bore is strictly
    /// larger than the pipe's outer diameter.
    pub fn new(
        pipe: &PipeGeometry,
        inner_diameter: Length,
        wall_thickness: Length,
    ) -> Result<Self, GeometryError> {
        let inner_diameter = positive("annulus diameter", inner_diameter)?;
        let wall_thickness = positive("annulus wall thickness", wall_thickness)?;

        if inner_diameter <= pipe.outer_diameter() {
            return Err(GeometryError::AnnulusTooSmall {
                annulus_diameter: inner_diameter,
                pipe_diameter: pipe.outer_diameter(),
            });
        }

        Ok(Self {
            inner_diameter,
            wall_thickness,
            length: pipe.length(),
            hydraulic_diameter: inner_diameter - pipe.outer_diameter(),
        })
    }

    /// Creates an annulus leaving a radial `gap` around `pipe`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the gap or wall is not strictly positive.
    pub fn around(
        pipe: &PipeGeometry,
        gap: Length,
        wall_thickness: Length,
    ) -> Result<Self, GeometryError> {
        let gap = positive("gap", gap)?;
        Self::new(pipe, pipe.outer_diameter() + gap * 2.0, wall_thickness)
    }

    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        self.inner_diameter
    }

    #[must_use]
    pub fn wall_thickness(&self) -> Length {
        self.wall_thickness
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    /// Hydraulic diameter of the annular passage, `D_annulus − D_pipe`.
    #[must_use]
    pub fn hydraulic_diameter(&self) -> Length {
        self.hydraulic_diameter
    }
}

/// Validated exchanger geometry: inner pipe, annulus, and pipe material.
///
/// The annulus is described by its radial gap so it can be re-derived when the
/// pipe changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchanger {
    pipe: PipeGeometry,
    annulus: AnnulusGeometry,
    gap: Length,
    material: String,
}

impl Exchanger {
    /// Builds the exchanger from a pipe, a radial gap, and the annulus wall.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the annulus cannot be formed.
    pub fn new(
        pipe: PipeGeometry,
        gap: Length,
        annulus_wall_thickness: Length,
        material: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        let annulus = AnnulusGeometry::around(&pipe, gap, annulus_wall_thickness)?;
        Ok(Self {
            pipe,
            annulus,
            gap,
            material: material.into(),
        })
    }

    #[must_use]
    pub fn pipe(&self) -> &PipeGeometry {
        &self.pipe
    }

    #[must_use]
    pub fn annulus(&self) -> &AnnulusGeometry {
        &self.annulus
    }

    #[must_use]
    pub fn gap(&self) -> Length {
        self.gap
    }

    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Returns a copy with a different pipe, keeping gap and annulus wall.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the new pipe is invalid.
    pub fn with_pipe(
        &self,
        outer_diameter: Length,
        wall_thickness: Length,
        length: Length,
    ) -> Result<Self, GeometryError> {
        let pipe = PipeGeometry::new(outer_diameter, wall_thickness, length)?;
        Self::new(
            pipe,
            self.gap,
            self.annulus.wall_thickness(),
            self.material.clone(),
        )
    }

    /// Returns a copy with a different pipe length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the length is not strictly positive.
    pub fn with_length(&self, length: Length) -> Result<Self, GeometryError> {
        self.with_pipe(self.pipe.outer_diameter, self.pipe.wall_thickness, length)
    }

    /// Returns a copy with a different pipe outer diameter.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the wall no longer fits the diameter.
    pub fn with_outer_diameter(&self, outer_diameter: Length) -> Result<Self, GeometryError> {
        self.with_pipe(outer_diameter, self.pipe.wall_thickness, self.pipe.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn m(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    #[test]
    fn derived_dimensions() {
        let pipe = PipeGeometry::new(m(0.1), m(0.005), m(2.0)).unwrap();

        assert_relative_eq!(pipe.inner_diameter().get::<meter>(), 0.09, epsilon = 1e-12);
        assert_relative_eq!(pipe.inner_radius().get::<meter>(), 0.045, epsilon = 1e-12);
        assert_relative_eq!(pipe.outer_radius().get::<meter>(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(pipe.outer_area().get::<square_meter>(), PI * 0.2);
    }

    #[test]
    fn wall_thicker_than_half_diameter_is_rejected() {
        assert!(matches!(
            PipeGeometry::new(m(0.1), m(0.06), m(1.0)),
            Err(GeometryError::WallTooThick { .. })
        ));
        assert!(matches!(
            PipeGeometry::new(m(0.1), m(0.05), m(1.0)),
            Err(GeometryError::WallTooThick { .. })
        ));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(matches!(
            PipeGeometry::new(m(0.0), m(0.001), m(1.0)),
            Err(GeometryError::NonPositive {
                dimension: "outer diameter",
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(m(0.1), m(0.005), m(-1.0)),
            Err(GeometryError::NonPositive {
                dimension: "length",
                ..
            })
        ));
    }

    #[test]
    fn annulus_must_clear_the_pipe() {
        let pipe = PipeGeometry::new(m(0.1), m(0.005), m(2.0)).unwrap();

        assert!(matches!(
            AnnulusGeometry::new(&pipe, m(0.1), m(0.005)),
            Err(GeometryError::AnnulusTooSmall { .. })
        ));
        assert!(matches!(
            AnnulusGeometry::around(&pipe, m(0.0), m(0.005)),
            Err(GeometryError::NonPositive { dimension: "gap", .. })
        ));

        let annulus = AnnulusGeometry::around(&pipe, m(0.01), m(0.005)).unwrap();
        assert_relative_eq!(annulus.inner_diameter().get::<meter>(), 0.12, epsilon = 1e-12);
        assert_relative_eq!(annulus.hydraulic_diameter().get::<meter>(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(annulus.length().get::<meter>(), 2.0);
    }

    #[test]
    fn resizing_the_pipe_keeps_the_gap() {
        let pipe = PipeGeometry::new(m(0.1), m(0.005), m(2.0)).unwrap();
        let exchanger = Exchanger::new(pipe, m(0.01), m(0.005), "copper (pure)").unwrap();

        let wider = exchanger.with_outer_diameter(m(0.2)).unwrap();
        assert_relative_eq!(wider.annulus().inner_diameter().get::<meter>(), 0.22, epsilon = 1e-12);
        assert_eq!(wider.material(), "copper (pure)");

        let longer = exchanger.with_length(m(5.0)).unwrap();
        assert_relative_eq!(longer.annulus().length().get::<meter>(), 5.0);

        assert!(exchanger.with_outer_diameter(m(0.01)).is_err());
    }
}
