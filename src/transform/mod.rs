//! Geographic-to-canvas coordinate transforms.

mod warp;

pub use warp::Warp;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::math::{Point2, Rotation2, Vector2};
use crate::route::GeoPoint;

/// Maps geographic coordinates into a planar space.
///
/// Corner geometry is computed in whatever plane the projection produces,
/// so the perpendicular sign convention is tied to its axis orientation.
pub trait Projection {
    /// Projects a geographic coordinate.
    fn project(&self, point: GeoPoint) -> Point2;
}

/// The plain geographic plane: `x = longitude`, `y = latitude`, y up.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPlane;

impl GeoPlane {
    /// Reads a plane point back as a geographic coordinate.
    #[must_use]
    pub fn unproject(self, point: Point2) -> GeoPoint {
        GeoPoint::new(point.y, point.x)
    }
}

impl Projection for GeoPlane {
    fn project(&self, point: GeoPoint) -> Point2 {
        Point2::new(point.longitude, point.latitude)
    }
}

/// Geographic extent of the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub north: f64,
    pub south: f64,
}

impl Default for BoundingBox {
    /// Central Bogor, West Java.
    fn default() -> Self {
        Self {
            west: 106.76,
            east: 106.865,
            north: -6.50,
            south: -6.685,
        }
    }
}

impl BoundingBox {
    /// Returns the centre of the box.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.north + self.south) / 2.0, (self.west + self.east) / 2.0)
    }

    /// Returns the corners clockwise from the north-west one.
    #[must_use]
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.north, self.west),
            GeoPoint::new(self.north, self.east),
            GeoPoint::new(self.south, self.east),
            GeoPoint::new(self.south, self.west),
        ]
    }

    /// Returns `(width, height)` in degrees.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (self.east - self.west, self.north - self.south)
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let values = [self.west, self.east, self.north, self.south];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigurationError::InvalidBoundingBox(
                "coordinates must be finite".to_owned(),
            ));
        }
        if self.east <= self.west || self.north <= self.south {
            return Err(ConfigurationError::InvalidBoundingBox(format!(
                "east ({}) must exceed west ({}) and north ({}) must exceed south ({})",
                self.east, self.west, self.north, self.south
            )));
        }
        Ok(())
    }
}

/// Parameters of a [`CoordinateTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub bounding_box: BoundingBox,
    /// Canvas units per degree, before warping.
    pub scale: f64,
    /// Clockwise rotation of the map on the canvas, in degrees.
    pub rotation_degrees: f64,
    pub warp: Warp,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            scale: 10_000.0,
            rotation_degrees: 30.0,
            warp: Warp::default(),
        }
    }
}

/// Maps geographic coordinates onto a y-down canvas.
///
/// Forward pipeline: centre on the bounding box, rotate, scale, warp each
/// axis, then move the origin to the canvas centre with the y axis flipped.
#[derive(Debug, Clone)]
pub struct CoordinateTransform {
    center: GeoPoint,
    scale: f64,
    warp: Warp,
    /// Rotation in the y-up plane; clockwise on the canvas.
    rotation: Rotation2,
    canvas_width: f64,
    canvas_height: f64,
}

impl CoordinateTransform {
    /// Creates a new transform.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroScale` for a zero or non-finite scale,
    /// `ConfigurationError::InvalidWarp` for a non-invertible warp,
    /// `ConfigurationError::InvalidRotation` for a non-finite angle and
    /// `ConfigurationError::InvalidBoundingBox` for an empty or non-finite box.
    pub fn new(config: &TransformConfig) -> Result<Self> {
        if config.scale == 0.0 || !config.scale.is_finite() {
            return Err(ConfigurationError::ZeroScale(config.scale).into());
        }
        config.warp.validate()?;
        config.bounding_box.validate()?;
        if !config.rotation_degrees.is_finite() {
            return Err(ConfigurationError::InvalidRotation(config.rotation_degrees).into());
        }

        let (width, height) = config.bounding_box.extent();
        let canvas_width = 2.0 * config.warp.apply(width / 2.0 * config.scale).abs();
        let canvas_height = 2.0 * config.warp.apply(height / 2.0 * config.scale).abs();

        Ok(Self {
            center: config.bounding_box.center(),
            scale: config.scale,
            warp: config.warp,
            rotation: Rotation2::new(-config.rotation_degrees.to_radians()),
            canvas_width,
            canvas_height,
        })
    }

    /// Maps a geographic coordinate to canvas space.
    #[must_use]
    pub fn transform(&self, point: GeoPoint) -> Point2 {
        let centered = Vector2::new(
            point.longitude - self.center.longitude,
            point.latitude - self.center.latitude,
        );
        let scaled = self.rotation * centered * self.scale;
        Point2::new(
            self.canvas_width / 2.0 + self.warp.apply(scaled.x),
            self.canvas_height / 2.0 - self.warp.apply(scaled.y),
        )
    }

    /// Maps a canvas point back to geographic space.
    #[must_use]
    pub fn inverse(&self, point: Point2) -> GeoPoint {
        let warped = Vector2::new(
            self.warp.invert(point.x - self.canvas_width / 2.0),
            self.warp.invert(self.canvas_height / 2.0 - point.y),
        );
        let centered = self.rotation.inverse() * (warped / self.scale);
        GeoPoint::new(
            centered.y + self.center.latitude,
            centered.x + self.center.longitude,
        )
    }

    /// Returns `(width, height)` of the canvas.
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }
}

impl Projection for CoordinateTransform {
    fn project(&self, point: GeoPoint) -> Point2 {
        self.transform(point)
    }
}
