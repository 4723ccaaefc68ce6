//! Abstract drawing primitives and their emission from traced routes.

mod emitter;
mod style;
pub mod svg;

pub use emitter::{route_label, DrawingEmitter, EmitterConfig};
pub use style::StyleTable;

use crate::math::Point2;

/// Stroke colour and width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    /// Creates a new stroke.
    #[must_use]
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// A single vector drawing command in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Polyline through `points`, optionally closed back to the first point.
    Path {
        points: Vec<Point2>,
        closed: bool,
        stroke: Stroke,
    },
    /// Straight line segment.
    Line {
        from: Point2,
        to: Point2,
        stroke: Stroke,
    },
    /// Circle with optional fill and outline.
    Circle {
        center: Point2,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    /// Text centred horizontally on `position`.
    Label {
        position: Point2,
        text: String,
        size: f64,
        fill: String,
    },
}

/// Stacking order of primitives; later layers are drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Frame,
    Routes,
    LabelOutlines,
    LabelFills,
    LabelTexts,
    Debug,
}

/// A canvas with layered primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    items: Vec<(Layer, Primitive)>,
}

impl Drawing {
    /// Creates an empty drawing of the given canvas size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Adds a primitive to a layer.
    pub fn push(&mut self, layer: Layer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    /// Returns primitives in drawing order: by layer, then insertion order.
    #[must_use]
    pub fn primitives(&self) -> Vec<&Primitive> {
        let mut ordered: Vec<&(Layer, Primitive)> = self.items.iter().collect();
        ordered.sort_by_key(|(layer, _)| *layer);
        ordered.into_iter().map(|(_, p)| p).collect()
    }

    /// Returns the primitives of one layer in insertion order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> + '_ {
        self.items
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, p)| p)
    }

    /// Returns the total number of primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
