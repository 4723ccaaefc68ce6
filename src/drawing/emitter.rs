use serde::{Deserialize, Serialize};

use super::{Drawing, Layer, Primitive, Stroke};
use crate::math::{Point2, Vector2};
use crate::operations::{CornerPoint, DebugLine};
use crate::transform::Projection;

/// Sizes of emitted primitives, in canvas units.
///
/// Label sizes are given at text scale and shrunk by `text_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub stroke_width: f64,
    pub text_factor: f64,
    pub font_size: f64,
    pub label_radius: f64,
    /// How far the label circle sits above the text baseline.
    pub label_raise: f64,
    pub label_outline_width: f64,
    pub debug_stroke_width: f64,
    pub frame_stroke_width: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            text_factor: 0.1,
            font_size: 16.0,
            label_radius: 15.0,
            label_raise: 6.0,
            label_outline_width: 2.0,
            debug_stroke_width: 0.2,
            frame_stroke_width: 10.0,
        }
    }
}

const DEBUG_COLOR: &str = "rgb(255,0,0)";

/// Returns the label shown on a route's end point: the part after the
/// first `-` (`AK-05` becomes `05`), or the whole name.
#[must_use]
pub fn route_label(name: &str) -> &str {
    name.split_once('-').map_or(name, |(_, rest)| rest)
}

/// Turns traced corners into drawing primitives.
#[derive(Debug, Clone, Default)]
pub struct DrawingEmitter {
    config: EmitterConfig,
}

impl DrawingEmitter {
    /// Creates an emitter.
    #[must_use]
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Emits one route.
    ///
    /// The closed path visits, per corner, the switcher start, the switcher
    /// end and the corner itself. End-point corners get a label; corners
    /// carrying a debug line get a red overlay of the raw segment, projected
    /// with `projection`, and its lane-0 pieces in black.
    pub fn emit_route<P: Projection>(
        &self,
        drawing: &mut Drawing,
        name: &str,
        color: &str,
        corners: &[CornerPoint],
        projection: &P,
    ) {
        let mut points = Vec::with_capacity(corners.len() * 3);
        for corner in corners {
            points.push(corner.switcher_line_before.start());
            points.push(corner.switcher_line_before.end());
            points.push(corner.coords);

            if corner.is_end_point {
                self.emit_label(drawing, corner.coords, route_label(name));
            }
            if let Some(debug) = &corner.debug_line {
                self.emit_debug(drawing, debug, projection);
            }
        }

        drawing.push(
            Layer::Routes,
            Primitive::Path {
                points,
                closed: true,
                stroke: Stroke::new(color, self.config.stroke_width),
            },
        );
    }

    /// Emits the closed black outline of the map's bounding box.
    pub fn emit_frame(&self, drawing: &mut Drawing, corners: [Point2; 4]) {
        drawing.push(
            Layer::Frame,
            Primitive::Path {
                points: corners.to_vec(),
                closed: true,
                stroke: Stroke::new("black", self.config.frame_stroke_width),
            },
        );
    }

    fn emit_label(&self, drawing: &mut Drawing, at: Point2, text: &str) {
        let c = &self.config;
        let center = at - Vector2::new(0.0, c.label_raise * c.text_factor);
        let radius = c.label_radius * c.text_factor;

        drawing.push(
            Layer::LabelOutlines,
            Primitive::Circle {
                center,
                radius,
                fill: Some("white".to_owned()),
                stroke: Some(Stroke::new("black", c.label_outline_width * c.text_factor)),
            },
        );
        drawing.push(
            Layer::LabelFills,
            Primitive::Circle {
                center,
                radius,
                fill: Some("white".to_owned()),
                stroke: None,
            },
        );
        drawing.push(
            Layer::LabelTexts,
            Primitive::Label {
                position: at,
                text: text.to_owned(),
                size: c.font_size * c.text_factor,
                fill: "black".to_owned(),
            },
        );
    }

    fn emit_debug<P: Projection>(&self, drawing: &mut Drawing, debug: &DebugLine, projection: &P) {
        let c = &self.config;
        let from = projection.project(debug.from.geo);
        let to = projection.project(debug.to.geo);
        drawing.push(
            Layer::Debug,
            Primitive::Line {
                from,
                to,
                stroke: Stroke::new(DEBUG_COLOR, c.debug_stroke_width),
            },
        );
        for part in &debug.parts {
            drawing.push(
                Layer::Debug,
                Primitive::Line {
                    from: part.start(),
                    to: part.end(),
                    stroke: Stroke::new("black", c.debug_stroke_width),
                },
            );
        }
        drawing.push(
            Layer::Debug,
            Primitive::Circle {
                center: from,
                radius: c.debug_stroke_width * 2.0,
                fill: Some(DEBUG_COLOR.to_owned()),
                stroke: None,
            },
        );
        drawing.push(
            Layer::Debug,
            Primitive::Label {
                position: from,
                text: debug.from.lane.to_string(),
                size: c.font_size * c.text_factor,
                fill: "black".to_owned(),
            },
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::{CornerComputer, CornerConfig, EndPointPolicy, RouteTracer};
    use crate::route::{GeoPoint, LaneRoute, RoutePoint};
    use crate::transform::GeoPlane;

    fn traced(debug: bool, policy: EndPointPolicy) -> (LaneRoute, Vec<CornerPoint>) {
        let route = LaneRoute {
            name: "AK-05".to_owned(),
            points: [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
                .iter()
                .map(|&(lat, lon)| RoutePoint::new(GeoPoint::new(lat, lon), 1))
                .collect(),
        };
        let computer = CornerComputer::new(CornerConfig {
            lane_spacing: 0.5,
            switch_distance: 1.0,
        })
        .unwrap();
        let corners = RouteTracer::new(&computer, &GeoPlane)
            .with_end_points(policy)
            .with_debug_lines(debug)
            .trace(&route)
            .unwrap();
        (route, corners)
    }

    #[test]
    fn label_is_suffix_after_dash() {
        assert_eq!(route_label("AK-05"), "05");
        assert_eq!(route_label("Express"), "Express");
        assert_eq!(route_label("A-B-C"), "B-C");
    }

    #[test]
    fn path_visits_switcher_then_corner() {
        let (_, corners) = traced(false, EndPointPolicy::None);
        let mut drawing = Drawing::new(100.0, 100.0);
        DrawingEmitter::default().emit_route(&mut drawing, "AK-05", "pink", &corners, &GeoPlane);

        assert_eq!(drawing.len(), 1);
        let Some(Primitive::Path { points, closed, stroke }) = drawing.layer(Layer::Routes).next()
        else {
            panic!("expected a route path");
        };
        assert!(*closed);
        assert_eq!(stroke.color, "pink");
        assert_eq!(points.len(), corners.len() * 3);
        for (i, corner) in corners.iter().enumerate() {
            assert_eq!(points[3 * i], corner.switcher_line_before.start());
            assert_eq!(points[3 * i + 1], corner.switcher_line_before.end());
            assert_eq!(points[3 * i + 2], corner.coords);
        }
    }

    #[test]
    fn end_point_gets_circled_label() {
        let (_, corners) = traced(false, EndPointPolicy::First);
        let mut drawing = Drawing::new(100.0, 100.0);
        DrawingEmitter::default().emit_route(&mut drawing, "AK-05", "pink", &corners, &GeoPlane);

        assert_eq!(drawing.layer(Layer::LabelOutlines).count(), 1);
        assert_eq!(drawing.layer(Layer::LabelFills).count(), 1);
        let Some(Primitive::Label { position, text, .. }) = drawing.layer(Layer::LabelTexts).next()
        else {
            panic!("expected a label");
        };
        assert_eq!(text, "05");
        assert_eq!(*position, corners[0].coords);
        let Some(Primitive::Circle { center, radius, .. }) =
            drawing.layer(Layer::LabelOutlines).next()
        else {
            panic!("expected a circle");
        };
        assert!((radius - 1.5).abs() < 1e-12);
        assert!((center.y - (corners[0].coords.y - 0.6)).abs() < 1e-12);
    }

    #[test]
    fn debug_lines_become_overlay() {
        let (route, corners) = traced(true, EndPointPolicy::None);
        let mut drawing = Drawing::new(100.0, 100.0);
        DrawingEmitter::default().emit_route(&mut drawing, "AK-05", "pink", &corners, &GeoPlane);

        let debug: Vec<_> = drawing.layer(Layer::Debug).collect();
        assert_eq!(debug.len(), corners.len() * 6);
        let Primitive::Line { from, to, .. } = debug[0] else {
            panic!("expected a debug line first");
        };
        assert_eq!(*from, GeoPlane.project(route.points[0].geo));
        assert_eq!(*to, GeoPlane.project(route.points[1].geo));

        let parts = corners[0].debug_line.unwrap().parts;
        for (primitive, part) in debug[1..4].iter().zip(parts) {
            let Primitive::Line { from, to, stroke } = primitive else {
                panic!("expected lane-0 pieces after the raw line");
            };
            assert_eq!((*from, *to), (part.start(), part.end()));
            assert_eq!(stroke.color, "black");
        }
        assert!(matches!(debug[4], Primitive::Circle { .. }));
        assert!(matches!(debug[5], Primitive::Label { .. }));
    }
}
