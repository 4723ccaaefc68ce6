use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TraceError};
use crate::route::LaneRoute;
use crate::transform::Projection;

use super::corner::{CornerComputer, CornerPoint, DebugLine, LanePoint};

/// Which corners of a traced route carry the route label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndPointPolicy {
    /// No labels.
    None,
    /// Only the first corner.
    #[default]
    First,
    /// The corners at the given indices.
    Indices(Vec<usize>),
}

impl EndPointPolicy {
    fn is_end_point(&self, index: usize) -> bool {
        match self {
            Self::None => false,
            Self::First => index == 0,
            Self::Indices(indices) => indices.contains(&index),
        }
    }
}

/// Traces a lane-annotated route into a closed sequence of mitred corners.
///
/// Corner `i` joins the segments `p[i] -> p[i+1]` and `p[i+1] -> p[i+2]`
/// (indices modulo the route length), so the output has one corner per
/// input point and corner `i` connects to corner `i + 1`, wrapping around.
/// Points are projected before any corner geometry is computed.
#[derive(Debug)]
pub struct RouteTracer<'a, P> {
    computer: &'a CornerComputer,
    projection: &'a P,
    end_points: EndPointPolicy,
    debug_lines: bool,
}

impl<'a, P: Projection> RouteTracer<'a, P> {
    /// Creates a tracer labelling the first corner, without debug lines.
    #[must_use]
    pub fn new(computer: &'a CornerComputer, projection: &'a P) -> Self {
        Self {
            computer,
            projection,
            end_points: EndPointPolicy::default(),
            debug_lines: false,
        }
    }

    /// Sets which corners are marked as end points.
    #[must_use]
    pub fn with_end_points(mut self, policy: EndPointPolicy) -> Self {
        self.end_points = policy;
        self
    }

    /// Keeps the raw `(before, here)` pair on every corner.
    #[must_use]
    pub fn with_debug_lines(mut self, enabled: bool) -> Self {
        self.debug_lines = enabled;
        self
    }

    /// Traces the route.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::InsufficientPoints` if the route has fewer than 3
    /// points, or the corner computer's error if a corner cannot be resolved.
    pub fn trace(&self, route: &LaneRoute) -> Result<Vec<CornerPoint>> {
        let n = route.points.len();
        if n < 3 {
            return Err(TraceError::InsufficientPoints {
                route: route.name.clone(),
                points: n,
            }
            .into());
        }

        let projected: Vec<LanePoint> = route
            .points
            .iter()
            .map(|p| LanePoint::new(self.projection.project(p.geo), p.lane))
            .collect();

        let mut corners = Vec::with_capacity(n);
        for i in 0..n {
            let (b, h, a) = (i, (i + 1) % n, (i + 2) % n);
            let mut corner =
                self.computer
                    .compute_corner(&projected[b], &projected[h], &projected[a])?;
            corner.is_end_point = self.end_points.is_end_point(i);
            if self.debug_lines {
                corner.debug_line = Some(DebugLine {
                    from: route.points[b],
                    to: route.points[h],
                    parts: self
                        .computer
                        .split_segment(projected[b].position, projected[h].position),
                });
            }
            corners.push(corner);
        }

        debug!(route = %route.name, corners = corners.len(), "traced route");
        Ok(corners)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::LanemapError;
    use crate::operations::corner::CornerConfig;
    use crate::route::{GeoPoint, RoutePoint};
    use crate::transform::{CoordinateTransform, GeoPlane, TransformConfig};

    const K: f64 = 0.25;

    fn computer() -> CornerComputer {
        CornerComputer::new(CornerConfig {
            lane_spacing: K,
            switch_distance: 1.0,
        })
        .unwrap()
    }

    /// `(x, y)` in the geographic plane: longitude `x`, latitude `y`.
    fn route(name: &str, xy: &[(f64, f64)], lane: u32) -> LaneRoute {
        LaneRoute {
            name: name.to_owned(),
            points: xy
                .iter()
                .map(|&(x, y)| RoutePoint::new(GeoPoint::new(y, x), lane))
                .collect(),
        }
    }

    fn square() -> LaneRoute {
        route("AK-01", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], 1)
    }

    #[test]
    fn square_traces_to_outer_offset_square() {
        let c = computer();
        let corners = RouteTracer::new(&c, &GeoPlane).trace(&square()).unwrap();
        assert_eq!(corners.len(), 4);
        let expected = [
            (10.0 + K, -K),
            (10.0 + K, 10.0 + K),
            (-K, 10.0 + K),
            (-K, -K),
        ];
        for (corner, (x, y)) in corners.iter().zip(expected) {
            assert_abs_diff_eq!(corner.coords.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(corner.coords.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn corner_i_depends_on_points_i_to_i_plus_2() {
        let c = computer();
        let mut r = route(
            "AK-02",
            &[(0.0, 0.0), (4.0, 1.0), (6.0, 5.0), (2.0, 7.0), (-1.0, 3.0)],
            1,
        );
        for (i, p) in r.points.iter_mut().enumerate() {
            p.lane = u32::try_from(i % 3).unwrap() + 1;
        }
        let corners = RouteTracer::new(&c, &GeoPlane).trace(&r).unwrap();
        let n = r.points.len();
        assert_eq!(corners.len(), n);
        let lp = |i: usize| {
            let p = r.points[i % n];
            LanePoint::new(GeoPlane.project(p.geo), p.lane)
        };
        for (i, corner) in corners.iter().enumerate() {
            let expected = c.compute_corner(&lp(i), &lp(i + 1), &lp(i + 2)).unwrap();
            assert_eq!(corner.coords, expected.coords, "corner {i}");
            assert_eq!(corner.switcher_line_before, expected.switcher_line_before);
        }
    }

    #[test]
    fn first_corner_is_end_point_by_default() {
        let c = computer();
        let corners = RouteTracer::new(&c, &GeoPlane).trace(&square()).unwrap();
        let flags: Vec<_> = corners.iter().map(|c| c.is_end_point).collect();
        assert_eq!(flags, [true, false, false, false]);
        assert!(corners.iter().all(|c| c.debug_line.is_none()));
    }

    #[test]
    fn end_point_policy_is_caller_supplied() {
        let c = computer();
        let none = RouteTracer::new(&c, &GeoPlane)
            .with_end_points(EndPointPolicy::None)
            .trace(&square())
            .unwrap();
        assert!(none.iter().all(|c| !c.is_end_point));

        let some = RouteTracer::new(&c, &GeoPlane)
            .with_end_points(EndPointPolicy::Indices(vec![1, 3]))
            .trace(&square())
            .unwrap();
        let flags: Vec<_> = some.iter().map(|c| c.is_end_point).collect();
        assert_eq!(flags, [false, true, false, true]);
    }

    #[test]
    fn debug_lines_carry_raw_segment() {
        let c = computer();
        let r = square();
        let corners = RouteTracer::new(&c, &GeoPlane)
            .with_debug_lines(true)
            .trace(&r)
            .unwrap();
        let debug = corners[3].debug_line.unwrap();
        assert_eq!((debug.from, debug.to), (r.points[3], r.points[0]));
        assert_abs_diff_eq!(debug.parts[1].start().y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(debug.parts[1].end().y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(debug.parts[2].end().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn fewer_than_three_points_is_rejected() {
        let c = computer();
        let tracer = RouteTracer::new(&c, &GeoPlane);
        for xy in [&[][..], &[(0.0, 0.0)][..], &[(0.0, 0.0), (1.0, 1.0)][..]] {
            let err = tracer.trace(&route("short", xy, 1)).unwrap_err();
            assert!(matches!(
                err,
                LanemapError::Trace(TraceError::InsufficientPoints { points, .. }) if points == xy.len()
            ));
        }
    }

    #[test]
    fn duplicate_points_trace_to_finite_corners() {
        let c = computer();
        let r = route(
            "dup",
            &[(0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (5.0, 5.0)],
            2,
        );
        let corners = RouteTracer::new(&c, &GeoPlane).trace(&r).unwrap();
        for corner in &corners {
            assert!(corner.coords.x.is_finite() && corner.coords.y.is_finite());
        }
    }

    #[test]
    fn traces_through_canvas_transform() {
        let c = CornerComputer::new(CornerConfig::default()).unwrap();
        let t = CoordinateTransform::new(&TransformConfig::default()).unwrap();
        let r = LaneRoute {
            name: "AK-03".to_owned(),
            points: [(-6.59, 106.79), (-6.59, 106.80), (-6.60, 106.80)]
                .iter()
                .map(|&(lat, lon)| RoutePoint::new(GeoPoint::new(lat, lon), 1))
                .collect(),
        };
        let corners = RouteTracer::new(&c, &t).trace(&r).unwrap();
        let (w, h) = t.canvas_size();
        for corner in &corners {
            assert!((0.0..=w).contains(&corner.coords.x));
            assert!((0.0..=h).contains(&corner.coords.y));
        }
    }
}
