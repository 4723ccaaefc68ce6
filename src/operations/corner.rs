use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigurationError, Result};
use crate::math::intersect_2d::{cut_lines, CutTier, LineDescriptor};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::route::RoutePoint;

/// Lanes per degree: one lane is `1 / 5000` degree.
const LANE_FACTOR: f64 = 5000.0;

/// A route point projected into the plane corners are computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanePoint {
    pub position: Point2,
    /// Lane of the segment starting at this point.
    pub lane: u32,
}

impl LanePoint {
    /// Creates a new planar lane point.
    #[must_use]
    pub fn new(position: Point2, lane: u32) -> Self {
        Self { position, lane }
    }
}

/// Parameters of a [`CornerComputer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    /// Offset per lane, in plane units.
    pub lane_spacing: f64,
    /// Length of the lane switch drawn before each corner, in plane units.
    pub switch_distance: f64,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            lane_spacing: 1.0 / LANE_FACTOR,
            switch_distance: 10.0 / LANE_FACTOR,
        }
    }
}

/// Raw incoming segment of a corner, kept for debug overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub from: RoutePoint,
    pub to: RoutePoint,
    /// Lane-0 split of the segment: before the switch, the switch, after it.
    pub parts: [LineDescriptor; 3],
}

/// A mitred corner of a traced route.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerPoint {
    pub coords: Point2,
    /// Short segment moving from the incoming lane onto the corner's lane.
    pub switcher_line_before: LineDescriptor,
    /// Whether a route label is drawn at this corner.
    pub is_end_point: bool,
    pub debug_line: Option<DebugLine>,
    /// Branch of the intersection that produced `coords`.
    pub tier: CutTier,
}

impl CornerPoint {
    /// Returns the corner with every coordinate mapped through `f`.
    ///
    /// Used to move corners traced in the geographic plane onto the canvas.
    #[must_use]
    pub fn map_coords(&self, mut f: impl FnMut(Point2) -> Point2) -> Self {
        Self {
            coords: f(self.coords),
            switcher_line_before: self.switcher_line_before.map_points(&mut f),
            debug_line: self.debug_line.map(|d| DebugLine {
                parts: d.parts.map(|part| part.map_points(&mut f)),
                ..d
            }),
            ..self.clone()
        }
    }
}

/// Computes mitred corners between lane-offset segments.
///
/// # Sign Convention
///
/// The lane offset of a segment with unit direction `(dx, dy)` points along
/// `(dy, -dx)`. In the geographic plane (`x = longitude`, `y = latitude`) this
/// is to the right of travel, so routes keep right. On a y-down canvas the
/// same formula offsets to the left.
#[derive(Debug, Clone)]
pub struct CornerComputer {
    config: CornerConfig,
}

impl CornerComputer {
    /// Creates a corner computer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidLaneSpacing` for a non-finite lane
    /// spacing and `ConfigurationError::InvalidSwitchDistance` for a negative
    /// or non-finite switch distance.
    pub fn new(config: CornerConfig) -> Result<Self> {
        if !config.lane_spacing.is_finite() {
            return Err(ConfigurationError::InvalidLaneSpacing(config.lane_spacing).into());
        }
        if !config.switch_distance.is_finite() || config.switch_distance < 0.0 {
            return Err(
                ConfigurationError::InvalidSwitchDistance(config.switch_distance).into(),
            );
        }
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CornerConfig {
        &self.config
    }

    /// Returns the one-lane offset vector for the segment `from -> to`.
    ///
    /// Zero for a zero-length segment.
    #[must_use]
    pub fn perpendicular(&self, from: Point2, to: Point2) -> Vector2 {
        let d = to - from;
        let len = d.norm();
        if len < TOLERANCE {
            return Vector2::zeros();
        }
        Vector2::new(d.y, -d.x) * (self.config.lane_spacing / len)
    }

    /// Returns the segment `from -> to` shifted sideways by `lane` lanes.
    #[must_use]
    pub fn offset_line(&self, from: Point2, to: Point2, lane: u32) -> LineDescriptor {
        let shift = self.perpendicular(from, to) * f64::from(lane);
        LineDescriptor::through(from + shift, to + shift)
    }

    /// Computes the corner at `here` between `before -> here` and `here -> after`.
    ///
    /// Both segments are offset by the lane stored at `here`; the returned
    /// switcher line moves the incoming segment from `before`'s lane onto it.
    /// Parallel, collinear and zero-length segments are resolved through the
    /// fallbacks of [`cut_lines`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::CornerUnresolved` if no finite corner
    /// exists, which only happens for non-finite input.
    pub fn compute_corner(
        &self,
        before: &LanePoint,
        here: &LanePoint,
        after: &LanePoint,
    ) -> Result<CornerPoint> {
        let line_a = self.offset_line(before.position, here.position, here.lane);
        let line_b = self.offset_line(here.position, after.position, here.lane);

        let (coords, tier) =
            cut_lines(&line_a, &line_b).ok_or(ConfigurationError::CornerUnresolved {
                x: here.position.x,
                y: here.position.y,
            })?;
        if tier != CutTier::Primary {
            trace!(?tier, x = coords.x, y = coords.y, "corner resolved by fallback");
        }

        Ok(CornerPoint {
            coords,
            switcher_line_before: self.switcher_line(before, here, coords),
            is_end_point: false,
            debug_line: None,
            tier,
        })
    }

    /// Splits `from -> to` at lane 0 into the stretch before the switch, the
    /// switch itself and the stretch after it.
    #[must_use]
    pub fn split_segment(&self, from: Point2, to: Point2) -> [LineDescriptor; 3] {
        let d = to - from;
        let len = d.norm();
        if len < TOLERANCE {
            let point = LineDescriptor::through(from, to);
            return [point; 3];
        }
        let dir = d / len;
        let s = self.config.switch_distance.min(len / 3.0);
        let switch_start = to - dir * (2.0 * s);
        let switch_end = to - dir * s;
        [
            LineDescriptor::through(from, switch_start),
            LineDescriptor::through(switch_start, switch_end),
            LineDescriptor::through(switch_end, to),
        ]
    }

    /// Builds the lane switch on the incoming segment, ending just before `corner`.
    fn switcher_line(&self, before: &LanePoint, here: &LanePoint, corner: Point2) -> LineDescriptor {
        let d = here.position - before.position;
        let len = d.norm();
        if len < TOLERANCE {
            return LineDescriptor::through(corner, corner);
        }
        let dir = d / len;
        let s = self.config.switch_distance.min(len / 3.0);
        let lane_delta = f64::from(before.lane) - f64::from(here.lane);
        let lane_shift = self.perpendicular(before.position, here.position) * lane_delta;

        let end = corner - dir * s;
        let start = corner - dir * (2.0 * s) + lane_shift;
        LineDescriptor::through(start, end)
    }
}
