use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::route::{GeoPoint, LaneRoute, Route, RouteId, RoutePoint, RouteSet};

/// Lane number given to the first traversal of a directed segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneBase {
    /// First traversal draws on the centreline.
    Zero,
    /// First traversal is already offset by one lane.
    #[default]
    One,
}

impl LaneBase {
    fn lane_for(self, traversal: u32) -> u32 {
        match self {
            Self::Zero => traversal.saturating_sub(1),
            Self::One => traversal,
        }
    }
}

/// Directed segment identified by coordinate values, start first.
type SegmentKey = ([u64; 2], [u64; 2]);

fn segment_key(start: &GeoPoint, end: &GeoPoint) -> SegmentKey {
    (start.key(), end.key())
}

/// Assigns lanes to routes by counting directed segment traversals.
///
/// For every point `p[i]` of a route, the directed segment
/// `p[i] -> p[(i + 1) % len]` is counted; the point receives the lane of that
/// traversal. A later traversal of the same directed segment, by another
/// route or by the same route, always gets a strictly greater lane.
///
/// The count table lives in the assigner and persists across calls until
/// [`reset`](Self::reset). Lane numbers therefore depend on the order routes
/// are assigned in.
#[derive(Debug, Default)]
pub struct LaneAssigner {
    base: LaneBase,
    traversals: HashMap<SegmentKey, u32>,
}

impl LaneAssigner {
    /// Creates an assigner with an empty count table.
    #[must_use]
    pub fn new(base: LaneBase) -> Self {
        Self {
            base,
            traversals: HashMap::new(),
        }
    }

    /// Annotates a single route, counting its segments into the table.
    ///
    /// Routes with fewer than 2 points have no segments: their points get the
    /// first lane and the table is left untouched.
    pub fn assign(&mut self, route: &Route) -> LaneRoute {
        let n = route.points.len();
        if n < 2 {
            return LaneRoute {
                name: route.name.clone(),
                points: route
                    .points
                    .iter()
                    .map(|p| RoutePoint::new(*p, self.base.lane_for(1)))
                    .collect(),
            };
        }
        let mut points = Vec::with_capacity(n);
        let mut shared = 0_usize;

        for (i, here) in route.points.iter().enumerate() {
            let next = &route.points[(i + 1) % n];
            let count = self
                .traversals
                .entry(segment_key(here, next))
                .or_insert(0);
            *count += 1;
            if *count > 1 {
                shared += 1;
            }
            trace!(route = %route.name, index = i, traversal = *count, "segment counted");
            points.push(RoutePoint::new(*here, self.base.lane_for(*count)));
        }

        debug!(
            route = %route.name,
            segments = n,
            shared,
            "assigned lanes"
        );

        LaneRoute {
            name: route.name.clone(),
            points,
        }
    }

    /// Annotates every route of the set in iteration order.
    pub fn assign_all(&mut self, routes: &RouteSet) -> Vec<(RouteId, LaneRoute)> {
        routes
            .iter()
            .map(|(id, route)| (id, self.assign(route)))
            .collect()
    }

    /// Returns how many times the directed segment `start -> end` was traversed.
    #[must_use]
    pub fn traversals(&self, start: &GeoPoint, end: &GeoPoint) -> u32 {
        self.traversals
            .get(&segment_key(start, end))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of distinct directed segments seen so far.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.traversals.len()
    }

    /// Clears the count table.
    pub fn reset(&mut self) {
        self.traversals.clear();
    }
}
