mod point;

pub use point::{GeoPoint, RoutePoint};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a route in a [`RouteSet`].
    pub struct RouteId;
}

/// A named transit line: an ordered, cyclic sequence of stops.
///
/// The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub points: Vec<GeoPoint>,
}

impl Route {
    /// Creates a new route.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<GeoPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// A route whose points carry lane indices.
///
/// Only produced by [`LaneAssigner`](crate::operations::LaneAssigner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRoute {
    pub name: String,
    pub points: Vec<RoutePoint>,
}

/// Arena of routes, iterated in insertion order.
///
/// Routes are never removed, so slot order equals insertion order. Lane
/// numbering follows this order.
#[derive(Debug, Default)]
pub struct RouteSet {
    routes: SlotMap<RouteId, Route>,
    order: Vec<RouteId>,
    by_name: HashMap<String, RouteId>,
}

impl RouteSet {
    /// Creates a new, empty route set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a route and returns its ID.
    ///
    /// A route with an already known name replaces the previous points but
    /// keeps its position in the iteration order.
    pub fn insert(&mut self, route: Route) -> RouteId {
        if let Some(&id) = self.by_name.get(&route.name) {
            if let Some(existing) = self.routes.get_mut(id) {
                *existing = route;
            }
            return id;
        }
        let name = route.name.clone();
        let id = self.routes.insert(route);
        self.order.push(id);
        self.by_name.insert(name, id);
        id
    }

    /// Appends a point to the named route, creating the route if needed.
    pub fn push_point(&mut self, name: &str, point: GeoPoint) -> RouteId {
        let id = match self.by_name.get(name) {
            Some(&id) => id,
            None => self.insert(Route::new(name, Vec::new())),
        };
        if let Some(route) = self.routes.get_mut(id) {
            route.points.push(point);
        }
        id
    }

    /// Returns the route with the given ID.
    #[must_use]
    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Returns the ID of the route with the given name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<RouteId> {
        self.by_name.get(name).copied()
    }

    /// Returns the route with the given name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Iterates over routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RouteId, &Route)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.routes.get(id).map(|r| (id, r)))
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Route> for RouteSet {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut set = Self::new();
        for route in iter {
            set.insert(route);
        }
        set
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn g(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let set: RouteSet = ["AK-03", "AK-01", "AK-02"]
            .into_iter()
            .map(|n| Route::new(n, vec![g(0.0, 0.0)]))
            .collect();
        let names: Vec<_> = set.iter().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(names, ["AK-03", "AK-01", "AK-02"]);
    }

    #[test]
    fn push_point_groups_by_name() {
        let mut set = RouteSet::new();
        let a = set.push_point("AK-01", g(1.0, 2.0));
        set.push_point("AK-02", g(5.0, 5.0));
        let a2 = set.push_point("AK-01", g(3.0, 4.0));
        assert_eq!(a, a2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.by_name("AK-01").unwrap().points, vec![g(1.0, 2.0), g(3.0, 4.0)]);
    }

    #[test]
    fn insert_with_known_name_replaces_points() {
        let mut set = RouteSet::new();
        let first = set.insert(Route::new("AK-01", vec![g(1.0, 1.0)]));
        set.insert(Route::new("AK-02", vec![]));
        let again = set.insert(Route::new("AK-01", vec![g(2.0, 2.0)]));
        assert_eq!(first, again);
        assert_eq!(set.get(first).unwrap().points, vec![g(2.0, 2.0)]);
        assert_eq!(set.iter().next().unwrap().0, first);
    }
}
