use crate::{
    constants::TotalDistance,
    graph::{PlaceGraph, PlaceIndex, RouteIndex},
};

use super::visited_places;

/// Ordered routes leading from `departure` to `arrival`.
///
/// An itinerary whose departure equals its arrival may have no routes at all.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Itinerary {
    pub departure: PlaceIndex,
    pub arrival: PlaceIndex,
    pub routes: Vec<RouteIndex>,
    pub distance: TotalDistance,
}

impl Itinerary {
    pub fn new(
        departure: PlaceIndex,
        arrival: PlaceIndex,
        routes: Vec<RouteIndex>,
        distance: TotalDistance,
    ) -> Self {
        Itinerary {
            departure,
            arrival,
            routes,
            distance,
        }
    }

    /// Itinerary staying at `place`
    pub fn empty(place: PlaceIndex) -> Self {
        Self::new(place, place, Vec::new(), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Continues this itinerary with `next`, which has to depart where this
    /// one arrives.
    pub fn extend(&mut self, next: Itinerary) {
        debug_assert_eq!(self.arrival, next.departure);
        self.routes.extend(next.routes);
        self.distance += next.distance;
        self.arrival = next.arrival;
    }

    pub fn join(mut self, next: Itinerary) -> Itinerary {
        self.extend(next);
        self
    }

    /// Distinct places visited, departure first
    pub fn places(&self, g: &PlaceGraph) -> Vec<PlaceIndex> {
        visited_places(g, self.departure, &self.routes)
    }

    /// One line per route: `<code> (<distance> km) <from> <-> <to>`
    pub fn describe(&self, g: &PlaceGraph) -> Vec<String> {
        self.routes
            .iter()
            .map(|route_idx| g.route_label(g.route(*route_idx)))
            .collect()
    }
}
