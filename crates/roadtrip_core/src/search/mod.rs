use rustc_hash::FxHashSet;

use crate::{
    error::ItineraryError,
    filter::SearchFilter,
    graph::{PlaceGraph, PlaceIndex, RouteIndex},
    tally::CategoryTally,
};

use self::{dijkstra::Dijkstra, itinerary::ItinerarySearch, shortest_path::Itinerary};

pub mod dijkstra;
pub mod itinerary;
pub mod shortest_path;

/// Walks the predecessor routes back from `target` to `source`.
///
/// Returns `None` if a place on the way has no predecessor and is not the
/// source itself.
pub fn reconstruct_path(
    g: &PlaceGraph,
    source: PlaceIndex,
    target: PlaceIndex,
    predecessors: &[Option<RouteIndex>],
) -> Option<Vec<RouteIndex>> {
    let mut path = Vec::new();
    let mut current = target;

    while current != source {
        let route_idx = predecessors[current.index()]?;
        path.push(route_idx);
        current = g.route(route_idx).from;
    }

    path.reverse();
    Some(path)
}

/// Distinct places visited by `path` in visiting order: the departure and the
/// destination of every route.
pub fn visited_places(
    g: &PlaceGraph,
    departure: PlaceIndex,
    path: &[RouteIndex],
) -> Vec<PlaceIndex> {
    let mut seen = FxHashSet::default();
    std::iter::once(departure)
        .chain(path.iter().map(|route_idx| g.route(*route_idx).to))
        .filter(|place_idx| seen.insert(*place_idx))
        .collect()
}

impl PlaceGraph {
    /// Shortest path over every place and road category
    pub fn shortest_path(
        &self,
        departure: PlaceIndex,
        arrival: PlaceIndex,
    ) -> Result<Itinerary, ItineraryError> {
        Dijkstra::new(self).search(departure, arrival)
    }

    /// Shortest path whose intermediate places and roads pass `filter`
    pub fn shortest_path_filtered(
        &self,
        departure: PlaceIndex,
        arrival: PlaceIndex,
        filter: &SearchFilter,
    ) -> Result<Itinerary, ItineraryError> {
        Dijkstra::with_filter(self, *filter).search(departure, arrival)
    }

    /// Shortest path visiting at least `target` places of every category.
    ///
    /// The detours are chosen greedily, see [`ItinerarySearch`].
    pub fn constrained_shortest_path(
        &self,
        departure: PlaceIndex,
        arrival: PlaceIndex,
        filter: &SearchFilter,
        target: &CategoryTally,
    ) -> Result<Itinerary, ItineraryError> {
        ItinerarySearch::with_filter(self, *filter).search(departure, arrival, target)
    }
}

#[cfg(test)]
pub(crate) fn assert_no_path(result: Result<Itinerary, ItineraryError>) {
    assert!(
        matches!(result, Err(ItineraryError::Unreachable { .. })),
        "expected no path, got {:?}",
        result
    );
}

/// Asserts that `result` visits the places named in `expected_places`, in
/// that order, over `expected_distance` kilometres.
#[cfg(test)]
pub(crate) fn assert_path(
    g: &PlaceGraph,
    expected_places: Vec<&str>,
    expected_distance: crate::constants::TotalDistance,
    result: Result<Itinerary, ItineraryError>,
) {
    let itinerary = result.expect("expected a path");
    let mut places = vec![g.name(itinerary.departure)];
    places.extend(
        itinerary
            .routes
            .iter()
            .map(|route_idx| g.name(g.route(*route_idx).to)),
    );
    assert_eq!(expected_places, places);
    assert_eq!(expected_distance, itinerary.distance);
    assert_eq!(Ok(itinerary.distance), g.path_distance(&itinerary.routes));
}
