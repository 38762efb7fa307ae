use crate::constants::TotalDistance;
use crate::error::ItineraryError;
use crate::filter::SearchFilter;
use crate::graph::*;
use crate::search::shortest_path::Itinerary;
use crate::statistics::SearchStats;
use log::{debug, info};

/// Distances and predecessor routes of one Dijkstra run.
///
/// Places outside the place filter can be reached, they are just never
/// expanded. A path may therefore end at such a place but not pass through it.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: PlaceIndex,
    distances: Vec<Option<TotalDistance>>,
    predecessors: Vec<Option<RouteIndex>>,
}

impl ShortestPathTree {
    /// `None` if `target` is unreachable
    pub fn distance(&self, target: PlaceIndex) -> Option<TotalDistance> {
        self.distances[target.index()]
    }

    pub fn is_reachable(&self, target: PlaceIndex) -> bool {
        self.distance(target).is_some()
    }

    pub fn path_to(&self, g: &PlaceGraph, target: PlaceIndex) -> Option<Itinerary> {
        let distance = self.distance(target)?;
        let routes = super::reconstruct_path(g, self.source, target, &self.predecessors)?;
        Some(Itinerary::new(self.source, target, routes, distance))
    }
}

/// Dijkstra with a linear scan for the closest unsettled place, O(V²).
///
/// Ties are broken by the lower place index.
pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a PlaceGraph,
    filter: SearchFilter,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a PlaceGraph) -> Self {
        Self::with_filter(graph, SearchFilter::all())
    }

    pub fn with_filter(graph: &'a PlaceGraph, filter: SearchFilter) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
            filter,
        }
    }

    pub fn search(
        &mut self,
        source: PlaceIndex,
        target: PlaceIndex,
    ) -> Result<Itinerary, ItineraryError> {
        let tree = self.run(source, Some(target));

        let sp = tree.path_to(self.g, target);
        if let Some(sp) = &sp {
            debug!("Path found: {:?}", sp);
            info!(
                "Path found: {:?}/{} places settled",
                self.stats.duration, self.stats.places_settled
            );
        } else {
            info!(
                "No path found: {:?}/{} places settled",
                self.stats.duration, self.stats.places_settled
            );
        }

        sp.ok_or_else(|| ItineraryError::Unreachable {
            departure: self.g.name(source).to_string(),
            arrival: self.g.name(target).to_string(),
        })
    }

    /// Settles every place reachable from `source`
    pub fn tree(&mut self, source: PlaceIndex) -> ShortestPathTree {
        self.run(source, None)
    }

    fn run(&mut self, source: PlaceIndex, target: Option<PlaceIndex>) -> ShortestPathTree {
        self.stats.init();

        let num_places = self.g.num_places();
        let mut distances: Vec<Option<TotalDistance>> = vec![None; num_places];
        let mut predecessors: Vec<Option<RouteIndex>> = vec![None; num_places];
        let mut settled = vec![false; num_places];

        distances[source.index()] = Some(0);

        while let Some((place_idx, distance)) = closest_unsettled(&distances, &settled) {
            settled[place_idx.index()] = true;
            self.stats.places_settled += 1;

            if Some(place_idx) == target {
                break;
            }

            // Only the source and places inside the filter are expanded
            if place_idx != source && !self.filter.allows_place(self.g.place(place_idx).category())
            {
                continue;
            }

            for (route_idx, route) in self.g.outgoing(place_idx) {
                if !self.filter.allows_road(route.category) || settled[route.to.index()] {
                    continue;
                }

                let new_distance = distance + TotalDistance::from(route.distance);
                if distances[route.to.index()].map_or(true, |old| new_distance < old) {
                    distances[route.to.index()] = Some(new_distance);
                    predecessors[route.to.index()] = Some(route_idx);
                }
            }
        }
        self.stats.finish();

        ShortestPathTree {
            source,
            distances,
            predecessors,
        }
    }
}

/// First unsettled place with the smallest finite distance
fn closest_unsettled(
    distances: &[Option<TotalDistance>],
    settled: &[bool],
) -> Option<(PlaceIndex, TotalDistance)> {
    let mut closest: Option<(PlaceIndex, TotalDistance)> = None;
    for (i, distance) in distances.iter().enumerate() {
        if settled[i] {
            continue;
        }
        if let Some(distance) = *distance {
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((PlaceIndex::new(i), distance));
            }
        }
    }
    closest
}
