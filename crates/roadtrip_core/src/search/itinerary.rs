//! Shortest path visiting a minimum number of places per category.
//!
//! The search inserts detours greedily: as long as the current itinerary
//! misses a category, it walks from the last fixed point to the closest
//! unvisited place of that category, fixes that leg and routes again to the
//! arrival. The result is not guaranteed to be the shortest itinerary that
//! satisfies the target, only a cheap approximation of it.
//!
//! ```text
//!            detour found           still deficient
//! Searching ───────────────► DetourFound ───────────► Searching
//!     │                            │
//!     │ no candidate left          │ every category satisfied
//!     ▼                            ▼
//!   Failed                     Satisfied
//! ```
use log::{debug, info};
use roadtrip_reader::PlaceCategory;
use rustc_hash::FxHashSet;

use crate::{
    error::{InsufficientCategoryError, ItineraryError},
    filter::SearchFilter,
    graph::{PlaceGraph, PlaceIndex},
    statistics::ItineraryStats,
    tally::CategoryTally,
};

use super::{dijkstra::Dijkstra, shortest_path::Itinerary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Looking for the closest unvisited place of the category
    Searching(PlaceCategory),
    /// Shortest leg from the fixed point to the chosen place
    DetourFound(Itinerary),
    Satisfied,
    Failed(PlaceCategory),
}

pub struct ItinerarySearch<'a> {
    pub stats: ItineraryStats,
    g: &'a PlaceGraph,
    filter: SearchFilter,
}

impl<'a> ItinerarySearch<'a> {
    pub fn new(graph: &'a PlaceGraph) -> Self {
        Self::with_filter(graph, SearchFilter::all())
    }

    pub fn with_filter(graph: &'a PlaceGraph, filter: SearchFilter) -> Self {
        ItinerarySearch {
            stats: ItineraryStats::default(),
            g: graph,
            filter,
        }
    }

    pub fn search(
        &mut self,
        departure: PlaceIndex,
        arrival: PlaceIndex,
        target: &CategoryTally,
    ) -> Result<Itinerary, ItineraryError> {
        self.stats.init();
        info!(
            "BEGIN ITINERARY SEARCH from {} to {} visiting {}",
            self.g.name(departure),
            self.g.name(arrival),
            target
        );

        let result = self.run(departure, arrival, target);

        self.stats.finish();
        match &result {
            Ok(itinerary) => info!(
                "FINISHED itinerary of {} km. {}",
                itinerary.distance, self.stats
            ),
            Err(err) => info!("FAILED itinerary search: {}. {}", err, self.stats),
        }
        result
    }

    fn run(
        &mut self,
        departure: PlaceIndex,
        arrival: PlaceIndex,
        target: &CategoryTally,
    ) -> Result<Itinerary, ItineraryError> {
        check_capacity(self.g, target)?;

        let mut current = self.shortest_path(departure, arrival)?;
        let mut tally = CategoryTally::of_places(self.g, &current.places(self.g));

        let mut state = match tally.first_deficient(target) {
            Some(category) => SearchState::Searching(category),
            None => {
                debug!("Shortest path already visits {}", tally);
                return Ok(current);
            }
        };

        let mut fixed_point = departure;
        let mut fixed_path = Itinerary::empty(departure);

        loop {
            debug!("{:?}", state);
            state = match state {
                SearchState::Searching(category) => {
                    let visited: FxHashSet<PlaceIndex> =
                        current.places(self.g).into_iter().collect();
                    match self.closest_unvisited(fixed_point, category, &visited) {
                        Some(detour) => SearchState::DetourFound(detour),
                        None => SearchState::Failed(category),
                    }
                }
                SearchState::DetourFound(detour) => {
                    self.stats.detours += 1;
                    fixed_point = detour.arrival;
                    fixed_path.extend(detour);

                    let tail = self.shortest_path(fixed_point, arrival)?;
                    current = fixed_path.clone().join(tail);
                    tally.update(self.g, &current.places(self.g));

                    match tally.first_deficient(target) {
                        Some(category) => SearchState::Searching(category),
                        None => SearchState::Satisfied,
                    }
                }
                SearchState::Satisfied => return Ok(current),
                SearchState::Failed(category) => {
                    return Err(ItineraryError::NoAccessiblePlace { category })
                }
            };
        }
    }

    /// Shortest leg from `from` to the closest place of `category` that is
    /// neither `from` nor in `visited`. Unreachable candidates and candidates
    /// outside the place filter are skipped, a detour target is passed
    /// through on the way to the arrival.
    fn closest_unvisited(
        &mut self,
        from: PlaceIndex,
        category: PlaceCategory,
        visited: &FxHashSet<PlaceIndex>,
    ) -> Option<Itinerary> {
        if !self.filter.allows_place(category) {
            return None;
        }

        let mut dijkstra = Dijkstra::with_filter(self.g, self.filter);
        let tree = dijkstra.tree(from);
        self.stats.record(&dijkstra.stats);

        let mut closest = None;
        for (place_idx, _) in self.g.places(Some(category)) {
            if place_idx == from || visited.contains(&place_idx) {
                continue;
            }
            if let Some(distance) = tree.distance(place_idx) {
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((place_idx, distance));
                }
            }
        }

        let (place_idx, _) = closest?;
        debug!(
            "Closest unvisited {} from {} is {}",
            category,
            self.g.name(from),
            self.g.name(place_idx)
        );
        tree.path_to(self.g, place_idx)
    }

    fn shortest_path(
        &mut self,
        from: PlaceIndex,
        to: PlaceIndex,
    ) -> Result<Itinerary, ItineraryError> {
        let mut dijkstra = Dijkstra::with_filter(self.g, self.filter);
        let result = dijkstra.search(from, to);
        self.stats.record(&dijkstra.stats);
        result
    }
}

/// Fails if the whole graph holds fewer places of a category than `target`
/// requires, regardless of reachability.
pub fn check_capacity(
    g: &PlaceGraph,
    target: &CategoryTally,
) -> Result<(), InsufficientCategoryError> {
    let available = CategoryTally::of_graph(g);
    match available.first_deficient(target) {
        Some(category) => Err(InsufficientCategoryError {
            category,
            required: target.get(category),
            available: available.get(category),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use roadtrip_reader::RoadCategory;

    use super::*;
    use crate::graph::place_index;
    use crate::search::assert_path;
    use crate::util::test_graphs::{generate_scenario_graph, graph_drome};

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn scenario_already_satisfied() {
        init_log();
        let g = generate_scenario_graph();
        let a = g.index_of("A").unwrap();
        let r = g.index_of("R").unwrap();
        let all = SearchFilter::all();

        let plain = g.shortest_path(a, r).unwrap();

        let restaurant = CategoryTally::new().with(PlaceCategory::Restaurant, 1);
        assert_eq!(
            g.constrained_shortest_path(a, r, &all, &restaurant),
            Ok(plain.clone())
        );

        let cities = CategoryTally::new().with(PlaceCategory::City, 2);
        assert_eq!(g.constrained_shortest_path(a, r, &all, &cities), Ok(plain));
    }

    #[test]
    fn isolated_candidate_is_unreachable() {
        init_log();
        let g: PlaceGraph = "V:A|N:5:B\nV:B|D:3:R\nR:R\nR:R2".parse().unwrap();
        let a = g.index_of("A").unwrap();
        let r = g.index_of("R").unwrap();

        let target = CategoryTally::new().with(PlaceCategory::Restaurant, 2);
        assert!(check_capacity(&g, &target).is_ok());
        assert_eq!(
            g.constrained_shortest_path(a, r, &SearchFilter::all(), &target),
            Err(ItineraryError::NoAccessiblePlace {
                category: PlaceCategory::Restaurant
            })
        );
    }

    #[test]
    fn insufficient_places_fail_before_searching() {
        let g = generate_scenario_graph();
        let a = g.index_of("A").unwrap();
        let r = g.index_of("R").unwrap();

        let target = CategoryTally::new().with(PlaceCategory::Recreation, 1);
        let mut search = ItinerarySearch::new(&g);
        assert_eq!(
            search.search(a, r, &target),
            Err(ItineraryError::InsufficientPlaces(InsufficientCategoryError {
                category: PlaceCategory::Recreation,
                required: 1,
                available: 0,
            }))
        );
        assert_eq!(search.stats.dijkstra_runs, 0);
    }

    #[test]
    fn single_restaurant_detour() {
        init_log();
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let target = CategoryTally::new().with(PlaceCategory::Restaurant, 1);

        let mut search = ItinerarySearch::new(&g);
        // Maison Pic is the closest restaurant to Valence. Stopping at Le
        // Bistrot would be 2 km shorter overall, the greedy choice misses it.
        assert_path(
            &g,
            vec!["Valence", "Maison Pic", "Valence", "Crest", "Die"],
            70,
            search.search(idx("Valence"), idx("Die"), &target),
        );
        assert_eq!(search.stats.detours, 1);
    }

    #[test]
    fn one_detour_per_missing_category() {
        init_log();
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let target = CategoryTally::from_counts(0, 1, 1);

        let mut search = ItinerarySearch::new(&g);
        let itinerary = search.search(idx("Valence"), idx("Die"), &target);
        assert_path(
            &g,
            vec![
                "Valence",
                "Maison Pic",
                "Valence",
                "Parc Jouvet",
                "Valence",
                "Crest",
                "Die",
            ],
            76,
            itinerary.clone(),
        );
        assert_eq!(search.stats.detours, 2);

        let itinerary = itinerary.unwrap();
        let tally = CategoryTally::of_places(&g, &itinerary.places(&g));
        assert!(tally.satisfies(&target));
    }

    #[test]
    fn additional_city() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let target = CategoryTally::new().with(PlaceCategory::City, 4);

        assert_path(
            &g,
            vec!["Valence", "Romans", "Valence", "Crest", "Die"],
            102,
            g.constrained_shortest_path(idx("Valence"), idx("Die"), &SearchFilter::all(), &target),
        );
    }

    #[test]
    fn filter_applies_to_detours() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let target = CategoryTally::new().with(PlaceCategory::Recreation, 1);

        // Without departmental roads every recreation site is out of reach
        let filter = SearchFilter::all().roads([RoadCategory::Highway, RoadCategory::National]);
        assert_eq!(
            g.constrained_shortest_path(idx("Valence"), idx("Die"), &filter, &target),
            Err(ItineraryError::NoAccessiblePlace {
                category: PlaceCategory::Recreation
            })
        );
    }

    #[test]
    fn excluded_category_is_never_a_detour() {
        // A -- B -- C, restaurant R hangs off B
        let g: PlaceGraph = "V:A|N:1:B\nV:B|N:1:C|D:1:R\nV:C\nR:R".parse().unwrap();
        let a = g.index_of("A").unwrap();
        let c = g.index_of("C").unwrap();
        let target = CategoryTally::new().with(PlaceCategory::Restaurant, 1);

        let cities = SearchFilter::all().places([PlaceCategory::City]);
        assert_eq!(
            g.constrained_shortest_path(a, c, &cities, &target),
            Err(ItineraryError::NoAccessiblePlace {
                category: PlaceCategory::Restaurant
            })
        );

        // Without the filter the restaurant is visited
        assert_path(
            &g,
            vec!["A", "B", "R", "B", "C"],
            4,
            g.constrained_shortest_path(a, c, &SearchFilter::all(), &target),
        );
    }

    #[test]
    fn detours_avoid_excluded_places() {
        // A -- R -- B is short, A -- B is long, C hangs off A
        let g: PlaceGraph = "V:A|D:1:R|N:10:B|N:4:C\nR:R|D:1:B\nV:B\nV:C"
            .parse()
            .unwrap();
        let a = g.index_of("A").unwrap();
        let b = g.index_of("B").unwrap();
        let target = CategoryTally::new().with(PlaceCategory::City, 3);

        let cities = SearchFilter::all().places([PlaceCategory::City]);
        assert_path(
            &g,
            vec!["A", "C", "A", "B"],
            18,
            g.constrained_shortest_path(a, b, &cities, &target),
        );

        // Unfiltered, the tail runs through the restaurant
        assert_path(
            &g,
            vec!["A", "C", "A", "R", "B"],
            10,
            g.constrained_shortest_path(a, b, &SearchFilter::all(), &target),
        );
    }

    #[test]
    fn filtered_itineraries_only_cross_allowed_places() {
        let g = graph_drome();
        let num_places = g.num_places();
        let filter = SearchFilter::all().places([PlaceCategory::City, PlaceCategory::Restaurant]);

        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(0..num_places, 0..num_places, 0..3usize, 0..3usize),
                |(a, b, cities, restaurants)| {
                    let (a, b) = (place_index(a), place_index(b));
                    let target = CategoryTally::from_counts(cities, restaurants, 0);

                    if let Ok(itinerary) = g.constrained_shortest_path(a, b, &filter, &target) {
                        let places = itinerary.places(&g);
                        for place_idx in places.iter().filter(|p| **p != a && **p != b) {
                            assert!(filter.allows_place(g.place(*place_idx).category()));
                        }
                        let visited = CategoryTally::of_places(&g, &places);
                        assert!(visited.satisfies(&target));
                    }
                    Ok(())
                },
            )
            .unwrap();
    }

    #[test]
    fn unknown_arrival_is_reported() {
        let g: PlaceGraph = "V:A|N:5:B\nV:B\nV:C".parse().unwrap();
        let target = CategoryTally::new().with(PlaceCategory::City, 1);
        assert!(matches!(
            g.constrained_shortest_path(
                g.index_of("A").unwrap(),
                g.index_of("C").unwrap(),
                &SearchFilter::all(),
                &target
            ),
            Err(ItineraryError::Unreachable { .. })
        ));
    }

    #[test]
    fn zero_target_equals_shortest_path() {
        let g = graph_drome();
        let num_places = g.num_places();

        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&(0..num_places, 0..num_places), |(a, b)| {
                let (a, b) = (place_index(a), place_index(b));
                assert_eq!(
                    g.constrained_shortest_path(a, b, &SearchFilter::all(), &CategoryTally::new()),
                    g.shortest_path(a, b)
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn constrained_itineraries_satisfy_target() {
        let g = graph_drome();
        let num_places = g.num_places();

        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(0..num_places, 0..num_places, 0..4usize, 0..3usize, 0..3usize),
                |(a, b, cities, restaurants, recreations)| {
                    let (a, b) = (place_index(a), place_index(b));
                    let target = CategoryTally::from_counts(cities, restaurants, recreations);

                    let itinerary = g
                        .constrained_shortest_path(a, b, &SearchFilter::all(), &target)
                        .unwrap();
                    assert_eq!(itinerary.departure, a);
                    assert_eq!(itinerary.arrival, b);
                    assert_eq!(g.path_distance(&itinerary.routes), Ok(itinerary.distance));

                    let visited = CategoryTally::of_places(&g, &itinerary.places(&g));
                    assert!(visited.satisfies(&target));
                    Ok(())
                },
            )
            .unwrap();
    }
}
