use std::fmt;

use roadtrip_reader::PlaceCategory;
use rustc_hash::FxHashSet;

use crate::graph::{PlaceGraph, PlaceIndex};

/// Number of places per category. Every category is always present.
///
/// A tally is used both for what an itinerary visits and for the minimum an
/// itinerary has to visit.
///
/// ```
/// use roadtrip_core::tally::CategoryTally;
/// use roadtrip_reader::PlaceCategory;
///
/// let target = CategoryTally::new()
///     .with(PlaceCategory::City, 2)
///     .with(PlaceCategory::Restaurant, 1);
///
/// let mut visited = CategoryTally::new();
/// visited.increment(PlaceCategory::City);
/// assert_eq!(visited.first_deficient(&target), Some(PlaceCategory::City));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategoryTally {
    counts: [usize; PlaceCategory::ALL.len()],
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target tally from the three per category minimums
    pub fn from_counts(cities: usize, restaurants: usize, recreations: usize) -> Self {
        Self::new()
            .with(PlaceCategory::City, cities)
            .with(PlaceCategory::Restaurant, restaurants)
            .with(PlaceCategory::Recreation, recreations)
    }

    pub fn with(mut self, category: PlaceCategory, count: usize) -> Self {
        self.set(category, count);
        self
    }

    pub fn get(&self, category: PlaceCategory) -> usize {
        self.counts[category.index()]
    }

    pub fn set(&mut self, category: PlaceCategory, count: usize) {
        self.counts[category.index()] = count;
    }

    pub fn reset(&mut self) {
        self.counts = Default::default();
    }

    pub fn increment(&mut self, category: PlaceCategory) {
        self.counts[category.index()] += 1;
    }

    /// Recounts from scratch, counting each distinct place once.
    pub fn update(&mut self, graph: &PlaceGraph, places: &[PlaceIndex]) {
        self.reset();
        let mut seen = FxHashSet::default();
        for place_idx in places {
            if seen.insert(*place_idx) {
                self.increment(graph.place(*place_idx).category());
            }
        }
    }

    /// Tally of the distinct places in `places`
    pub fn of_places(graph: &PlaceGraph, places: &[PlaceIndex]) -> Self {
        let mut tally = Self::new();
        tally.update(graph, places);
        tally
    }

    /// Tally of every place in the graph
    pub fn of_graph(graph: &PlaceGraph) -> Self {
        let mut tally = Self::new();
        for (_, place) in graph.places(None) {
            tally.increment(place.category());
        }
        tally
    }

    /// First category, in [`PlaceCategory::ALL`] order, whose count is below
    /// the count `target` asks for.
    pub fn first_deficient(&self, target: &CategoryTally) -> Option<PlaceCategory> {
        PlaceCategory::ALL
            .into_iter()
            .find(|category| self.get(*category) < target.get(*category))
    }

    pub fn satisfies(&self, target: &CategoryTally) -> bool {
        self.first_deficient(target).is_none()
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceCategory, usize)> + '_ {
        PlaceCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

impl fmt::Display for CategoryTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(category, count)| format!("{}={}", category, count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_graphs::generate_scenario_graph;

    #[test]
    fn new_tally_is_zero() {
        let tally = CategoryTally::new();
        assert!(tally.is_zero());
        for category in PlaceCategory::ALL {
            assert_eq!(tally.get(category), 0);
        }
    }

    #[test]
    fn reset_clears_every_category() {
        let mut tally = CategoryTally::from_counts(1, 2, 3);
        assert_eq!(tally.total(), 6);
        tally.reset();
        assert!(tally.is_zero());
    }

    #[test]
    fn update_counts_distinct_places() {
        let g = generate_scenario_graph();
        let a = g.index_of("A").unwrap();
        let b = g.index_of("B").unwrap();
        let r = g.index_of("R").unwrap();

        let mut tally = CategoryTally::from_counts(9, 9, 9);
        tally.update(&g, &[a, b, a, r, b]);

        assert_eq!(tally.get(PlaceCategory::City), 2);
        assert_eq!(tally.get(PlaceCategory::Restaurant), 1);
        assert_eq!(tally.get(PlaceCategory::Recreation), 0);
    }

    #[test]
    fn first_deficient_follows_category_order() {
        let target = CategoryTally::from_counts(1, 1, 1);

        assert_eq!(
            CategoryTally::new().first_deficient(&target),
            Some(PlaceCategory::City)
        );
        assert_eq!(
            CategoryTally::from_counts(1, 0, 0).first_deficient(&target),
            Some(PlaceCategory::Restaurant)
        );
        assert_eq!(
            CategoryTally::from_counts(5, 1, 0).first_deficient(&target),
            Some(PlaceCategory::Recreation)
        );
        assert_eq!(CategoryTally::from_counts(1, 1, 1).first_deficient(&target), None);
        assert!(CategoryTally::from_counts(2, 3, 1).satisfies(&target));
    }

    #[test]
    fn zero_target_is_always_satisfied() {
        assert!(CategoryTally::new().satisfies(&CategoryTally::new()));
    }

    #[test]
    fn of_graph_counts_all_places() {
        let g = generate_scenario_graph();
        assert_eq!(CategoryTally::of_graph(&g), CategoryTally::from_counts(2, 1, 0));
    }

    #[test]
    fn display() {
        assert_eq!(
            CategoryTally::from_counts(2, 1, 0).to_string(),
            "{city=2, restaurant=1, recreation=0}"
        );
    }
}
