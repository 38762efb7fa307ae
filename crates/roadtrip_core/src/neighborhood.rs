//! Hop based neighbourhood queries. Distances here count routes, not
//! kilometres.
use std::{cmp::Ordering, collections::VecDeque};

use roadtrip_reader::{PlaceCategory, RoadCategory};
use rustc_hash::FxHashMap;

use crate::{
    filter::SearchFilter,
    graph::{PlaceGraph, PlaceIndex},
};

impl PlaceGraph {
    /// Number of routes needed to reach every place reachable from `origin`
    /// over roads of the given categories. `origin` maps to 0.
    pub fn hop_distances(
        &self,
        origin: PlaceIndex,
        roads: &[RoadCategory],
    ) -> FxHashMap<PlaceIndex, usize> {
        let mut hops = FxHashMap::default();
        let mut queue = VecDeque::new();

        hops.insert(origin, 0);
        queue.push_back(origin);

        while let Some(place_idx) = queue.pop_front() {
            let next_hop = hops[&place_idx] + 1;
            for (_, route) in self.outgoing(place_idx) {
                if roads.contains(&route.category) && !hops.contains_key(&route.to) {
                    hops.insert(route.to, next_hop);
                    queue.push_back(route.to);
                }
            }
        }
        hops
    }

    /// Places at most `hops` routes away from `origin`, `origin` included.
    /// Sorted by hop count, then by index.
    pub fn neighbors_within(
        &self,
        origin: PlaceIndex,
        hops: usize,
        roads: &[RoadCategory],
    ) -> Vec<PlaceIndex> {
        self.select_by_hops(origin, roads, |distance| distance <= hops)
    }

    /// Places exactly `hops` routes away from `origin`, `origin` included.
    pub fn neighbors_at(
        &self,
        origin: PlaceIndex,
        hops: usize,
        roads: &[RoadCategory],
    ) -> Vec<PlaceIndex> {
        self.select_by_hops(origin, roads, |distance| distance == hops || distance == 0)
    }

    fn select_by_hops(
        &self,
        origin: PlaceIndex,
        roads: &[RoadCategory],
        keep: impl Fn(usize) -> bool,
    ) -> Vec<PlaceIndex> {
        let mut selected: Vec<(usize, PlaceIndex)> = self
            .hop_distances(origin, roads)
            .into_iter()
            .filter(|(_, distance)| keep(*distance))
            .map(|(place_idx, distance)| (distance, place_idx))
            .collect();
        selected.sort_unstable();
        selected.into_iter().map(|(_, place_idx)| place_idx).collect()
    }

    /// Whether `a` and `b` share a direct neighbour passing `filter`
    pub fn within_two_hops(&self, a: PlaceIndex, b: PlaceIndex, filter: &SearchFilter) -> bool {
        let neighbors_b = self.neighbors(b, filter);
        self.neighbors(a, filter)
            .iter()
            .any(|place_idx| neighbors_b.contains(place_idx))
    }

    /// Compares how many places of `category` lie within two hops of `a`
    /// and of `b`. `Greater` means `a` is better connected.
    pub fn compare_connectivity(
        &self,
        a: PlaceIndex,
        b: PlaceIndex,
        category: PlaceCategory,
    ) -> Ordering {
        let count = |origin: PlaceIndex| {
            self.neighbors_within(origin, 2, &RoadCategory::ALL)
                .into_iter()
                .filter(|place_idx| *place_idx != origin)
                .filter(|place_idx| self.place(*place_idx).category() == category)
                .count()
        };
        count(a).cmp(&count(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_graphs::graph_drome;

    #[test]
    fn hop_distances_from_valence() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();

        let hops = g.hop_distances(idx("Valence"), &RoadCategory::ALL);
        assert_eq!(hops.len(), g.num_places());
        assert_eq!(hops[&idx("Valence")], 0);
        assert_eq!(hops[&idx("Crest")], 1);
        assert_eq!(hops[&idx("Die")], 2);
        assert_eq!(hops[&idx("Cirque Archiane")], 3);
    }

    #[test]
    fn hop_distances_respect_road_categories() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();

        let hops = g.hop_distances(idx("Valence"), &[RoadCategory::Highway]);
        let mut reached: Vec<&str> = hops.keys().map(|place_idx| g.name(*place_idx)).collect();
        reached.sort_unstable();
        assert_eq!(reached, vec!["Montelimar", "Pierrelatte", "Tain", "Valence"]);
    }

    #[test]
    fn neighbors_by_hops() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let die = idx("Die");

        let one_hop = g.neighbors_within(die, 1, &RoadCategory::ALL);
        assert_eq!(one_hop[0], die);
        assert_eq!(one_hop.len(), 4); // Die, Crest, La Ferme, Cirque Archiane

        let exactly_two = g.neighbors_at(die, 2, &RoadCategory::ALL);
        assert_eq!(exactly_two[0], die);
        assert!(exactly_two.contains(&idx("Valence")));
        assert!(exactly_two.contains(&idx("Le Bistrot")));
        assert!(!exactly_two.contains(&idx("Crest")));
    }

    #[test]
    fn two_hops() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();
        let all = SearchFilter::all();

        // Both connect to Valence
        assert!(g.within_two_hops(idx("Romans"), idx("Crest"), &all));
        assert!(!g.within_two_hops(idx("Nyons"), idx("Die"), &all));
        assert!(!g.within_two_hops(
            idx("Romans"),
            idx("Crest"),
            &SearchFilter::all().roads([RoadCategory::Highway])
        ));
    }

    #[test]
    fn connectivity_comparison() {
        let g = graph_drome();
        let idx = |name: &str| g.index_of(name).unwrap();

        assert_eq!(
            g.compare_connectivity(idx("Valence"), idx("Nyons"), PlaceCategory::Restaurant),
            Ordering::Greater
        );
        assert_eq!(
            g.compare_connectivity(idx("Nyons"), idx("Valence"), PlaceCategory::Restaurant),
            Ordering::Less
        );
        assert_eq!(
            g.compare_connectivity(idx("Tain"), idx("Tain"), PlaceCategory::City),
            Ordering::Equal
        );
    }
}
