use std::{
    fmt::{Debug, Display},
    time::{Duration, Instant},
};

use roadtrip_reader::{PlaceCategory, RoadCategory};

use crate::{graph::PlaceGraph, tally::CategoryTally};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    pub places_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.places_settled = 0;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} places settled in {:?}",
            self.places_settled, self.duration
        )
    }
}

/// Counters of a constrained itinerary search
#[derive(Debug, Default, Clone)]
pub struct ItineraryStats {
    pub dijkstra_runs: usize,
    pub detours: usize,
    pub places_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl ItineraryStats {
    pub fn init(&mut self) {
        self.dijkstra_runs = 0;
        self.detours = 0;
        self.places_settled = 0;
        self.start_time = Some(Instant::now());
    }

    /// Adds the counters of one finished Dijkstra run
    pub fn record(&mut self, run: &SearchStats) {
        self.dijkstra_runs += 1;
        self.places_settled += run.places_settled;
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for ItineraryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} detours, {} dijkstra runs, {} places settled in {:?}",
            self.detours, self.dijkstra_runs, self.places_settled, self.duration
        )
    }
}

/// Size of a graph broken down by category
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    pub places: CategoryTally,
    /// Distinct routes per road category, in [`RoadCategory::ALL`] order
    pub routes: [usize; RoadCategory::ALL.len()],
    pub average_out_degree: f64,
}

impl Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Places: {}", self.places.total())?;
        for category in PlaceCategory::ALL {
            writeln!(f, "  {:<14}{}", category.label(), self.places.get(category))?;
        }
        writeln!(f, "Routes: {}", self.routes.iter().sum::<usize>())?;
        for category in RoadCategory::ALL {
            writeln!(f, "  {:<14}{}", category.label(), self.routes[category.index()])?;
        }
        write!(f, "Average out degree: {:.2}", self.average_out_degree)
    }
}

pub fn average_out_degree(g: &PlaceGraph) -> f64 {
    if g.is_empty() {
        return 0.0;
    }
    let sum: usize = g.places(None).map(|(_, place)| place.outgoing().len()).sum();
    sum as f64 / g.num_places() as f64
}

impl PlaceGraph {
    pub fn summary(&self) -> GraphSummary {
        summary(self)
    }
}

pub fn summary(g: &PlaceGraph) -> GraphSummary {
    let mut routes = [0; RoadCategory::ALL.len()];
    for (_, route) in g.routes(None) {
        routes[route.category.index()] += 1;
    }
    GraphSummary {
        places: CategoryTally::of_graph(g),
        routes,
        average_out_degree: average_out_degree(g),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        graph::PlaceGraph,
        search::dijkstra::Dijkstra,
        statistics::{average_out_degree, summary},
        tally::CategoryTally,
        util::test_graphs::{generate_scenario_graph, graph_drome},
    };

    #[test]
    fn stats_work() {
        let g = generate_scenario_graph();
        let a = g.index_of("A").unwrap();
        let r = g.index_of("R").unwrap();

        let mut d = Dijkstra::new(&g);
        d.search(a, r).unwrap();

        assert!(d.stats.duration.is_some());
        assert_eq!(d.stats.places_settled, 3);
    }

    #[test]
    fn summary_of_scenario() {
        let g = generate_scenario_graph();
        let s = summary(&g);

        assert_eq!(s.places, CategoryTally::from_counts(2, 1, 0));
        assert_eq!(s.routes, [0, 1, 1]);
        // 4 directed routes over 3 places
        assert!((s.average_out_degree - 4.0 / 3.0).abs() < 1e-9);
        assert!(s.to_string().contains("Routes: 2"));
    }

    #[test]
    fn average_degree_of_empty_graph() {
        assert_eq!(average_out_degree(&PlaceGraph::new()), 0.0);
    }

    #[test]
    fn summary_of_drome() {
        let g = graph_drome();
        let s = g.summary();
        assert_eq!(s.routes.iter().sum::<usize>(), g.route_count(None));
        assert_eq!(s.places.total(), g.num_places());
    }
}
