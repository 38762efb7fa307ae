//! Re-exports of the most commonly used items in `roadtrip_core`.
pub use roadtrip_reader::{PlaceCategory, RoadCategory};

pub use crate::error::{InsufficientCategoryError, ItineraryError, LoadError};
pub use crate::filter::SearchFilter;
pub use crate::tally::CategoryTally;

pub use crate::search;
pub use crate::search::dijkstra::Dijkstra;
pub use crate::search::itinerary::ItinerarySearch;
pub use crate::search::shortest_path::Itinerary;

pub use crate::graph::place_index;
pub use crate::graph::{LoadOptions, Mirroring, PlaceGraph};
pub use crate::util::test_graphs::generate_scenario_graph;
