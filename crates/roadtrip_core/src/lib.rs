//! Crate to plan road trips over a categorised map of places.
//!
//! # Basic usage
//! ```no_run
//! use roadtrip_core::prelude::*;
//! use std::path::Path;
//!
//! // Path to the map file
//! let path = Path::new("path/to/map.txt");
//!
//! // Create a new graph, every road is mirrored
//! let g = PlaceGraph::from_path(path).expect("Failed to load map");
//!
//! let valence = g.resolve("Valence").unwrap();
//! let die = g.resolve("Die").unwrap();
//!
//! // Visit at least one restaurant on the way
//! let target = CategoryTally::new().with(PlaceCategory::Restaurant, 1);
//! let itinerary = g
//!     .constrained_shortest_path(valence, die, &SearchFilter::all(), &target)
//!     .expect("No itinerary");
//!
//! for line in itinerary.describe(&g) {
//!     println!("{}", line);
//! }
//!```
//! [`PlaceGraph`]: crate::graph::PlaceGraph
pub mod constants;
pub mod error;
pub mod filter;
pub mod graph;
pub mod neighborhood;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod tally;
pub mod util;
