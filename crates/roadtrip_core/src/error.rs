use roadtrip_reader::{PlaceCategory, ReadError};
use thiserror::Error;

/// Reasons a road map could not be loaded into a [`PlaceGraph`].
///
/// A failed load always leaves the graph empty.
///
/// [`PlaceGraph`]: crate::graph::PlaceGraph
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read or a record is malformed
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("negative distance {distance} is not allowed")]
    NegativeDistance { distance: i64 },

    #[error("distance {distance} exceeds the maximum of {max} km")]
    DistanceTooLarge { distance: i64, max: u32 },

    #[error("place '{name}' is declared more than once")]
    DuplicatePlace { name: String },

    #[error("line {line}: destination '{destination}' leaving '{departure}' was not found")]
    UnknownDestination {
        departure: String,
        destination: String,
        line: usize,
    },

    #[error("route {from} -> {to} references a place that is not part of the graph")]
    DanglingRoute { from: usize, to: usize },

    #[error("road map does not contain any place")]
    EmptyGraph,
}

/// The graph holds fewer places of a category than an itinerary asks for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "insufficient places of category {category}: {required} required but only {available} exist"
)]
pub struct InsufficientCategoryError {
    pub category: PlaceCategory,
    pub required: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("unknown place '{name}'")]
    UnknownPlace { name: String },

    #[error("'{arrival}' is unreachable from '{departure}'")]
    Unreachable { departure: String, arrival: String },

    #[error("invalid path: route {position} does not start where the previous one ends")]
    BrokenPath { position: usize },

    #[error("'{from}' and '{to}' are not directly connected")]
    NotAdjacent { from: String, to: String },

    #[error("cannot satisfy {category} requirement: no accessible place of that category remains")]
    NoAccessiblePlace { category: PlaceCategory },

    #[error(transparent)]
    InsufficientPlaces(#[from] InsufficientCategoryError),
}
