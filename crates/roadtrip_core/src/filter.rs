use roadtrip_reader::{PlaceCategory, RoadCategory};

/// Restricts which place and road categories a search may traverse.
///
/// The filter defaults to allowing everything.
///
/// ```
/// use roadtrip_core::filter::SearchFilter;
/// use roadtrip_reader::{PlaceCategory, RoadCategory};
///
/// let filter = SearchFilter::all()
///     .places([PlaceCategory::City])
///     .roads([RoadCategory::Highway, RoadCategory::National]);
///
/// assert!(filter.allows_place(PlaceCategory::City));
/// assert!(!filter.allows_place(PlaceCategory::Restaurant));
/// assert!(!filter.allows_road(RoadCategory::Departmental));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFilter {
    places: [bool; PlaceCategory::ALL.len()],
    roads: [bool; RoadCategory::ALL.len()],
}

impl SearchFilter {
    pub fn all() -> Self {
        Self {
            places: [true; PlaceCategory::ALL.len()],
            roads: [true; RoadCategory::ALL.len()],
        }
    }

    /// Only allow the given place categories
    pub fn places(mut self, categories: impl IntoIterator<Item = PlaceCategory>) -> Self {
        self.places = Default::default();
        for category in categories {
            self.places[category.index()] = true;
        }
        self
    }

    /// Only allow the given road categories
    pub fn roads(mut self, categories: impl IntoIterator<Item = RoadCategory>) -> Self {
        self.roads = Default::default();
        for category in categories {
            self.roads[category.index()] = true;
        }
        self
    }

    #[inline]
    pub fn allows_place(&self, category: PlaceCategory) -> bool {
        self.places[category.index()]
    }

    #[inline]
    pub fn allows_road(&self, category: RoadCategory) -> bool {
        self.roads[category.index()]
    }

    pub fn place_categories(&self) -> impl Iterator<Item = PlaceCategory> + '_ {
        PlaceCategory::ALL
            .into_iter()
            .filter(|category| self.allows_place(*category))
    }

    pub fn road_categories(&self) -> impl Iterator<Item = RoadCategory> + '_ {
        RoadCategory::ALL
            .into_iter()
            .filter(|category| self.allows_road(*category))
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::all()
    }
}
