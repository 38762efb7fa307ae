use crate::constants::{Distance, TotalDistance};
use crate::error::{ItineraryError, LoadError};
use crate::filter::SearchFilter;
use anyhow::Context;
use log::{debug, info};
use roadtrip_reader::{PlaceCategory, PlaceRecord, RoadCategory, RoadMap, RoadRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::{fmt, hash::Hash, path::Path, str::FromStr};

/// Integer type backing place and route indices
pub type DefaultIdx = u32;

/// Place identifier. Only valid for the graph that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PlaceIndex(DefaultIdx);

impl PlaceIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        PlaceIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Sentinel one past the largest usable index
    #[inline]
    pub fn end() -> Self {
        PlaceIndex(DefaultIdx::MAX)
    }
}

/// Short version of `PlaceIndex::new`
pub fn place_index(index: usize) -> PlaceIndex {
    PlaceIndex::new(index)
}

/// Route identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize)]
pub struct RouteIndex(DefaultIdx);

impl RouteIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        RouteIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn end() -> Self {
        RouteIndex(DefaultIdx::MAX)
    }
}

/// A city, restaurant or recreation site.
///
/// Two places are equal when name and category match. The outgoing routes
/// only ever grow while the graph is built.
#[derive(Debug, Clone)]
pub struct Place {
    category: PlaceCategory,
    name: String,
    outgoing: Vec<RouteIndex>,
}

impl Place {
    pub fn new(category: PlaceCategory, name: impl Into<String>) -> Self {
        Place {
            category,
            name: name.into(),
            outgoing: Vec::new(),
        }
    }

    pub fn category(&self) -> PlaceCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing routes in insertion order
    pub fn outgoing(&self) -> &[RouteIndex] {
        &self.outgoing
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category == other.category
    }
}

impl Eq for Place {}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A directed, typed road segment between two places.
///
/// Equality ignores direction: a route equals its mirror, which lets views
/// count a two way road once.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Route {
    pub category: RoadCategory,
    pub distance: Distance,
    pub from: PlaceIndex,
    pub to: PlaceIndex,
}

impl Route {
    /// Creates a route, rejecting negative or oversized distances.
    pub fn new(
        category: RoadCategory,
        distance: i64,
        from: PlaceIndex,
        to: PlaceIndex,
    ) -> Result<Self, LoadError> {
        if distance < 0 {
            return Err(LoadError::NegativeDistance { distance });
        }
        let distance = Distance::try_from(distance).map_err(|_| LoadError::DistanceTooLarge {
            distance,
            max: Distance::MAX,
        })?;
        Ok(Route {
            category,
            distance,
            from,
            to,
        })
    }

    pub fn reverse(&self) -> Self {
        Route {
            category: self.category,
            distance: self.distance,
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_mirror_of(&self, other: &Route) -> bool {
        self.same_direction(&other.reverse())
    }

    /// Strict equality including direction
    pub fn same_direction(&self, other: &Route) -> bool {
        self.category == other.category
            && self.distance == other.distance
            && self.from == other.from
            && self.to == other.to
    }

    fn endpoints(&self) -> (PlaceIndex, PlaceIndex) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.same_direction(other) || self.is_mirror_of(other)
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.distance.hash(state);
        self.endpoints().hash(state);
    }
}

/// Controls whether the loader adds the reverse route for every road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// Every road descriptor is inserted in both directions. A reverse route
    /// already declared by the file is not inserted twice.
    #[default]
    Automatic,
    /// The file is loaded verbatim, each direction has to be declared.
    Explicit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub mirroring: Mirroring,
}

impl LoadOptions {
    pub fn mirroring(mut self, mirroring: Mirroring) -> Self {
        self.mirroring = mirroring;
        self
    }
}

/// Row written by [`PlaceGraph::export_csv`]
#[derive(Serialize)]
struct PlaceRow<'a> {
    name: &'a str,
    category: PlaceCategory,
    degree: usize,
}

/// Row written by [`PlaceGraph::export_csv`]
#[derive(Serialize)]
struct RouteRow<'a> {
    from: &'a str,
    to: &'a str,
    category: RoadCategory,
    distance: Distance,
}

/// Road map graph. Owns every place and route, places are looked up by name.
#[derive(Debug, Clone, Default)]
pub struct PlaceGraph {
    places: Vec<Place>,
    routes: Vec<Route>,
    by_name: FxHashMap<String, PlaceIndex>,
}

impl PlaceGraph {
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            routes: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn with_capacity(num_places: usize, num_routes: usize) -> Self {
        Self {
            places: Vec::with_capacity(num_places),
            routes: Vec::with_capacity(num_routes),
            by_name: FxHashMap::with_capacity_and_hasher(num_places, Default::default()),
        }
    }

    /// Adds a new place to the graph
    pub fn add_place(
        &mut self,
        category: PlaceCategory,
        name: &str,
    ) -> Result<PlaceIndex, LoadError> {
        if self.by_name.contains_key(name) {
            return Err(LoadError::DuplicatePlace {
                name: name.to_string(),
            });
        }

        let place_idx = PlaceIndex::new(self.places.len());
        assert!(
            PlaceIndex::end() != place_idx,
            "Maximum number of places for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );

        self.places.push(Place::new(category, name));
        self.by_name.insert(name.to_string(), place_idx);

        Ok(place_idx)
    }

    /// Appends `route` to the outgoing routes of its departure.
    ///
    /// If the departure already owns an identical route (same direction,
    /// category and distance) nothing is inserted and the index of the existing
    /// route is returned.
    pub fn add_route(&mut self, route: Route) -> Result<RouteIndex, LoadError> {
        if route.from.index() >= self.places.len() || route.to.index() >= self.places.len() {
            return Err(LoadError::DanglingRoute {
                from: route.from.index(),
                to: route.to.index(),
            });
        }

        if let Some(existing) = self.places[route.from.index()]
            .outgoing
            .iter()
            .find(|idx| self.routes[idx.index()].same_direction(&route))
        {
            return Ok(*existing);
        }

        let route_idx = RouteIndex::new(self.routes.len());
        assert!(
            RouteIndex::end() != route_idx,
            "Maximum number of routes for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );

        self.places[route.from.index()].outgoing.push(route_idx);
        self.routes.push(route);

        Ok(route_idx)
    }

    /// Adds `route` and its mirror, modelling a two way road.
    pub fn add_road(&mut self, route: Route) -> Result<(RouteIndex, RouteIndex), LoadError> {
        let forward = self.add_route(route)?;
        let backward = self.add_route(route.reverse())?;
        Ok((forward, backward))
    }

    pub fn clear(&mut self) {
        self.places.clear();
        self.routes.clear();
        self.by_name.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Replaces the content of the graph with the road map at `path`, mirroring
    /// every road.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        self.load_with_options(path, &LoadOptions::default())
    }

    pub fn load_with_options(
        &mut self,
        path: &Path,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        self.clear();
        let map = RoadMap::from_path(path)?;
        self.load_road_map(&map, options)
    }

    /// Replaces the content of the graph with `map`.
    ///
    /// On error the graph is left empty.
    pub fn load_road_map(
        &mut self,
        map: &RoadMap,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        let now = std::time::Instant::now();
        info!("BEGIN building graph ({:?} mirroring)", options.mirroring);

        self.clear();
        if let Err(err) = self.populate(map, options) {
            self.clear();
            info!("FAILED building graph: {}", err);
            return Err(err);
        }

        info!("FINISHED building graph. Took {:?}", now.elapsed());
        info!(
            "Graph has {} places and {} routes",
            self.places.len(),
            self.routes.len()
        );
        Ok(())
    }

    fn populate(&mut self, map: &RoadMap, options: &LoadOptions) -> Result<(), LoadError> {
        let records = map.get_places();
        self.places.reserve(records.len());
        self.routes.reserve(map.num_roads() * 2);

        // All places have to exist before any destination can be resolved
        for PlaceRecord { category, name, .. } in records {
            self.add_place(*category, name)?;
        }

        for record in records {
            let from = self.by_name[&record.name];
            for RoadRecord {
                category,
                distance,
                destination,
            } in &record.roads
            {
                let to = self
                    .index_of(destination)
                    .ok_or_else(|| LoadError::UnknownDestination {
                        departure: record.name.clone(),
                        destination: destination.clone(),
                        line: record.line,
                    })?;

                let route = Route::new(*category, i64::from(*distance), from, to)?;
                match options.mirroring {
                    Mirroring::Automatic => {
                        self.add_road(route)?;
                    }
                    Mirroring::Explicit => {
                        self.add_route(route)?;
                    }
                }
            }
        }

        if self.places.is_empty() {
            return Err(LoadError::EmptyGraph);
        }
        Ok(())
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let mut g = PlaceGraph::new();
        g.load(path)?;
        Ok(g)
    }

    pub fn from_road_map(map: &RoadMap, options: &LoadOptions) -> Result<Self, LoadError> {
        let mut g = PlaceGraph::new();
        g.load_road_map(map, options)?;
        Ok(g)
    }

    /// Turns the graph back into road map records, one descriptor per
    /// directed route.
    pub fn to_road_map(&self) -> RoadMap {
        let mut map = RoadMap::new();
        for place in &self.places {
            let mut record = PlaceRecord::new(place.category, place.name.clone());
            for route_idx in &place.outgoing {
                let route = &self.routes[route_idx.index()];
                record = record.with_road(RoadRecord::new(
                    route.category,
                    route.distance,
                    self.name(route.to),
                ));
            }
            map.add_place(record);
        }
        map
    }

    /// **Panics** if the place does not exist
    pub fn place(&self, place_idx: PlaceIndex) -> &Place {
        &self.places[place_idx.index()]
    }

    pub fn get_place(&self, place_idx: PlaceIndex) -> Option<&Place> {
        self.places.get(place_idx.index())
    }

    /// **Panics** if the place does not exist
    pub fn name(&self, place_idx: PlaceIndex) -> &str {
        &self.places[place_idx.index()].name
    }

    pub fn index_of(&self, name: &str) -> Option<PlaceIndex> {
        self.by_name.get(name).copied()
    }

    pub fn place_by_name(&self, name: &str) -> Option<&Place> {
        self.index_of(name).map(|idx| self.place(idx))
    }

    /// Like [`PlaceGraph::index_of`] but reports unknown names as an error
    pub fn resolve(&self, name: &str) -> Result<PlaceIndex, ItineraryError> {
        self.index_of(name).ok_or_else(|| ItineraryError::UnknownPlace {
            name: name.to_string(),
        })
    }

    /// **Panics** if the route does not exist
    pub fn route(&self, route_idx: RouteIndex) -> &Route {
        &self.routes[route_idx.index()]
    }

    pub fn num_places(&self) -> usize {
        self.places.len()
    }

    /// Number of directed routes, a two way road counts twice
    pub fn num_directed_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns an iterator over the places, optionally restricted to one category
    pub fn places(
        &self,
        category: Option<PlaceCategory>,
    ) -> impl Iterator<Item = (PlaceIndex, &Place)> + '_ {
        self.places
            .iter()
            .enumerate()
            .map(|(i, place)| (PlaceIndex::new(i), place))
            .filter(move |(_, place)| category.map_or(true, |c| place.category == c))
    }

    pub fn place_count(&self, category: Option<PlaceCategory>) -> usize {
        self.places(category).count()
    }

    /// Returns an iterator over every directed route
    pub fn directed_routes(&self) -> impl Iterator<Item = (RouteIndex, &Route)> + '_ {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, route)| (RouteIndex::new(i), route))
    }

    /// Returns the routes of the graph, optionally restricted to one category.
    /// A route and its mirror are only returned once.
    pub fn routes(&self, category: Option<RoadCategory>) -> Vec<(RouteIndex, &Route)> {
        let mut seen: FxHashSet<&Route> = FxHashSet::default();
        self.directed_routes()
            .filter(|(_, route)| category.map_or(true, |c| route.category == c))
            .filter(|(_, route)| seen.insert(*route))
            .collect()
    }

    pub fn route_count(&self, category: Option<RoadCategory>) -> usize {
        self.routes(category).len()
    }

    pub fn outgoing(
        &self,
        place_idx: PlaceIndex,
    ) -> impl Iterator<Item = (RouteIndex, &Route)> + '_ {
        self.places[place_idx.index()]
            .outgoing
            .iter()
            .map(move |route_idx| (*route_idx, &self.routes[route_idx.index()]))
    }

    /// All routes leading directly from `from` to `to`
    pub fn routes_between(
        &self,
        from: PlaceIndex,
        to: PlaceIndex,
    ) -> impl Iterator<Item = (RouteIndex, &Route)> + '_ {
        self.outgoing(from).filter(move |(_, route)| route.to == to)
    }

    /// The shortest route leading directly from `from` to `to`
    pub fn direct_route(
        &self,
        from: PlaceIndex,
        to: PlaceIndex,
    ) -> Result<RouteIndex, ItineraryError> {
        self.routes_between(from, to)
            .min_by_key(|(_, route)| route.distance)
            .map(|(route_idx, _)| route_idx)
            .ok_or_else(|| ItineraryError::NotAdjacent {
                from: self.name(from).to_string(),
                to: self.name(to).to_string(),
            })
    }

    /// Distinct places reachable over a single route passing `filter`
    pub fn neighbors(&self, place_idx: PlaceIndex, filter: &SearchFilter) -> Vec<PlaceIndex> {
        let mut neighbors = Vec::new();
        for (_, route) in self.outgoing(place_idx) {
            if filter.allows_road(route.category)
                && filter.allows_place(self.place(route.to).category)
                && !neighbors.contains(&route.to)
            {
                neighbors.push(route.to);
            }
        }
        neighbors
    }

    /// Sums the distances of `path`.
    ///
    /// Fails if a route does not start where the previous one ends.
    pub fn path_distance(&self, path: &[RouteIndex]) -> Result<TotalDistance, ItineraryError> {
        let mut distance: TotalDistance = 0;
        let mut previous: Option<&Route> = None;

        for (position, route_idx) in path.iter().enumerate() {
            let route = self.route(*route_idx);
            if let Some(previous) = previous {
                if previous.to != route.from {
                    return Err(ItineraryError::BrokenPath { position });
                }
            }
            distance += TotalDistance::from(route.distance);
            previous = Some(route);
        }

        Ok(distance)
    }

    /// `<code> (<distance> km) <from> <-> <to>`
    pub fn route_label(&self, route: &Route) -> String {
        format!(
            "{} ({} km) {} <-> {}",
            route.category.code(),
            route.distance,
            self.name(route.from),
            self.name(route.to)
        )
    }

    /// Writes `places.csv` and `routes.csv` into `dir`. Mirrored routes are
    /// only written once.
    pub fn export_csv(&self, dir: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(dir.join("places.csv"))
            .context("Failed to create places.csv")?;

        debug!("BEGIN writing places");
        for (_, place) in self.places(None) {
            wtr.serialize(PlaceRow {
                name: &place.name,
                category: place.category,
                degree: place.outgoing.len(),
            })?;
        }
        wtr.flush()?;
        debug!("FINISHED writing places");

        let mut wtr = csv::Writer::from_path(dir.join("routes.csv"))
            .context("Failed to create routes.csv")?;
        debug!("BEGIN writing routes");
        for (_, route) in self.routes(None) {
            wtr.serialize(RouteRow {
                from: self.name(route.from),
                to: self.name(route.to),
                category: route.category,
                distance: route.distance,
            })?;
        }
        wtr.flush()?;
        debug!("FINISHED writing routes");
        Ok(())
    }
}

impl FromStr for PlaceGraph {
    type Err = LoadError;

    /// Builds a graph from road map text, mirroring every road.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let map = RoadMap::parse(s)?;
        Self::from_road_map(&map, &LoadOptions::default())
    }
}

impl fmt::Display for PlaceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.places.is_empty() {
            return writeln!(f, "The graph is empty");
        }
        for (place_idx, place) in self.places(None) {
            write!(f, "{:<30}", format!("{} ({})", place.name, place.category))?;
            for (_, route) in self.outgoing(place_idx) {
                write!(f, "  {}", self.route_label(route))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
