//! Interactive shell to query a road map
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::Rng;
use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};
use roadtrip_core::{
    graph::{PlaceGraph, PlaceIndex},
    prelude::*,
    statistics::summary,
};

/// Print graph info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    Ok(Some(format!("{}", summary(&context.graph))))
}

/// List places, optionally of one category
fn places(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let category = args.get_one::<PlaceCategory>("category").copied();

    let mut res = String::new();
    for (place_idx, place) in context.graph.places(category) {
        res.push_str(&format!(
            "{:>4} {:<12}{}\n",
            place_idx.index(),
            place.category().label(),
            place.name()
        ));
    }
    res.push_str(&format!("{} places", context.graph.place_count(category)));
    Ok(Some(res))
}

/// List routes, optionally of one category
fn routes(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let category = args.get_one::<RoadCategory>("category").copied();

    let mut res = String::new();
    for (_, route) in context.graph.routes(category) {
        res.push_str(&format!("{}\n", context.graph.route_label(route)));
    }
    res.push_str(&format!("{} routes", context.graph.route_count(category)));
    Ok(Some(res))
}

fn run_dijkstra(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let (src, dst) = match context.endpoints(&args) {
        Ok(endpoints) => endpoints,
        Err(err) => return Ok(Some(err)),
    };

    let mut dijkstra = Dijkstra::with_filter(&context.graph, filter_from(&args));
    match dijkstra.search(src, dst) {
        Ok(sp) => Ok(Some(format_itinerary(
            &context.graph,
            &sp,
            &format!("{}", dijkstra.stats),
        ))),
        Err(err) => Ok(Some(err.to_string())),
    }
}

fn run_itinerary(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let (src, dst) = match context.endpoints(&args) {
        Ok(endpoints) => endpoints,
        Err(err) => return Ok(Some(err)),
    };

    let count = |name: &str| args.get_one::<usize>(name).copied().unwrap_or(0);
    let target = CategoryTally::from_counts(
        count("cities"),
        count("restaurants"),
        count("recreations"),
    );

    let mut search = ItinerarySearch::with_filter(&context.graph, filter_from(&args));
    match search.search(src, dst, &target) {
        Ok(itinerary) => Ok(Some(format_itinerary(
            &context.graph,
            &itinerary,
            &format!("{}", search.stats),
        ))),
        Err(err) => Ok(Some(err.to_string())),
    }
}

fn neighbors(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let name = args.get_one::<String>("place").map(String::as_str).unwrap_or_default();
    let hops = args.get_one::<usize>("hops").copied().unwrap_or(1);

    let origin = match context.graph.resolve(name) {
        Ok(origin) => origin,
        Err(err) => return Ok(Some(err.to_string())),
    };

    let hop_distances = context.graph.hop_distances(origin, &RoadCategory::ALL);
    let mut res = String::new();
    for place_idx in context
        .graph
        .neighbors_within(origin, hops, &RoadCategory::ALL)
        .into_iter()
        .filter(|place_idx| *place_idx != origin)
    {
        let place = context.graph.place(place_idx);
        res.push_str(&format!(
            "{} {:<12}{}\n",
            hop_distances[&place_idx],
            place.category().label(),
            place.name()
        ));
    }
    if res.is_empty() {
        res.push_str("No neighbors found");
    }
    Ok(Some(res))
}

fn measure(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let n = *args.get_one::<usize>("n").unwrap_or(&10);
    let num_places = context.graph.num_places();
    if num_places == 0 {
        return Ok(Some("The graph is empty".to_string()));
    }

    // Select n random departure and arrival places
    let mut rng = rand::thread_rng();
    let pairs: Vec<(PlaceIndex, PlaceIndex)> = (0..n)
        .map(|_| {
            (
                place_index(rng.gen_range(0..num_places)),
                place_index(rng.gen_range(0..num_places)),
            )
        })
        .collect();

    let target = CategoryTally::from_counts(1, 1, 1);

    let mut res = String::new();
    for (src, dst) in pairs {
        let mut dijkstra = Dijkstra::new(&context.graph);
        if dijkstra.search(src, dst).is_err() {
            continue;
        }
        let mut search = ItinerarySearch::new(&context.graph);
        let detour = match search.search(src, dst, &target) {
            Ok(itinerary) => format!("{} km in {:?}", itinerary.distance, search.stats.duration),
            Err(err) => err.to_string(),
        };
        res.push_str(&format!(
            "{} -> {}: {:?} | constrained: {}\n",
            context.graph.name(src),
            context.graph.name(dst),
            dijkstra.stats.duration,
            detour
        ));
    }

    Ok(Some(res))
}

fn format_itinerary(g: &PlaceGraph, itinerary: &Itinerary, stats: &str) -> String {
    let mut path = String::new();
    for line in itinerary.describe(g) {
        path.push_str(&format!("{}\n", line));
    }
    let visited = CategoryTally::of_places(g, &itinerary.places(g));
    path.push_str(&format!("Distance: {} km, visits {}\n", itinerary.distance, visited));
    path.push_str(stats);
    path
}

fn filter_from(args: &ArgMatches) -> SearchFilter {
    let mut filter = SearchFilter::all();
    if let Some(places) = args.get_many::<PlaceCategory>("places") {
        filter = filter.places(places.copied());
    }
    if let Some(roads) = args.get_many::<RoadCategory>("roads") {
        filter = filter.roads(roads.copied());
    }
    filter
}

fn endpoint_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("from")
                .required(true)
                .help("Name of the departure place"),
        )
        .arg(
            Arg::new("to")
                .required(true)
                .help("Name of the arrival place"),
        )
        .arg(
            Arg::new("places")
                .long("places")
                .value_delimiter(',')
                .value_parser(value_parser!(PlaceCategory))
                .help("Allowed place categories, e.g. V,R"),
        )
        .arg(
            Arg::new("roads")
                .long("roads")
                .value_delimiter(',')
                .value_parser(value_parser!(RoadCategory))
                .help("Allowed road categories, e.g. A,N"),
        )
}

fn count_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(usize))
        .help(help)
}

struct Context {
    graph: PlaceGraph,
}

impl Context {
    fn new(graph: PlaceGraph) -> Self {
        Self { graph }
    }

    fn endpoints(
        &self,
        args: &ArgMatches,
    ) -> std::result::Result<(PlaceIndex, PlaceIndex), String> {
        let name = |id: &str| args.get_one::<String>(id).map(String::as_str).unwrap_or_default();
        let src = self.graph.resolve(name("from")).map_err(|err| err.to_string())?;
        let dst = self.graph.resolve(name("to")).map_err(|err| err.to_string())?;
        Ok((src, dst))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Init Graph
    let path_to_map = std::env::args()
        .nth(1)
        .context("No path to road map file given")?;
    let graph = PlaceGraph::from_path(Path::new(&path_to_map))
        .with_context(|| format!("Failed to load map {}", path_to_map))?;
    let context = Context::new(graph);

    let mut repl = Repl::new(context)
        .with_name("Roadtrip")
        .with_version("v0.1.0")
        .with_description("Simple REPL to plan road trips")
        .with_banner("Welcome to Roadtrip")
        .with_history(PathBuf::from(r".\history"), 100)
        .with_command(Command::new("info").about("Print graph info"), info)
        .with_command(
            Command::new("places")
                .arg(
                    Arg::new("category")
                        .value_parser(value_parser!(PlaceCategory))
                        .required(false)
                        .help("Place category, V, R or L"),
                )
                .about("List places"),
            places,
        )
        .with_command(
            Command::new("routes")
                .arg(
                    Arg::new("category")
                        .value_parser(value_parser!(RoadCategory))
                        .required(false)
                        .help("Road category, A, N or D"),
                )
                .about("List routes, one per mirrored pair"),
            routes,
        )
        .with_command(
            endpoint_args(Command::new("path"))
                .about("Calculate shortest path using Dijkstra's algorithm"),
            run_dijkstra,
        )
        .with_command(
            endpoint_args(Command::new("itinerary"))
                .arg(count_arg("cities", "Minimum number of cities"))
                .arg(count_arg("restaurants", "Minimum number of restaurants"))
                .arg(count_arg("recreations", "Minimum number of recreation sites"))
                .about("Calculate a shortest path visiting enough places of every category"),
            run_itinerary,
        )
        .with_command(
            Command::new("neighbors")
                .arg(
                    Arg::new("place")
                        .required(true)
                        .help("Name of the place"),
                )
                .arg(
                    Arg::new("hops")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Maximum number of routes, 1 by default"),
                )
                .about("List places within a number of routes"),
            neighbors,
        )
        .with_command(
            Command::new("measure")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of random queries"),
                )
                .about("Measure `n` random plain and constrained searches"),
            measure,
        );

    repl.run().map_err(|err| anyhow::anyhow!("{}", err))
}
