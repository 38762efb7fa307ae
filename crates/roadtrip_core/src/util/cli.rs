use std::path::PathBuf;

use clap::Parser;
use roadtrip_reader::{PlaceCategory, RoadCategory};

use crate::{
    filter::SearchFilter,
    graph::{LoadOptions, Mirroring},
    tally::CategoryTally,
};

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct Cli {
    /// Path to the road map file
    map_file: String,

    /// Name of the departure place
    #[arg(short, long)]
    from: String,

    /// Name of the arrival place
    #[arg(short, long)]
    to: String,

    /// Minimum number of cities to visit
    #[arg(long, value_name = "n", default_value_t = 0)]
    cities: usize,

    /// Minimum number of restaurants to visit
    #[arg(long, value_name = "n", default_value_t = 0)]
    restaurants: usize,

    /// Minimum number of recreation sites to visit
    #[arg(long, value_name = "n", default_value_t = 0)]
    recreations: usize,

    /// Place categories the itinerary may pass through, e.g. "V,R". All by default
    #[arg(long, value_name = "codes", value_delimiter = ',')]
    places: Option<Vec<PlaceCategory>>,

    /// Road categories the itinerary may use, e.g. "A,N". All by default
    #[arg(long, value_name = "codes", value_delimiter = ',')]
    roads: Option<Vec<RoadCategory>>,

    /// Do not mirror roads, the file has to declare both directions
    #[arg(long, default_value = "false")]
    explicit_mirror: bool,

    /// Write places.csv and routes.csv into this directory
    #[arg(long, value_name = "dir")]
    export_csv: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub map_file: PathBuf,
    pub from: String,
    pub to: String,
    pub target: CategoryTally,
    pub filter: SearchFilter,
    pub load_options: LoadOptions,
    pub export_csv: Option<PathBuf>,
}

pub fn parse() -> Cfg {
    Cfg::from(Cli::parse())
}

impl From<Cli> for Cfg {
    fn from(cli: Cli) -> Self {
        let mut filter = SearchFilter::all();
        if let Some(places) = cli.places {
            filter = filter.places(places);
        }
        if let Some(roads) = cli.roads {
            filter = filter.roads(roads);
        }

        let mirroring = if cli.explicit_mirror {
            Mirroring::Explicit
        } else {
            Mirroring::Automatic
        };

        Cfg {
            map_file: PathBuf::from(cli.map_file),
            from: cli.from,
            to: cli.to,
            target: CategoryTally::from_counts(cli.cities, cli.restaurants, cli.recreations),
            filter,
            load_options: LoadOptions::default().mirroring(mirroring),
            export_csv: cli.export_csv,
        }
    }
}
