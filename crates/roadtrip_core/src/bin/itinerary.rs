use anyhow::Context;
use roadtrip_core::{
    graph::PlaceGraph, search::itinerary::ItinerarySearch, statistics::summary, util::cli,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();

    let mut g = PlaceGraph::new();
    g.load_with_options(&cfg.map_file, &cfg.load_options)
        .with_context(|| format!("Failed to load map {}", cfg.map_file.display()))?;

    log::info!("Loaded map\n{}", summary(&g));

    if let Some(dir) = &cfg.export_csv {
        g.export_csv(dir)?;
        println!("Exported places and routes to {}", dir.display());
    }

    let departure = g.resolve(&cfg.from)?;
    let arrival = g.resolve(&cfg.to)?;

    let mut search = ItinerarySearch::with_filter(&g, cfg.filter);
    let itinerary = search.search(departure, arrival, &cfg.target)?;

    println!("Itinerary from {} to {}:", cfg.from, cfg.to);
    for line in itinerary.describe(&g) {
        println!("  {}", line);
    }
    println!("Total distance: {} km", itinerary.distance);
    println!("{}", search.stats);

    Ok(())
}
