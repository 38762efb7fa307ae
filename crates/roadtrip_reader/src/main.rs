use std::path::Path;

use anyhow::Context;
use roadtrip_reader::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let now = std::time::Instant::now();
    // Read path to file from command line
    let map_path = std::env::args()
        .nth(1)
        .context("No path to road map file given")?;

    let map = RoadMap::from_path(Path::new(&map_path))
        .with_context(|| format!("Failed to read road map {}", map_path))?;

    let elapsed = now.elapsed();

    println!(
        "Finished reading road map in {}.{:03} seconds",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );
    println!(
        "Map has {} places and {} road descriptors",
        map.get_places().len(),
        map.num_roads()
    );
    for category in PlaceCategory::ALL {
        let count = map
            .get_places()
            .iter()
            .filter(|place| place.category == category)
            .count();
        println!("  {:<12}{}", category.label(), count);
    }
    Ok(())
}
