use roadtrip_reader::{PlaceCategory, RoadCategory};

use crate::graph::{PlaceGraph, Route};

pub fn generate_scenario_graph() -> PlaceGraph {
    // A (city) --5 N-- B (city) --3 D-- R (restaurant)
    let mut g = PlaceGraph::new();

    let a = g.add_place(PlaceCategory::City, "A").unwrap();
    let b = g.add_place(PlaceCategory::City, "B").unwrap();
    let r = g.add_place(PlaceCategory::Restaurant, "R").unwrap();

    g.add_road(Route::new(RoadCategory::National, 5, a, b).unwrap())
        .unwrap(); // A <=> B
    g.add_road(Route::new(RoadCategory::Departmental, 3, b, r).unwrap())
        .unwrap(); // B <=> R

    g
}

/// Square grid of `size` x `size` cities joined by national roads. Every
/// `stride`-th place is a restaurant, every `stride`-th place shifted by one is
/// a recreation site.
pub fn generate_grid_graph(size: usize, stride: usize) -> PlaceGraph {
    let mut g = PlaceGraph::with_capacity(size * size, 4 * size * size);

    for i in 0..size * size {
        let category = if i % stride == 0 {
            PlaceCategory::Restaurant
        } else if i % stride == 1 {
            PlaceCategory::Recreation
        } else {
            PlaceCategory::City
        };
        g.add_place(category, &format!("P{}", i)).unwrap();
    }

    for row in 0..size {
        for col in 0..size {
            let from = g.index_of(&format!("P{}", row * size + col)).unwrap();
            if col + 1 < size {
                let to = g.index_of(&format!("P{}", row * size + col + 1)).unwrap();
                let distance = 1 + ((row + col) % 7) as i64;
                g.add_road(Route::new(RoadCategory::National, distance, from, to).unwrap())
                    .unwrap();
            }
            if row + 1 < size {
                let to = g.index_of(&format!("P{}", (row + 1) * size + col)).unwrap();
                let distance = 1 + ((row * col) % 5) as i64;
                g.add_road(Route::new(RoadCategory::Departmental, distance, from, to).unwrap())
                    .unwrap();
            }
        }
    }

    g
}

pub fn graph_drome() -> PlaceGraph {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/drome.txt");

    PlaceGraph::from_path(&path).unwrap()
}
