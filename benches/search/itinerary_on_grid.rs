use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roadtrip_core::{
    filter::SearchFilter,
    graph::{place_index, PlaceGraph},
    tally::CategoryTally,
    util::test_graphs::generate_grid_graph,
};

criterion_group!(benches, shortest_path_on_grid, itinerary_on_grid);
criterion_main!(benches);

fn corners(g: &PlaceGraph) -> (usize, usize) {
    (0, g.num_places() - 1)
}

fn shortest_path_on_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path_on_grid");
    for size in [10, 20, 40].iter() {
        let g = generate_grid_graph(*size, 7);
        let (src, dst) = corners(&g);
        group.bench_with_input(BenchmarkId::from_parameter(size), &g, |b, g| {
            b.iter(|| {
                let _ = g.shortest_path(black_box(place_index(src)), black_box(place_index(dst)));
            })
        });
    }
    group.finish();
}

fn itinerary_on_grid(c: &mut Criterion) {
    let target = CategoryTally::from_counts(3, 2, 2);

    let mut group = c.benchmark_group("itinerary_on_grid");
    for size in [10, 20, 40].iter() {
        let g = generate_grid_graph(*size, 7);
        let (src, dst) = corners(&g);
        group.bench_with_input(BenchmarkId::from_parameter(size), &g, |b, g| {
            b.iter(|| {
                let _ = g.constrained_shortest_path(
                    black_box(place_index(src)),
                    black_box(place_index(dst)),
                    &SearchFilter::all(),
                    &target,
                );
            })
        });
    }
    group.finish();
}
