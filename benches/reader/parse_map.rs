use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roadtrip_core::util::test_graphs::generate_grid_graph;
use roadtrip_reader::RoadMap;

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = parse_drome, parse_grid
}
criterion_main!(benches);

fn parse_drome(c: &mut Criterion) {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../crates/roadtrip_core/test_data/drome.txt");

    c.bench_function("parse_drome", |b| {
        b.iter(|| {
            let _ = RoadMap::from_path(black_box(&path));
        })
    });
}

fn parse_grid(c: &mut Criterion) {
    let mut text = Vec::new();
    generate_grid_graph(100, 7)
        .to_road_map()
        .write_to(&mut text)
        .unwrap();
    let text = String::from_utf8(text).unwrap();

    c.bench_function("parse_grid_100", |b| {
        b.iter(|| {
            let _ = RoadMap::parse(black_box(&text));
        })
    });
}
