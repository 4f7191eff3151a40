use criterion::{black_box, criterion_group, criterion_main, Criterion};
use track_core::{Pose, SectorDescriptor, Track};

fn make_track(n: usize) -> Track {
    let sectors: Vec<SectorDescriptor> = (0..n)
        .map(|i| match i % 3 {
            0 => SectorDescriptor::straight(50.0 + i as f64),
            1 => SectorDescriptor::right(30.0, 20.0 + (i % 7) as f64),
            _ => SectorDescriptor::left(25.0, 40.0),
        })
        .collect();
    Track::from_descriptors(Pose::new(0.0, 0.0, 0.0), &sectors).unwrap()
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("track");

    for n in [20, 200, 2000] {
        let track = make_track(n);
        let step = track.length() / 997.0;
        group.bench_function(format!("pose_at_{n}_sectors"), |b| {
            b.iter(|| {
                let mut d = 0.0;
                for _ in 0..1000 {
                    black_box(track.pose_at(black_box(d)).unwrap());
                    d += step;
                }
            });
        });
        group.bench_function(format!("bounding_box_{n}_sectors"), |b| {
            b.iter(|| black_box(track.bounding_box().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
