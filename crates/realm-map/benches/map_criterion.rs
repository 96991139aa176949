//! Map benchmarks using criterion for historical comparison.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use realm_map::{MapComposite, MapConfig};
use realm_thing::{MapId, Point, Thing, ThingArena, ThingId, ThingKind};

/// Scatter `count` things over a 4096x4096 map, one in four a character.
fn populated(count: u32) -> (ThingArena, MapComposite, Vec<ThingId>) {
    let mut arena = ThingArena::with_capacity(count as usize);
    let mut map = MapComposite::new(MapId(1), "bench", &MapConfig::new(4096, 4096));

    let ids = (0..count)
        .map(|i| {
            let kind = match i % 4 {
                0 => ThingKind::Character,
                1 | 2 => ThingKind::Monster,
                _ => ThingKind::Fixed,
            };
            let p = Point::new(((i * 37) % 4096) as i32, ((i * 91) % 4096) as i32);
            let id = arena.spawn(Thing::new(kind, p));
            map.insert(&mut arena, id).unwrap();
            id
        })
        .collect();

    (arena, map, ids)
}

fn insert_remove_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove");

    for count in [100u32, 1000, 10000] {
        group.throughput(Throughput::Elements(u64::from(count)));

        group.bench_with_input(BenchmarkId::new("insert", count), &count, |b, &count| {
            b.iter(|| black_box(populated(count)));
        });

        group.bench_with_input(BenchmarkId::new("remove", count), &count, |b, &count| {
            b.iter_batched(
                || populated(count),
                |(mut arena, mut map, ids)| {
                    for id in ids {
                        map.remove(&mut arena, id).unwrap();
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn update_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [1000u32, 10000] {
        group.throughput(Throughput::Elements(u64::from(count)));

        group.bench_with_input(BenchmarkId::new("walk", count), &count, |b, &count| {
            let (mut arena, mut map, ids) = populated(count);
            let mut step = 1;
            b.iter(|| {
                for &id in &ids {
                    let thing = arena.get_mut(id).unwrap();
                    if !thing.is_movable() {
                        continue;
                    }
                    thing.commit_position();
                    let p = thing.position();
                    thing.set_position(Point::new((p.x + step).rem_euclid(4096), p.y));
                }
                step = -step;
                black_box(map.update(&arena));
            });
        });
    }

    group.finish();
}

fn query_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let (arena, map, ids) = populated(10000);
    let watcher = arena.get(ids[0]).unwrap();

    for radius in [100u32, 500, 2000] {
        group.bench_with_input(
            BenchmarkId::new("around_moving", radius),
            &radius,
            |b, &radius| {
                b.iter(|| black_box(map.around_moving(watcher, radius).moving().count()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("around_point_characters", radius),
            &radius,
            |b, &radius| {
                b.iter(|| {
                    black_box(
                        map.around_point(Point::new(2048, 2048), radius)
                            .characters()
                            .count(),
                    )
                });
            },
        );
    }

    group.bench_function("whole_map_things", |b| {
        b.iter(|| black_box(map.whole_map().things().count()));
    });

    group.finish();
}

criterion_group!(
    benches,
    insert_remove_benchmarks,
    update_benchmarks,
    query_benchmarks,
);

criterion_main!(benches);
