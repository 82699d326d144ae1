//! Throughput of the generation step over a seeded random grid

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use molecula::simulation::MoleculeCatalog;
use molecula::world::{physics, Cell, Grid};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Every molecule mixed at random, so all three rules fire often
fn mixed_grid(width: i32, height: i32) -> Grid {
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let mut grid = Grid::new(width, height, Cell::BACKGROUND);
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, Cell::new(rng.random_range(0..6))).unwrap();
        }
    }
    grid
}

fn bench_step(c: &mut Criterion) {
    let catalog = MoleculeCatalog::new();
    let mixed = mixed_grid(400, 200);
    let settled = Grid::new(400, 200, Cell::BACKGROUND);

    c.bench_function("step 400x200 mixed", |b| {
        b.iter(|| physics::step(black_box(&mixed), black_box(&catalog)).unwrap())
    });
    c.bench_function("step 400x200 settled", |b| {
        b.iter(|| physics::step(black_box(&settled), black_box(&catalog)).unwrap())
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
