// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use floormark_heading::{HeadingConfig, HeadingSmoother};
use floormark_ranging::estimator::{BeaconRangingEstimator, RangingConfig};
use floormark_ranging::slot::SlotType;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Jittered RSSI around -80 dBm.
    fn rssi(&mut self) -> i32 {
        -86 + (self.next_u32() % 13) as i32
    }
}

fn beacon_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("beacon-{i:03}")).collect()
}

fn bench_ranging(c: &mut Criterion) {
    let mut group = c.benchmark_group("floormark_ranging");

    for &beacons in &[1_usize, 16, 256] {
        let ids = beacon_ids(beacons);
        group.bench_function(format!("ingest(beacons={beacons},samples=1024)"), |b| {
            b.iter_batched(
                || BeaconRangingEstimator::new(RangingConfig::default()),
                |mut ranging| {
                    let mut rng = Lcg(0xB1EA_C0DE_0000_0001);
                    for i in 0..1024 {
                        let slot = if i % 2 == 0 { SlotType::Slot0 } else { SlotType::Slot1 };
                        let _ = ranging.ingest(&ids[i % ids.len()], rng.rssi(), slot);
                    }
                    black_box(ranging)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_heading(c: &mut Criterion) {
    let mut group = c.benchmark_group("floormark_heading");
    group.bench_function("ingest(1024)", |b| {
        b.iter_batched(
            || HeadingSmoother::new(HeadingConfig::default()),
            |mut compass| {
                let mut rng = Lcg(0xC0_4A55);
                for _ in 0..1024 {
                    // Jitter around north so the filter keeps wrapping.
                    let heading = f64::from(rng.next_u32() % 21) - 10.0;
                    let _ = compass.ingest(heading.rem_euclid(360.0), 5.0);
                }
                black_box(compass.heading())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_ranging, bench_heading);
criterion_main!(benches);
