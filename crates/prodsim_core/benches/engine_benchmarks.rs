//! Criterion benchmarks for the prodsim_core engine
//!
//! Run with: cargo bench -p prodsim_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prodsim_core::config::{ConfigBuilder, MaterialBuilder, ProductBuilder, SimulationConfig};
use prodsim_core::model::{Modifier, Trigger};
use prodsim_core::simulation::{Simulation, run_batch};

fn create_economy_config(timesteps: u32, materials: usize, products: usize) -> SimulationConfig {
    let mut builder = ConfigBuilder::new(timesteps)
        .energy_cost(0.25)
        .co2_tax(0.1);

    let material_names: Vec<String> = (0..materials).map(|i| format!("material_{i}")).collect();
    for name in &material_names {
        builder = builder.material(
            MaterialBuilder::new(name.as_str())
                .base_price(10.0)
                .tariff_rate(0.05)
                .co2_emission(1.5),
        );
    }

    for i in 0..products {
        let mut product = ProductBuilder::new(format!("product_{i}").as_str())
            .produced_units(10.0)
            .base_demand(8.0)
            .energy_consumption(2.0)
            .co2_emission(0.5);
        for name in &material_names {
            product = product.consumes(name.as_str(), 1.0);
        }
        builder = builder.product(product);
    }

    builder.build()
}

fn bench_run_by_timesteps(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_timesteps");

    for timesteps in [10u32, 50, 200].iter() {
        let config = create_economy_config(*timesteps, 3, 3);
        group.bench_with_input(
            BenchmarkId::new("timesteps", timesteps),
            timesteps,
            |b, _| {
                b.iter(|| {
                    let mut sim = Simulation::new("bench", black_box(config.clone()));
                    sim.run().unwrap();
                    sim
                })
            },
        );
    }

    group.finish();
}

fn bench_run_by_economy_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_economy_size");

    for size in [2usize, 5, 10].iter() {
        let config = create_economy_config(30, *size, *size);
        group.bench_with_input(BenchmarkId::new("size", size), size, |b, _| {
            b.iter(|| {
                let mut sim = Simulation::new("bench", black_box(config.clone()));
                sim.run().unwrap();
                sim
            })
        });
    }

    group.finish();
}

fn bench_run_with_modifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_modifiers");
    let config = create_economy_config(50, 3, 3);

    group.bench_function("no_modifiers", |b| {
        b.iter(|| {
            let mut sim = Simulation::new("bench", black_box(config.clone()));
            sim.run().unwrap();
            sim
        })
    });

    group.bench_function("triggered_modifiers", |b| {
        b.iter(|| {
            let mut sim = Simulation::new("bench", black_box(config.clone()));
            sim.add_modifier(
                Modifier::relative("crisis", "material_0_basePrice", 1.3)
                    .with_trigger(Trigger::timestep_range(10, 30)),
            );
            sim.add_modifier(
                Modifier::delayed("shock", "product_0_producedUnits", 5.0, 5)
                    .with_trigger(Trigger::timestep_range(0, 5)),
            );
            sim.run().unwrap();
            sim
        })
    });

    group.finish();
}

fn bench_scenario_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario_batch");
    let config = create_economy_config(30, 3, 3);

    for count in [4usize, 16].iter() {
        group.bench_with_input(BenchmarkId::new("scenarios", count), count, |b, _| {
            b.iter(|| {
                let mut sims: Vec<Simulation> = (0..*count)
                    .map(|i| Simulation::new(format!("scenario_{i}"), config.clone()))
                    .collect();
                run_batch(black_box(&mut sims)).unwrap();
                sims
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_run_by_timesteps,
    bench_run_by_economy_size,
    bench_run_with_modifiers,
    bench_scenario_batch,
);
criterion_main!(benches);
