//! Integration tests for the prodsim simulation engine
//!
//! Tests are organized by topic:
//! - `engine` - Demand-driven evaluation, memoization, cycle detection
//! - `modifiers` - Modifier modes, composition, delay injection
//! - `triggers` - Trigger conditions and soft-fail behavior
//! - `blocks` - Standard block formulas and storage dynamics
//! - `end_to_end` - Full scenario runs, results, batches

mod engine;
mod triggers;

use crate::blocks::BlockCatalog;
use crate::config::{ConfigBuilder, MaterialBuilder, ProductBuilder, SimulationConfig};
use crate::model::ids::BlockKind;

const EPS: f64 = 1e-9;

#[track_caller]
fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// One material, one product, trivially flat economy:
/// costPerUnit(iron) = 10, one widget per step consuming one iron,
/// so total_all_costs = 10 every step.
fn single_product_config(timesteps: u32) -> SimulationConfig {
    ConfigBuilder::new(timesteps)
        .material(MaterialBuilder::new("iron").base_price(10.0))
        .product(
            ProductBuilder::new("widget")
                .produced_units(1.0)
                .base_demand(1.0)
                .consumes("iron", 1.0),
        )
        .build()
}

/// A small factory with nontrivial energy, tax and tariff parameters, used
/// by the formula tests. All expected values are hand-derived in the tests.
fn factory_config(timesteps: u32) -> SimulationConfig {
    ConfigBuilder::new(timesteps)
        .energy_cost(2.0)
        .co2_tax(0.5)
        .material(
            MaterialBuilder::new("steel")
                .base_price(10.0)
                .tariff_rate(0.1)
                .co2_emission(2.0),
        )
        .product(
            ProductBuilder::new("widget")
                .produced_units(4.0)
                .base_demand(3.0)
                .energy_consumption(1.5)
                .co2_emission(0.25)
                .consumes("steel", 2.0),
        )
        .build()
}

/// A catalog whose energy block carries a single constant attribute named
/// `base`. Modifier and trigger tests target it directly.
fn constant_catalog(value: f64) -> BlockCatalog {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, move |block, _scope, _config| {
        block.declare("base".into(), move |_ctx| Ok(value));
    });
    catalog
}

/// A config with no materials or products; structure collapses to the
/// energy, legal and total blocks.
fn bare_config(timesteps: u32) -> SimulationConfig {
    ConfigBuilder::new(timesteps).build()
}
