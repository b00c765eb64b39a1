//! Production-economy simulation library
//!
//! This crate provides a discrete-time simulation engine for a small
//! production economy: materials, products, production processes, storage and
//! demand, regulatory costs, and aggregate totals. Named numeric quantities
//! ("attributes") are grouped into blocks per timestep and declared with
//! computation rules that may read other attributes in the same or earlier
//! timesteps. Conditional overrides ("modifiers", gated by triggers) overlay
//! any computed quantity.
//!
//! Evaluation is demand-driven and memoized: an attribute is computed the
//! first time it is read within a run, so declaration order never matters and
//! same-timestep cycles are detected instead of producing wrong numbers.
//!
//! # Builder DSL
//!
//! ```ignore
//! use prodsim_core::config::{ConfigBuilder, MaterialBuilder, ProductBuilder};
//! use prodsim_core::simulation::Simulation;
//!
//! let config = ConfigBuilder::new(30)
//!     .energy_cost(0.20)
//!     .co2_tax(0.50)
//!     .material(MaterialBuilder::new("steel").base_price(10.0).tariff_rate(0.05))
//!     .product(ProductBuilder::new("widget")
//!         .produced_units(5.0)
//!         .base_demand(4.0)
//!         .consumes("steel", 2.0))
//!     .build();
//!
//! let mut sim = Simulation::new("baseline", config);
//! sim.run()?;
//! let results = sim.results()?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod apply;
pub mod block;
pub mod blocks;
pub mod error;
pub mod evaluate;
pub mod simulation;
pub mod timestep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use block::{Attribute, Block};
pub use blocks::BlockCatalog;
pub use config::{ConfigBuilder, MaterialBuilder, ProductBuilder, SimulationConfig};
pub use error::{EngineError, Result};
pub use evaluate::EvalCtx;
pub use model::{
    AttributeId, BlockId, BlockKind, Comparison, MaterialId, Modifier, ModifierMode, ModifierSet,
    ProductId, Scope, SimulationResult, Trigger,
};
pub use simulation::{Simulation, run_batch};
