//! Simulation configuration
//!
//! The full economy description: global energy and legal parameters, the
//! material and product tables, the number of timesteps, and an optional list
//! of declarative modifier specs. Everything derives serde so a scenario can
//! live in a JSON file.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::ids::{AttributeId, MaterialId, ProductId};
use crate::model::modifier::{Modifier, ModifierMode};
use crate::model::trigger::Trigger;

mod builder;

pub use builder::{ConfigBuilder, MaterialBuilder, ProductBuilder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of steps to simulate, step indices `0..timesteps`.
    pub timesteps: u32,
    pub energy: EnergyParams,
    pub legal: LegalParams,
    pub materials: FxHashMap<MaterialId, MaterialParams>,
    pub products: FxHashMap<ProductId, ProductParams>,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

impl SimulationConfig {
    /// Material ids in sorted order. All iteration over materials goes
    /// through this so float sums are deterministic.
    pub fn material_ids(&self) -> Vec<&MaterialId> {
        let mut ids: Vec<&MaterialId> = self.materials.keys().collect();
        ids.sort_unstable();
        ids
    }

    /// Product ids in sorted order.
    pub fn product_ids(&self) -> Vec<&ProductId> {
        let mut ids: Vec<&ProductId> = self.products.keys().collect();
        ids.sort_unstable();
        ids
    }

    /// Builds concrete modifiers from the declarative specs.
    pub fn build_modifiers(&self) -> Result<Vec<Modifier>> {
        self.modifiers.iter().map(ModifierSpec::build).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyParams {
    /// Price per unit of energy.
    pub energy_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegalParams {
    /// Tax per unit of CO2 emitted.
    pub co2_tax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub base_price: f64,
    pub tariff_rate: f64,
    pub co2_emission_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductParams {
    /// Units manufactured each step.
    pub produced_units: f64,
    /// External demand arriving each step.
    pub base_demand: f64,
    pub production: ProductionParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionParams {
    pub energy_consumption_per_unit: f64,
    pub co2_emission_per_unit: f64,
    /// Units of each material consumed per product unit. Materials absent
    /// from the map are not consumed.
    #[serde(default)]
    pub material_consumption: FxHashMap<MaterialId, f64>,
}

impl ProductionParams {
    pub fn consumption_of(&self, material: &MaterialId) -> f64 {
        self.material_consumption.get(material).copied().unwrap_or(0.0)
    }
}

/// Declarative form of a [`Modifier`] as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub name: String,
    /// Full attribute id the modifier targets, e.g. `steel_basePrice`.
    pub attribute: AttributeId,
    /// One of `absolute`, `relative`, `set` or `delay`.
    pub mode: String,
    pub value: f64,
    /// Step offset for `delay` mode. Ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
}

impl ModifierSpec {
    pub fn build(&self) -> Result<Modifier> {
        let mode = match self.mode.as_str() {
            "absolute" => ModifierMode::Absolute,
            "relative" => ModifierMode::Relative,
            "set" => ModifierMode::Set,
            "delay" => ModifierMode::Delay {
                steps: self.delay.unwrap_or(1),
            },
            other => return Err(EngineError::UnknownModifierMode(other.to_string())),
        };
        let mut modifier = Modifier::new(&self.name, self.attribute.clone(), mode, self.value);
        if let Some(trigger) = &self.trigger {
            modifier = modifier.with_trigger(trigger.clone());
        }
        Ok(modifier)
    }
}
