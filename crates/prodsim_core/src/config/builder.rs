//! Fluent builders for assembling a [`SimulationConfig`] in code.

use rustc_hash::FxHashMap;

use crate::config::{
    EnergyParams, LegalParams, MaterialParams, ProductParams, ProductionParams, SimulationConfig,
};
use crate::model::ids::{MaterialId, ProductId};

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    timesteps: u32,
    energy_cost: f64,
    co2_tax: f64,
    materials: FxHashMap<MaterialId, MaterialParams>,
    products: FxHashMap<ProductId, ProductParams>,
}

impl ConfigBuilder {
    pub fn new(timesteps: u32) -> Self {
        Self {
            timesteps,
            energy_cost: 0.0,
            co2_tax: 0.0,
            materials: FxHashMap::default(),
            products: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn energy_cost(mut self, price: f64) -> Self {
        self.energy_cost = price;
        self
    }

    #[must_use]
    pub fn co2_tax(mut self, rate: f64) -> Self {
        self.co2_tax = rate;
        self
    }

    #[must_use]
    pub fn material(mut self, material: MaterialBuilder) -> Self {
        self.materials.insert(material.id, material.params);
        self
    }

    #[must_use]
    pub fn product(mut self, product: ProductBuilder) -> Self {
        self.products.insert(product.id, product.params);
        self
    }

    pub fn build(self) -> SimulationConfig {
        SimulationConfig {
            timesteps: self.timesteps,
            energy: EnergyParams {
                energy_cost: self.energy_cost,
            },
            legal: LegalParams {
                co2_tax: self.co2_tax,
            },
            materials: self.materials,
            products: self.products,
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    id: MaterialId,
    params: MaterialParams,
}

impl MaterialBuilder {
    pub fn new(id: impl Into<MaterialId>) -> Self {
        Self {
            id: id.into(),
            params: MaterialParams {
                base_price: 0.0,
                tariff_rate: 0.0,
                co2_emission_per_unit: 0.0,
            },
        }
    }

    #[must_use]
    pub fn base_price(mut self, price: f64) -> Self {
        self.params.base_price = price;
        self
    }

    #[must_use]
    pub fn tariff_rate(mut self, rate: f64) -> Self {
        self.params.tariff_rate = rate;
        self
    }

    #[must_use]
    pub fn co2_emission(mut self, per_unit: f64) -> Self {
        self.params.co2_emission_per_unit = per_unit;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProductBuilder {
    id: ProductId,
    params: ProductParams,
}

impl ProductBuilder {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            params: ProductParams {
                produced_units: 0.0,
                base_demand: 0.0,
                production: ProductionParams {
                    energy_consumption_per_unit: 0.0,
                    co2_emission_per_unit: 0.0,
                    material_consumption: FxHashMap::default(),
                },
            },
        }
    }

    #[must_use]
    pub fn produced_units(mut self, units: f64) -> Self {
        self.params.produced_units = units;
        self
    }

    #[must_use]
    pub fn base_demand(mut self, demand: f64) -> Self {
        self.params.base_demand = demand;
        self
    }

    #[must_use]
    pub fn energy_consumption(mut self, per_unit: f64) -> Self {
        self.params.production.energy_consumption_per_unit = per_unit;
        self
    }

    #[must_use]
    pub fn co2_emission(mut self, per_unit: f64) -> Self {
        self.params.production.co2_emission_per_unit = per_unit;
        self
    }

    #[must_use]
    pub fn consumes(mut self, material: impl Into<MaterialId>, units_per_product: f64) -> Self {
        self.params
            .production
            .material_consumption
            .insert(material.into(), units_per_product);
        self
    }
}
