//! Production block: per-unit process costs for one product.
//!
//! Cross-cutting attributes embed both the product and the material id, e.g.
//! `widget_steel_consumptionPerUnit`.

use crate::block::Block;
use crate::blocks::energy::{self, EnergyAttr};
use crate::blocks::legal::{self, LegalAttr};
use crate::blocks::material::{self, MaterialAttr};
use crate::config::SimulationConfig;
use crate::model::ids::{AttributeId, BlockKind, MaterialId, ProductId, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionAttr {
    EnergyConsumptionPerUnit,
    EnergyCostPerUnit,
    EmittedCo2PerUnit,
    Co2TaxCostPerUnit,
    ConsumptionPerUnit,
    CostPerProduct,
    TotalMaterialCostPerProduct,
    TotalCostPerProduct,
}

impl ProductionAttr {
    pub fn key(self) -> &'static str {
        match self {
            ProductionAttr::EnergyConsumptionPerUnit => "energyConsumptionPerUnit",
            ProductionAttr::EnergyCostPerUnit => "energyCostPerUnit",
            ProductionAttr::EmittedCo2PerUnit => "emittedCo2PerUnit",
            ProductionAttr::Co2TaxCostPerUnit => "co2TaxCostPerUnit",
            ProductionAttr::ConsumptionPerUnit => "consumptionPerUnit",
            ProductionAttr::CostPerProduct => "costPerProduct",
            ProductionAttr::TotalMaterialCostPerProduct => "totalMaterialCostPerProduct",
            ProductionAttr::TotalCostPerProduct => "totalCostPerProduct",
        }
    }
}

pub fn attr_id(product: &ProductId, attr: ProductionAttr) -> AttributeId {
    AttributeId::scoped(product.as_str(), attr.key())
}

pub fn material_attr_id(
    product: &ProductId,
    material: &MaterialId,
    attr: ProductionAttr,
) -> AttributeId {
    AttributeId::new(format!("{product}_{material}_{}", attr.key()))
}

pub(crate) fn init(block: &mut Block, product: &ProductId, config: &SimulationConfig) {
    let Some(params) = config.products.get(product) else {
        return;
    };

    let energy_consumption = params.production.energy_consumption_per_unit;
    block.declare(
        attr_id(product, ProductionAttr::EnergyConsumptionPerUnit),
        move |_ctx| Ok(energy_consumption),
    );

    // energyCostPerUnit = energyConsumptionPerUnit * energyCost
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductionAttr::EnergyCostPerUnit), move |ctx| {
            let consumption = ctx.current(
                BlockKind::Production,
                Scope::Product(&p),
                &attr_id(&p, ProductionAttr::EnergyConsumptionPerUnit),
            )?;
            let price = ctx.current(
                BlockKind::Energy,
                Scope::None,
                &energy::attr_id(EnergyAttr::EnergyCost),
            )?;
            Ok(consumption * price)
        });
    }

    let emitted_co2 = params.production.co2_emission_per_unit;
    block.declare(
        attr_id(product, ProductionAttr::EmittedCo2PerUnit),
        move |_ctx| Ok(emitted_co2),
    );

    // co2TaxCostPerUnit = emittedCo2PerUnit * co2Tax
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductionAttr::Co2TaxCostPerUnit), move |ctx| {
            let emitted = ctx.current(
                BlockKind::Production,
                Scope::Product(&p),
                &attr_id(&p, ProductionAttr::EmittedCo2PerUnit),
            )?;
            let tax = ctx.current(BlockKind::Legal, Scope::None, &legal::attr_id(LegalAttr::Co2Tax))?;
            Ok(emitted * tax)
        });
    }

    // Per-material consumption and cost, for every material in the economy.
    let mut material_cost_ids: Vec<AttributeId> = Vec::new();
    for mat in config.material_ids() {
        let consumption = params.production.consumption_of(mat);
        block.declare(
            material_attr_id(product, mat, ProductionAttr::ConsumptionPerUnit),
            move |_ctx| Ok(consumption),
        );

        // costPerProduct = consumptionPerUnit * material costPerUnit
        {
            let p = product.clone();
            let m = mat.clone();
            block.declare(
                material_attr_id(product, mat, ProductionAttr::CostPerProduct),
                move |ctx| {
                    let consumption = ctx.current(
                        BlockKind::Production,
                        Scope::Product(&p),
                        &material_attr_id(&p, &m, ProductionAttr::ConsumptionPerUnit),
                    )?;
                    let unit_cost = ctx.current(
                        BlockKind::Material,
                        Scope::Material(&m),
                        &material::attr_id(&m, MaterialAttr::CostPerUnit),
                    )?;
                    Ok(consumption * unit_cost)
                },
            );
        }

        material_cost_ids.push(material_attr_id(product, mat, ProductionAttr::CostPerProduct));
    }

    // totalMaterialCostPerProduct = sum of every material's costPerProduct
    {
        let p = product.clone();
        block.declare(
            attr_id(product, ProductionAttr::TotalMaterialCostPerProduct),
            move |ctx| {
                let mut total = 0.0;
                for id in &material_cost_ids {
                    total += ctx.current(BlockKind::Production, Scope::Product(&p), id)?;
                }
                Ok(total)
            },
        );
    }

    // totalCostPerProduct = totalMaterialCostPerProduct + energyCostPerUnit
    //                     + co2TaxCostPerUnit
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductionAttr::TotalCostPerProduct), move |ctx| {
            let scope = Scope::Product(&p);
            let materials = ctx.current(
                BlockKind::Production,
                scope,
                &attr_id(&p, ProductionAttr::TotalMaterialCostPerProduct),
            )?;
            let energy = ctx.current(
                BlockKind::Production,
                scope,
                &attr_id(&p, ProductionAttr::EnergyCostPerUnit),
            )?;
            let co2 = ctx.current(
                BlockKind::Production,
                scope,
                &attr_id(&p, ProductionAttr::Co2TaxCostPerUnit),
            )?;
            Ok(materials + energy + co2)
        });
    }
}
