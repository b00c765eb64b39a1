//! Product block: realized output quantities and costs for one product.

use crate::block::Block;
use crate::blocks::legal::{self, LegalAttr};
use crate::blocks::production::{self, ProductionAttr};
use crate::config::SimulationConfig;
use crate::model::ids::{AttributeId, BlockKind, MaterialId, ProductId, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAttr {
    ProducedUnits,
    EnergyUse,
    EnergyCost,
    Co2Emission,
    Co2TaxCost,
    MaterialUse,
    MaterialCost,
    TotalCost,
}

impl ProductAttr {
    pub fn key(self) -> &'static str {
        match self {
            ProductAttr::ProducedUnits => "producedUnits",
            ProductAttr::EnergyUse => "energyUse",
            ProductAttr::EnergyCost => "energyCost",
            ProductAttr::Co2Emission => "co2Emission",
            ProductAttr::Co2TaxCost => "co2TaxCost",
            ProductAttr::MaterialUse => "materialUse",
            ProductAttr::MaterialCost => "materialCost",
            ProductAttr::TotalCost => "totalCost",
        }
    }
}

pub fn attr_id(product: &ProductId, attr: ProductAttr) -> AttributeId {
    AttributeId::scoped(product.as_str(), attr.key())
}

pub fn material_attr_id(
    product: &ProductId,
    material: &MaterialId,
    attr: ProductAttr,
) -> AttributeId {
    AttributeId::new(format!("{product}_{material}_{}", attr.key()))
}

pub(crate) fn init(block: &mut Block, product: &ProductId, config: &SimulationConfig) {
    let Some(params) = config.products.get(product) else {
        return;
    };

    let produced_units = params.produced_units;
    block.declare(attr_id(product, ProductAttr::ProducedUnits), move |_ctx| {
        Ok(produced_units)
    });

    // energyUse = producedUnits * energyConsumptionPerUnit
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::EnergyUse), move |ctx| {
            let units = ctx.current(
                BlockKind::Product,
                Scope::Product(&p),
                &attr_id(&p, ProductAttr::ProducedUnits),
            )?;
            let per_unit = ctx.current(
                BlockKind::Production,
                Scope::Product(&p),
                &production::attr_id(&p, ProductionAttr::EnergyConsumptionPerUnit),
            )?;
            Ok(units * per_unit)
        });
    }

    // energyCost = producedUnits * energyCostPerUnit
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::EnergyCost), move |ctx| {
            let units = ctx.current(
                BlockKind::Product,
                Scope::Product(&p),
                &attr_id(&p, ProductAttr::ProducedUnits),
            )?;
            let per_unit = ctx.current(
                BlockKind::Production,
                Scope::Product(&p),
                &production::attr_id(&p, ProductionAttr::EnergyCostPerUnit),
            )?;
            Ok(units * per_unit)
        });
    }

    // co2Emission = producedUnits * emittedCo2PerUnit
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::Co2Emission), move |ctx| {
            let units = ctx.current(
                BlockKind::Product,
                Scope::Product(&p),
                &attr_id(&p, ProductAttr::ProducedUnits),
            )?;
            let per_unit = ctx.current(
                BlockKind::Production,
                Scope::Product(&p),
                &production::attr_id(&p, ProductionAttr::EmittedCo2PerUnit),
            )?;
            Ok(units * per_unit)
        });
    }

    // co2TaxCost = co2Emission * co2Tax
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::Co2TaxCost), move |ctx| {
            let emission = ctx.current(
                BlockKind::Product,
                Scope::Product(&p),
                &attr_id(&p, ProductAttr::Co2Emission),
            )?;
            let tax = ctx.current(BlockKind::Legal, Scope::None, &legal::attr_id(LegalAttr::Co2Tax))?;
            Ok(emission * tax)
        });
    }

    // Per-material use and cost.
    let mut material_cost_ids: Vec<AttributeId> = Vec::new();
    for mat in config.material_ids() {
        {
            let p = product.clone();
            let m = mat.clone();
            block.declare(material_attr_id(product, mat, ProductAttr::MaterialUse), move |ctx| {
                let units = ctx.current(
                    BlockKind::Product,
                    Scope::Product(&p),
                    &attr_id(&p, ProductAttr::ProducedUnits),
                )?;
                let per_unit = ctx.current(
                    BlockKind::Production,
                    Scope::Product(&p),
                    &production::material_attr_id(&p, &m, ProductionAttr::ConsumptionPerUnit),
                )?;
                Ok(units * per_unit)
            });
        }

        {
            let p = product.clone();
            let m = mat.clone();
            block.declare(material_attr_id(product, mat, ProductAttr::MaterialCost), move |ctx| {
                let units = ctx.current(
                    BlockKind::Product,
                    Scope::Product(&p),
                    &attr_id(&p, ProductAttr::ProducedUnits),
                )?;
                let per_unit = ctx.current(
                    BlockKind::Production,
                    Scope::Product(&p),
                    &production::material_attr_id(&p, &m, ProductionAttr::CostPerProduct),
                )?;
                Ok(units * per_unit)
            });
        }

        material_cost_ids.push(material_attr_id(product, mat, ProductAttr::MaterialCost));
    }

    // materialCost (aggregate) = sum of per-material materialCost
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::MaterialCost), move |ctx| {
            let mut total = 0.0;
            for id in &material_cost_ids {
                total += ctx.current(BlockKind::Product, Scope::Product(&p), id)?;
            }
            Ok(total)
        });
    }

    // totalCost = energyCost + materialCost + co2TaxCost
    {
        let p = product.clone();
        block.declare(attr_id(product, ProductAttr::TotalCost), move |ctx| {
            let scope = Scope::Product(&p);
            let energy = ctx.current(BlockKind::Product, scope, &attr_id(&p, ProductAttr::EnergyCost))?;
            let materials =
                ctx.current(BlockKind::Product, scope, &attr_id(&p, ProductAttr::MaterialCost))?;
            let co2 = ctx.current(BlockKind::Product, scope, &attr_id(&p, ProductAttr::Co2TaxCost))?;
            Ok(energy + materials + co2)
        });
    }
}
