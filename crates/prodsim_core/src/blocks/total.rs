//! Total block: economy-wide aggregates summed over every product.
//!
//! Products and materials are iterated in sorted id order so float sums come
//! out identical run to run.

use crate::block::Block;
use crate::blocks::product::{self, ProductAttr};
use crate::config::SimulationConfig;
use crate::model::ids::{AttributeId, BlockKind, MaterialId, ProductId, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalAttr {
    TotalEnergyUse,
    TotalEnergyCost,
    TotalCo2Emission,
    TotalCo2TaxCost,
    TotalConsumed,
    TotalCost,
    TotalMaterialCosts,
    TotalAllCosts,
}

impl TotalAttr {
    pub fn key(self) -> &'static str {
        match self {
            TotalAttr::TotalEnergyUse => "total_energy_use",
            TotalAttr::TotalEnergyCost => "total_energy_cost",
            TotalAttr::TotalCo2Emission => "total_co2_emission",
            TotalAttr::TotalCo2TaxCost => "total_co2_tax_cost",
            TotalAttr::TotalConsumed => "total_consumed",
            TotalAttr::TotalCost => "total_cost",
            TotalAttr::TotalMaterialCosts => "total_material_costs",
            TotalAttr::TotalAllCosts => "total_all_costs",
        }
    }
}

pub fn attr_id(attr: TotalAttr) -> AttributeId {
    AttributeId::new(attr.key())
}

pub fn material_attr_id(material: &MaterialId, attr: TotalAttr) -> AttributeId {
    AttributeId::scoped(material.as_str(), attr.key())
}

fn owned_ids<T: Clone>(ids: Vec<&T>) -> Vec<T> {
    ids.into_iter().cloned().collect()
}

/// Declares an aggregate that sums one product attribute across all products.
fn declare_product_sum(
    block: &mut Block,
    id: AttributeId,
    products: Vec<ProductId>,
    per_product: impl Fn(&ProductId) -> AttributeId + Send + Sync + 'static,
) {
    block.declare(id, move |ctx| {
        let mut total = 0.0;
        for p in &products {
            total += ctx.current(BlockKind::Product, Scope::Product(p), &per_product(p))?;
        }
        Ok(total)
    });
}

pub(crate) fn init(block: &mut Block, config: &SimulationConfig) {
    let products = owned_ids(config.product_ids());
    let materials = owned_ids(config.material_ids());

    declare_product_sum(
        block,
        attr_id(TotalAttr::TotalEnergyUse),
        products.clone(),
        |p| product::attr_id(p, ProductAttr::EnergyUse),
    );
    declare_product_sum(
        block,
        attr_id(TotalAttr::TotalEnergyCost),
        products.clone(),
        |p| product::attr_id(p, ProductAttr::EnergyCost),
    );
    declare_product_sum(
        block,
        attr_id(TotalAttr::TotalCo2Emission),
        products.clone(),
        |p| product::attr_id(p, ProductAttr::Co2Emission),
    );
    declare_product_sum(
        block,
        attr_id(TotalAttr::TotalCo2TaxCost),
        products.clone(),
        |p| product::attr_id(p, ProductAttr::Co2TaxCost),
    );

    for mat in &materials {
        {
            let m = mat.clone();
            declare_product_sum(
                block,
                material_attr_id(mat, TotalAttr::TotalConsumed),
                products.clone(),
                move |p| product::material_attr_id(p, &m, ProductAttr::MaterialUse),
            );
        }
        {
            let m = mat.clone();
            declare_product_sum(
                block,
                material_attr_id(mat, TotalAttr::TotalCost),
                products.clone(),
                move |p| product::material_attr_id(p, &m, ProductAttr::MaterialCost),
            );
        }
    }

    // total_material_costs = sum of every material's total_cost
    {
        let materials = materials.clone();
        block.declare(attr_id(TotalAttr::TotalMaterialCosts), move |ctx| {
            let mut total = 0.0;
            for m in &materials {
                total += ctx.current(
                    BlockKind::Total,
                    Scope::None,
                    &material_attr_id(m, TotalAttr::TotalCost),
                )?;
            }
            Ok(total)
        });
    }

    // total_all_costs = total_material_costs + total_energy_cost + total_co2_tax_cost
    block.declare(attr_id(TotalAttr::TotalAllCosts), move |ctx| {
        let materials = ctx.current(
            BlockKind::Total,
            Scope::None,
            &attr_id(TotalAttr::TotalMaterialCosts),
        )?;
        let energy = ctx.current(BlockKind::Total, Scope::None, &attr_id(TotalAttr::TotalEnergyCost))?;
        let co2 = ctx.current(BlockKind::Total, Scope::None, &attr_id(TotalAttr::TotalCo2TaxCost))?;
        Ok(materials + energy + co2)
    });
}
