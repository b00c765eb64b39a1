//! Material block: per-material pricing and emissions.

use crate::block::Block;
use crate::blocks::legal::{self, LegalAttr};
use crate::config::SimulationConfig;
use crate::model::ids::{AttributeId, BlockKind, MaterialId, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialAttr {
    BasePrice,
    TariffRate,
    Co2EmissionPerUnit,
    Co2TaxCostPerUnit,
    CostPerUnit,
}

impl MaterialAttr {
    pub fn key(self) -> &'static str {
        match self {
            MaterialAttr::BasePrice => "basePrice",
            MaterialAttr::TariffRate => "tariffRate",
            MaterialAttr::Co2EmissionPerUnit => "co2EmissionPerUnit",
            MaterialAttr::Co2TaxCostPerUnit => "co2TaxCostPerUnit",
            MaterialAttr::CostPerUnit => "costPerUnit",
        }
    }
}

pub fn attr_id(material: &MaterialId, attr: MaterialAttr) -> AttributeId {
    AttributeId::scoped(material.as_str(), attr.key())
}

pub(crate) fn init(block: &mut Block, material: &MaterialId, config: &SimulationConfig) {
    let Some(params) = config.materials.get(material) else {
        return;
    };

    let base_price = params.base_price;
    block.declare(attr_id(material, MaterialAttr::BasePrice), move |_ctx| {
        Ok(base_price)
    });

    let tariff_rate = params.tariff_rate;
    block.declare(attr_id(material, MaterialAttr::TariffRate), move |_ctx| {
        Ok(tariff_rate)
    });

    let co2_emission = params.co2_emission_per_unit;
    block.declare(
        attr_id(material, MaterialAttr::Co2EmissionPerUnit),
        move |_ctx| Ok(co2_emission),
    );

    // co2TaxCostPerUnit = co2EmissionPerUnit * co2Tax
    {
        let m = material.clone();
        block.declare(attr_id(material, MaterialAttr::Co2TaxCostPerUnit), move |ctx| {
            let emission = ctx.current(
                BlockKind::Material,
                Scope::Material(&m),
                &attr_id(&m, MaterialAttr::Co2EmissionPerUnit),
            )?;
            let tax = ctx.current(BlockKind::Legal, Scope::None, &legal::attr_id(LegalAttr::Co2Tax))?;
            Ok(emission * tax)
        });
    }

    // costPerUnit = (basePrice + co2TaxCostPerUnit) * (1 + tariffRate)
    {
        let m = material.clone();
        block.declare(attr_id(material, MaterialAttr::CostPerUnit), move |ctx| {
            let scope = Scope::Material(&m);
            let base = ctx.current(BlockKind::Material, scope, &attr_id(&m, MaterialAttr::BasePrice))?;
            let tariff = ctx.current(BlockKind::Material, scope, &attr_id(&m, MaterialAttr::TariffRate))?;
            let co2_tax_cost =
                ctx.current(BlockKind::Material, scope, &attr_id(&m, MaterialAttr::Co2TaxCostPerUnit))?;
            Ok((base + co2_tax_cost) * (1.0 + tariff))
        });
    }
}
