//! Energy block: economy-wide energy price.

use crate::block::Block;
use crate::config::SimulationConfig;
use crate::model::ids::AttributeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyAttr {
    EnergyCost,
}

impl EnergyAttr {
    pub fn key(self) -> &'static str {
        match self {
            EnergyAttr::EnergyCost => "energyCost",
        }
    }
}

pub fn attr_id(attr: EnergyAttr) -> AttributeId {
    AttributeId::new(attr.key())
}

pub(crate) fn init(block: &mut Block, config: &SimulationConfig) {
    let energy_cost = config.energy.energy_cost;
    block.declare(attr_id(EnergyAttr::EnergyCost), move |_ctx| Ok(energy_cost));
}
