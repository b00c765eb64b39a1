//! Legal block: regulatory rates applied across the economy.

use crate::block::Block;
use crate::config::SimulationConfig;
use crate::model::ids::AttributeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalAttr {
    Co2Tax,
}

impl LegalAttr {
    pub fn key(self) -> &'static str {
        match self {
            LegalAttr::Co2Tax => "co2Tax",
        }
    }
}

pub fn attr_id(attr: LegalAttr) -> AttributeId {
    AttributeId::new(attr.key())
}

pub(crate) fn init(block: &mut Block, config: &SimulationConfig) {
    let co2_tax = config.legal.co2_tax;
    block.declare(attr_id(LegalAttr::Co2Tax), move |_ctx| Ok(co2_tax));
}
