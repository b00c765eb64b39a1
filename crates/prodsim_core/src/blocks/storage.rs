//! Storage block: inventory carried between steps and demand fulfilment.
//!
//! The only block family with genuine cross-step state. Inventory and unmet
//! demand from the previous step feed the current one through `ctx.prior`.

use crate::block::Block;
use crate::blocks::product::{self, ProductAttr};
use crate::config::SimulationConfig;
use crate::model::ids::{AttributeId, BlockKind, ProductId, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAttr {
    UnitsInStorage,
    BaseDemand,
    Demand,
    DelayedDemand,
    Sold,
}

impl StorageAttr {
    pub fn key(self) -> &'static str {
        match self {
            StorageAttr::UnitsInStorage => "unitsInStorage",
            StorageAttr::BaseDemand => "baseDemand",
            StorageAttr::Demand => "demand",
            StorageAttr::DelayedDemand => "delayedDemand",
            StorageAttr::Sold => "sold",
        }
    }
}

pub fn attr_id(product: &ProductId, attr: StorageAttr) -> AttributeId {
    AttributeId::scoped(product.as_str(), attr.key())
}

pub(crate) fn init(block: &mut Block, product: &ProductId, config: &SimulationConfig) {
    let Some(params) = config.products.get(product) else {
        return;
    };

    let base_demand = params.base_demand;
    block.declare(attr_id(product, StorageAttr::BaseDemand), move |_ctx| {
        Ok(base_demand)
    });

    // demand = baseDemand + previous step's delayedDemand
    {
        let p = product.clone();
        block.declare(attr_id(product, StorageAttr::Demand), move |ctx| {
            let scope = Scope::Product(&p);
            let base = ctx.current(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::BaseDemand))?;
            let carried =
                ctx.prior(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::DelayedDemand))?;
            Ok(base + carried)
        });
    }

    // unitsInStorage = previous stock - previous sold + freshly produced units
    {
        let p = product.clone();
        block.declare(attr_id(product, StorageAttr::UnitsInStorage), move |ctx| {
            let scope = Scope::Product(&p);
            let prior_stock =
                ctx.prior(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::UnitsInStorage))?;
            let prior_sold = ctx.prior(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::Sold))?;
            let produced = ctx.current(
                BlockKind::Product,
                scope,
                &product::attr_id(&p, ProductAttr::ProducedUnits),
            )?;
            Ok(prior_stock - prior_sold + produced)
        });
    }

    // sold = min(demand, unitsInStorage)
    {
        let p = product.clone();
        block.declare(attr_id(product, StorageAttr::Sold), move |ctx| {
            let scope = Scope::Product(&p);
            let demand = ctx.current(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::Demand))?;
            let stock =
                ctx.current(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::UnitsInStorage))?;
            Ok(demand.min(stock))
        });
    }

    // delayedDemand = unmet demand carried into the next step
    {
        let p = product.clone();
        block.declare(attr_id(product, StorageAttr::DelayedDemand), move |ctx| {
            let scope = Scope::Product(&p);
            let demand = ctx.current(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::Demand))?;
            let sold = ctx.current(BlockKind::Storage, scope, &attr_id(&p, StorageAttr::Sold))?;
            Ok((demand - sold).max(0.0))
        });
    }
}
