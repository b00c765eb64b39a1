//! Standard block definitions
//!
//! One module per block kind, each exposing an enum of base attribute names,
//! an `attr_id` helper that builds the scoped string id, and an `init`
//! registrar that declares the kind's attributes. The [`BlockCatalog`] maps
//! block kinds to registration callbacks; `standard()` wires up the built-in
//! economy, and custom callbacks can replace any kind.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::block::Block;
use crate::config::SimulationConfig;
use crate::model::ids::{BlockKind, Scope};

pub mod energy;
pub mod legal;
pub mod material;
pub mod product;
pub mod production;
pub mod storage;
pub mod total;

/// Registration callback for one block kind. Receives the freshly created
/// block, the scope it is parameterized by, and the simulation configuration;
/// must declare all of the block's attributes before returning. Declaring
/// none is legal.
pub type BlockInit = dyn Fn(&mut Block, Scope<'_>, &SimulationConfig) + Send + Sync;

/// Per-kind registration callbacks used when timesteps are built.
#[derive(Clone)]
pub struct BlockCatalog {
    inits: FxHashMap<BlockKind, Arc<BlockInit>>,
}

impl BlockCatalog {
    /// A catalog with no callbacks; every block starts empty.
    pub fn empty() -> Self {
        Self {
            inits: FxHashMap::default(),
        }
    }

    /// The built-in production-economy block set.
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.register(BlockKind::Energy, |block, _scope, config| {
            energy::init(block, config);
        });
        catalog.register(BlockKind::Legal, |block, _scope, config| {
            legal::init(block, config);
        });
        catalog.register(BlockKind::Material, |block, scope, config| {
            if let Scope::Material(material) = scope {
                material::init(block, material, config);
            }
        });
        catalog.register(BlockKind::Production, |block, scope, config| {
            if let Scope::Product(product) = scope {
                production::init(block, product, config);
            }
        });
        catalog.register(BlockKind::Product, |block, scope, config| {
            if let Scope::Product(prod) = scope {
                product::init(block, prod, config);
            }
        });
        catalog.register(BlockKind::Storage, |block, scope, config| {
            if let Scope::Product(product) = scope {
                storage::init(block, product, config);
            }
        });
        catalog.register(BlockKind::Total, |block, _scope, config| {
            total::init(block, config);
        });
        catalog
    }

    /// Install or replace the callback for one block kind.
    pub fn register<F>(&mut self, kind: BlockKind, init: F)
    where
        F: Fn(&mut Block, Scope<'_>, &SimulationConfig) + Send + Sync + 'static,
    {
        self.inits.insert(kind, Arc::new(init));
    }

    pub(crate) fn init(&self, kind: BlockKind) -> Option<&Arc<BlockInit>> {
        self.inits.get(&kind)
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for BlockCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCatalog")
            .field("kinds", &self.inits.keys().collect::<Vec<_>>())
            .finish()
    }
}
