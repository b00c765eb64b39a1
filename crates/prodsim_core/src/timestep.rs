//! Timesteps
//!
//! A timestep owns the blocks that exist at one point in simulated time.
//! Every timestep of a simulation carries the same set of block kinds and
//! parameterizations because all of them are built from the same
//! configuration: energy and legal blocks, one material block per material,
//! production/product/storage blocks per product, and one total block.

use rustc_hash::FxHashMap;

use crate::block::Block;
use crate::blocks::BlockCatalog;
use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::model::ids::{BlockId, BlockKind, Scope};

#[derive(Debug)]
pub struct Timestep {
    step: u32,
    blocks: Vec<Block>,
    index: FxHashMap<BlockId, usize>,
}

impl Timestep {
    /// Construct all blocks for `step`. Pure registration: attribute rules
    /// are declared but nothing is evaluated.
    pub(crate) fn build(step: u32, config: &SimulationConfig, catalog: &BlockCatalog) -> Self {
        let mut timestep = Self {
            step,
            blocks: Vec::new(),
            index: FxHashMap::default(),
        };

        timestep.add_block(BlockId::unscoped(BlockKind::Energy), BlockKind::Energy, Scope::None, config, catalog);
        timestep.add_block(BlockId::unscoped(BlockKind::Legal), BlockKind::Legal, Scope::None, config, catalog);

        for material in config.material_ids() {
            timestep.add_block(
                BlockId::for_material(material, BlockKind::Material),
                BlockKind::Material,
                Scope::Material(material),
                config,
                catalog,
            );
        }

        for product in config.product_ids() {
            for kind in [BlockKind::Production, BlockKind::Product, BlockKind::Storage] {
                timestep.add_block(
                    BlockId::for_product(product, kind),
                    kind,
                    Scope::Product(product),
                    config,
                    catalog,
                );
            }
        }

        timestep.add_block(BlockId::unscoped(BlockKind::Total), BlockKind::Total, Scope::None, config, catalog);

        timestep
    }

    fn add_block(
        &mut self,
        id: BlockId,
        kind: BlockKind,
        scope: Scope<'_>,
        config: &SimulationConfig,
        catalog: &BlockCatalog,
    ) {
        let mut block = Block::new(id.clone(), kind);
        if let Some(init) = catalog.init(kind) {
            init(&mut block, scope, config);
        }
        self.index.insert(id, self.blocks.len());
        self.blocks.push(block);
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Blocks in construction order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Resolve a block by kind and scope.
    pub fn get_block(&self, kind: BlockKind, scope: Scope<'_>) -> Result<&Block> {
        let id = BlockId::compose(kind, scope)?;
        self.block_by_id(&id)
    }

    pub fn block_by_id(&self, id: &BlockId) -> Result<&Block> {
        self.position(id)
            .map(|(_, block)| block)
            .ok_or_else(|| EngineError::BlockNotFound(id.clone()))
    }

    pub(crate) fn position(&self, id: &BlockId) -> Option<(u32, &Block)> {
        let pos = *self.index.get(id)?;
        Some((pos as u32, &self.blocks[pos]))
    }
}
