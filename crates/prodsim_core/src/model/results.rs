//! Simulation result snapshots
//!
//! A read-only walk of `simulation -> timesteps -> blocks -> attributes ->
//! value`, captured in declaration order so serialized output is stable
//! across runs and platforms.

use serde::{Deserialize, Serialize};

use crate::model::ids::{AttributeId, BlockId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: AttributeId,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub attributes: Vec<AttributeValue>,
}

impl BlockSnapshot {
    pub fn value(&self, attribute: &AttributeId) -> Option<f64> {
        self.attributes
            .iter()
            .find(|a| &a.id == attribute)
            .map(|a| a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepSnapshot {
    pub step: u32,
    pub blocks: Vec<BlockSnapshot>,
}

impl TimestepSnapshot {
    pub fn block(&self, id: &BlockId) -> Option<&BlockSnapshot> {
        self.blocks.iter().find(|b| &b.id == id)
    }
}

/// Complete results from one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub id: String,
    pub steps: Vec<TimestepSnapshot>,
}

impl SimulationResult {
    /// Look up a single finalized value.
    pub fn value(&self, step: u32, block: &BlockId, attribute: &AttributeId) -> Option<f64> {
        self.steps
            .iter()
            .find(|s| s.step == step)?
            .block(block)?
            .value(attribute)
    }

    /// The value of one attribute across all timesteps, in step order.
    /// Steps where the attribute is absent are skipped.
    pub fn series(&self, block: &BlockId, attribute: &AttributeId) -> Vec<f64> {
        self.steps
            .iter()
            .filter_map(|s| s.block(block)?.value(attribute))
            .collect()
    }
}
