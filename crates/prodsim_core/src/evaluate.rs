//! Demand-driven attribute evaluation
//!
//! Attributes are computed the first time they are read within a run and
//! memoized in a [`ValueTable`]. This makes evaluation order independent of
//! declaration order: a rule that reads a not-yet-computed same-timestep
//! attribute triggers that attribute's computation on the spot. A slot left
//! in the `InProgress` state marks an attribute currently on the evaluation
//! stack, so same-timestep cycles surface as [`EngineError::CyclicDependency`]
//! instead of silently wrong numbers.
//!
//! Reads of earlier timesteps are always safe because the run loop finalizes
//! every timestep before starting the next. Reads of future timesteps are
//! rejected.

use rustc_hash::FxHashMap;

use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::model::ids::{AttributeId, BlockId, BlockKind, Scope};
use crate::model::modifier::ModifierSet;
use crate::timestep::Timestep;

/// Memoized attribute values for one run, keyed by (step, block position,
/// attribute position).
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    slots: FxHashMap<(u32, u32, u32), Slot>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Slot {
    InProgress,
    Done(f64),
}

impl ValueTable {
    pub(crate) fn get(&self, step: u32, block: u32, attr: u32) -> Option<Slot> {
        self.slots.get(&(step, block, attr)).copied()
    }

    pub(crate) fn finalized(&self, step: u32, block: u32, attr: u32) -> Option<f64> {
        match self.slots.get(&(step, block, attr)) {
            Some(Slot::Done(value)) => Some(*value),
            _ => None,
        }
    }

    fn begin(&mut self, step: u32, block: u32, attr: u32) {
        self.slots.insert((step, block, attr), Slot::InProgress);
    }

    fn finish(&mut self, step: u32, block: u32, attr: u32, value: f64) {
        self.slots.insert((step, block, attr), Slot::Done(value));
    }
}

/// Evaluation context handed to attribute rules.
///
/// Immutable simulation structure (timesteps, blocks, rules, configuration)
/// is split from the mutable run state (value table, working modifier set),
/// which is what lets rules recurse through the context while memoization and
/// delay-mode injection mutate state.
pub struct EvalCtx<'a> {
    pub(crate) steps: &'a [Timestep],
    pub(crate) config: &'a SimulationConfig,
    pub(crate) modifiers: &'a mut ModifierSet,
    pub(crate) values: &'a mut ValueTable,
    /// The timestep the run loop is currently finalizing.
    pub(crate) pass_step: u32,
    /// The timestep of the attribute whose rule is currently executing.
    pub(crate) step: u32,
}

impl<'a> EvalCtx<'a> {
    /// Step index of the attribute under evaluation.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn config(&self) -> &SimulationConfig {
        self.config
    }

    /// Read an attribute of the current timestep, computing it on demand.
    pub fn current(&mut self, kind: BlockKind, scope: Scope<'_>, attribute: &AttributeId) -> Result<f64> {
        let block = BlockId::compose(kind, scope)?;
        self.value_at(self.step, &block, attribute)
    }

    /// Read an attribute of the previous timestep, or 0.0 at step 0.
    pub fn prior(&mut self, kind: BlockKind, scope: Scope<'_>, attribute: &AttributeId) -> Result<f64> {
        match self.step.checked_sub(1) {
            None => Ok(0.0),
            Some(prev) => {
                let block = BlockId::compose(kind, scope)?;
                self.value_at(prev, &block, attribute)
            }
        }
    }

    /// Read an attribute at an explicit timestep, computing it on demand if
    /// it belongs to a timestep that is part of the current pass. Future
    /// timesteps are never readable.
    pub fn value_at(&mut self, step: u32, block_id: &BlockId, attribute_id: &AttributeId) -> Result<f64> {
        if step > self.pass_step {
            return Err(EngineError::UnresolvedAttribute {
                block: block_id.clone(),
                attribute: attribute_id.clone(),
            });
        }

        // Structure borrows are detached from `self` so the rule below can
        // take the context mutably.
        let steps = self.steps;
        let timestep = &steps[step as usize];
        let (block_idx, block) = timestep
            .position(block_id)
            .ok_or_else(|| EngineError::BlockNotFound(block_id.clone()))?;
        let (attr_idx, attribute) =
            block
                .position(attribute_id)
                .ok_or_else(|| EngineError::UnresolvedAttribute {
                    block: block_id.clone(),
                    attribute: attribute_id.clone(),
                })?;

        match self.values.get(step, block_idx, attr_idx) {
            Some(Slot::Done(value)) => Ok(value),
            Some(Slot::InProgress) => Err(EngineError::CyclicDependency {
                step,
                attribute: attribute_id.clone(),
            }),
            None => {
                self.values.begin(step, block_idx, attr_idx);

                let rule = attribute.rule();
                let saved = self.step;
                self.step = step;
                let raw = (**rule)(self);
                self.step = saved;
                let raw = raw?;

                let modified = self.apply_modifiers(attribute.id(), raw)?;
                let value = if attribute.allow_negative() {
                    modified
                } else {
                    modified.max(0.0)
                };

                self.values.finish(step, block_idx, attr_idx, value);
                Ok(value)
            }
        }
    }
}
