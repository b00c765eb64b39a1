//! Simulation driver
//!
//! Owns the timestep structure, the registered modifiers, and the value table
//! for the last run. `run` walks timesteps in order and evaluates every
//! declared attribute; demand-driven evaluation means within a timestep the
//! walk order is irrelevant.
//!
//! Each run starts from a fresh value table and a fresh working copy of the
//! registered modifiers, so rerunning the same simulation is bit-for-bit
//! deterministic even when delay modifiers inject adjustments mid-run.

use rustc_hash::FxHashSet;

use crate::blocks::BlockCatalog;
use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::evaluate::{EvalCtx, ValueTable};
use crate::model::ids::{AttributeId, BlockId, BlockKind, Scope};
use crate::model::modifier::{Modifier, ModifierSet};
use crate::model::results::{AttributeValue, BlockSnapshot, SimulationResult, TimestepSnapshot};
use crate::timestep::Timestep;

#[derive(Debug)]
pub struct Simulation {
    id: String,
    config: SimulationConfig,
    timesteps: Vec<Timestep>,
    /// Modifiers as registered by the caller. Never mutated by a run.
    modifiers: ModifierSet,
    /// Working copy used by the last run, including delay-mode injections.
    active: ModifierSet,
    values: ValueTable,
    evaluated: bool,
}

impl Simulation {
    /// A simulation over the standard block set.
    pub fn new(id: impl Into<String>, config: SimulationConfig) -> Self {
        Self::with_catalog(id, config, BlockCatalog::standard())
    }

    /// A simulation with a custom block catalog. Timestep structure is built
    /// eagerly; nothing is evaluated until [`run`](Self::run).
    pub fn with_catalog(
        id: impl Into<String>,
        config: SimulationConfig,
        catalog: BlockCatalog,
    ) -> Self {
        let timesteps = (0..config.timesteps)
            .map(|step| Timestep::build(step, &config, &catalog))
            .collect();
        Self {
            id: id.into(),
            config,
            timesteps,
            modifiers: ModifierSet::new(),
            active: ModifierSet::new(),
            values: ValueTable::default(),
            evaluated: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn timesteps(&self) -> &[Timestep] {
        &self.timesteps
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.insert(modifier);
    }

    pub fn add_modifiers(&mut self, modifiers: impl IntoIterator<Item = Modifier>) {
        for modifier in modifiers {
            self.modifiers.insert(modifier);
        }
    }

    /// Modifiers as registered, without any run-injected adjustments.
    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// The working modifier set of the last run, including injections from
    /// delay modifiers.
    pub fn active_modifiers(&self) -> &ModifierSet {
        &self.active
    }

    /// Evaluate every attribute of every timestep in step order.
    pub fn run(&mut self) -> Result<()> {
        self.validate_modifier_targets()?;

        tracing::debug!(
            simulation = %self.id,
            timesteps = self.timesteps.len(),
            modifiers = self.modifiers.len(),
            "starting run"
        );

        self.values = ValueTable::default();
        self.active = self.modifiers.clone();
        self.evaluated = false;

        for step in 0..self.timesteps.len() as u32 {
            let mut ctx = EvalCtx {
                steps: &self.timesteps,
                config: &self.config,
                modifiers: &mut self.active,
                values: &mut self.values,
                pass_step: step,
                step,
            };
            for block in self.timesteps[step as usize].blocks() {
                for attribute in block.attributes() {
                    ctx.value_at(step, block.id(), attribute.id())?;
                }
            }
        }

        self.evaluated = true;
        Ok(())
    }

    /// A finalized value from the last run.
    pub fn value(&self, step: u32, block: &BlockId, attribute: &AttributeId) -> Result<f64> {
        let unresolved = || EngineError::UnresolvedAttribute {
            block: block.clone(),
            attribute: attribute.clone(),
        };
        if !self.evaluated {
            return Err(unresolved());
        }
        let timestep = self
            .timesteps
            .get(step as usize)
            .ok_or_else(|| EngineError::BlockNotFound(block.clone()))?;
        let (block_idx, found) = timestep
            .position(block)
            .ok_or_else(|| EngineError::BlockNotFound(block.clone()))?;
        let (attr_idx, _) = found.position(attribute).ok_or_else(unresolved)?;
        self.values
            .finalized(step, block_idx, attr_idx)
            .ok_or_else(unresolved)
    }

    /// [`value`](Self::value) addressed by block kind and scope.
    pub fn block_value(
        &self,
        step: u32,
        kind: BlockKind,
        scope: Scope<'_>,
        attribute: &AttributeId,
    ) -> Result<f64> {
        let block = BlockId::compose(kind, scope)?;
        self.value(step, &block, attribute)
    }

    /// Snapshot the last run into a serializable result tree.
    pub fn results(&self) -> Result<SimulationResult> {
        let mut steps = Vec::with_capacity(self.timesteps.len());
        for timestep in &self.timesteps {
            let mut blocks = Vec::with_capacity(timestep.blocks().len());
            for block in timestep.blocks() {
                let mut attributes = Vec::with_capacity(block.len());
                for attribute in block.attributes() {
                    attributes.push(AttributeValue {
                        id: attribute.id().clone(),
                        value: self.value(timestep.step(), block.id(), attribute.id())?,
                    });
                }
                blocks.push(BlockSnapshot {
                    id: block.id().clone(),
                    attributes,
                });
            }
            steps.push(TimestepSnapshot {
                step: timestep.step(),
                blocks,
            });
        }
        Ok(SimulationResult {
            id: self.id.clone(),
            steps,
        })
    }

    /// Every registered modifier must target an attribute that exists
    /// somewhere in the structure. Checked against timestep 0; all timesteps
    /// share the same structure.
    fn validate_modifier_targets(&self) -> Result<()> {
        let Some(first) = self.timesteps.first() else {
            return Ok(());
        };
        let known: FxHashSet<&AttributeId> = first
            .blocks()
            .iter()
            .flat_map(|block| block.attributes().iter().map(|a| a.id()))
            .collect();
        for modifier in self.modifiers.iter() {
            if !known.contains(modifier.target()) {
                return Err(EngineError::UnknownModifierTarget(modifier.target().clone()));
            }
        }
        Ok(())
    }
}

/// Run a batch of independent simulations, in parallel when the `parallel`
/// feature is enabled.
#[cfg(feature = "parallel")]
pub fn run_batch(simulations: &mut [Simulation]) -> Result<()> {
    use rayon::prelude::*;
    simulations.par_iter_mut().try_for_each(Simulation::run)
}

#[cfg(not(feature = "parallel"))]
pub fn run_batch(simulations: &mut [Simulation]) -> Result<()> {
    simulations.iter_mut().try_for_each(Simulation::run)
}
