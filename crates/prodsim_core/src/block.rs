//! Blocks and attributes
//!
//! A block is a named group of attributes scoped to one timestep. An
//! attribute is a lazily computable numeric cell: its rule is a pure formula
//! over the evaluation context, and the engine runs the modifier layer and
//! the non-negative clamp after the rule, so formulas never deal with either.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::evaluate::EvalCtx;
use crate::model::ids::{AttributeId, BlockId, BlockKind};

/// Computation rule for one attribute.
pub type AttributeRule = dyn Fn(&mut EvalCtx<'_>) -> Result<f64> + Send + Sync;

/// A named, computed numeric quantity.
pub struct Attribute {
    id: AttributeId,
    rule: Arc<AttributeRule>,
    allow_negative: bool,
}

impl Attribute {
    pub fn id(&self) -> &AttributeId {
        &self.id
    }

    /// Whether the computed value may stay below zero. By default results
    /// are clamped to zero after modifiers apply.
    pub fn allow_negative(&self) -> bool {
        self.allow_negative
    }

    pub(crate) fn rule(&self) -> &Arc<AttributeRule> {
        &self.rule
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("id", &self.id)
            .field("allow_negative", &self.allow_negative)
            .finish_non_exhaustive()
    }
}

/// A named group of attributes for one timestep.
#[derive(Debug)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
    attributes: Vec<Attribute>,
    index: FxHashMap<AttributeId, usize>,
}

impl Block {
    pub(crate) fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            attributes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Declare an attribute whose value is clamped to zero if the modified
    /// result is negative.
    pub fn declare<F>(&mut self, id: AttributeId, rule: F)
    where
        F: Fn(&mut EvalCtx<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        self.declare_inner(id, Arc::new(rule), false);
    }

    /// Declare an attribute whose value may be negative.
    pub fn declare_signed<F>(&mut self, id: AttributeId, rule: F)
    where
        F: Fn(&mut EvalCtx<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        self.declare_inner(id, Arc::new(rule), true);
    }

    fn declare_inner(&mut self, id: AttributeId, rule: Arc<AttributeRule>, allow_negative: bool) {
        if let Some(&pos) = self.index.get(&id) {
            // Re-declaration replaces the rule in place, keeping the
            // original declaration position.
            self.attributes[pos] = Attribute {
                id,
                rule,
                allow_negative,
            };
            return;
        }
        self.index.insert(id.clone(), self.attributes.len());
        self.attributes.push(Attribute {
            id,
            rule,
            allow_negative,
        });
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn contains(&self, id: &AttributeId) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn position(&self, id: &AttributeId) -> Option<(u32, &Attribute)> {
        let pos = *self.index.get(id)?;
        Some((pos as u32, &self.attributes[pos]))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
