//! Trigger conditions
//!
//! A trigger is a boolean expression tree over the timestep index and prior
//! attribute values, used to gate modifiers. Attribute conditions resolve
//! against the previous timestep's finalized values (the current timestep at
//! step 0), so a trigger never depends on an attribute that is still being
//! computed. Any lookup failure during attribute conditions disables the
//! trigger for that step instead of aborting the run; the failure is logged.
//!
//! At step 0 there is no finalized previous step, so the condition reads the
//! step-0 table as far as it has been filled: a referenced attribute that was
//! already computed in this pass compares normally, one that has not been
//! reached yet makes the condition false for that evaluation. Conditions
//! meant to be live at step 0 should reference attributes that do not
//! themselves carry step-0 conditions on the same block.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::evaluate::ValueTable;
use crate::model::ids::{AttributeId, BlockId};
use crate::timestep::Timestep;

/// Comparison operator for attribute conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Neq,
}

impl Comparison {
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Gte => lhs >= rhs,
            Comparison::Lte => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Neq => lhs != rhs,
        }
    }
}

/// Condition gating a modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// True iff `min <= step <= max`; `max` of `None` is open-ended.
    TimestepRange {
        #[serde(default)]
        min: u32,
        #[serde(default)]
        max: Option<u32>,
    },

    /// Compare a referenced attribute's finalized value against a constant.
    Attribute {
        block: BlockId,
        attribute: AttributeId,
        op: Comparison,
        value: f64,
    },

    /// All sub-triggers true; an empty list is true.
    All { triggers: Vec<Trigger> },

    /// Any sub-trigger true; an empty list is true.
    Any { triggers: Vec<Trigger> },
}

impl Trigger {
    /// Active for steps `min..=max` inclusive.
    pub fn timestep_range(min: u32, max: u32) -> Self {
        Trigger::TimestepRange {
            min,
            max: Some(max),
        }
    }

    /// Active from `min` onward.
    pub fn from_step(min: u32) -> Self {
        Trigger::TimestepRange { min, max: None }
    }

    /// Active up to and including `max`.
    pub fn until_step(max: u32) -> Self {
        Trigger::TimestepRange {
            min: 0,
            max: Some(max),
        }
    }

    pub fn attribute(
        block: impl Into<BlockId>,
        attribute: impl Into<AttributeId>,
        op: Comparison,
        value: f64,
    ) -> Self {
        Trigger::Attribute {
            block: block.into(),
            attribute: attribute.into(),
            op,
            value,
        }
    }

    pub fn all(triggers: Vec<Trigger>) -> Self {
        Trigger::All { triggers }
    }

    pub fn any(triggers: Vec<Trigger>) -> Self {
        Trigger::Any { triggers }
    }

    /// Evaluate the trigger for `step`.
    pub(crate) fn evaluate(&self, step: u32, steps: &[Timestep], values: &ValueTable) -> bool {
        match self {
            Trigger::TimestepRange { min, max } => {
                *min <= step && max.is_none_or(|mx| step <= mx)
            }
            Trigger::Attribute {
                block,
                attribute,
                op,
                value,
            } => match attribute_condition(block, attribute, *op, *value, step, steps, values) {
                Ok(active) => active,
                Err(err) => {
                    tracing::warn!(%err, trigger_block = %block, trigger_attribute = %attribute,
                        "trigger condition failed to evaluate, treating as inactive");
                    false
                }
            },
            Trigger::All { triggers } => {
                triggers.is_empty() || triggers.iter().all(|t| t.evaluate(step, steps, values))
            }
            Trigger::Any { triggers } => {
                triggers.is_empty() || triggers.iter().any(|t| t.evaluate(step, steps, values))
            }
        }
    }
}

/// Resolve and compare a referenced attribute. Uses the previous timestep's
/// finalized value, or the current timestep at step 0.
fn attribute_condition(
    block_id: &BlockId,
    attribute_id: &AttributeId,
    op: Comparison,
    rhs: f64,
    step: u32,
    steps: &[Timestep],
    values: &ValueTable,
) -> Result<bool, EngineError> {
    let eval_step = step.saturating_sub(1);
    let timestep = steps
        .get(eval_step as usize)
        .ok_or_else(|| EngineError::BlockNotFound(block_id.clone()))?;

    let (block_idx, block) = timestep
        .position(block_id)
        .ok_or_else(|| EngineError::BlockNotFound(block_id.clone()))?;
    let (attr_idx, _attr) =
        block
            .position(attribute_id)
            .ok_or_else(|| EngineError::UnresolvedAttribute {
                block: block_id.clone(),
                attribute: attribute_id.clone(),
            })?;

    let lhs = values
        .finalized(eval_step, block_idx, attr_idx)
        .ok_or_else(|| EngineError::UnresolvedAttribute {
            block: block_id.clone(),
            attribute: attribute_id.clone(),
        })?;

    Ok(op.compare(lhs, rhs))
}
