use std::fmt;

use crate::model::{AttributeId, BlockId, BlockKind};

/// Errors surfaced by the simulation engine.
///
/// Everything here is fatal and aborts the run: a failure indicates a
/// registration or configuration defect, never a transient condition, so
/// nothing is retried. The one deliberately non-fatal path is trigger
/// evaluation, which degrades to "trigger is false" instead of returning one
/// of these (see `Trigger::evaluate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A block lookup failed: no block with this id exists in the timestep.
    BlockNotFound(BlockId),
    /// A scoped block kind was looked up without its material/product scope.
    ScopeRequired(BlockKind),
    /// An attribute value was read before it was computed in the current
    /// pass, or the attribute id is not registered in the block.
    UnresolvedAttribute {
        block: BlockId,
        attribute: AttributeId,
    },
    /// Two or more attributes in the same timestep read each other.
    CyclicDependency { step: u32, attribute: AttributeId },
    /// A modifier specification carried a mode string the engine does not
    /// know.
    UnknownModifierMode(String),
    /// A registered modifier targets an attribute id that exists in no block.
    UnknownModifierTarget(AttributeId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::BlockNotFound(id) => write!(f, "block {id} not found"),
            EngineError::ScopeRequired(kind) => {
                write!(
                    f,
                    "block kind {kind:?} requires a material or product scope"
                )
            }
            EngineError::UnresolvedAttribute { block, attribute } => {
                write!(f, "attribute {attribute} in block {block} is unresolved")
            }
            EngineError::CyclicDependency { step, attribute } => {
                write!(
                    f,
                    "cyclic dependency on attribute {attribute} in timestep {step}"
                )
            }
            EngineError::UnknownModifierMode(mode) => {
                write!(f, "unknown modifier mode: {mode}")
            }
            EngineError::UnknownModifierTarget(attribute) => {
                write!(f, "modifier targets unknown attribute {attribute}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
