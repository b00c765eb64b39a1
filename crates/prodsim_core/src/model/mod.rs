//! Data model types: identifiers, modifiers, triggers, and result snapshots.

pub mod ids;
pub mod modifier;
pub mod results;
pub mod trigger;

pub use ids::{AttributeId, BlockId, BlockKind, MaterialId, ProductId, Scope, ScopeClass};
pub use modifier::{Modifier, ModifierMode, ModifierSet};
pub use results::{AttributeValue, BlockSnapshot, SimulationResult, TimestepSnapshot};
pub use trigger::{Comparison, Trigger};
