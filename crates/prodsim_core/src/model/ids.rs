//! Identifiers for simulation entities
//!
//! Blocks and attributes are addressed by string ids because modifiers and
//! triggers reference attributes purely by id. Id construction is centralized
//! here and in the per-block `attr_id` helpers so the composition convention
//! lives in exactly one place:
//!
//! - unscoped block kinds resolve to the kind key alone (`energy`, `legal`,
//!   `total`)
//! - scoped kinds resolve to `{material}_{kind}` or `{product}_{kind}`
//! - attribute ids are `{scope}_{base}`, with cross-cutting production
//!   attributes embedding both ids as `{product}_{material}_{base}`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Identifier for a material from the input configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(String);

impl MaterialId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Identifier for a product from the input configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// The kinds of blocks a timestep contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Energy,
    Legal,
    Material,
    Production,
    Product,
    Storage,
    Total,
}

/// Whether a block kind exists once per timestep or once per material/product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeClass {
    Unscoped,
    PerMaterial,
    PerProduct,
}

impl BlockKind {
    pub fn key(self) -> &'static str {
        match self {
            BlockKind::Energy => "energy",
            BlockKind::Legal => "legal",
            BlockKind::Material => "material",
            BlockKind::Production => "production",
            BlockKind::Product => "product",
            BlockKind::Storage => "storage",
            BlockKind::Total => "total",
        }
    }

    pub fn scope_class(self) -> ScopeClass {
        match self {
            BlockKind::Energy | BlockKind::Legal | BlockKind::Total => ScopeClass::Unscoped,
            BlockKind::Material => ScopeClass::PerMaterial,
            BlockKind::Production | BlockKind::Product | BlockKind::Storage => {
                ScopeClass::PerProduct
            }
        }
    }
}

/// Scope parameter for block lookups and construction.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    None,
    Material(&'a MaterialId),
    Product(&'a ProductId),
}

/// Identifier for a block within a timestep.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn unscoped(kind: BlockKind) -> Self {
        Self(kind.key().to_string())
    }

    pub fn for_material(material: &MaterialId, kind: BlockKind) -> Self {
        Self(format!("{material}_{}", kind.key()))
    }

    pub fn for_product(product: &ProductId, kind: BlockKind) -> Self {
        Self(format!("{product}_{}", kind.key()))
    }

    /// Resolve the block id for a kind under a scope. Fails if a scoped kind
    /// is missing its material/product parameter.
    pub fn compose(kind: BlockKind, scope: Scope<'_>) -> Result<Self, EngineError> {
        match (kind.scope_class(), scope) {
            (ScopeClass::Unscoped, _) => Ok(Self::unscoped(kind)),
            (ScopeClass::PerMaterial, Scope::Material(m)) => Ok(Self::for_material(m, kind)),
            (ScopeClass::PerProduct, Scope::Product(p)) => Ok(Self::for_product(p, kind)),
            _ => Err(EngineError::ScopeRequired(kind)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Identifier for an attribute. Unique within its block; in practice the
/// embedded scope key makes ids unique across the whole timestep, which is
/// what lets modifiers address attributes by id alone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(String);

impl AttributeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn scoped(scope: &str, base: &str) -> Self {
        Self(format!("{scope}_{base}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
