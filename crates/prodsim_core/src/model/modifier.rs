//! Modifiers
//!
//! A modifier is a named rule that transforms the base value of one target
//! attribute whenever its trigger (if any) is active. Modifiers for a target
//! apply in registration order; that ordering is part of the contract, not an
//! accident of storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::ids::AttributeId;
use crate::model::trigger::Trigger;

/// How a modifier transforms the running value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierMode {
    /// value += modifier.value
    Absolute,
    /// value *= modifier.value
    Relative,
    /// value := modifier.value; later modifiers still compose on top
    Set,
    /// Contributes 0 now and injects a one-shot `Absolute` modifier with the
    /// same value, active from `current_step + steps` onward.
    Delay { steps: u32 },
}

/// A named adjustment to one attribute, optionally gated by a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    name: String,
    target: AttributeId,
    mode: ModifierMode,
    value: f64,
    #[serde(default)]
    trigger: Option<Trigger>,
    /// Delay-mode bookkeeping: set once the injection has happened.
    #[serde(skip)]
    fired: bool,
}

impl Modifier {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<AttributeId>,
        mode: ModifierMode,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            mode,
            value,
            trigger: None,
            fired: false,
        }
    }

    pub fn absolute(name: impl Into<String>, target: impl Into<AttributeId>, value: f64) -> Self {
        Self::new(name, target, ModifierMode::Absolute, value)
    }

    pub fn relative(name: impl Into<String>, target: impl Into<AttributeId>, value: f64) -> Self {
        Self::new(name, target, ModifierMode::Relative, value)
    }

    pub fn set(name: impl Into<String>, target: impl Into<AttributeId>, value: f64) -> Self {
        Self::new(name, target, ModifierMode::Set, value)
    }

    pub fn delayed(
        name: impl Into<String>,
        target: impl Into<AttributeId>,
        value: f64,
        steps: u32,
    ) -> Self {
        Self::new(name, target, ModifierMode::Delay { steps }, value)
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &AttributeId {
        &self.target
    }

    pub fn mode(&self) -> ModifierMode {
        self.mode
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }

    pub(crate) fn fired(&self) -> bool {
        self.fired
    }

    pub(crate) fn mark_fired(&mut self) {
        self.fired = true;
    }
}

/// Registry of modifiers keyed by target attribute, preserving registration
/// order per target.
#[derive(Debug, Clone, Default)]
pub struct ModifierSet {
    by_target: FxHashMap<AttributeId, Vec<Modifier>>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.by_target
            .entry(modifier.target().clone())
            .or_default()
            .push(modifier);
    }

    pub fn for_target(&self, target: &AttributeId) -> &[Modifier] {
        self.by_target
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, target: &AttributeId) -> usize {
        self.by_target.get(target).map_or(0, Vec::len)
    }

    pub(crate) fn get_mut(&mut self, target: &AttributeId, index: usize) -> Option<&mut Modifier> {
        self.by_target.get_mut(target)?.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.by_target.values().flatten()
    }
}
