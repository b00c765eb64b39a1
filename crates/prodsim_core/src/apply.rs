//! Modifier application
//!
//! Every attribute value passes through here after its rule runs and before
//! the sign constraint. Modifiers for the target apply in registration
//! order. A `set` replaces the running value but later modifiers in the list
//! still compose on top of it. A `delay` contributes nothing now and injects
//! a one-shot `absolute` modifier gated to a later step; the injection lands
//! in the run's working modifier set, never in the registered set.

use crate::error::Result;
use crate::evaluate::EvalCtx;
use crate::model::ids::AttributeId;
use crate::model::modifier::{Modifier, ModifierMode};
use crate::model::trigger::Trigger;

impl EvalCtx<'_> {
    /// Run the modifier layer for `attribute` over `base`.
    pub(crate) fn apply_modifiers(&mut self, attribute: &AttributeId, base: f64) -> Result<f64> {
        let count = self.modifiers.count(attribute);
        if count == 0 {
            return Ok(base);
        }

        let mut value = base;
        let mut injected: Vec<Modifier> = Vec::new();

        // Indexed iteration: the list must not be appended to while a pass
        // over it is in flight, so injections are collected and inserted
        // after the loop. They are gated to later steps anyway.
        for i in 0..count {
            let modifier = &self.modifiers.for_target(attribute)[i];
            let active = match modifier.trigger() {
                Some(trigger) => trigger.evaluate(self.step, self.steps, self.values),
                None => true,
            };
            if !active {
                continue;
            }

            let mode = modifier.mode();
            let amount = modifier.value();

            match mode {
                ModifierMode::Absolute => value += amount,
                ModifierMode::Relative => value *= amount,
                ModifierMode::Set => value = amount,
                ModifierMode::Delay { steps } => {
                    let fire = match self.modifiers.get_mut(attribute, i) {
                        Some(m) if !m.fired() => {
                            m.mark_fired();
                            true
                        }
                        _ => false,
                    };
                    if fire {
                        // steps is forced to at least 1 so the injected
                        // adjustment can never apply within the current step.
                        let from = self.step.saturating_add(steps.max(1));
                        let name = format!(
                            "{}_delayed",
                            self.modifiers.for_target(attribute)[i].name()
                        );
                        tracing::debug!(
                            modifier = %name,
                            target = %attribute,
                            from_step = from,
                            "delay modifier injecting absolute adjustment"
                        );
                        injected.push(
                            Modifier::absolute(name, attribute.clone(), amount)
                                .with_trigger(Trigger::from_step(from)),
                        );
                    }
                }
            }
        }

        for modifier in injected {
            self.modifiers.insert(modifier);
        }

        Ok(value)
    }
}
