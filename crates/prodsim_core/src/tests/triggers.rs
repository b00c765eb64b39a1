//! Tests for trigger conditions
//!
//! These tests verify that:
//! - Timestep ranges are inclusive on both ends
//! - Attribute conditions compare against the previous step's value
//! - Empty `all`/`any` lists are true
//! - A failing attribute condition disables the trigger without aborting

use crate::blocks::BlockCatalog;
use crate::model::ids::{BlockId, BlockKind};
use crate::model::modifier::Modifier;
use crate::model::trigger::{Comparison, Trigger};
use crate::simulation::Simulation;

use super::{assert_close, bare_config, constant_catalog};

#[test]
fn test_timestep_range_is_inclusive() {
    let mut sim = Simulation::with_catalog("range", bare_config(13), constant_catalog(100.0));
    sim.add_modifier(
        Modifier::absolute("window", "base", 10.0).with_trigger(Trigger::timestep_range(5, 10)),
    );
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    assert_close(sim.value(4, &energy, &"base".into()).unwrap(), 100.0);
    assert_close(sim.value(5, &energy, &"base".into()).unwrap(), 110.0);
    assert_close(sim.value(10, &energy, &"base".into()).unwrap(), 110.0);
    assert_close(sim.value(11, &energy, &"base".into()).unwrap(), 100.0);
}

#[test]
fn test_attribute_condition_reads_previous_step() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("counter".into(), |ctx| Ok(ctx.step() as f64));
        block.declare("flag".into(), |_ctx| Ok(0.0));
    });

    let mut sim = Simulation::with_catalog("attr_trigger", bare_config(6), catalog);
    sim.add_modifier(Modifier::absolute("raise", "flag", 1.0).with_trigger(
        Trigger::attribute("energy", "counter", Comparison::Gte, 3.0),
    ));
    sim.run().unwrap();

    // counter(step - 1) >= 3 first holds at step 4.
    let energy = BlockId::unscoped(BlockKind::Energy);
    let flags: Vec<f64> = (0..6)
        .map(|s| sim.value(s, &energy, &"flag".into()).unwrap())
        .collect();
    assert_eq!(flags, vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_empty_all_and_any_are_true() {
    let mut sim = Simulation::with_catalog("empty", bare_config(2), constant_catalog(100.0));
    sim.add_modifier(Modifier::absolute("a", "base", 1.0).with_trigger(Trigger::all(vec![])));
    sim.add_modifier(Modifier::absolute("b", "base", 2.0).with_trigger(Trigger::any(vec![])));
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    assert_close(sim.value(0, &energy, &"base".into()).unwrap(), 103.0);
    assert_close(sim.value(1, &energy, &"base".into()).unwrap(), 103.0);
}

#[test]
fn test_combinators_nest() {
    let mut sim = Simulation::with_catalog("nest", bare_config(8), constant_catalog(100.0));
    // Active in 2..=6 except when also past 4: all(from 2, until 6, any())
    sim.add_modifier(Modifier::absolute("combo", "base", 10.0).with_trigger(Trigger::all(vec![
        Trigger::from_step(2),
        Trigger::until_step(6),
        Trigger::any(vec![Trigger::until_step(3), Trigger::from_step(5)]),
    ])));
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    let expected = [100.0, 100.0, 110.0, 110.0, 100.0, 110.0, 110.0, 100.0];
    for (step, want) in expected.iter().enumerate() {
        assert_close(
            sim.value(step as u32, &energy, &"base".into()).unwrap(),
            *want,
        );
    }
}

#[test]
fn test_failing_attribute_condition_disables_trigger() {
    let mut sim = Simulation::with_catalog("softfail", bare_config(3), constant_catalog(100.0));
    // References an attribute that exists in no block. The trigger is
    // treated as inactive; the run itself must not abort.
    sim.add_modifier(Modifier::absolute("broken", "base", 50.0).with_trigger(
        Trigger::attribute("energy", "no_such_attribute", Comparison::Gt, 0.0),
    ));
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    for step in 0..3 {
        assert_close(sim.value(step, &energy, &"base".into()).unwrap(), 100.0);
    }
}

/// At step 0 the condition falls back to the current step's table, so it
/// sees exactly what has been computed so far in the pass: an attribute
/// finalized earlier in the walk compares normally, one not yet reached
/// reads as inactive.
#[test]
fn test_attribute_condition_at_step_zero_sees_only_computed_values() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("early".into(), |_ctx| Ok(10.0));
        block.declare("late".into(), |_ctx| Ok(0.0));
    });

    let mut sim = Simulation::with_catalog("step_zero", bare_config(2), catalog);
    // When `early` is evaluated at step 0, `late` has not been computed yet;
    // when `late` is evaluated, `early` is already finalized.
    sim.add_modifier(Modifier::absolute("needs_late", "early", 100.0).with_trigger(
        Trigger::attribute("energy", "late", Comparison::Gte, 0.0),
    ));
    sim.add_modifier(Modifier::absolute("needs_early", "late", 1.0).with_trigger(
        Trigger::attribute("energy", "early", Comparison::Gt, 5.0),
    ));
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    assert_close(sim.value(0, &energy, &"early".into()).unwrap(), 10.0);
    assert_close(sim.value(0, &energy, &"late".into()).unwrap(), 1.0);

    // From step 1 on both conditions resolve against finalized values.
    assert_close(sim.value(1, &energy, &"early".into()).unwrap(), 110.0);
    assert_close(sim.value(1, &energy, &"late".into()).unwrap(), 1.0);
}

#[test]
fn test_comparison_operators() {
    assert!(Comparison::Gt.compare(2.0, 1.0));
    assert!(!Comparison::Gt.compare(1.0, 1.0));
    assert!(Comparison::Gte.compare(1.0, 1.0));
    assert!(Comparison::Lt.compare(0.5, 1.0));
    assert!(Comparison::Lte.compare(1.0, 1.0));
    assert!(Comparison::Eq.compare(1.0, 1.0));
    assert!(Comparison::Neq.compare(1.0, 2.0));
}

#[test]
fn test_trigger_serde_round_trip() {
    let trigger = Trigger::all(vec![
        Trigger::timestep_range(2, 5),
        Trigger::attribute("energy", "base", Comparison::Gte, 10.0),
    ]);
    let json = serde_json::to_string(&trigger).unwrap();
    assert!(json.contains("\"type\":\"timestep_range\""));
    let back: Trigger = serde_json::from_str(&json).unwrap();
    assert_eq!(trigger, back);
}
