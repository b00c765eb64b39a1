//! Tests for the demand-driven evaluation core
//!
//! These tests verify that:
//! - Declaration order never affects values (reads pull computation)
//! - Same-timestep cycles are detected instead of looping
//! - Values clamp to zero unless declared signed
//! - Prior-step reads are zero at step 0
//! - Reads before a run and reads of future steps fail cleanly

use crate::blocks::BlockCatalog;
use crate::error::EngineError;
use crate::model::ids::{BlockId, BlockKind, Scope};
use crate::simulation::Simulation;

use super::{assert_close, bare_config, constant_catalog};

#[test]
fn test_read_pulls_attribute_declared_later() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        // `sum` is declared first but reads `a`, declared after it.
        block.declare("sum".into(), |ctx| {
            let a = ctx.current(BlockKind::Energy, Scope::None, &"a".into())?;
            Ok(a + 1.0)
        });
        block.declare("a".into(), |_ctx| Ok(41.0));
    });

    let mut sim = Simulation::with_catalog("order", bare_config(1), catalog);
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    assert_close(sim.value(0, &energy, &"sum".into()).unwrap(), 42.0);
}

#[test]
fn test_same_step_cycle_is_detected() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("a".into(), |ctx| {
            ctx.current(BlockKind::Energy, Scope::None, &"b".into())
        });
        block.declare("b".into(), |ctx| {
            ctx.current(BlockKind::Energy, Scope::None, &"a".into())
        });
    });

    let mut sim = Simulation::with_catalog("cycle", bare_config(1), catalog);
    let err = sim.run().unwrap_err();
    assert!(matches!(err, EngineError::CyclicDependency { step: 0, .. }));
}

#[test]
fn test_values_clamp_to_zero_by_default() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("clamped".into(), |_ctx| Ok(-5.0));
        block.declare_signed("signed".into(), |_ctx| Ok(-5.0));
    });

    let mut sim = Simulation::with_catalog("clamp", bare_config(1), catalog);
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    assert_close(sim.value(0, &energy, &"clamped".into()).unwrap(), 0.0);
    assert_close(sim.value(0, &energy, &"signed".into()).unwrap(), -5.0);
}

#[test]
fn test_prior_reads_zero_at_step_zero() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        // A running counter: previous value plus one.
        block.declare("count".into(), |ctx| {
            let prev = ctx.prior(BlockKind::Energy, Scope::None, &"count".into())?;
            Ok(prev + 1.0)
        });
    });

    let mut sim = Simulation::with_catalog("counter", bare_config(4), catalog);
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    for step in 0..4 {
        assert_close(
            sim.value(step, &energy, &"count".into()).unwrap(),
            (step + 1) as f64,
        );
    }
}

#[test]
fn test_value_before_run_is_unresolved() {
    let sim = Simulation::with_catalog("unrun", bare_config(2), constant_catalog(100.0));
    let energy = BlockId::unscoped(BlockKind::Energy);
    let err = sim.value(0, &energy, &"base".into()).unwrap_err();
    assert!(matches!(err, EngineError::UnresolvedAttribute { .. }));
}

#[test]
fn test_future_step_read_is_rejected() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("peek".into(), |ctx| {
            let next = ctx.step() + 1;
            ctx.value_at(next, &BlockId::unscoped(BlockKind::Energy), &"peek".into())
        });
    });

    let mut sim = Simulation::with_catalog("peek", bare_config(2), catalog);
    let err = sim.run().unwrap_err();
    assert!(matches!(err, EngineError::UnresolvedAttribute { .. }));
}

#[test]
fn test_unknown_attribute_read_fails() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("a".into(), |ctx| {
            ctx.current(BlockKind::Energy, Scope::None, &"missing".into())
        });
    });

    let mut sim = Simulation::with_catalog("missing", bare_config(1), catalog);
    let err = sim.run().unwrap_err();
    assert!(matches!(err, EngineError::UnresolvedAttribute { .. }));
}

#[test]
fn test_redeclaration_replaces_rule_in_place() {
    let mut catalog = BlockCatalog::empty();
    catalog.register(BlockKind::Energy, |block, _scope, _config| {
        block.declare("a".into(), |_ctx| Ok(1.0));
        block.declare("b".into(), |_ctx| Ok(2.0));
        block.declare("a".into(), |_ctx| Ok(10.0));
    });

    let mut sim = Simulation::with_catalog("redeclare", bare_config(1), catalog);
    sim.run().unwrap();

    let energy = BlockId::unscoped(BlockKind::Energy);
    let timestep = &sim.timesteps()[0];
    let block = timestep.block_by_id(&energy).unwrap();
    assert_eq!(block.len(), 2);
    assert!(block.contains(&"a".into()));
    assert!(!block.contains(&"c".into()));
    assert_eq!(block.attributes()[0].id().as_str(), "a");
    assert_close(sim.value(0, &energy, &"a".into()).unwrap(), 10.0);
    assert_close(sim.value(0, &energy, &"b".into()).unwrap(), 2.0);
}
