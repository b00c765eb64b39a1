//! Built-in demo scenario suite
//!
//! A two-material, two-product economy run under a baseline and a handful of
//! what-if scenarios, each expressed as a single modifier on top of the same
//! configuration.

use prodsim_core::config::{ConfigBuilder, MaterialBuilder, ProductBuilder, SimulationConfig};
use prodsim_core::model::{Modifier, Trigger};
use prodsim_core::simulation::Simulation;

const TIMESTEPS: u32 = 30;

fn demo_config() -> SimulationConfig {
    ConfigBuilder::new(TIMESTEPS)
        .energy_cost(0.15)
        .co2_tax(0.08)
        .material(
            MaterialBuilder::new("steel")
                .base_price(12.0)
                .tariff_rate(0.05)
                .co2_emission(1.8),
        )
        .material(
            MaterialBuilder::new("plastic")
                .base_price(3.5)
                .tariff_rate(0.02)
                .co2_emission(0.6),
        )
        .product(
            ProductBuilder::new("widget")
                .produced_units(120.0)
                .base_demand(100.0)
                .energy_consumption(2.0)
                .co2_emission(0.4)
                .consumes("steel", 1.5)
                .consumes("plastic", 0.5),
        )
        .product(
            ProductBuilder::new("gadget")
                .produced_units(80.0)
                .base_demand(90.0)
                .energy_consumption(3.5)
                .co2_emission(0.7)
                .consumes("steel", 0.25)
                .consumes("plastic", 2.0),
        )
        .build()
}

fn scenario(id: &str, modifier: Modifier) -> Simulation {
    let mut sim = Simulation::new(id, demo_config());
    sim.add_modifier(modifier);
    sim
}

pub fn demo_simulations() -> Vec<Simulation> {
    vec![
        Simulation::new("baseline", demo_config()),
        scenario(
            "steel_price_crisis",
            Modifier::relative("steel_price_crisis", "steel_basePrice", 1.3)
                .with_trigger(Trigger::timestep_range(10, 20)),
        ),
        scenario(
            "plastic_tariff_increase",
            Modifier::absolute("plastic_tariff_increase", "plastic_tariffRate", 0.2)
                .with_trigger(Trigger::timestep_range(5, 15)),
        ),
        scenario(
            "new_widget_production_process",
            Modifier::set("new_widget_production_process", "widget_steel_consumptionPerUnit", 1.0)
                .with_trigger(Trigger::from_step(5)),
        ),
        scenario(
            "gadget_production_delay",
            Modifier::delayed("gadget_production_delay", "gadget_producedUnits", 15.0, 5)
                .with_trigger(Trigger::until_step(5)),
        ),
        scenario(
            "gadget_production_increase",
            Modifier::relative("gadget_production_increase", "gadget_producedUnits", 1.25)
                .with_trigger(Trigger::from_step(12)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodsim_core::simulation::run_batch;

    #[test]
    fn test_demo_suite_runs() {
        let mut sims = demo_simulations();
        assert_eq!(sims.len(), 6);
        run_batch(&mut sims).unwrap();
        for sim in &sims {
            let results = sim.results().unwrap();
            assert_eq!(results.steps.len(), TIMESTEPS as usize);
        }
    }
}
