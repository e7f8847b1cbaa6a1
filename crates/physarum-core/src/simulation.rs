//! Simulation State
//!
//! Owns the ECS world holding the trail map, catalog, agents and RNG, and
//! advances it one tick per `step` call.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::components::{Agent, AgentPopulation, SpeciesCatalog, TrailMap};
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::output::{FrameBuffer, FrameStats};
use crate::setup::spawn_agents;
use crate::systems::{build_tick_schedule, TickDelta, TickFaults, TickSettings};
use crate::SimRng;

/// A running simulation session.
///
/// After `step` returns an invariant violation the session has been partially
/// advanced and its frames are no longer meaningful; call [`reset`](Self::reset)
/// or drop it.
pub struct SimulationState {
    config: SimulationConfig,
    world: World,
    schedule: Schedule,
    tick: u64,
    initial_agents: Vec<Agent>,
    initial_rng: SmallRng,
}

impl SimulationState {
    /// Validate the configuration, spawn the population and allocate a
    /// zero-filled trail map. Nothing is built when validation fails.
    pub fn initialize(config: &SimulationConfig, catalog: SpeciesCatalog) -> Result<Self, SimError> {
        config.validate()?;
        catalog.validate(config.torus())?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let agents = spawn_agents(config, &catalog, &mut rng);
        debug!(
            width = config.width,
            height = config.height,
            agents = agents.len(),
            species = catalog.len(),
            seed = config.seed,
            "initialized simulation"
        );
        Ok(Self::assemble(config.clone(), catalog, agents, rng))
    }

    /// Build a session from an explicit population. `config.num_agents` is
    /// replaced by the population size.
    pub fn with_agents(
        config: &SimulationConfig,
        catalog: SpeciesCatalog,
        agents: Vec<Agent>,
    ) -> Result<Self, SimError> {
        let config = SimulationConfig {
            num_agents: agents.len(),
            ..config.clone()
        };
        config.validate()?;
        catalog.validate(config.torus())?;
        AgentPopulation::new(agents.clone()).validate(&catalog, config.torus())?;

        let rng = SmallRng::seed_from_u64(config.seed);
        debug!(agents = agents.len(), seed = config.seed, "initialized simulation from explicit agents");
        Ok(Self::assemble(config, catalog, agents, rng))
    }

    fn assemble(
        config: SimulationConfig,
        catalog: SpeciesCatalog,
        agents: Vec<Agent>,
        rng: SmallRng,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(TickSettings {
            decay_factor: config.decay_factor,
            parallel: config.parallel,
        });
        world.insert_resource(TickDelta::default());
        world.insert_resource(TickFaults::new());
        world.insert_resource(TrailMap::new(config.torus()));
        world.insert_resource(catalog);
        world.insert_resource(AgentPopulation::new(agents.clone()));
        world.insert_resource(SimRng(rng.clone()));

        Self {
            config,
            world,
            schedule: build_tick_schedule(),
            tick: 0,
            initial_agents: agents,
            initial_rng: rng,
        }
    }

    /// Advance exactly one tick: decay, then sense/steer/move, then deposit.
    pub fn step(&mut self, dt: f32) -> Result<(), SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimeStep(dt));
        }

        self.world.resource_mut::<TickDelta>().0 = dt;
        self.schedule.run(&mut self.world);

        if let Some(fault) = self.world.resource_mut::<TickFaults>().take_first() {
            return Err(fault.into());
        }

        self.tick += 1;
        trace!(tick = self.tick, dt, "tick complete");
        Ok(())
    }

    /// Restore the initial population, RNG state and a zero-filled trail map.
    pub fn reset(&mut self) {
        *self.world.resource_mut::<TrailMap>() = TrailMap::new(self.config.torus());
        *self.world.resource_mut::<AgentPopulation>() =
            AgentPopulation::new(self.initial_agents.clone());
        *self.world.resource_mut::<SimRng>() = SimRng(self.initial_rng.clone());
        self.world.resource_mut::<TickFaults>().take_first();
        self.tick = 0;
        debug!(seed = self.config.seed, "reset simulation");
    }

    /// Read-only view of the trail map for a renderer.
    pub fn frame_buffer(&self) -> FrameBuffer<'_> {
        FrameBuffer::new(self.trail_map())
    }

    pub fn trail_map(&self) -> &TrailMap {
        self.world.resource::<TrailMap>()
    }

    pub fn agents(&self) -> &[Agent] {
        self.world.resource::<AgentPopulation>().as_slice()
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        self.world.resource::<SpeciesCatalog>()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn frame_stats(&self) -> FrameStats {
        FrameStats::collect(self.tick, self.agents().len(), self.trail_map(), self.catalog())
    }
}

impl std::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationState")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("agents", &self.agents().len())
            .finish_non_exhaustive()
    }
}
