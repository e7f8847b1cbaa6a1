//! Tick Systems
//!
//! One tick is three chained systems:
//! 1. `decay_trail_map` attenuates every cell
//! 2. `sense_and_steer` moves every agent against the read-only trail map
//! 3. `deposit_signals` writes every agent's signal, in agent-index order
//!
//! Step 3 only starts after step 2 finished for all agents, so no agent ever
//! senses a deposit made earlier in the same tick.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{error, trace, warn};

use super::motion::advance_agent;
use crate::components::{Agent, AgentPopulation, SpeciesCatalog, TrailMap};
use crate::error::InvariantViolation;
use crate::SimRng;

/// Resource: per-session tick parameters.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TickSettings {
    /// Multiplier applied to every cell at the start of a tick
    pub decay_factor: f32,
    /// Run the sense pass on the rayon pool
    pub parallel: bool,
}

/// Resource: time step of the tick currently being run.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TickDelta(pub f32);

/// Resource: invariant violations raised during the current tick.
#[derive(Resource, Debug, Default)]
pub struct TickFaults {
    faults: Vec<InvariantViolation>,
}

impl TickFaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fault: InvariantViolation) {
        self.faults.push(fault);
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Remove and return the first recorded fault, dropping the rest.
    pub fn take_first(&mut self) -> Option<InvariantViolation> {
        self.faults.drain(..).next()
    }
}

/// Build the schedule that runs one tick.
pub fn build_tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    // Strictly chained systems; run them on the calling thread.
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((decay_trail_map, sense_and_steer, deposit_signals).chain());
    schedule
}

/// System: multiply every trail cell by the session decay factor.
pub fn decay_trail_map(settings: Res<TickSettings>, mut trail: ResMut<TrailMap>) {
    trail.decay(settings.decay_factor);
}

/// System: sense, steer and move every agent. Reads the trail map only.
///
/// One seed per agent is drawn from the session RNG in index order before any
/// agent moves, so parallel and sequential runs consume identical randomness.
pub fn sense_and_steer(
    settings: Res<TickSettings>,
    delta: Res<TickDelta>,
    catalog: Res<SpeciesCatalog>,
    trail: Res<TrailMap>,
    mut agents: ResMut<AgentPopulation>,
    mut rng: ResMut<SimRng>,
    mut faults: ResMut<TickFaults>,
) {
    let dt = delta.0;
    let catalog: &SpeciesCatalog = &catalog;
    let trail: &TrailMap = &trail;
    let seeds: Vec<u64> = (0..agents.len()).map(|_| rng.0.gen()).collect();

    // Every agent is advanced even after a fault; the lowest-index fault wins.
    let step = |(index, (agent, seed)): (usize, (&mut Agent, &u64))| {
        let species = &catalog[agent.species];
        let mut agent_rng = SmallRng::seed_from_u64(*seed);
        advance_agent(agent, species, trail, dt, &mut agent_rng)
            .err()
            .map(|fault| (index, fault.for_agent(index)))
    };

    let first_fault = if settings.parallel {
        agents
            .as_mut_slice()
            .par_iter_mut()
            .zip(seeds.par_iter())
            .enumerate()
            .filter_map(step)
            .min_by_key(|(index, _)| *index)
    } else {
        agents
            .as_mut_slice()
            .iter_mut()
            .zip(seeds.iter())
            .enumerate()
            .filter_map(step)
            .min_by_key(|(index, _)| *index)
    };

    match first_fault {
        None => trace!(agents = seeds.len(), dt, "sense pass complete"),
        Some((_, fault)) => {
            error!(%fault, "sense pass left the toroidal domain");
            faults.record(fault);
        }
    }
}

/// System: overwrite each agent's cell with its species signal.
///
/// Runs sequentially by agent index; when agents share a cell the highest
/// index wins. Skipped entirely when the sense pass faulted.
pub fn deposit_signals(
    catalog: Res<SpeciesCatalog>,
    agents: Res<AgentPopulation>,
    mut trail: ResMut<TrailMap>,
    mut faults: ResMut<TickFaults>,
) {
    if !faults.is_empty() {
        warn!("skipping deposit pass after invariant violation");
        return;
    }

    for agent in agents.iter() {
        let (x, y) = agent.cell();
        if let Err(fault) = trail.deposit(x, y, catalog[agent.species].signal) {
            error!(%fault, "deposit outside the toroidal domain");
            faults.record(fault);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Rgb, SpeciesParams, Torus, Vec2};

    const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    fn still_species(signal: Rgb) -> SpeciesParams {
        SpeciesParams {
            signal,
            speed: 0.0,
            sensor_distance: 2.0,
            sensor_radius: 1,
            random_turn_strength: 0.0,
            ..Default::default()
        }
    }

    fn world_with(agents: Vec<Agent>, parallel: bool) -> World {
        let mut world = World::new();
        world.insert_resource(TickSettings {
            decay_factor: 0.5,
            parallel,
        });
        world.insert_resource(TickDelta(1.0));
        world.insert_resource(
            SpeciesCatalog::new(vec![still_species(RED), still_species(BLUE)]).unwrap(),
        );
        world.insert_resource(TrailMap::new(Torus::new(8, 8)));
        world.insert_resource(AgentPopulation::new(agents));
        world.insert_resource(SimRng(SmallRng::seed_from_u64(3)));
        world.insert_resource(TickFaults::new());
        world
    }

    #[test]
    fn test_collision_keeps_highest_index_color() {
        let agents = vec![
            Agent::new(Vec2::new(2.2, 3.7), 0.0, 0),
            Agent::new(Vec2::new(2.9, 3.1), 1.0, 1),
        ];
        let mut world = world_with(agents, false);
        let mut schedule = build_tick_schedule();
        schedule.run(&mut world);

        let trail = world.resource::<TrailMap>();
        assert_eq!(trail.get(2, 3), Some(BLUE));
        let lit = trail.cells().iter().filter(|c| !c.is_black()).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_decay_runs_before_deposit() {
        let agents = vec![Agent::new(Vec2::new(1.5, 1.5), 0.0, 0)];
        let mut world = world_with(agents, false);
        world.resource_mut::<TrailMap>().deposit(5, 5, BLUE).unwrap();

        let mut schedule = build_tick_schedule();
        schedule.run(&mut world);

        let trail = world.resource::<TrailMap>();
        assert_eq!(trail.get(5, 5), Some(BLUE.scaled(0.5)));
        assert_eq!(trail.get(1, 1), Some(RED));
    }

    #[test]
    fn test_sense_pass_ignores_same_tick_deposits() {
        // Agent 0 sits where agent 1's right probe lands. If deposits leaked into
        // the sense pass agent 1 would turn; with the phase split it goes straight.
        let turner = SpeciesParams {
            signal: BLUE,
            speed: 0.0,
            sensor_angle_offset: std::f32::consts::FRAC_PI_2,
            sensor_distance: 2.0,
            sensor_radius: 1,
            turn_strength: 1.0,
            random_turn_strength: 0.0,
            repel: false,
            ..Default::default()
        };
        let mut world = world_with(
            vec![
                Agent::new(Vec2::new(4.5, 6.5), 0.0, 0),
                Agent::new(Vec2::new(4.5, 4.5), 0.0, 1),
            ],
            false,
        );
        world.insert_resource(SpeciesCatalog::new(vec![still_species(RED), turner]).unwrap());

        let mut schedule = build_tick_schedule();
        schedule.run(&mut world);
        assert_eq!(world.resource::<AgentPopulation>().as_slice()[1].angle, 0.0);

        // Next tick the deposit from tick one is visible and the agent turns right.
        schedule.run(&mut world);
        assert_eq!(world.resource::<AgentPopulation>().as_slice()[1].angle, 1.0);
    }

    #[test]
    fn test_fault_skips_deposit_pass() {
        let runaway = SpeciesParams {
            speed: 100.0,
            ..still_species(RED)
        };
        let mut world = world_with(vec![Agent::new(Vec2::new(1.5, 1.5), 0.0, 0)], false);
        world.insert_resource(SpeciesCatalog::new(vec![runaway]).unwrap());

        let mut schedule = build_tick_schedule();
        schedule.run(&mut world);

        let fault = world.resource_mut::<TickFaults>().take_first();
        assert!(matches!(
            fault,
            Some(InvariantViolation::PositionOutOfRange { agent: 0, .. })
        ));
        assert!(world.resource::<TickFaults>().is_empty());
        assert!(world
            .resource::<TrailMap>()
            .cells()
            .iter()
            .all(Rgb::is_black));
    }

    #[test]
    fn test_lowest_index_fault_reported_in_both_modes() {
        let runaway = SpeciesParams {
            speed: 100.0,
            ..still_species(BLUE)
        };
        let crawler = SpeciesParams {
            speed: 1.0,
            ..still_species(RED)
        };
        let agents: Vec<Agent> = (0..32)
            .map(|i| {
                let species = match i {
                    5 | 9 | 30 => 1,
                    31 => 2,
                    _ => 0,
                };
                Agent::new(Vec2::new((i % 8) as f32 + 0.5, (i / 8) as f32 + 0.5), 0.0, species)
            })
            .collect();

        let mut runs = Vec::new();
        for parallel in [false, true] {
            let mut world = world_with(agents.clone(), parallel);
            world.insert_resource(
                SpeciesCatalog::new(vec![still_species(RED), runaway.clone(), crawler.clone()])
                    .unwrap(),
            );
            let mut schedule = build_tick_schedule();
            schedule.run(&mut world);

            let fault = world.resource_mut::<TickFaults>().take_first();
            assert!(matches!(
                fault,
                Some(InvariantViolation::PositionOutOfRange { agent: 5, .. })
            ));
            runs.push(world.resource::<AgentPopulation>().clone());
        }

        assert_eq!(runs[0], runs[1]);
        // Agents after the first fault were still advanced.
        assert_eq!(runs[0].as_slice()[31].position, Vec2::new(0.5, 3.5));
    }

    #[test]
    fn test_parallel_and_sequential_passes_agree() {
        let jittery = SpeciesParams {
            speed: 1.5,
            random_turn_strength: 0.4,
            turn_strength: 3.0,
            ..still_species(RED)
        };
        let agents: Vec<Agent> = (0..40)
            .map(|i| Agent::new(Vec2::new((i % 8) as f32 + 0.5, (i / 8) as f32 + 0.25), i as f32, 0))
            .collect();

        let mut runs = Vec::new();
        for parallel in [false, true] {
            let mut world = world_with(agents.clone(), parallel);
            world.insert_resource(SpeciesCatalog::new(vec![jittery.clone()]).unwrap());
            let mut schedule = build_tick_schedule();
            for _ in 0..25 {
                schedule.run(&mut world);
            }
            runs.push((
                world.resource::<AgentPopulation>().clone(),
                world.resource::<TrailMap>().clone(),
            ));
        }

        assert_eq!(runs[0], runs[1]);
    }
}
