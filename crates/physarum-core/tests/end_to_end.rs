//! End-to-end tick behavior through the public API.

use physarum_core::{
    Agent, Rgb, SimulationConfig, SimulationState, SpeciesCatalog, SpeciesParams, Vec2,
};

const SIGNAL: Rgb = Rgb::new(0.9, 0.3, 0.6);

fn stationary_species(signal: Rgb) -> SpeciesParams {
    SpeciesParams {
        name: "still".to_string(),
        signal,
        speed: 0.0,
        sensor_angle_offset: 0.7,
        sensor_distance: 2.0,
        sensor_radius: 1,
        turn_strength: 5.0,
        random_turn_strength: 0.2,
        repel: false,
    }
}

fn small_config(num_agents: usize) -> SimulationConfig {
    SimulationConfig {
        width: 10,
        height: 10,
        num_agents,
        decay_factor: 0.9,
        seed: 1234,
        ..Default::default()
    }
}

fn lit_cells(state: &SimulationState) -> Vec<(u32, u32, Rgb)> {
    let frame = state.frame_buffer();
    let mut lit = Vec::new();
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let pixel = frame.pixel(x, y).unwrap();
            if !pixel.is_black() {
                lit.push((x, y, pixel));
            }
        }
    }
    lit
}

#[test]
fn test_single_stationary_agent_repaints_its_cell() {
    let catalog = SpeciesCatalog::new(vec![stationary_species(SIGNAL)]).unwrap();
    let mut state = SimulationState::initialize(&small_config(1), catalog).unwrap();

    let start = state.agents()[0].position;
    let (cx, cy) = (start.x.floor() as u32, start.y.floor() as u32);

    state.step(1.0 / 60.0).unwrap();
    assert_eq!(lit_cells(&state), vec![(cx, cy, SIGNAL)]);

    state.step(1.0 / 60.0).unwrap();
    assert_eq!(lit_cells(&state), vec![(cx, cy, SIGNAL)]);
    assert_eq!(state.agents()[0].position, start);
}

#[test]
fn test_collision_leaves_higher_index_color() {
    let red = Rgb::new(1.0, 0.0, 0.0);
    let blue = Rgb::new(0.0, 0.0, 1.0);
    let catalog =
        SpeciesCatalog::new(vec![stationary_species(red), stationary_species(blue)]).unwrap();
    let agents = vec![
        Agent::new(Vec2::new(4.1, 6.8), 0.0, 0),
        Agent::new(Vec2::new(4.9, 6.2), 2.0, 1),
    ];
    let mut state = SimulationState::with_agents(&small_config(2), catalog, agents).unwrap();

    state.step(0.1).unwrap();
    assert_eq!(lit_cells(&state), vec![(4, 6, blue)]);

    state.step(0.1).unwrap();
    assert_eq!(lit_cells(&state), vec![(4, 6, blue)]);
}

#[test]
fn test_trail_decays_behind_moving_agent() {
    let species = SpeciesParams {
        speed: 1.0,
        random_turn_strength: 0.0,
        ..stationary_species(SIGNAL)
    };
    let catalog = SpeciesCatalog::new(vec![species]).unwrap();
    let agents = vec![Agent::new(Vec2::new(1.5, 5.5), 0.0, 0)];
    let mut state = SimulationState::with_agents(&small_config(1), catalog, agents).unwrap();

    // Heading +x at one cell per tick with dt = 1.
    state.step(1.0).unwrap();
    state.step(1.0).unwrap();
    state.step(1.0).unwrap();

    let trail = state.trail_map();
    assert_eq!(trail.get(4, 5), Some(SIGNAL));
    let older = trail.get(3, 5).unwrap();
    let oldest = trail.get(2, 5).unwrap();
    assert!((older.r - SIGNAL.r * 0.9).abs() < 1e-6);
    assert!((oldest.r - SIGNAL.r * 0.81).abs() < 1e-6);
    assert_eq!(trail.get(1, 5), Some(Rgb::BLACK));
}
