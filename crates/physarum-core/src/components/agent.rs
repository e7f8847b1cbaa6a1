//! Agent Components
//!
//! Minimal per-agent state. Everything behavioral lives in the species catalog.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use super::species::SpeciesCatalog;
use super::torus::{Torus, Vec2};
use crate::error::ConfigurationError;

/// One agent: where it is, where it is heading, and which species it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Continuous position inside the torus
    pub position: Vec2,
    /// Heading in radians; unbounded, only used through sin/cos
    pub angle: f32,
    /// Index into the species catalog
    pub species: usize,
}

impl Agent {
    pub fn new(position: Vec2, angle: f32, species: usize) -> Self {
        Self {
            position,
            angle,
            species,
        }
    }

    /// Grid cell the agent deposits into.
    pub fn cell(&self) -> (i32, i32) {
        self.position.floor()
    }
}

/// Resource: the fixed-length agent array, processed in index order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct AgentPopulation {
    agents: Vec<Agent>,
}

impl AgentPopulation {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Check species indices, positions and headings before the population is installed.
    pub fn validate(&self, catalog: &SpeciesCatalog, torus: Torus) -> Result<(), ConfigurationError> {
        if self.agents.is_empty() {
            return Err(ConfigurationError::NoAgents);
        }
        for (index, agent) in self.agents.iter().enumerate() {
            if agent.species >= catalog.len() {
                return Err(ConfigurationError::UnknownSpecies {
                    agent: index,
                    species: agent.species,
                    catalog_size: catalog.len(),
                });
            }
            if !torus.contains(agent.position) {
                return Err(ConfigurationError::AgentOutOfDomain {
                    agent: index,
                    x: agent.position.x,
                    y: agent.position.y,
                    width: torus.width(),
                    height: torus.height(),
                });
            }
            if !agent.angle.is_finite() {
                return Err(ConfigurationError::NonFiniteHeading {
                    agent: index,
                    angle: agent.angle,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::species::SpeciesParams;

    fn catalog(size: usize) -> SpeciesCatalog {
        SpeciesCatalog::new(vec![SpeciesParams::default(); size]).unwrap()
    }

    #[test]
    fn test_agent_cell_floors_position() {
        let agent = Agent::new(Vec2::new(3.99, 0.01), 0.0, 0);
        assert_eq!(agent.cell(), (3, 0));
    }

    #[test]
    fn test_validate_accepts_agents_in_domain() {
        let population = AgentPopulation::new(vec![
            Agent::new(Vec2::new(0.0, 0.0), 1.0, 0),
            Agent::new(Vec2::new(9.5, 9.5), -3.0, 1),
        ]);
        assert!(population.validate(&catalog(2), Torus::new(10, 10)).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_species() {
        let population = AgentPopulation::new(vec![Agent::new(Vec2::new(1.0, 1.0), 0.0, 2)]);
        assert_eq!(
            population.validate(&catalog(2), Torus::new(10, 10)),
            Err(ConfigurationError::UnknownSpecies {
                agent: 0,
                species: 2,
                catalog_size: 2,
            })
        );
    }

    #[test]
    fn test_validate_rejects_position_on_far_edge() {
        let population = AgentPopulation::new(vec![Agent::new(Vec2::new(10.0, 1.0), 0.0, 0)]);
        assert!(matches!(
            population.validate(&catalog(1), Torus::new(10, 10)),
            Err(ConfigurationError::AgentOutOfDomain { agent: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_heading() {
        let population = AgentPopulation::new(vec![
            Agent::new(Vec2::new(1.0, 1.0), 0.5, 0),
            Agent::new(Vec2::new(2.0, 2.0), f32::INFINITY, 0),
        ]);
        assert_eq!(
            population.validate(&catalog(1), Torus::new(10, 10)),
            Err(ConfigurationError::NonFiniteHeading {
                agent: 1,
                angle: f32::INFINITY,
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_population() {
        let population = AgentPopulation::default();
        assert_eq!(
            population.validate(&catalog(1), Torus::new(10, 10)),
            Err(ConfigurationError::NoAgents)
        );
    }
}
