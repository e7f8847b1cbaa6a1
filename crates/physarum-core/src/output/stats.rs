//! Frame Statistics
//!
//! Summaries of a frame for logging and analysis.

use serde::Serialize;

use crate::components::{SpeciesCatalog, TrailMap};

/// Cells currently holding one species' exact signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesCoverage {
    pub name: String,
    pub cells: usize,
}

/// Statistics for a single frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub tick: u64,
    pub agents: usize,
    /// Sum of every channel of every cell
    pub total_brightness: f64,
    /// Cells with any non-zero channel
    pub lit_cells: usize,
    /// Fraction of the map that is lit
    pub coverage: f64,
    /// Cells holding each species' fresh signal, in catalog order
    pub species: Vec<SpeciesCoverage>,
}

impl FrameStats {
    pub fn collect(tick: u64, agents: usize, trail: &TrailMap, catalog: &SpeciesCatalog) -> Self {
        let mut total_brightness = 0.0f64;
        let mut lit_cells = 0usize;
        let mut species_cells = vec![0usize; catalog.len()];

        for cell in trail.cells() {
            total_brightness += cell.brightness() as f64;
            if cell.is_black() {
                continue;
            }
            lit_cells += 1;
            // First match wins when two species share a signal color.
            if let Some(index) = catalog.iter().position(|s| s.signal == *cell) {
                species_cells[index] += 1;
            }
        }

        let cell_count = trail.cells().len().max(1);
        Self {
            tick,
            agents,
            total_brightness,
            lit_cells,
            coverage: lit_cells as f64 / cell_count as f64,
            species: catalog
                .iter()
                .zip(species_cells)
                .map(|(params, cells)| SpeciesCoverage {
                    name: params.name.clone(),
                    cells,
                })
                .collect(),
        }
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
