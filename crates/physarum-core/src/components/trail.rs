//! Trail Map
//!
//! The shared grid of decaying signal values. Agents never hold a mutable
//! reference to it: the tick systems read it during sensing and write it only in
//! the deposit pass.

use bevy_ecs::prelude::*;
use rayon::prelude::*;

use super::color::Rgb;
use super::torus::Torus;
use crate::error::InvariantViolation;

/// Resource: row-major grid of `width * height` signal cells on a torus.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrailMap {
    torus: Torus,
    cells: Vec<Rgb>,
}

impl TrailMap {
    /// Allocate a zero-filled map.
    pub fn new(torus: Torus) -> Self {
        Self {
            cells: vec![Rgb::BLACK; torus.cell_count()],
            torus,
        }
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }

    pub fn width(&self) -> u32 {
        self.torus.width()
    }

    pub fn height(&self) -> u32 {
        self.torus.height()
    }

    /// Row-major cell slice, `y * width + x`.
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Multiply every channel of every cell by `factor`.
    pub fn decay(&mut self, factor: f32) {
        self.cells
            .par_iter_mut()
            .for_each(|cell| *cell = cell.scaled(factor));
    }

    /// Overwrite the cell at the wrapped coordinate with `value`.
    pub fn deposit(&mut self, x: i32, y: i32, value: Rgb) -> Result<(), InvariantViolation> {
        let index = self.torus.wrap_cell(x, y)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Read the cell at the wrapped coordinate.
    pub fn sample(&self, x: i32, y: i32) -> Result<Rgb, InvariantViolation> {
        let index = self.torus.wrap_cell(x, y)?;
        Ok(self.cells[index])
    }

    /// Bounds-checked lookup without wrapping.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.cells
            .get(y as usize * self.width() as usize + x as usize)
            .copied()
    }

    /// Reset every cell to black.
    pub fn clear(&mut self) {
        self.cells.fill(Rgb::BLACK);
    }

    /// Fill every cell with `value`.
    pub fn fill(&mut self, value: Rgb) {
        self.cells.fill(value);
    }
}
