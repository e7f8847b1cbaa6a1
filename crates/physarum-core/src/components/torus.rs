//! Toroidal Domain
//!
//! Continuous positions and integer cells on a wrap-around grid. Every wrap is a
//! single conditional add or subtract per axis; anything still outside the
//! domain afterwards is reported as an [`InvariantViolation`].

use serde::{Deserialize, Serialize};

use crate::error::{Axis, InvariantViolation};

/// A continuous 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians).
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Integer cell containing this point.
    pub fn floor(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Dimensions of the wrap-around domain shared by the trail map and agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torus {
    width: u32,
    height: u32,
}

impl Torus {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn shortest_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Center of the domain in continuous coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Check whether a continuous position lies in `[0,width) x [0,height)`.
    pub fn contains(&self, position: Vec2) -> bool {
        (0.0..self.width as f32).contains(&position.x)
            && (0.0..self.height as f32).contains(&position.y)
    }

    /// Wrap an integer cell once per axis and return its row-major index.
    pub fn wrap_cell(&self, x: i32, y: i32) -> Result<usize, InvariantViolation> {
        let x = wrap_cell_axis(x as i64, self.width, Axis::X)?;
        let y = wrap_cell_axis(y as i64, self.height, Axis::Y)?;
        Ok(y * self.width as usize + x)
    }

    /// Wrap a continuous position once per axis.
    pub fn wrap_position(&self, position: Vec2) -> Result<Vec2, InvariantViolation> {
        Ok(Vec2::new(
            wrap_position_axis(position.x, self.width, Axis::X)?,
            wrap_position_axis(position.y, self.height, Axis::Y)?,
        ))
    }
}

fn wrap_cell_axis(coordinate: i64, dimension: u32, axis: Axis) -> Result<usize, InvariantViolation> {
    let size = dimension as i64;
    let mut wrapped = coordinate;
    if wrapped < 0 {
        wrapped += size;
    }
    if wrapped >= size {
        wrapped -= size;
    }
    if (0..size).contains(&wrapped) {
        Ok(wrapped as usize)
    } else {
        Err(InvariantViolation::CellOutOfRange {
            axis,
            coordinate,
            dimension,
        })
    }
}

fn wrap_position_axis(coordinate: f32, dimension: u32, axis: Axis) -> Result<f32, InvariantViolation> {
    let size = dimension as f32;
    let mut wrapped = coordinate;
    if wrapped < 0.0 {
        wrapped += size;
    }
    // Sequential on purpose: a tiny negative value can round up to exactly `size`.
    if wrapped >= size {
        wrapped -= size;
    }
    if (0.0..size).contains(&wrapped) {
        Ok(wrapped)
    } else {
        Err(InvariantViolation::PositionOutOfRange {
            agent: 0,
            axis,
            coordinate,
            dimension,
        })
    }
}
