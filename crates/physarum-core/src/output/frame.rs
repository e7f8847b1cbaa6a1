//! Frame Buffer
//!
//! Borrowed, read-only view of the trail map handed to an external renderer.

use crate::components::{Rgb, TrailMap};

/// Row-major view of the current trail map.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffer<'a> {
    width: u32,
    height: u32,
    pixels: &'a [Rgb],
}

impl<'a> FrameBuffer<'a> {
    pub fn new(trail: &'a TrailMap) -> Self {
        Self {
            width: trail.width(),
            height: trail.height(),
            pixels: trail.cells(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, `y * width + x`.
    pub fn pixels(&self) -> &'a [Rgb] {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate pixel rows from `y = 0` upward.
    pub fn rows(&self) -> std::slice::ChunksExact<'a, Rgb> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Tightly packed RGBA8 bytes, ready for a texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(Rgb::to_rgba8).collect()
    }
}
