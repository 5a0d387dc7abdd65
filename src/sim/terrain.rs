//! Destructible terrain grid
//!
//! Column-major grid of material cells. Generated once per match from two
//! noise fields (surface height and stone veins) and afterwards only
//! changed by explosions clearing sand.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::noise::ValueNoise;
use crate::map_range;

/// Terrain cell material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    #[default]
    Air = 0,
    Sand = 1,
    Stone = 2,
}

impl Material {
    /// Anything a projectile or tank can rest on
    #[inline]
    pub fn is_solid(self) -> bool {
        self != Material::Air
    }
}

/// Frequency of the surface height noise along x
const SURFACE_FREQ: f32 = 0.02;
/// Frequency of the stone vein noise
const STONE_FREQ: f32 = 0.05;

/// The destructible playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    cols: i32,
    rows: i32,
    cells: Vec<Material>,
}

impl TerrainGrid {
    /// An all-air grid
    pub fn empty(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            cells: vec![Material::Air; (cols * rows) as usize],
        }
    }

    /// Generate rolling sand hills with stone pockets
    pub fn generate<R: Rng + ?Sized>(
        cols: i32,
        rows: i32,
        stone_threshold: f32,
        rng: &mut R,
    ) -> Self {
        let surface_offset: f32 = rng.random_range(0.0..1000.0);
        let stone_offset: f32 = rng.random_range(0.0..1000.0);
        let noise = ValueNoise::new(rng);

        let mut grid = Self::empty(cols, rows);
        let top = grid.rows as f32 * 0.4;
        let bottom = grid.rows as f32 * 0.8;

        for x in 0..grid.cols {
            let surface = map_range(
                noise.sample1(surface_offset + x as f32 * SURFACE_FREQ),
                0.0,
                1.0,
                top,
                bottom,
            );
            for y in 0..grid.rows {
                if (y as f32) < surface {
                    continue;
                }
                let vein = noise.sample2(
                    stone_offset + x as f32 * STONE_FREQ,
                    stone_offset + y as f32 * STONE_FREQ,
                );
                let material = if vein > stone_threshold {
                    Material::Stone
                } else {
                    Material::Sand
                };
                grid.set_cell(x, y, material);
            }
        }

        log::debug!(
            "Generated {}x{} terrain: {} sand, {} stone",
            grid.cols,
            grid.rows,
            grid.count(Material::Sand),
            grid.count(Material::Stone)
        );
        grid
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols && row >= 0 && row < self.rows
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> usize {
        (col * self.rows + row) as usize
    }

    /// Material at a cell, `None` outside the grid
    pub fn cell_at(&self, col: i32, row: i32) -> Option<Material> {
        if self.in_bounds(col, row) {
            Some(self.cells[self.index(col, row)])
        } else {
            None
        }
    }

    /// Overwrite a cell; returns false (and does nothing) outside the grid
    ///
    /// Crate-internal: outside generation and test fixtures, the only
    /// writer is `carve_crater`, which never touches stone.
    pub(crate) fn set_cell(&mut self, col: i32, row: i32, material: Material) -> bool {
        if !self.in_bounds(col, row) {
            return false;
        }
        let idx = self.index(col, row);
        self.cells[idx] = material;
        true
    }

    /// First non-air row in a column, scanning down from the top
    pub fn surface_row(&self, col: i32) -> Option<i32> {
        (0..self.rows).find(|&row| self.cell_at(col, row).is_some_and(Material::is_solid))
    }

    /// Number of cells of a material
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Raw cells, column-major
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }
}
