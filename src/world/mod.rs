mod collision;
mod level;
mod raycast;
mod tiles;

use raylib::prelude::Rectangle;

use crate::config::{FIELD_TILES_X, FIELD_TILES_Y, GRID_HEIGHT, GRID_WIDTH};

pub use collision::{resolve, Hit};
pub use level::{format_grid, load_level, parse_grid, save_level};
pub use raycast::{raycast, RayHit, RayOptions, RayTargets};
pub use tiles::{
    load_tile_templates, parse_tile_templates, Tile, TileFlag, TileTemplate, EMPTY_TILE,
    INDESTRUCTIBLE,
};

/// Fixed-size collision grid at twice the display tile resolution. Cells
/// reference tile templates by index; `EMPTY_TILE` marks an empty cell.
#[derive(Clone, Debug)]
pub struct TileGrid {
    cells: Vec<Tile>,
}

impl TileGrid {
    pub fn empty() -> Self {
        Self {
            cells: vec![Tile::EMPTY; (GRID_WIDTH * GRID_HEIGHT) as usize],
        }
    }

    pub fn from_cells(cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), (GRID_WIDTH * GRID_HEIGHT) as usize);
        Self { cells }
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < GRID_WIDTH && y >= 0 && y < GRID_HEIGHT
    }

    fn index(x: i32, y: i32) -> usize {
        debug_assert!(Self::in_bounds(x, y));
        (y * GRID_WIDTH + x) as usize
    }

    pub fn cell(&self, x: i32, y: i32) -> Tile {
        self.cells[Self::index(x, y)]
    }

    pub fn set_cell(&mut self, x: i32, y: i32, tile: Tile) {
        self.cells[Self::index(x, y)] = tile;
    }

    /// Collision flag of the cell, or `None` for empty / out-of-grid cells.
    /// A cell referencing a template outside the catalog is a programmer
    /// error; release builds treat it as empty rather than corrupt state.
    pub fn flag_at(&self, x: i32, y: i32, templates: &[TileTemplate]) -> Option<TileFlag> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        let tile = self.cell(x, y);
        if tile.is_empty() {
            return None;
        }
        debug_assert!((tile.template as usize) < templates.len());
        templates.get(tile.template as usize).map(|t| t.flag)
    }

    /// Apply one bullet hit to the cell. Indestructible cells ignore it;
    /// a cell reaching zero health becomes empty.
    pub fn damage(&mut self, x: i32, y: i32) {
        if !Self::in_bounds(x, y) {
            return;
        }
        let mut tile = self.cell(x, y);
        if tile.is_empty() || tile.health == INDESTRUCTIBLE {
            return;
        }
        tile.health = tile.health.saturating_sub(1);
        if tile.health == 0 {
            tile = Tile::EMPTY;
        }
        self.set_cell(x, y, tile);
    }

    pub fn playfield_bounds() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: FIELD_TILES_X as f32,
            height: FIELD_TILES_Y as f32,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{grid_with, BRICK, STEEL};
    use super::*;

    #[test]
    fn damage_decrements_then_empties() {
        let mut grid = grid_with(&[(4, 4, BRICK)]);
        grid.damage(4, 4);
        assert_eq!(grid.cell(4, 4).health, 1);
        assert!(!grid.cell(4, 4).is_empty());
        grid.damage(4, 4);
        assert!(grid.cell(4, 4).is_empty());
    }

    #[test]
    fn damage_ignores_indestructible() {
        let mut grid = grid_with(&[(4, 4, STEEL)]);
        grid.damage(4, 4);
        assert_eq!(grid.cell(4, 4).health, INDESTRUCTIBLE);
    }

    #[test]
    fn damage_outside_grid_is_a_no_op() {
        let mut grid = TileGrid::empty();
        grid.damage(-1, 0);
        grid.damage(0, 1000);
        assert!(grid.cells().iter().all(Tile::is_empty));
    }
}
