use raylib::prelude::{Rectangle, Vector2};

use crate::config::{CELL_SIZE, COLLISION_EPSILON};
use crate::entities::Direction;
use crate::math::vec2;

use super::{TileFlag, TileGrid, TileTemplate};

/// Result of a blocked move: where the entity's box must sit so its leading
/// edge rests on the cell boundary, and which cell stopped it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Corrected box origin (top-left corner).
    pub position: Vector2,
    pub cell: (i32, i32),
}

fn blocks(flag: TileFlag, is_bullet: bool) -> bool {
    match flag {
        TileFlag::Solid => true,
        TileFlag::Bulletpass => !is_bullet,
        TileFlag::Below | TileFlag::Above => false,
    }
}

/// Scan the grid cells along the box's leading edge in the direction of
/// travel and report the first blocking cell. The perpendicular span is
/// inset by a small epsilon so a box flush against a wall does not collide
/// with it sideways; the corrected position backs off by the same epsilon
/// so the hit does not re-trigger next frame.
pub fn resolve(
    grid: &TileGrid,
    templates: &[TileTemplate],
    rect: Rectangle,
    dir: Direction,
    is_bullet: bool,
) -> Option<Hit> {
    let to_cell = |coord: f32| (coord / CELL_SIZE).floor() as i32;

    match dir {
        Direction::Right | Direction::Left => {
            let col = if dir == Direction::Right {
                to_cell(rect.x + rect.width)
            } else {
                to_cell(rect.x)
            };
            let row0 = to_cell(rect.y + COLLISION_EPSILON);
            let row1 = to_cell(rect.y + rect.height - COLLISION_EPSILON);
            for row in row0..=row1 {
                let Some(flag) = grid.flag_at(col, row, templates) else {
                    continue;
                };
                if blocks(flag, is_bullet) {
                    let x = if dir == Direction::Right {
                        col as f32 * CELL_SIZE - rect.width - COLLISION_EPSILON
                    } else {
                        (col + 1) as f32 * CELL_SIZE + COLLISION_EPSILON
                    };
                    return Some(Hit {
                        position: vec2(x, rect.y),
                        cell: (col, row),
                    });
                }
            }
            None
        }
        Direction::Down | Direction::Up => {
            let row = if dir == Direction::Down {
                to_cell(rect.y + rect.height)
            } else {
                to_cell(rect.y)
            };
            let col0 = to_cell(rect.x + COLLISION_EPSILON);
            let col1 = to_cell(rect.x + rect.width - COLLISION_EPSILON);
            for col in col0..=col1 {
                let Some(flag) = grid.flag_at(col, row, templates) else {
                    continue;
                };
                if blocks(flag, is_bullet) {
                    let y = if dir == Direction::Down {
                        row as f32 * CELL_SIZE - rect.height - COLLISION_EPSILON
                    } else {
                        (row + 1) as f32 * CELL_SIZE + COLLISION_EPSILON
                    };
                    return Some(Hit {
                        position: vec2(rect.x, y),
                        cell: (col, row),
                    });
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog, grid_with, BRICK, TREES, WATER};
    use super::*;
    use crate::config::TANK_SIZE;
    use crate::math::centered_rect;

    #[test]
    fn tank_moving_right_is_clamped_to_cell_boundary() {
        let grid = grid_with(&[(8, 4, BRICK), (8, 5, BRICK)]);
        let templates = catalog();
        // Tank center just shy of the wall at x = 4.0, edge overlapping it.
        let rect = centered_rect(vec2(3.6, 2.5), TANK_SIZE, TANK_SIZE);
        let hit = resolve(&grid, &templates, rect, Direction::Right, false).unwrap();
        assert_eq!(hit.cell.0, 8);
        // Box right edge must sit at (just before) the wall.
        let edge = hit.position.x + TANK_SIZE;
        assert!(edge <= 4.0);
        assert!(edge > 4.0 - 0.05);
        // Re-resolving from the corrected position finds nothing.
        let corrected = Rectangle {
            x: hit.position.x,
            y: hit.position.y,
            width: TANK_SIZE,
            height: TANK_SIZE,
        };
        assert!(resolve(&grid, &templates, corrected, Direction::Right, false).is_none());
    }

    #[test]
    fn perpendicular_span_epsilon_skips_grazing_cells() {
        // Wall only above the tank's row span; moving right past it is fine.
        let grid = grid_with(&[(8, 3, BRICK)]);
        let templates = catalog();
        let rect = centered_rect(vec2(3.8, 2.5), TANK_SIZE, TANK_SIZE);
        assert!(resolve(&grid, &templates, rect, Direction::Right, false).is_none());
    }

    #[test]
    fn bulletpass_blocks_tanks_but_not_bullets() {
        let grid = grid_with(&[(8, 4, WATER), (8, 5, WATER)]);
        let templates = catalog();
        let rect = centered_rect(vec2(3.6, 2.5), TANK_SIZE, TANK_SIZE);
        assert!(resolve(&grid, &templates, rect, Direction::Right, false).is_some());
        assert!(resolve(&grid, &templates, rect, Direction::Right, true).is_none());
    }

    #[test]
    fn above_tiles_never_collide() {
        let grid = grid_with(&[(8, 4, TREES), (8, 5, TREES)]);
        let templates = catalog();
        let rect = centered_rect(vec2(3.6, 2.5), TANK_SIZE, TANK_SIZE);
        assert!(resolve(&grid, &templates, rect, Direction::Right, false).is_none());
    }

    #[test]
    fn moving_up_clamps_below_the_wall() {
        let grid = grid_with(&[(4, 6, BRICK), (5, 6, BRICK)]);
        let templates = catalog();
        let rect = centered_rect(vec2(2.5, 3.9), TANK_SIZE, TANK_SIZE);
        let hit = resolve(&grid, &templates, rect, Direction::Up, false).unwrap();
        assert_eq!(hit.cell.1, 6);
        assert!(hit.position.y >= 3.5);
    }
}
