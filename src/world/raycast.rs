use raylib::prelude::{Rectangle, Vector2};

use crate::config::CELL_SIZE;
use crate::entities::Direction;
use crate::math::{point_in_rect, vec2, vec2_add, vec2_scale};

use super::{TileFlag, TileGrid, TileTemplate};

/// Target rectangles the ray can terminate on. The second player slot is
/// only populated in two-player scenes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayTargets {
    pub eagle: Option<Rectangle>,
    pub players: [Option<Rectangle>; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayHit {
    Tile { cell: (i32, i32) },
    Player(usize),
    Eagle,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RayOptions {
    /// Treat bulletpass tiles as blocking (tank's-eye view).
    pub include_bulletpass: bool,
    pub skip_tiles: bool,
    pub skip_targets: bool,
}

/// March a point from `origin` along a cardinal direction in half-tile
/// steps until it leaves the playfield (`None`) or lands on the first
/// target entity or blocking tile. Pure query: never mutates state; used
/// only for AI perception.
///
/// The impact point's travel-axis coordinate is snapped to the near edge of
/// the hit cell so repeated queries give the AI stable path lengths.
pub fn raycast(
    grid: &TileGrid,
    templates: &[TileTemplate],
    targets: &RayTargets,
    origin: Vector2,
    dir: Direction,
    opts: RayOptions,
) -> Option<(RayHit, Vector2)> {
    let step = vec2_scale(dir.vector(), CELL_SIZE);
    let bounds = TileGrid::playfield_bounds();
    let mut point = origin;
    loop {
        point = vec2_add(point, step);
        if !point_in_rect(point, &bounds) {
            return None;
        }
        if !opts.skip_targets {
            if let Some(eagle) = &targets.eagle {
                if point_in_rect(point, eagle) {
                    return Some((RayHit::Eagle, point));
                }
            }
            for (index, player) in targets.players.iter().enumerate() {
                if let Some(rect) = player {
                    if point_in_rect(point, rect) {
                        return Some((RayHit::Player(index), point));
                    }
                }
            }
        }
        if !opts.skip_tiles {
            let cell = (
                (point.x / CELL_SIZE).floor() as i32,
                (point.y / CELL_SIZE).floor() as i32,
            );
            if let Some(flag) = grid.flag_at(cell.0, cell.1, templates) {
                let blocking = flag == TileFlag::Solid
                    || (opts.include_bulletpass && flag == TileFlag::Bulletpass);
                if blocking {
                    return Some((RayHit::Tile { cell }, near_edge(origin, dir, cell)));
                }
            }
        }
    }
}

fn near_edge(origin: Vector2, dir: Direction, cell: (i32, i32)) -> Vector2 {
    match dir {
        Direction::Right => vec2(cell.0 as f32 * CELL_SIZE, origin.y),
        Direction::Left => vec2((cell.0 + 1) as f32 * CELL_SIZE, origin.y),
        Direction::Down => vec2(origin.x, cell.1 as f32 * CELL_SIZE),
        Direction::Up => vec2(origin.x, (cell.1 + 1) as f32 * CELL_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog, grid_with, BRICK, WATER};
    use super::*;
    use crate::math::centered_rect;

    fn no_targets() -> RayTargets {
        RayTargets::default()
    }

    #[test]
    fn empty_grid_reports_nothing() {
        let grid = TileGrid::empty();
        let templates = catalog();
        let opts = RayOptions {
            skip_targets: true,
            ..RayOptions::default()
        };
        for dir in [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ] {
            assert_eq!(
                raycast(&grid, &templates, &no_targets(), vec2(8.0, 6.0), dir, opts),
                None
            );
        }
    }

    #[test]
    fn single_solid_tile_hits_with_snapped_near_edge() {
        // Brick at cell (8, 4): x in [4.0, 4.5), y in [2.0, 2.5).
        let grid = grid_with(&[(8, 4, BRICK)]);
        let templates = catalog();
        let hit = raycast(
            &grid,
            &templates,
            &no_targets(),
            vec2(2.0, 2.25),
            Direction::Right,
            RayOptions::default(),
        )
        .unwrap();
        assert_eq!(hit.0, RayHit::Tile { cell: (8, 4) });
        assert_eq!(hit.1.x, 4.0);
        assert_eq!(hit.1.y, 2.25);
    }

    #[test]
    fn targets_win_over_tiles() {
        let grid = grid_with(&[(8, 4, BRICK)]);
        let templates = catalog();
        let targets = RayTargets {
            eagle: Some(centered_rect(vec2(3.0, 2.25), 1.0, 1.0)),
            players: [None, None],
        };
        let hit = raycast(
            &grid,
            &templates,
            &targets,
            vec2(1.0, 2.25),
            Direction::Right,
            RayOptions::default(),
        )
        .unwrap();
        assert_eq!(hit.0, RayHit::Eagle);
    }

    #[test]
    fn player_rect_is_reported_with_its_index() {
        let grid = TileGrid::empty();
        let templates = catalog();
        let targets = RayTargets {
            eagle: None,
            players: [None, Some(centered_rect(vec2(6.0, 3.0), 1.0, 1.0))],
        };
        let hit = raycast(
            &grid,
            &templates,
            &targets,
            vec2(6.0, 8.0),
            Direction::Up,
            RayOptions::default(),
        )
        .unwrap();
        assert_eq!(hit.0, RayHit::Player(1));
    }

    #[test]
    fn bulletpass_blocks_only_when_included() {
        let grid = grid_with(&[(8, 4, WATER)]);
        let templates = catalog();
        let opts = RayOptions {
            skip_targets: true,
            ..RayOptions::default()
        };
        assert_eq!(
            raycast(&grid, &templates, &no_targets(), vec2(2.0, 2.25), Direction::Right, opts),
            None
        );
        let opts = RayOptions {
            include_bulletpass: true,
            skip_targets: true,
            ..RayOptions::default()
        };
        let hit =
            raycast(&grid, &templates, &no_targets(), vec2(2.0, 2.25), Direction::Right, opts)
                .unwrap();
        assert_eq!(hit.0, RayHit::Tile { cell: (8, 4) });
    }

    #[test]
    fn skip_tiles_sees_through_walls() {
        let grid = grid_with(&[(8, 4, BRICK)]);
        let templates = catalog();
        let targets = RayTargets {
            eagle: Some(centered_rect(vec2(8.0, 2.25), 1.0, 1.0)),
            players: [None, None],
        };
        let opts = RayOptions {
            skip_tiles: true,
            ..RayOptions::default()
        };
        let hit = raycast(
            &grid,
            &templates,
            &targets,
            vec2(2.0, 2.25),
            Direction::Right,
            opts,
        )
        .unwrap();
        assert_eq!(hit.0, RayHit::Eagle);
    }
}
