use crate::config::{
    PLAYER_FIRE_COOLDOWN, PLAYER_INVULN_TIME, PLAYER_SPAWN_POINTS, PLAYER_SPEED,
};
use crate::entities::{Bullet, Direction, Player, Tank};
use crate::input::{Button, InputSnapshot};
use crate::world::{TileGrid, TileTemplate};

use super::{advance_tank, Battlefield, Game};

const PLAYER_CONTROLS: [[Button; 5]; 2] = [
    [
        Button::P1Up,
        Button::P1Down,
        Button::P1Left,
        Button::P1Right,
        Button::P1Fire,
    ],
    [
        Button::P2Up,
        Button::P2Down,
        Button::P2Left,
        Button::P2Right,
        Button::P2Fire,
    ],
];

pub(super) fn update_players(
    bf: &mut Battlefield,
    templates: &[TileTemplate],
    input: &InputSnapshot,
    dt: f32,
) {
    let mut fired = Vec::new();
    let grid = &bf.grid;
    for (index, player) in bf.players.iter_mut().enumerate() {
        update_player(player, index, grid, templates, input, dt, &mut fired);
    }
    bf.bullets.extend(fired);
}

fn update_player(
    player: &mut Player,
    index: usize,
    grid: &TileGrid,
    templates: &[TileTemplate],
    input: &InputSnapshot,
    dt: f32,
    fired: &mut Vec<Bullet>,
) {
    if player.tank.destroyed {
        if player.lives > 0 {
            player.respawn_timer -= dt;
            if player.respawn_timer <= 0.0 {
                player.tank = Tank::new(PLAYER_SPAWN_POINTS[index], Direction::Up);
                player.invuln_timer = PLAYER_INVULN_TIME;
            }
        }
        return;
    }

    player.invuln_timer = (player.invuln_timer - dt).max(0.0);
    player.tank.fire_cooldown = (player.tank.fire_cooldown - dt).max(0.0);

    let [up, down, left, right, fire] = PLAYER_CONTROLS[index];
    let held = if input.is_down(up) {
        Some(Direction::Up)
    } else if input.is_down(down) {
        Some(Direction::Down)
    } else if input.is_down(left) {
        Some(Direction::Left)
    } else if input.is_down(right) {
        Some(Direction::Right)
    } else {
        None
    };
    if let Some(dir) = held {
        player.tank.dir = dir;
        advance_tank(&mut player.tank, PLAYER_SPEED, grid, templates, dt);
    }

    if input.is_down(fire) && player.tank.fire_cooldown <= 0.0 {
        Game::fire(&player.tank, true, fired);
        player.tank.fire_cooldown = PLAYER_FIRE_COOLDOWN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TANK_SIZE;
    use crate::math::vec2;
    use crate::world::test_support::{catalog, grid_with, BRICK};
    use crate::world::TileGrid;

    use crate::game::{Battlefield, GameMode};

    fn empty_battlefield(mode: GameMode) -> Battlefield {
        Battlefield::new(TileGrid::empty().cells().to_vec(), mode)
    }

    #[test]
    fn held_direction_moves_and_faces_the_tank() {
        let templates = catalog();
        let mut bf = empty_battlefield(GameMode::OnePlayer);
        let start = bf.players[0].tank.pos;
        let input = InputSnapshot::empty().with_down(Button::P1Left);
        update_players(&mut bf, &templates, &input, 0.1);
        assert_eq!(bf.players[0].tank.dir, Direction::Left);
        assert!(bf.players[0].tank.pos.x < start.x);
    }

    #[test]
    fn fire_is_gated_by_cooldown() {
        let templates = catalog();
        let mut bf = empty_battlefield(GameMode::OnePlayer);
        let input = InputSnapshot::empty().with_down(Button::P1Fire);
        update_players(&mut bf, &templates, &input, 0.016);
        update_players(&mut bf, &templates, &input, 0.016);
        assert_eq!(bf.bullets.len(), 1);
        assert!(bf.bullets[0].fired_by_player);
    }

    #[test]
    fn respawn_restores_tank_with_invulnerability() {
        let templates = catalog();
        let mut bf = empty_battlefield(GameMode::OnePlayer);
        bf.players[0].tank.destroyed = true;
        bf.players[0].lives = 2;
        bf.players[0].respawn_timer = 0.05;
        update_players(&mut bf, &templates, &InputSnapshot::empty(), 0.1);
        let player = &bf.players[0];
        assert!(!player.tank.destroyed);
        assert_eq!(player.tank.pos.x, PLAYER_SPAWN_POINTS[0].x);
        assert!(player.invuln_timer > 0.0);
    }

    #[test]
    fn zero_lives_never_respawns() {
        let templates = catalog();
        let mut bf = empty_battlefield(GameMode::OnePlayer);
        bf.players[0].tank.destroyed = true;
        bf.players[0].lives = 0;
        update_players(&mut bf, &templates, &InputSnapshot::empty(), 10.0);
        assert!(bf.players[0].tank.destroyed);
    }

    #[test]
    fn resolver_keeps_tank_clear_of_solid_cells() {
        let templates = catalog();
        let mut bf = Battlefield::new(
            grid_with(&[(14, 20, BRICK), (14, 21, BRICK)]).cells().to_vec(),
            GameMode::OnePlayer,
        );
        bf.players[0].tank.pos = vec2(6.3, 10.5);
        let input = InputSnapshot::empty().with_down(Button::P1Right);
        for _ in 0..30 {
            update_players(&mut bf, &templates, &input, 0.05);
        }
        // Wall cells start at x = 7.0; the tank's right edge stays left of it.
        assert!(bf.players[0].tank.pos.x + TANK_SIZE * 0.5 <= 7.0);
    }
}
