use rand::{rngs::SmallRng, Rng};

use crate::config::{
    ENEMY_DIR_INTERVAL, ENEMY_HOP_LIMIT, ENEMY_SHOOT_COOLDOWN, ENEMY_SPAWN_INTERVAL,
    ENEMY_SPAWN_POINTS, ENEMY_SPEED, OPEN_PATH_DISTANCE, SPOT_EAGLE_CHANCE,
    SPOT_PLAYER_REVERSE_CHANCE, SPOT_PLAYER_TURN_CHANCE, WANDER_TURN_CHANCE, WIN_DELAY,
};
use crate::entities::{Bullet, Direction, Tank};
use crate::math::vec2_distance;
use crate::world::{raycast, RayHit, RayOptions, RayTargets, TileGrid, TileTemplate};

use super::{advance_tank, Battlefield, Game};

pub(super) fn update_enemies(
    bf: &mut Battlefield,
    templates: &[TileTemplate],
    rng: &mut SmallRng,
    dt: f32,
) {
    spawn_wave(bf, dt);

    let targets = bf.ray_targets();
    let mut fired = Vec::new();
    let grid = &bf.grid;
    for enemy in bf.enemies.iter_mut() {
        if enemy.destroyed {
            continue;
        }
        update_enemy(enemy, grid, templates, &targets, rng, dt, &mut fired);
    }
    bf.bullets.extend(fired);

    // Stage is won once the wave is exhausted and the field is clear.
    if bf.spawner.remaining == 0 && bf.live_enemy_count() == 0 && bf.win_timer.is_none() {
        bf.win_timer = Some(WIN_DELAY);
    }
}

/// Feed the wave: spawn on a fixed cadence while tanks remain to be
/// spawned and the on-screen count is under the cap, cycling the three
/// spawn points.
fn spawn_wave(bf: &mut Battlefield, dt: f32) {
    if bf.spawner.remaining == 0 {
        return;
    }
    bf.spawner.timer -= dt;
    if bf.spawner.timer > 0.0 {
        return;
    }
    if bf.live_enemy_count() >= bf.spawner.cap {
        return;
    }
    let point = ENEMY_SPAWN_POINTS[bf.spawner.next_point % ENEMY_SPAWN_POINTS.len()];
    bf.spawner.next_point += 1;
    bf.spawner.timer = ENEMY_SPAWN_INTERVAL;
    bf.spawner.remaining -= 1;
    bf.enemies.push(Tank::enemy(point, Direction::Down));
    bf.add_spawn_effect(point);
}

fn update_enemy(
    tank: &mut Tank,
    grid: &TileGrid,
    templates: &[TileTemplate],
    targets: &RayTargets,
    rng: &mut SmallRng,
    dt: f32,
    fired: &mut Vec<Bullet>,
) {
    // The reaction timer gates everything trigger-related: a tank fresh off
    // the spawn pad holds fire for a moment.
    if tank.reaction_timer > 0.0 {
        tank.reaction_timer = (tank.reaction_timer - dt).max(0.0);
    } else {
        tank.fire_cooldown -= dt;
        if tank.fire_cooldown <= 0.0 {
            if tank.hops_until_shoot == 0 {
                // Forced shot: the hop counter bounds how long a tank can
                // wander without firing. Only this path resets the counter.
                Game::fire(tank, false, fired);
                tank.fire_cooldown = ENEMY_SHOOT_COOLDOWN;
                tank.hops_until_shoot = ENEMY_HOP_LIMIT;
            } else if sees_target(tank, grid, templates, targets) {
                Game::fire(tank, false, fired);
                tank.fire_cooldown = ENEMY_SHOOT_COOLDOWN;
            }
        }
    }

    tank.dir_timer -= dt;
    if tank.dir_timer <= 0.0 {
        tank.dir_timer = ENEMY_DIR_INTERVAL;
        if let Some(new_dir) = consider_turn(tank, grid, templates, targets, rng) {
            tank.dir = new_dir;
            tank.hops_until_shoot = tank.hops_until_shoot.saturating_sub(1);
            if tank.reaction_timer <= 0.0
                && tank.fire_cooldown <= 0.0
                && sees_target(tank, grid, templates, targets)
            {
                Game::fire(tank, false, fired);
                tank.fire_cooldown = ENEMY_SHOOT_COOLDOWN;
            }
        }
    }

    if !advance_tank(tank, ENEMY_SPEED, grid, templates, dt) {
        sidestep(tank, grid, templates, rng);
    }
}

/// Line of fire along the current facing: walls block it, bulletpass tiles
/// do not (the bullet would clear them anyway).
fn sees_target(
    tank: &Tank,
    grid: &TileGrid,
    templates: &[TileTemplate],
    targets: &RayTargets,
) -> bool {
    matches!(
        raycast(grid, templates, targets, tank.pos, tank.dir, RayOptions::default()),
        Some((RayHit::Player(_) | RayHit::Eagle, _))
    )
}

/// Re-evaluate heading over the ordered candidates {left, right, reverse}.
/// Seeing the eagle down a candidate is the strongest pull, a player a
/// little weaker (weaker still for a full reverse), and an open corridor
/// occasionally tempts a wandering turn. The first candidate to win its
/// roll is adopted.
fn consider_turn(
    tank: &Tank,
    grid: &TileGrid,
    templates: &[TileTemplate],
    targets: &RayTargets,
    rng: &mut SmallRng,
) -> Option<Direction> {
    let candidates = [tank.dir.left(), tank.dir.right(), tank.dir.reverse()];
    for (slot, candidate) in candidates.into_iter().enumerate() {
        let spotted = raycast(
            grid,
            templates,
            targets,
            tank.pos,
            candidate,
            RayOptions {
                skip_tiles: true,
                ..RayOptions::default()
            },
        );
        let chance = match spotted {
            Some((RayHit::Eagle, _)) => SPOT_EAGLE_CHANCE,
            Some((RayHit::Player(_), _)) if slot == 2 => SPOT_PLAYER_REVERSE_CHANCE,
            Some((RayHit::Player(_), _)) => SPOT_PLAYER_TURN_CHANCE,
            Some((RayHit::Tile { .. }, _)) | None => {
                if path_open(tank, grid, templates, candidate) {
                    WANDER_TURN_CHANCE
                } else {
                    continue;
                }
            }
        };
        if rng.random::<f32>() < chance {
            return Some(candidate);
        }
    }
    None
}

/// A blocked tank picks uniformly between whichever of its two
/// perpendicular directions are unobstructed, consuming a hop unit.
fn sidestep(tank: &mut Tank, grid: &TileGrid, templates: &[TileTemplate], rng: &mut SmallRng) {
    let options = [tank.dir.left(), tank.dir.right()];
    let open: Vec<Direction> = options
        .into_iter()
        .filter(|dir| path_open(tank, grid, templates, *dir))
        .collect();
    if open.is_empty() {
        return;
    }
    tank.dir = open[rng.random_range(0..open.len())];
    tank.hops_until_shoot = tank.hops_until_shoot.saturating_sub(1);
}

/// Probe a direction for walkable room: tiles included, bulletpass treated
/// as blocking (tanks cannot cross it), targets ignored.
fn path_open(
    tank: &Tank,
    grid: &TileGrid,
    templates: &[TileTemplate],
    dir: Direction,
) -> bool {
    let probe = raycast(
        grid,
        templates,
        &RayTargets::default(),
        tank.pos,
        dir,
        RayOptions {
            include_bulletpass: true,
            skip_targets: true,
            ..RayOptions::default()
        },
    );
    match probe {
        None => true,
        Some((_, point)) => vec2_distance(tank.pos, point) > OPEN_PATH_DISTANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::config::ENEMY_CAP;
    use crate::game::{Battlefield, GameMode};
    use crate::math::vec2;
    use crate::world::test_support::{catalog, grid_with, STEEL};
    use crate::world::TileGrid;

    fn empty_battlefield() -> Battlefield {
        Battlefield::new(TileGrid::empty().cells().to_vec(), GameMode::OnePlayer)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn exhausted_hop_counter_forces_a_shot() {
        let templates = catalog();
        let grid = TileGrid::empty();
        // No targets anywhere, so only the forced path can fire.
        let targets = RayTargets::default();
        let mut tank = Tank::enemy(vec2(8.0, 6.0), Direction::Up);
        tank.reaction_timer = 0.0;
        tank.fire_cooldown = 0.0;
        tank.hops_until_shoot = 0;
        let mut fired = Vec::new();
        update_enemy(&mut tank, &grid, &templates, &targets, &mut rng(), 0.016, &mut fired);
        assert_eq!(fired.len(), 1);
        assert!(!fired[0].fired_by_player);
        assert_eq!(tank.hops_until_shoot, ENEMY_HOP_LIMIT);
        assert!(tank.fire_cooldown > 0.0);
    }

    #[test]
    fn cooldown_ready_without_line_of_sight_holds_fire() {
        let templates = catalog();
        let grid = TileGrid::empty();
        let targets = RayTargets::default();
        let mut tank = Tank::enemy(vec2(8.0, 6.0), Direction::Up);
        tank.reaction_timer = 0.0;
        tank.fire_cooldown = 0.0;
        tank.hops_until_shoot = 2;
        tank.dir_timer = 10.0; // keep heading fixed for the test
        let mut fired = Vec::new();
        update_enemy(&mut tank, &grid, &templates, &targets, &mut rng(), 0.016, &mut fired);
        assert!(fired.is_empty());
    }

    #[test]
    fn reaction_timer_delays_the_first_shot() {
        let templates = catalog();
        let grid = TileGrid::empty();
        let targets = RayTargets::default();
        let mut tank = Tank::enemy(vec2(8.0, 6.0), Direction::Up);
        tank.fire_cooldown = 0.0;
        tank.hops_until_shoot = 0;
        tank.dir_timer = 10.0;
        let mut fired = Vec::new();
        update_enemy(&mut tank, &grid, &templates, &targets, &mut rng(), 0.016, &mut fired);
        assert!(fired.is_empty());
        assert!(tank.reaction_timer > 0.0);
    }

    #[test]
    fn spawner_respects_the_on_screen_cap() {
        let templates = catalog();
        let mut bf = empty_battlefield();
        bf.spawner.remaining = 12;
        let mut rng = rng();
        for _ in 0..3000 {
            update_enemies(&mut bf, &templates, &mut rng, 0.016);
            assert!(bf.live_enemy_count() <= ENEMY_CAP);
        }
        // Nothing was destroyed, so the wave stalls at the cap.
        assert_eq!(bf.live_enemy_count(), ENEMY_CAP);
        assert_eq!(bf.spawner.remaining, 12 - ENEMY_CAP as u32);
        assert!(bf.win_timer.is_none());
    }

    #[test]
    fn cleared_wave_arms_the_win_timer() {
        let templates = catalog();
        let mut bf = empty_battlefield();
        bf.spawner.remaining = 0;
        let mut rng = rng();
        update_enemies(&mut bf, &templates, &mut rng, 0.016);
        assert_eq!(bf.win_timer, Some(WIN_DELAY));
    }

    #[test]
    fn boxed_in_tank_stays_put_but_walled_tank_sidesteps() {
        let templates = catalog();
        // Wall across the tank's path at y = 4.0 (cells row 8).
        let cells: Vec<(i32, i32, u32)> = (0..32).map(|x| (x, 8, STEEL)).collect();
        let grid = grid_with(&cells);
        let mut tank = Tank::enemy(vec2(8.0, 3.4), Direction::Down);
        tank.dir_timer = 10.0;
        let before = tank.hops_until_shoot;
        let mut fired = Vec::new();
        update_enemy(&mut tank, &grid, &templates, &RayTargets::default(), &mut rng(), 0.1, &mut fired);
        // Blocked straight ahead; must have turned to an open perpendicular.
        assert!(matches!(tank.dir, Direction::Left | Direction::Right));
        assert_eq!(tank.hops_until_shoot, before - 1);
    }
}
