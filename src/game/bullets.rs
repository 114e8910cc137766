use crate::config::{
    BULLET_PAIR_DISTANCE, BULLET_SPEED, CELL_SIZE, LOSE_DELAY, PLAYER_RESPAWN_TIME,
};
use crate::math::{point_in_rect, rects_overlap, vec2_add, vec2_distance_sq, vec2_scale};
use crate::world::{resolve, TileGrid, TileTemplate};

use super::Battlefield;

/// Advance every live bullet and resolve its impacts. The checks run in a
/// fixed order and the first match wins, destroying the bullet:
/// off-playfield, eagle, player tanks, enemy tanks, solid tiles. Bullets are
/// only marked here; the frame-end compaction removes them.
pub(super) fn update_bullets(bf: &mut Battlefield, templates: &[TileTemplate], dt: f32) {
    let field = TileGrid::playfield_bounds();
    let mut bullets = std::mem::take(&mut bf.bullets);

    for bullet in bullets.iter_mut() {
        if bullet.destroyed {
            continue;
        }
        bullet.pos = vec2_add(bullet.pos, vec2_scale(bullet.dir.vector(), BULLET_SPEED * dt));

        if !point_in_rect(bullet.pos, &field) {
            bullet.destroyed = true;
            continue;
        }

        let bbox = bullet.bounds();

        if !bf.eagle.destroyed && rects_overlap(&bbox, &bf.eagle.bounds()) {
            bullet.destroyed = true;
            bf.eagle.destroyed = true;
            let at = bf.eagle.pos;
            bf.add_explosion(at);
            bf.arm_lose_timer(LOSE_DELAY);
            continue;
        }

        if !bullet.fired_by_player {
            let mut consumed = false;
            for player in bf.players.iter_mut() {
                if player.tank.destroyed || !rects_overlap(&bbox, &player.tank.bounds()) {
                    continue;
                }
                bullet.destroyed = true;
                consumed = true;
                let at = player.tank.pos;
                if player.invuln_timer <= 0.0 {
                    player.tank.destroyed = true;
                    player.lives = player.lives.saturating_sub(1);
                    if player.lives > 0 {
                        player.respawn_timer = PLAYER_RESPAWN_TIME;
                    }
                }
                bf.add_explosion(at);
                break;
            }
            if consumed {
                continue;
            }
        } else {
            let mut consumed = false;
            for enemy in bf.enemies.iter_mut() {
                if enemy.destroyed || !rects_overlap(&bbox, &enemy.bounds()) {
                    continue;
                }
                enemy.destroyed = true;
                bullet.destroyed = true;
                consumed = true;
                let at = enemy.pos;
                bf.add_explosion(at);
                break;
            }
            if consumed {
                continue;
            }
        }

        if let Some(hit) = resolve(&bf.grid, templates, bbox, bullet.dir, true) {
            bullet.destroyed = true;
            bf.grid.damage(hit.cell.0, hit.cell.1);
            // Explosion sits half a tile past the impact, along the shot.
            let at = vec2_add(bullet.pos, vec2_scale(bullet.dir.vector(), CELL_SIZE));
            bf.add_explosion(at);
        }
    }

    // Player bullets can knock each other out midair. Checked over unordered
    // pairs so the outcome is symmetric regardless of list order.
    let threshold = BULLET_PAIR_DISTANCE * BULLET_PAIR_DISTANCE;
    for i in 0..bullets.len() {
        for j in (i + 1)..bullets.len() {
            if bullets[i].destroyed || bullets[j].destroyed {
                continue;
            }
            if !bullets[i].fired_by_player || !bullets[j].fired_by_player {
                continue;
            }
            if vec2_distance_sq(bullets[i].pos, bullets[j].pos) < threshold {
                bullets[i].destroyed = true;
                bullets[j].destroyed = true;
            }
        }
    }

    bf.bullets = bullets;
}
