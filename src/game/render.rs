use raylib::prelude::{Color, Vector2};

use crate::config::{BULLET_SIZE, CELL_SIZE, FIELD_TILES_X, FIELD_TILES_Y, GRID_WIDTH, TANK_SIZE};
use crate::entities::Player;
use crate::math::vec2;
use crate::render::{layers, RenderSink, Sprite};
use crate::world::{Tile, TileFlag, TileTemplate};

use super::update::MENU_OPTIONS;
use super::{Battlefield, Game, GameMode, Scene};

const TITLE_COLOR: Color = Color::GOLD;
const TEXT_COLOR: Color = Color::RAYWHITE;
const DIM_COLOR: Color = Color::GRAY;

impl Game {
    /// Emit one frame of draw calls for the active scene. Pure output: no
    /// state changes here, so a frame can be drawn any number of times.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        match self.scene {
            Scene::MainMenu => self.render_main_menu(sink),
            Scene::Intro(_) => {
                render_battlefield(&self.battlefield, &self.templates, sink);
                center_text(
                    sink,
                    6.0,
                    1.0,
                    TITLE_COLOR,
                    &format!("STAGE {}", self.stage + 1),
                );
            }
            Scene::Playing(mode) => {
                render_battlefield(&self.battlefield, &self.templates, sink);
                self.render_hud(mode, sink);
            }
            Scene::Outro(_) => {
                render_battlefield(&self.battlefield, &self.templates, sink);
                center_text(sink, 6.0, 1.0, TITLE_COLOR, "STAGE CLEAR");
            }
            Scene::Construction => self.render_construction(sink),
            Scene::LevelSelect => self.render_level_select(sink),
            Scene::GameOver(_) => {
                render_battlefield(&self.battlefield, &self.templates, sink);
                center_text(sink, 5.5, 1.2, Color::RED, "GAME OVER");
                center_text(sink, 7.0, 0.4, TEXT_COLOR, "confirm to retry, cancel for menu");
            }
            Scene::Victory(_) => {
                center_text(sink, 5.0, 1.2, TITLE_COLOR, "VICTORY");
                center_text(sink, 7.0, 0.4, TEXT_COLOR, "all stages cleared");
            }
        }
    }

    fn render_main_menu(&self, sink: &mut dyn RenderSink) {
        center_text(sink, 2.5, 1.2, TITLE_COLOR, "EAGLE TANKS");
        for (index, option) in MENU_OPTIONS.iter().enumerate() {
            let color = if index == self.menu_choice {
                TEXT_COLOR
            } else {
                DIM_COLOR
            };
            let label = if index == self.menu_choice {
                format!("> {option}")
            } else {
                option.to_string()
            };
            sink.draw_text(vec2(6.0, 5.0 + index as f32 * 0.8), 0.5, color, &label);
        }
    }

    fn render_hud(&self, mode: GameMode, sink: &mut dyn RenderSink) {
        let bf = &self.battlefield;
        for (index, player) in bf.players.iter().enumerate() {
            sink.draw_text(
                vec2(0.2 + index as f32 * 3.0, 0.1),
                0.4,
                TEXT_COLOR,
                &format!("P{} x{}", index + 1, player.lives),
            );
        }
        let pending = bf.spawner.remaining as usize + bf.live_enemy_count();
        sink.draw_text(
            vec2(FIELD_TILES_X as f32 - 4.0, 0.1),
            0.4,
            TEXT_COLOR,
            &format!("enemies {pending}  stage {}", self.stage + 1),
        );
        if mode.player_count() > 1 && bf.all_players_out() {
            center_text(sink, 6.0, 0.6, Color::RED, "BOTH PLAYERS DOWN");
        }
    }

    fn render_level_select(&self, sink: &mut dyn RenderSink) {
        let level = &self.levels[self.preview];
        render_cells(&level.cells, &self.templates, sink);
        center_text(
            sink,
            0.2,
            0.6,
            TITLE_COLOR,
            &format!("< {} ({}/{}) >", level.name, self.preview + 1, self.levels.len()),
        );
    }

    fn render_construction(&self, sink: &mut dyn RenderSink) {
        let editor = &self.construction;
        render_cells(editor.grid.cells(), &self.templates, sink);

        let (cx, cy) = editor.cursor_cell;
        sink.draw_sprite(
            cell_center(cx, cy),
            vec2(CELL_SIZE, CELL_SIZE),
            0.0,
            Sprite::Cursor,
            layers::HUD,
        );

        // Brush preview in the corner, above everything. Unknown indices get
        // no swatch, just the label.
        if let Some(template) = self.templates.get(editor.current_template as usize) {
            sink.draw_sprite(
                vec2(0.4, 0.4),
                vec2(CELL_SIZE, CELL_SIZE),
                template.rotation as f32 * 90.0,
                Sprite::Tile(template.layer_index),
                layers::HUD,
            );
        }
        sink.draw_text(
            vec2(0.8, 0.25),
            0.35,
            TEXT_COLOR,
            &format!("brush {}", editor.current_template),
        );
        if let Some(status) = &editor.status {
            sink.draw_text(
                vec2(0.2, FIELD_TILES_Y as f32 - 0.5),
                0.35,
                TEXT_COLOR,
                status,
            );
        }
    }
}

fn render_battlefield(bf: &Battlefield, templates: &[TileTemplate], sink: &mut dyn RenderSink) {
    render_cells(bf.grid.cells(), templates, sink);

    let eagle_sprite = if bf.eagle.destroyed {
        Sprite::EagleRuined
    } else {
        Sprite::Eagle
    };
    sink.draw_sprite(
        bf.eagle.pos,
        vec2(TANK_SIZE, TANK_SIZE),
        0.0,
        eagle_sprite,
        layers::ENTITIES,
    );

    for player in &bf.players {
        if player.tank.destroyed || invuln_blink(player) {
            continue;
        }
        sink.draw_sprite(
            player.tank.pos,
            vec2(TANK_SIZE, TANK_SIZE),
            player.tank.dir.rotation(),
            Sprite::PlayerTank,
            layers::ENTITIES,
        );
    }
    for enemy in &bf.enemies {
        if enemy.destroyed {
            continue;
        }
        sink.draw_sprite(
            enemy.pos,
            vec2(TANK_SIZE, TANK_SIZE),
            enemy.dir.rotation(),
            Sprite::EnemyTank,
            layers::ENTITIES,
        );
    }
    for bullet in &bf.bullets {
        if bullet.destroyed {
            continue;
        }
        sink.draw_sprite(
            bullet.pos,
            vec2(BULLET_SIZE, BULLET_SIZE),
            bullet.dir.rotation(),
            Sprite::Bullet,
            layers::ENTITIES,
        );
    }
    for effect in &bf.spawn_effects {
        sink.draw_sprite(
            effect.pos,
            vec2(TANK_SIZE, TANK_SIZE),
            0.0,
            Sprite::SpawnEffect(effect.frame),
            layers::ABOVE,
        );
    }
    for explosion in &bf.explosions {
        sink.draw_sprite(
            explosion.pos,
            vec2(TANK_SIZE, TANK_SIZE),
            0.0,
            Sprite::Explosion(explosion.frame),
            layers::ABOVE,
        );
    }
}

fn render_cells(cells: &[Tile], templates: &[TileTemplate], sink: &mut dyn RenderSink) {
    for (index, tile) in cells.iter().enumerate() {
        if tile.is_empty() {
            continue;
        }
        let Some(template) = templates.get(tile.template as usize) else {
            continue;
        };
        let layer = match template.flag {
            TileFlag::Above => layers::ABOVE,
            TileFlag::Below => layers::BELOW,
            TileFlag::Solid | TileFlag::Bulletpass => layers::TILES,
        };
        let x = (index % GRID_WIDTH as usize) as i32;
        let y = (index / GRID_WIDTH as usize) as i32;
        sink.draw_sprite(
            cell_center(x, y),
            vec2(CELL_SIZE, CELL_SIZE),
            template.rotation as f32 * 90.0,
            Sprite::Tile(template.layer_index),
            layer,
        );
    }
}

fn cell_center(x: i32, y: i32) -> Vector2 {
    vec2((x as f32 + 0.5) * CELL_SIZE, (y as f32 + 0.5) * CELL_SIZE)
}

/// Invulnerable tanks blink at 10 Hz by skipping alternate draw windows.
fn invuln_blink(player: &Player) -> bool {
    player.invuln_timer > 0.0 && (player.invuln_timer * 10.0) as i32 % 2 == 0
}

fn center_text(sink: &mut dyn RenderSink, y: f32, scale: f32, color: Color, text: &str) {
    // Rough centering from character count; good enough for a fixed-width
    // debug font.
    let width = text.len() as f32 * scale * 0.5;
    sink.draw_text(
        vec2((FIELD_TILES_X as f32 - width) * 0.5, y),
        scale,
        color,
        text,
    );
}
