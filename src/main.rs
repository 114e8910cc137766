use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use raylib::prelude::*;

use eagle_tanks::config::{TILE_PIXELS, WINDOW_HEIGHT, WINDOW_WIDTH};
use eagle_tanks::game::{Game, LoadedLevel};
use eagle_tanks::input::{Button, InputSnapshot};
use eagle_tanks::render::{RenderSink, Sprite};
use eagle_tanks::world::{load_level, load_tile_templates};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let templates = load_tile_templates(Path::new("assets/tile_templates.txt"))?;
    let levels = load_levels(Path::new("assets/levels"))?;
    log::info!("loaded {} templates, {} levels", templates.len(), levels.len());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let mut game = Game::new(
        seed,
        templates,
        levels,
        PathBuf::from("assets/levels/custom.txt"),
    );

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Eagle Tanks")
        .build();
    rl.set_target_fps(60);
    // Escape is a game button, not the window close key.
    rl.set_exit_key(None);

    let mut sink = FrameSink::default();
    while !rl.window_should_close() && !game.quit_requested() {
        let input = sample_input(&rl);
        game.update(rl.get_frame_time(), &input);

        sink.clear();
        game.render(&mut sink);
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        sink.flush(&mut d);
    }
    Ok(())
}

/// Every `.txt` under the level directory, in filename order, except the
/// construction scratch file. A level that fails to parse aborts startup.
fn load_levels(dir: &Path) -> Result<Vec<LoadedLevel>, Box<dyn Error>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .filter(|path| path.file_stem().is_some_and(|stem| stem != "custom"))
        .collect();
    paths.sort_by_key(|path| level_order(path));

    let mut levels = Vec::new();
    for path in paths {
        let cells = load_level(&path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        levels.push(LoadedLevel { name, cells });
    }
    Ok(levels)
}

/// Sort key splitting a trailing stage number off the file stem, so
/// `level10` sorts after `level2` instead of between `level1` and `level2`.
fn level_order(path: &Path) -> (String, u32) {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = stem.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = stem[prefix.len()..].parse().unwrap_or(0);
    (prefix.to_string(), number)
}

const KEY_BINDINGS: [(KeyboardKey, Button); 16] = [
    (KeyboardKey::KEY_UP, Button::P1Up),
    (KeyboardKey::KEY_DOWN, Button::P1Down),
    (KeyboardKey::KEY_LEFT, Button::P1Left),
    (KeyboardKey::KEY_RIGHT, Button::P1Right),
    (KeyboardKey::KEY_SPACE, Button::P1Fire),
    (KeyboardKey::KEY_W, Button::P2Up),
    (KeyboardKey::KEY_S, Button::P2Down),
    (KeyboardKey::KEY_A, Button::P2Left),
    (KeyboardKey::KEY_D, Button::P2Right),
    (KeyboardKey::KEY_LEFT_SHIFT, Button::P2Fire),
    (KeyboardKey::KEY_ENTER, Button::Confirm),
    (KeyboardKey::KEY_ESCAPE, Button::Cancel),
    (KeyboardKey::KEY_Q, Button::PrevTemplate),
    (KeyboardKey::KEY_E, Button::NextTemplate),
    (KeyboardKey::KEY_F5, Button::Save),
    (KeyboardKey::KEY_F9, Button::Load),
];

const MOUSE_BINDINGS: [(MouseButton, Button); 3] = [
    (MouseButton::MOUSE_BUTTON_LEFT, Button::Place),
    (MouseButton::MOUSE_BUTTON_RIGHT, Button::Erase),
    (MouseButton::MOUSE_BUTTON_MIDDLE, Button::Sample),
];

fn sample_input(rl: &RaylibHandle) -> InputSnapshot {
    let mut input = InputSnapshot::empty();
    for (key, button) in KEY_BINDINGS {
        if rl.is_key_pressed(key) {
            input.set_pressed(button);
        } else if rl.is_key_down(key) {
            input.set_down(button);
        }
    }
    for (mouse, button) in MOUSE_BINDINGS {
        if rl.is_mouse_button_pressed(mouse) {
            input.set_pressed(button);
        } else if rl.is_mouse_button_down(mouse) {
            input.set_down(button);
        }
    }
    let mouse = rl.get_mouse_position();
    input.set_mouse(Vector2::new(mouse.x / TILE_PIXELS, mouse.y / TILE_PIXELS));
    input
}

enum DrawCommand {
    Sprite {
        position: Vector2,
        size: Vector2,
        rotation: f32,
        sprite: Sprite,
    },
    Text {
        position: Vector2,
        scale: f32,
        color: Color,
        text: String,
    },
}

/// Buffers one frame of draw calls and replays them sorted by layer, so the
/// painter's order matches the layer numbers rather than emission order.
#[derive(Default)]
struct FrameSink {
    commands: Vec<(i32, DrawCommand)>,
}

impl FrameSink {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn flush(&mut self, d: &mut impl RaylibDraw) {
        self.commands.sort_by_key(|(layer, _)| *layer);
        for (_, command) in &self.commands {
            match command {
                DrawCommand::Sprite {
                    position,
                    size,
                    rotation,
                    sprite,
                } => {
                    let rec = Rectangle {
                        x: position.x * TILE_PIXELS,
                        y: position.y * TILE_PIXELS,
                        width: size.x * TILE_PIXELS,
                        height: size.y * TILE_PIXELS,
                    };
                    let origin = Vector2::new(rec.width * 0.5, rec.height * 0.5);
                    d.draw_rectangle_pro(rec, origin, *rotation, sprite_color(*sprite));
                }
                DrawCommand::Text {
                    position,
                    scale,
                    color,
                    text,
                } => {
                    d.draw_text(
                        text,
                        (position.x * TILE_PIXELS) as i32,
                        (position.y * TILE_PIXELS) as i32,
                        (scale * TILE_PIXELS) as i32,
                        *color,
                    );
                }
            }
        }
    }
}

impl RenderSink for FrameSink {
    fn draw_sprite(
        &mut self,
        position: Vector2,
        size: Vector2,
        rotation: f32,
        sprite: Sprite,
        layer: i32,
    ) {
        self.commands.push((
            layer,
            DrawCommand::Sprite {
                position,
                size,
                rotation,
                sprite,
            },
        ));
    }

    fn draw_text(&mut self, position: Vector2, scale: f32, color: Color, text: &str) {
        self.commands.push((
            eagle_tanks::render::layers::HUD,
            DrawCommand::Text {
                position,
                scale,
                color,
                text: text.to_string(),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_files_sort_by_stage_number() {
        let mut paths: Vec<PathBuf> = ["level10.txt", "level2.txt", "level1.txt"]
            .iter()
            .map(PathBuf::from)
            .collect();
        paths.sort_by_key(|path| level_order(path));
        let stems: Vec<_> = paths
            .iter()
            .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(stems, ["level1", "level2", "level10"]);
    }
}

// Untextured stand-in palette. Tile colors index by the template's visual
// layer; effects fade out over their frames.
fn sprite_color(sprite: Sprite) -> Color {
    const TILE_PALETTE: [Color; 6] = [
        Color::ORANGE,
        Color::LIGHTGRAY,
        Color::DARKBLUE,
        Color::DARKGREEN,
        Color::BEIGE,
        Color::DARKPURPLE,
    ];
    match sprite {
        Sprite::Tile(layer_index) => TILE_PALETTE[layer_index as usize % TILE_PALETTE.len()],
        Sprite::PlayerTank => Color::YELLOW,
        Sprite::EnemyTank => Color::MAROON,
        Sprite::Bullet => Color::RAYWHITE,
        Sprite::Eagle => Color::GOLD,
        Sprite::EagleRuined => Color::DARKGRAY,
        Sprite::SpawnEffect(frame) => Color::SKYBLUE.fade(1.0 - frame as f32 * 0.2),
        Sprite::Explosion(frame) => Color::ORANGE.fade(1.0 - frame as f32 * 0.2),
        Sprite::Cursor => Color::LIME.fade(0.5),
    }
}
