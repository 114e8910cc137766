//! End-to-end scene flows driven purely through the public surface: synthetic
//! input snapshots in, scene transitions and battlefield observations out.

use eagle_tanks::config::{ENEMY_CAP, INTRO_TIME};
use eagle_tanks::game::{Game, GameMode, LoadedLevel, Scene};
use eagle_tanks::input::{Button, InputSnapshot};
use eagle_tanks::math::vec2;
use eagle_tanks::world::{parse_tile_templates, Tile, TileTemplate};

const CATALOG: &str = "\
# layer health rotation flag
0 2 0 solid
1 4294967295 0 solid
2 4294967295 0 bulletpass
3 4294967295 0 above
";

fn catalog() -> Vec<TileTemplate> {
    parse_tile_templates(CATALOG).unwrap()
}

fn empty_cells() -> Vec<Tile> {
    vec![Tile::EMPTY; 32 * 24]
}

fn new_game(scratch: &tempfile::TempDir) -> Game {
    let levels = vec![
        LoadedLevel {
            name: "level1".to_string(),
            cells: empty_cells(),
        },
        LoadedLevel {
            name: "level2".to_string(),
            cells: empty_cells(),
        },
    ];
    Game::new(42, catalog(), levels, scratch.path().join("custom.txt"))
}

fn press(game: &mut Game, button: Button) {
    game.update(0.016, &InputSnapshot::empty().with_pressed(button));
}

fn idle_frames(game: &mut Game, frames: usize) {
    for _ in 0..frames {
        game.update(0.016, &InputSnapshot::empty());
    }
}

#[test]
fn menu_to_gameplay_and_back() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    assert_eq!(game.scene(), Scene::MainMenu);

    press(&mut game, Button::Confirm);
    assert_eq!(game.scene(), Scene::Intro(GameMode::OnePlayer));
    game.update(INTRO_TIME + 0.1, &InputSnapshot::empty());
    assert_eq!(game.scene(), Scene::Playing(GameMode::OnePlayer));

    press(&mut game, Button::Cancel);
    assert_eq!(game.scene(), Scene::MainMenu);
    assert!(!game.quit_requested());
}

#[test]
fn cancel_on_the_menu_quits() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    press(&mut game, Button::Cancel);
    assert!(game.quit_requested());
}

#[test]
fn wave_spawns_under_the_cap_while_playing() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    press(&mut game, Button::Confirm);
    game.update(INTRO_TIME + 0.1, &InputSnapshot::empty());

    let mut seen_any = false;
    for _ in 0..1200 {
        game.update(0.016, &InputSnapshot::empty());
        let live = game.battlefield().live_enemy_count();
        seen_any |= live > 0;
        assert!(live <= ENEMY_CAP);
    }
    assert!(seen_any, "no enemy ever spawned");
}

#[test]
fn holding_fire_produces_player_bullets() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    press(&mut game, Button::Confirm);
    game.update(INTRO_TIME + 0.1, &InputSnapshot::empty());

    game.update(0.016, &InputSnapshot::empty().with_down(Button::P1Fire));
    let bullets = &game.battlefield().bullets;
    assert_eq!(bullets.len(), 1);
    assert!(bullets[0].fired_by_player);
}

#[test]
fn level_select_starts_the_picked_stage() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    press(&mut game, Button::P1Down);
    press(&mut game, Button::P1Down);
    press(&mut game, Button::Confirm);
    assert_eq!(game.scene(), Scene::LevelSelect);

    press(&mut game, Button::P1Right);
    press(&mut game, Button::Confirm);
    assert_eq!(game.scene(), Scene::Intro(GameMode::OnePlayer));
    assert_eq!(game.stage(), 1);
}

#[test]
fn construction_edits_survive_a_save_load_cycle() {
    let scratch = tempfile::tempdir().unwrap();
    let mut game = new_game(&scratch);
    for _ in 0..3 {
        press(&mut game, Button::P1Down);
    }
    press(&mut game, Button::Confirm);
    assert_eq!(game.scene(), Scene::Construction);

    let at = InputSnapshot::empty().with_mouse(vec2(3.3, 2.1));
    game.update(0.016, &at.clone().with_down(Button::Place));
    assert_eq!(game.construction().grid.cell(6, 4).template, 0);

    game.update(0.016, &InputSnapshot::empty().with_pressed(Button::Save));
    game.update(0.016, &at.with_down(Button::Erase));
    assert!(game.construction().grid.cell(6, 4).is_empty());

    game.update(0.016, &InputSnapshot::empty().with_pressed(Button::Load));
    assert_eq!(game.construction().grid.cell(6, 4).template, 0);

    press(&mut game, Button::Cancel);
    assert_eq!(game.scene(), Scene::MainMenu);
}
