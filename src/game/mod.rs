mod bullets;
mod construction;
mod enemy;
mod player;
mod render;
mod update;

use std::path::PathBuf;

use rand::{rngs::SmallRng, SeedableRng};
use raylib::prelude::Vector2;

use crate::config::{
    EAGLE_POS, ENEMIES_PER_STAGE, ENEMY_CAP, EXPLOSION_FRAMES, EXPLOSION_FRAME_TIME,
    FIELD_TILES_X, FIELD_TILES_Y, PLAYER_LIVES, PLAYER_SPAWN_POINTS, SPAWN_EFFECT_FRAMES,
    SPAWN_EFFECT_FRAME_TIME, TANK_SIZE,
};
use crate::entities::{Bullet, Eagle, Explosion, Player, SpawnEffect, Tank};
use crate::math::{rect_center, vec2, vec2_add, vec2_scale};
use crate::world::{resolve, RayTargets, Tile, TileGrid, TileTemplate};

pub use construction::Construction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    OnePlayer,
    TwoPlayers,
}

impl GameMode {
    pub fn player_count(self) -> usize {
        match self {
            GameMode::OnePlayer => 1,
            GameMode::TwoPlayers => 2,
        }
    }
}

/// The single discriminant of kernel behavior. Exactly one scene is active;
/// transitions are explicit assignments driven by input or timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    Intro(GameMode),
    Playing(GameMode),
    Outro(GameMode),
    Construction,
    LevelSelect,
    GameOver(GameMode),
    Victory(GameMode),
}

/// Enemy wave bookkeeping: how many are still to appear, the cadence, and
/// the on-screen cap.
#[derive(Clone, Debug)]
pub struct Spawner {
    pub remaining: u32,
    pub timer: f32,
    pub cap: usize,
    pub next_point: usize,
}

impl Spawner {
    pub fn new(remaining: u32, cap: usize) -> Self {
        Self {
            remaining,
            timer: 0.0,
            cap,
            next_point: 0,
        }
    }
}

/// All mutable simulation state for one stage, owned by the scene machine
/// and borrowed into each subsystem call. No module-level state anywhere.
#[derive(Clone, Debug)]
pub struct Battlefield {
    pub grid: TileGrid,
    pub eagle: Eagle,
    pub players: Vec<Player>,
    pub enemies: Vec<Tank>,
    pub bullets: Vec<Bullet>,
    pub spawner: Spawner,
    pub spawn_effects: Vec<SpawnEffect>,
    pub explosions: Vec<Explosion>,
    pub lose_timer: Option<f32>,
    pub win_timer: Option<f32>,
}

impl Battlefield {
    pub fn new(cells: Vec<Tile>, mode: GameMode) -> Self {
        let players = (0..mode.player_count())
            .map(|index| Player::new(PLAYER_SPAWN_POINTS[index], PLAYER_LIVES))
            .collect();
        Self {
            grid: TileGrid::from_cells(cells),
            eagle: Eagle::new(EAGLE_POS),
            players,
            enemies: Vec::new(),
            bullets: Vec::new(),
            spawner: Spawner::new(ENEMIES_PER_STAGE, ENEMY_CAP),
            spawn_effects: Vec::new(),
            explosions: Vec::new(),
            lose_timer: None,
            win_timer: None,
        }
    }

    /// Raycast targets as of the current frame: the live base plus each
    /// live player tank, by player index.
    pub fn ray_targets(&self) -> RayTargets {
        let mut targets = RayTargets {
            eagle: (!self.eagle.destroyed).then(|| self.eagle.bounds()),
            players: [None, None],
        };
        for (index, player) in self.players.iter().enumerate() {
            if !player.tank.destroyed {
                targets.players[index] = Some(player.tank.bounds());
            }
        }
        targets
    }

    pub fn add_explosion(&mut self, pos: Vector2) {
        self.explosions.push(Explosion {
            pos,
            frame: 0,
            timer: EXPLOSION_FRAME_TIME,
        });
    }

    pub fn add_spawn_effect(&mut self, pos: Vector2) {
        self.spawn_effects.push(SpawnEffect {
            pos,
            frame: 0,
            timer: SPAWN_EFFECT_FRAME_TIME,
        });
    }

    /// Arm the loss countdown once; later defeats never shorten it.
    pub fn arm_lose_timer(&mut self, delay: f32) {
        if self.lose_timer.is_none() {
            self.lose_timer = Some(delay);
        }
    }

    pub fn all_players_out(&self) -> bool {
        self.players.iter().all(Player::out_of_lives)
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.destroyed).count()
    }

    fn update_effects(&mut self, dt: f32) {
        self.explosions.retain_mut(|explosion| {
            explosion.timer -= dt;
            if explosion.timer <= 0.0 {
                explosion.frame += 1;
                explosion.timer = EXPLOSION_FRAME_TIME;
            }
            explosion.frame < EXPLOSION_FRAMES
        });
        self.spawn_effects.retain_mut(|effect| {
            effect.timer -= dt;
            if effect.timer <= 0.0 {
                effect.frame += 1;
                effect.timer = SPAWN_EFFECT_FRAME_TIME;
            }
            effect.frame < SPAWN_EFFECT_FRAMES
        });
    }

    /// Drop everything marked destroyed this frame. Runs once, after all
    /// per-entity logic, so nothing is erased mid-iteration.
    fn compact(&mut self) {
        self.bullets.retain(|bullet| !bullet.destroyed);
        self.enemies.retain(|enemy| !enemy.destroyed);
    }
}

/// One loaded map: display name plus its raw grid cells.
#[derive(Clone, Debug)]
pub struct LoadedLevel {
    pub name: String,
    pub cells: Vec<Tile>,
}

/// Move a tank one step along `dir`, clipped by the collision resolver
/// (tank mode) and clamped to the playfield. Returns false when the move
/// was blocked by either. Shared by the player controller and the enemy AI.
pub(crate) fn advance_tank(
    tank: &mut Tank,
    speed: f32,
    grid: &TileGrid,
    templates: &[TileTemplate],
    dt: f32,
) -> bool {
    let new_pos = vec2_add(tank.pos, vec2_scale(tank.dir.vector(), speed * dt));
    let mut rect = crate::math::centered_rect(new_pos, TANK_SIZE, TANK_SIZE);
    let mut blocked = false;
    if let Some(hit) = resolve(grid, templates, rect, tank.dir, false) {
        rect.x = hit.position.x;
        rect.y = hit.position.y;
        blocked = true;
    }
    let mut center = rect_center(&rect);
    let half = TANK_SIZE * 0.5;
    let clamped = vec2(
        center.x.clamp(half, FIELD_TILES_X as f32 - half),
        center.y.clamp(half, FIELD_TILES_Y as f32 - half),
    );
    if clamped.x != center.x || clamped.y != center.y {
        blocked = true;
        center = clamped;
    }
    tank.pos = center;
    !blocked
}

pub struct Game {
    scene: Scene,
    menu_choice: usize,
    scene_timer: f32,
    stage: usize,
    preview: usize,
    templates: Vec<TileTemplate>,
    levels: Vec<LoadedLevel>,
    battlefield: Battlefield,
    construction: Construction,
    rng: SmallRng,
    quit: bool,
}

impl Game {
    pub fn new(
        seed: u64,
        templates: Vec<TileTemplate>,
        levels: Vec<LoadedLevel>,
        construction_path: PathBuf,
    ) -> Self {
        assert!(!templates.is_empty(), "tile template catalog is empty");
        assert!(!levels.is_empty(), "no levels loaded");
        let battlefield = Battlefield::new(levels[0].cells.clone(), GameMode::OnePlayer);
        Self {
            scene: Scene::MainMenu,
            menu_choice: 0,
            scene_timer: 0.0,
            stage: 0,
            preview: 0,
            templates,
            levels,
            battlefield,
            construction: Construction::new(construction_path),
            rng: SmallRng::seed_from_u64(seed),
            quit: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn construction(&self) -> &Construction {
        &self.construction
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn enter_intro(&mut self, mode: GameMode) {
        log::info!(
            "starting stage {} ({:?})",
            self.stage + 1,
            mode
        );
        self.battlefield = Battlefield::new(self.levels[self.stage].cells.clone(), mode);
        self.scene_timer = crate::config::INTRO_TIME;
        self.scene = Scene::Intro(mode);
    }

    /// Bullet spawn position: a facing-specific offset from the tank center.
    pub(crate) fn muzzle(tank: &Tank) -> Vector2 {
        vec2_add(
            tank.pos,
            vec2_scale(tank.dir.vector(), crate::config::BULLET_SPAWN_OFFSET),
        )
    }

    pub(crate) fn fire(tank: &Tank, fired_by_player: bool, out: &mut Vec<Bullet>) {
        out.push(Bullet::new(Self::muzzle(tank), tank.dir, fired_by_player));
    }
}
