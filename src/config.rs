use raylib::prelude::Vector2;

pub const WINDOW_WIDTH: i32 = 1024;
pub const WINDOW_HEIGHT: i32 = 768;
pub const TILE_PIXELS: f32 = 64.0;

// Playfield measured in display tiles; the collision grid runs at double
// resolution, so one collision cell is half a tile.
pub const FIELD_TILES_X: i32 = 16;
pub const FIELD_TILES_Y: i32 = 12;
pub const GRID_WIDTH: i32 = FIELD_TILES_X * 2;
pub const GRID_HEIGHT: i32 = FIELD_TILES_Y * 2;
pub const CELL_SIZE: f32 = 0.5;
pub const COLLISION_EPSILON: f32 = 0.01;

pub const TANK_SIZE: f32 = 1.0;
pub const PLAYER_SPEED: f32 = 2.6;
pub const ENEMY_SPEED: f32 = 2.0;
pub const BULLET_SPEED: f32 = 6.5;
pub const BULLET_SIZE: f32 = 0.25;
pub const BULLET_SPAWN_OFFSET: f32 = 0.55;

pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_FIRE_COOLDOWN: f32 = 0.45;
pub const PLAYER_RESPAWN_TIME: f32 = 2.0;
pub const PLAYER_INVULN_TIME: f32 = 3.0;

pub const ENEMY_SHOOT_COOLDOWN: f32 = 1.1;
pub const ENEMY_REACTION_TIME: f32 = 0.6;
pub const ENEMY_DIR_INTERVAL: f32 = 0.15;
pub const ENEMY_HOP_LIMIT: u32 = 4;
pub const ENEMY_CAP: usize = 3;
pub const ENEMIES_PER_STAGE: u32 = 12;
pub const ENEMY_SPAWN_INTERVAL: f32 = 3.0;

pub const SPOT_EAGLE_CHANCE: f32 = 0.40;
pub const SPOT_PLAYER_TURN_CHANCE: f32 = 0.40;
pub const SPOT_PLAYER_REVERSE_CHANCE: f32 = 0.15;
pub const WANDER_TURN_CHANCE: f32 = 0.10;
pub const OPEN_PATH_DISTANCE: f32 = 1.0;

pub const WIN_DELAY: f32 = 3.0;
pub const LOSE_DELAY: f32 = 1.0;
pub const INTRO_TIME: f32 = 2.0;
pub const OUTRO_TIME: f32 = 2.5;

pub const EXPLOSION_FRAMES: u32 = 4;
pub const EXPLOSION_FRAME_TIME: f32 = 0.08;
pub const SPAWN_EFFECT_FRAMES: u32 = 4;
pub const SPAWN_EFFECT_FRAME_TIME: f32 = 0.12;

pub const BULLET_PAIR_DISTANCE: f32 = 0.3;

pub const EAGLE_POS: Vector2 = Vector2 { x: 8.0, y: 10.0 };
pub const ENEMY_SPAWN_POINTS: [Vector2; 3] = [
    Vector2 { x: 1.0, y: 1.0 },
    Vector2 { x: 8.0, y: 1.0 },
    Vector2 { x: 15.0, y: 1.0 },
];
pub const PLAYER_SPAWN_POINTS: [Vector2; 2] = [
    Vector2 { x: 5.5, y: 10.5 },
    Vector2 { x: 10.5, y: 10.5 },
];
