use raylib::prelude::{Rectangle, Vector2};

use crate::config::{
    ENEMY_DIR_INTERVAL, ENEMY_HOP_LIMIT, ENEMY_REACTION_TIME, ENEMY_SHOOT_COOLDOWN, TANK_SIZE,
};
use crate::math::{centered_rect, vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub fn vector(self) -> Vector2 {
        match self {
            Direction::Right => vec2(1.0, 0.0),
            Direction::Down => vec2(0.0, 1.0),
            Direction::Left => vec2(-1.0, 0.0),
            Direction::Up => vec2(0.0, -1.0),
        }
    }

    /// Sprite rotation in degrees, for the render sink.
    pub fn rotation(self) -> f32 {
        match self {
            Direction::Right => 90.0,
            Direction::Down => 180.0,
            Direction::Left => 270.0,
            Direction::Up => 0.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Screen coordinates run y-down, so "left of Right" is Up.
    pub fn left(self) -> Direction {
        match self {
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Up => Direction::Left,
        }
    }

    pub fn right(self) -> Direction {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }
}

/// One tank, player-driven or AI-driven. The AI timers sit idle on player
/// tanks; the player controller only touches `fire_cooldown`.
#[derive(Clone, Debug)]
pub struct Tank {
    pub pos: Vector2,
    pub dir: Direction,
    pub destroyed: bool,
    pub fire_cooldown: f32,
    pub dir_timer: f32,
    pub reaction_timer: f32,
    pub hops_until_shoot: u32,
}

impl Tank {
    pub fn new(pos: Vector2, dir: Direction) -> Self {
        Self {
            pos,
            dir,
            destroyed: false,
            fire_cooldown: 0.0,
            dir_timer: ENEMY_DIR_INTERVAL,
            reaction_timer: 0.0,
            hops_until_shoot: ENEMY_HOP_LIMIT,
        }
    }

    /// Freshly spawned enemies hold fire until the reaction timer runs out.
    pub fn enemy(pos: Vector2, dir: Direction) -> Self {
        Self {
            fire_cooldown: ENEMY_SHOOT_COOLDOWN,
            reaction_timer: ENEMY_REACTION_TIME,
            ..Tank::new(pos, dir)
        }
    }

    pub fn bounds(&self) -> Rectangle {
        centered_rect(self.pos, TANK_SIZE, TANK_SIZE)
    }
}

// Bullet collision boxes per facing, offset from the bullet position:
// a quarter-tile square hugging the leading tip rather than the sprite.
const BULLET_BOXES: [[f32; 4]; 4] = [
    [0.0, -0.125, 0.25, 0.25],   // Right
    [-0.125, 0.0, 0.25, 0.25],   // Down
    [-0.25, -0.125, 0.25, 0.25], // Left
    [-0.125, -0.25, 0.25, 0.25], // Up
];

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vector2,
    pub dir: Direction,
    pub fired_by_player: bool,
    pub destroyed: bool,
}

impl Bullet {
    pub fn new(pos: Vector2, dir: Direction, fired_by_player: bool) -> Self {
        Self {
            pos,
            dir,
            fired_by_player,
            destroyed: false,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        let [dx, dy, w, h] = BULLET_BOXES[self.dir.index()];
        Rectangle {
            x: self.pos.x + dx,
            y: self.pos.y + dy,
            width: w,
            height: h,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Eagle {
    pub pos: Vector2,
    pub destroyed: bool,
}

impl Eagle {
    pub fn new(pos: Vector2) -> Self {
        Self {
            pos,
            destroyed: false,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        centered_rect(self.pos, 1.0, 1.0)
    }
}

/// A player is exactly one of: alive and controllable, destroyed and
/// counting down to respawn, or destroyed with zero lives left.
#[derive(Clone, Debug)]
pub struct Player {
    pub tank: Tank,
    pub lives: u32,
    pub respawn_timer: f32,
    pub invuln_timer: f32,
}

impl Player {
    pub fn new(spawn: Vector2, lives: u32) -> Self {
        Self {
            tank: Tank::new(spawn, Direction::Up),
            lives,
            respawn_timer: 0.0,
            invuln_timer: 0.0,
        }
    }

    pub fn out_of_lives(&self) -> bool {
        self.tank.destroyed && self.lives == 0
    }
}

#[derive(Clone, Debug)]
pub struct SpawnEffect {
    pub pos: Vector2,
    pub frame: u32,
    pub timer: f32,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub pos: Vector2,
    pub frame: u32,
    pub timer: f32,
}
