use raylib::prelude::{Color, Vector2};

/// Opaque sprite handles: the kernel says what to draw, never how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    /// A tile drawn with its template's visual layer index.
    Tile(u32),
    PlayerTank,
    EnemyTank,
    Bullet,
    Eagle,
    EagleRuined,
    SpawnEffect(u32),
    Explosion(u32),
    Cursor,
}

pub mod layers {
    pub const BELOW: i32 = 0;
    pub const TILES: i32 = 1;
    pub const ENTITIES: i32 = 2;
    pub const ABOVE: i32 = 3;
    pub const HUD: i32 = 4;
}

/// Drawing capability consumed by the kernel. Positions and sizes are in
/// display-tile units, with `position` naming the sprite center; rotation is
/// degrees clockwise about that center. The kernel never queries pixel data
/// back.
pub trait RenderSink {
    fn draw_sprite(
        &mut self,
        position: Vector2,
        size: Vector2,
        rotation: f32,
        sprite: Sprite,
        layer: i32,
    );

    fn draw_text(&mut self, position: Vector2, scale: f32, color: Color, text: &str);
}
