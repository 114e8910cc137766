use raylib::prelude::Vector2;

use crate::math::vec2;

/// Logical buttons the kernel understands. The binary maps physical
/// keys/mouse onto these once per frame; tests synthesize them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    P1Up,
    P1Down,
    P1Left,
    P1Right,
    P1Fire,
    P2Up,
    P2Down,
    P2Left,
    P2Right,
    P2Fire,
    Confirm,
    Cancel,
    Place,
    Erase,
    Sample,
    NextTemplate,
    PrevTemplate,
    Save,
    Load,
}

impl Button {
    pub const COUNT: usize = 19;

    fn index(self) -> usize {
        self as usize
    }
}

/// Read-only per-frame input snapshot. `was_pressed` is edge-triggered and
/// valid for exactly one frame; no scene ever sees stale input.
#[derive(Clone, Debug)]
pub struct InputSnapshot {
    down: [bool; Button::COUNT],
    pressed: [bool; Button::COUNT],
    mouse: Vector2,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self {
            down: [false; Button::COUNT],
            pressed: [false; Button::COUNT],
            mouse: vec2(0.0, 0.0),
        }
    }

    pub fn set_down(&mut self, button: Button) {
        self.down[button.index()] = true;
    }

    /// A press implies the key is also down this frame.
    pub fn set_pressed(&mut self, button: Button) {
        self.pressed[button.index()] = true;
        self.down[button.index()] = true;
    }

    pub fn set_mouse(&mut self, pos: Vector2) {
        self.mouse = pos;
    }

    pub fn with_down(mut self, button: Button) -> Self {
        self.set_down(button);
        self
    }

    pub fn with_pressed(mut self, button: Button) -> Self {
        self.set_pressed(button);
        self
    }

    pub fn with_mouse(mut self, pos: Vector2) -> Self {
        self.set_mouse(pos);
        self
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.down[button.index()]
    }

    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Mouse position in playfield (display-tile) coordinates.
    pub fn mouse_position(&self) -> Vector2 {
        self.mouse
    }
}
