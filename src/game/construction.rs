use std::path::PathBuf;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::input::{Button, InputSnapshot};
use crate::world::{load_level, save_level, Tile, TileGrid, TileTemplate};

/// The level editor scene. The save/load path is supplied by the caller at
/// startup; there is no file dialog in the kernel.
pub struct Construction {
    pub grid: TileGrid,
    pub current_template: u32,
    pub cursor_cell: (i32, i32),
    pub status: Option<String>,
    path: PathBuf,
}

impl Construction {
    pub fn new(path: PathBuf) -> Self {
        Self {
            grid: TileGrid::empty(),
            current_template: 0,
            cursor_cell: (0, 0),
            status: None,
            path,
        }
    }

    pub(super) fn update(&mut self, templates: &[TileTemplate], input: &InputSnapshot) {
        let mouse = input.mouse_position();
        self.cursor_cell = (
            ((mouse.x * 2.0).floor() as i32).clamp(0, GRID_WIDTH - 1),
            ((mouse.y * 2.0).floor() as i32).clamp(0, GRID_HEIGHT - 1),
        );

        let count = templates.len() as u32;
        if input.was_pressed(Button::NextTemplate) {
            self.current_template = (self.current_template + 1) % count;
        }
        if input.was_pressed(Button::PrevTemplate) {
            self.current_template = (self.current_template + count - 1) % count;
        }

        let (cx, cy) = self.cursor_cell;
        if input.is_down(Button::Place) {
            // Loaded files can carry indices outside the catalog; an unknown
            // brush paints nothing rather than panicking.
            if let Some(template) = templates.get(self.current_template as usize) {
                self.grid
                    .set_cell(cx, cy, Tile::from_template(self.current_template, template));
            }
        } else if input.is_down(Button::Erase) {
            self.grid.set_cell(cx, cy, Tile::EMPTY);
        } else if input.was_pressed(Button::Sample) {
            let tile = self.grid.cell(cx, cy);
            if !tile.is_empty() && (tile.template as usize) < templates.len() {
                self.current_template = tile.template;
            }
        }

        if input.was_pressed(Button::Save) {
            match save_level(&self.path, self.grid.cells()) {
                Ok(()) => {
                    log::info!("saved map to {}", self.path.display());
                    self.status = Some(format!("saved {}", self.path.display()));
                }
                Err(err) => {
                    log::error!("map save failed: {err}");
                    self.status = Some(err.to_string());
                }
            }
        }
        if input.was_pressed(Button::Load) {
            match load_level(&self.path) {
                Ok(cells) => {
                    log::info!("loaded map from {}", self.path.display());
                    self.grid = TileGrid::from_cells(cells);
                    self.status = Some(format!("loaded {}", self.path.display()));
                }
                Err(err) => {
                    log::warn!("map load failed: {err}");
                    self.status = Some(err.to_string());
                }
            }
        }
    }
}
