use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::error::LoadError;

use super::{Tile, EMPTY_TILE};

/// Level files are a flat whitespace-separated grid of
/// `(template_index, health)` pairs, row-major, one grid row per line.
/// Empty cells serialize as `-1 0`. The format round-trips byte-identically.
pub fn parse_grid(text: &str) -> Result<Vec<Tile>, String> {
    let expected = (GRID_WIDTH * GRID_HEIGHT) as usize;
    let mut values = Vec::with_capacity(expected * 2);
    for token in text.split_whitespace() {
        let value: i64 = token
            .parse()
            .map_err(|_| format!("bad grid value '{token}'"))?;
        values.push(value);
    }
    if values.len() != expected * 2 {
        return Err(format!(
            "expected {} values for a {}x{} grid, found {}",
            expected * 2,
            GRID_WIDTH,
            GRID_HEIGHT,
            values.len()
        ));
    }
    let mut cells = Vec::with_capacity(expected);
    for pair in values.chunks_exact(2) {
        let (template, health) = (pair[0], pair[1]);
        if template < 0 {
            cells.push(Tile::EMPTY);
            continue;
        }
        let template =
            u32::try_from(template).map_err(|_| format!("template index {template} out of range"))?;
        let health =
            u32::try_from(health).map_err(|_| format!("tile health {health} out of range"))?;
        cells.push(Tile { template, health });
    }
    Ok(cells)
}

pub fn format_grid(cells: &[Tile]) -> String {
    debug_assert_eq!(cells.len(), (GRID_WIDTH * GRID_HEIGHT) as usize);
    let mut out = String::new();
    for row in cells.chunks(GRID_WIDTH as usize) {
        let mut first = true;
        for tile in row {
            if !first {
                out.push(' ');
            }
            first = false;
            if tile.template == EMPTY_TILE {
                out.push_str("-1 0");
            } else {
                let _ = write!(out, "{} {}", tile.template, tile.health);
            }
        }
        out.push('\n');
    }
    out
}

pub fn load_level(path: &Path) -> Result<Vec<Tile>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(&text).map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        line: 0,
        message,
    })
}

pub fn save_level(path: &Path, cells: &[Tile]) -> Result<(), LoadError> {
    fs::write(path, format_grid(cells)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
