use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Health value that marks a tile (or template) as indestructible.
pub const INDESTRUCTIBLE: u32 = u32::MAX;

/// Template index that marks a grid cell as empty.
pub const EMPTY_TILE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFlag {
    /// Blocks tanks and bullets; bullets consume its health.
    Solid,
    /// Draw under entities, never collides.
    Below,
    /// Draw over entities, never collides.
    Above,
    /// Blocks tanks, lets bullets through.
    Bulletpass,
}

/// Shared visual/behavior archetype. Loaded once from the catalog file and
/// referenced by index, never duplicated.
#[derive(Clone, Copy, Debug)]
pub struct TileTemplate {
    pub layer_index: u32,
    pub health: u32,
    /// One of four 90-degree steps (0..4).
    pub rotation: u8,
    pub flag: TileFlag,
}

/// Per-cell mutable state. Health starts as a copy of the template's and
/// decrements independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub template: u32,
    pub health: u32,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        template: EMPTY_TILE,
        health: 0,
    };

    pub fn from_template(index: u32, template: &TileTemplate) -> Self {
        Self {
            template: index,
            health: template.health,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.template == EMPTY_TILE
    }
}

/// Catalog file: one `layer health rotation(0-3) flag` line per template;
/// `#` comments and blank lines are skipped. Malformed lines abort the load.
pub fn load_tile_templates(path: &Path) -> Result<Vec<TileTemplate>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tile_templates(&text).map_err(|(line, message)| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

pub fn parse_tile_templates(text: &str) -> Result<Vec<TileTemplate>, (usize, String)> {
    let mut templates = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line_no = number + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let layer_index = parse_field(&mut fields, line_no, "layer index")?;
        let health = parse_field(&mut fields, line_no, "health")?;
        let rotation: u32 = parse_field(&mut fields, line_no, "rotation")?;
        if rotation > 3 {
            return Err((line_no, format!("rotation {rotation} out of range 0-3")));
        }
        let flag = match fields.next() {
            Some("solid") => TileFlag::Solid,
            Some("below") => TileFlag::Below,
            Some("above") => TileFlag::Above,
            Some("bulletpass") => TileFlag::Bulletpass,
            Some(other) => return Err((line_no, format!("unknown tile flag '{other}'"))),
            None => return Err((line_no, "missing tile flag".to_string())),
        };
        if fields.next().is_some() {
            return Err((line_no, "trailing fields after tile flag".to_string()));
        }
        templates.push(TileTemplate {
            layer_index,
            health,
            rotation: rotation as u8,
            flag,
        });
    }
    Ok(templates)
}

fn parse_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &str,
) -> Result<u32, (usize, String)> {
    let token = fields
        .next()
        .ok_or_else(|| (line, format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| (line, format!("bad {name} '{token}'")))
}
