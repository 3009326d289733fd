use serde::{Deserialize, Serialize};

/// Columns a single tile occupies on screen
pub const TILE_COLUMNS: u16 = 2;
/// Rows a single tile occupies on screen
pub const TILE_ROWS: u16 = 1;
/// Cells the grid's frame adds along each axis
pub const GRID_BORDER: u16 = 2;

/// Widest grid whose framed width still fits in a terminal coordinate
pub const MAX_GRID_WIDTH: usize = ((u16::MAX - GRID_BORDER) / TILE_COLUMNS) as usize;
/// Tallest grid whose framed height still fits in a terminal coordinate
pub const MAX_GRID_HEIGHT: usize = ((u16::MAX - GRID_BORDER) / TILE_ROWS) as usize;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in tiles
    pub grid_width: usize,
    /// Height of the game grid in tiles
    pub grid_height: usize,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Never place food on a cell the snake occupies.
    ///
    /// Off by default: food is sampled over the whole grid and may land on the
    /// body.
    pub food_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 100,
            food_avoids_snake: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Size the grid to fill a viewport, keeping the tile size constant
    ///
    /// Each dimension is the viewport size divided by the tile size, rounded
    /// down, and never less than one tile.
    pub fn from_viewport(columns: u16, rows: u16, tile_columns: u16, tile_rows: u16) -> Self {
        let width = (columns / tile_columns.max(1)).max(1);
        let height = (rows / tile_rows.max(1)).max(1);
        Self::new(width as usize, height as usize)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_WIDTH || self.grid_height > MAX_GRID_HEIGHT {
            return Err(format!(
                "grid must be at most {}x{}, got {}x{}",
                MAX_GRID_WIDTH, MAX_GRID_HEIGHT, self.grid_width, self.grid_height
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        Ok(())
    }
}
