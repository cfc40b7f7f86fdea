use glam::Vec2;
use thiserror::Error;

use crate::types::CellPos;

/// Errors reported by [`Config::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),
    #[error("viewport {width}x{height} is smaller than one {cell_size}px cell")]
    Viewport {
        width: f32,
        height: f32,
        cell_size: f32,
    },
    #[error("viewport {width}x{height} must be finite")]
    NonFiniteViewport { width: f32, height: f32 },
    #[error("grid of {width}x{height} cells exceeds the {max} cell limit")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("target frame rate must be non-zero")]
    Fps,
    #[error("tick divisor must be non-zero")]
    TickDivisor,
    #[error("seed density {0} must be between 0.0 and 1.0")]
    Density(f32),
}

/// Largest board [`Config::validate`] accepts, in cells.
pub const MAX_CELLS: usize = 1 << 26;

/// Display and simulation settings.
///
/// The defaults reproduce the compiled-in constants of the classic viewer:
/// an 800x800 window of 3px cells at 60 frames per second, stepping once
/// per rendered frame.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Window size in pixels.
    pub viewport: Vec2,
    /// Edge length of one cell in pixels.
    pub cell_size: f32,
    /// Target rendered frames per second.
    pub fps: u32,
    /// Rendered frames per simulation step.
    pub tick_divisor: u32,
    /// Fraction of `width * height` used as the random draw count when seeding.
    pub density: f32,
    /// Whether the grid lines are drawn under the cells.
    pub grid_lines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(800.0, 800.0),
            cell_size: 3.0,
            fps: 60,
            tick_divisor: 1,
            density: 0.5,
            grid_lines: true,
        }
    }
}

impl Config {
    /// Checks that every field describes a usable simulation.
    ///
    /// ### Returns
    /// - `Ok(())` if the grid has at least one cell and the cadence fields are non-zero.
    /// - `Err(ConfigError)` naming the first offending field otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !self.viewport.is_finite() {
            return Err(ConfigError::NonFiniteViewport {
                width: self.viewport.x,
                height: self.viewport.y,
            });
        }
        if self.viewport.x < self.cell_size || self.viewport.y < self.cell_size {
            return Err(ConfigError::Viewport {
                width: self.viewport.x,
                height: self.viewport.y,
                cell_size: self.cell_size,
            });
        }
        let (width, height) = self.grid_dims();
        if width.checked_mul(height).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_CELLS,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        if self.tick_divisor == 0 {
            return Err(ConfigError::TickDivisor);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        Ok(())
    }

    /// Grid dimensions in cells, `(width, height)`.
    ///
    /// Partial cells at the right and bottom edges of the viewport are dropped.
    pub fn grid_dims(&self) -> (usize, usize) {
        let w = (self.viewport.x / self.cell_size).floor() as usize;
        let h = (self.viewport.y / self.cell_size).floor() as usize;
        (w, h)
    }

    /// Maps a viewport-relative pixel position to the cell underneath it.
    ///
    /// ### Returns
    /// `None` when the position lies left of / above the viewport origin or
    /// beyond the last whole cell.
    pub fn cell_at(&self, pos: Vec2) -> Option<CellPos> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let cell = (pos / self.cell_size).floor();
        let (x, y) = (cell.x as usize, cell.y as usize);
        let (w, h) = self.grid_dims();
        (x < w && y < h).then_some((x, y))
    }

    /// Top-left pixel corner of the cell at `(x, y)`.
    #[inline]
    pub fn cell_origin(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.cell_size
    }
}
