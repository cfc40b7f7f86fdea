//! Core of a bounded Conway's Game of Life board, free of any graphics
//! dependency.
//!
//! Main components:
//! - [`grid`] — fixed-size cell storage and bulk edits (clear, randomize, stamp).
//! - [`step`] — neighbour counting and the synchronous generation update.
//! - [`patterns`] — seed templates such as the glider.
//! - [`config`] — board geometry, cadence and their validation.
//! - [`simulation`] — per-frame input handling and draw-command output.
//! - [`types`] — shared type aliases and the abstract palette.

pub mod config;
pub mod grid;
pub mod patterns;
pub mod simulation;
pub mod step;
pub mod types;

pub use config::{Config, ConfigError};
pub use grid::{Grid, GridError};
pub use simulation::{DrawCommand, FrameInput, Simulation};
