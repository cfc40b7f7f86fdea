//! Application entry point for the Game of Life viewer.
//!
//! This binary parses command-line overrides, sets up logging and
//! eframe/egui, and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.

mod viewer;

use anyhow::{Context, anyhow};
use clap::Parser;
use glam::Vec2;
use life_core::{Config, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

const TITLE: &str = "Conway's game of life";

/// Conway's Game of Life on a bounded grid.
///
/// Space pauses, N steps while paused, R reseeds, C clears, 1-4 stamp a
/// pattern under the mouse. A left click toggles a cell and dragging paints
/// that state; the right button erases.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed for the random start (and for R); random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Window width in pixels.
    #[arg(long)]
    width: Option<f32>,
    /// Window height in pixels.
    #[arg(long)]
    height: Option<f32>,
    /// Cell edge length in pixels.
    #[arg(long)]
    cell_size: Option<f32>,
    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Rendered frames per simulation step.
    #[arg(long)]
    tick_divisor: Option<u32>,
    /// Random draws per cell when seeding.
    #[arg(long)]
    density: Option<f32>,
    /// Hide the grid lines.
    #[arg(long)]
    no_grid_lines: bool,
}

impl Args {
    /// Overlays the given flags on [`Config::default`].
    fn config(&self) -> Config {
        let base = Config::default();
        Config {
            viewport: Vec2::new(
                self.width.unwrap_or(base.viewport.x),
                self.height.unwrap_or(base.viewport.y),
            ),
            cell_size: self.cell_size.unwrap_or(base.cell_size),
            fps: self.fps.unwrap_or(base.fps),
            tick_divisor: self.tick_divisor.unwrap_or(base.tick_divisor),
            density: self.density.unwrap_or(base.density),
            grid_lines: base.grid_lines && !self.no_grid_lines,
        }
    }
}

fn init_tracing() {
    // RUST_LOG=life_core=debug,life_view=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eframe=warn,egui_glow=warn,wgpu=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` once the window is closed.
/// - `Err` if the configuration is invalid or eframe fails to create the
///   native window or event loop.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let cfg = args.config();
    let sim = Simulation::new(cfg, args.seed).context("invalid configuration")?;

    let (cols, rows) = cfg.grid_dims();
    info!(
        cols,
        rows,
        fps = cfg.fps,
        tick_divisor = cfg.tick_divisor,
        population = sim.grid().population(),
        "starting"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([cfg.viewport.x, cfg.viewport.y])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(sim)))),
    )
    .map_err(|e| anyhow!("window event loop failed: {e}"))
}
