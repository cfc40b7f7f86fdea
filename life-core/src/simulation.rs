//! Frame-level state machine for the interactive viewer.
//!
//! [`Simulation`] owns everything that changes between frames (the grid,
//! the pause flag, the frame and generation counters, the RNG). The drawing
//! shell samples its input once per frame into a [`FrameInput`], hands it to
//! [`Simulation::frame`], and paints the [`DrawCommand`]s it gets back.
//! Nothing in here depends on a window, so the whole loop can be driven
//! from tests.

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::{Config, ConfigError},
    grid::Grid,
    patterns::Pattern,
    step,
    types::{CellPos, Shade},
};

/// Input sampled once per rendered frame.
///
/// Key fields are edge-triggered (true only on the frame the key went
/// down); mouse buttons are level-triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Space: pause or resume.
    pub toggle_pause: bool,
    /// R: clear and reseed.
    pub randomize: bool,
    /// C: kill every cell.
    pub clear: bool,
    /// Number key: stamp the matching pattern under the pointer.
    pub stamp: Option<u8>,
    /// N: advance one generation while paused.
    pub step_once: bool,
    /// Left mouse button went down this frame: toggle the cell under the pointer.
    pub toggle_cell: bool,
    /// Left mouse button held: paint with the state the last toggle produced.
    pub drag: bool,
    /// Right mouse button held: paint cells dead.
    pub paint_dead: bool,
    /// Pointer position relative to the top-left corner of the board.
    pub pointer: Option<Vec2>,
}

/// One primitive for the drawing shell, in board-relative pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Shade),
    Line { from: Vec2, to: Vec2, shade: Shade },
    FilledRect { min: Vec2, size: Vec2, shade: Shade },
    Text { pos: Vec2, text: String, shade: Shade },
}

const HUD_ORIGIN: Vec2 = Vec2::new(8.0, 8.0);
const HUD_LINE_HEIGHT: f32 = 18.0;

#[derive(Debug)]
pub struct Simulation {
    cfg: Config,
    grid: Grid,
    paused: bool,
    frame: u64,
    generation: u64,
    /// State painted while the left button is dragged.
    brush: bool,
    rng: StdRng,
}

impl Simulation {
    /// Builds a running simulation on a freshly seeded grid.
    ///
    /// ### Parameters
    /// - `cfg` - Board geometry, cadence and seed density.
    /// - `seed` - Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    ///
    /// ### Returns
    /// - `Ok(Simulation)` with the grid sized by [`Config::grid_dims`].
    /// - `Err(ConfigError)` if `cfg` fails [`Config::validate`].
    pub fn new(cfg: Config, seed: Option<u64>) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let (width, height) = cfg.grid_dims();
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut grid = Grid::new(width, height);
        grid.randomize(cfg.density, &mut rng);

        debug!(width, height, ?seed, "simulation created");
        Ok(Self {
            cfg,
            grid,
            paused: false,
            frame: 0,
            generation: 0,
            brush: true,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rendered frames seen so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Generations advanced since the last clear or reseed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation unconditionally.
    pub fn tick(&mut self) {
        step::advance(&mut self.grid);
        self.generation += 1;
    }

    /// Applies one frame of input, then steps if the cadence allows it.
    ///
    /// Input is handled in a fixed order: pause toggle, clear, reseed,
    /// stamp, toggle or paint, single step. While running, the grid advances on
    /// every frame whose index is a multiple of [`Config::tick_divisor`].
    pub fn update(&mut self, input: &FrameInput) {
        if input.toggle_pause {
            self.paused = !self.paused;
            debug!(paused = self.paused, generation = self.generation, "pause toggled");
        }

        if input.clear {
            self.grid.clear();
            self.generation = 0;
        }

        if input.randomize {
            self.grid.clear();
            self.grid.randomize(self.cfg.density, &mut self.rng);
            self.generation = 0;
        }

        let hovered = self.hovered_cell(input.pointer);

        if let (Some(digit), Some((x, y))) = (input.stamp, hovered) {
            match Pattern::for_digit(digit) {
                Some(pattern) => {
                    self.grid.stamp(pattern, x, y);
                }
                None => debug!(digit, "no pattern bound to key"),
            }
        }

        if let Some((x, y)) = hovered {
            if input.toggle_cell {
                self.brush = self.grid.toggle(x, y);
            } else if input.drag {
                self.grid.set(x, y, self.brush);
            } else if input.paint_dead {
                self.grid.set(x, y, false);
            }
        }

        if self.paused {
            if input.step_once {
                self.tick();
            }
        } else if self.frame % u64::from(self.cfg.tick_divisor) == 0 {
            self.tick();
        }

        self.frame = self.frame.wrapping_add(1);
    }

    fn hovered_cell(&self, pointer: Option<Vec2>) -> Option<CellPos> {
        pointer
            .and_then(|p| self.cfg.cell_at(p))
            .filter(|&(x, y)| self.grid.contains(x, y))
    }

    /// Draw list for the current state: background, grid lines, cells, HUD.
    pub fn render(&self) -> Vec<DrawCommand> {
        let cs = self.cfg.cell_size;
        let (w, h) = (self.grid.width(), self.grid.height());
        let extent = self.cfg.viewport;

        let mut out = Vec::with_capacity(1 + w + h + 2 + self.grid.population() + 2);
        out.push(DrawCommand::Clear(Shade::Background));

        if self.cfg.grid_lines {
            for i in 0..=w {
                let x = i as f32 * cs;
                out.push(DrawCommand::Line {
                    from: Vec2::new(x, 0.0),
                    to: Vec2::new(x, extent.y),
                    shade: Shade::GridLine,
                });
            }
            for j in 0..=h {
                let y = j as f32 * cs;
                out.push(DrawCommand::Line {
                    from: Vec2::new(0.0, y),
                    to: Vec2::new(extent.x, y),
                    shade: Shade::GridLine,
                });
            }
        }

        out.extend(self.grid.alive_cells().map(|(x, y)| DrawCommand::FilledRect {
            min: self.cfg.cell_origin(x, y),
            size: Vec2::splat(cs),
            shade: Shade::Cell,
        }));

        for (i, text) in self.hud_lines().into_iter().enumerate() {
            out.push(DrawCommand::Text {
                pos: HUD_ORIGIN + Vec2::new(0.0, i as f32 * HUD_LINE_HEIGHT),
                text,
                shade: Shade::Hud,
            });
        }

        out
    }

    fn hud_lines(&self) -> Vec<String> {
        let status = if self.paused {
            "PAUSED".to_string()
        } else {
            format!("running, 1 step / {} frames", self.cfg.tick_divisor)
        };
        vec![
            format!(
                "generation {}  population {}  {}",
                self.generation,
                self.grid.population(),
                status
            ),
            "space pause  n step  r random  c clear  1-4 stamp  lmb toggle/drag  rmb erase".to_string(),
        ]
    }

    /// One full frame: [`Simulation::update`] followed by [`Simulation::render`].
    pub fn frame(&mut self, input: &FrameInput) -> Vec<DrawCommand> {
        self.update(input);
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x4 board of 10px cells.
    fn small_cfg() -> Config {
        Config {
            viewport: Vec2::new(50.0, 40.0),
            cell_size: 10.0,
            ..Config::default()
        }
    }

    fn empty_sim(cfg: Config) -> Simulation {
        let mut sim = Simulation::new(cfg, Some(42)).expect("valid config");
        sim.grid_mut().clear();
        sim
    }

    /// Pointer position at the centre of cell `(x, y)`.
    fn over(sim: &Simulation, x: usize, y: usize) -> Option<Vec2> {
        let cs = sim.config().cell_size;
        Some(sim.config().cell_origin(x, y) + Vec2::splat(cs * 0.5))
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut cfg = small_cfg();
        cfg.tick_divisor = 0;
        assert_eq!(Simulation::new(cfg, None).err(), Some(ConfigError::TickDivisor));
    }

    #[test]
    fn new_seeds_grid_reproducibly() {
        let a = Simulation::new(small_cfg(), Some(3)).unwrap();
        let b = Simulation::new(small_cfg(), Some(3)).unwrap();

        assert_eq!((a.grid().width(), a.grid().height()), (5, 4));
        assert_eq!(a.grid(), b.grid());
        assert!(a.grid().population() <= 10);
        assert!(!a.is_paused());
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn running_simulation_steps_every_frame_by_default() {
        let mut sim = empty_sim(small_cfg());
        for &(x, y) in &[(1, 1), (2, 1), (3, 1)] {
            sim.grid_mut().set(x, y, true);
        }

        sim.update(&FrameInput::default());
        assert_eq!(sim.generation(), 1);
        assert!(sim.grid().get(2, 0) && sim.grid().get(2, 2));
        assert!(!sim.grid().get(1, 1));

        sim.update(&FrameInput::default());
        assert_eq!(sim.generation(), 2);
        assert!(sim.grid().get(1, 1) && sim.grid().get(3, 1));
        assert_eq!(sim.frame_count(), 2);
    }

    #[test]
    fn tick_divisor_throttles_steps() {
        let mut cfg = small_cfg();
        cfg.tick_divisor = 3;
        let mut sim = empty_sim(cfg);

        let mut generations = Vec::new();
        for _ in 0..7 {
            sim.update(&FrameInput::default());
            generations.push(sim.generation());
        }
        // Steps on frames 0, 3 and 6.
        assert_eq!(generations, vec![1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn pause_stops_stepping_and_step_once_advances() {
        let mut sim = empty_sim(small_cfg());
        sim.grid_mut().set(0, 0, true);

        let pause = FrameInput {
            toggle_pause: true,
            ..FrameInput::default()
        };
        sim.update(&pause);
        assert!(sim.is_paused());
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().get(0, 0));

        sim.update(&FrameInput::default());
        assert_eq!(sim.generation(), 0);

        sim.update(&FrameInput {
            step_once: true,
            ..FrameInput::default()
        });
        assert_eq!(sim.generation(), 1);
        assert!(!sim.grid().get(0, 0));

        sim.update(&pause);
        assert!(!sim.is_paused());
    }

    #[test]
    fn step_once_is_ignored_while_running() {
        let mut sim = empty_sim(small_cfg());
        sim.update(&FrameInput {
            step_once: true,
            ..FrameInput::default()
        });
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn click_toggles_and_drag_paints_the_toggled_state() {
        let mut sim = empty_sim(small_cfg());
        sim.update(&FrameInput {
            toggle_pause: true,
            ..FrameInput::default()
        });

        // Press on a dead cell: it comes alive and dragging paints alive.
        sim.update(&FrameInput {
            toggle_cell: true,
            drag: true,
            pointer: over(&sim, 0, 0),
            ..FrameInput::default()
        });
        assert!(sim.grid().get(0, 0));

        sim.update(&FrameInput {
            drag: true,
            pointer: over(&sim, 1, 0),
            ..FrameInput::default()
        });
        // Holding over the pressed cell does not flip it back.
        sim.update(&FrameInput {
            drag: true,
            pointer: over(&sim, 1, 0),
            ..FrameInput::default()
        });
        assert!(sim.grid().get(0, 0) && sim.grid().get(1, 0));

        // Press on a live cell: it dies and dragging now erases.
        sim.update(&FrameInput {
            toggle_cell: true,
            drag: true,
            pointer: over(&sim, 1, 0),
            ..FrameInput::default()
        });
        assert!(!sim.grid().get(1, 0));

        sim.update(&FrameInput {
            drag: true,
            pointer: over(&sim, 0, 0),
            ..FrameInput::default()
        });
        assert_eq!(sim.grid().population(), 0);
    }

    #[test]
    fn right_button_erases_under_the_pointer() {
        let mut sim = empty_sim(small_cfg());
        sim.update(&FrameInput {
            toggle_pause: true,
            ..FrameInput::default()
        });
        sim.grid_mut().set(4, 3, true);

        sim.update(&FrameInput {
            paint_dead: true,
            pointer: over(&sim, 4, 3),
            ..FrameInput::default()
        });
        assert!(!sim.grid().get(4, 3));

        // Outside the board: nothing happens.
        sim.update(&FrameInput {
            toggle_cell: true,
            drag: true,
            pointer: Some(Vec2::new(500.0, 5.0)),
            ..FrameInput::default()
        });
        assert_eq!(sim.grid().population(), 0);
    }

    #[test]
    fn stamp_key_places_pattern_under_pointer() {
        let mut sim = empty_sim(small_cfg());
        sim.update(&FrameInput {
            toggle_pause: true,
            ..FrameInput::default()
        });

        let pointer = over(&sim, 1, 0);
        sim.update(&FrameInput {
            stamp: Some(1),
            pointer,
            ..FrameInput::default()
        });
        let mut alive: Vec<CellPos> = sim.grid().alive_cells().collect();
        alive.sort();
        assert_eq!(alive, vec![(1, 2), (2, 0), (2, 2), (3, 1), (3, 2)]);

        // Anchored too close to the right edge: rejected.
        let before = sim.grid().clone();
        sim.update(&FrameInput {
            stamp: Some(1),
            pointer: over(&sim, 3, 0),
            ..FrameInput::default()
        });
        assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn clear_and_randomize_reset_generation() {
        let mut sim = Simulation::new(small_cfg(), Some(9)).unwrap();
        sim.update(&FrameInput::default());
        sim.update(&FrameInput::default());
        assert_eq!(sim.generation(), 2);

        sim.update(&FrameInput {
            toggle_pause: true,
            clear: true,
            ..FrameInput::default()
        });
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().population(), 0);

        sim.update(&FrameInput {
            randomize: true,
            ..FrameInput::default()
        });
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().population() > 0);
    }

    #[test]
    fn reseed_clears_the_board_first() {
        let mut sim = empty_sim(small_cfg());
        let (w, h) = (sim.grid().width(), sim.grid().height());
        for y in 0..h {
            for x in 0..w {
                sim.grid_mut().set(x, y, true);
            }
        }
        assert_eq!(sim.grid().population(), 20);

        sim.update(&FrameInput {
            toggle_pause: true,
            randomize: true,
            ..FrameInput::default()
        });

        // 5x4 cells at density 0.5 draw 10 coordinates.
        let draws = 10;
        assert!(sim.grid().population() > 0);
        assert!(sim.grid().population() <= draws);
    }

    #[test]
    fn new_reports_bad_viewport_instead_of_panicking() {
        let mut cfg = small_cfg();
        cfg.viewport = Vec2::new(f32::NAN, 40.0);
        assert!(matches!(
            Simulation::new(cfg, Some(0)),
            Err(ConfigError::NonFiniteViewport { .. })
        ));

        cfg.viewport = Vec2::new(1e12, 1e12);
        cfg.cell_size = 3.0;
        assert!(matches!(
            Simulation::new(cfg, Some(0)),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn render_emits_lines_cells_and_hud() {
        let mut sim = empty_sim(small_cfg());
        sim.grid_mut().set(2, 3, true);
        sim.grid_mut().set(0, 0, true);

        let cmds = sim.render();
        assert_eq!(cmds[0], DrawCommand::Clear(Shade::Background));

        let lines = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        // (5 + 1) vertical + (4 + 1) horizontal.
        assert_eq!(lines, 11);

        let rects: Vec<&DrawCommand> = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledRect { .. }))
            .collect();
        assert_eq!(rects.len(), 2);
        assert!(rects.contains(&&DrawCommand::FilledRect {
            min: Vec2::new(20.0, 30.0),
            size: Vec2::splat(10.0),
            shade: Shade::Cell,
        }));

        let hud: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(hud[0].contains("population 2"));
        assert!(hud[0].contains("running"));
    }

    #[test]
    fn render_without_grid_lines_and_paused_hud() {
        let mut cfg = small_cfg();
        cfg.grid_lines = false;
        let mut sim = empty_sim(cfg);

        let cmds = sim.frame(&FrameInput {
            toggle_pause: true,
            ..FrameInput::default()
        });
        assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text.contains("PAUSED")
        )));
    }
}
