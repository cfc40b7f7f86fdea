//! eframe/egui shell around [`Simulation`].
//!
//! This module defines [`Viewer`], which owns the simulation and implements
//! [`eframe::App`]. Each frame it samples keyboard and mouse state into a
//! [`FrameInput`], lets the simulation advance, and paints the returned
//! [`DrawCommand`]s with an [`egui::Painter`].

use std::time::Duration;

use eframe::App;
use egui::{Align2, Color32, FontId, Key, Pos2, Rect, Stroke};
use glam::Vec2;
use life_core::{DrawCommand, FrameInput, Simulation, types::Shade};

/// Number keys that stamp a pattern, paired with the digit they report.
const STAMP_KEYS: [(Key, u8); 4] = [
    (Key::Num1, 1),
    (Key::Num2, 2),
    (Key::Num3, 3),
    (Key::Num4, 4),
];

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `sim` - The simulation being displayed; all game state lives here.
/// - `frame_budget` - Delay requested between repaints, from the configured frame rate.
pub struct Viewer {
    sim: Simulation,
    frame_budget: Duration,
}

impl Viewer {
    pub fn new(sim: Simulation) -> Self {
        let frame_budget = Duration::from_secs(1) / sim.config().fps;
        Self { sim, frame_budget }
    }

    /// Converts a board-relative position to screen-space.
    fn board_to_screen(origin: Pos2, p: Vec2) -> Pos2 {
        egui::pos2(origin.x + p.x, origin.y + p.y)
    }

    /// Converts a screen-space position to board-relative coordinates.
    ///
    /// Inverse of [`Viewer::board_to_screen`].
    fn screen_to_board(origin: Pos2, p: Pos2) -> Vec2 {
        Vec2::new(p.x - origin.x, p.y - origin.y)
    }

    fn color(shade: Shade) -> Color32 {
        match shade {
            Shade::Background => Color32::from_rgb(245, 245, 245),
            Shade::GridLine => Color32::from_rgb(220, 220, 220),
            Shade::Cell => Color32::BLACK,
            Shade::Hud => Color32::from_rgb(230, 41, 55),
        }
    }

    /// Samples this frame's keyboard and mouse state.
    fn sample_input(ctx: &egui::Context, origin: Pos2) -> FrameInput {
        ctx.input(|i| FrameInput {
            toggle_pause: i.key_pressed(Key::Space),
            randomize: i.key_pressed(Key::R),
            clear: i.key_pressed(Key::C),
            stamp: STAMP_KEYS
                .iter()
                .find(|(key, _)| i.key_pressed(*key))
                .map(|&(_, digit)| digit),
            step_once: i.key_pressed(Key::N),
            toggle_cell: i.pointer.primary_pressed(),
            drag: i.pointer.primary_down(),
            paint_dead: i.pointer.secondary_down(),
            pointer: i
                .pointer
                .hover_pos()
                .map(|p| Self::screen_to_board(origin, p)),
        })
    }

    fn paint(painter: &egui::Painter, origin: Pos2, commands: &[DrawCommand]) {
        for cmd in commands {
            match cmd {
                DrawCommand::Clear(shade) => {
                    painter.rect_filled(painter.clip_rect(), 0.0, Self::color(*shade));
                }
                DrawCommand::Line { from, to, shade } => {
                    painter.line_segment(
                        [
                            Self::board_to_screen(origin, *from),
                            Self::board_to_screen(origin, *to),
                        ],
                        Stroke::new(1.0, Self::color(*shade)),
                    );
                }
                DrawCommand::FilledRect { min, size, shade } => {
                    let rect = Rect::from_min_size(
                        Self::board_to_screen(origin, *min),
                        egui::vec2(size.x, size.y),
                    );
                    painter.rect_filled(rect, 0.0, Self::color(*shade));
                }
                DrawCommand::Text { pos, text, shade } => {
                    painter.text(
                        Self::board_to_screen(origin, *pos),
                        Align2::LEFT_TOP,
                        text,
                        FontId::monospace(14.0),
                        Self::color(*shade),
                    );
                }
            }
        }
    }
}

impl App for Viewer {
    /// eframe callback run once per rendered frame.
    ///
    /// Samples input, advances the simulation, paints the board and asks
    /// for the next repaint one frame budget later.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let viewport = self.sim.config().viewport;
                let (response, painter) =
                    ui.allocate_painter(egui::vec2(viewport.x, viewport.y), egui::Sense::hover());
                let origin = response.rect.min;

                let input = Self::sample_input(ctx, origin);
                let commands = self.sim.frame(&input);
                Self::paint(&painter, origin, &commands);
            });

        ctx.request_repaint_after(self.frame_budget);
    }
}
