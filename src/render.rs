//! Drawing and scoreboard seams.
//!
//! The engine never talks to a terminal or window directly: it issues draw
//! requests through [`Canvas`] and pushes HUD values through [`Scoreboard`].
//! Front-ends implement both.

use crate::collision::{Circle, Rect};

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// `#2BD8B2`
    pub const PLAYER: Color = Color::rgb(0x2B, 0xD8, 0xB2);
}

/// A 2D drawing surface covering the arena.
pub trait Canvas {
    /// Wipe the whole arena.
    fn clear(&mut self);
    /// Filled, stroked rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Filled circle; `alpha` is in `0.0..=1.0`.
    fn fill_circle(&mut self, circle: Circle, color: Color, alpha: f64);
}

/// Receives score and lives updates for in-game and menu display.
pub trait Scoreboard {
    fn show_score(&mut self, score: u32, high_score: u32);
    /// Rendered as one heart per life.
    fn show_lives(&mut self, lives: u32);
    fn show_menu(&mut self, final_score: u32, high_score: u32, game_over: bool);
}

/// Canvas that discards every request (headless runs and tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self) {}
    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}
    fn fill_circle(&mut self, _circle: Circle, _color: Color, _alpha: f64) {}
}
