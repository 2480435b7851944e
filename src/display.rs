/// Rendering layer. All terminal I/O lives here.
///
/// The engine draws into a `TerminalCanvas` (a cell buffer covering the
/// arena); `present` then translates the buffer, HUD and overlays into
/// terminal commands.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use grid_invaders::collision::{Circle, Rect};
use grid_invaders::render::{self, Canvas, Scoreboard};
use grid_invaders::Config;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS: &str = "← → / Q D : Move   SPACE : Shoot   ESC : Quit";

/// One terminal cell worth of arena.
#[derive(Clone, Copy, Debug)]
struct Cell {
    glyph: char,
    color: render::Color,
}

/// Cell-buffer canvas plus the HUD values pushed through `Scoreboard`.
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Option<Cell>>,
    score: u32,
    high_score: u32,
    lives: u32,
    menu: Option<MenuInfo>,
}

#[derive(Clone, Copy, Debug)]
struct MenuInfo {
    final_score: u32,
    high_score: u32,
    game_over: bool,
}

impl TerminalCanvas {
    pub fn new(config: &Config) -> Self {
        let (cols, rows) = config.grid_size();
        Self {
            cols,
            rows,
            cell_width: config.cell_width.max(1.0),
            cell_height: config.cell_height.max(1.0),
            cells: vec![None; cols as usize * rows as usize],
            score: 0,
            high_score: 0,
            lives: 0,
            menu: None,
        }
    }

    /// Leave the menu and go back to the in-game HUD.
    pub fn hide_menu(&mut self) {
        self.menu = None;
    }

    fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width) as u16;
        let row = (y / self.cell_height) as u16;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    fn put(&mut self, col: u16, row: u16, cell: Cell) {
        let idx = row as usize * self.cols as usize + col as usize;
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = Some(cell);
        }
    }

    // ── Frame output ──────────────────────────────────────────────────────────

    /// Write one complete frame: border, HUD, arena cells and, if set, menu.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border(out)?;
        self.draw_hud(out)?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                if let Some(cell) = self.cells[idx] {
                    // +1 for the border, +2 for the HUD row and top bar
                    out.queue(cursor::MoveTo(col + 1, row + 2))?;
                    out.queue(style::SetForegroundColor(to_term_color(cell.color)))?;
                    out.queue(Print(cell.glyph))?;
                }
            }
        }

        self.draw_controls_hint(out)?;
        if let Some(menu) = self.menu {
            self.draw_menu(out, menu)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows + 4))?;
        out.flush()?;
        Ok(())
    }

    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.cols as usize;
        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
        out.queue(cursor::MoveTo(0, self.rows + 2))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

        for row in 2..self.rows + 2 {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.cols + 1, row))?;
            out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            self.score, self.high_score
        )))?;

        let lives_str = format!("Lives:{}", "♥".repeat(self.lives as usize));
        let x = (self.cols + 2).saturating_sub(lives_str.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(&lives_str))?;
        Ok(())
    }

    fn draw_controls_hint<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, self.rows + 3))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(CONTROLS))?;
        Ok(())
    }

    // ── Menu overlay ──────────────────────────────────────────────────────────

    fn draw_menu<W: Write>(&self, out: &mut W, menu: MenuInfo) -> std::io::Result<()> {
        let title = if menu.game_over {
            "╔════ GAME  OVER ════╗"
        } else {
            "╔═══ GRID INVADERS ══╗"
        };
        let mut lines: Vec<(String, Color)> = vec![(title.to_string(), Color::Red)];
        if menu.game_over {
            lines.push((format!("Final Score: {:>6}", menu.final_score), Color::Yellow));
            let best_color = if menu.final_score >= menu.high_score && menu.final_score > 0 {
                Color::Yellow
            } else {
                Color::DarkGrey
            };
            lines.push((format!("Best Score:  {:>6}", menu.high_score), best_color));
        } else if menu.high_score > 0 {
            lines.push((format!("Best Score:  {:>6}", menu.high_score), Color::Yellow));
        }
        lines.push(("ENTER - Play   ESC - Quit".to_string(), Color::White));

        let cx = self.cols / 2 + 1;
        let start_row = (self.rows / 2 + 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(msg))?;
        }
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    fn draw_rect(&mut self, rect: Rect, color: render::Color) {
        let Some((c0, r0)) = self.to_cell(rect.x.max(0.0), rect.y.max(0.0)) else {
            return;
        };
        // Right/bottom edges are exclusive
        let right = (rect.x + rect.width - 0.001).max(0.0);
        let bottom = (rect.y + rect.height - 0.001).max(0.0);
        let c1 = ((right / self.cell_width) as u16).min(self.cols - 1);
        let r1 = ((bottom / self.cell_height) as u16).min(self.rows - 1);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, Cell { glyph: '█', color });
            }
        }
    }

    fn fill_circle(&mut self, circle: Circle, color: render::Color, alpha: f64) {
        let Some((col, row)) = self.to_cell(circle.x, circle.y) else {
            return;
        };
        let glyph = if circle.radius >= 3.0 {
            '•'
        } else if alpha > 0.5 {
            '*'
        } else {
            '·'
        };
        self.put(col, row, Cell { glyph, color });
    }
}

impl Scoreboard for TerminalCanvas {
    fn show_score(&mut self, score: u32, high_score: u32) {
        self.score = score;
        self.high_score = high_score;
    }

    fn show_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    fn show_menu(&mut self, final_score: u32, high_score: u32, game_over: bool) {
        self.menu = Some(MenuInfo {
            final_score,
            high_score,
            game_over,
        });
    }
}

fn to_term_color(color: render::Color) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
