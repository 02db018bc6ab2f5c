/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The simulation works in logical pixels
/// (800×600 by default); `Viewport` scales them onto whatever cell grid
/// the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dodge_survival::animation::Frame;
use dodge_survival::config::GameConfig;
use dodge_survival::entities::{AppState, GameSession, Rect, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_TIME: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_PAUSE: Color = Color::Grey;

const PLACEHOLDER_CELL: char = '░';

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical pixels to terminal cells.  Row 0 is the HUD, row 1 and the
/// second-to-last row are the border, the last row holds the key hints.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    logical_w: f32,
    logical_h: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        Viewport {
            cols,
            rows,
            logical_w: config.width,
            logical_h: config.height,
        }
    }

    fn field_cols(&self) -> i32 {
        self.cols.saturating_sub(2) as i32
    }

    fn field_rows(&self) -> i32 {
        self.rows.saturating_sub(4) as i32
    }

    /// Cell span `[start, end)` covered by a logical rectangle, in field
    /// coordinates (may extend past the field on any side).
    fn cells(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let sx = self.field_cols() as f32 / self.logical_w;
        let sy = self.field_rows() as f32 / self.logical_h;
        let c0 = (rect.x * sx).floor() as i32;
        let r0 = (rect.y * sy).floor() as i32;
        let c1 = ((rect.right() * sx).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom() * sy).ceil() as i32).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever screen is active.
pub fn render<W: Write>(out: &mut W, app: &AppState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match (app.screen, &app.session) {
        (Screen::Start, _) => draw_start_screen(out, view)?,
        (Screen::Playing, Some(session)) => draw_play_field(out, session, view)?,
        (Screen::Paused, _) => draw_pause_menu(out, view)?,
        (Screen::GameOver, Some(session)) => {
            draw_play_field(out, session, view)?;
            draw_game_over(out, session, view)?;
        }
        _ => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_start_screen<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    centered(out, view, cy.saturating_sub(4), "★  DODGE  SURVIVAL  ★", C_TITLE)?;
    centered(out, view, cy.saturating_sub(1), "Move with the arrow keys", C_TEXT)?;
    centered(out, view, cy, "Don't touch the enemies!", C_TEXT)?;
    centered(out, view, cy + 2, "Press SPACE to start", Color::Yellow)?;
    centered(out, view, cy + 4, "ESC / Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_pause_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    centered(out, view, cy.saturating_sub(3), "║  PAUSED  ║", C_PAUSE)?;
    centered(out, view, cy.saturating_sub(1), "P   - Continue", C_TEXT)?;
    centered(out, view, cy, "R   - Restart ", C_TEXT)?;
    centered(out, view, cy + 1, "ESC - Quit    ", C_TEXT)?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, session: &GameSession, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║     YOU  LOST      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let start_row = (view.rows / 2).saturating_sub(3);
    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, view, start_row + i as u16, msg, *color)?;
    }

    let survived = format!("You survived: {} s", session.survived_secs());
    let row = start_row + lines.len() as u16;
    centered(out, view, row, &survived, Color::Yellow)?;
    centered(out, view, row + 1, "SPACE / R - Play Again   ESC - Quit", C_TEXT)?;
    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_play_field<W: Write>(out: &mut W, session: &GameSession, view: &Viewport) -> std::io::Result<()> {
    draw_border(out, view)?;
    draw_hud(out, session, view)?;

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &session.enemies {
        draw_sprite(out, view, &enemy.rect(), enemy.sprite.current_frame())?;
    }

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    let player = &session.player;
    draw_sprite(out, view, &player.rect(), player.sprite.current_frame())?;

    draw_controls_hint(out, view)?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format!("Time: {} s", session.survived_secs())))?;

    let right = format!("Enemies: {}", session.enemies.len());
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(right))?;
    Ok(())
}

/// Draw a frame into the cells its rectangle covers, clipped to the field.
/// Placeholder frames fill their box with a shade character.
fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, rect: &Rect, frame: &Frame) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.cells(rect);
    let left = c0.max(0);
    let right = c1.min(view.field_cols());
    if left >= right {
        return Ok(());
    }

    for row in r0.max(0)..r1.min(view.field_rows()) {
        let art_row = (row - r0) as usize;
        let line: String = (left..right)
            .map(|col| {
                let i = (col - c0) as usize;
                if frame.is_placeholder() {
                    PLACEHOLDER_CELL
                } else {
                    frame
                        .rows
                        .get(art_row)
                        .and_then(|r| r.chars().nth(i))
                        .unwrap_or(' ')
                }
            })
            .collect();
        out.queue(cursor::MoveTo(1 + left as u16, 2 + row as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   P : Pause   Q : Quit"))?;
    Ok(())
}
