//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure, no I/O. The display is monochrome in spirit: locked cells share one
//! style and only the falling piece is tinted by kind.

use crate::core::{canonical_shape, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the board frame inside `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// Reuses `fb`'s allocation unless the viewport size changed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let empty = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG)
        };
        let locked = CellStyle::plain(Rgb::new(200, 200, 200), PLAY_BG);

        for row in 0..BOARD_HEIGHT as u16 {
            for col in 0..BOARD_WIDTH as u16 {
                if snap.board[row as usize][col as usize] {
                    self.fill_cell_rect(fb, start_x, start_y, col, row, '█', locked);
                } else {
                    self.fill_cell_rect(fb, start_x, start_y, col, row, '·', empty);
                }
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(piece_color(active.kind), PLAY_BG)
            };
            for (dx, dy) in active.shape.minos() {
                let col = active.x as i16 + dx as i16;
                let row = active.y as i16 + dy as i16;
                if (0..BOARD_WIDTH as i16).contains(&col) && (0..BOARD_HEIGHT as i16).contains(&row)
                {
                    self.fill_cell_rect(fb, start_x, start_y, col as u16, row as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "STREAK", label);
        y += 1;
        fb.put_str(panel_x, y, if snap.tetris_streak { "B2B" } else { "-" }, value);
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let next = CellStyle::plain(piece_color(snap.next), PANEL_BG);
        for (dx, dy) in canonical_shape(snap.next).minos() {
            let px = panel_x + dx as u16 * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', next);
        }
        y += canonical_shape(snap.next).side() as u16 + 1;

        fb.put_str(panel_x, y, "r new game", hint);
        fb.put_str(panel_x, y + 1, "q quit", hint);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
