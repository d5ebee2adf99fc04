use crate::catalog::Shape;
use crate::game_state::ActivePiece;
use crate::types::{Orientation, PieceKind, TickPhase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
    pub shape: Shape,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
            shape: value.shape,
        }
    }
}

impl ActiveSnapshot {
    /// Whether the active piece covers board cell (row, col).
    pub fn covers(&self, row: i16, col: i16) -> bool {
        let i = row - self.y as i16;
        let j = col - self.x as i16;
        i >= 0 && j >= 0 && self.shape.get(i as usize, j as usize)
    }
}

/// Read-only copy of everything a renderer needs.
///
/// `Copy` and fixed-size, so it can be handed across threads or stored in a
/// pre-allocated slot without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[bool; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub tetris_streak: bool,
    pub game_over: bool,
    pub phase: TickPhase,
    pub tick: u64,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = PieceKind::O;
        self.score = 0;
        self.tetris_streak = false;
        self.game_over = false;
        self.phase = TickPhase::Spawning;
        self.tick = 0;
        self.seed = 0;
    }

    /// Locked cell or active piece at (row, col).
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        let locked = self
            .board
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false);
        locked
            || self
                .active
                .map(|a| a.covers(row as i16, col as i16))
                .unwrap_or(false)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::O,
            score: 0,
            tetris_streak: false,
            game_over: false,
            phase: TickPhase::Spawning,
            tick: 0,
            seed: 0,
        }
    }
}
