//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the engine,
//! the input sampler and the terminal view can all share them.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: column 3, row 0 (top-left corner of the shape matrix)
//!
//! # Timing
//!
//! The engine is driven by a fixed-rate tick, not by elapsed milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_HZ` | 100 | Tick rate of the time base |
//! | `GRAVITY_PERIOD_TICKS` | 50 | Ticks between gravity steps |
//! | `SHIFT_REPEAT_TICKS` | 10 | Ticks between horizontal repeats while held |
//!
//! # Examples
//!
//! ```
//! use fallblock_types::{Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Orientation::Deg270.next(), Orientation::Deg0);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Spawn anchor column (top-left of the shape matrix)
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row (top-left of the shape matrix)
pub const SPAWN_Y: i8 = 0;

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIDE: usize = 4;

/// Tick rate of the time base in Hz
pub const TICK_HZ: u32 = 100;

/// Ticks between two gravity steps (0.5s at 100 Hz)
pub const GRAVITY_PERIOD_TICKS: u32 = 50;

/// Ticks between horizontal repeats while a direction stays held
pub const SHIFT_REPEAT_TICKS: u32 = 10;

/// Points for a lock that clears no lines
pub const PLACEMENT_BONUS: u32 = 10;

/// Points per line for 1-3 line clears
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points for a 4-line clear that does not continue a streak
pub const TETRIS_POINTS: u32 = 800;

/// Points for a 4-line clear directly after another 4-line clear
pub const BACK_TO_BACK_TETRIS_POINTS: u32 = 1200;


/// The seven tetromino piece kinds
///
/// Declaration order matches the shape table and the random draw:
/// O, I, S, Z, L, J, T.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// Every kind, in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 1,
            PieceKind::S => 2,
            PieceKind::Z => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::T => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Single uppercase letter, used by the preview panel and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::T => "T",
        }
    }
}

/// Absolute orientation of a piece.
///
/// Every successful rotation advances exactly one quarter turn clockwise:
/// 0° → 90° → 180° → 270° → 0°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Next orientation, +90° wrapping.
    ///
    /// ```
    /// use fallblock_types::Orientation;
    ///
    /// assert_eq!(Orientation::Deg0.next(), Orientation::Deg90);
    /// assert_eq!(Orientation::Deg270.next(), Orientation::Deg0);
    /// ```
    pub fn next(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    /// Number of clockwise quarter turns from 0° (0..=3).
    pub fn quarter_turns(self) -> u8 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 1,
            Orientation::Deg180 => 2,
            Orientation::Deg270 => 3,
        }
    }
}

/// Player intents sampled once per tick by the input collaborator.
///
/// The sampler guarantees at most one of `left`, `right`, `soft_drop` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents {
    pub rotate: bool,
    pub left: bool,
    pub right: bool,
    pub soft_drop: bool,
}

impl Intents {
    pub const NONE: Intents = Intents {
        rotate: false,
        left: false,
        right: false,
        soft_drop: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Horizontal direction requested this tick: -1, 0 or 1.
    pub fn horizontal(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Phase of the tick state machine.
///
/// `Clearing` lasts until the next tick, which spawns. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TickPhase {
    #[default]
    Spawning,
    Falling,
    Clearing,
    GameOver,
}

impl TickPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickPhase::Spawning => "spawning",
            TickPhase::Falling => "falling",
            TickPhase::Clearing => "clearing",
            TickPhase::GameOver => "game_over",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by collaborators that react to game events (audio, logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub tetris_streak: bool,
}
