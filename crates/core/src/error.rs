//! Placement outcomes.
//!
//! A rejected placement is an expected result of every move, rotation and
//! spawn check, not a fault. Game over is a state, not an error.

use thiserror::Error;

/// Why a shape cannot be placed at a candidate anchor.
///
/// Coordinates are absolute board cells of the first offending mino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell (row {row}, col {col}) is outside the board")]
    OutOfBounds { row: i16, col: i16 },

    #[error("cell (row {row}, col {col}) is already occupied")]
    Occupied { row: i16, col: i16 },
}
