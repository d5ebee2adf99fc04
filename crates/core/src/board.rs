//! Board module - manages the locked-cell grid
//!
//! The board is a 10x20 grid of occupied flags stored as a flat array
//! indexed `row * 10 + col` for cache locality and zero allocation.
//! Rows run 0..19 top to bottom, columns 0..9 left to right.
//! Only locked pieces are ever written here; the falling piece lives in
//! `GameState` until it locks.

use crate::catalog::Shape;
use crate::error::PlacementError;
use crate::types::{BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of occupied flags, row-major (row * WIDTH + col)
    cells: [bool; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [false; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i16 || col < 0 || col >= BOARD_WIDTH as i16 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Occupied flag at (row, col); `None` when out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<bool> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the occupied flag at (row, col).
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i16, col: i16, occupied: bool) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Check if a cell is inside the board and occupied
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(true))
    }

    /// Check if a cell is inside the board and empty
    pub fn is_free(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(false))
    }

    /// Validate a shape whose top-left corner sits at column `x`, row `y`.
    ///
    /// Every filled matrix cell (i, j) maps to row `y + i`, column `x + j`;
    /// each must be on the board and unoccupied.
    pub fn check_placement(&self, shape: &Shape, x: i8, y: i8) -> Result<(), PlacementError> {
        for (dx, dy) in shape.minos() {
            let row = y as i16 + dy as i16;
            let col = x as i16 + dx as i16;
            match self.get(row, col) {
                None => return Err(PlacementError::OutOfBounds { row, col }),
                Some(true) => return Err(PlacementError::Occupied { row, col }),
                Some(false) => {}
            }
        }
        Ok(())
    }

    /// Boolean form of [`Board::check_placement`].
    #[inline]
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        self.check_placement(shape, x, y).is_ok()
    }

    /// Mark every filled cell of `shape` at (x, y) as occupied.
    ///
    /// Callers validate with [`Board::can_place`] first; cells that fall
    /// outside the board are skipped.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8) {
        for (dx, dy) in shape.minos() {
            self.set(y as i16 + dy as i16, x as i16 + dx as i16, true);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|&cell| cell)
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|&cell| !cell)
    }

    /// Remove a row, shift all rows above down by one and empty row 0.
    pub fn remove_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, r * width);
        }

        self.cells[..width].fill(false);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans from the bottom row up. After removing a row the same index is
    /// examined again, since the row above has just shifted into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT as usize;

        while row > 0 {
            if self.is_row_full(row - 1) {
                self.remove_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Create from text rows, `#` for occupied and anything else for empty.
    ///
    /// The rows fill the bottom of the board; missing rows above are empty
    /// and characters past column 9 are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = BOARD_HEIGHT as usize;
        let offset = height.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(height).enumerate() {
            for (col, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch == '#' {
                    board.set((offset + i) as i16, col as i16, true);
                }
            }
        }
        board
    }

    /// Fill every cell of a row.
    pub fn fill_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }
        let start = row * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize].fill(true);
    }

    /// Copy the grid into a `[row][col]` array for snapshots
    pub fn write_grid(&self, out: &mut [[bool; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (row, dst) in out.iter_mut().enumerate() {
            let start = row * width;
            dst.copy_from_slice(&self.cells[start..start + width]);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
