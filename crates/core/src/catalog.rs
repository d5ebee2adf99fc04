//! Piece catalog - canonical shape matrices
//!
//! Each kind has one square matrix (side 2, 3 or 4) in row-major order.
//! Rotated shapes are always computed from these, never from each other.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, MAX_SHAPE_SIDE};

const CAPACITY: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// An N×N boolean matrix, N in 1..=4, stored row-major in a fixed buffer.
///
/// Entries past `side * side` are always `false`, so derived equality only
/// compares the live part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    side: u8,
    cells: [bool; CAPACITY],
}

impl Shape {
    /// Build a shape from `side * side` row-major flags.
    ///
    /// Panics if `side` is 0, exceeds 4 or `rows` has the wrong length. Only
    /// used with the constant tables below and in tests.
    pub const fn from_rows(side: u8, rows: &[bool]) -> Self {
        assert!(side > 0 && side as usize <= MAX_SHAPE_SIDE);
        assert!(rows.len() == side as usize * side as usize);
        let mut cells = [false; CAPACITY];
        let mut i = 0;
        while i < rows.len() {
            cells[i] = rows[i];
            i += 1;
        }
        Self { side, cells }
    }

    /// Empty matrix of the given side.
    pub(crate) const fn empty(side: u8) -> Self {
        Self {
            side,
            cells: [false; CAPACITY],
        }
    }

    pub fn side(&self) -> usize {
        self.side as usize
    }

    /// Cell at (row, col); out-of-range reads are empty.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> bool {
        let n = self.side();
        row < n && col < n && self.cells[row * n + col]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, row: usize, col: usize, filled: bool) {
        let n = self.side();
        if row < n && col < n {
            self.cells[row * n + col] = filled;
        }
    }

    /// Row-major view of the N² live cells.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells[..self.side() * self.side()]
    }

    pub fn filled_count(&self) -> usize {
        self.as_slice().iter().filter(|&&c| c).count()
    }

    /// Offsets `(col, row)` of every filled cell, row-major.
    pub fn minos(&self) -> ArrayVec<(i8, i8), CAPACITY> {
        let n = self.side();
        let mut out = ArrayVec::new();
        for row in 0..n {
            for col in 0..n {
                if self.cells[row * n + col] {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }
}

const X: bool = true;
const O: bool = false;

#[rustfmt::skip]
const SHAPE_O: Shape = Shape::from_rows(2, &[
    X, X,
    X, X,
]);

#[rustfmt::skip]
const SHAPE_I: Shape = Shape::from_rows(4, &[
    O, X, O, O,
    O, X, O, O,
    O, X, O, O,
    O, X, O, O,
]);

#[rustfmt::skip]
const SHAPE_S: Shape = Shape::from_rows(3, &[
    O, X, X,
    X, X, O,
    O, O, O,
]);

#[rustfmt::skip]
const SHAPE_Z: Shape = Shape::from_rows(3, &[
    X, X, O,
    O, X, X,
    O, O, O,
]);

#[rustfmt::skip]
const SHAPE_L: Shape = Shape::from_rows(3, &[
    X, O, O,
    X, O, O,
    X, X, O,
]);

#[rustfmt::skip]
const SHAPE_J: Shape = Shape::from_rows(3, &[
    O, X, O,
    O, X, O,
    X, X, O,
]);

#[rustfmt::skip]
const SHAPE_T: Shape = Shape::from_rows(3, &[
    X, X, X,
    O, X, O,
    O, O, O,
]);

/// Canonical (0°) shape for a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::O => SHAPE_O,
        PieceKind::I => SHAPE_I,
        PieceKind::S => SHAPE_S,
        PieceKind::Z => SHAPE_Z,
        PieceKind::L => SHAPE_L,
        PieceKind::J => SHAPE_J,
        PieceKind::T => SHAPE_T,
    }
}
