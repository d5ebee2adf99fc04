//! Rotation engine - shapes at absolute orientations
//!
//! `shape_at` is a pure function of (kind, orientation). It always starts
//! from the canonical matrix, so repeated rotations never compound.

use crate::catalog::{canonical_shape, Shape};
use crate::types::{Orientation, PieceKind};

/// Rotate an N×N matrix one quarter turn clockwise into a fresh buffer.
///
/// `out[r][c] = in[N-1-c][r]`
pub fn rotate_cw(shape: &Shape) -> Shape {
    let n = shape.side();
    let mut out = Shape::empty(n as u8);
    for r in 0..n {
        for c in 0..n {
            out.set(r, c, shape.get(n - 1 - c, r));
        }
    }
    out
}

/// Quarter turns actually applied for a kind at an orientation.
///
/// I, S and Z only have two distinct appearances; O has one.
pub fn effective_quarter_turns(kind: PieceKind, orientation: Orientation) -> u8 {
    let k = orientation.quarter_turns();
    match kind {
        PieceKind::O => 0,
        PieceKind::I | PieceKind::S | PieceKind::Z => k % 2,
        PieceKind::L | PieceKind::J | PieceKind::T => k,
    }
}

/// Shape matrix for `kind` at the absolute `orientation`.
pub fn shape_at(kind: PieceKind, orientation: Orientation) -> Shape {
    let mut shape = canonical_shape(kind);
    for _ in 0..effective_quarter_turns(kind, orientation) {
        shape = rotate_cw(&shape);
    }
    shape
}
