//! Piece catalog and rotation tests

use fallblock::core::{canonical_shape, rotate_cw, shape_at, Board, Shape};
use fallblock::types::{Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use proptest::prelude::*;

fn rows(shape: &Shape) -> Vec<String> {
    (0..shape.side())
        .map(|r| {
            (0..shape.side())
                .map(|c| if shape.get(r, c) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

// ============== Canonical shapes ==============

#[test]
fn test_canonical_matrix_sizes() {
    assert_eq!(canonical_shape(PieceKind::O).side(), 2);
    assert_eq!(canonical_shape(PieceKind::I).side(), 4);
    for kind in [PieceKind::S, PieceKind::Z, PieceKind::L, PieceKind::J, PieceKind::T] {
        assert_eq!(canonical_shape(kind).side(), 3, "{kind:?}");
    }
}

#[test]
fn test_every_kind_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(canonical_shape(kind).filled_count(), 4, "{kind:?}");
    }
}

#[test]
fn test_canonical_layouts() {
    assert_eq!(rows(&canonical_shape(PieceKind::T)), ["###", ".#.", "..."]);
    assert_eq!(rows(&canonical_shape(PieceKind::S)), [".##", "##.", "..."]);
    assert_eq!(rows(&canonical_shape(PieceKind::L)), ["#..", "#..", "##."]);
    assert_eq!(
        rows(&canonical_shape(PieceKind::I)),
        [".#..", ".#..", ".#..", ".#.."]
    );
}

// ============== Rotation ==============

#[test]
fn test_i_rotations_alternate() {
    let vertical = canonical_shape(PieceKind::I);
    let horizontal = shape_at(PieceKind::I, Orientation::Deg90);
    assert_eq!(rows(&horizontal), ["....", "####", "....", "...."]);
    assert_eq!(shape_at(PieceKind::I, Orientation::Deg180), vertical);
    assert_eq!(shape_at(PieceKind::I, Orientation::Deg270), horizontal);
}

#[test]
fn test_o_never_changes() {
    for o in [Orientation::Deg90, Orientation::Deg180, Orientation::Deg270] {
        assert_eq!(shape_at(PieceKind::O, o), canonical_shape(PieceKind::O));
    }
}

#[test]
fn test_t_quarter_and_half_turns() {
    assert_eq!(
        rows(&shape_at(PieceKind::T, Orientation::Deg90)),
        ["..#", ".##", "..#"]
    );
    assert_eq!(
        rows(&shape_at(PieceKind::T, Orientation::Deg180)),
        ["...", ".#.", "###"]
    );
}

#[test]
fn test_orientation_cycles_back() {
    let mut o = Orientation::Deg0;
    for _ in 0..4 {
        o = o.next();
    }
    assert_eq!(o, Orientation::Deg0);
}

// ============== Properties ==============

fn any_kind() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn any_orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![
        Just(Orientation::Deg0),
        Just(Orientation::Deg90),
        Just(Orientation::Deg180),
        Just(Orientation::Deg270),
    ]
}

proptest! {
    #[test]
    fn prop_rotation_preserves_cell_count(kind in any_kind(), o in any_orientation()) {
        prop_assert_eq!(shape_at(kind, o).filled_count(), 4);
    }

    #[test]
    fn prop_four_quarter_turns_is_identity(kind in any_kind(), o in any_orientation()) {
        let shape = shape_at(kind, o);
        let back = rotate_cw(&rotate_cw(&rotate_cw(&rotate_cw(&shape))));
        prop_assert_eq!(back, shape);
        prop_assert_eq!(shape_at(kind, o.next().next().next().next()), shape);
    }

    #[test]
    fn prop_accepted_placement_stays_on_board(
        kind in any_kind(),
        o in any_orientation(),
        x in -4i8..14,
        y in -4i8..24,
    ) {
        let board = Board::new();
        let shape = shape_at(kind, o);
        let accepted = board.can_place(&shape, x, y);
        let inside = shape.minos().iter().all(|&(dx, dy)| {
            let col = x as i16 + dx as i16;
            let row = y as i16 + dy as i16;
            (0..BOARD_WIDTH as i16).contains(&col) && (0..BOARD_HEIGHT as i16).contains(&row)
        });
        prop_assert_eq!(accepted, inside);
    }

    #[test]
    fn prop_placement_rejects_overlap(
        kind in any_kind(),
        o in any_orientation(),
        x in 0i8..7,
        y in 0i8..17,
        pick in 0usize..4,
    ) {
        let shape = shape_at(kind, o);
        let board = Board::new();
        prop_assume!(board.can_place(&shape, x, y));

        let (dx, dy) = shape.minos()[pick];
        let mut blocked = Board::new();
        blocked.set(y as i16 + dy as i16, x as i16 + dx as i16, true);
        prop_assert!(!blocked.can_place(&shape, x, y));
    }
}
