//! Board tests - collision, merge and line clearing through the facade

use blockfall::core::{Board, PieceMatrix};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use proptest::prelude::*;

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert!(board.is_empty());
    assert_eq!(board.get(0, 0), Some(None));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_collision_at_walls_and_floor() {
    let board = Board::new();
    let o = PieceMatrix::template(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 0));
    assert!(board.collides(&o, 9, 0));
    assert!(board.collides(&o, 0, 19));
}

#[test]
fn test_rows_above_the_grid_never_collide() {
    let board = Board::new();
    let o = PieceMatrix::template(PieceKind::O);
    assert!(!board.collides(&o, 4, -2));
    // Only the in-grid part of a piece is tested against the walls.
    assert!(!board.collides(&o, -1, -2));
}

#[test]
fn test_collision_with_locked_cells() {
    let mut board = Board::new();
    board.set(5, 10, Some(PieceKind::Z));
    let t = PieceMatrix::template(PieceKind::T);

    // T row 1 spans x..x+3; at (4, 9) it covers (4..7, 10).
    assert!(board.collides(&t, 4, 9));
    assert!(!board.collides(&t, 6, 9));
}

#[test]
fn test_merge_then_collide() {
    let mut board = Board::new();
    let l = PieceMatrix::template(PieceKind::L);
    assert!(!board.collides(&l, 3, 5));
    board.merge(&l, 3, 5);
    assert!(board.collides(&l, 3, 5));
    assert_eq!(board.get(5, 5), Some(Some(PieceKind::L)));
    assert_eq!(board.get(3, 6), Some(Some(PieceKind::L)));
}

#[test]
fn test_merge_drops_cells_above_the_grid() {
    let mut board = Board::new();
    let i = PieceMatrix::template(PieceKind::I).rotated();
    board.merge(&i, 0, -2);
    let filled = board.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(filled, 2);
}

#[test]
fn test_clear_single_row_shifts_everything_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(3, 18, Some(PieceKind::T));
    board.set(7, 0, Some(PieceKind::S));

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(7, 1), Some(Some(PieceKind::S)));
    assert_eq!(board.get(7, 0), Some(None));
    assert!(!board.is_row_full(19));
}

#[test]
fn test_clear_adjacent_full_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::J);
    }
    board.set(0, 15, Some(PieceKind::O));

    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_clear_non_adjacent_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(2, 18, Some(PieceKind::T));
    fill_row(&mut board, 17, PieceKind::I);

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_no_full_rows_is_a_no_op() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::I));
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_u8_grid_export_uses_color_indices() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::T));
    board.set(9, 0, Some(PieceKind::Z));
    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[19][0], 1);
    assert_eq!(grid[0][9], 7);
    assert_eq!(grid[10][5], 0);
}

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(
        proptest::option::weighted(0.3, proptest::sample::select(PieceKind::ALL.to_vec())),
        (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize),
    )
    .prop_map(|flat| {
        let rows = flat
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.to_vec())
            .collect();
        Board::from_cells(rows)
    })
}

proptest! {
    #[test]
    fn collision_matches_cellwise_definition(
        board in arb_board(),
        kind in proptest::sample::select(PieceKind::ALL.to_vec()),
        turns in 0usize..4,
        x in -4i8..12,
        y in -4i8..22,
    ) {
        let mut matrix = PieceMatrix::template(kind);
        for _ in 0..turns {
            matrix = matrix.rotated();
        }

        let expected = matrix.filled().any(|(dx, dy, _)| {
            let (cx, cy) = (x + dx, y + dy);
            if cy < 0 {
                false
            } else if cx < 0 || cx >= BOARD_WIDTH as i8 || cy >= BOARD_HEIGHT as i8 {
                true
            } else {
                board.is_occupied(cx, cy)
            }
        });
        prop_assert_eq!(board.collides(&matrix, x, y), expected);
    }

    #[test]
    fn merged_piece_always_collides(
        kind in proptest::sample::select(PieceKind::ALL.to_vec()),
        x in 0i8..7,
        y in 0i8..17,
    ) {
        let mut board = Board::new();
        let matrix = PieceMatrix::template(kind);
        prop_assume!(!board.collides(&matrix, x, y));
        board.merge(&matrix, x, y);
        prop_assert!(board.collides(&matrix, x, y));
    }

    #[test]
    fn clearing_preserves_non_full_rows(board in arb_board()) {
        let mut cleared = board.clone();
        let full = (0..BOARD_HEIGHT as usize).filter(|&y| board.is_row_full(y)).count();
        prop_assert_eq!(cleared.clear_full_rows(), full);

        let kept: Vec<_> = board
            .to_cells()
            .into_iter()
            .filter(|row| !row.iter().all(|c| c.is_some()))
            .collect();
        let after = cleared.to_cells();
        prop_assert!(after[..full].iter().all(|row| row.iter().all(|c| c.is_none())));
        prop_assert_eq!(&after[full..], &kept[..]);
    }
}
