//! Pieces module - tetromino templates and matrix rotation
//!
//! Each piece is a small square matrix of cells (2x2, 3x3 or 4x4).
//! Rotation transposes the matrix and reverses its row order, so a piece
//! always returns to its template after four turns.

use crate::types::{Cell, PieceKind};

/// Largest template side length (the I piece).
pub const MAX_PIECE_SIZE: usize = 4;

/// Square cell matrix holding one piece in one orientation.
///
/// Only the top-left `size` x `size` corner of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    size: u8,
    cells: [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceMatrix {
    /// Build a matrix from row masks (`true` = filled with `kind`).
    fn from_mask<const N: usize>(kind: PieceKind, rows: [[bool; N]; N]) -> Self {
        let mut cells = [[None; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    cells[y][x] = Some(kind);
                }
            }
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// The spawn orientation of a piece kind.
    pub fn template(kind: PieceKind) -> Self {
        const X: bool = true;
        const O: bool = false;
        match kind {
            PieceKind::T => Self::from_mask(kind, [[O, X, O], [X, X, X], [O, O, O]]),
            PieceKind::O => Self::from_mask(kind, [[X, X], [X, X]]),
            PieceKind::L => Self::from_mask(kind, [[O, O, X], [X, X, X], [O, O, O]]),
            PieceKind::J => Self::from_mask(kind, [[X, O, O], [X, X, X], [O, O, O]]),
            PieceKind::I => Self::from_mask(
                kind,
                [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
            ),
            PieceKind::S => Self::from_mask(kind, [[O, X, X], [X, X, O], [O, O, O]]),
            PieceKind::Z => Self::from_mask(kind, [[X, X, O], [O, X, X], [O, O, O]]),
        }
    }

    /// Side length of the matrix (also its width in columns).
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn width(&self) -> u8 {
        self.size
    }

    /// Cell at (x, y) inside the matrix, `None` when empty or out of range.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        let n = self.size as usize;
        if x >= n || y >= n {
            return None;
        }
        self.cells[y][x]
    }

    /// Iterate over filled cells as `(dx, dy, kind)` offsets from the top-left corner.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let n = self.size as usize;
        self.cells[..n].iter().enumerate().flat_map(move |(y, row)| {
            row[..n]
                .iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (x as i8, y as i8, kind)))
        })
    }

    /// Quarter turn: transpose, then reverse the row order.
    pub fn rotated(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[None; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in cells[..n].iter_mut().enumerate() {
            for (x, cell) in row[..n].iter_mut().enumerate() {
                // transposed[r][c] = self[c][r]; reversed row r = n - 1 - y
                *cell = self.cells[x][n - 1 - y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rows as strings, `.` for empty and the piece letter otherwise (debugging aid).
    pub fn rows(&self) -> Vec<String> {
        let n = self.size as usize;
        self.cells[..n]
            .iter()
            .map(|row| {
                row[..n]
                    .iter()
                    .map(|cell| match cell {
                        Some(kind) => kind.as_str().to_ascii_uppercase(),
                        None => ".".to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

/// Spawn column for a matrix: floor(board_width / 2) - floor(matrix_width / 2).
pub fn spawn_column(board_width: u8, matrix: &PieceMatrix) -> i8 {
    (board_width / 2) as i8 - (matrix.width() / 2) as i8
}
