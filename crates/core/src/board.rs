//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the grid (y < 0) are never occupied, so pieces may overhang the top edge.

use crate::pieces::PieceMatrix;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single piece cell placed at (x, y) would collide.
    ///
    /// Columns outside 0..WIDTH and rows at or below the floor collide.
    /// Rows above the grid never do.
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return false;
        }
        match self.get(x, y) {
            Some(cell) => cell.is_some(),
            None => true,
        }
    }

    /// Collision test for a piece matrix placed with its top-left corner at (x, y).
    pub fn collides(&self, matrix: &PieceMatrix, x: i8, y: i8) -> bool {
        matrix
            .filled()
            .any(|(dx, dy, _)| self.blocks(x + dx, y + dy))
    }

    /// Copy every filled cell of the matrix into the board.
    ///
    /// Cells landing above the grid are dropped.
    pub fn merge(&mut self, matrix: &PieceMatrix, x: i8, y: i8) {
        for (dx, dy, kind) in matrix.filled() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift all rows above down, and insert an empty row on top.
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }

        1
    }

    /// Clear all full rows, scanning bottom to top.
    ///
    /// After a row is removed the same index is examined again, since it now
    /// holds the row that used to sit above it. Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                cleared += self.clear_row(row);
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a mutable reference to the internal cells array (for testing)
    #[cfg(test)]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Export the board as raw cell values (0 empty, 1-7 color index).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = crate::types::cell_value(self.cells[y * width + x]);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Create from a 2D vector (converts to flat array)
    ///
    /// Panics if the dimensions do not match the board.
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                let end = start + width;
                self.cells[start..end].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_blocks_above_grid_is_free() {
        let board = Board::new();
        assert!(!board.blocks(4, -1));
        assert!(!board.blocks(-3, -2));
        assert!(board.blocks(-1, 0));
        assert!(board.blocks(10, 5));
        assert!(board.blocks(0, 20));
    }

    #[test]
    fn test_clear_full_rows_re_examines_shifted_row() {
        let mut board = Board::new();
        // Two adjacent full rows; the upper one lands on the same index after the first clear.
        for x in 0..10 {
            board.set(x, 18, Some(PieceKind::J));
            board.set(x, 19, Some(PieceKind::L));
        }
        board.set(2, 17, Some(PieceKind::T));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(3, 19, Some(PieceKind::I));
        board.set(0, 0, Some(PieceKind::T));
        board.cells_mut()[15] = Some(PieceKind::Z);

        let mut grid = [[0u8; 10]; 20];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][3], 5);
        assert_eq!(grid[0][0], 1);
        assert_eq!(grid[1][5], 7);
        assert_eq!(grid[10][5], 0);
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 20];
        cells_2d[5][3] = Some(PieceKind::O);
        cells_2d[10][7] = Some(PieceKind::L);

        let board = Board::from_cells(cells_2d.clone());
        assert_eq!(cells_2d, board.to_cells());
    }
}
