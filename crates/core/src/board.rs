//! Board module - the grid of locked cells
//!
//! The board is a `width x height` grid of color ids stored as a flat,
//! row-major vector (`y * width + x`). `0` means empty.
//! Coordinates: x grows to the right, y grows downward, row 0 is the top.
//!
//! The only writers are [`Board::place_piece`] (merges a piece and clears full
//! rows) and [`Board::clear_filled_rows`]. Every other method is a query.

use crate::config::ConfigError;
use crate::piece::PieceInstance;
use crate::types::{
    ColorId, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, EMPTY, MAX_BOARD_SIDE, MIN_BOARD_SIDE,
};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<ColorId>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Both sides must lie in `MIN_BOARD_SIDE..=MAX_BOARD_SIDE`.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        Self::check_size(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        })
    }

    /// Create a board from existing row-major cells.
    pub fn with_cells(width: u8, height: u8, cells: Vec<ColorId>) -> Result<Self, ConfigError> {
        Self::check_size(width, height)?;
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(ConfigError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub(crate) fn check_size(width: u8, height: u8) -> Result<(), ConfigError> {
        let range = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(ConfigError::BoardSize { width, height });
        }
        Ok(())
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Color at `(x, y)`. Panics outside `0..width` x `0..height`.
    pub fn cell_at(&self, x: u8, y: u8) -> ColorId {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} board",
            self.width,
            self.height
        );
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Color at `(x, y)`, or `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<ColorId> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Every filled cell of the piece's current rotation lies inside the board
    /// on an empty cell. Cells above the top row count as out of bounds.
    pub fn is_location_valid(&self, piece: &PieceInstance) -> bool {
        piece.board_cells().all(|(x, y)| self.is_free(x, y))
    }

    /// Clamp a piece into the board horizontally and below the top edge.
    ///
    /// Shifts left while a filled cell sits past the right edge, right while
    /// one sits past the left edge, and down while one sits above row 0. It
    /// never moves a piece out of an overlap with locked cells, so a piece
    /// spawned into a full column still reports failure.
    ///
    /// Returns `is_location_valid` for the clamped piece.
    pub fn fit_piece(&self, piece: &mut PieceInstance) -> bool {
        let width = self.width as i8;
        let shape = *piece.shape();

        for (cx, cy) in shape.cells() {
            while piece.x + cx >= width {
                piece.x -= 1;
            }
            while piece.x + cx < 0 {
                piece.x += 1;
            }
            while piece.y + cy < 0 {
                piece.y += 1;
            }
        }

        self.is_location_valid(piece)
    }

    /// Merge the piece's cells into the board, then clear filled rows.
    ///
    /// Returns the number of rows cleared. Cells outside the board are skipped.
    pub fn place_piece(&mut self, piece: &PieceInstance) -> usize {
        for (x, y) in piece.board_cells() {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = piece.color;
            }
        }
        self.clear_filled_rows()
    }

    /// Check if a row is completely filled
    pub fn is_row_filled(&self, y: u8) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Cells of row `y`
    pub fn row(&self, y: u8) -> &[ColorId] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    /// Remove every filled row, compacting the surviving rows downward.
    ///
    /// Surviving rows keep their relative order; the vacated rows at the top
    /// become empty. Returns the number of rows removed.
    pub fn clear_filled_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_filled(read_y as u8) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    /// Row-major cell storage
    pub fn cells(&self) -> &[ColorId] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    /// Empty 10x20 board
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cells: vec![EMPTY; DEFAULT_BOARD_WIDTH as usize * DEFAULT_BOARD_HEIGHT as usize],
        }
    }
}
