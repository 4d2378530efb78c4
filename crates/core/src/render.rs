//! Render boundary.
//!
//! The core does not draw. [`GameState::render`](crate::GameState::render)
//! walks the visible state and reports filled cells to a [`Surface`]; the
//! surface decides what a cell looks like.

use crate::types::{ColorId, GameStatus};

/// Which part of the state a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Locked board cell, board coordinates
    Board,
    /// Projected resting position of the current piece, board coordinates
    Ghost,
    /// Falling piece, board coordinates (rows above the top are not reported)
    Current,
    /// Preview of the next piece, coordinates inside its bounding square
    Next,
    /// Held piece, coordinates inside its bounding square
    Hold,
}

/// Per-frame header passed to [`Surface::begin_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub board_width: u8,
    pub board_height: u8,
    pub status: GameStatus,
}

/// Drawing target supplied by the host.
pub trait Surface {
    fn begin_frame(&mut self, frame: FrameInfo);

    fn draw_cell(&mut self, layer: Layer, x: i8, y: i8, color: ColorId);

    fn end_frame(&mut self) {}
}
