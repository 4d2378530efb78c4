//! Ghost resolution: where the current piece would come to rest.

use crate::board::Board;
use crate::piece::PieceInstance;

/// Simulate a hard drop on a copy of `piece`.
///
/// Returns `None` when the piece is not at a valid location to begin with.
/// Otherwise steps the copy down one row at a time until the next step would
/// be invalid and returns the last valid copy. Neither the board nor `piece`
/// is touched.
pub fn drop_to_rest(board: &Board, piece: &PieceInstance) -> Option<PieceInstance> {
    if !board.is_location_valid(piece) {
        return None;
    }

    let mut ghost = *piece;
    loop {
        ghost.y += 1;
        if !board.is_location_valid(&ghost) {
            ghost.y -= 1;
            return Some(ghost);
        }
    }
}

/// Rows between `piece` and its resting position, if it has one.
pub fn drop_distance(board: &Board, piece: &PieceInstance) -> Option<u8> {
    drop_to_rest(board, piece).map(|ghost| (ghost.y - piece.y) as u8)
}
