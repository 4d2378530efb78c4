//! The falling piece as a value.
//!
//! A [`PieceInstance`] owns a copy of its definition's four rotation shapes
//! (they are a few bytes of bitmask), so the whole piece is `Copy`. Copying a
//! piece duplicates its position, rotation and color; the shape data is
//! immutable and identical in every copy. This is what makes per-step undo
//! ("revert to the copy taken before the step") and ghost simulation cheap and
//! side-effect free.

use crate::pieces::{PieceDefinition, Shape};
use crate::types::{ColorId, ROTATION_COUNT, SPAWN_Y};

/// Active, next, held or ghost piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceInstance {
    /// Catalog index of the definition this piece came from
    pub kind: usize,
    rotations: [Shape; ROTATION_COUNT as usize],
    /// Rotation index in `0..4`
    pub rotation: u8,
    /// Column of the bounding square's top-left corner
    pub x: i8,
    /// Row of the bounding square's top-left corner (may be negative at spawn)
    pub y: i8,
    pub color: ColorId,
}

impl PieceInstance {
    /// Create an instance at the spawn location for a board of `board_width`.
    pub fn from_definition(def: &PieceDefinition, board_width: u8) -> Self {
        let mut piece = Self {
            kind: def.id,
            rotations: def.rotations,
            rotation: 0,
            x: 0,
            y: 0,
            color: def.color,
        };
        piece.init_position(board_width);
        piece
    }

    /// Center horizontally and anchor at the spawn row. Rotation is kept.
    pub fn init_position(&mut self, board_width: u8) {
        self.x = ((board_width as i16 - self.side() as i16) / 2) as i8;
        self.y = SPAWN_Y;
    }

    /// Shape of the current rotation
    pub fn shape(&self) -> &Shape {
        &self.rotations[self.rotation as usize % ROTATION_COUNT as usize]
    }

    /// Shape of any rotation index
    pub fn shape_at(&self, rotation: u8) -> &Shape {
        &self.rotations[rotation as usize % ROTATION_COUNT as usize]
    }

    /// Side length of the bounding square
    pub fn side(&self) -> u8 {
        self.rotations[0].side()
    }

    /// Filled cells of the current rotation, relative to the anchor
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape().cells()
    }

    /// Filled cells of the current rotation in board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape()
            .cells()
            .map(move |(cx, cy)| (self.x + cx, self.y + cy))
    }

    /// Advance to the next rotation (clockwise)
    pub fn rotate_cw(&mut self) {
        self.rotation = (self.rotation + 1) % ROTATION_COUNT;
    }

    /// Copy of this piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
