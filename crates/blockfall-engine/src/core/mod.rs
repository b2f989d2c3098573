//! Core data structures: pieces, the board and collision testing.
//!
//! The board is a 20×30 grid whose left column, right column and bottom row
//! are walls. Pieces live in a 4×4 bounding box anchored at its top-left
//! cell, in board coordinates.

pub use self::{board::*, collision::*, piece::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod piece;

/// Board width, wall columns included.
pub const BOARD_WIDTH: usize = 20;
/// Board height, bottom wall row included.
pub const BOARD_HEIGHT: usize = 30;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const PIECE_SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32;
pub(crate) const PIECE_SPAWN_Y: i32 = 0;
