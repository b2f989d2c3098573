use super::{
    board::Board,
    piece::{Piece, local_offsets},
};

/// Returns whether `piece` fits on `board`.
///
/// A solid cell of the piece is rejected only when it lands on the board and
/// the board cell there is not [`Cell::Empty`](super::board::Cell::Empty).
/// Solid cells off the board are not checked; the side and bottom walls are
/// what keep a piece inside.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, fits};
///
/// let board = Board::INITIAL;
/// let piece = Piece::new(PieceKind::I);
/// assert!(fits(&board, piece));
///
/// // The I-piece's column would hit the left wall.
/// assert!(!fits(&board, piece.shifted(-12, 0)));
/// ```
#[must_use]
pub fn fits(board: &Board, piece: Piece) -> bool {
    local_offsets()
        .filter(|&(lx, ly)| piece.is_solid_at(lx, ly))
        .map(|(lx, ly)| (piece.x() + i32::from(lx), piece.y() + i32::from(ly)))
        .filter(|&(x, y)| Board::contains(x, y))
        .all(|(x, y)| board.cell(x, y).is_some_and(|cell| cell.is_empty()))
}
