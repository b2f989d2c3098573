use crate::core::{
    board::Board,
    collision::fits,
    piece::{Piece, PieceKind},
};

use super::piece_generator::PieceGenerator;

/// The falling piece, the next-piece lookahead and the rotate debounce.
///
/// Every movement is validated with [`fits`]; a blocked move leaves the
/// piece where it is.
#[derive(Debug, Clone)]
pub struct ActivePieceController {
    piece: Piece,
    next: PieceKind,
    rotate_armed: bool,
}

impl ActivePieceController {
    #[must_use]
    pub fn new(first: PieceKind, next: PieceKind) -> Self {
        Self {
            piece: Piece::new(first),
            next,
            rotate_armed: true,
        }
    }

    #[must_use]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    /// Moves the piece by `(dx, dy)` if the destination fits.
    pub fn try_shift(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        self.try_set(board, self.piece.shifted(dx, dy))
    }

    /// Feeds the current state of the rotate input.
    ///
    /// The piece rotates only on the update where the input turns on. While
    /// the input stays on nothing happens, even if that first rotation was
    /// blocked; releasing it arms the next rotation.
    pub fn update_rotation(&mut self, board: &Board, rotate: bool) -> bool {
        if !rotate {
            self.rotate_armed = true;
            return false;
        }
        let armed = self.rotate_armed;
        self.rotate_armed = false;
        armed && self.try_set(board, self.piece.rotated())
    }

    /// Drops the piece straight down as far as it fits.
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self, board: &Board) -> usize {
        let mut rows = 0;
        while self.try_shift(board, 0, 1) {
            rows += 1;
        }
        rows
    }

    /// Swaps the falling piece's kind in place, if the new shape fits where the piece is.
    pub fn try_replace_kind(&mut self, board: &Board, kind: PieceKind) -> bool {
        self.try_set(board, self.piece.with_kind(kind))
    }

    /// Promotes the lookahead piece to a freshly spawned falling piece and
    /// draws a new lookahead.
    pub fn advance(&mut self, generator: &mut PieceGenerator) {
        self.piece = Piece::new(self.next);
        self.next = generator.draw();
    }

    /// Replaces the falling piece without a fit check.
    pub(crate) fn set_piece_unchecked(&mut self, piece: Piece) {
        self.piece = piece;
    }

    fn try_set(&mut self, board: &Board, piece: Piece) -> bool {
        if !fits(board, piece) {
            return false;
        }
        self.piece = piece;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::board::Cell,
        engine::piece_generator::PieceSeed,
    };

    use super::*;

    #[test]
    fn test_shift_commits_only_when_fitting() {
        let board = Board::INITIAL;
        let mut controller = ActivePieceController::new(PieceKind::I, PieceKind::O);

        assert!(controller.try_shift(&board, 1, 0));
        assert_eq!(controller.piece().x(), 11);

        // I-piece column sits at local x = 2; column 18 is the last interior one.
        for _ in 0..5 {
            assert!(controller.try_shift(&board, 1, 0));
        }
        assert!(!controller.try_shift(&board, 1, 0));
        assert_eq!(controller.piece().x(), 16);
    }

    #[test]
    fn test_rotation_is_edge_triggered() {
        let board = Board::INITIAL;
        let mut controller = ActivePieceController::new(PieceKind::T, PieceKind::O);

        assert!(controller.update_rotation(&board, true));
        assert!(!controller.update_rotation(&board, true));
        assert!(!controller.update_rotation(&board, true));
        assert_eq!(controller.piece().rotation().count(), 1);

        assert!(!controller.update_rotation(&board, false));
        assert!(controller.update_rotation(&board, true));
        assert_eq!(controller.piece().rotation().count(), 2);
    }

    #[test]
    fn test_blocked_rotation_still_consumes_press() {
        let mut board = Board::INITIAL;
        let mut controller = ActivePieceController::new(PieceKind::I, PieceKind::O);
        // Rotated I-piece occupies local row 2 across the box.
        board.set_cell(10, 2, Cell::Locked(PieceKind::O));

        assert!(!controller.update_rotation(&board, true));
        assert_eq!(controller.piece().rotation().count(), 0);

        board.set_cell(10, 2, Cell::Empty);
        assert!(!controller.update_rotation(&board, true));
        assert!(!controller.update_rotation(&board, false));
        assert!(controller.update_rotation(&board, true));
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let board = Board::INITIAL;
        let mut controller = ActivePieceController::new(PieceKind::I, PieceKind::O);

        assert_eq!(controller.hard_drop(&board), 25);
        assert_eq!(controller.piece().y(), 25);
        assert!(!fits(&board, controller.piece().shifted(0, 1)));
        assert_eq!(controller.hard_drop(&board), 0);
    }

    #[test]
    fn test_advance_promotes_lookahead() {
        let board = Board::INITIAL;
        let mut generator = PieceGenerator::with_seed(PieceSeed::from_bytes([1; 16]));
        let mut controller = ActivePieceController::new(PieceKind::I, PieceKind::L);
        controller.try_shift(&board, -3, 4);
        controller.update_rotation(&board, true);

        controller.advance(&mut generator);

        assert_eq!(controller.piece(), Piece::new(PieceKind::L));
    }

    #[test]
    fn test_replace_kind_requires_fit() {
        let mut board = Board::INITIAL;
        let mut controller = ActivePieceController::new(PieceKind::I, PieceKind::O);
        assert!(controller.try_replace_kind(&board, PieceKind::S));
        assert_eq!(controller.piece().kind(), PieceKind::S);

        // O-piece covers local (1, 1); block it.
        board.set_cell(11, 1, Cell::Locked(PieceKind::T));
        assert!(!controller.try_replace_kind(&board, PieceKind::O));
        assert_eq!(controller.piece().kind(), PieceKind::S);
    }
}
