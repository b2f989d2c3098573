use crate::core::{
    board::{Board, Cell},
    piece::Piece,
};

/// State captured right before a piece is locked.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    piece: Piece,
    score: usize,
}

/// Single-slot undo history.
///
/// Only the most recent lock can be undone: capturing overwrites the slot,
/// and restoring empties it.
#[derive(Debug, Clone, Default)]
pub struct UndoSnapshot {
    slot: Option<Snapshot>,
}

impl UndoSnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn capture(&mut self, board: &Board, piece: Piece, score: usize) {
        self.slot = Some(Snapshot {
            board: board.clone(),
            piece,
            score,
        });
    }

    /// Rolls `board` back to the captured state and empties the slot.
    ///
    /// The cells the captured piece was locked into are cleared first, then the
    /// whole board is overwritten. Returns the captured piece moved back to the
    /// spawn position, and the captured score. Does nothing and returns `None`
    /// when the slot is empty.
    pub fn restore(&mut self, board: &mut Board) -> Option<(Piece, usize)> {
        let snapshot = self.slot.take()?;
        board.fill_piece_as(snapshot.piece, Cell::Empty);
        *board = snapshot.board;
        Some((snapshot.piece.at_spawn(), snapshot.score))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::piece::PieceKind;

    use super::*;

    #[test]
    fn test_restore_empty_is_noop() {
        let mut undo = UndoSnapshot::new();
        let mut board = Board::INITIAL;
        board.fill_piece(Piece::new(PieceKind::O).shifted(0, 10));
        let before = board.clone();

        assert_eq!(undo.restore(&mut board), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_restore_rolls_back_lock() {
        let mut undo = UndoSnapshot::new();
        let mut board = Board::INITIAL;
        let piece = Piece::new(PieceKind::L).shifted(-4, 22).rotated();

        undo.capture(&board, piece, 125);
        board.fill_piece(piece);
        assert_ne!(board, Board::INITIAL);

        let (restored, score) = undo.restore(&mut board).unwrap();
        assert_eq!(board, Board::INITIAL);
        assert_eq!(score, 125);
        assert_eq!(restored, Piece::new(PieceKind::L).rotated());
        assert!(undo.is_empty());

        // Single use.
        assert_eq!(undo.restore(&mut board), None);
    }

    #[test]
    fn test_capture_overwrites_previous() {
        let mut undo = UndoSnapshot::new();
        let mut board = Board::INITIAL;
        let first = Piece::new(PieceKind::O).shifted(0, 25);
        let second = Piece::new(PieceKind::T).shifted(0, 21);

        undo.capture(&board, first, 0);
        board.fill_piece(first);
        let after_first = board.clone();
        undo.capture(&board, second, 25);
        board.fill_piece(second);

        let (restored, score) = undo.restore(&mut board).unwrap();
        assert_eq!(board, after_first);
        assert_eq!(restored.kind(), PieceKind::T);
        assert_eq!(score, 25);
    }
}
