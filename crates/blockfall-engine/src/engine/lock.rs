//! Locking a piece into the board and clearing the rows it completes.

use arrayvec::ArrayVec;

use crate::core::{board::Board, piece::Piece};

/// Row indices completed by a single lock, in top-to-bottom order.
///
/// A piece's bounding box spans four rows, so a lock completes at most four.
pub type CompletedRows = ArrayVec<usize, 4>;

/// Stamps `piece` into the board and marks the rows it completes.
///
/// Only the rows covered by the piece's bounding box are scanned, and the
/// bottom wall row never counts. Completed rows are filled with
/// [`Cell::ClearMarker`](crate::Cell::ClearMarker) and stay on the board until
/// [`collapse_rows`] removes them.
pub fn lock_piece(board: &mut Board, piece: Piece) -> CompletedRows {
    board.fill_piece(piece);

    let mut completed = CompletedRows::new();
    for y in piece.y()..piece.y() + 4 {
        if board.is_row_complete(y)
            && let Ok(y) = usize::try_from(y)
        {
            board.mark_row_cleared(y);
            completed.push(y);
        }
    }
    completed
}

/// Collapses each completed row, in the order given.
///
/// Rows must come from a scan that runs top to bottom: collapsing a row only
/// moves the rows above it, so the indices of the lower rows stay valid.
pub fn collapse_rows(board: &mut Board, rows: &[usize]) {
    for &y in rows {
        board.collapse_row(y);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{
        BOARD_WIDTH,
        board::Cell,
        collision::fits,
        piece::{PieceKind, PieceRotation},
    };

    use super::*;

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn fill_row_except(board: &mut Board, y: i32, gap: &[i32]) {
        for x in 1..BOARD_WIDTH as i32 - 1 {
            if !gap.contains(&x) {
                board.set_cell(x, y, Cell::Locked(PieceKind::O));
            }
        }
    }

    #[test]
    fn test_lock_without_clear() {
        let mut board = Board::INITIAL;
        let piece = Piece::new(PieceKind::T).shifted(0, 20);
        let completed = lock_piece(&mut board, piece);

        assert!(completed.is_empty());
        for (x, y) in piece.occupied_positions() {
            assert_eq!(board.cell(x, y), Some(Cell::Locked(PieceKind::T)));
        }
    }

    #[test]
    fn test_lock_marks_single_completed_row() {
        let mut board = Board::INITIAL;
        // Vertical I-piece in column 12 fills rows 25..=28.
        fill_row_except(&mut board, 28, &[12]);
        let piece = Piece::new(PieceKind::I).shifted(0, 25);
        assert!(fits(&board, piece));

        let completed = lock_piece(&mut board, piece);

        assert_eq!(completed.as_slice(), &[28]);
        for x in 1..19 {
            assert_eq!(board.cell(x, 28), Some(Cell::ClearMarker));
        }
        assert_eq!(board.cell(0, 28), Some(Cell::Wall));
    }

    #[test]
    fn test_lock_marks_rows_top_to_bottom() {
        let mut board = Board::INITIAL;
        // Horizontal I-piece at local row 2, columns 10..=13.
        let piece = Piece::at(PieceKind::I, PieceRotation::new(1), 10, 20);
        fill_row_except(&mut board, 22, &[10, 11, 12, 13]);
        fill_row_except(&mut board, 23, &[]);
        fill_row_except(&mut board, 21, &[]);

        let completed = lock_piece(&mut board, piece);

        assert_eq!(completed.as_slice(), &[21, 22, 23]);
    }

    #[test]
    fn test_rows_outside_bounding_box_are_not_scanned() {
        let mut board = Board::INITIAL;
        fill_row_except(&mut board, 10, &[]);
        let piece = Piece::new(PieceKind::O).shifted(0, 20);

        let completed = lock_piece(&mut board, piece);

        assert!(completed.is_empty());
        assert!(board.is_row_complete(10));
        assert_eq!(board.cell(1, 10), Some(Cell::Locked(PieceKind::O)));
    }

    #[test]
    fn test_collapse_after_lock() {
        let mut board = Board::INITIAL;
        fill_row_except(&mut board, 28, &[12]);
        board.set_cell(3, 27, Cell::Locked(PieceKind::S));
        let piece = Piece::new(PieceKind::I).shifted(0, 25);

        let completed = lock_piece(&mut board, piece);
        collapse_rows(&mut board, &completed);

        // Row 27 slid down into the cleared row.
        assert_eq!(board.cell(3, 28), Some(Cell::Locked(PieceKind::S)));
        assert_eq!(board.cell(12, 28), Some(Cell::Locked(PieceKind::I)));
        assert_eq!(board.cell(3, 27), Some(Cell::Empty));
        assert_eq!(board.cell(12, 25), Some(Cell::Empty));
        assert!(!board.is_row_complete(28));
        assert!(board.rows().flatten().all(|&cell| cell != Cell::ClearMarker));
    }
}
