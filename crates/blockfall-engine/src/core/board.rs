use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Cell of a locked piece of a specific type.
    Locked(PieceKind),
    /// Border wall.
    Wall,
    /// Interior cell of a completed row waiting to be collapsed.
    ClearMarker,
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRow {
    cells: [Cell; BOARD_WIDTH],
}

impl BoardRow {
    const INTERIOR: Self = {
        let mut cells = [Cell::Empty; BOARD_WIDTH];
        cells[0] = Cell::Wall;
        cells[BOARD_WIDTH - 1] = Cell::Wall;
        Self { cells }
    };
    const BOTTOM: Self = Self {
        cells: [Cell::Wall; BOARD_WIDTH],
    };

    fn interior_cells(&self) -> &[Cell] {
        &self.cells[1..BOARD_WIDTH - 1]
    }

    fn interior_cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[1..BOARD_WIDTH - 1]
    }

    fn is_filled(&self) -> bool {
        self.interior_cells().iter().all(|cell| !cell.is_empty())
    }
}

/// The playing field: a 20×30 grid of [`Cell`]s.
///
/// Column 0, column `WIDTH - 1` and row `HEIGHT - 1` are walls; every
/// operation here preserves that. Coordinates are signed so that a piece's
/// bounding box can hang off the board, and reads outside the grid return
/// `None`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Cell};
///
/// let board = Board::INITIAL;
/// assert_eq!(board.cell(0, 5), Some(Cell::Wall));
/// assert_eq!(board.cell(5, 5), Some(Cell::Empty));
/// assert_eq!(board.cell(5, 29), Some(Cell::Wall));
/// assert_eq!(board.cell(-1, 5), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    /// Empty interior surrounded by the side and bottom walls.
    pub const INITIAL: Self = {
        let mut rows = [BoardRow::INTERIOR; BOARD_HEIGHT];
        rows[BOARD_HEIGHT - 1] = BoardRow::BOTTOM;
        Self { rows }
    };

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
        Some((x, y))
    }

    /// Returns whether `(x, y)` lies on the board.
    #[must_use]
    pub fn contains(x: i32, y: i32) -> bool {
        Self::index(x, y).is_some()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = Self::index(x, y)?;
        Some(self.rows[y].cells[x])
    }

    /// Returns an iterator over all rows, walls included, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Writes a non-wall cell. Wall cells and positions off the board are left untouched.
    pub(crate) fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some((x, y)) = Self::index(x, y)
            && self.rows[y].cells[x] != Cell::Wall
        {
            self.rows[y].cells[x] = cell;
        }
    }

    /// Stamps the piece's solid cells as [`Cell::Locked`].
    pub fn fill_piece(&mut self, piece: Piece) {
        self.fill_piece_as(piece, Cell::Locked(piece.kind()));
    }

    /// Stamps the piece's solid cells with a specific cell value.
    pub fn fill_piece_as(&mut self, piece: Piece, cell: Cell) {
        for (x, y) in piece.occupied_positions() {
            self.set_cell(x, y, cell);
        }
    }

    /// Returns whether row `y` is a completed row.
    ///
    /// A row is complete when every interior cell is non-empty. The bottom
    /// wall row and rows off the board are never complete.
    #[must_use]
    pub fn is_row_complete(&self, y: i32) -> bool {
        usize::try_from(y)
            .ok()
            .filter(|&y| y < BOARD_HEIGHT - 1)
            .is_some_and(|y| self.rows[y].is_filled())
    }

    /// Overwrites the interior of row `y` with [`Cell::ClearMarker`].
    pub(crate) fn mark_row_cleared(&mut self, y: usize) {
        self.rows[y].interior_cells_mut().fill(Cell::ClearMarker);
    }

    /// Removes row `y`: every interior cell above it moves down by one row and
    /// the interior of the top row becomes empty.
    pub fn collapse_row(&mut self, y: usize) {
        debug_assert!(y < BOARD_HEIGHT - 1);
        for row in (1..=y).rev() {
            self.rows[row] = self.rows[row - 1];
        }
        self.rows[0] = BoardRow::INTERIOR;
    }
}
