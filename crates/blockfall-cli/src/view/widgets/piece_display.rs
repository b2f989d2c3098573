use blockfall_engine::{Piece, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::CellDisplay;

/// A piece kind in its spawn orientation, drawn inside its 4×4 box.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

const BOX_SIZE: u16 = 4;

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        BOX_SIZE * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        BOX_SIZE * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.piece else {
            return;
        };
        let piece = Piece::new(kind);

        let horizontal =
            Layout::horizontal((0..BOX_SIZE).map(|_| Constraint::Length(CellDisplay::width())));
        let vertical =
            Layout::vertical((0..BOX_SIZE).map(|_| Constraint::Length(CellDisplay::height())));

        for (local_y, row) in (0..).zip(area.layout::<4>(&vertical)) {
            for (local_x, cell) in (0..).zip(row.layout::<4>(&horizontal)) {
                if piece.is_solid_at(local_x, local_y) {
                    CellDisplay::from_piece_kind(kind).render(cell, buf);
                }
            }
        }
    }
}
