use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{Field, Piece};

use crate::ui::widgets::BlockDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellView {
    Color(u8),
    Ghost,
}

/// The playfield: locked cells with the ghost and falling piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    field: &'a Field,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self {
            field,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
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
        u16::try_from(Field::WIDTH).unwrap() * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(Field::HEIGHT).unwrap() * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_views(&self) -> [[CellView; Field::WIDTH]; Field::HEIGHT] {
        let mut views = [[CellView::Color(0); Field::WIDTH]; Field::HEIGHT];
        for (view_row, row) in iter::zip(&mut views, self.field.rows()) {
            for (view, block) in iter::zip(view_row, row.cells()) {
                *view = CellView::Color(block.color_index());
            }
        }

        let mut overlay = |piece: &Piece, view: CellView| {
            for cell in piece.occupied_cells() {
                let (Ok(col), Ok(row)) = (usize::try_from(cell.col), usize::try_from(cell.row))
                else {
                    continue;
                };
                if let Some(slot) = views.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *slot = view;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            overlay(ghost, CellView::Ghost);
        }
        if let Some(piece) = &self.falling_piece {
            overlay(piece, CellView::Color(piece.color_index()));
        }
        views
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..Field::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Field::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Field::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Field::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cell_views()) {
            for (grid_cell, view) in iter::zip(grid_row, row) {
                let block_display = match view {
                    CellView::Color(index) => BlockDisplay::from_color_index(index, true),
                    CellView::Ghost => BlockDisplay::ghost(),
                };
                block_display.render(grid_cell, buf);
            }
        }
    }
}
