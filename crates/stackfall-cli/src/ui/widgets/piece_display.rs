use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::PieceMatrix;

use crate::ui::widgets::BlockDisplay;

/// A lone piece matrix centered in its panel, used for the NEXT preview.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    matrix: Option<&'a PieceMatrix>,
    block: Option<BlockWidget<'a>>,
}

impl Default for PieceDisplay<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            matrix: None,
            block: None,
        }
    }

    pub fn matrix(self, matrix: &'a PieceMatrix) -> Self {
        Self {
            matrix: Some(matrix),
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
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
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

        BlockDisplay::from_color_index(0, false).render(area, buf);

        let Some(matrix) = self.matrix else {
            return;
        };
        let (Ok(cols), Ok(rows)) = (u16::try_from(matrix.width()), u16::try_from(matrix.height()))
        else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(cols * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        let col_constraints = (0..cols).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let block = matrix.get(x, y);
                if !block.is_empty() {
                    BlockDisplay::from_color_index(block.color_index(), false)
                        .render(grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::PieceKind;

    use super::*;

    #[test]
    fn test_renders_piece_colors() {
        let matrix = PieceKind::T.spawn_matrix();
        let display = PieceDisplay::new().matrix(&matrix);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);

        display.render(area, &mut buf);

        let purple = crate::ui::widgets::color::PURPLE;
        let colored = area.positions().filter(|&p| buf[p].bg == purple).count();
        // 4 cells, 2 columns each
        assert_eq!(colored, 8);
    }

    #[test]
    fn test_default_is_an_empty_panel() {
        let display = PieceDisplay::default().block(BlockWidget::bordered());
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);

        display.render(area, &mut buf);

        let inner = Rect::new(1, 1, area.width - 2, area.height - 2);
        assert!(inner.positions().all(|p| buf[p].symbol() == " "));
        assert_eq!(buf[(0, 0)].symbol(), "┌");
    }
}
