use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One field cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// `0` is an empty cell (optionally dotted); `1..=7` are piece colors.
    pub fn from_color_index(color_index: u8, show_dots: bool) -> Self {
        match color_index {
            0 if show_dots => Self::new(style::EMPTY_DOT, "."),
            0 => Self::new(style::EMPTY, ""),
            _ => {
                let style = style::BY_COLOR_INDEX
                    .get(usize::from(color_index))
                    .copied()
                    .unwrap_or(style::DEFAULT);
                Self::new(style, "")
            }
        }
    }

    pub fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
