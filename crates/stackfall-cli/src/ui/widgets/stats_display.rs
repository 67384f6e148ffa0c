use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::Snapshot;

use crate::ui::widgets::style;

/// Score, level, and counters of the running game.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    snapshot: Snapshot<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(fn(&Snapshot<'_>) -> usize),
    LabelValue(&'static str, fn(&Snapshot<'_>) -> usize),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|s| s.score()),
    Row::Empty,
    Row::LabelValue("LEVEL:", |s| s.level()),
    Row::LabelValue("LINES:", |s| s.lines_cleared()),
    Row::LabelValue("PIECES:", |s| s.completed_pieces()),
    Row::Empty,
    Row::LabelValue("SINGLES:", |s| s.line_cleared_counter()[1]),
    Row::LabelValue("DOUBLES:", |s| s.line_cleared_counter()[2]),
    Row::LabelValue("TRIPLES:", |s| s.line_cleared_counter()[3]),
    Row::LabelValue("TETRIS:", |s| s.line_cleared_counter()[4]),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.snapshot).to_string(), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.snapshot).to_string(), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{Command, GameSession, PieceSeed};

    use super::*;

    #[test]
    fn test_renders_counters() {
        let mut session = GameSession::with_seed(PieceSeed::from_bytes([3; 16]));
        session.advance(Command::Confirm);
        session.advance(Command::HardDrop);
        let display = StatsDisplay::new(session.snapshot()).block(BlockWidget::bordered());
        assert!(format!("{display:?}").starts_with("StatsDisplay"));

        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let line = |y: u16| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(line(1).contains("SCORE:"));
        assert!(line(2).trim_end_matches(['│', ' ']).ends_with('0'));
        assert!(line(4).contains("LEVEL:") && line(4).contains('1'));
        assert!(line(6).contains("PIECES:") && line(6).contains('1'));
    }
}
