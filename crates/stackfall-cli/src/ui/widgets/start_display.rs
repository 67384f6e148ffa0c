use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Padding, Widget},
};

use crate::ui::widgets::{KeyBindingDisplay, PLAY_BINDINGS, START_BINDINGS, color, style};

const TITLE: &str = "S T A C K F A L L";

/// Title screen shown before a game starts.
#[derive(Debug, Default)]
pub struct StartDisplay;

impl StartDisplay {
    pub fn width() -> u16 {
        76
    }

    pub fn height() -> u16 {
        11
    }
}

impl Widget for StartDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered(
            Constraint::Length(Self::width()),
            Constraint::Length(Self::height()),
        );
        let block = BlockWidget::bordered()
            .border_style(color::CYAN)
            .padding(Padding::vertical(1))
            .style(style::DEFAULT);
        let inner = block.inner(area);
        block.render(area, buf);

        let [title_area, prompt_area, _, start_keys_area, play_keys_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Text::styled(
            TITLE,
            Style::new().fg(color::CYAN).add_modifier(Modifier::BOLD),
        )
        .centered()
        .render(title_area, buf);
        Line::styled("Press Enter to start", style::DEFAULT)
            .centered()
            .render(prompt_area, buf);
        KeyBindingDisplay::new(START_BINDINGS).render(start_keys_area, buf);
        KeyBindingDisplay::new(PLAY_BINDINGS).render(play_keys_area, buf);
    }
}
